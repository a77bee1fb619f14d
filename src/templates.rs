//! Built-in starter configurations for common Swiss vocational maturity programmes.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::models::{
    ExtraFields, PassingCriteria, SchoolConfig, Semester, SemesterId, Settings, SubCategory,
    Subject,
};

pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
}

pub const TEMPLATES: &[TemplateInfo] = &[
    TemplateInfo {
        id: "bm2-tals-vz",
        name: "BM 2 TALS (Vollzeit)",
    },
    TemplateInfo {
        id: "bm2-arte-vz",
        name: "BM 2 Gestaltung & Kunst (Vollzeit)",
    },
    TemplateInfo {
        id: "bm2-wdd-vz",
        name: "BM 2 Dienstleistungen (Vollzeit)",
    },
    TemplateInfo {
        id: "bm2-tals-tz",
        name: "BM 2 TALS (Teilzeit)",
    },
    TemplateInfo {
        id: "bm1-tals-4j",
        name: "BM 1 TALS (4 Jahre / HIPR)",
    },
    TemplateInfo {
        id: "bm1-tals-3j",
        name: "BM 1 TALS (3 Jahre / L)",
    },
    TemplateInfo {
        id: "bm1-arte",
        name: "BM 1 Gestaltung & Kunst",
    },
    TemplateInfo {
        id: "bm1-wdd",
        name: "BM 1 Dienstleistungen",
    },
    TemplateInfo {
        id: "bm1-geso",
        name: "BM 1 Gesundheit & Soziales",
    },
];

/// Builds the template with the given id under a fresh configuration id.
pub fn instantiate(id: &str) -> Option<SchoolConfig> {
    let mut config = match id {
        "bm2-tals-vz" => bm2_tals_full_time(),
        "bm2-arte-vz" => bm2_arts_full_time(),
        "bm2-wdd-vz" => bm2_services_full_time(),
        "bm2-tals-tz" => bm2_tals_part_time(),
        "bm1-tals-4j" => bm1_tals_four_years(),
        "bm1-tals-3j" => bm1_tals_three_years(),
        "bm1-arte" => bm1_arts(),
        "bm1-wdd" => bm1_services(),
        "bm1-geso" => bm1_health_social(),
        _ => return None,
    };
    config.id = Uuid::new_v4().to_string();
    Some(config)
}

fn bm2_tals_full_time() -> SchoolConfig {
    let all: [SemesterId; 2] = [1, 2];
    school(
        "BM 2 TALS (Vollzeit)",
        2,
        vec![
            exam_subject("d", "Deutsch", &all),
            exam_subject("f", "Französisch", &all),
            exam_subject("e", "Englisch", &all),
            exam_subject("mg", "Mathematik Grundlagen", &all),
            exam_subject("ms", "Mathematik Schwerpunkt", &all),
            partitioned(
                exam_subject("nw", "Naturwissenschaften", &all),
                vec![part("Physik", 50.0, &all), part("Chemie", 50.0, &all)],
            ),
            subject("gp", "Geschichte und Politik", &all),
            subject("wr", "Wirtschaft und Recht", &all),
            subject("idpa", "IDPA", &[2]),
        ],
    )
}

fn bm2_arts_full_time() -> SchoolConfig {
    let all: [SemesterId; 2] = [1, 2];
    school(
        "BM 2 Gestaltung & Kunst (Vollzeit)",
        2,
        vec![
            exam_subject("d", "Deutsch", &all),
            exam_subject("f", "Französisch", &all),
            exam_subject("e", "Englisch", &all),
            exam_subject("mg", "Mathematik", &all),
            exam_subject("gkk", "Gestaltung, Kunst, Kultur", &all),
            exam_subject("ik", "Information & Kommunikation", &all),
            subject("gp", "Geschichte und Politik", &all),
            subject("tu", "Technik und Umwelt", &all),
            subject("idpa", "IDPA", &[2]),
        ],
    )
}

fn bm2_services_full_time() -> SchoolConfig {
    let all: [SemesterId; 2] = [1, 2];
    school(
        "BM 2 Dienstleistungen (Vollzeit)",
        2,
        vec![
            exam_subject("d", "Deutsch", &all),
            exam_subject("f", "Französisch", &all),
            exam_subject("e", "Englisch", &all),
            exam_subject("m", "Mathematik", &all),
            exam_subject("fr", "Finanz- & Rechnungswesen", &all),
            exam_subject("wr", "Wirtschaft & Recht (Schwerpunkt)", &all),
            subject("wre", "Wirtschaft & Recht (Ergänzung)", &all),
            subject("gp", "Geschichte und Politik", &all),
            subject("idpa", "IDPA", &[2]),
        ],
    )
}

fn bm2_tals_part_time() -> SchoolConfig {
    let all: [SemesterId; 4] = [1, 2, 3, 4];
    school(
        "BM 2 TALS (Teilzeit)",
        4,
        vec![
            exam_subject("d", "Deutsch", &all),
            exam_subject("f", "Französisch", &all),
            exam_subject("e", "Englisch", &all),
            exam_subject("mg", "Mathematik Grundlagen", &[1, 2]),
            exam_subject("ms", "Mathematik Schwerpunkt", &[3, 4]),
            partitioned(
                exam_subject("nw", "Naturwissenschaften", &all),
                vec![part("Physik", 75.0, &all), part("Chemie", 25.0, &[1, 2])],
            ),
            subject("gp", "Geschichte und Politik", &[1, 2]),
            subject("wr", "Wirtschaft und Recht", &[3, 4]),
            subject("idpa", "IDPA", &[4]),
        ],
    )
}

fn bm1_tals_four_years() -> SchoolConfig {
    school(
        "BM 1 TALS (4 Jahre / HIPR)",
        8,
        vec![
            exam_subject("f", "Französisch", &[1, 2, 3, 4]),
            exam_subject("e", "Englisch", &[1, 2, 3, 4]),
            exam_subject("mg", "Mathematik Grundlagen", &[1, 2, 3, 4]),
            partitioned(
                exam_subject("nw", "Naturwissenschaften", &[1, 2, 3, 4, 7, 8]),
                vec![part("Physik", 67.0, &[1, 2, 7, 8]), part("Chemie", 33.0, &[3, 4])],
            ),
            exam_subject("d", "Deutsch", &[3, 4, 5, 6, 7, 8]),
            exam_subject("ms", "Mathematik Schwerpunkt", &[5, 6, 7, 8]),
            subject("gp", "Geschichte und Politik", &[5, 6, 7, 8]),
            subject("wr", "Wirtschaft und Recht", &[5, 6, 7, 8]),
            subject("idpa", "IDPA", &[8]),
        ],
    )
}

fn bm1_tals_three_years() -> SchoolConfig {
    school(
        "BM 1 TALS (3 Jahre / L)",
        6,
        vec![
            exam_subject("d", "Deutsch", &[1, 2, 3, 4, 5, 6]),
            exam_subject("f", "Französisch", &[1, 2, 3, 4]),
            exam_subject("e", "Englisch", &[1, 2, 3, 4]),
            exam_subject("mg", "Mathematik Grundlagen", &[1, 2, 3, 4]),
            partitioned(
                exam_subject("nw", "Naturwissenschaften", &[1, 2, 5, 6]),
                vec![part("Physik", 75.0, &[1, 2, 5, 6]), part("Chemie", 25.0, &[5, 6])],
            ),
            subject("gp", "Geschichte und Politik", &[1, 2, 5, 6]),
            exam_subject("ms", "Mathematik Schwerpunkt", &[3, 4, 5, 6]),
            subject("wr", "Wirtschaft und Recht", &[5, 6]),
            subject("idpa", "IDPA", &[6]),
        ],
    )
}

fn bm1_arts() -> SchoolConfig {
    school(
        "BM 1 Gestaltung & Kunst",
        6,
        vec![
            exam_subject("d", "Deutsch", &[1, 2, 3, 4, 5, 6]),
            exam_subject("f", "Französisch", &[1, 2, 3, 4]),
            exam_subject("e", "Englisch", &[1, 2, 3, 4]),
            exam_subject("m", "Mathematik", &[1, 2, 3, 4]),
            exam_subject("gkk", "Gestaltung, Kunst, Kultur", &[1, 2, 3, 4, 5, 6]),
            exam_subject("ik", "Information & Kommunikation", &[3, 4, 5, 6]),
            subject("gp", "Geschichte und Politik", &[3, 4, 5, 6]),
            subject("tu", "Technik und Umwelt", &[3, 4]),
            subject("idpa", "IDPA", &[6]),
        ],
    )
}

fn bm1_services() -> SchoolConfig {
    school(
        "BM 1 Dienstleistungen",
        6,
        vec![
            exam_subject("d", "Deutsch", &[1, 2, 3, 4, 5, 6]),
            exam_subject("f", "Französisch", &[1, 2, 3, 4]),
            exam_subject("e", "Englisch", &[1, 2, 3, 4]),
            exam_subject("m", "Mathematik", &[1, 2, 3, 4]),
            exam_subject("wr", "Wirtschaft & Recht (Schwerpunkt)", &[1, 2, 5, 6]),
            exam_subject("fr", "Finanz- & Rechnungswesen", &[3, 4, 5, 6]),
            subject("wre", "Wirtschaft & Recht (Ergänzung)", &[3, 4]),
            subject("gp", "Geschichte und Politik", &[3, 4]),
            subject("idpa", "IDPA", &[6]),
        ],
    )
}

fn bm1_health_social() -> SchoolConfig {
    school(
        "BM 1 Gesundheit & Soziales",
        6,
        vec![
            exam_subject("d", "Deutsch", &[1, 2, 3, 4, 5, 6]),
            exam_subject("f", "Französisch", &[1, 2, 3, 4]),
            exam_subject("m", "Mathematik", &[1, 2, 3, 4]),
            exam_subject("sw", "Sozialwissenschaften", &[1, 2, 3, 4, 5, 6]),
            partitioned(
                exam_subject("nw", "Naturwissenschaften", &[1, 2, 3, 4]),
                vec![
                    part("Physik", 25.0, &[1, 2]),
                    part("Biologie", 25.0, &[1, 2]),
                    part("Chemie", 50.0, &[3, 4]),
                ],
            ),
            exam_subject("e", "Englisch", &[3, 4, 5, 6]),
            subject("gp", "Geschichte und Politik", &[5, 6]),
            subject("idpa", "IDPA", &[6]),
        ],
    )
}

fn school(name: &str, semester_count: SemesterId, subjects: Vec<Subject>) -> SchoolConfig {
    SchoolConfig {
        id: String::new(),
        name: name.to_string(),
        semesters: (1..=semester_count)
            .map(|id| Semester {
                id,
                name: format!("{id}. Semester"),
            })
            .collect(),
        subjects,
        passing_criteria: PassingCriteria::default(),
        settings: Settings {
            active_semester_id: Some(1),
            ..Settings::default()
        },
        extra: ExtraFields::new(),
    }
}

fn subject(id: &str, name: &str, semesters: &[SemesterId]) -> Subject {
    Subject {
        id: id.to_string(),
        name: name.to_string(),
        weight: 1.0,
        rounding: "0.5".to_string(),
        has_final_exam: false,
        final_exam_weight: None,
        final_exam_rounding: None,
        semesters: semesters.to_vec(),
        grades: Vec::new(),
        upcoming: Vec::new(),
        sub_categories: Vec::new(),
        final_exam_grades: BTreeMap::new(),
        extra: ExtraFields::new(),
    }
}

fn exam_subject(id: &str, name: &str, semesters: &[SemesterId]) -> Subject {
    Subject {
        has_final_exam: true,
        final_exam_weight: Some(50.0),
        ..subject(id, name, semesters)
    }
}

fn partitioned(subject: Subject, sub_categories: Vec<SubCategory>) -> Subject {
    Subject {
        sub_categories,
        ..subject
    }
}

fn part(name: &str, weight: f64, semesters: &[SemesterId]) -> SubCategory {
    SubCategory {
        id: None,
        name: name.to_string(),
        weight,
        rounding: "0.5".to_string(),
        semesters: semesters.to_vec(),
        grades: Vec::new(),
        upcoming: Vec::new(),
        has_final_exam: None,
        final_exam_weight: None,
        final_exam_rounding: None,
        final_exam_grades: BTreeMap::new(),
        extra: ExtraFields::new(),
    }
}
