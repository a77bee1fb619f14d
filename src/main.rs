use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use grade_standing::models::{SchoolConfig, SemesterId};
use grade_standing::{import, report, stats, store, templates};

#[derive(Parser)]
#[command(name = "grade-standing", version)]
#[command(about = "Semester averages and passing status from a grade tracker snapshot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in configuration templates
    Templates,
    /// Write a new configuration from a template
    Init {
        #[arg(long)]
        template: String,
        #[arg(long)]
        out: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Append grades from a CSV file to a configuration
    Import {
        #[arg(long, env = "GRADE_CONFIG")]
        config: PathBuf,
        #[arg(long)]
        csv: PathBuf,
    },
    /// Show the standing of one semester
    Semester {
        #[arg(long, env = "GRADE_CONFIG")]
        config: PathBuf,
        /// Defaults to the configured active semester
        #[arg(long)]
        semester: Option<SemesterId>,
        #[arg(long)]
        json: bool,
    },
    /// Show the standing across all semesters
    Overall {
        #[arg(long, env = "GRADE_CONFIG")]
        config: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report
    Report {
        #[arg(long, env = "GRADE_CONFIG")]
        config: PathBuf,
        #[arg(long)]
        semester: Option<SemesterId>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("grade_standing=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Templates => {
            println!("Available templates:");
            for info in templates::TEMPLATES {
                println!("- {} ({})", info.id, info.name);
            }
        }
        Commands::Init {
            template,
            out,
            force,
        } => {
            if out.exists() && !force {
                bail!("{} already exists, pass --force to overwrite", out.display());
            }
            let config = templates::instantiate(&template)
                .with_context(|| format!("unknown template '{template}'"))?;
            store::save_config(&out, &config)?;
            println!("Configuration '{}' written to {}.", config.name, out.display());
        }
        Commands::Import { config, csv } => {
            let mut school = load(&config)?;
            let inserted = import::import_csv(&mut school, &csv)
                .with_context(|| format!("failed to import {}", csv.display()))?;
            store::save_config(&config, &school)?;
            println!("Inserted {inserted} grades from {}.", csv.display());
        }
        Commands::Semester {
            config,
            semester,
            json,
        } => {
            let school = load(&config)?;
            let semester = resolve_semester(&school, semester)?;
            let stats = stats::semester_stats(&school, semester);

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }

            let average = stats
                .average()
                .map_or_else(|| "-".to_string(), |value| format!("{value:.1}"));
            println!(
                "{} ({}): average {}, {} insufficient, {}",
                school.name,
                school.semester_name(semester),
                average,
                stats.insufficient_count,
                if stats.passed { "passed" } else { "failed" }
            );
            for subject in &stats.subjects {
                println!("- {}: {}", subject.name, subject.display_average());
            }
            for reason in &stats.failure_reasons {
                println!("! {}", reason.describe(&school.passing_criteria));
            }
        }
        Commands::Overall { config, json } => {
            let school = load(&config)?;
            let overall = stats::overall_stats(&school);

            if json {
                println!("{}", serde_json::to_string_pretty(&overall)?);
                return Ok(());
            }

            let average = overall
                .average()
                .map_or_else(|| "-".to_string(), |value| format!("{value:.1}"));
            println!(
                "{}: overall average {}, {}",
                school.name,
                average,
                if overall.passed { "passed" } else { "failed" }
            );
        }
        Commands::Report {
            config,
            semester,
            out,
        } => {
            let school = load(&config)?;
            let semester = resolve_semester(&school, semester)?;
            let report = report::build_report(&school, semester);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn load(path: &Path) -> anyhow::Result<SchoolConfig> {
    store::load_config(path).context("failed to load grade configuration")
}

fn resolve_semester(
    config: &SchoolConfig,
    requested: Option<SemesterId>,
) -> anyhow::Result<SemesterId> {
    let semester = requested.unwrap_or_else(|| config.active_semester());
    if config.semester(semester).is_none() {
        bail!("semester {semester} is not configured in '{}'", config.name);
    }
    Ok(semester)
}
