use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use crate::models::SchoolConfig;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Parses a configuration snapshot and fills in a missing identifier.
pub fn parse_config(json: &str) -> Result<SchoolConfig, serde_json::Error> {
    let mut config: SchoolConfig = serde_json::from_str(json)?;
    if config.id.trim().is_empty() {
        config.id = Uuid::new_v4().to_string();
        tracing::info!(id = %config.id, "assigned identifier to configuration");
    }
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<SchoolConfig, StoreError> {
    let text = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&text).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        subjects = config.subjects.len(),
        semesters = config.semesters.len(),
        "loaded configuration"
    );
    Ok(config)
}

pub fn save_config(path: &Path, config: &SchoolConfig) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "saved configuration");
    Ok(())
}
