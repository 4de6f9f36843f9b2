//! Error types for modifiers-config
//!
//! Extraction itself never fails; these cover loading mapping overrides.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid field mapping YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Field mapping for '{type_id}.{bundle}' has no candidate fields")]
    EmptyCandidates { type_id: String, bundle: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
