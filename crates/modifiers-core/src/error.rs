//! Error types for modifiers-core

use modifiers_config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModifierError {
    #[error("Invalid modifiers options: {0}")]
    Options(#[from] serde_yaml::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to serialize attachment: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModifierError>;
