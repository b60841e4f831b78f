use super::config::ConfigError;
use crate::core::enzymes::registry::{RegistryLoadError, UnknownEnzymeError};
use crate::core::models::placement::ParsePlacementError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    UnknownEnzyme(#[from] UnknownEnzymeError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("Invalid placement: {source}")]
    InvalidPlacement {
        #[from]
        source: ParsePlacementError,
    },

    #[error("Enzyme '{enzyme}' defines a spacing rule but has no recognition site")]
    MissingRecognitionSite { enzyme: String },

    #[error("Enumeration space of {size} candidates exceeds the limit of {limit}")]
    EnumerationLimit { size: u128, limit: u128 },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Enzyme registry error: {0}")]
    Registry(#[from] RegistryLoadError),
}
