use config::ConfigError;
use thiserror::Error;

use mymodule_common::StdError;

/// Result type of the dependencies initialization
pub type Result<T> = std::result::Result<T, DependenciesBuilderError>;

/// Error that can occur during dependencies initialization process.
#[derive(Debug, Error)]
pub enum DependenciesBuilderError {
    /// Unrecoverable system initialization failure
    #[error("Dependencies initialization error: «{message}»")]
    Initialization {
        /// Error context message
        message: String,

        /// Eventual nested error
        #[source]
        error: Option<StdError>,
    },

    /// Configuration parameter missing for initialization.
    #[error("Missing configuration for dependencies initialization: «{0}»")]
    MissingConfiguration(String),
}

impl From<StdError> for DependenciesBuilderError {
    fn from(value: StdError) -> Self {
        DependenciesBuilderError::Initialization {
            message: "subsystem error".to_string(),
            error: Some(value),
        }
    }
}

impl From<ConfigError> for DependenciesBuilderError {
    fn from(value: ConfigError) -> Self {
        Self::MissingConfiguration(format!("{value}"))
    }
}
