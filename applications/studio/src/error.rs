//! Harness errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StudioAppError>;

#[derive(Error, Debug)]
pub enum StudioAppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for StudioAppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
