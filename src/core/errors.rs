use std::result::Result as StdResult;

use thiserror::Error;

use crate::config::ConfigError;
use crate::errors::StoreError;
use crate::metadata::MetadataError;

/// Unified error type for core/storage/metadata layers.
#[derive(Error, Debug)]
pub enum MovieError {
    #[error("Persistence error: {0}")]
    Storage(#[from] StoreError),
    #[error("Lookup failed: {0}")]
    Metadata(#[from] MetadataError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Site generation failed: {0}")]
    Site(String),
}

pub type Result<T> = StdResult<T, MovieError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] MovieError),
    #[error("Command failed: {0}")]
    Command(String),
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for MovieError {
    fn from(err: ConfigError) -> Self {
        MovieError::Config(err.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        CliError::Core(MovieError::from(err))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Core(MovieError::from(err))
    }
}
