//! Errors that can be thrown when processing configuration.

use std::path::PathBuf;

use query_engine_metadata::metadata::CatalogError;

/// The errors that can be thrown when reading the configuration directory.
#[derive(Debug, thiserror::Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {file_path}:{line}:{column}: {message}")]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("{file_path}: unsupported configuration version {version}, expected {expected}")]
    UnsupportedVersion {
        file_path: PathBuf,
        version: u32,
        expected: u32,
    },

    #[error("I/O error: {0}")]
    IoErrorButStringified(String),
}

/// The errors that can be thrown when writing a configuration directory.
#[derive(Debug, thiserror::Error)]
pub enum WriteParsedConfigurationError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The errors that can be thrown when turning a parsed configuration into a
/// runtime one.
#[derive(Debug, thiserror::Error)]
pub enum MakeRuntimeConfigurationError {
    #[error("invalid configuration in {file_path}: {message}")]
    MissingEnvironmentVariable { file_path: PathBuf, message: String },
    #[error("invalid configuration in {file_path}: {message}")]
    UnsupportedConnectionUri { file_path: PathBuf, message: String },
    #[error("invalid query catalog: {0}")]
    InvalidCatalog(#[from] CatalogError),
}
