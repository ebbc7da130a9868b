//! Error types for Morph

use thiserror::Error;

/// The main error type for Morph operations
#[derive(Debug, Error)]
pub enum MorphError {
    #[error("Sample set is empty: a particle field needs at least one anchor point")]
    EmptySampleSet,

    #[error("Non-finite sample point at index {0}")]
    NonFiniteSample(usize),

    #[error("Parse error on line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Invalid color '{0}': expected #rrggbb")]
    InvalidColor(String),

    #[error("Unknown view '{0}': expected one of front, side, top, bottom")]
    UnknownView(String),

    #[error("Unknown mode '{0}': expected animated or viewer")]
    UnknownMode(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Morph operations
pub type Result<T> = std::result::Result<T, MorphError>;

impl From<toml::de::Error> for MorphError {
    fn from(err: toml::de::Error) -> Self {
        MorphError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for MorphError {
    fn from(err: toml::ser::Error) -> Self {
        MorphError::TomlSerError(err.to_string())
    }
}
