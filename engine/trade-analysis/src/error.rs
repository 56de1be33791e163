//! Error types for trade analysis

use thiserror::Error;

/// Errors raised while setting up analysis
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Errors from an external trade message writer
#[derive(Error, Debug)]
pub enum MessageError {
    #[error("Message writer unavailable: {0}")]
    Unavailable(String),

    #[error("Message generation failed: {0}")]
    Generation(String),
}
