use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{}: missing required column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("{}: metric column '{column}' appears in both sources", path.display())]
    DuplicateColumn { path: PathBuf, column: String },

    #[error("{}, line {line}: {message}", path.display())]
    InvalidFormat {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("Unknown continent '{name}' (expected one of: {known})")]
    UnknownContinent { name: String, known: String },
}
