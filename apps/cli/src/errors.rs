use std::path::PathBuf;

use thiserror::Error;

/// Application-level error type.
/// Everything here is fatal: generation aborts before any output file exists.
#[derive(Debug, Error)]
pub enum CvError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot determine format of '{0}' (expected .json, .yaml or .yml)")]
    UnknownFormat(PathBuf),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CV data failed validation: {0}")]
    Validation(String),

    #[error(transparent)]
    Style(#[from] StyleError),

    #[error("unknown section '{0}'")]
    UnknownSection(String),

    #[error("failed to write document: {0}")]
    Docx(String),
}

/// Errors produced while merging a user style override into the defaults.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    #[error("style override must be a mapping")]
    NotAMapping,

    #[error("unknown style key '{0}'")]
    UnknownKey(String),

    #[error("style field '{0}' must be a number")]
    ExpectedNumber(String),

    #[error("style field '{0}' must be a string")]
    ExpectedString(String),

    #[error("style field '{field}' value {value} is outside the allowed range {min}..={max}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
}
