//! Error types for record construction and export.

use thiserror::Error;

/// Errors raised while coercing, loading, or writing records.
///
/// Nothing in this crate recovers from these; every failure aborts the
/// current record and surfaces to the caller driving the build.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Cannot convert {found} to {expected} for field '{field}'")]
    TypeConversion {
        field: String,
        expected: &'static str,
        found: String,
    },

    #[error("Invalid date '{value}' for field '{field}' (expected e.g. \"13 October 2019\")")]
    Format { field: String, value: String },

    #[error("Unknown field '{field}' on {record}")]
    UnknownField { record: &'static str, field: String },

    #[error("Field '{field}' on {record} is a nested record")]
    NestedField { record: &'static str, field: String },

    #[error("Field '{field}' on {record} is not a nested record")]
    NotNested { record: &'static str, field: String },

    #[error("Missing key '{field}' while loading {record}")]
    MissingKey { record: &'static str, field: String },

    #[error("Expected a dictionary for {record}")]
    NotAnObject { record: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rendered output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse config: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for record operations
pub type RecordResult<T> = Result<T, RecordError>;
