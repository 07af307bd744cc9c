use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse scenario JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to write allocation table: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Incident #{index} is malformed: {reason}")]
    MalformedIncident { index: usize, reason: String },

    #[error("Unknown resource kind: '{0}'")]
    UnknownResourceKind(String),

    #[error("Unknown allocation order: '{0}'")]
    UnknownAllocationOrder(String),

    #[error("Invalid scenario configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, Error>;
