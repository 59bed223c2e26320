use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Source database unavailable at '{path}': {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to write output to '{path}': {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ExportError>;

impl ExportError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            ExportError::SourceUnavailable { path, .. } => {
                format!("Could not read the gyms database at '{}'", path)
            }
            ExportError::WriteFailed { path, .. } => {
                format!("Could not write the export document to '{}'", path)
            }
            ExportError::Io(e) => format!("IO operation failed: {}", e),
            ExportError::Serialization(e) => format!("Could not serialize the document: {}", e),
            ExportError::InvalidConfigValue { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ExportError::SourceUnavailable { .. } => {
                "Check that the database file exists, is readable, and contains a 'gyms' table"
            }
            ExportError::WriteFailed { .. } => {
                "Check that the output directory is writable and has free space"
            }
            ExportError::Io(_) => "Check file permissions and available disk space",
            ExportError::Serialization(_) => "Inspect the source rows for unexpected values",
            ExportError::InvalidConfigValue { .. } => {
                "Run with --help and correct the offending argument"
            }
        }
    }
}
