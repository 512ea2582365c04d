use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TelemetryError {
    #[error("invalid epoch {epoch:?}: {reason}")]
    Format { epoch: String, reason: String },
    #[error("invalid {field} value {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("no state vectors to search")]
    EmptyInput,
    #[error("geodetic conversion failed: {0}")]
    Conversion(String),
}

impl TelemetryError {
    pub(crate) fn format(epoch: &str, reason: impl Into<String>) -> Self {
        TelemetryError::Format {
            epoch: epoch.to_string(),
            reason: reason.into(),
        }
    }
}
