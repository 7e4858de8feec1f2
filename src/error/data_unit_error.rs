use thiserror::Error;

use super::ComponentError;

/// Failures of data unit operations performed by component logic.
#[derive(Debug, Error)]
pub enum DataUnitError {
    #[error("Path escapes the data unit directory: {0}")]
    PathEscape(String),
    #[error("File already exists: {0}")]
    AlreadyExists(String),
    #[error("Data unit I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DataUnitError> for ComponentError {
    fn from(err: DataUnitError) -> Self {
        ComponentError::Execution {
            component: None,
            message: "data unit operation failed".to_string(),
            cause: Some(Box::new(err)),
        }
    }
}
