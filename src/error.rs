//! Client Errors

/// Failures surfaced by task operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TaskError {
    /// Required input missing; raised before any request is sent
    #[error("{0}")]
    Validation(String),

    /// Store answered with a non-success status
    #[error("Remote responded with status {0}")]
    Status(u16),

    /// Request never completed
    #[error("Request failed: {0}")]
    Transport(String),

    /// Response body was not what we expected
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Store did not acknowledge the operation
    #[error("Rejected: {0}")]
    Rejected(String),
}

impl TaskError {
    pub fn is_remote(&self) -> bool {
        !matches!(self, TaskError::Validation(_))
    }
}

pub type TaskResult<T> = Result<T, TaskError>;

impl From<reqwest::Error> for TaskError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            TaskError::Status(status.as_u16())
        } else if err.is_decode() {
            TaskError::Decode(err.to_string())
        } else {
            TaskError::Transport(err.to_string())
        }
    }
}
