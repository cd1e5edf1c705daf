use diesel::result::Error as DieselError;
use thiserror::Error;

use crate::goals::GoalError;
use crate::templates::TemplateError;

/// Custom error type for check-in operations
#[derive(Debug, Error)]
pub enum CheckInError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// Malformed submission batch; nothing was written.
    #[error("Invalid data: {0}")]
    InvalidData(String),
    /// The goal is not currently accepting a check-in.
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<DieselError> for CheckInError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => CheckInError::NotFound("Record not found".to_string()),
            _ => CheckInError::DatabaseError(err.to_string()),
        }
    }
}

impl From<GoalError> for CheckInError {
    fn from(err: GoalError) -> Self {
        match err {
            GoalError::NotFound(msg) => CheckInError::NotFound(msg),
            GoalError::Forbidden(msg) => CheckInError::Forbidden(msg),
            GoalError::InvalidData(msg) => CheckInError::InvalidData(msg),
            GoalError::Conflict(msg) => CheckInError::Conflict(msg),
            GoalError::DatabaseError(msg) => CheckInError::DatabaseError(msg),
        }
    }
}

impl From<TemplateError> for CheckInError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::NotFound(msg) => CheckInError::NotFound(msg),
            TemplateError::Forbidden(msg) => CheckInError::Forbidden(msg),
            TemplateError::InvalidData(msg) => CheckInError::InvalidData(msg),
            TemplateError::DatabaseError(msg) => CheckInError::DatabaseError(msg),
        }
    }
}

/// Result type for check-in operations
pub type Result<T> = std::result::Result<T, CheckInError>;
