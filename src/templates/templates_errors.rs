use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for template-related operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<DieselError> for TemplateError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => TemplateError::NotFound("Template not found".to_string()),
            _ => TemplateError::DatabaseError(err.to_string()),
        }
    }
}

/// Result type for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;
