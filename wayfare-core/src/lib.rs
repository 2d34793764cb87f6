pub mod identity;
pub mod validation;
pub mod notification;

pub use identity::Identity;
pub use validation::{FieldError, ValidationErrors};
pub use notification::{LogNotifier, Notifier};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(ValidationErrors),
    #[error("{entity} not found: {id}")]
    NotFound {
        entity: &'static str,
        id: String,
    },
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition {
        from: String,
        to: String,
    },
    #[error("Internal service error: {0}")]
    InternalError(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::ValidationError(errors)
    }
}

/// Failure of a storage backend. Never carries domain outcomes.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists: {0}")]
    Conflict(String),
    #[error("corrupt record: {0}")]
    Corrupt(String),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

impl From<RepositoryError> for CoreError {
    fn from(err: RepositoryError) -> Self {
        CoreError::InternalError(err.to_string())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
