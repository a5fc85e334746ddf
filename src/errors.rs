use thiserror::Error;

/// Error type shared by the rotation engine, services, and storage backends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassBookError {
    #[error("{0} already exists")]
    Duplicate(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Persistence error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, ClassBookError>;

impl From<std::io::Error> for ClassBookError {
    fn from(err: std::io::Error) -> Self {
        ClassBookError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ClassBookError {
    fn from(err: serde_json::Error) -> Self {
        ClassBookError::Storage(err.to_string())
    }
}

impl ClassBookError {
    pub(crate) fn class_not_found(class: &str) -> Self {
        ClassBookError::NotFound(format!("Class `{}`", class))
    }

    pub(crate) fn student_not_found(class: &str, student: &str) -> Self {
        ClassBookError::NotFound(format!("Student `{}` in class `{}`", student, class))
    }
}
