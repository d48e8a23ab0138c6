use thiserror::Error;

/// Validation failures surfaced to the user at the point of the action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("please fill all fields")]
    MissingFields,
    #[error("please enter your subject/course")]
    MissingSubject,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("account already exists for this role and ID")]
    DuplicateAccount,
    #[error("invalid credentials; use a registered account and matching role")]
    InvalidCredentials,
    #[error("title and due date are required")]
    MissingTitleOrDueDate,
    #[error("please enter a valid grade between 0 and 100")]
    InvalidGrade,
    #[error("please choose a file before uploading")]
    MissingFile,
    #[error("assignment not found")]
    UnknownAssignment,
    #[error("no ids left to allocate")]
    IdsExhausted,
}

impl TrackerError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateAccount => "duplicate_account",
            Self::InvalidCredentials => "invalid_credentials",
            Self::UnknownAssignment => "not_found",
            _ => "validation",
        }
    }
}
