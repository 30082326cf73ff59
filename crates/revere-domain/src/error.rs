use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("'{0}' is not a recognized status")]
    BadStatus(String),
}

impl From<crate::status::StatusParseError> for DomainError {
    fn from(e: crate::status::StatusParseError) -> Self {
        DomainError::BadStatus(e.0)
    }
}
