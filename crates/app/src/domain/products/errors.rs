//! Products service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product already exists")]
    AlreadyExists,

    #[error("product not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    /// Caller supplied input that failed validation; the message is safe to
    /// return to the client.
    #[error("{0}")]
    InvalidInput(String),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl ProductsServiceError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

impl From<Error> for ProductsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let error = ProductsServiceError::from(Error::RowNotFound);

        assert!(
            matches!(error, ProductsServiceError::NotFound),
            "expected NotFound, got {error:?}"
        );
    }

    #[test]
    fn other_errors_map_to_sql() {
        let error = ProductsServiceError::from(Error::PoolTimedOut);

        assert!(
            matches!(error, ProductsServiceError::Sql(_)),
            "expected Sql, got {error:?}"
        );
    }

    #[test]
    fn invalid_input_displays_its_message() {
        let error = ProductsServiceError::invalid_input("Search query must be at least 2 characters long");

        assert_eq!(
            error.to_string(),
            "Search query must be at least 2 characters long"
        );
    }
}
