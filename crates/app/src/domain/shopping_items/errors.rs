//! Shopping items service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShoppingItemsServiceError {
    #[error("shopping item already exists")]
    AlreadyExists,

    #[error("shopping item not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    /// Caller supplied input that failed validation; the message is safe to
    /// return to the client.
    #[error("{0}")]
    InvalidInput(String),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl ShoppingItemsServiceError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

impl From<Error> for ShoppingItemsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let error = ShoppingItemsServiceError::from(Error::RowNotFound);

        assert!(
            matches!(error, ShoppingItemsServiceError::NotFound),
            "expected NotFound, got {error:?}"
        );
    }

    #[test]
    fn pool_errors_map_to_sql() {
        let error = ShoppingItemsServiceError::from(Error::PoolClosed);

        assert!(
            matches!(error, ShoppingItemsServiceError::Sql(_)),
            "expected Sql, got {error:?}"
        );
    }
}
