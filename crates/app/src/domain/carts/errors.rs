//! Carts service errors.

use std::fmt;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("Quantity must be between {min} and {max}")]
    InvalidQuantity { min: u32, max: u32 },

    #[error("Product not found or unavailable")]
    ProductNotFound,

    #[error("Item not found in cart")]
    ItemNotFound,

    #[error("{0}")]
    InsufficientStock(StockShortfall),

    /// Merging into an existing line would push it past the per-line cap.
    #[error("Cannot add {requested} more items. Only {remaining} more allowed per product.")]
    LineLimitExceeded { requested: u32, remaining: u32 },

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

/// How a requested quantity exceeds what is in stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockShortfall {
    /// The requested quantity alone exceeds stock.
    Exceeds { available: u32 },

    /// The quantity already in the cart plus the requested quantity exceeds
    /// stock.
    ExceedsRemaining { requested: u32, remaining: u32 },
}

impl fmt::Display for StockShortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exceeds { available } => {
                write!(f, "Only {available} items available in stock")
            }
            Self::ExceedsRemaining {
                requested,
                remaining,
            } => write!(
                f,
                "Cannot add {requested} more items. Only {remaining} more available."
            ),
        }
    }
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
