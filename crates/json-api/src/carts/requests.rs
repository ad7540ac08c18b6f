//! Cart request parsing.
//!
//! Bodies are deserialised with every field optional and validated here.

use salvo::http::StatusError;

use storefront_app::domain::carts::{CartsServiceError, records::MAX_LINE_QUANTITY};

pub(crate) use crate::products::requests::parse_product_id;

/// A present, non-blank product id.
pub(crate) fn required(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Accept `min..=MAX_LINE_QUANTITY`.
pub(crate) fn parse_quantity(value: i64, min: u32) -> Result<u32, StatusError> {
    u32::try_from(value)
        .ok()
        .filter(|quantity| (min..=MAX_LINE_QUANTITY).contains(quantity))
        .ok_or_else(|| {
            StatusError::bad_request().brief(
                CartsServiceError::InvalidQuantity {
                    min,
                    max: MAX_LINE_QUANTITY,
                }
                .to_string(),
            )
        })
}
