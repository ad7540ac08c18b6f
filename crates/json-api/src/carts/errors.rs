//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        error @ (CartsServiceError::InvalidQuantity { .. }
        | CartsServiceError::InsufficientStock(_)
        | CartsServiceError::LineLimitExceeded { .. }) => {
            StatusError::bad_request().brief(error.to_string())
        }
        error @ (CartsServiceError::ProductNotFound | CartsServiceError::ItemNotFound) => {
            StatusError::not_found().brief(error.to_string())
        }
        CartsServiceError::InvalidReference | CartsServiceError::InvalidData => {
            error!("cart write rejected by storage: {error}");

            StatusError::internal_server_error()
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
