//! Shopping Item Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::shopping_items::ShoppingItemsServiceError;

pub(crate) fn into_status_error(error: ShoppingItemsServiceError) -> StatusError {
    match error {
        ShoppingItemsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Shopping item already exists")
        }
        ShoppingItemsServiceError::InvalidInput(message) => {
            StatusError::bad_request().brief(message)
        }
        ShoppingItemsServiceError::InvalidReference | ShoppingItemsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid shopping item payload")
        }
        ShoppingItemsServiceError::NotFound => {
            StatusError::not_found().brief("Shopping item not found")
        }
        ShoppingItemsServiceError::Sql(source) => {
            error!("shopping item storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let status = into_status_error(ShoppingItemsServiceError::NotFound);

        assert_eq!(status.code, StatusCode::NOT_FOUND);
        assert_eq!(status.brief, "Shopping item not found");
    }

    #[test]
    fn storage_errors_are_not_leaked() {
        let status = into_status_error(ShoppingItemsServiceError::Sql(sqlx::Error::PoolClosed));

        assert_eq!(status.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!status.brief.contains("pool"), "unexpected brief {}", status.brief);
    }
}
