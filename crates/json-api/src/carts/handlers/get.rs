//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_status_error, models::CartEnvelope},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the caller's cart with product details. A caller without a cart
/// gets an empty one.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(principal.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartEnvelope { cart: cart.into() }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{CartsServiceError, MockCartsService, models::CartView},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{TEST_USER_UUID, carts_service};

    use super::{super::tests::make_view, *};

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart").get(handler))
    }

    #[tokio::test]
    async fn test_get_cart_returns_lines_and_totals() -> TestResult {
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |_| Ok(make_view(product, 2)));

        let mut res = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await;

        let body: CartEnvelope = res.take_json().await?;
        let line = body.cart.items.first().ok_or("expected one line")?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.cart.total_items, 2);
        assert_eq!(body.cart.total_amount, 2_400);
        assert_eq!(line.product.uuid, product.into_uuid());
        assert_eq!(line.quantity, 2);
        assert_eq!(line.price, 1_200);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_cart_uses_camel_case_keys() -> TestResult {
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .return_once(move |_| Ok(make_view(product, 1)));

        let body = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await
            .take_string()
            .await?;

        for key in ["\"totalAmount\"", "\"totalItems\"", "\"mainImage\"", "\"isActive\""] {
            assert!(body.contains(key), "expected {key} in {body}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_get_cart_without_cart_returns_empty() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .return_once(|_| Ok(CartView::empty()));

        let body: CartEnvelope = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert!(body.cart.items.is_empty(), "expected no lines");
        assert_eq!(body.cart.total_items, 0);
        assert_eq!(body.cart.total_amount, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_cart_storage_error_returns_500() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::InvalidData));

        let res = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
