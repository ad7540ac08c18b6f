//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{
        errors::into_status_error,
        models::CartChangedResponse,
        requests::{parse_product_id, parse_quantity, required},
    },
    extensions::*,
    observability::record_cart_mutation,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateCartItemRequest {
    /// Product UUID
    pub product_id: Option<String>,

    /// New quantity, 0 to 10; 0 removes the line
    pub quantity: Option<i64>,
}

/// Update Cart Item Handler
///
/// Sets the quantity of a line already in the cart.
#[endpoint(
    tags("cart"),
    summary = "Update Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid request or insufficient stock"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "Item or product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.update",
    skip(json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartChangedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let request = json.into_inner();

    let (Some(product_id), Some(quantity)) = (required(request.product_id), request.quantity)
    else {
        return Err(StatusError::bad_request().brief("Product ID and quantity are required"));
    };

    let product = parse_product_id(&product_id)?;
    let quantity = parse_quantity(quantity, 0)?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(principal.user_uuid));
    span.record("product_uuid", tracing::field::display(product));
    span.record("quantity", quantity);

    let result = state
        .app
        .carts
        .update_item(principal.user_uuid, product, quantity)
        .await;

    record_cart_mutation("update", result.is_ok());

    let cart = result.map_err(into_status_error)?;

    Ok(Json(CartChangedResponse::new("Cart updated successfully", cart)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{CartsServiceError, MockCartsService, models::CartView},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{TEST_USER_UUID, carts_service};

    use super::{super::tests::make_view, *};

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/update").put(handler))
    }

    #[tokio::test]
    async fn test_update_item_success() -> TestResult {
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .withf(move |user, p, quantity| {
                *user == TEST_USER_UUID && *p == product && *quantity == 4
            })
            .return_once(move |_, _, _| Ok(make_view(product, 4)));

        let mut res = TestClient::put("http://example.com/cart/update")
            .json(&json!({ "productId": product.to_string(), "quantity": 4 }))
            .send(&make_service(carts))
            .await;

        let body: CartChangedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "Cart updated successfully");
        assert_eq!(body.cart.total_items, 4);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_item_zero_is_forwarded() -> TestResult {
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .withf(|_, _, quantity| *quantity == 0)
            .return_once(|_, _, _| Ok(CartView::empty()));

        let body: CartChangedResponse = TestClient::put("http://example.com/cart/update")
            .json(&json!({ "productId": product.to_string(), "quantity": 0 }))
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert!(body.cart.items.is_empty(), "line should be gone");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_item_requires_both_fields() -> TestResult {
        let product = ProductUuid::new().to_string();

        for body in [json!({ "productId": product }), json!({ "quantity": 2 })] {
            let mut carts = MockCartsService::new();

            carts.expect_update_item().never();

            let mut res = TestClient::put("http://example.com/cart/update")
                .json(&body)
                .send(&make_service(carts))
                .await;

            assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

            let text = res.take_string().await?;

            assert!(
                text.contains("Product ID and quantity are required"),
                "unexpected body {text}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_update_item_out_of_range_quantity_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_update_item().never();

        let mut res = TestClient::put("http://example.com/cart/update")
            .json(&json!({ "productId": ProductUuid::new().to_string(), "quantity": 11 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let text = res.take_string().await?;

        assert!(
            text.contains("Quantity must be between 0 and 10"),
            "unexpected body {text}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_update_item_missing_line_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::ItemNotFound));

        let mut res = TestClient::put("http://example.com/cart/update")
            .json(&json!({ "productId": ProductUuid::new().to_string(), "quantity": 2 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        let text = res.take_string().await?;

        assert!(text.contains("Item not found in cart"), "unexpected body {text}");

        Ok(())
    }
}
