//! Products By Category Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::filter::ProductFilter;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse, requests::parse_category},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryProductsResponse {
    /// Newest products first
    pub products: Vec<ProductResponse>,

    /// The category listed
    pub category: String,
}

/// Products By Category Handler
#[endpoint(
    tags("products"),
    summary = "Products By Category",
    responses(
        (status_code = StatusCode::OK, description = "Products in the category"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown category or invalid limit"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<String>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<CategoryProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let category = parse_category(&category.into_inner())?;

    let filter =
        ProductFilter::by_category(category, limit.into_inner()).map_err(into_status_error)?;

    let page = state
        .app
        .products
        .list_products(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CategoryProductsResponse {
        products: page.products.into_iter().map(Into::into).collect(),
        category: category.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        products::{
            MockProductsService,
            filter::{Pagination, ProductPage},
            records::Category,
        },
        users::records::Role,
    };

    use crate::test_helpers::products_service;

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(
            products,
            Role::Customer,
            Router::with_path("products/category/{category}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_category_lists_products() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|filter| filter.category == Some(Category::Fragrance))
            .return_once(|filter| {
                Ok(ProductPage {
                    products: Vec::new(),
                    pagination: Pagination::new(&filter, 0, 0),
                })
            });

        let response: CategoryProductsResponse =
            TestClient::get("http://example.com/products/category/Fragrance")
                .send(&make_service(products))
                .await
                .take_json()
                .await?;

        assert_eq!(response.category, "fragrance");
        assert!(response.products.is_empty(), "expected no products");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_category_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_list_products().never();

        let res = TestClient::get("http://example.com/products/category/garden")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
