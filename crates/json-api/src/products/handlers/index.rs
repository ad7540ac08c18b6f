//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::filter::{Pagination, ProductFilter};

use crate::{
    extensions::*,
    products::{
        errors::into_status_error, get::ProductResponse, requests::ProductListQuery,
    },
    state::State,
};

/// Pagination Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaginationResponse {
    /// Current page, starting at 1
    pub current: u32,

    /// Total number of pages
    pub pages: u64,

    /// Total number of matching products
    pub total: u64,

    pub has_next: bool,
    pub has_prev: bool,
}

impl From<Pagination> for PaginationResponse {
    fn from(pagination: Pagination) -> Self {
        Self {
            current: pagination.current,
            pages: pagination.pages,
            total: pagination.total,
            has_next: pagination.has_next,
            has_prev: pagination.has_prev,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,

    pub pagination: PaginationResponse,
}

/// Product Index Handler
///
/// Returns a page of active products. Accepts `page`, `limit`, `category`,
/// `subcategory`, `brand`, `minPrice`, `maxPrice`, `search`, `sortBy`,
/// `sortOrder`, `featured` and `onSale` query parameters.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid query"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = req
        .parse_queries::<ProductListQuery>()
        .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

    let filter = ProductFilter::from_query(query.into()).map_err(into_status_error)?;

    let page = state
        .app
        .products
        .list_products(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: page.products.into_iter().map(Into::into).collect(),
        pagination: page.pagination.into(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        products::{
            MockProductsService, ProductsServiceError,
            filter::{ProductPage, SortField, SortOrder},
            records::{Category, ProductUuid},
        },
        users::records::Role,
    };

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(
            products,
            Role::Customer,
            Router::with_path("products").get(handler),
        )
    }

    fn page_of(filter: &ProductFilter, uuids: &[ProductUuid], total: u64) -> ProductPage {
        ProductPage {
            products: uuids.iter().copied().map(make_product).collect(),
            pagination: Pagination::new(filter, uuids.len(), total),
        }
    }

    #[tokio::test]
    async fn test_index_returns_products_and_pagination() -> TestResult {
        let uuid_a = ProductUuid::new();
        let uuid_b = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|filter| *filter == ProductFilter::default())
            .return_once(move |filter| Ok(page_of(&filter, &[uuid_a, uuid_b], 30)));

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        let uuids: Vec<_> = response.products.iter().map(|product| product.uuid).collect();

        assert_eq!(uuids, vec![uuid_a.into_uuid(), uuid_b.into_uuid()]);
        assert_eq!(response.pagination.current, 1);
        assert_eq!(response.pagination.pages, 3);
        assert_eq!(response.pagination.total, 30);
        assert!(response.pagination.has_next, "more pages remain");
        assert!(!response.pagination.has_prev, "first page has no previous");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_query_parameters() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|filter| {
                filter.page == 2
                    && filter.limit == 5
                    && filter.category == Some(Category::Makeup)
                    && filter.sort_field == SortField::Price
                    && filter.sort_order == SortOrder::Asc
                    && filter.on_sale_only
            })
            .return_once(|filter| Ok(page_of(&filter, &[], 0)));

        let res = TestClient::get(
            "http://example.com/products?page=2&limit=5&category=makeup&sortBy=price&sortOrder=asc&onSale=true",
        )
        .send(&make_service(products))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_invalid_filter_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_list_products().never();

        let mut res = TestClient::get("http://example.com/products?limit=500")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body = res.take_string().await?;

        assert!(
            body.contains("Limit must be between 1 and 100"),
            "unexpected body {body}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|_| Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
