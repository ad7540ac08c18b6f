//! Shopping Item Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::domain::shopping_items::filter::ShoppingItemFilter;

use crate::{
    extensions::*,
    shopping::{
        errors::into_status_error, get::ShoppingItemResponse, requests::ShoppingItemListQuery,
    },
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShoppingPaginationResponse {
    pub page: u32,
    pub limit: u32,
    pub pages: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShoppingItemsResponse {
    /// Items on this page
    pub count: usize,

    /// Items matching the filter
    pub total: u64,

    pub pagination: ShoppingPaginationResponse,
    pub items: Vec<ShoppingItemResponse>,
}

/// Shopping Item Index Handler
///
/// Accepts `page`, `limit`, `category` (`all` for every category), `search`,
/// `minPrice`, `maxPrice`, `isAvailable`, `isPopular` and `sort` (a field name,
/// `-` prefixed for descending; newest first by default).
#[endpoint(
    tags("shopping"),
    summary = "List Shopping Items",
    responses(
        (status_code = StatusCode::OK, description = "Shopping items"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid query"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ShoppingItemsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = req
        .parse_queries::<ShoppingItemListQuery>()
        .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

    let filter = ShoppingItemFilter::from_query(query.into()).map_err(into_status_error)?;

    let page = state
        .app
        .shopping_items
        .list_items(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ShoppingItemsResponse {
        count: page.items.len(),
        total: page.total,
        pagination: ShoppingPaginationResponse {
            page: page.page,
            limit: page.limit,
            pages: page.pages,
        },
        items: page.items.into_iter().map(Into::into).collect(),
    }))
}
