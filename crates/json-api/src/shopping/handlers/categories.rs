//! Shopping Categories Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::domain::shopping_items::records::CategoryCount;

use crate::{extensions::*, shopping::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryCountResponse {
    pub category: String,

    /// All items in the category
    pub count: u64,

    /// Items currently available
    pub available_count: u64,
}

impl From<CategoryCount> for CategoryCountResponse {
    fn from(count: CategoryCount) -> Self {
        CategoryCountResponse {
            category: count.category.to_string(),
            count: count.count,
            available_count: count.available_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoriesResponse {
    /// Categories holding at least one item, by name
    pub categories: Vec<CategoryCountResponse>,
}

/// Shopping Categories Handler
#[endpoint(
    tags("shopping"),
    summary = "Shopping Categories",
    responses(
        (status_code = StatusCode::OK, description = "Categories with item counts"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CategoriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .shopping_items
        .categories()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CategoriesResponse {
        categories: categories.into_iter().map(Into::into).collect(),
    }))
}
