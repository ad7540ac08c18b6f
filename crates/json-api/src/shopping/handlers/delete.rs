//! Delete Shopping Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    shopping::{errors::into_status_error, requests::parse_item_id},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShoppingItemDeletedResponse {
    pub message: String,
}

/// Delete Shopping Item Handler
///
/// Removes the item permanently.
#[endpoint(
    tags("shopping"),
    summary = "Delete Shopping Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Shopping item deleted"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin privileges required"),
        (status_code = StatusCode::NOT_FOUND, description = "Shopping item not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "shopping.delete",
    skip(item, depot),
    fields(item_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    item: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ShoppingItemDeletedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let item = parse_item_id(&item.into_inner())?;

    tracing::Span::current().record("item_uuid", tracing::field::display(item));

    state
        .app
        .shopping_items
        .delete_item(item)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ShoppingItemDeletedResponse {
        message: "Shopping item deleted successfully".to_string(),
    }))
}
