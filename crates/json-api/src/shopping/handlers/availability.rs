//! Toggle Shopping Item Availability Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    shopping::{errors::into_status_error, get::ShoppingItemResponse, requests::parse_item_id},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AvailabilityToggledResponse {
    pub message: String,
    pub item: ShoppingItemResponse,
}

/// Toggle Shopping Item Availability Handler
///
/// Open to staff, managers and admins.
#[endpoint(
    tags("shopping"),
    summary = "Toggle Shopping Item Availability",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Availability toggled"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Staff privileges required"),
        (status_code = StatusCode::NOT_FOUND, description = "Shopping item not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "shopping.toggle_availability",
    skip(item, depot),
    fields(item_uuid = tracing::field::Empty, is_available = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    item: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<AvailabilityToggledResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let item = parse_item_id(&item.into_inner())?;

    tracing::Span::current().record("item_uuid", tracing::field::display(item));

    let item = state
        .app
        .shopping_items
        .toggle_availability(item, principal.user_uuid)
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("is_available", item.is_available);

    let outcome = if item.is_available { "enabled" } else { "disabled" };

    Ok(Json(AvailabilityToggledResponse {
        message: format!("Shopping item {outcome} successfully"),
        item: item.into(),
    }))
}
