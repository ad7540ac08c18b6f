//! Update Shopping Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{
    shopping_items::data::ShoppingItemUpdate, users::records::UserUuid,
};

use crate::{
    extensions::*,
    shopping::{
        errors::into_status_error,
        get::ShoppingItemResponse,
        requests::{parse_category, parse_item_id},
    },
    state::State,
};

/// Update Shopping Item Request
///
/// Omitted fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateShoppingItemRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<u64>,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub image: Option<String>,
    pub materials: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub is_available: Option<bool>,
    pub is_popular: Option<bool>,
}

impl UpdateShoppingItemRequest {
    fn into_update(self, updated_by: UserUuid) -> Result<ShoppingItemUpdate, StatusError> {
        Ok(ShoppingItemUpdate {
            name: self.name,
            category: self.category.as_deref().map(parse_category).transpose()?,
            price: self.price,
            description: self.description,
            long_description: self.long_description,
            image: self.image,
            materials: self.materials,
            tags: self.tags,
            is_available: self.is_available,
            is_popular: self.is_popular,
            updated_by,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShoppingItemUpdatedResponse {
    pub message: String,
    pub item: ShoppingItemResponse,
}

/// Update Shopping Item Handler
#[endpoint(
    tags("shopping"),
    summary = "Update Shopping Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Shopping item updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin privileges required"),
        (status_code = StatusCode::NOT_FOUND, description = "Shopping item not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "shopping.update",
    skip(item, json, depot),
    fields(item_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    item: PathParam<String>,
    json: JsonBody<UpdateShoppingItemRequest>,
    depot: &mut Depot,
) -> Result<Json<ShoppingItemUpdatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let item = parse_item_id(&item.into_inner())?;

    tracing::Span::current().record("item_uuid", tracing::field::display(item));

    let update = json.into_inner().into_update(principal.user_uuid)?;

    let item = state
        .app
        .shopping_items
        .update_item(item, update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ShoppingItemUpdatedResponse {
        message: "Shopping item updated successfully".to_string(),
        item: item.into(),
    }))
}
