//! Get Shopping Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::shopping_items::records::ShoppingItemRecord;

use crate::{
    extensions::*,
    shopping::{errors::into_status_error, requests::parse_item_id},
    state::State,
};

/// Shopping Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShoppingItemResponse {
    pub uuid: Uuid,
    pub name: String,
    pub category: String,

    /// Price in pence/cents
    pub price: u64,

    pub description: String,
    pub long_description: Option<String>,
    pub image: String,
    pub materials: Vec<String>,
    pub tags: Vec<String>,
    pub is_available: bool,
    pub is_popular: bool,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ShoppingItemRecord> for ShoppingItemResponse {
    fn from(item: ShoppingItemRecord) -> Self {
        ShoppingItemResponse {
            uuid: item.uuid.into(),
            name: item.name,
            category: item.category.to_string(),
            price: item.price,
            description: item.description,
            long_description: item.long_description,
            image: item.image,
            materials: item.materials,
            tags: item.tags,
            is_available: item.is_available,
            is_popular: item.is_popular,
            created_by: item.created_by.map(Into::into),
            updated_by: item.updated_by.map(Into::into),
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

/// Shopping Item Envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShoppingItemEnvelope {
    pub item: ShoppingItemResponse,
}

/// Get Shopping Item Handler
#[endpoint(
    tags("shopping"),
    summary = "Get Shopping Item",
    responses(
        (status_code = StatusCode::OK, description = "Shopping item"),
        (status_code = StatusCode::NOT_FOUND, description = "Shopping item not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ShoppingItemEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let item = parse_item_id(&item.into_inner())?;

    let item = state
        .app
        .shopping_items
        .get_item(item)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ShoppingItemEnvelope { item: item.into() }))
}
