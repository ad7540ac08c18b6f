//! Create Shopping Item Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{
    shopping_items::{data::NewShoppingItem, records::ShoppingItemUuid},
    users::records::UserUuid,
};

use crate::{
    extensions::*,
    shopping::{errors::into_status_error, get::ShoppingItemResponse, requests::parse_category},
    state::State,
};

/// Create Shopping Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateShoppingItemRequest {
    pub name: Option<String>,
    pub category: Option<String>,

    /// Price in pence/cents
    pub price: Option<u64>,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub image: Option<String>,

    #[serde(default)]
    pub materials: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub is_popular: bool,
}

impl CreateShoppingItemRequest {
    fn into_new_item(
        self,
        uuid: ShoppingItemUuid,
        created_by: UserUuid,
    ) -> Result<NewShoppingItem, StatusError> {
        let name = self.name.unwrap_or_default();
        let description = self.description.unwrap_or_default();
        let image = self.image.unwrap_or_default();

        let (Some(category), Some(price)) = (self.category, self.price) else {
            return Err(StatusError::bad_request().brief("Please provide all required fields"));
        };

        Ok(NewShoppingItem {
            uuid,
            name,
            category: parse_category(&category)?,
            price,
            description,
            long_description: self.long_description,
            image,
            materials: self.materials,
            tags: self.tags,
            is_popular: self.is_popular,
            created_by,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShoppingItemCreatedResponse {
    pub message: String,
    pub item: ShoppingItemResponse,
}

/// Create Shopping Item Handler
#[endpoint(
    tags("shopping"),
    summary = "Create Shopping Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Shopping item created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin privileges required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "shopping.create",
    skip(json, depot, res),
    fields(item_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateShoppingItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ShoppingItemCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let uuid = ShoppingItemUuid::new();

    tracing::Span::current().record("item_uuid", tracing::field::display(uuid));

    let item = json.into_inner().into_new_item(uuid, principal.user_uuid)?;

    let item = state
        .app
        .shopping_items
        .create_item(item)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/shopping/{}", item.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ShoppingItemCreatedResponse {
        message: "Shopping item created successfully".to_string(),
        item: item.into(),
    }))
}
