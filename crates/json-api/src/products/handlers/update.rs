//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{products::data::ProductUpdate, users::records::UserUuid};

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        get::{ProductResponse, SpecificationsBody},
        requests::{parse_category, parse_product_id},
    },
    state::State,
};

/// Update Product Request
///
/// Omitted fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub price: Option<u64>,
    pub original_price: Option<u64>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub main_image: Option<String>,
    pub images: Option<Vec<String>>,
    pub stock: Option<u32>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_on_sale: Option<bool>,
    pub tags: Option<Vec<String>>,

    /// Replaces every specification when present
    pub specifications: Option<SpecificationsBody>,
}

impl UpdateProductRequest {
    fn into_update(self, updated_by: UserUuid) -> Result<ProductUpdate, StatusError> {
        Ok(ProductUpdate {
            name: self.name,
            description: self.description,
            brand: self.brand,
            price: self.price,
            original_price: self.original_price,
            category: self.category.as_deref().map(parse_category).transpose()?,
            subcategory: self.subcategory,
            main_image: self.main_image,
            images: self.images,
            stock: self.stock,
            is_active: self.is_active,
            is_featured: self.is_featured,
            is_on_sale: self.is_on_sale,
            tags: self.tags.map(|tags| tags.into_iter().collect()),
            specifications: self.specifications.map(Into::into),
            updated_by: Some(updated_by),
        })
    }
}

/// Product Updated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductUpdatedResponse {
    pub message: String,
    pub product: ProductResponse,
}

/// Update Product Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin privileges required"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductUpdatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let product = parse_product_id(&product.into_inner())?;

    tracing::Span::current().record("product_uuid", tracing::field::display(product));

    let update = json.into_inner().into_update(principal.user_uuid)?;

    let product = state
        .app
        .products
        .update_product(product, update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductUpdatedResponse {
        message: "Product updated successfully".to_string(),
        product: product.into(),
    }))
}
