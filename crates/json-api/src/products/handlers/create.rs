//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{
    products::{data::NewProduct, records::ProductUuid},
    users::records::UserUuid,
};

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        get::{ProductResponse, SpecificationsBody},
        requests::parse_category,
    },
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,

    /// Price in pence/cents
    pub price: Option<u64>,
    pub original_price: Option<u64>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub main_image: Option<String>,

    /// Defaults to the main image
    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub stock: u32,

    #[serde(default)]
    pub is_featured: bool,

    #[serde(default)]
    pub is_on_sale: bool,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub specifications: SpecificationsBody,
}

impl CreateProductRequest {
    fn into_new_product(
        self,
        uuid: ProductUuid,
        created_by: UserUuid,
    ) -> Result<NewProduct, StatusError> {
        let (
            Some(name),
            Some(description),
            Some(brand),
            Some(price),
            Some(category),
            Some(subcategory),
            Some(main_image),
        ) = (
            self.name,
            self.description,
            self.brand,
            self.price,
            self.category,
            self.subcategory,
            self.main_image,
        )
        else {
            return Err(StatusError::bad_request().brief("Please provide all required fields"));
        };

        Ok(NewProduct {
            uuid,
            name,
            description,
            brand,
            price,
            original_price: self.original_price,
            category: parse_category(&category)?,
            subcategory,
            main_image,
            images: self.images,
            stock: self.stock,
            is_featured: self.is_featured,
            is_on_sale: self.is_on_sale,
            tags: self.tags.into_iter().collect(),
            specifications: self.specifications.into(),
            created_by: Some(created_by),
        })
    }
}

/// Product Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductCreatedResponse {
    pub message: String,
    pub product: ProductResponse,
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin privileges required"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(json, depot, res),
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let uuid = ProductUuid::new();

    tracing::Span::current().record("product_uuid", tracing::field::display(uuid));

    let product = json
        .into_inner()
        .into_new_product(uuid, principal.user_uuid)?;

    let product = state
        .app
        .products
        .create_product(product)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ProductCreatedResponse {
        message: "Product created successfully".to_string(),
        product: product.into(),
    }))
}
