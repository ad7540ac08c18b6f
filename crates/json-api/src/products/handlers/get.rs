//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::records::{ProductRecord, Ratings, Specifications};

use crate::{
    extensions::*,
    products::{errors::into_status_error, requests::parse_product_id},
    state::State,
};

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    pub name: String,
    pub description: String,
    pub brand: String,

    /// The price of the product in pence/cents
    pub price: u64,

    /// Price before sale, in pence/cents
    pub original_price: Option<u64>,

    pub category: String,
    pub subcategory: String,
    pub main_image: String,
    pub images: Vec<String>,
    pub stock: u32,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_on_sale: bool,
    pub tags: Vec<String>,
    pub specifications: SpecificationsBody,
    pub ratings: RatingsResponse,

    /// Admin who created the product
    pub created_by: Option<Uuid>,

    /// Admin who last changed the product
    pub updated_by: Option<Uuid>,

    /// Whole percent saved against the original price
    pub discount_percentage: u8,

    /// One of `in-stock`, `low-stock` or `out-of-stock`
    pub stock_status: String,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        let discount_percentage = product.discount_percentage();
        let stock_status = product.stock_status().as_str().to_string();

        ProductResponse {
            uuid: product.uuid.into(),
            name: product.name,
            description: product.description,
            brand: product.brand,
            price: product.price,
            original_price: product.original_price,
            category: product.category.to_string(),
            subcategory: product.subcategory,
            main_image: product.main_image,
            images: product.images,
            stock: product.stock,
            is_active: product.is_active,
            is_featured: product.is_featured,
            is_on_sale: product.is_on_sale,
            tags: product.tags.into_vec(),
            specifications: product.specifications.into(),
            ratings: product.ratings.into(),
            created_by: product.created_by.map(Into::into),
            updated_by: product.updated_by.map(Into::into),
            discount_percentage,
            stock_status,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Product Specifications
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct SpecificationsBody {
    pub weight: Option<String>,
    pub volume: Option<String>,
    pub skin_type: Vec<String>,
    pub ingredients: Vec<String>,
    pub benefits: Vec<String>,
    pub how_to_use: Option<String>,
}

impl From<Specifications> for SpecificationsBody {
    fn from(specifications: Specifications) -> Self {
        SpecificationsBody {
            weight: specifications.weight,
            volume: specifications.volume,
            skin_type: specifications.skin_types,
            ingredients: specifications.ingredients,
            benefits: specifications.benefits,
            how_to_use: specifications.how_to_use,
        }
    }
}

impl From<SpecificationsBody> for Specifications {
    fn from(body: SpecificationsBody) -> Self {
        Specifications {
            weight: body.weight,
            volume: body.volume,
            skin_types: body.skin_type,
            ingredients: body.ingredients,
            benefits: body.benefits,
            how_to_use: body.how_to_use,
        }
    }
}

/// Product Ratings
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RatingsResponse {
    /// Average rating out of 5
    pub average: f64,
    pub count: u32,
}

impl From<Ratings> for RatingsResponse {
    fn from(ratings: Ratings) -> Self {
        RatingsResponse {
            average: ratings.average,
            count: ratings.count,
        }
    }
}

/// Product Envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductEnvelope {
    pub product: ProductResponse,
}

/// Get Product Handler
///
/// Returns an active product.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid product ID"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = parse_product_id(&product.into_inner())?;

    let product = state
        .app
        .products
        .get_product(product)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductEnvelope {
        product: product.into(),
    }))
}
