//! Product request parsing.

use salvo::http::StatusError;
use serde::Deserialize;

use storefront_app::domain::products::{
    filter::ProductQuery,
    records::{Category, ProductUuid},
};

/// Listing query string, shared by the index and search handlers.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub featured: Option<bool>,
    pub on_sale: Option<bool>,

    /// Search term; only read by the search handler.
    pub q: Option<String>,
}

impl From<ProductListQuery> for ProductQuery {
    fn from(query: ProductListQuery) -> Self {
        ProductQuery {
            page: query.page,
            limit: query.limit,
            category: query.category,
            subcategory: query.subcategory,
            brand: query.brand,
            min_price: query.min_price,
            max_price: query.max_price,
            search: query.search,
            sort_by: query.sort_by,
            sort_order: query.sort_order,
            featured: query.featured,
            on_sale: query.on_sale,
        }
    }
}

pub(crate) fn parse_product_id(value: &str) -> Result<ProductUuid, StatusError> {
    value
        .parse::<ProductUuid>()
        .map_err(|_error| StatusError::bad_request().brief("Invalid product ID"))
}

pub(crate) fn parse_category(value: &str) -> Result<Category, StatusError> {
    value
        .parse::<Category>()
        .map_err(|error| StatusError::bad_request().brief(error.to_string()))
}
