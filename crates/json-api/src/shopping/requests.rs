//! Shopping item request parsing.

use salvo::http::StatusError;
use serde::Deserialize;

use storefront_app::domain::shopping_items::{
    filter::ShoppingItemQuery,
    records::{ShoppingCategory, ShoppingItemUuid},
};

/// Listing query string.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShoppingItemListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub is_available: Option<bool>,
    pub is_popular: Option<bool>,
    pub sort: Option<String>,
}

impl From<ShoppingItemListQuery> for ShoppingItemQuery {
    fn from(query: ShoppingItemListQuery) -> Self {
        ShoppingItemQuery {
            page: query.page,
            limit: query.limit,
            category: query.category,
            search: query.search,
            min_price: query.min_price,
            max_price: query.max_price,
            available: query.is_available,
            popular: query.is_popular,
            sort: query.sort,
        }
    }
}

pub(crate) fn parse_item_id(value: &str) -> Result<ShoppingItemUuid, StatusError> {
    value
        .parse::<ShoppingItemUuid>()
        .map_err(|_error| StatusError::not_found().brief("Shopping item not found"))
}

pub(crate) fn parse_category(value: &str) -> Result<ShoppingCategory, StatusError> {
    value
        .parse::<ShoppingCategory>()
        .map_err(|_error| StatusError::bad_request().brief("Invalid category"))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn malformed_id_reads_as_missing_item() -> TestResult {
        let error = parse_item_id("abc").err().ok_or("expected an error")?;

        assert_eq!(error.code, salvo::http::StatusCode::NOT_FOUND);

        Ok(())
    }

    #[test]
    fn unknown_category_is_invalid() -> TestResult {
        assert_eq!(parse_category("SHIRT")?, ShoppingCategory::Shirt);

        let error = parse_category("hats").err().ok_or("expected an error")?;

        assert_eq!(error.brief, "Invalid category");

        Ok(())
    }
}
