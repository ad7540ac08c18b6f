//! Catalog listing criteria.
//!
//! [`ProductFilter`] is the only way the repository receives listing criteria:
//! it is built from loosely-typed request input by [`ProductFilter::from_query`]
//! and friends, which apply defaults and reject out-of-range values before any
//! SQL is issued.

use crate::domain::products::{
    errors::ProductsServiceError,
    records::{Category, ProductRecord},
};

pub const DEFAULT_PAGE_LIMIT: u32 = 12;
pub const MAX_PAGE_LIMIT: u32 = 100;
pub const DEFAULT_FEATURED_LIMIT: u32 = 8;
pub const MIN_SEARCH_CHARS: usize = 2;

/// Raw listing input as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
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
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    CreatedAt,
    Price,
    Name,
}

impl SortField {
    pub(crate) const fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Price => "price",
            Self::Name => "name",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "createdAt" | "created_at" => Some(Self::CreatedAt),
            "price" => Some(Self::Price),
            "name" => Some(Self::Name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub(crate) const fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Validated listing criteria. Only active products are ever listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<Category>,
    pub subcategory: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub search: Option<String>,
    pub featured_only: bool,
    pub on_sale_only: bool,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub page: u32,
    pub limit: u32,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category: None,
            subcategory: None,
            brand: None,
            min_price: None,
            max_price: None,
            search: None,
            featured_only: false,
            on_sale_only: false,
            sort_field: SortField::default(),
            sort_order: SortOrder::default(),
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl ProductFilter {
    /// Build a filter for the general product listing.
    pub fn from_query(query: ProductQuery) -> Result<Self, ProductsServiceError> {
        let page = match query.page {
            None => 1,
            Some(0) => {
                return Err(ProductsServiceError::invalid_input(
                    "Page must be at least 1",
                ));
            }
            Some(page) => page,
        };

        let limit = validate_limit(query.limit.unwrap_or(DEFAULT_PAGE_LIMIT))?;

        let category = non_blank(query.category)
            .map(|category| {
                category
                    .parse::<Category>()
                    .map_err(|error| ProductsServiceError::invalid_input(error.to_string()))
            })
            .transpose()?;

        if let (Some(min), Some(max)) = (query.min_price, query.max_price)
            && min > max
        {
            return Err(ProductsServiceError::invalid_input(
                "Minimum price cannot exceed maximum price",
            ));
        }

        let sort_field = match non_blank(query.sort_by) {
            None => SortField::default(),
            Some(value) => SortField::parse(&value).ok_or_else(|| {
                ProductsServiceError::invalid_input(format!("Cannot sort products by {value}"))
            })?,
        };

        let sort_order = match non_blank(query.sort_order) {
            None => SortOrder::default(),
            Some(value) => SortOrder::parse(&value).ok_or_else(|| {
                ProductsServiceError::invalid_input("Sort order must be asc or desc")
            })?,
        };

        Ok(Self {
            category,
            subcategory: non_blank(query.subcategory),
            brand: non_blank(query.brand),
            min_price: query.min_price,
            max_price: query.max_price,
            search: non_blank(query.search),
            featured_only: query.featured.unwrap_or(false),
            on_sale_only: query.on_sale.unwrap_or(false),
            sort_field,
            sort_order,
            page,
            limit,
        })
    }

    /// Build a filter for a text search. The term must have at least
    /// [`MIN_SEARCH_CHARS`] characters once trimmed.
    pub fn for_search(term: &str, mut query: ProductQuery) -> Result<Self, ProductsServiceError> {
        let term = term.trim();

        if term.chars().count() < MIN_SEARCH_CHARS {
            return Err(ProductsServiceError::invalid_input(
                "Search query must be at least 2 characters long",
            ));
        }

        query.search = Some(term.to_string());

        Self::from_query(query)
    }

    /// Newest featured products.
    pub fn featured(limit: Option<u32>) -> Result<Self, ProductsServiceError> {
        Ok(Self {
            featured_only: true,
            limit: validate_limit(limit.unwrap_or(DEFAULT_FEATURED_LIMIT))?,
            ..Self::default()
        })
    }

    /// Newest products in a category.
    pub fn by_category(category: Category, limit: Option<u32>) -> Result<Self, ProductsServiceError> {
        Ok(Self {
            category: Some(category),
            limit: validate_limit(limit.unwrap_or(DEFAULT_PAGE_LIMIT))?,
            ..Self::default()
        })
    }

    /// Number of rows skipped before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

/// Position of a page within the full result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current: u32,
    pub pages: u64,
    pub total: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    #[must_use]
    pub fn new(filter: &ProductFilter, returned: usize, total: u64) -> Self {
        let returned = u64::try_from(returned).unwrap_or(u64::MAX);

        Self {
            current: filter.page,
            pages: total.div_ceil(u64::from(filter.limit.max(1))),
            total,
            has_next: filter.offset().saturating_add(returned) < total,
            has_prev: filter.page > 1,
        }
    }
}

/// One page of listed products.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub products: Vec<ProductRecord>,
    pub pagination: Pagination,
}

fn validate_limit(limit: u32) -> Result<u32, ProductsServiceError> {
    if (1..=MAX_PAGE_LIMIT).contains(&limit) {
        Ok(limit)
    } else {
        Err(ProductsServiceError::invalid_input(
            "Limit must be between 1 and 100",
        ))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
