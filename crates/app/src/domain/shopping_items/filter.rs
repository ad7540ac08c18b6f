//! Shopping item listing criteria.

use crate::domain::shopping_items::{
    errors::ShoppingItemsServiceError,
    records::{ShoppingCategory, ShoppingItemRecord},
};

pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Raw listing input as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingItemQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub available: Option<bool>,
    pub popular: Option<bool>,

    /// Field name, prefixed with `-` for descending order.
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSort {
    CreatedAt,
    Price,
    Name,
}

impl ItemSort {
    pub(crate) const fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Price => "price",
            Self::Name => "name",
        }
    }
}

/// Validated listing criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingItemFilter {
    pub category: Option<ShoppingCategory>,
    pub search: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub available: Option<bool>,
    pub popular: Option<bool>,
    pub sort: ItemSort,
    pub descending: bool,
    pub page: u32,
    pub limit: u32,
}

impl Default for ShoppingItemFilter {
    fn default() -> Self {
        Self {
            category: None,
            search: None,
            min_price: None,
            max_price: None,
            available: None,
            popular: None,
            sort: ItemSort::CreatedAt,
            descending: true,
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl ShoppingItemFilter {
    /// `category=all` lists every category.
    pub fn from_query(query: ShoppingItemQuery) -> Result<Self, ShoppingItemsServiceError> {
        let page = query.page.unwrap_or(1);

        if page == 0 {
            return Err(ShoppingItemsServiceError::invalid_input(
                "Page must be at least 1",
            ));
        }

        let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT);

        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(ShoppingItemsServiceError::invalid_input(
                "Limit must be between 1 and 100",
            ));
        }

        let category = match non_blank(query.category) {
            None => None,
            Some(category) if category.eq_ignore_ascii_case("all") => None,
            Some(category) => Some(
                category
                    .parse::<ShoppingCategory>()
                    .map_err(|error| ShoppingItemsServiceError::invalid_input(error.to_string()))?,
            ),
        };

        if let (Some(min), Some(max)) = (query.min_price, query.max_price)
            && min > max
        {
            return Err(ShoppingItemsServiceError::invalid_input(
                "Minimum price cannot exceed maximum price",
            ));
        }

        let (sort, descending) = match non_blank(query.sort) {
            None => (ItemSort::CreatedAt, true),
            Some(sort) => parse_sort(&sort).ok_or_else(|| {
                ShoppingItemsServiceError::invalid_input(format!("Cannot sort items by {sort}"))
            })?,
        };

        Ok(Self {
            category,
            search: non_blank(query.search),
            min_price: query.min_price,
            max_price: query.max_price,
            available: query.available,
            popular: query.popular,
            sort,
            descending,
            page,
            limit,
        })
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

fn parse_sort(value: &str) -> Option<(ItemSort, bool)> {
    let (field, descending) = match value.strip_prefix('-') {
        Some(field) => (field, true),
        None => (value, false),
    };

    let sort = match field {
        "createdAt" | "created_at" => ItemSort::CreatedAt,
        "price" => ItemSort::Price,
        "name" => ItemSort::Name,
        _ => return None,
    };

    Some((sort, descending))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// One page of listed shopping items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingItemPage {
    pub items: Vec<ShoppingItemRecord>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub pages: u64,
}

impl ShoppingItemPage {
    #[must_use]
    pub fn new(filter: &ShoppingItemFilter, items: Vec<ShoppingItemRecord>, total: u64) -> Self {
        Self {
            items,
            total,
            page: filter.page,
            limit: filter.limit,
            pages: total.div_ceil(u64::from(filter.limit.max(1))),
        }
    }
}
