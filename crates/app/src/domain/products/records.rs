//! Product Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use smallvec::SmallVec;

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Stock level at or below which a product is reported as running low.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub brand: String,
    pub price: u64,
    pub original_price: Option<u64>,
    pub category: Category,
    pub subcategory: String,
    pub main_image: String,
    pub images: Vec<String>,
    pub stock: u32,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_on_sale: bool,
    pub tags: SmallVec<[String; 3]>,
    pub specifications: Specifications,
    pub ratings: Ratings,
    pub created_by: Option<UserUuid>,
    pub updated_by: Option<UserUuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// Whole-number discount against the original price, or 0 when the product
    /// is not discounted.
    #[must_use]
    pub fn discount_percentage(&self) -> u8 {
        discount_percentage(self.price, self.original_price)
    }

    #[must_use]
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::from_stock(self.stock)
    }
}

/// Descriptive attributes shown on the product page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Specifications {
    pub weight: Option<String>,
    pub volume: Option<String>,
    pub skin_types: Vec<String>,
    pub ingredients: Vec<String>,
    pub benefits: Vec<String>,
    pub how_to_use: Option<String>,
}

/// Aggregate customer rating, average out of 5.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ratings {
    pub average: f64,
    pub count: u32,
}

/// Price and stock of an active product, as seen by the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductAvailability {
    pub price: u64,
    pub stock: u32,
}

/// Product details shown alongside a cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSummary {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: u64,
    pub main_image: String,
    pub stock: u32,
    pub is_active: bool,
}

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Skincare,
    Makeup,
    Fragrance,
    Haircare,
    Bodycare,
    Tools,
    Sets,
    Trending,
}

impl Category {
    pub const ALL: [Self; 8] = [
        Self::Skincare,
        Self::Makeup,
        Self::Fragrance,
        Self::Haircare,
        Self::Bodycare,
        Self::Tools,
        Self::Sets,
        Self::Trending,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Skincare => "skincare",
            Self::Makeup => "makeup",
            Self::Fragrance => "fragrance",
            Self::Haircare => "haircare",
            Self::Bodycare => "bodycare",
            Self::Tools => "tools",
            Self::Sets => "sets",
            Self::Trending => "trending",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a category name is not one of [`Category::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown product category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownCategory(value.to_string()))
    }
}

/// Derived stock indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    #[must_use]
    pub const fn from_stock(stock: u32) -> Self {
        match stock {
            0 => Self::OutOfStock,
            1..=LOW_STOCK_THRESHOLD => Self::LowStock,
            _ => Self::InStock,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "in-stock",
            Self::LowStock => "low-stock",
            Self::OutOfStock => "out-of-stock",
        }
    }
}

/// `round((original - price) / original * 100)`, in integer arithmetic.
#[must_use]
pub fn discount_percentage(price: u64, original_price: Option<u64>) -> u8 {
    let Some(original) = original_price.filter(|original| *original > price) else {
        return 0;
    };

    let saved = u128::from(original - price) * 100;
    let original = u128::from(original);
    let rounded = (saved + original / 2) / original;

    u8::try_from(rounded).unwrap_or(100)
}
