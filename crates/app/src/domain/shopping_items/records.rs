//! Shopping Item Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// Shopping Item UUID
pub type ShoppingItemUuid = TypedUuid<ShoppingItemRecord>;

/// Shopping Item Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingItemRecord {
    pub uuid: ShoppingItemUuid,
    pub name: String,
    pub category: ShoppingCategory,
    pub price: u64,
    pub description: String,
    pub long_description: Option<String>,
    pub image: String,
    pub materials: Vec<String>,
    pub tags: Vec<String>,
    pub is_available: bool,
    pub is_popular: bool,
    pub created_by: Option<UserUuid>,
    pub updated_by: Option<UserUuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Shopping item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShoppingCategory {
    Blouse,
    Makeup,
    Shirt,
    Skirt,
    Slippers,
    Trouser,
}

impl ShoppingCategory {
    pub const ALL: [Self; 6] = [
        Self::Blouse,
        Self::Makeup,
        Self::Shirt,
        Self::Skirt,
        Self::Slippers,
        Self::Trouser,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blouse => "blouse",
            Self::Makeup => "makeup",
            Self::Shirt => "shirt",
            Self::Skirt => "skirt",
            Self::Slippers => "slippers",
            Self::Trouser => "trouser",
        }
    }
}

impl fmt::Display for ShoppingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a category name is not one of [`ShoppingCategory::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shopping category: {0}")]
pub struct UnknownShoppingCategory(pub String);

impl FromStr for ShoppingCategory {
    type Err = UnknownShoppingCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownShoppingCategory(value.to_string()))
    }
}

/// Number of items stored under a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: ShoppingCategory,
    pub count: u64,
    pub available_count: u64,
}
