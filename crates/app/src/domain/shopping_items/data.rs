//! Shopping Items Data

use crate::domain::{
    shopping_items::{
        errors::ShoppingItemsServiceError,
        records::{ShoppingCategory, ShoppingItemUuid},
    },
    users::records::UserUuid,
};

const NAME_MAX_CHARS: usize = 100;
const DESCRIPTION_MAX_CHARS: usize = 500;
const LONG_DESCRIPTION_MAX_CHARS: usize = 2000;

/// New Shopping Item Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShoppingItem {
    pub uuid: ShoppingItemUuid,
    pub name: String,
    pub category: ShoppingCategory,
    pub price: u64,
    pub description: String,
    pub long_description: Option<String>,
    pub image: String,
    pub materials: Vec<String>,
    pub tags: Vec<String>,
    pub is_popular: bool,
    pub created_by: UserUuid,
}

impl NewShoppingItem {
    pub(crate) fn normalise(mut self) -> Result<Self, ShoppingItemsServiceError> {
        self.name = validate_name(&self.name)?;
        self.description = validate_description(&self.description)?;
        self.long_description = self
            .long_description
            .as_deref()
            .map(validate_long_description)
            .transpose()?
            .flatten();
        self.image = validate_image(&self.image)?;
        self.materials = trimmed_list(self.materials);
        self.tags = trimmed_list(self.tags);

        Ok(self)
    }
}

/// Shopping Item Update Data
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingItemUpdate {
    pub name: Option<String>,
    pub category: Option<ShoppingCategory>,
    pub price: Option<u64>,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub image: Option<String>,
    pub materials: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub is_available: Option<bool>,
    pub is_popular: Option<bool>,
    pub updated_by: UserUuid,
}

impl ShoppingItemUpdate {
    /// An update that changes nothing but the author.
    #[must_use]
    pub fn by(updated_by: UserUuid) -> Self {
        Self {
            name: None,
            category: None,
            price: None,
            description: None,
            long_description: None,
            image: None,
            materials: None,
            tags: None,
            is_available: None,
            is_popular: None,
            updated_by,
        }
    }

    pub(crate) fn normalise(mut self) -> Result<Self, ShoppingItemsServiceError> {
        self.name = self.name.as_deref().map(validate_name).transpose()?;
        self.description = self
            .description
            .as_deref()
            .map(validate_description)
            .transpose()?;
        self.long_description = self
            .long_description
            .as_deref()
            .map(validate_long_description)
            .transpose()?
            .flatten();
        self.image = self.image.as_deref().map(validate_image).transpose()?;
        self.materials = self.materials.map(trimmed_list);
        self.tags = self.tags.map(trimmed_list);

        Ok(self)
    }
}

fn validate_name(name: &str) -> Result<String, ShoppingItemsServiceError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ShoppingItemsServiceError::invalid_input("Name is required"));
    }

    if name.chars().count() > NAME_MAX_CHARS {
        return Err(ShoppingItemsServiceError::invalid_input(
            "Name cannot exceed 100 characters",
        ));
    }

    Ok(name.to_string())
}

fn validate_description(description: &str) -> Result<String, ShoppingItemsServiceError> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ShoppingItemsServiceError::invalid_input(
            "Description is required",
        ));
    }

    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(ShoppingItemsServiceError::invalid_input(
            "Description cannot exceed 500 characters",
        ));
    }

    Ok(description.to_string())
}

/// Blank long descriptions are stored as absent.
fn validate_long_description(
    description: &str,
) -> Result<Option<String>, ShoppingItemsServiceError> {
    let description = description.trim();

    if description.chars().count() > LONG_DESCRIPTION_MAX_CHARS {
        return Err(ShoppingItemsServiceError::invalid_input(
            "Long description cannot exceed 2000 characters",
        ));
    }

    Ok(Some(description.to_string()).filter(|description| !description.is_empty()))
}

fn validate_image(image: &str) -> Result<String, ShoppingItemsServiceError> {
    let image = image.trim();

    if image.is_empty() {
        return Err(ShoppingItemsServiceError::invalid_input(
            "Image URL is required",
        ));
    }

    let host = image
        .strip_prefix("https://")
        .or_else(|| image.strip_prefix("http://"))
        .and_then(|rest| rest.split('/').next())
        .unwrap_or_default();

    if host.is_empty() || image.contains(char::is_whitespace) {
        return Err(ShoppingItemsServiceError::invalid_input("Invalid image URL"));
    }

    Ok(image.to_string())
}

fn trimmed_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}
