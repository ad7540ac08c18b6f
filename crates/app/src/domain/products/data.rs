//! Products Data

use smallvec::SmallVec;

use crate::domain::{
    products::{
        errors::ProductsServiceError,
        records::{Category, ProductUuid, Specifications},
    },
    users::records::UserUuid,
};

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 100;
const DESCRIPTION_MIN_CHARS: usize = 10;
const DESCRIPTION_MAX_CHARS: usize = 1000;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
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
    pub is_featured: bool,
    pub is_on_sale: bool,
    pub tags: SmallVec<[String; 3]>,
    pub specifications: Specifications,
    pub created_by: Option<UserUuid>,
}

impl NewProduct {
    /// Trim free-text fields, default the gallery to the main image and check
    /// length limits.
    pub(crate) fn normalise(mut self) -> Result<Self, ProductsServiceError> {
        self.name = self.name.trim().to_string();
        self.description = self.description.trim().to_string();
        self.brand = self.brand.trim().to_string();
        self.subcategory = self.subcategory.trim().to_string();

        if self.brand.is_empty() || self.subcategory.is_empty() || self.main_image.is_empty() {
            return Err(ProductsServiceError::invalid_input(
                "Please provide all required fields",
            ));
        }

        validate_name(&self.name)?;
        validate_description(&self.description)?;

        if self.images.is_empty() {
            self.images.push(self.main_image.clone());
        }

        self.specifications = self.specifications.normalise();

        Ok(self)
    }
}

/// Product Update Data
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub price: Option<u64>,
    pub original_price: Option<u64>,
    pub category: Option<Category>,
    pub subcategory: Option<String>,
    pub main_image: Option<String>,
    pub images: Option<Vec<String>>,
    pub stock: Option<u32>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_on_sale: Option<bool>,
    pub tags: Option<SmallVec<[String; 3]>>,

    /// Replaces all specifications when present.
    pub specifications: Option<Specifications>,
    pub updated_by: Option<UserUuid>,
}

impl ProductUpdate {
    pub(crate) fn normalise(mut self) -> Result<Self, ProductsServiceError> {
        self.name = self.name.map(|name| name.trim().to_string());
        self.description = self
            .description
            .map(|description| description.trim().to_string());
        self.brand = self.brand.map(|brand| brand.trim().to_string());
        self.subcategory = self
            .subcategory
            .map(|subcategory| subcategory.trim().to_string());

        if let Some(name) = &self.name {
            validate_name(name)?;
        }

        if let Some(description) = &self.description {
            validate_description(description)?;
        }

        self.specifications = self.specifications.map(Specifications::normalise);

        Ok(self)
    }
}

impl Specifications {
    /// Trim every value and drop the blank ones.
    fn normalise(self) -> Self {
        Self {
            weight: non_blank(self.weight),
            volume: non_blank(self.volume),
            skin_types: non_blank_list(self.skin_types),
            ingredients: non_blank_list(self.ingredients),
            benefits: non_blank_list(self.benefits),
            how_to_use: non_blank(self.how_to_use),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn non_blank_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|value| non_blank(Some(value)))
        .collect()
}

fn validate_name(name: &str) -> Result<(), ProductsServiceError> {
    let chars = name.chars().count();

    if chars < NAME_MIN_CHARS {
        return Err(ProductsServiceError::invalid_input(
            "Product name must be at least 2 characters long",
        ));
    }

    if chars > NAME_MAX_CHARS {
        return Err(ProductsServiceError::invalid_input(
            "Product name cannot exceed 100 characters",
        ));
    }

    Ok(())
}

fn validate_description(description: &str) -> Result<(), ProductsServiceError> {
    let chars = description.chars().count();

    if chars < DESCRIPTION_MIN_CHARS {
        return Err(ProductsServiceError::invalid_input(
            "Description must be at least 10 characters long",
        ));
    }

    if chars > DESCRIPTION_MAX_CHARS {
        return Err(ProductsServiceError::invalid_input(
            "Description cannot exceed 1000 characters",
        ));
    }

    Ok(())
}
