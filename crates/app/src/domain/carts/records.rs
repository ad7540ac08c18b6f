//! Cart Records
//!
//! A [`CartRecord`] is loaded whole, mutated in memory through the methods
//! below, then written back whole. Every mutating method leaves the record
//! with at most one line per product, every line quantity within
//! `1..=MAX_LINE_QUANTITY`, and totals matching the lines.

use jiff::Timestamp;

use crate::{
    domain::{
        carts::errors::{CartsServiceError, StockShortfall},
        products::records::{ProductAvailability, ProductUuid},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Largest quantity a single cart line may hold.
pub const MAX_LINE_QUANTITY: u32 = 10;

/// Cart Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub user_uuid: UserUuid,
    pub items: Vec<CartItemRecord>,
    pub total_items: u32,
    pub total_amount: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart line. Position within the cart is the index in [`CartRecord::items`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartItemRecord {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    /// Unit price captured when the line was last written.
    pub price: u64,
}

impl CartItemRecord {
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}

impl CartRecord {
    /// A cart for `user` that has not been stored yet.
    #[must_use]
    pub fn new(user_uuid: UserUuid) -> Self {
        let now = Timestamp::now();

        Self {
            uuid: CartUuid::new(),
            user_uuid,
            items: Vec::new(),
            total_items: 0,
            total_amount: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn line(&self, product: ProductUuid) -> Option<&CartItemRecord> {
        self.items.iter().find(|item| item.product_uuid == product)
    }

    /// Add `quantity` units of a product, merging into an existing line.
    ///
    /// The line price is refreshed to the product's current price.
    pub fn add_item(
        &mut self,
        product: ProductUuid,
        quantity: u32,
        availability: ProductAvailability,
    ) -> Result<(), CartsServiceError> {
        check_quantity(quantity, 1)?;

        if quantity > availability.stock {
            return Err(CartsServiceError::InsufficientStock(
                StockShortfall::Exceeds {
                    available: availability.stock,
                },
            ));
        }

        match self
            .items
            .iter_mut()
            .find(|item| item.product_uuid == product)
        {
            Some(line) => {
                let combined = line.quantity.saturating_add(quantity);

                if combined > availability.stock {
                    return Err(CartsServiceError::InsufficientStock(
                        StockShortfall::ExceedsRemaining {
                            requested: quantity,
                            remaining: availability.stock.saturating_sub(line.quantity),
                        },
                    ));
                }

                if combined > MAX_LINE_QUANTITY {
                    return Err(CartsServiceError::LineLimitExceeded {
                        requested: quantity,
                        remaining: MAX_LINE_QUANTITY.saturating_sub(line.quantity),
                    });
                }

                line.quantity = combined;
                line.price = availability.price;
            }
            None => self.items.push(CartItemRecord {
                product_uuid: product,
                quantity,
                price: availability.price,
            }),
        }

        self.recalculate();

        Ok(())
    }

    /// Overwrite the quantity of an existing line and refresh its price.
    pub fn set_quantity(
        &mut self,
        product: ProductUuid,
        quantity: u32,
        availability: ProductAvailability,
    ) -> Result<(), CartsServiceError> {
        check_quantity(quantity, 1)?;

        let line = self
            .items
            .iter_mut()
            .find(|item| item.product_uuid == product)
            .ok_or(CartsServiceError::ItemNotFound)?;

        if quantity > availability.stock {
            return Err(CartsServiceError::InsufficientStock(
                StockShortfall::Exceeds {
                    available: availability.stock,
                },
            ));
        }

        line.quantity = quantity;
        line.price = availability.price;

        self.recalculate();

        Ok(())
    }

    /// Remove the line for a product.
    pub fn remove_item(&mut self, product: ProductUuid) -> Result<(), CartsServiceError> {
        let position = self
            .items
            .iter()
            .position(|item| item.product_uuid == product)
            .ok_or(CartsServiceError::ItemNotFound)?;

        self.items.remove(position);
        self.recalculate();

        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.recalculate();
    }

    /// Recompute `total_items` and `total_amount` from the lines.
    pub fn recalculate(&mut self) {
        self.total_items = self
            .items
            .iter()
            .fold(0_u32, |total, item| total.saturating_add(item.quantity));

        self.total_amount = self
            .items
            .iter()
            .fold(0_u64, |total, item| total.saturating_add(item.subtotal()));
    }
}

/// Reject quantities outside `min..=MAX_LINE_QUANTITY`.
pub(crate) fn check_quantity(quantity: u32, min: u32) -> Result<(), CartsServiceError> {
    if (min..=MAX_LINE_QUANTITY).contains(&quantity) {
        Ok(())
    } else {
        Err(CartsServiceError::InvalidQuantity {
            min,
            max: MAX_LINE_QUANTITY,
        })
    }
}
