//! Cart Models
//!
//! Read views of a cart with product details resolved at read time.

use rust_decimal::Decimal;

use crate::domain::{carts::records::CartRecord, products::records::ProductSummary};

/// Cart as presented to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartView {
    /// Lines whose product still exists and is active, in insertion order.
    pub items: Vec<CartLine>,
    pub total_items: u32,
    pub total_amount: u64,
}

/// Cart line with product details resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product: ProductSummary,
    pub quantity: u32,
    /// Unit price captured when the line was last written.
    pub price: u64,
}

/// Cart totals without line details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartSummary {
    pub total_items: u32,
    pub total_amount: u64,
}

impl CartView {
    /// The view of a user with no cart, or with an emptied one.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

impl CartSummary {
    /// Total amount in major units with exactly two decimals, e.g. `"24.00"`.
    #[must_use]
    pub fn formatted_total(&self) -> String {
        format_amount(self.total_amount)
    }
}

impl From<&CartRecord> for CartSummary {
    fn from(cart: &CartRecord) -> Self {
        Self {
            total_items: cart.total_items,
            total_amount: cart.total_amount,
        }
    }
}

/// Format a minor-unit amount as a decimal string with two places.
#[must_use]
pub fn format_amount(amount: u64) -> String {
    let mut decimal = Decimal::from_i128_with_scale(i128::from(amount), 2);

    decimal.rescale(2);

    decimal.to_string()
}
