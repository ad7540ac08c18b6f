//! Cart Response Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::models::{CartLine, CartSummary, CartView};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    /// Lines in insertion order
    pub items: Vec<CartItemResponse>,

    /// Sum of line subtotals in pence/cents
    pub total_amount: u64,

    /// Sum of line quantities
    pub total_items: u32,
}

impl From<CartView> for CartResponse {
    fn from(cart: CartView) -> Self {
        Self {
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            total_amount: cart.total_amount,
            total_items: cart.total_items,
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The product on this line
    pub product: CartProductResponse,

    /// Units of the product
    pub quantity: u32,

    /// Unit price captured when the line was last written, in pence/cents
    pub price: u64,
}

impl From<CartLine> for CartItemResponse {
    fn from(line: CartLine) -> Self {
        Self {
            product: CartProductResponse {
                uuid: line.product.uuid.into_uuid(),
                name: line.product.name,
                price: line.product.price,
                main_image: line.product.main_image,
                stock: line.product.stock,
                is_active: line.product.is_active,
            },
            quantity: line.quantity,
            price: line.price,
        }
    }
}

/// Product details shown on a cart line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartProductResponse {
    pub uuid: Uuid,
    pub name: String,

    /// Current catalog price in pence/cents
    pub price: u64,
    pub main_image: String,
    pub stock: u32,
    pub is_active: bool,
}

/// Cart Envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartEnvelope {
    pub cart: CartResponse,
}

/// Cart Changed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartChangedResponse {
    /// Human-readable outcome
    pub message: String,

    /// The cart after the change
    pub cart: CartResponse,
}

impl CartChangedResponse {
    pub(crate) fn new(message: &str, cart: CartView) -> Self {
        Self {
            message: message.to_string(),
            cart: cart.into(),
        }
    }
}

/// Cart Summary Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartSummaryResponse {
    pub total_items: u32,

    /// Total in pence/cents
    pub total_amount: u64,

    /// Total in major units with two decimals, e.g. `"24.00"`
    pub formatted_total: String,
}

impl From<CartSummary> for CartSummaryResponse {
    fn from(summary: CartSummary) -> Self {
        Self {
            total_items: summary.total_items,
            total_amount: summary.total_amount,
            formatted_total: summary.formatted_total(),
        }
    }
}
