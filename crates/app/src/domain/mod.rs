//! Storefront Domain Concerns

pub mod carts;
pub mod products;
pub mod shopping_items;
pub mod users;
