//! Shopping Items
//!
//! A secondary catalog of apparel and accessories, browsed publicly and
//! maintained by staff.

pub mod data;
pub mod errors;
pub mod filter;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::ShoppingItemsServiceError;
pub use service::*;
