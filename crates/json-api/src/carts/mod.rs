//! Cart

pub(crate) mod errors;
mod handlers;
pub(crate) mod models;
mod requests;

pub(crate) use handlers::*;
