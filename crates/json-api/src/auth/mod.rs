//! Authentication

pub(crate) mod admin;
pub(crate) mod middleware;
pub(crate) mod staff;
