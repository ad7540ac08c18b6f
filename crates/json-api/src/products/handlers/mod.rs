//! Product Handlers

pub(crate) mod category;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod featured;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod search;
pub(crate) mod update;
