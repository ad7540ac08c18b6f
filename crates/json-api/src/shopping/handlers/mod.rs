//! Shopping Item Handlers

pub(crate) mod availability;
pub(crate) mod categories;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;
