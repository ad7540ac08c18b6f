//! Result helpers for handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;

/// Turn infrastructure failures into a bare 500, keeping the detail in the
/// logs only.
pub(crate) trait ResultExt<T> {
    fn or_500(self, context: &'static str) -> Result<T, StatusError>;
}

impl<T, E: Display> ResultExt<T> for Result<T, E> {
    fn or_500(self, context: &'static str) -> Result<T, StatusError> {
        self.map_err(|error| {
            tracing::error!(%error, "{context}");

            StatusError::internal_server_error()
        })
    }
}
