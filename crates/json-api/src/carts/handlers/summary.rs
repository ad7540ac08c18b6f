//! Cart Summary Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_status_error, models::CartSummaryResponse},
    extensions::*,
    state::State,
};

/// Cart Summary Handler
///
/// Returns stored totals without line details.
#[endpoint(
    tags("cart"),
    summary = "Cart Summary",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart totals"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartSummaryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let summary = state
        .app
        .carts
        .summary(principal.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}
