//! Bearer token authentication hoop.
//!
//! Resolves `Authorization: Bearer <token>` to a [`Principal`] and stores it in
//! the depot for the handlers below.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};

use storefront_app::auth::{AuthServiceError, Principal};

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let result = match (bearer_token(req), depot.obtain_or_500::<Arc<State>>()) {
        (None, _) => {
            Err(StatusError::unauthorized().brief("Missing or invalid Authorization header"))
        }
        (Some(_), Err(error)) => Err(error),
        (Some(token), Ok(state)) => authenticate(state, token).await,
    };

    match result {
        Ok(principal) => {
            depot.insert_principal(principal);
            ctrl.call_next(req, depot, res).await;
        }
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();
        }
    }
}

async fn authenticate(state: &State, token: &str) -> Result<Principal, StatusError> {
    state
        .app
        .auth
        .authenticate_bearer(token)
        .await
        .map_err(into_status_error)
}

fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::NotFound => StatusError::unauthorized().brief("Invalid API token"),
        error @ (AuthServiceError::UnknownUser
        | AuthServiceError::Sql(_)
        | AuthServiceError::Token(_)) => {
            tracing::error!(%error, "failed to authenticate bearer token");

            StatusError::internal_server_error()
        }
    }
}

fn bearer_token(req: &Request) -> Option<&str> {
    let (scheme, token) = req
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_once(' ')?;

    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
