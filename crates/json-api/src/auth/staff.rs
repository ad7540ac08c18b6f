//! Staff guard.
//!
//! Runs after [`super::middleware::handler`] and admits staff, managers and
//! admins.

use salvo::prelude::*;

use crate::extensions::*;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let principal = match depot.principal_or_401() {
        Ok(principal) => principal,
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    if !principal.is_staff() {
        res.render(StatusError::forbidden().brief("Access denied. Staff privileges required."));
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}
