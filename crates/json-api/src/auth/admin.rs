//! Admin guard.
//!
//! Runs after [`super::middleware::handler`] and rejects callers whose role is
//! not admin.

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

    if !principal.is_admin() {
        res.render(StatusError::forbidden().brief("Access denied. Admin privileges required."));
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use storefront_app::domain::users::records::Role;

    use crate::test_helpers::inject_principal;

    use super::*;

    #[salvo::handler]
    async fn ok(res: &mut Response) {
        res.render("ok");
    }

    #[tokio::test]
    async fn test_customer_is_forbidden() -> TestResult {
        let service = Service::new(
            Router::new()
                .hoop(inject_principal(Role::Customer))
                .hoop(handler)
                .get(ok),
        );

        let res = TestClient::get("http://example.com").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_passes_through() -> TestResult {
        let service = Service::new(
            Router::new()
                .hoop(inject_principal(Role::Admin))
                .hoop(handler)
                .get(ok),
        );

        let res = TestClient::get("http://example.com").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_principal_is_unauthorized() -> TestResult {
        let service = Service::new(Router::new().hoop(handler).get(ok));

        let res = TestClient::get("http://example.com").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
