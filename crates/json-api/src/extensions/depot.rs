//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use storefront_app::auth::Principal;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Store the authenticated caller for downstream handlers.
    fn insert_principal(&mut self, principal: Principal);

    /// The authenticated caller, or 401 when the auth hoop did not run.
    fn principal_or_401(&self) -> Result<Principal, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_principal(&mut self, principal: Principal) {
        self.inject(principal);
    }

    fn principal_or_401(&self) -> Result<Principal, StatusError> {
        self.obtain::<Principal>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}

#[cfg(test)]
mod tests {
    use storefront_app::domain::users::records::{Role, UserUuid};

    use super::*;

    #[test]
    fn missing_principal_is_unauthorized() {
        let depot = Depot::new();

        let result = depot.principal_or_401();

        assert!(
            result.is_err_and(|error| error.code == salvo::http::StatusCode::UNAUTHORIZED),
            "expected 401"
        );
    }

    #[test]
    fn inserted_principal_is_returned() {
        let mut depot = Depot::new();
        let principal = Principal {
            user_uuid: UserUuid::new(),
            role: Role::Customer,
        };

        depot.insert_principal(principal);

        assert_eq!(depot.principal_or_401().ok(), Some(principal));
    }
}
