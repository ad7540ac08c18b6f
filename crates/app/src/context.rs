//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        products::{PgProductsService, ProductsService},
        shopping_items::{PgShoppingItemsService, ShoppingItemsService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub shopping_items: Arc<dyn ShoppingItemsService>,
    pub users: Arc<dyn UsersService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL, applying pending
    /// migrations first.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating
    /// the schema fails.
    pub async fn from_database_url(url: &str, max_connections: u32) -> Result<Self, AppInitError> {
        let pool = database::connect(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        let db = Db::new(pool.clone());

        Ok(Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            shopping_items: Arc::new(PgShoppingItemsService::new(db.clone())),
            users: Arc::new(PgUsersService::new(db)),
            auth: Arc::new(PgAuthService::new(pool)),
        })
    }
}
