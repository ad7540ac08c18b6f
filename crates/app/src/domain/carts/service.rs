//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{CartLine, CartSummary, CartView},
            records::{CartRecord, check_quantity},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        products::{
            records::{ProductSummary, ProductUuid},
            repository::PgProductsRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }

    /// Load the user's cart with its lines, locked for the rest of the
    /// transaction.
    async fn load_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        let Some(mut cart) = self.carts_repository.lock_cart(tx, user).await? else {
            return Ok(None);
        };

        cart.items = self.items_repository.get_cart_items(tx, cart.uuid).await?;

        Ok(Some(cart))
    }

    /// Write the cart header and lines, returning the stored header.
    async fn store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut cart: CartRecord,
    ) -> Result<CartRecord, sqlx::Error> {
        let stored = self.carts_repository.save_cart(tx, &cart).await?;

        self.items_repository
            .replace_cart_items(tx, stored.uuid, &cart.items)
            .await?;

        cart.uuid = stored.uuid;
        cart.created_at = stored.created_at;
        cart.updated_at = stored.updated_at;

        Ok(cart)
    }

    /// Attach current product details to each line, hiding lines whose
    /// product is gone or inactive. Totals are the stored ones.
    async fn resolve(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: &CartRecord,
    ) -> Result<CartView, sqlx::Error> {
        let uuids: Vec<ProductUuid> = cart.items.iter().map(|item| item.product_uuid).collect();

        let mut summaries: FxHashMap<ProductUuid, ProductSummary> = self
            .products_repository
            .get_summaries(tx, &uuids)
            .await?
            .into_iter()
            .map(|summary| (summary.uuid, summary))
            .collect();

        let items = cart
            .items
            .iter()
            .filter_map(|item| {
                let product = summaries
                    .remove(&item.product_uuid)
                    .filter(|product| product.is_active)?;

                Some(CartLine {
                    product,
                    quantity: item.quantity,
                    price: item.price,
                })
            })
            .collect();

        Ok(CartView {
            items,
            total_items: cart.total_items,
            total_amount: cart.total_amount,
        })
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let Some(mut cart) = self.carts_repository.find_cart(&mut tx, user).await? else {
            tx.commit().await?;

            return Ok(CartView::empty());
        };

        cart.items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        let view = self.resolve(&mut tx, &cart).await?;

        tx.commit().await?;

        Ok(view)
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self),
        fields(user_uuid = %user, product_uuid = %product, total_items = tracing::field::Empty),
        err
    )]
    async fn add_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartView, CartsServiceError> {
        check_quantity(quantity, 1)?;

        let mut tx = self.db.begin_transaction().await?;

        let availability = self
            .products_repository
            .get_availability(&mut tx, product)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        // Rolled back with everything else when the add is rejected.
        self.carts_repository
            .create_cart_if_absent(&mut tx, user)
            .await?;

        let mut cart = self
            .load_for_update(&mut tx, user)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        cart.add_item(product, quantity, availability)?;

        let cart = self.store(&mut tx, cart).await?;
        let view = self.resolve(&mut tx, &cart).await?;

        tx.commit().await?;

        tracing::Span::current().record("total_items", cart.total_items);

        Ok(view)
    }

    #[tracing::instrument(
        name = "carts.service.update_item",
        skip(self),
        fields(user_uuid = %user, product_uuid = %product, total_items = tracing::field::Empty),
        err
    )]
    async fn update_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartView, CartsServiceError> {
        check_quantity(quantity, 0)?;

        let mut tx = self.db.begin_transaction().await?;

        let mut cart = self
            .load_for_update(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::ItemNotFound)?;

        if quantity == 0 {
            cart.remove_item(product)?;
        } else {
            if cart.line(product).is_none() {
                return Err(CartsServiceError::ItemNotFound);
            }

            let availability = self
                .products_repository
                .get_availability(&mut tx, product)
                .await?
                .ok_or(CartsServiceError::ProductNotFound)?;

            cart.set_quantity(product, quantity, availability)?;
        }

        let cart = self.store(&mut tx, cart).await?;
        let view = self.resolve(&mut tx, &cart).await?;

        tx.commit().await?;

        tracing::Span::current().record("total_items", cart.total_items);

        Ok(view)
    }

    #[tracing::instrument(
        name = "carts.service.remove_item",
        skip(self),
        fields(user_uuid = %user, product_uuid = %product),
        err
    )]
    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut cart = self
            .load_for_update(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::ItemNotFound)?;

        cart.remove_item(product)?;

        let cart = self.store(&mut tx, cart).await?;
        let view = self.resolve(&mut tx, &cart).await?;

        tx.commit().await?;

        Ok(view)
    }

    #[tracing::instrument(
        name = "carts.service.clear_cart",
        skip(self),
        fields(user_uuid = %user),
        err
    )]
    async fn clear_cart(&self, user: UserUuid) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        if let Some(mut cart) = self.load_for_update(&mut tx, user).await? {
            cart.clear();

            self.store(&mut tx, cart).await?;
        }

        tx.commit().await?;

        Ok(CartView::empty())
    }

    async fn summary(&self, user: UserUuid) -> Result<CartSummary, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self.carts_repository.find_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart.as_ref().map(CartSummary::from).unwrap_or_default())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The user's cart with product details; empty when none is stored.
    async fn get_cart(&self, user: UserUuid) -> Result<CartView, CartsServiceError>;

    /// Add units of a product, creating the cart on first use.
    async fn add_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartView, CartsServiceError>;

    /// Set the quantity of an existing line; zero removes it.
    async fn update_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartView, CartsServiceError>;

    /// Remove the line for a product.
    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<CartView, CartsServiceError>;

    /// Remove every line. A user without a cart gets an empty view and no
    /// cart is created.
    async fn clear_cart(&self, user: UserUuid) -> Result<CartView, CartsServiceError>;

    /// Stored totals only.
    async fn summary(&self, user: UserUuid) -> Result<CartSummary, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::products::{data::ProductUpdate, service::ProductsService},
        test::{
            TestContext,
            helpers::{create_customer, new_product},
        },
    };

    use super::*;

    #[tokio::test]
    async fn get_cart_without_cart_is_empty() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx).await?;

        let view = ctx.carts.get_cart(user).await?;

        assert_eq!(view, CartView::empty());

        let summary = ctx.carts.summary(user).await?;

        assert_eq!(summary, CartSummary::default());

        Ok(())
    }

    #[tokio::test]
    async fn add_item_merges_lines_and_persists_totals() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx).await?;
        let product = ProductUuid::new();

        ctx.products
            .create_product(new_product(product, 1_200, 20))
            .await?;

        ctx.carts.add_item(user, product, 2).await?;
        let view = ctx.carts.add_item(user, product, 3).await?;

        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items.first().map(|line| line.quantity), Some(5));
        assert_eq!(view.total_items, 5);
        assert_eq!(view.total_amount, 6_000);

        let reloaded = ctx.carts.get_cart(user).await?;

        assert_eq!(reloaded, view);

        let summary = ctx.carts.summary(user).await?;

        assert_eq!(summary.total_items, 5);
        assert_eq!(summary.formatted_total(), "60.00");

        Ok(())
    }

    #[tokio::test]
    async fn add_item_unknown_product_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx).await?;

        let result = ctx.carts.add_item(user, ProductUuid::new(), 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_item_rejects_exceeding_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx).await?;
        let product = ProductUuid::new();

        ctx.products.create_product(new_product(product, 500, 5)).await?;
        ctx.carts.add_item(user, product, 3).await?;

        let result = ctx.carts.add_item(user, product, 3).await;

        assert!(
            matches!(&result, Err(error)
                if error.to_string() == "Cannot add 3 more items. Only 2 more available."),
            "unexpected result {result:?}"
        );

        let view = ctx.carts.get_cart(user).await?;

        assert_eq!(view.total_items, 3);

        Ok(())
    }

    #[tokio::test]
    async fn rejected_add_leaves_stored_cart_unchanged() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx).await?;
        let product = ProductUuid::new();
        let scarce = ProductUuid::new();

        ctx.products.create_product(new_product(product, 700, 50)).await?;
        ctx.products.create_product(new_product(scarce, 900, 1)).await?;
        ctx.carts.add_item(user, product, 9).await?;

        let before = ctx.carts.get_cart(user).await?;

        for result in [
            ctx.carts.add_item(user, product, 2).await,
            ctx.carts.add_item(user, scarce, 2).await,
            ctx.carts.add_item(user, ProductUuid::new(), 1).await,
        ] {
            assert!(result.is_err(), "expected a rejection, got {result:?}");
        }

        assert_eq!(ctx.carts.get_cart(user).await?, before);
        assert_eq!(
            ctx.carts.summary(user).await?,
            CartSummary {
                total_items: 9,
                total_amount: 6_300,
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn rejected_first_add_does_not_create_a_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx).await?;
        let product = ProductUuid::new();

        ctx.products.create_product(new_product(product, 100, 1)).await?;

        let result = ctx.carts.add_item(user, product, 2).await;

        assert!(
            matches!(result, Err(CartsServiceError::InsufficientStock(_))),
            "expected InsufficientStock, got {result:?}"
        );

        let stored: i64 = sqlx::query_scalar("SELECT count(*) FROM carts WHERE user_uuid = $1")
            .bind(user.into_uuid())
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(stored, 0);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_first_adds_keep_both_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx).await?;
        let first = ProductUuid::new();
        let second = ProductUuid::new();

        ctx.products.create_product(new_product(first, 100, 10)).await?;
        ctx.products.create_product(new_product(second, 200, 10)).await?;

        let (a, b) = tokio::join!(
            ctx.carts.add_item(user, first, 1),
            ctx.carts.add_item(user, second, 2),
        );

        a?;
        b?;

        let view = ctx.carts.get_cart(user).await?;

        assert_eq!(view.items.len(), 2);
        assert_eq!(view.total_items, 3);
        assert_eq!(view.total_amount, 500);

        Ok(())
    }

    #[tokio::test]
    async fn update_to_zero_removes_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx).await?;
        let product = ProductUuid::new();

        ctx.products.create_product(new_product(product, 800, 5)).await?;
        ctx.carts.add_item(user, product, 2).await?;

        let view = ctx.carts.update_item(user, product, 0).await?;

        assert!(view.items.is_empty(), "line should be removed");
        assert_eq!((view.total_items, view.total_amount), (0, 0));

        Ok(())
    }

    #[tokio::test]
    async fn update_to_zero_matches_remove() -> TestResult {
        let ctx = TestContext::new().await;
        let updated_user = create_customer(&ctx).await?;
        let removed_user = create_customer(&ctx).await?;
        let kept = ProductUuid::new();
        let dropped = ProductUuid::new();

        ctx.products.create_product(new_product(kept, 300, 10)).await?;
        ctx.products.create_product(new_product(dropped, 450, 10)).await?;

        for user in [updated_user, removed_user] {
            ctx.carts.add_item(user, kept, 2).await?;
            ctx.carts.add_item(user, dropped, 3).await?;
        }

        let updated = ctx.carts.update_item(updated_user, dropped, 0).await?;
        let removed = ctx.carts.remove_item(removed_user, dropped).await?;

        assert_eq!(updated, removed);
        assert_eq!(
            ctx.carts.summary(updated_user).await?,
            ctx.carts.summary(removed_user).await?
        );
        assert_eq!((updated.total_items, updated.total_amount), (2, 600));

        Ok(())
    }

    #[tokio::test]
    async fn update_without_cart_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx).await?;

        let result = ctx.carts.update_item(user, ProductUuid::new(), 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::ItemNotFound)),
            "expected ItemNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_refreshes_line_price() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx).await?;
        let product = ProductUuid::new();

        ctx.products
            .create_product(new_product(product, 1_000, 10))
            .await?;
        ctx.carts.add_item(user, product, 2).await?;

        ctx.products
            .update_product(
                product,
                ProductUpdate {
                    price: Some(1_500),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        let unchanged = ctx.carts.get_cart(user).await?;

        assert_eq!(unchanged.total_amount, 2_000, "reads keep captured prices");

        let view = ctx.carts.update_item(user, product, 3).await?;

        assert_eq!(view.items.first().map(|line| line.price), Some(1_500));
        assert_eq!(view.total_amount, 4_500);

        Ok(())
    }

    #[tokio::test]
    async fn inactive_products_are_hidden_but_keep_totals() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx).await?;
        let kept = ProductUuid::new();
        let retired = ProductUuid::new();

        ctx.products.create_product(new_product(kept, 100, 5)).await?;
        ctx.products.create_product(new_product(retired, 200, 5)).await?;
        ctx.carts.add_item(user, kept, 1).await?;
        ctx.carts.add_item(user, retired, 1).await?;

        ctx.products.delete_product(retired).await?;

        let view = ctx.carts.get_cart(user).await?;
        let shown: Vec<ProductUuid> = view.items.iter().map(|line| line.product.uuid).collect();

        assert_eq!(shown, vec![kept]);
        assert_eq!(view.total_items, 2);
        assert_eq!(view.total_amount, 300);

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_missing_line_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx).await?;
        let product = ProductUuid::new();

        ctx.products.create_product(new_product(product, 100, 5)).await?;
        ctx.carts.add_item(user, product, 1).await?;

        let result = ctx.carts.remove_item(user, ProductUuid::new()).await;

        assert!(
            matches!(result, Err(CartsServiceError::ItemNotFound)),
            "expected ItemNotFound, got {result:?}"
        );

        let view = ctx.carts.remove_item(user, product).await?;

        assert!(view.items.is_empty(), "line should be removed");

        Ok(())
    }

    #[tokio::test]
    async fn clear_cart_empties_stored_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx).await?;
        let product = ProductUuid::new();

        let empty = ctx.carts.clear_cart(user).await?;

        assert_eq!(empty, CartView::empty());

        ctx.products.create_product(new_product(product, 100, 5)).await?;
        ctx.carts.add_item(user, product, 4).await?;

        let cleared = ctx.carts.clear_cart(user).await?;

        assert_eq!(cleared, CartView::empty());
        assert_eq!(ctx.carts.summary(user).await?, CartSummary::default());

        Ok(())
    }
}
