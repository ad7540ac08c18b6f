//! Shopping items service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        shopping_items::{
            data::{NewShoppingItem, ShoppingItemUpdate},
            errors::ShoppingItemsServiceError,
            filter::{ShoppingItemFilter, ShoppingItemPage},
            records::{CategoryCount, ShoppingItemRecord, ShoppingItemUuid},
            repository::PgShoppingItemsRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgShoppingItemsService {
    db: Db,
    repository: PgShoppingItemsRepository,
}

impl PgShoppingItemsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgShoppingItemsRepository::new(),
        }
    }
}

#[async_trait]
impl ShoppingItemsService for PgShoppingItemsService {
    #[tracing::instrument(
        name = "shopping_items.service.list_items",
        skip(self, filter),
        fields(page = filter.page, limit = filter.limit, total = tracing::field::Empty),
        err
    )]
    async fn list_items(
        &self,
        filter: ShoppingItemFilter,
    ) -> Result<ShoppingItemPage, ShoppingItemsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let items = self.repository.list_items(&mut tx, &filter).await?;
        let total = self.repository.count_items(&mut tx, &filter).await?;

        tx.commit().await?;

        tracing::Span::current().record("total", total);

        Ok(ShoppingItemPage::new(&filter, items, total))
    }

    async fn get_item(
        &self,
        item: ShoppingItemUuid,
    ) -> Result<ShoppingItemRecord, ShoppingItemsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let item = self.repository.get_item(&mut tx, item).await?;

        tx.commit().await?;

        Ok(item)
    }

    #[tracing::instrument(
        name = "shopping_items.service.create_item",
        skip(self, item),
        fields(item_uuid = %item.uuid, created_by = %item.created_by),
        err
    )]
    async fn create_item(
        &self,
        item: NewShoppingItem,
    ) -> Result<ShoppingItemRecord, ShoppingItemsServiceError> {
        let item = item.normalise()?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_item(&mut tx, &item).await?;

        tx.commit().await?;

        Ok(created)
    }

    #[tracing::instrument(
        name = "shopping_items.service.update_item",
        skip(self, update),
        fields(item_uuid = %item, updated_by = %update.updated_by),
        err
    )]
    async fn update_item(
        &self,
        item: ShoppingItemUuid,
        update: ShoppingItemUpdate,
    ) -> Result<ShoppingItemRecord, ShoppingItemsServiceError> {
        let update = update.normalise()?;

        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.update_item(&mut tx, item, &update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "shopping_items.service.toggle_availability",
        skip(self),
        fields(item_uuid = %item, updated_by = %updated_by),
        err
    )]
    async fn toggle_availability(
        &self,
        item: ShoppingItemUuid,
        updated_by: UserUuid,
    ) -> Result<ShoppingItemRecord, ShoppingItemsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let toggled = self
            .repository
            .toggle_availability(&mut tx, item, updated_by)
            .await?;

        tx.commit().await?;

        Ok(toggled)
    }

    #[tracing::instrument(
        name = "shopping_items.service.delete_item",
        skip(self),
        fields(item_uuid = %item),
        err
    )]
    async fn delete_item(&self, item: ShoppingItemUuid) -> Result<(), ShoppingItemsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_item(&mut tx, item).await?;

        if rows_affected == 0 {
            return Err(ShoppingItemsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn categories(&self) -> Result<Vec<CategoryCount>, ShoppingItemsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let categories = self.repository.count_by_category(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }
}

#[automock]
#[async_trait]
pub trait ShoppingItemsService: Send + Sync {
    /// Retrieve one page of shopping items matching the filter.
    async fn list_items(
        &self,
        filter: ShoppingItemFilter,
    ) -> Result<ShoppingItemPage, ShoppingItemsServiceError>;

    /// Retrieve a single shopping item, available or not.
    async fn get_item(
        &self,
        item: ShoppingItemUuid,
    ) -> Result<ShoppingItemRecord, ShoppingItemsServiceError>;

    async fn create_item(
        &self,
        item: NewShoppingItem,
    ) -> Result<ShoppingItemRecord, ShoppingItemsServiceError>;

    /// Applies a partial update and records who made it.
    async fn update_item(
        &self,
        item: ShoppingItemUuid,
        update: ShoppingItemUpdate,
    ) -> Result<ShoppingItemRecord, ShoppingItemsServiceError>;

    /// Flips whether the item can be bought.
    async fn toggle_availability(
        &self,
        item: ShoppingItemUuid,
        updated_by: UserUuid,
    ) -> Result<ShoppingItemRecord, ShoppingItemsServiceError>;

    /// Permanently removes an item.
    async fn delete_item(&self, item: ShoppingItemUuid) -> Result<(), ShoppingItemsServiceError>;

    /// Item counts per stored category, ordered by category name.
    async fn categories(&self) -> Result<Vec<CategoryCount>, ShoppingItemsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            shopping_items::{
                filter::ShoppingItemQuery,
                records::ShoppingCategory,
            },
            users::records::Role,
        },
        test::{
            TestContext,
            helpers::{create_user_with_role, new_shopping_item},
        },
    };

    use super::*;

    #[tokio::test]
    async fn create_item_is_available_and_records_author() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = create_user_with_role(&ctx, Role::Admin).await?;
        let uuid = ShoppingItemUuid::new();

        let item = ctx
            .shopping_items
            .create_item(new_shopping_item(uuid, admin, ShoppingCategory::Shirt, 2_500))
            .await?;

        assert_eq!(item.uuid, uuid);
        assert!(item.is_available, "new items are available");
        assert_eq!(item.created_by, Some(admin));
        assert_eq!(item.updated_by, None);

        Ok(())
    }

    #[tokio::test]
    async fn get_item_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.shopping_items.get_item(ShoppingItemUuid::new()).await;

        assert!(
            matches!(result, Err(ShoppingItemsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_item_applies_given_fields_and_author() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = create_user_with_role(&ctx, Role::Admin).await?;
        let editor = create_user_with_role(&ctx, Role::Admin).await?;
        let uuid = ShoppingItemUuid::new();

        let created = ctx
            .shopping_items
            .create_item(new_shopping_item(uuid, admin, ShoppingCategory::Skirt, 4_000))
            .await?;

        let updated = ctx
            .shopping_items
            .update_item(
                uuid,
                ShoppingItemUpdate {
                    price: Some(3_500),
                    is_popular: Some(true),
                    ..ShoppingItemUpdate::by(editor)
                },
            )
            .await?;

        assert_eq!(updated.price, 3_500);
        assert!(updated.is_popular, "popular flag should be set");
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.created_by, Some(admin));
        assert_eq!(updated.updated_by, Some(editor));

        Ok(())
    }

    #[tokio::test]
    async fn toggle_availability_flips_and_flips_back() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = create_user_with_role(&ctx, Role::Admin).await?;
        let staff = create_user_with_role(&ctx, Role::Staff).await?;
        let uuid = ShoppingItemUuid::new();

        ctx.shopping_items
            .create_item(new_shopping_item(uuid, admin, ShoppingCategory::Blouse, 1_900))
            .await?;

        let disabled = ctx.shopping_items.toggle_availability(uuid, staff).await?;

        assert!(!disabled.is_available, "first toggle disables");
        assert_eq!(disabled.updated_by, Some(staff));

        let enabled = ctx.shopping_items.toggle_availability(uuid, staff).await?;

        assert!(enabled.is_available, "second toggle enables");

        let missing = ctx
            .shopping_items
            .toggle_availability(ShoppingItemUuid::new(), staff)
            .await;

        assert!(
            matches!(missing, Err(ShoppingItemsServiceError::NotFound)),
            "expected NotFound, got {missing:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_item_removes_it() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = create_user_with_role(&ctx, Role::Admin).await?;
        let uuid = ShoppingItemUuid::new();

        ctx.shopping_items
            .create_item(new_shopping_item(uuid, admin, ShoppingCategory::Trouser, 5_000))
            .await?;
        ctx.shopping_items.delete_item(uuid).await?;

        let result = ctx.shopping_items.get_item(uuid).await;

        assert!(
            matches!(result, Err(ShoppingItemsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        let again = ctx.shopping_items.delete_item(uuid).await;

        assert!(
            matches!(again, Err(ShoppingItemsServiceError::NotFound)),
            "expected NotFound on second delete, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_items_filters_sorts_and_counts() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = create_user_with_role(&ctx, Role::Admin).await?;

        for price in [3_000, 1_000, 2_000] {
            ctx.shopping_items
                .create_item(new_shopping_item(
                    ShoppingItemUuid::new(),
                    admin,
                    ShoppingCategory::Shirt,
                    price,
                ))
                .await?;
        }

        ctx.shopping_items
            .create_item(new_shopping_item(
                ShoppingItemUuid::new(),
                admin,
                ShoppingCategory::Slippers,
                500,
            ))
            .await?;

        let filter = ShoppingItemFilter::from_query(ShoppingItemQuery {
            category: Some("shirt".to_string()),
            sort: Some("price".to_string()),
            limit: Some(2),
            ..ShoppingItemQuery::default()
        })?;

        let page = ctx.shopping_items.list_items(filter).await?;
        let prices: Vec<u64> = page.items.iter().map(|item| item.price).collect();

        assert_eq!(prices, vec![1_000, 2_000]);
        assert_eq!(page.total, 3);
        assert_eq!(page.pages, 2);

        Ok(())
    }

    #[tokio::test]
    async fn categories_count_available_items() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = create_user_with_role(&ctx, Role::Admin).await?;
        let hidden = ShoppingItemUuid::new();

        for (uuid, category) in [
            (hidden, ShoppingCategory::Shirt),
            (ShoppingItemUuid::new(), ShoppingCategory::Shirt),
            (ShoppingItemUuid::new(), ShoppingCategory::Blouse),
        ] {
            ctx.shopping_items
                .create_item(new_shopping_item(uuid, admin, category, 1_000))
                .await?;
        }

        ctx.shopping_items.toggle_availability(hidden, admin).await?;

        let categories = ctx.shopping_items.categories().await?;

        assert_eq!(
            categories,
            vec![
                CategoryCount {
                    category: ShoppingCategory::Blouse,
                    count: 1,
                    available_count: 1,
                },
                CategoryCount {
                    category: ShoppingCategory::Shirt,
                    count: 2,
                    available_count: 1,
                },
            ]
        );

        Ok(())
    }
}
