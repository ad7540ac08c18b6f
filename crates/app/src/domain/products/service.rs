//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductUpdate},
        errors::ProductsServiceError,
        filter::{Pagination, ProductFilter, ProductPage},
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    #[tracing::instrument(
        name = "products.service.list_products",
        skip(self, filter),
        fields(page = filter.page, limit = filter.limit, total = tracing::field::Empty),
        err
    )]
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<ProductPage, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.list_products(&mut tx, &filter).await?;
        let total = self.repository.count_products(&mut tx, &filter).await?;

        tx.commit().await?;

        tracing::Span::current().record("total", total);

        let pagination = Pagination::new(&filter, products.len(), total);

        Ok(ProductPage {
            products,
            pagination,
        })
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    #[tracing::instrument(
        name = "products.service.create_product",
        skip(self, product),
        fields(product_uuid = %product.uuid),
        err
    )]
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let product = product.normalise()?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        tx.commit().await?;

        Ok(created)
    }

    #[tracing::instrument(
        name = "products.service.update_product",
        skip(self, update),
        fields(product_uuid = %product),
        err
    )]
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let update = update.normalise()?;

        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "products.service.delete_product",
        skip(self),
        fields(product_uuid = %product),
        err
    )]
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve one page of active products matching the filter.
    async fn list_products(&self, filter: ProductFilter)
    -> Result<ProductPage, ProductsServiceError>;

    /// Retrieve a single active product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Applies a partial update to a product, active or not.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-deletes a product by marking it inactive.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            products::{
                filter::{ProductQuery, SortField, SortOrder},
                records::{Category, Specifications},
            },
            users::records::Role,
        },
        test::{
            TestContext,
            helpers::{create_user_with_role, new_product},
        },
    };

    use super::*;

    #[tokio::test]
    async fn create_product_returns_stored_record() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        let product = ctx.products.create_product(new_product(uuid, 999, 10)).await?;

        assert_eq!(product.uuid, uuid);
        assert_eq!(product.price, 999);
        assert_eq!(product.stock, 10);
        assert!(product.is_active, "new products are active");
        assert_eq!(product.images, vec![product.main_image.clone()]);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_records_author_and_specifications() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = create_user_with_role(&ctx, Role::Admin).await?;

        let mut product = new_product(ProductUuid::new(), 2_200, 8);
        product.created_by = Some(admin);
        product.specifications = Specifications {
            volume: Some("50ml".to_string()),
            skin_types: vec!["dry".to_string(), "normal".to_string()],
            how_to_use: Some("Apply morning and night.".to_string()),
            ..Specifications::default()
        };

        let created = ctx.products.create_product(product).await?;

        assert_eq!(created.created_by, Some(admin));
        assert_eq!(created.updated_by, None);
        assert_eq!(created.specifications.volume.as_deref(), Some("50ml"));
        assert_eq!(created.specifications.skin_types, vec!["dry", "normal"]);
        assert_eq!(created.ratings.count, 0);
        assert!(created.ratings.average.abs() < f64::EPSILON, "new products are unrated");

        Ok(())
    }

    #[tokio::test]
    async fn update_product_replaces_specifications_only_when_given() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = create_user_with_role(&ctx, Role::Admin).await?;
        let uuid = ProductUuid::new();

        let mut product = new_product(uuid, 1_000, 4);
        product.specifications.weight = Some("120g".to_string());

        ctx.products.create_product(product).await?;

        let kept = ctx
            .products
            .update_product(
                uuid,
                ProductUpdate {
                    stock: Some(6),
                    updated_by: Some(admin),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(kept.specifications.weight.as_deref(), Some("120g"));
        assert_eq!(kept.updated_by, Some(admin));

        let replaced = ctx
            .products
            .update_product(
                uuid,
                ProductUpdate {
                    specifications: Some(Specifications {
                        benefits: vec!["brightening".to_string()],
                        ..Specifications::default()
                    }),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(replaced.specifications.weight, None);
        assert_eq!(replaced.specifications.benefits, vec!["brightening"]);
        assert_eq!(replaced.updated_by, Some(admin), "author is kept when not given");

        Ok(())
    }

    #[tokio::test]
    async fn create_product_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products.create_product(new_product(uuid, 100, 1)).await?;

        let result = ctx.products.create_product(new_product(uuid, 200, 1)).await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_product_applies_only_given_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        let created = ctx.products.create_product(new_product(uuid, 500, 3)).await?;

        let updated = ctx
            .products
            .update_product(
                uuid,
                ProductUpdate {
                    price: Some(750),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.price, 750);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.stock, created.stock);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .update_product(ProductUuid::new(), ProductUpdate::default())
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_product_hides_it_from_reads() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products.create_product(new_product(uuid, 300, 2)).await?;
        ctx.products.delete_product(uuid).await?;

        let result = ctx.products.get_product(uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        let page = ctx.products.list_products(ProductFilter::default()).await?;

        assert!(
            !page.products.iter().any(|p| p.uuid == uuid),
            "deleted product should not appear in list"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.delete_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_filters_sorts_and_paginates() -> TestResult {
        let ctx = TestContext::new().await;

        for price in [300, 100, 200] {
            ctx.products
                .create_product(new_product(ProductUuid::new(), price, 5))
                .await?;
        }

        let mut fragrance = new_product(ProductUuid::new(), 50, 5);
        fragrance.category = Category::Fragrance;

        ctx.products.create_product(fragrance).await?;

        let filter = ProductFilter::from_query(ProductQuery {
            category: Some("skincare".to_string()),
            sort_by: Some("price".to_string()),
            sort_order: Some("asc".to_string()),
            limit: Some(2),
            ..ProductQuery::default()
        })?;

        assert_eq!(filter.sort_field, SortField::Price);
        assert_eq!(filter.sort_order, SortOrder::Asc);

        let page = ctx.products.list_products(filter).await?;
        let prices: Vec<u64> = page.products.iter().map(|p| p.price).collect();

        assert_eq!(prices, vec![100, 200]);
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.pages, 2);
        assert!(page.pagination.has_next, "third skincare product is on page 2");

        Ok(())
    }

    #[tokio::test]
    async fn search_matches_name_and_brand() -> TestResult {
        let ctx = TestContext::new().await;

        let mut serum = new_product(ProductUuid::new(), 2_400, 5);
        serum.name = "Vitamin C Serum".to_string();

        ctx.products.create_product(serum).await?;
        ctx.products
            .create_product(new_product(ProductUuid::new(), 1_000, 5))
            .await?;

        let page = ctx
            .products
            .list_products(ProductFilter::for_search("serum", ProductQuery::default())?)
            .await?;

        assert_eq!(page.products.len(), 1);
        assert_eq!(page.products.first().map(|p| p.name.as_str()), Some("Vitamin C Serum"));

        Ok(())
    }

    #[tokio::test]
    async fn featured_lists_only_featured_products() -> TestResult {
        let ctx = TestContext::new().await;

        let mut featured = new_product(ProductUuid::new(), 1_000, 5);
        featured.is_featured = true;
        let featured_uuid = featured.uuid;

        ctx.products.create_product(featured).await?;
        ctx.products
            .create_product(new_product(ProductUuid::new(), 1_000, 5))
            .await?;

        let page = ctx
            .products
            .list_products(ProductFilter::featured(None)?)
            .await?;

        let uuids: Vec<ProductUuid> = page.products.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![featured_uuid]);

        Ok(())
    }
}
