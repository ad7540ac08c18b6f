//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use smallvec::SmallVec;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::{amount_param, count_param, try_get_amount, try_get_count},
    domain::{
        products::{
            data::{NewProduct, ProductUpdate},
            filter::ProductFilter,
            records::{
                Category, ProductAvailability, ProductRecord, ProductSummary, ProductUuid,
                Ratings, Specifications,
            },
        },
        users::records::UserUuid,
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const GET_PRODUCT_AVAILABILITY_SQL: &str = include_str!("sql/get_product_availability.sql");
const GET_PRODUCT_SUMMARIES_SQL: &str = include_str!("sql/get_product_summaries.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let binds = FilterBinds::new(filter)?;

        // Sort column and direction come from closed enums, never from input.
        let sql = format!(
            "{LIST_PRODUCTS_SQL}ORDER BY {column} {order}, uuid {order}\nLIMIT $9 OFFSET $10",
            column = filter.sort_field.column(),
            order = filter.sort_order.keyword(),
        );

        query_as::<Postgres, ProductRecord>(&sql)
            .bind(binds.category)
            .bind(binds.subcategory)
            .bind(binds.brand)
            .bind(binds.min_price)
            .bind(binds.max_price)
            .bind(binds.search)
            .bind(binds.featured_only)
            .bind(binds.on_sale_only)
            .bind(binds.limit)
            .bind(binds.offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
    ) -> Result<u64, sqlx::Error> {
        let binds = FilterBinds::new(filter)?;

        let count: i64 = query_scalar(COUNT_PRODUCTS_SQL)
            .bind(binds.category)
            .bind(binds.subcategory)
            .bind(binds.brand)
            .bind(binds.min_price)
            .bind(binds.max_price)
            .bind(binds.search)
            .bind(binds.featured_only)
            .bind(binds.on_sale_only)
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Price and stock of an active product; `None` when the product is
    /// missing or inactive.
    pub(crate) async fn get_availability(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<ProductAvailability>, sqlx::Error> {
        query_as::<Postgres, ProductAvailability>(GET_PRODUCT_AVAILABILITY_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Display details for the given products, active or not.
    pub(crate) async fn get_summaries(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<Vec<ProductSummary>, sqlx::Error> {
        let uuids: Vec<Uuid> = products.iter().map(|uuid| uuid.into_uuid()).collect();

        query_as::<Postgres, ProductSummary>(GET_PRODUCT_SUMMARIES_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        let original_price = product
            .original_price
            .map(|price| amount_param(price, "original_price"))
            .transpose()?;

        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(&product.description)
            .bind(&product.brand)
            .bind(amount_param(product.price, "price")?)
            .bind(original_price)
            .bind(product.category.as_str())
            .bind(&product.subcategory)
            .bind(&product.main_image)
            .bind(&product.images)
            .bind(count_param(product.stock, "stock")?)
            .bind(product.is_featured)
            .bind(product.is_on_sale)
            .bind(product.tags.as_slice())
            .bind(product.specifications.weight.as_deref())
            .bind(product.specifications.volume.as_deref())
            .bind(&product.specifications.skin_types)
            .bind(&product.specifications.ingredients)
            .bind(&product.specifications.benefits)
            .bind(product.specifications.how_to_use.as_deref())
            .bind(product.created_by.map(UserUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: &ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        let price = update
            .price
            .map(|price| amount_param(price, "price"))
            .transpose()?;

        let original_price = update
            .original_price
            .map(|price| amount_param(price, "original_price"))
            .transpose()?;

        let stock = update
            .stock
            .map(|stock| count_param(stock, "stock"))
            .transpose()?;

        let specifications = update.specifications.as_ref();

        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.name.as_deref())
            .bind(update.description.as_deref())
            .bind(update.brand.as_deref())
            .bind(price)
            .bind(original_price)
            .bind(update.category.map(Category::as_str))
            .bind(update.subcategory.as_deref())
            .bind(update.main_image.as_deref())
            .bind(update.images.as_deref())
            .bind(stock)
            .bind(update.is_active)
            .bind(update.is_featured)
            .bind(update.is_on_sale)
            .bind(update.tags.as_ref().map(SmallVec::as_slice))
            .bind(specifications.is_some())
            .bind(specifications.and_then(|specs| specs.weight.as_deref()))
            .bind(specifications.and_then(|specs| specs.volume.as_deref()))
            .bind(specifications.map(|specs| specs.skin_types.as_slice()))
            .bind(specifications.map(|specs| specs.ingredients.as_slice()))
            .bind(specifications.map(|specs| specs.benefits.as_slice()))
            .bind(specifications.and_then(|specs| specs.how_to_use.as_deref()))
            .bind(update.updated_by.map(UserUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

/// Filter values converted to their SQL parameter types.
struct FilterBinds<'a> {
    category: Option<&'static str>,
    subcategory: Option<&'a str>,
    brand: Option<&'a str>,
    min_price: Option<i64>,
    max_price: Option<i64>,
    search: Option<&'a str>,
    featured_only: bool,
    on_sale_only: bool,
    limit: i64,
    offset: i64,
}

impl<'a> FilterBinds<'a> {
    fn new(filter: &'a ProductFilter) -> Result<Self, sqlx::Error> {
        let offset = i64::try_from(filter.offset()).map_err(|e| sqlx::Error::ColumnDecode {
            index: "offset".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            category: filter.category.map(Category::as_str),
            subcategory: filter.subcategory.as_deref(),
            brand: filter.brand.as_deref(),
            min_price: filter
                .min_price
                .map(|price| amount_param(price, "min_price"))
                .transpose()?,
            max_price: filter
                .max_price
                .map(|price| amount_param(price, "max_price"))
                .transpose()?,
            search: filter.search.as_deref(),
            featured_only: filter.featured_only,
            on_sale_only: filter.on_sale_only,
            limit: i64::from(filter.limit),
            offset,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let category: String = row.try_get("category")?;

        let category = category
            .parse::<Category>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "category".to_string(),
                source: Box::new(e),
            })?;

        let original_price = row
            .try_get::<Option<i64>, _>("original_price")?
            .map(u64::try_from)
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "original_price".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            brand: row.try_get("brand")?,
            price: try_get_amount(row, "price")?,
            original_price,
            category,
            subcategory: row.try_get("subcategory")?,
            main_image: row.try_get("main_image")?,
            images: row.try_get("images")?,
            stock: try_get_count(row, "stock")?,
            is_active: row.try_get("is_active")?,
            is_featured: row.try_get("is_featured")?,
            is_on_sale: row.try_get("is_on_sale")?,
            tags: SmallVec::from_vec(row.try_get::<Vec<String>, _>("tags")?),
            specifications: Specifications {
                weight: row.try_get("spec_weight")?,
                volume: row.try_get("spec_volume")?,
                skin_types: row.try_get("spec_skin_types")?,
                ingredients: row.try_get("spec_ingredients")?,
                benefits: row.try_get("spec_benefits")?,
                how_to_use: row.try_get("spec_how_to_use")?,
            },
            ratings: Ratings {
                average: row.try_get("rating_average")?,
                count: try_get_count(row, "rating_count")?,
            },
            created_by: try_get_user(row, "created_by")?,
            updated_by: try_get_user(row, "updated_by")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

fn try_get_user(row: &PgRow, col: &str) -> Result<Option<UserUuid>, sqlx::Error> {
    Ok(row
        .try_get::<Option<Uuid>, _>(col)?
        .map(UserUuid::from_uuid))
}

impl<'r> FromRow<'r, PgRow> for ProductAvailability {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            price: try_get_amount(row, "price")?,
            stock: try_get_count(row, "stock")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductSummary {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            price: try_get_amount(row, "price")?,
            main_image: row.try_get("main_image")?,
            stock: try_get_count(row, "stock")?,
            is_active: row.try_get("is_active")?,
        })
    }
}
