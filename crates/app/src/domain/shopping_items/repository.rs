//! Shopping Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::{amount_param, try_get_amount},
    domain::{
        shopping_items::{
            data::{NewShoppingItem, ShoppingItemUpdate},
            filter::ShoppingItemFilter,
            records::{CategoryCount, ShoppingCategory, ShoppingItemRecord, ShoppingItemUuid},
        },
        users::records::UserUuid,
    },
};

const LIST_SHOPPING_ITEMS_SQL: &str = include_str!("sql/list_shopping_items.sql");
const COUNT_SHOPPING_ITEMS_SQL: &str = include_str!("sql/count_shopping_items.sql");
const GET_SHOPPING_ITEM_SQL: &str = include_str!("sql/get_shopping_item.sql");
const CREATE_SHOPPING_ITEM_SQL: &str = include_str!("sql/create_shopping_item.sql");
const UPDATE_SHOPPING_ITEM_SQL: &str = include_str!("sql/update_shopping_item.sql");
const TOGGLE_AVAILABILITY_SQL: &str = include_str!("sql/toggle_shopping_item_availability.sql");
const DELETE_SHOPPING_ITEM_SQL: &str = include_str!("sql/delete_shopping_item.sql");
const COUNT_BY_CATEGORY_SQL: &str = include_str!("sql/count_shopping_items_by_category.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgShoppingItemsRepository;

impl PgShoppingItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ShoppingItemFilter,
    ) -> Result<Vec<ShoppingItemRecord>, sqlx::Error> {
        let binds = FilterBinds::new(filter)?;

        let offset = i64::try_from(filter.offset()).map_err(|e| sqlx::Error::ColumnDecode {
            index: "offset".to_string(),
            source: Box::new(e),
        })?;

        // Sort column and direction come from closed enums, never from input.
        let sql = format!(
            "{LIST_SHOPPING_ITEMS_SQL}ORDER BY {column} {order}, uuid {order}\nLIMIT $7 OFFSET $8",
            column = filter.sort.column(),
            order = if filter.descending { "DESC" } else { "ASC" },
        );

        query_as::<Postgres, ShoppingItemRecord>(&sql)
            .bind(binds.category)
            .bind(binds.search)
            .bind(binds.min_price)
            .bind(binds.max_price)
            .bind(binds.available)
            .bind(binds.popular)
            .bind(i64::from(filter.limit))
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ShoppingItemFilter,
    ) -> Result<u64, sqlx::Error> {
        let binds = FilterBinds::new(filter)?;

        let count: i64 = query_scalar(COUNT_SHOPPING_ITEMS_SQL)
            .bind(binds.category)
            .bind(binds.search)
            .bind(binds.min_price)
            .bind(binds.max_price)
            .bind(binds.available)
            .bind(binds.popular)
            .fetch_one(&mut **tx)
            .await?;

        try_count(count, "count")
    }

    pub(crate) async fn get_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: ShoppingItemUuid,
    ) -> Result<ShoppingItemRecord, sqlx::Error> {
        query_as::<Postgres, ShoppingItemRecord>(GET_SHOPPING_ITEM_SQL)
            .bind(item.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: &NewShoppingItem,
    ) -> Result<ShoppingItemRecord, sqlx::Error> {
        query_as::<Postgres, ShoppingItemRecord>(CREATE_SHOPPING_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(&item.name)
            .bind(item.category.as_str())
            .bind(amount_param(item.price, "price")?)
            .bind(&item.description)
            .bind(item.long_description.as_deref())
            .bind(&item.image)
            .bind(&item.materials)
            .bind(&item.tags)
            .bind(item.is_popular)
            .bind(item.created_by.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: ShoppingItemUuid,
        update: &ShoppingItemUpdate,
    ) -> Result<ShoppingItemRecord, sqlx::Error> {
        let price = update
            .price
            .map(|price| amount_param(price, "price"))
            .transpose()?;

        query_as::<Postgres, ShoppingItemRecord>(UPDATE_SHOPPING_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(update.name.as_deref())
            .bind(update.category.map(ShoppingCategory::as_str))
            .bind(price)
            .bind(update.description.as_deref())
            .bind(update.long_description.as_deref())
            .bind(update.image.as_deref())
            .bind(update.materials.as_deref())
            .bind(update.tags.as_deref())
            .bind(update.is_available)
            .bind(update.is_popular)
            .bind(update.updated_by.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn toggle_availability(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: ShoppingItemUuid,
        updated_by: UserUuid,
    ) -> Result<ShoppingItemRecord, sqlx::Error> {
        query_as::<Postgres, ShoppingItemRecord>(TOGGLE_AVAILABILITY_SQL)
            .bind(item.into_uuid())
            .bind(updated_by.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: ShoppingItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SHOPPING_ITEM_SQL)
            .bind(item.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn count_by_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CategoryCount>, sqlx::Error> {
        query_as::<Postgres, CategoryCount>(COUNT_BY_CATEGORY_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

/// Filter values converted to their SQL parameter types.
struct FilterBinds<'a> {
    category: Option<&'static str>,
    search: Option<&'a str>,
    min_price: Option<i64>,
    max_price: Option<i64>,
    available: Option<bool>,
    popular: Option<bool>,
}

impl<'a> FilterBinds<'a> {
    fn new(filter: &'a ShoppingItemFilter) -> Result<Self, sqlx::Error> {
        Ok(Self {
            category: filter.category.map(ShoppingCategory::as_str),
            search: filter.search.as_deref(),
            min_price: filter
                .min_price
                .map(|price| amount_param(price, "min_price"))
                .transpose()?,
            max_price: filter
                .max_price
                .map(|price| amount_param(price, "max_price"))
                .transpose()?,
            available: filter.available,
            popular: filter.popular,
        })
    }
}

fn try_count(count: i64, col: &str) -> Result<u64, sqlx::Error> {
    u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

fn try_get_category(row: &PgRow) -> Result<ShoppingCategory, sqlx::Error> {
    let category: String = row.try_get("category")?;

    category
        .parse::<ShoppingCategory>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: "category".to_string(),
            source: Box::new(e),
        })
}

fn try_get_user(row: &PgRow, col: &str) -> Result<Option<UserUuid>, sqlx::Error> {
    Ok(row
        .try_get::<Option<Uuid>, _>(col)?
        .map(UserUuid::from_uuid))
}

impl<'r> FromRow<'r, PgRow> for ShoppingItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ShoppingItemUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            category: try_get_category(row)?,
            price: try_get_amount(row, "price")?,
            description: row.try_get("description")?,
            long_description: row.try_get("long_description")?,
            image: row.try_get("image")?,
            materials: row.try_get("materials")?,
            tags: row.try_get("tags")?,
            is_available: row.try_get("is_available")?,
            is_popular: row.try_get("is_popular")?,
            created_by: try_get_user(row, "created_by")?,
            updated_by: try_get_user(row, "updated_by")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryCount {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            category: try_get_category(row)?,
            count: try_count(row.try_get("count")?, "count")?,
            available_count: try_count(row.try_get("available_count")?, "available_count")?,
        })
    }
}
