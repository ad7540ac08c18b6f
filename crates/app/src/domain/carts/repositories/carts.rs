//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{amount_param, count_param, try_get_amount, try_get_count},
    domain::{
        carts::records::{CartRecord, CartUuid},
        users::records::UserUuid,
    },
};

const CREATE_CART_IF_ABSENT_SQL: &str = include_str!("../sql/create_cart_if_absent.sql");
const GET_CART_BY_USER_SQL: &str = include_str!("../sql/get_cart_by_user.sql");
const LOCK_CART_BY_USER_SQL: &str = include_str!("../sql/lock_cart_by_user.sql");
const SAVE_CART_SQL: &str = include_str!("../sql/save_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// The user's cart without its lines, if one has been stored.
    pub(crate) async fn find_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(GET_CART_BY_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// As [`Self::find_cart`], holding a row lock until the transaction ends.
    pub(crate) async fn lock_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(LOCK_CART_BY_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Store an empty cart for the user unless one exists. Concurrent callers
    /// block on the user's unique key until the first insert commits.
    pub(crate) async fn create_cart_if_absent(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_CART_IF_ABSENT_SQL)
            .bind(CartUuid::new().into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Insert the cart, or overwrite the totals of the user's stored cart.
    ///
    /// Returns the stored header, whose uuid is the existing cart's when the
    /// user already had one.
    pub(crate) async fn save_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: &CartRecord,
    ) -> Result<CartRecord, sqlx::Error> {
        query_as::<Postgres, CartRecord>(SAVE_CART_SQL)
            .bind(cart.uuid.into_uuid())
            .bind(cart.user_uuid.into_uuid())
            .bind(count_param(cart.total_items, "total_items")?)
            .bind(amount_param(cart.total_amount, "total_amount")?)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            items: Vec::new(),
            total_items: try_get_count(row, "total_items")?,
            total_amount: try_get_amount(row, "total_amount")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
