//! Cart Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{amount_param, count_param, try_get_amount, try_get_count},
    domain::{
        carts::records::{CartItemRecord, CartUuid},
        products::records::ProductUuid,
    },
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const DELETE_CART_ITEMS_SQL: &str = include_str!("../sql/delete_cart_items.sql");
const INSERT_CART_ITEMS_SQL: &str = include_str!("../sql/insert_cart_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lines of a cart in insertion order.
    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(GET_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Replace every line of a cart, storing each line's index as its
    /// position.
    pub(crate) async fn replace_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        items: &[CartItemRecord],
    ) -> Result<(), sqlx::Error> {
        query(DELETE_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?;

        if items.is_empty() {
            return Ok(());
        }

        let mut products: Vec<Uuid> = Vec::with_capacity(items.len());
        let mut quantities: Vec<i32> = Vec::with_capacity(items.len());
        let mut prices: Vec<i64> = Vec::with_capacity(items.len());
        let mut positions: Vec<i32> = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let position = i32::try_from(index).map_err(|e| sqlx::Error::ColumnDecode {
                index: "position".to_string(),
                source: Box::new(e),
            })?;

            products.push(item.product_uuid.into_uuid());
            quantities.push(count_param(item.quantity, "quantity")?);
            prices.push(amount_param(item.price, "price")?);
            positions.push(position);
        }

        query(INSERT_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .bind(products)
            .bind(quantities)
            .bind(prices)
            .bind(positions)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: try_get_count(row, "quantity")?,
            price: try_get_amount(row, "price")?,
        })
    }
}
