use crate::data::database::Database;
use crate::data::models::order::{NewOrder, NewOrderItem, Order, OrderItem};
use crate::data::repos::traits::stores::{OrderStore, StoreError};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

fn query_err(e: result::Error) -> StoreError {
    StoreError::Query(e.to_string())
}

pub struct OrderRepo {
    db: Database,
}

impl OrderRepo {
    pub fn new() -> Self {
        OrderRepo { db: Database::new() }
    }
}

#[async_trait]
impl OrderStore for OrderRepo {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        use crate::data::models::schema::orders::dsl::orders;

        let mut conn = self.db.connection().await?;

        let new_id: i32 = conn
            .transaction::<_, result::Error, _>(|connection| {
                async move {
                    diesel::insert_into(orders)
                        .values(&order)
                        .execute(connection)
                        .await?;

                    diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>(
                        "LAST_INSERT_ID()",
                    ))
                    .get_result(connection)
                    .await
                }
                .scope_boxed()
            })
            .await
            .map_err(query_err)?;

        self.get_by_id(new_id)
            .await?
            .ok_or_else(|| StoreError::Query("inserted order row not found".to_string()))
    }

    async fn insert_line_items(&self, items: Vec<NewOrderItem>) -> Result<(), StoreError> {
        use crate::data::models::schema::order_items::dsl::order_items;

        let mut conn = self.db.connection().await?;

        diesel::insert_into(order_items)
            .values(&items)
            .execute(&mut conn)
            .await
            .map_err(query_err)?;

        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Order>, StoreError> {
        use crate::data::models::schema::orders::dsl::{order_id, orders};

        let mut conn = self.db.connection().await?;

        match orders.filter(order_id.eq(id)).first::<Order>(&mut conn).await {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(query_err(e)),
        }
    }

    async fn get_by_number(&self, number: &str) -> Result<Option<Order>, StoreError> {
        use crate::data::models::schema::orders::dsl::{order_number, orders};

        let mut conn = self.db.connection().await?;

        match orders
            .filter(order_number.eq(number))
            .first::<Order>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(query_err(e)),
        }
    }

    async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        use crate::data::models::schema::orders::dsl::{created_at, orders};

        let mut conn = self.db.connection().await?;

        orders
            .order(created_at.desc())
            .load::<Order>(&mut conn)
            .await
            .map_err(query_err)
    }

    async fn list_by_status(&self, status_query: &str) -> Result<Vec<Order>, StoreError> {
        use crate::data::models::schema::orders::dsl::{created_at, orders, status};

        let mut conn = self.db.connection().await?;

        orders
            .filter(status.eq(status_query))
            .order(created_at.desc())
            .load::<Order>(&mut conn)
            .await
            .map_err(query_err)
    }

    async fn line_items(&self, id: i32) -> Result<Vec<OrderItem>, StoreError> {
        use crate::data::models::schema::order_items::dsl::{order_id, order_items};

        let mut conn = self.db.connection().await?;

        order_items
            .filter(order_id.eq(id))
            .load::<OrderItem>(&mut conn)
            .await
            .map_err(query_err)
    }

    async fn update_status(
        &self,
        id: i32,
        from_status: &str,
        to_status: &str,
    ) -> Result<bool, StoreError> {
        use crate::data::models::schema::orders::dsl::{order_id, orders, status, updated_at};

        let mut conn = self.db.connection().await?;

        let affected = diesel::update(orders.filter(order_id.eq(id)).filter(status.eq(from_status)))
            .set((
                status.eq(to_status),
                updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(&mut conn)
            .await
            .map_err(query_err)?;

        Ok(affected > 0)
    }
}

impl Default for OrderRepo {
    fn default() -> Self {
        Self::new()
    }
}
