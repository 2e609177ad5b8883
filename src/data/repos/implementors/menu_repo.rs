use crate::data::database::Database;
use crate::data::models::food_item::{FoodItem, NewFoodItem, UpdateFoodItem};
use crate::data::repos::traits::stores::{MenuStore, StoreError};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

fn query_err(e: result::Error) -> StoreError {
    StoreError::Query(e.to_string())
}

pub struct MenuRepo {
    db: Database,
}

impl MenuRepo {
    pub fn new() -> Self {
        MenuRepo { db: Database::new() }
    }
}

#[async_trait]
impl MenuStore for MenuRepo {
    async fn insert_item(&self, item: NewFoodItem) -> Result<FoodItem, StoreError> {
        use crate::data::models::schema::food_items::dsl::food_items;

        let mut conn = self.db.connection().await?;

        let new_id: i32 = conn
            .transaction::<_, result::Error, _>(|connection| {
                async move {
                    diesel::insert_into(food_items)
                        .values(&item)
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

        self.get_item(new_id)
            .await?
            .ok_or_else(|| StoreError::Query("inserted food item not found".to_string()))
    }

    async fn get_item(&self, id: i32) -> Result<Option<FoodItem>, StoreError> {
        use crate::data::models::schema::food_items::dsl::{food_item_id, food_items};

        let mut conn = self.db.connection().await?;

        match food_items
            .filter(food_item_id.eq(id))
            .first::<FoodItem>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(query_err(e)),
        }
    }

    async fn list_items(&self) -> Result<Vec<FoodItem>, StoreError> {
        use crate::data::models::schema::food_items::dsl::{category, food_items};

        let mut conn = self.db.connection().await?;

        food_items
            .order(category.asc())
            .load::<FoodItem>(&mut conn)
            .await
            .map_err(query_err)
    }

    async fn update_item(
        &self,
        id: i32,
        changes: UpdateFoodItem,
    ) -> Result<Option<FoodItem>, StoreError> {
        use crate::data::models::schema::food_items::dsl::{food_item_id, food_items};

        if self.get_item(id).await?.is_none() {
            return Ok(None);
        }

        let mut conn = self.db.connection().await?;

        diesel::update(food_items.filter(food_item_id.eq(id)))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(query_err)?;

        self.get_item(id).await
    }

    async fn delete_item(&self, id: i32) -> Result<bool, StoreError> {
        use crate::data::models::schema::food_items::dsl::{food_item_id, food_items};

        let mut conn = self.db.connection().await?;

        let affected = diesel::delete(food_items.filter(food_item_id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(query_err)?;

        Ok(affected > 0)
    }
}

impl Default for MenuRepo {
    fn default() -> Self {
        Self::new()
    }
}
