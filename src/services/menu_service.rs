use crate::data::models::food_item::{FoodItem, NewFoodItem, UpdateFoodItem};
use crate::data::repos::traits::stores::MenuStore;
use crate::services::errors::MenuServiceError;
use std::sync::Arc;

/// CRUD over food items. Independent of the order lifecycle: orders keep
/// snapshotted copies of whatever they were created with.
#[derive(Clone)]
pub struct MenuService {
    store: Arc<dyn MenuStore>,
}

impl MenuService {
    pub fn new(store: Arc<dyn MenuStore>) -> Self {
        MenuService { store }
    }

    pub async fn list_items(&self) -> Result<Vec<FoodItem>, MenuServiceError> {
        Ok(self.store.list_items().await?)
    }

    pub async fn get_item(&self, food_item_id: i32) -> Result<FoodItem, MenuServiceError> {
        self.store
            .get_item(food_item_id)
            .await?
            .ok_or(MenuServiceError::ItemNotFound)
    }

    pub async fn create_item(&self, item: NewFoodItem) -> Result<FoodItem, MenuServiceError> {
        Ok(self.store.insert_item(item).await?)
    }

    pub async fn update_item(
        &self,
        food_item_id: i32,
        changes: UpdateFoodItem,
    ) -> Result<FoodItem, MenuServiceError> {
        if changes == UpdateFoodItem::default() {
            return self.get_item(food_item_id).await;
        }

        self.store
            .update_item(food_item_id, changes)
            .await?
            .ok_or(MenuServiceError::ItemNotFound)
    }

    pub async fn toggle_availability(
        &self,
        food_item_id: i32,
    ) -> Result<FoodItem, MenuServiceError> {
        let item = self.get_item(food_item_id).await?;
        let changes = UpdateFoodItem {
            is_available: Some(!item.is_available),
            ..Default::default()
        };
        self.update_item(food_item_id, changes).await
    }

    pub async fn delete_item(&self, food_item_id: i32) -> Result<(), MenuServiceError> {
        if self.store.delete_item(food_item_id).await? {
            Ok(())
        } else {
            Err(MenuServiceError::ItemNotFound)
        }
    }
}
