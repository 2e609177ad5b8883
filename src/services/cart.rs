//! Ephemeral, per-session cart. Never persisted; emptied on checkout or
//! explicit clear. Line items snapshot the displayable fields of a food
//! item so later menu edits do not retroactively change a cart.

use crate::data::models::food_item::FoodItem;

#[derive(Debug, Clone, PartialEq)]
pub struct CartLineItem {
    pub food_item_id: i32,
    pub name: String,
    pub price_cents: i64,
    pub image: Option<String>,
    pub quantity: i32,
    pub preparation_minutes: i32,
}

#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds `quantity` of an item, merging with an existing line for the
    /// same food item. Non-positive quantities are ignored.
    pub fn add(&mut self, item: &FoodItem, quantity: i32) {
        if quantity < 1 {
            return;
        }

        if let Some(line) = self
            .items
            .iter_mut()
            .find(|l| l.food_item_id == item.food_item_id)
        {
            line.quantity += quantity;
            return;
        }

        self.items.push(CartLineItem {
            food_item_id: item.food_item_id,
            name: item.name.clone(),
            price_cents: item.price_cents,
            image: item.image.clone(),
            quantity,
            preparation_minutes: item.preparation_minutes,
        });
    }

    /// Sets the quantity of a line; anything below 1 removes the line.
    pub fn set_quantity(&mut self, food_item_id: i32, quantity: i32) {
        if quantity < 1 {
            self.remove(food_item_id);
            return;
        }

        if let Some(line) = self.items.iter_mut().find(|l| l.food_item_id == food_item_id) {
            line.quantity = quantity;
        }
    }

    pub fn remove(&mut self, food_item_id: i32) {
        self.items.retain(|l| l.food_item_id != food_item_id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total quantity across all lines.
    pub fn item_count(&self) -> i32 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    pub fn total_cents(&self) -> i64 {
        self.items
            .iter()
            .map(|l| l.price_cents * i64::from(l.quantity))
            .sum()
    }
}
