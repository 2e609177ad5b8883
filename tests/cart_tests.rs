use foodcourt_server_lib::data::models::food_item::FoodItem;
use foodcourt_server_lib::services::cart::Cart;

fn menu_item(id: i32, name: &str, price_cents: i64, prep: i32) -> FoodItem {
    FoodItem {
        food_item_id: id,
        name: name.to_string(),
        description: None,
        price_cents,
        image: None,
        category: "mains".to_string(),
        is_available: true,
        preparation_minutes: prep,
        created_at: None,
        updated_at: None,
    }
}

#[test]
fn test_add_merges_lines_for_same_item() {
    let mut cart = Cart::new();
    let burger = menu_item(1, "Burger", 500, 10);

    cart.add(&burger, 1);
    cart.add(&burger, 2);

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 3);
    assert_eq!(cart.item_count(), 3);
}

#[test]
fn test_add_ignores_non_positive_quantity() {
    let mut cart = Cart::new();
    let burger = menu_item(1, "Burger", 500, 10);

    cart.add(&burger, 0);
    cart.add(&burger, -2);

    assert!(cart.is_empty());
}

#[test]
fn test_set_quantity_below_one_removes_line() {
    let mut cart = Cart::new();
    let burger = menu_item(1, "Burger", 500, 10);

    cart.add(&burger, 2);
    cart.set_quantity(1, 0);

    assert!(cart.is_empty());
}

#[test]
fn test_set_quantity_updates_existing_line() {
    let mut cart = Cart::new();
    let burger = menu_item(1, "Burger", 500, 10);

    cart.add(&burger, 2);
    cart.set_quantity(1, 5);

    assert_eq!(cart.items()[0].quantity, 5);
}

#[test]
fn test_remove_only_touches_matching_line() {
    let mut cart = Cart::new();
    cart.add(&menu_item(1, "Burger", 500, 10), 1);
    cart.add(&menu_item(2, "Fries", 250, 5), 1);

    cart.remove(1);

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].food_item_id, 2);
}

#[test]
fn test_total_sums_price_times_quantity() {
    let mut cart = Cart::new();
    cart.add(&menu_item(1, "Burger", 100, 10), 2);
    cart.add(&menu_item(2, "Fries", 50, 5), 1);

    assert_eq!(cart.total_cents(), 250);
}

#[test]
fn test_clear_empties_cart() {
    let mut cart = Cart::new();
    cart.add(&menu_item(1, "Burger", 500, 10), 2);

    cart.clear();

    assert!(cart.is_empty());
    assert_eq!(cart.total_cents(), 0);
}

#[test]
fn test_line_snapshots_item_fields() {
    let mut cart = Cart::new();
    let burger = menu_item(1, "Burger", 500, 10);

    cart.add(&burger, 1);

    let line = &cart.items()[0];
    assert_eq!(line.name, "Burger");
    assert_eq!(line.price_cents, 500);
    assert_eq!(line.preparation_minutes, 10);
}
