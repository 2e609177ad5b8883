use foodcourt_server_lib::data::repos::implementors::memory::MemoryStore;
use foodcourt_server_lib::realtime::feed::OrderFeed;
use foodcourt_server_lib::services::cart::CartLineItem;
use foodcourt_server_lib::services::errors::PredictionError;
use foodcourt_server_lib::services::order_service::OrderService;
use foodcourt_server_lib::services::prediction_service::{PredictionService, Predictions};
use std::sync::Arc;

fn line(id: i32, name: &str, price_cents: i64, quantity: i32) -> CartLineItem {
    CartLineItem {
        food_item_id: id,
        name: name.to_string(),
        price_cents,
        image: None,
        quantity,
        preparation_minutes: 10,
    }
}

#[test]
fn test_predictions_decode_from_camel_case_payload() {
    let payload = r#"{
        "highDemandItems": [
            {"name": "Burger", "reason": "Lunch rush", "confidenceScore": 85}
        ],
        "lowDemandItems": [
            {"name": "Salad", "reason": "Cold weather", "recommendation": "Reduce batch size"}
        ],
        "peakTimes": [
            {"time": "12:00", "expectedOrders": "40-50"}
        ],
        "wastageReduction": ["Prep sauces in smaller batches"],
        "summary": "Expect a busy lunch window."
    }"#;

    let predictions: Predictions =
        serde_json::from_str(payload).expect("Payload should decode");

    assert_eq!(predictions.high_demand_items.len(), 1);
    assert_eq!(predictions.high_demand_items[0].confidence_score, 85);
    assert_eq!(predictions.low_demand_items[0].name, "Salad");
    assert_eq!(predictions.peak_times[0].expected_orders, "40-50");
    assert_eq!(predictions.wastage_reduction.len(), 1);
    assert_eq!(predictions.summary, "Expect a busy lunch window.");
}

#[tokio::test]
async fn test_collect_stats_aggregates_order_history() {
    let store = Arc::new(MemoryStore::new());
    let orders = OrderService::new(store.clone(), OrderFeed::new(16));

    orders
        .create_order(
            Some(1),
            "Alice",
            &[line(1, "Burger", 500, 3), line(2, "Fries", 250, 1)],
            "card",
        )
        .await
        .expect("Failed to place order");
    orders
        .create_order(Some(2), "Bob", &[line(1, "Burger", 500, 1)], "cash")
        .await
        .expect("Failed to place order");

    let service = PredictionService::new(store, String::new(), String::new());
    let stats = service.collect_stats().await.expect("Aggregation failed");

    assert_eq!(stats.total_orders, 2);
    assert_eq!(stats.top_items[0].name, "Burger");
    assert_eq!(stats.top_items[0].count, 4);
    assert_eq!(stats.top_items[0].revenue_cents, 2000);
    assert_eq!(stats.top_items[1].name, "Fries");

    // Both orders landed in the current hour and weekday.
    assert_eq!(stats.peak_hours.len(), 1);
    assert!(stats.peak_hours[0].ends_with(":00"));
    assert_eq!(stats.busiest_days.len(), 1);
}

#[tokio::test]
async fn test_collect_stats_empty_history() {
    let store = Arc::new(MemoryStore::new());
    let service = PredictionService::new(store, String::new(), String::new());

    let stats = service.collect_stats().await.expect("Aggregation failed");

    assert_eq!(stats.total_orders, 0);
    assert!(stats.top_items.is_empty());
    assert!(stats.peak_hours.is_empty());
    assert!(stats.busiest_days.is_empty());
}

#[test]
fn test_failure_messages_are_distinct() {
    let rate_limited = PredictionError::RateLimited.to_string();
    let quota = PredictionError::QuotaExhausted.to_string();
    let upstream = PredictionError::Upstream("502".to_string()).to_string();

    assert!(rate_limited.contains("rate limit"));
    assert!(quota.contains("credits"));
    assert_ne!(rate_limited, quota);
    assert_ne!(quota, upstream);
    assert_ne!(rate_limited, upstream);
}
