use crate::data::repos::traits::stores::OrderStore;
use crate::services::errors::PredictionError;
use chrono::Timelike;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighDemandItem {
    pub name: String,
    pub reason: String,
    /// 0-100.
    pub confidence_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowDemandItem {
    pub name: String,
    pub reason: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakTime {
    pub time: String,
    pub expected_orders: String,
}

/// Structured payload returned by the inference endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Predictions {
    pub high_demand_items: Vec<HighDemandItem>,
    pub low_demand_items: Vec<LowDemandItem>,
    pub peak_times: Vec<PeakTime>,
    pub wastage_reduction: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopItem {
    pub name: String,
    pub count: u32,
    pub revenue_cents: i64,
}

/// Aggregate order history handed to the inference endpoint and echoed
/// back to the dashboard alongside the predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: u32,
    pub top_items: Vec<TopItem>,
    pub peak_hours: Vec<String>,
    pub busiest_days: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionReport {
    pub predictions: Predictions,
    pub raw_data: OrderStats,
}

/// One-shot client for the demand-prediction endpoint. Aggregates order
/// history locally and sends it with the request; no partial predictions
/// are ever surfaced on failure.
#[derive(Clone)]
pub struct PredictionService {
    orders: Arc<dyn OrderStore>,
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl PredictionService {
    pub fn new(orders: Arc<dyn OrderStore>, endpoint: String, api_key: String) -> Self {
        PredictionService {
            orders,
            client: reqwest::Client::new(),
            endpoint,
            api_key,
        }
    }

    pub async fn fetch_predictions(&self) -> Result<PredictionReport, PredictionError> {
        let stats = self.collect_stats().await?;

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&stats)
            .send()
            .await
            .map_err(|e| PredictionError::Upstream(e.to_string()))?;

        match resp.status() {
            reqwest::StatusCode::TOO_MANY_REQUESTS => Err(PredictionError::RateLimited),
            reqwest::StatusCode::PAYMENT_REQUIRED => Err(PredictionError::QuotaExhausted),
            s if !s.is_success() => Err(PredictionError::Upstream(format!(
                "inference endpoint returned {}",
                s
            ))),
            _ => {
                let predictions = resp
                    .json::<Predictions>()
                    .await
                    .map_err(|e| PredictionError::InvalidResponse(e.to_string()))?;

                Ok(PredictionReport {
                    predictions,
                    raw_data: stats,
                })
            }
        }
    }

    /// Aggregates the raw stats from order history: item counts and
    /// revenue, top three peak hours, top three busiest weekdays.
    pub async fn collect_stats(&self) -> Result<OrderStats, PredictionError> {
        let orders = self.orders.list_all().await?;

        let mut item_counts: HashMap<String, (u32, i64)> = HashMap::new();
        let mut hour_counts: HashMap<u32, u32> = HashMap::new();
        let mut day_counts: HashMap<String, u32> = HashMap::new();

        for order in &orders {
            let items = self.orders.line_items(order.order_id).await?;
            for item in items {
                let entry = item_counts.entry(item.name).or_insert((0, 0));
                entry.0 += item.quantity.max(0) as u32;
                entry.1 += item.price_cents * i64::from(item.quantity);
            }

            if let Some(created) = order.created_at {
                *hour_counts.entry(created.hour()).or_insert(0) += 1;
                *day_counts
                    .entry(created.format("%A").to_string())
                    .or_insert(0) += 1;
            }
        }

        let mut top_items: Vec<TopItem> = item_counts
            .into_iter()
            .map(|(name, (count, revenue_cents))| TopItem {
                name,
                count,
                revenue_cents,
            })
            .collect();
        top_items.sort_by(|a, b| b.count.cmp(&a.count).then(a.name.cmp(&b.name)));
        top_items.truncate(5);

        let mut hours: Vec<(u32, u32)> = hour_counts.into_iter().collect();
        hours.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        let peak_hours = hours
            .into_iter()
            .take(3)
            .map(|(hour, _)| format!("{:02}:00", hour))
            .collect();

        let mut days: Vec<(String, u32)> = day_counts.into_iter().collect();
        days.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        let busiest_days = days.into_iter().take(3).map(|(day, _)| day).collect();

        Ok(OrderStats {
            total_orders: orders.len() as u32,
            top_items,
            peak_hours,
            busiest_days,
        })
    }
}
