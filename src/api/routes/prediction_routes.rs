use crate::api::controllers::prediction_controller;
use crate::api::server::AppState;
use axum::Router;
use axum::routing::get;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(prediction_controller::get_predictions))
}
