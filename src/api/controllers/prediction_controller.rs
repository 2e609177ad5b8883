use crate::api::server::AppState;
use crate::security::jwt::AccessClaims;
use crate::services::errors::PredictionError;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Generate demand predictions from order history (manager and up).
/// Rate-limit and quota failures map to their own status codes so the
/// dashboard can show the right guidance.
pub async fn get_predictions(
    claims: AccessClaims,
    State(state): State<AppState>,
) -> impl IntoResponse {
    if !claims.can_manage() {
        return (StatusCode::FORBIDDEN, "Permission denied").into_response();
    }

    match state.predictions.fetch_predictions().await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e @ PredictionError::RateLimited) => {
            (StatusCode::TOO_MANY_REQUESTS, e.to_string()).into_response()
        }
        Err(e @ PredictionError::QuotaExhausted) => {
            (StatusCode::PAYMENT_REQUIRED, e.to_string()).into_response()
        }
        Err(e @ PredictionError::Upstream(_)) | Err(e @ PredictionError::InvalidResponse(_)) => {
            tracing::error!("Prediction failure: {}", e);
            (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
        }
        Err(e @ PredictionError::Store(_)) => {
            tracing::error!("Prediction failure: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}
