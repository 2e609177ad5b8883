use crate::api::request::{CreateManagerRequest, SetRoleRequest};
use crate::api::response::{GateResponse, ManagerRequestResponse, RoleAssignmentResponse};
use crate::api::server::AppState;
use crate::data::models::user::Role;
use crate::security::jwt::AccessClaims;
use crate::services::errors::RoleServiceError;
use crate::services::role_service::GateDecision;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

fn role_error_response(e: RoleServiceError) -> Response {
    match e {
        RoleServiceError::Forbidden => (StatusCode::FORBIDDEN, e.to_string()).into_response(),
        RoleServiceError::DuplicateRequest => {
            (StatusCode::CONFLICT, e.to_string()).into_response()
        }
        RoleServiceError::RequestNotFound => (StatusCode::NOT_FOUND, e.to_string()).into_response(),
        RoleServiceError::Store(ref store_err) => {
            tracing::error!("Role store error: {}", store_err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}

/// Route gate for the manager/admin surfaces. Works for guests too, so
/// the identity is optional.
pub async fn manager_gate(
    claims: Option<AccessClaims>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let identity = claims.map(|c| c.user_id());

    match state.roles.manager_gate(identity).await {
        Ok(decision) => {
            let decision = match decision {
                GateDecision::Allow => "allow",
                GateDecision::SignInRequired => "sign_in_required",
                GateDecision::AwaitingReview => "awaiting_review",
                GateDecision::RequestRejected => "request_rejected",
                GateDecision::ApplicationRequired => "application_required",
            };
            (
                StatusCode::OK,
                Json(GateResponse {
                    decision: decision.to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => role_error_response(e),
    }
}

/// Assign a role directly (admin only; never on one's own account)
pub async fn set_user_role(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(target_id): Path<i32>,
    Json(payload): Json<SetRoleRequest>,
) -> impl IntoResponse {
    let role: Role = match payload.role.parse() {
        Ok(r) => r,
        Err(_) => return (StatusCode::BAD_REQUEST, "Unknown role").into_response(),
    };

    match state.roles.set_role(claims.user_id(), target_id, role).await {
        Ok(()) => (StatusCode::OK, "Role updated").into_response(),
        Err(e) => role_error_response(e),
    }
}

/// List all role assignments (admin only)
pub async fn get_role_assignments(
    claims: AccessClaims,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match state.roles.list_assignments(claims.user_id()).await {
        Ok(assignments) => {
            let response: Vec<RoleAssignmentResponse> = assignments
                .into_iter()
                .map(RoleAssignmentResponse::from)
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => role_error_response(e),
    }
}

/// Apply for manager access
pub async fn submit_manager_request(
    claims: AccessClaims,
    State(state): State<AppState>,
    Json(payload): Json<CreateManagerRequest>,
) -> impl IntoResponse {
    match state
        .roles
        .submit_request(claims.user_id(), &payload.name, &payload.email)
        .await
    {
        Ok(request) => (
            StatusCode::CREATED,
            Json(ManagerRequestResponse::from(request)),
        )
            .into_response(),
        Err(e) => role_error_response(e),
    }
}

/// List requests awaiting review (admin only)
pub async fn get_pending_requests(
    claims: AccessClaims,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match state.roles.pending_requests(claims.user_id()).await {
        Ok(requests) => {
            let response: Vec<ManagerRequestResponse> = requests
                .into_iter()
                .map(ManagerRequestResponse::from)
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => role_error_response(e),
    }
}

/// Approve a manager request (admin only)
pub async fn approve_request(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(request_id): Path<i32>,
) -> impl IntoResponse {
    match state
        .roles
        .approve_request(claims.user_id(), request_id)
        .await
    {
        Ok(request) => (StatusCode::OK, Json(ManagerRequestResponse::from(request))).into_response(),
        Err(e) => role_error_response(e),
    }
}

/// Reject a manager request (admin only)
pub async fn reject_request(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(request_id): Path<i32>,
) -> impl IntoResponse {
    match state
        .roles
        .reject_request(claims.user_id(), request_id)
        .await
    {
        Ok(request) => (StatusCode::OK, Json(ManagerRequestResponse::from(request))).into_response(),
        Err(e) => role_error_response(e),
    }
}
