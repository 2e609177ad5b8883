use crate::api::request::{LoginRequest, RegisterRequest};
use crate::api::response::LoginResponse;
use crate::api::server::AppState;
use crate::data::models::user::{NewUser, Role};
use crate::security::auth::AuthService;
use crate::security::jwt::JwtService;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Register a new account. Every account starts as a student; manager
/// access goes through the request workflow.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    let auth = AuthService::new();

    let hashed_password = match auth.hash_password(&payload.password).await {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("Error hashing password: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to process password",
            )
                .into_response();
        }
    };

    let user = match state
        .users
        .insert_user(NewUser {
            name: payload.name,
            email: payload.email,
            password_hash: hashed_password,
        })
        .await
    {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Error creating user: {}", e);
            return (StatusCode::CONFLICT, "Account could not be created").into_response();
        }
    };

    if let Err(e) = state.users.set_role(user.user_id, Role::Student).await {
        tracing::error!("Error assigning default role: {}", e);
        return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create user").into_response();
    }

    let jwt = JwtService::new();
    match jwt.generate_token(&user, Role::Student) {
        Ok(token) => (
            StatusCode::CREATED,
            Json(LoginResponse {
                token,
                message: "Account created".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error generating token: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create token").into_response()
        }
    }
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let auth = AuthService::new();

    let user = match state.users.get_by_email(&payload.email).await {
        Ok(Some(user)) => user,
        Ok(None) => return (StatusCode::UNAUTHORIZED, "Invalid credentials").into_response(),
        Err(e) => {
            tracing::error!("Error fetching user: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch user").into_response();
        }
    };

    match auth
        .verify_password(&payload.password, &user.password_hash)
        .await
    {
        Ok(true) => {}
        Ok(false) => return (StatusCode::UNAUTHORIZED, "Invalid credentials").into_response(),
        Err(e) => {
            tracing::error!("Error verifying password: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to verify password",
            )
                .into_response();
        }
    }

    let role = match state.users.role_of(user.user_id).await {
        Ok(role) => role.unwrap_or(Role::Student),
        Err(e) => {
            tracing::error!("Error fetching role: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch role").into_response();
        }
    };

    let jwt = JwtService::new();
    match jwt.generate_token(&user, role) {
        Ok(token) => (
            StatusCode::OK,
            Json(LoginResponse {
                token,
                message: "Login successful".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error generating token: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create token").into_response()
        }
    }
}
