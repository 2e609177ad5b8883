use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use foodcourt_server_lib::api::server::{self, AppState};
use foodcourt_server_lib::data::models::user::{NewUser, Role};
use foodcourt_server_lib::data::repos::implementors::memory::MemoryStore;
use foodcourt_server_lib::data::repos::traits::stores::UserStore;
use foodcourt_server_lib::realtime::feed::OrderFeed;
use foodcourt_server_lib::security::jwt::JwtService;
use foodcourt_server_lib::services::menu_service::MenuService;
use foodcourt_server_lib::services::order_service::OrderService;
use foodcourt_server_lib::services::prediction_service::PredictionService;
use foodcourt_server_lib::services::role_service::RoleService;
use serial_test::serial;
use std::sync::Arc;
use tower::ServiceExt;

fn test_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let feed = OrderFeed::new(16);

    let state = AppState {
        users: store.clone(),
        orders: OrderService::new(store.clone(), feed.clone()),
        menu: MenuService::new(store.clone()),
        roles: RoleService::new(store.clone(), store.clone()),
        predictions: PredictionService::new(store.clone(), String::new(), String::new()),
        feed,
    };

    (state, store)
}

async fn bearer_for(store: &MemoryStore, email: &str, role: Role) -> String {
    std::env::set_var("JWT_SECRET", "test-secret");

    let user = store
        .insert_user(NewUser {
            name: "Test".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        })
        .await
        .expect("Failed to add user");
    store
        .set_role(user.user_id, role)
        .await
        .expect("Failed to set role");

    let token = JwtService::new()
        .generate_token(&user, role)
        .expect("Token generation failed");
    format!("Bearer {}", token)
}

#[tokio::test]
#[serial]
async fn test_collection_event_stream_requires_token() {
    std::env::set_var("JWT_SECRET", "test-secret");
    let (state, _) = test_state();
    let app = server::router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/orders/events")
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn test_collection_event_stream_rejects_students() {
    let (state, store) = test_state();
    let bearer = bearer_for(&store, "sam@campus.edu", Role::Student).await;
    let app = server::router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/orders/events")
                .header(header::AUTHORIZATION, bearer)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[serial]
async fn test_collection_event_stream_open_to_managers() {
    let (state, store) = test_state();
    let bearer = bearer_for(&store, "mia@campus.edu", Role::Manager).await;
    let app = server::router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/orders/events")
                .header(header::AUTHORIZATION, bearer)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .expect("Missing content type")
            .to_str()
            .expect("Invalid content type"),
        "text/event-stream"
    );
}

#[tokio::test]
#[serial]
async fn test_row_scoped_event_stream_open_to_guests() {
    std::env::set_var("JWT_SECRET", "test-secret");
    let (state, _) = test_state();
    let app = server::router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/orders/1/events")
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
}
