use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, PartialEq)]
pub enum APIErrors {
    Unauthorized,
}

impl IntoResponse for APIErrors {
    fn into_response(self) -> Response {
        match self {
            APIErrors::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Invalid token credentials provided.").into_response()
            }
        }
    }
}
