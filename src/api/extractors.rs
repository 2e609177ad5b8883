use crate::api::errors::APIErrors;
use crate::security::jwt::{AccessClaims, JwtService};
use axum::RequestPartsExt;
use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

impl<S> FromRequestParts<S> for AccessClaims
where
    S: Send + Sync,
{
    type Rejection = APIErrors;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        decode_token_from_request_part(parts).await
    }
}

/// Routes that behave differently for guests take `Option<AccessClaims>`;
/// a missing or invalid token reads as "not signed in" rather than 401.
impl<S> OptionalFromRequestParts<S> for AccessClaims
where
    S: Send + Sync,
{
    type Rejection = APIErrors;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(decode_token_from_request_part(parts).await.ok())
    }
}

async fn decode_token_from_request_part<T>(parts: &mut Parts) -> Result<T, APIErrors>
where
    T: for<'de> serde::Deserialize<'de> + std::fmt::Debug + Sync + Send,
{
    let tokenizer = JwtService::new();

    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|_| {
            tracing::error!("Invalid authorization header");
            APIErrors::Unauthorized
        })?;

    let claims = tokenizer.decode_token::<T>(bearer.token()).map_err(|e| {
        tracing::error!("Token decoding error: {:?}", e);
        APIErrors::Unauthorized
    })?;

    Ok(claims)
}
