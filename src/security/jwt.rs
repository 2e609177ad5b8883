use crate::api::config::Config;
use crate::data::models::user::{Role, User};
use crate::security::errors::AuthError;
use serde::{Deserialize, Serialize};

pub struct JwtService;

impl JwtService {
    pub fn new() -> Self {
        JwtService
    }

    pub fn generate_token(&self, user: &User, role: Role) -> Result<String, AuthError> {
        let curr_time = chrono::Utc::now().timestamp() as usize;
        let config = Config::default();

        let claims = AccessClaims {
            sub: user.user_id,
            name: user.name.clone(),
            role,
            iat: curr_time,
            exp: curr_time + (config.jwt_expiration_minutes * 60) as usize,
        };

        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(config.jwt_secret.as_ref()),
        )
        .map_err(|_| AuthError::TokenCreationError);

        tracing::debug!(user_id = user.user_id, "access token generated");

        token
    }

    pub fn decode_token<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, AuthError> {
        let validation = jsonwebtoken::Validation::default();

        let token_data = jsonwebtoken::decode::<T>(
            token,
            &jsonwebtoken::DecodingKey::from_secret(Config::default().jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AuthError::InvalidToken);

        Ok(token_data?.claims)
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: i32,
    /// Display name, used when placing orders
    pub name: String,
    /// Role at token issue time
    pub role: Role,
    /// Issued at (as UTC timestamp)
    pub iat: usize,
    /// Expiration time (as UTC timestamp)
    pub exp: usize,
}

impl AccessClaims {
    pub fn user_id(&self) -> i32 {
        self.sub
    }

    pub fn can_manage(&self) -> bool {
        self.role.can_manage()
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
