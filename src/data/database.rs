use crate::data::repos::traits::stores::StoreError;
use diesel_async::AsyncMysqlConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::deadpool::{Object, Pool};
use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

/// Handle to the shared MySQL pool. Cheap to construct; the pool itself is
/// built lazily on first checkout.
pub struct Database {
    pool: Pool<AsyncMysqlConnection>,
}

impl Database {
    pub fn new() -> Self {
        Database {
            pool: DB_POOL.clone(),
        }
    }

    /// Checks a connection out of the pool, folding pool trouble into the
    /// store error the repos hand upward.
    pub async fn connection(&self) -> Result<Object<AsyncMysqlConnection>, StoreError> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazily initialized global database connection pool
static DB_POOL: Lazy<Pool<AsyncMysqlConnection>> = Lazy::new(|| {
    dotenv().ok();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let config = AsyncDieselConnectionManager::<AsyncMysqlConnection>::new(database_url);
    let pool = Pool::builder(config)
        .build()
        .expect("Failed to create database connection pool");

    tracing::info!("DB connection pool created");

    pool
});
