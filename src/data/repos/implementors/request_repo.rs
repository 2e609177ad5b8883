use crate::data::database::Database;
use crate::data::models::manager_request::{ManagerRequest, NewManagerRequest, RequestStatus};
use crate::data::repos::traits::stores::{RequestStore, StoreError};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

fn query_err(e: result::Error) -> StoreError {
    StoreError::Query(e.to_string())
}

pub struct RequestRepo {
    db: Database,
}

impl RequestRepo {
    pub fn new() -> Self {
        RequestRepo { db: Database::new() }
    }
}

#[async_trait]
impl RequestStore for RequestRepo {
    async fn insert_request(
        &self,
        request: NewManagerRequest,
    ) -> Result<ManagerRequest, StoreError> {
        use crate::data::models::schema::manager_requests::dsl::manager_requests;

        let mut conn = self.db.connection().await?;

        let new_id: i32 = conn
            .transaction::<_, result::Error, _>(|connection| {
                async move {
                    diesel::insert_into(manager_requests)
                        .values(&request)
                        .execute(connection)
                        .await?;

                    diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>(
                        "LAST_INSERT_ID()",
                    ))
                    .get_result(connection)
                    .await
                }
                .scope_boxed()
            })
            .await
            .map_err(query_err)?;

        self.get_by_id(new_id)
            .await?
            .ok_or_else(|| StoreError::Query("inserted manager request not found".to_string()))
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<ManagerRequest>, StoreError> {
        use crate::data::models::schema::manager_requests::dsl::{manager_requests, request_id};

        let mut conn = self.db.connection().await?;

        match manager_requests
            .filter(request_id.eq(id))
            .first::<ManagerRequest>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(query_err(e)),
        }
    }

    async fn find_latest_by_user(&self, id: i32) -> Result<Option<ManagerRequest>, StoreError> {
        use crate::data::models::schema::manager_requests::dsl::{
            created_at, manager_requests, user_id,
        };

        let mut conn = self.db.connection().await?;

        match manager_requests
            .filter(user_id.eq(id))
            .order(created_at.desc())
            .first::<ManagerRequest>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(query_err(e)),
        }
    }

    async fn list_pending(&self) -> Result<Vec<ManagerRequest>, StoreError> {
        use crate::data::models::schema::manager_requests::dsl::{
            created_at, manager_requests, status,
        };

        let mut conn = self.db.connection().await?;

        manager_requests
            .filter(status.eq(RequestStatus::Pending.as_str()))
            .order(created_at.desc())
            .load::<ManagerRequest>(&mut conn)
            .await
            .map_err(query_err)
    }

    async fn set_review(
        &self,
        id: i32,
        new_status: &str,
        reviewer: i32,
        at: NaiveDateTime,
    ) -> Result<Option<ManagerRequest>, StoreError> {
        use crate::data::models::schema::manager_requests::dsl::{
            manager_requests, request_id, reviewed_at, reviewed_by, status, updated_at,
        };

        let mut conn = self.db.connection().await?;

        diesel::update(manager_requests.filter(request_id.eq(id)))
            .set((
                status.eq(new_status),
                reviewed_by.eq(reviewer),
                reviewed_at.eq(at),
                updated_at.eq(at),
            ))
            .execute(&mut conn)
            .await
            .map_err(query_err)?;

        self.get_by_id(id).await
    }
}

impl Default for RequestRepo {
    fn default() -> Self {
        Self::new()
    }
}
