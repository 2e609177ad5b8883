use crate::data::database::Database;
use crate::data::models::user::{NewUser, Role, RoleAssignment, User};
use crate::data::repos::traits::stores::{StoreError, UserStore};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use std::str::FromStr;

fn query_err(e: result::Error) -> StoreError {
    StoreError::Query(e.to_string())
}

pub struct UserRepo {
    db: Database,
}

impl UserRepo {
    pub fn new() -> Self {
        UserRepo { db: Database::new() }
    }
}

#[async_trait]
impl UserStore for UserRepo {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        use crate::data::models::schema::users::dsl::users;

        let mut conn = self.db.connection().await?;

        let new_id: i32 = conn
            .transaction::<_, result::Error, _>(|connection| {
                async move {
                    diesel::insert_into(users)
                        .values(&user)
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
            .ok_or_else(|| StoreError::Query("inserted user row not found".to_string()))
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        use crate::data::models::schema::users::dsl::{user_id, users};

        let mut conn = self.db.connection().await?;

        match users.filter(user_id.eq(id)).first::<User>(&mut conn).await {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(query_err(e)),
        }
    }

    async fn get_by_email(&self, email_query: &str) -> Result<Option<User>, StoreError> {
        use crate::data::models::schema::users::dsl::{email, users};

        let mut conn = self.db.connection().await?;

        match users
            .filter(email.eq(email_query))
            .first::<User>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(query_err(e)),
        }
    }

    async fn role_of(&self, id: i32) -> Result<Option<Role>, StoreError> {
        use crate::data::models::schema::user_roles::dsl::{user_id, user_roles};

        let mut conn = self.db.connection().await?;

        match user_roles
            .filter(user_id.eq(id))
            .first::<RoleAssignment>(&mut conn)
            .await
        {
            Ok(row) => Ok(Role::from_str(&row.role).ok()),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(query_err(e)),
        }
    }

    async fn set_role(&self, id: i32, new_role: Role) -> Result<(), StoreError> {
        use crate::data::models::schema::user_roles::dsl::{role, updated_at, user_id, user_roles};

        let mut conn = self.db.connection().await?;

        let existing = user_roles
            .filter(user_id.eq(id))
            .first::<RoleAssignment>(&mut conn)
            .await;

        match existing {
            Ok(_) => {
                let now = chrono::Utc::now().naive_utc();
                diesel::update(user_roles.filter(user_id.eq(id)))
                    .set((role.eq(new_role.as_str()), updated_at.eq(now)))
                    .execute(&mut conn)
                    .await
                    .map_err(query_err)?;
            }
            Err(result::Error::NotFound) => {
                diesel::insert_into(user_roles)
                    .values((user_id.eq(id), role.eq(new_role.as_str())))
                    .execute(&mut conn)
                    .await
                    .map_err(query_err)?;
            }
            Err(e) => return Err(query_err(e)),
        }

        Ok(())
    }

    async fn list_assignments(&self) -> Result<Vec<RoleAssignment>, StoreError> {
        use crate::data::models::schema::user_roles::dsl::{role, user_roles};

        let mut conn = self.db.connection().await?;

        user_roles
            .order(role.asc())
            .load::<RoleAssignment>(&mut conn)
            .await
            .map_err(query_err)
    }
}

impl Default for UserRepo {
    fn default() -> Self {
        Self::new()
    }
}
