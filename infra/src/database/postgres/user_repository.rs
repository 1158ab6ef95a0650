//! Postgres implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use acct_core::context::RequestContext;
use acct_core::domain::entities::user::User;
use acct_core::errors::DomainError;
use acct_core::repositories::UserRepository;

const USER_COLUMNS: &str = "uid, email, password, name, image_url, website";

/// SQLSTATE for `unique_violation`
const UNIQUE_VIOLATION: &str = "23505";

/// Postgres implementation of UserRepository
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
        let column = |e: sqlx::Error| DomainError::internal(format!("Failed to read user row: {}", e));

        Ok(User {
            uid: row.try_get("uid").map_err(column)?,
            email: row.try_get("email").map_err(column)?,
            password: row.try_get("password").map_err(column)?,
            name: row.try_get("name").map_err(column)?,
            image_url: row.try_get("image_url").map_err(column)?,
            website: row.try_get("website").map_err(column)?,
        })
    }

    async fn fetch_one_by(
        &self,
        ctx: &RequestContext,
        resource: &str,
        value: String,
        query: sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments>,
    ) -> Result<User, DomainError> {
        let row = ctx
            .run(query.fetch_optional(&self.pool))
            .await?
            .map_err(|e| query_failed(e, resource))?;

        match row {
            Some(row) => Self::row_to_user(&row),
            None => Err(DomainError::not_found(resource, value)),
        }
    }
}

/// Map a write failure, turning a duplicate email into `Conflict`
fn write_failed(err: sqlx::Error, email: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return DomainError::conflict("email", email);
        }
    }
    tracing::error!(error = %err, "User write failed");
    DomainError::internal(format!("Failed to write user: {}", err))
}

fn query_failed(err: sqlx::Error, column: &str) -> DomainError {
    tracing::error!(error = %err, column, "User query failed");
    DomainError::internal(format!("Database query failed: {}", err))
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, ctx: &RequestContext, uid: Uuid) -> Result<User, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE uid = $1", USER_COLUMNS);
        self.fetch_one_by(ctx, "uid", uid.to_string(), sqlx::query(&sql).bind(uid))
            .await
    }

    async fn find_by_email(&self, ctx: &RequestContext, email: &str) -> Result<User, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        self.fetch_one_by(ctx, "email", email.to_string(), sqlx::query(&sql).bind(email))
            .await
    }

    async fn create(&self, ctx: &RequestContext, user: &User) -> Result<User, DomainError> {
        let sql = format!(
            "INSERT INTO users (uid, email, password, name, image_url, website) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            USER_COLUMNS
        );

        let row = ctx
            .run(
                sqlx::query(&sql)
                    .bind(user.uid)
                    .bind(&user.email)
                    .bind(&user.password)
                    .bind(&user.name)
                    .bind(&user.image_url)
                    .bind(&user.website)
                    .fetch_one(&self.pool),
            )
            .await?
            .map_err(|e| write_failed(e, &user.email))?;

        Self::row_to_user(&row)
    }

    async fn update(&self, ctx: &RequestContext, user: &User) -> Result<User, DomainError> {
        let sql = format!(
            "UPDATE users SET name = $2, email = $3, website = $4, updated_at = NOW() \
             WHERE uid = $1 RETURNING {}",
            USER_COLUMNS
        );

        let row = ctx
            .run(
                sqlx::query(&sql)
                    .bind(user.uid)
                    .bind(&user.name)
                    .bind(&user.email)
                    .bind(&user.website)
                    .fetch_optional(&self.pool),
            )
            .await?
            .map_err(|e| write_failed(e, &user.email))?;

        match row {
            Some(row) => Self::row_to_user(&row),
            None => Err(DomainError::not_found("uid", user.uid.to_string())),
        }
    }

    async fn update_image(
        &self,
        ctx: &RequestContext,
        uid: Uuid,
        image_url: &str,
    ) -> Result<User, DomainError> {
        let sql = format!(
            "UPDATE users SET image_url = $2, updated_at = NOW() WHERE uid = $1 RETURNING {}",
            USER_COLUMNS
        );

        let row = ctx
            .run(
                sqlx::query(&sql)
                    .bind(uid)
                    .bind(image_url)
                    .fetch_optional(&self.pool),
            )
            .await?
            .map_err(|e| query_failed(e, "image_url"))?;

        match row {
            Some(row) => Self::row_to_user(&row),
            None => Err(DomainError::not_found("uid", uid.to_string())),
        }
    }
}
