use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result, USER_NOT_FOUND};
use crate::models::user::{NewUser, User, UserChanges};
use crate::utils::crypto::hash_user_password;
use crate::utils::validation::{check_nickname, check_password, check_username};

const USER_COLUMNS: &str =
    "id, uuid, username, nickname, password, active, state, created_at, updated_at";

/// Persistence operations over the `users` table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user. Fails with [`Error::Constraint`] when the username
    /// is taken or a field breaks a storage invariant.
    async fn create(&self, new_user: NewUser) -> Result<User>;

    /// Fails with [`Error::NotFound`] when no user has this username.
    async fn get_by_username(&self, username: &str) -> Result<User>;

    /// Rewrites username, password and nickname of the user currently named
    /// `username`. Returns the number of rows changed, 0 when none matched.
    async fn update_by_username(&self, username: &str, changes: UserChanges) -> Result<u64>;

    /// Returns the number of rows removed.
    async fn delete_by_username(&self, username: &str) -> Result<u64>;

    async fn ping(&self) -> Result<()>;
}

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn check_fields(username: &str, password: &str, nickname: &str) -> Result<()> {
    check_username(username)?;
    check_password(password)?;
    check_nickname(nickname)?;
    Ok(())
}

#[async_trait]
impl UserStore for UserService {
    async fn create(&self, new_user: NewUser) -> Result<User> {
        check_fields(&new_user.username, &new_user.password, &new_user.nickname)?;
        let password_hash = hash_user_password(&new_user.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (uuid, username, nickname, password)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&new_user.username)
        .bind(&new_user.nickname)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(user_id = user.id, username = %user.username, "user created");
        Ok(user)
    }

    async fn get_by_username(&self, username: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = $1 LIMIT 1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or_else(|| Error::NotFound(USER_NOT_FOUND.to_string()))
    }

    async fn update_by_username(&self, username: &str, changes: UserChanges) -> Result<u64> {
        check_fields(&changes.username, &changes.password, &changes.nickname)?;
        let password_hash = hash_user_password(&changes.password)?;

        let mut tx = self.pool.begin().await?;

        let id: Option<i64> =
            sqlx::query_scalar("SELECT id FROM users WHERE username = $1 FOR UPDATE")
                .bind(username)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(id) = id else {
            tracing::debug!(%username, "no user to update");
            return Ok(0);
        };

        let result = sqlx::query(
            r#"
            UPDATE users
            SET
                username = $2,
                password = $3,
                nickname = $4,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&changes.username)
        .bind(password_hash)
        .bind(&changes.nickname)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(user_id = id, username = %changes.username, "user updated");
        Ok(result.rows_affected())
    }

    async fn delete_by_username(&self, username: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await?;

        tracing::debug!(%username, rows = result.rows_affected(), "user deleted");
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
