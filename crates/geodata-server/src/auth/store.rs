//! Credential-store access.
//!
//! Accounts are the password-bearing identities behind `/token` and the
//! admin endpoints. They are unrelated to the collector `users` table that
//! `user_data` rows reference.

use sqlx::PgPool;

/// One row of the `accounts` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub hashed_password: String,
    pub refresh_token: Option<String>,
    pub disabled: bool,
    pub is_admin: bool,
}

/// Fetch an account by username, if present.
pub async fn find_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        r#"
        SELECT id, username, email, full_name, hashed_password,
               refresh_token, disabled, is_admin
        FROM accounts
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Insert a new account and return the stored row.
pub async fn insert(
    pool: &PgPool,
    username: &str,
    email: &str,
    full_name: Option<&str>,
    hashed_password: &str,
    is_admin: bool,
) -> Result<Account, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        r#"
        INSERT INTO accounts (username, email, full_name, hashed_password, is_admin)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, username, email, full_name, hashed_password,
                  refresh_token, disabled, is_admin
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(full_name)
    .bind(hashed_password)
    .bind(is_admin)
    .fetch_one(pool)
    .await
}

/// Delete an account by username; returns the number of rows removed.
pub async fn delete_by_username(pool: &PgPool, username: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM accounts WHERE username = $1")
        .bind(username)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Replace the stored refresh token for an account.
///
/// Each account holds at most one live refresh token; storing a new one
/// invalidates whatever was issued before.
pub async fn set_refresh_token(
    pool: &PgPool,
    username: &str,
    refresh_token: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE accounts SET refresh_token = $2 WHERE username = $1")
        .bind(username)
        .bind(refresh_token)
        .execute(pool)
        .await?;
    Ok(())
}
