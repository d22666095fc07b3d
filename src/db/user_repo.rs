use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::{Gender, NewUser, User};
use crate::password::{self, PasswordError};

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User '{0}' already exists")]
    AlreadyExists(String),

    #[error("Creating user failed, no rows affected.")]
    NoRowsAffected,

    #[error("Creating user failed, no ID obtained.")]
    NoIdReturned,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Password hashing did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Credential store backed by the `users` table.
pub struct UserRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    name: String,
    age: i32,
    gender: String,
    weight: f64,
    height: f64,
    created_at: String,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check a username/password pair.
    ///
    /// Unknown user, wrong password and storage failures all come back as
    /// `false`; the caller cannot tell them apart.
    pub async fn validate(&self, username: &str, password: &str) -> bool {
        let row: Result<Option<(String,)>, sqlx::Error> =
            sqlx::query_as("SELECT password_hash FROM users WHERE username = ?")
                .bind(username)
                .fetch_optional(&self.pool)
                .await;

        match row {
            Ok(Some((hash,))) => {
                let candidate = password.to_owned();
                let verified = tokio::task::spawn_blocking(move || {
                    password::verify_password(&candidate, &hash)
                })
                .await;

                match verified {
                    Ok(Ok(matches)) => matches,
                    Ok(Err(e)) => {
                        tracing::warn!("Stored credentials for '{}' are unreadable: {}", username, e);
                        false
                    }
                    Err(e) => {
                        tracing::warn!("Credential check for '{}' did not complete: {}", username, e);
                        false
                    }
                }
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("Credential lookup for '{}' failed: {}", username, e);
                false
            }
        }
    }

    /// Insert a new user and return the generated id.
    ///
    /// There is no pre-insert duplicate check; the `UNIQUE` constraint on
    /// `username` rejects duplicates.
    pub async fn create_user(&self, user: &NewUser) -> Result<i64, UserError> {
        let plaintext = user.password.clone();
        let password_hash =
            tokio::task::spawn_blocking(move || password::hash_password(&plaintext)).await??;
        let created_at = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, name, age, gender, weight, height, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.username)
        .bind(&password_hash)
        .bind(&user.name)
        .bind(user.age)
        .bind(user.gender.code())
        .bind(user.weight)
        .bind(user.height)
        .bind(&created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                UserError::AlreadyExists(user.username.clone())
            }
            other => UserError::Database(other),
        })?;

        if result.rows_affected() == 0 {
            return Err(UserError::NoRowsAffected);
        }
        let id = result.last_insert_rowid();
        if id == 0 {
            return Err(UserError::NoIdReturned);
        }

        tracing::info!("Registered user '{}' with id {}", user.username, id);
        Ok(id)
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, name, age, gender, weight, height, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(hydrate_user))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, name, age, gender, weight, height, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(hydrate_user))
    }
}

fn hydrate_user(row: UserRow) -> User {
    User {
        id: row.id,
        username: row.username,
        name: row.name,
        age: row.age,
        gender: row.gender.parse().unwrap_or(Gender::Other),
        weight: row.weight,
        height: row.height,
        created_at: DateTime::parse_from_rfc3339(&row.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    }
}
