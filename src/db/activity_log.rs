use chrono::{Local, NaiveDate};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::SqlitePool;
use tokio::task::JoinHandle;

use super::provision;
use crate::models::{Activity, Category};
use crate::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Save task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("No async runtime to run the save on: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

/// Records, updates and deletes activity rows.
#[derive(Clone)]
pub struct ActivityLog {
    pool: SqlitePool,
}

/// A save running in the background.
///
/// Await [`PendingSave::wait`] to learn the outcome, or drop the handle to let
/// the save finish on its own. Failures are logged either way.
#[derive(Debug)]
pub struct PendingSave {
    category: Category,
    summary: String,
    handle: JoinHandle<Result<i64, ActivityError>>,
}

impl PendingSave {
    pub fn category(&self) -> Category {
        self.category
    }

    /// Human-readable description of what is being saved.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Wait for the insert and return the new `activity_id`.
    pub async fn wait(self) -> Result<i64, ActivityError> {
        self.handle.await?
    }
}

impl ActivityLog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record an activity for today without waiting for it to be persisted.
    ///
    /// Payload validation happens here, before anything is spawned, so a bad
    /// payload is an immediate error, as is calling this outside a tokio
    /// runtime.
    pub fn track(&self, user_id: i64, activity: Activity) -> Result<PendingSave, ActivityError> {
        activity.validate()?;
        let runtime = tokio::runtime::Handle::try_current()?;

        let category = activity.category();
        let summary = activity.to_string();
        tracing::info!(user_id, %category, "{}", summary);

        let log = self.clone();
        let date = Local::now().date_naive();
        let handle = runtime.spawn(async move {
            let result = log.save(user_id, &activity, date).await;
            if let Err(e) = &result {
                tracing::error!(
                    "Error saving {} activity to the database: {}",
                    category.label(),
                    e
                );
            }
            result
        });

        Ok(PendingSave {
            category,
            summary,
            handle,
        })
    }

    /// Provision the category table and insert one row, returning its id.
    pub async fn save(
        &self,
        user_id: i64,
        activity: &Activity,
        date: NaiveDate,
    ) -> Result<i64, ActivityError> {
        activity.validate()?;
        let category = activity.category();

        let mut conn = self.pool.acquire().await?;
        provision::ensure_table(&mut conn, category).await?;

        let sql = insert_sql(category);
        let date = date.format("%Y-%m-%d").to_string();
        let query = sqlx::query(&sql).bind(user_id).bind(&date);
        let result = bind_fields(query, activity).execute(&mut *conn).await?;

        let activity_id = result.last_insert_rowid();
        tracing::debug!(user_id, activity_id, %category, "Saved activity");
        Ok(activity_id)
    }

    /// Overwrite the fields of one row. The category comes from the payload.
    ///
    /// Returns the number of rows changed; an unknown id is not an error.
    pub async fn update(
        &self,
        user_id: i64,
        activity_id: i64,
        activity: &Activity,
    ) -> Result<u64, ActivityError> {
        activity.validate()?;
        let category = activity.category();

        let mut conn = self.pool.acquire().await?;
        provision::ensure_table(&mut conn, category).await?;

        let sql = update_sql(category);
        let result = bind_fields(sqlx::query(&sql), activity)
            .bind(activity_id)
            .bind(user_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Delete one row. Returns the number of rows removed; an unknown id is
    /// not an error.
    pub async fn delete(
        &self,
        user_id: i64,
        category: Category,
        activity_id: i64,
    ) -> Result<u64, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        provision::ensure_table(&mut conn, category).await?;

        let sql = format!(
            "DELETE FROM {} WHERE activity_id = ? AND user_id = ?",
            category.table()
        );
        let result = sqlx::query(&sql)
            .bind(activity_id)
            .bind(user_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}

fn insert_sql(category: Category) -> String {
    let fields: Vec<&str> = category.fields().iter().map(|(name, _)| *name).collect();
    let placeholders = vec!["?"; fields.len() + 2].join(", ");
    format!(
        "INSERT INTO {} (user_id, date, {}) VALUES ({})",
        category.table(),
        fields.join(", "),
        placeholders
    )
}

fn update_sql(category: Category) -> String {
    let assignments: Vec<String> = category
        .fields()
        .iter()
        .map(|(name, _)| format!("{} = ?", name))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE activity_id = ? AND user_id = ?",
        category.table(),
        assignments.join(", ")
    )
}

/// Bind the payload fields in the same order as `Category::fields`.
fn bind_fields<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    activity: &'q Activity,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match activity {
        Activity::Diet {
            food_item,
            calories,
        } => query.bind(food_item.as_str()).bind(*calories),
        Activity::Exercise {
            duration,
            calories_burned,
            ..
        } => query.bind(*duration).bind(*calories_burned),
        Activity::Steps { steps } => query.bind(*steps),
        Activity::MentalHealth { mood, sleep_hours } => {
            query.bind(mood.score()).bind(*sleep_hours)
        }
        Activity::WaterIntake { liters } => query.bind(*liters),
    }
}
