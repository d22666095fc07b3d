//! Lazy creation of category tables.
//!
//! Every category has one shared table keyed by `user_id`. Nothing creates
//! these tables up front: each write path calls [`ensure_table`] first, every
//! time. The statements are `IF NOT EXISTS`, so concurrent callers need no
//! coordination beyond what SQLite already does.

use sqlx::SqliteConnection;

use crate::models::Category;

fn create_table_sql(category: Category) -> String {
    let fields: Vec<String> = category
        .fields()
        .iter()
        .map(|(name, sql_type)| format!("{} {} NOT NULL", name, sql_type))
        .collect();

    format!(
        "CREATE TABLE IF NOT EXISTS {table} (\
            activity_id INTEGER PRIMARY KEY AUTOINCREMENT, \
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE, \
            date TEXT NOT NULL, \
            {fields})",
        table = category.table(),
        fields = fields.join(", "),
    )
}

fn create_index_sql(category: Category) -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS idx_{table}_user_id ON {table} (user_id)",
        table = category.table()
    )
}

/// Create the category table and its `user_id` index if they are missing.
pub async fn ensure_table(
    conn: &mut SqliteConnection,
    category: Category,
) -> Result<(), sqlx::Error> {
    sqlx::query(&create_table_sql(category))
        .execute(&mut *conn)
        .await?;
    sqlx::query(&create_index_sql(category))
        .execute(&mut *conn)
        .await?;
    tracing::trace!("Provisioned table {}", category.table());
    Ok(())
}

/// Whether the category table has been provisioned yet. Read paths use this
/// instead of creating the table.
pub async fn table_exists(
    conn: &mut SqliteConnection,
    category: Category,
) -> Result<bool, sqlx::Error> {
    let (exists,): (bool,) = sqlx::query_as(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?)",
    )
    .bind(category.table())
    .fetch_one(&mut *conn)
    .await?;
    Ok(exists)
}
