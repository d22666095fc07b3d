use sqlx::SqlitePool;

use super::provision;
use crate::models::Category;

/// Order in which categories are cleared.
const RESET_ORDER: [Category; 5] = [
    Category::Diet,
    Category::Steps,
    Category::WaterIntake,
    Category::MentalHealth,
    Category::Exercise,
];

/// Delete all of a user's rows in every category, all or nothing.
///
/// Runs in one transaction: if any delete fails the transaction is dropped
/// (rolled back) and the error is returned. Tables that were never written
/// are provisioned first so a partial history is not a failure.
pub async fn reset_all(pool: &SqlitePool, user_id: i64) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let mut removed = 0;
    for category in RESET_ORDER {
        provision::ensure_table(&mut tx, category).await?;

        let sql = format!("DELETE FROM {} WHERE user_id = ?", category.table());
        let result = sqlx::query(&sql).bind(user_id).execute(&mut *tx).await?;
        removed += result.rows_affected();
    }

    tx.commit().await?;

    tracing::info!(user_id, removed, "Reset all activity data");
    Ok(())
}
