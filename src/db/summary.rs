//! Text rendering of a user's rows in one category.

use serde::ser::{Serialize, SerializeMap, Serializer};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, SqlitePool};
use std::fmt;

use super::provision;
use crate::models::Category;

/// One rendered row: `(column, value)` pairs in table column order.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub fields: Vec<(String, String)>,
}

impl SummaryLine {
    #[cfg(test)]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}

/// Every column, the last one included, is followed by `" | "`.
impl fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.fields {
            write!(f, "{}: {} | ", name, value)?;
        }
        Ok(())
    }
}

impl Serialize for SummaryLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

fn select_sql(category: Category) -> String {
    let mut columns = vec![
        "CAST(activity_id AS TEXT) AS activity_id".to_string(),
        "date".to_string(),
    ];
    columns.extend(
        category
            .fields()
            .iter()
            .map(|(name, _)| format!("CAST({name} AS TEXT) AS {name}")),
    );
    format!(
        "SELECT {} FROM {} WHERE user_id = ? ORDER BY activity_id",
        columns.join(", "),
        category.table()
    )
}

fn render_row(row: &SqliteRow) -> Result<SummaryLine, sqlx::Error> {
    let mut fields = Vec::with_capacity(row.columns().len());
    for column in row.columns() {
        let value: Option<String> = row.try_get(column.ordinal())?;
        fields.push((
            column.name().to_string(),
            value.unwrap_or_else(|| "null".to_string()),
        ));
    }
    Ok(SummaryLine { fields })
}

/// Every row the user has in `category`, oldest first.
///
/// Runs a fresh query on each call. A category that has never been written
/// to has no table yet and yields an empty list.
pub async fn list_all(
    pool: &SqlitePool,
    category: Category,
    user_id: i64,
) -> Result<Vec<SummaryLine>, sqlx::Error> {
    let mut conn = pool.acquire().await?;
    if !provision::table_exists(&mut conn, category).await? {
        return Ok(Vec::new());
    }

    let sql = select_sql(category);
    let rows = sqlx::query(&sql)
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;

    rows.iter().map(render_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{create_user, setup_db};
    use crate::db::ActivityLog;
    use crate::models::{Activity, Mood};
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    #[test]
    fn test_line_display() {
        let line = SummaryLine {
            fields: vec![
                ("activity_id".into(), "1".into()),
                ("steps".into(), "4200".into()),
            ],
        };
        assert_eq!(line.to_string(), "activity_id: 1 | steps: 4200 | ");
    }

    #[test]
    fn test_line_serializes_as_ordered_map() {
        let line = SummaryLine {
            fields: vec![
                ("activity_id".into(), "1".into()),
                ("date".into(), "2024-05-17".into()),
            ],
        };
        assert_eq!(
            serde_json::to_string(&line).unwrap(),
            r#"{"activity_id":"1","date":"2024-05-17"}"#
        );
    }

    #[tokio::test]
    async fn test_unprovisioned_category_is_empty() {
        let ctx = setup_db().await;
        let user_id = create_user(&ctx.pool, "alice").await;

        let lines = list_all(&ctx.pool, Category::Exercise, user_id).await.unwrap();
        assert!(lines.is_empty());

        // Reading does not create the table
        let mut conn = ctx.pool.acquire().await.unwrap();
        assert!(!provision::table_exists(&mut conn, Category::Exercise)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_diet_round_trip() {
        let ctx = setup_db().await;
        let user_id = create_user(&ctx.pool, "alice").await;
        let log = ActivityLog::new(ctx.pool.clone());

        let id = log
            .save(
                user_id,
                &Activity::Diet {
                    food_item: "Apple".into(),
                    calories: 95,
                },
                day(),
            )
            .await
            .unwrap();

        let lines = list_all(&ctx.pool, Category::Diet, user_id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0].to_string(),
            format!(
                "activity_id: {} | date: 2024-05-17 | food_item: Apple | calories: 95 | ",
                id
            )
        );
        assert_eq!(lines[0].get("food_item"), Some("Apple"));
        assert_eq!(lines[0].get("user_id"), None);
    }

    #[tokio::test]
    async fn test_real_columns_render() {
        let ctx = setup_db().await;
        let user_id = create_user(&ctx.pool, "alice").await;
        let log = ActivityLog::new(ctx.pool.clone());

        log.save(
            user_id,
            &Activity::MentalHealth {
                mood: Mood::HAPPY,
                sleep_hours: 7.5,
            },
            day(),
        )
        .await
        .unwrap();
        log.save(user_id, &Activity::WaterIntake { liters: 2.25 }, day())
            .await
            .unwrap();

        let mental = list_all(&ctx.pool, Category::MentalHealth, user_id)
            .await
            .unwrap();
        assert_eq!(mental[0].get("mood"), Some("5"));
        assert_eq!(mental[0].get("sleep_hours"), Some("7.5"));

        let water = list_all(&ctx.pool, Category::WaterIntake, user_id)
            .await
            .unwrap();
        assert_eq!(water[0].get("liters"), Some("2.25"));
    }

    #[tokio::test]
    async fn test_rows_in_insert_order_and_user_scoped() {
        let ctx = setup_db().await;
        let alice = create_user(&ctx.pool, "alice").await;
        let bob = create_user(&ctx.pool, "bob").await;
        let log = ActivityLog::new(ctx.pool.clone());

        for steps in [1000, 2000, 3000] {
            log.save(alice, &Activity::Steps { steps }, day())
                .await
                .unwrap();
        }
        log.save(bob, &Activity::Steps { steps: 9999 }, day())
            .await
            .unwrap();

        let lines = list_all(&ctx.pool, Category::Steps, alice).await.unwrap();
        let steps: Vec<&str> = lines.iter().filter_map(|l| l.get("steps")).collect();
        assert_eq!(steps, vec!["1000", "2000", "3000"]);

        let bob_lines = list_all(&ctx.pool, Category::Steps, bob).await.unwrap();
        assert_eq!(bob_lines.len(), 1);
        assert_eq!(bob_lines[0].get("steps"), Some("9999"));
    }

    #[tokio::test]
    async fn test_each_call_sees_fresh_data() {
        let ctx = setup_db().await;
        let user_id = create_user(&ctx.pool, "alice").await;
        let log = ActivityLog::new(ctx.pool.clone());

        log.save(user_id, &Activity::Steps { steps: 1 }, day())
            .await
            .unwrap();
        assert_eq!(list_all(&ctx.pool, Category::Steps, user_id).await.unwrap().len(), 1);

        log.save(user_id, &Activity::Steps { steps: 2 }, day())
            .await
            .unwrap();
        assert_eq!(list_all(&ctx.pool, Category::Steps, user_id).await.unwrap().len(), 2);
    }
}
