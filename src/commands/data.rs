use clap::Args;
use sqlx::SqlitePool;

use super::OutputFormat;
use crate::db::{reset, summary};
use crate::models::{Category, User};

#[derive(Args)]
pub struct SummaryCommand {
    /// diet, exercise, steps, mental_health or water_intake
    pub category: Category,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl SummaryCommand {
    pub async fn run(
        &self,
        pool: &SqlitePool,
        user: &User,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let lines = summary::list_all(pool, self.category, user.id)
            .await
            .map_err(|e| format!("Failed to fetch data from the database: {}", e))?;

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&lines)?);
            }
            OutputFormat::Text => {
                if lines.is_empty() {
                    println!("No {} entries logged yet.", self.category.label());
                    return Ok(());
                }
                println!("{} ({})", self.category.label(), user.username);
                println!("{}", "=".repeat(30));
                for line in &lines {
                    println!("{}", line);
                }
            }
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct ResetCommand {
    /// Confirm that all of your data should be deleted
    #[arg(long)]
    pub yes: bool,
}

impl ResetCommand {
    pub async fn run(
        &self,
        pool: &SqlitePool,
        user: &User,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !self.yes {
            return Err(
                "This will permanently delete all of your data. Re-run with --yes to confirm."
                    .into(),
            );
        }

        reset::reset_all(pool, user.id)
            .await
            .map_err(|e| format!("Failed to reset your data: {}", e))?;

        println!("Your data has been successfully reset.");
        Ok(())
    }
}
