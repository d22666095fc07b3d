use clap::{Args, Subcommand};

use super::OutputFormat;
use crate::db::ActivityLog;
use crate::models::{Activity, Category, Mood, User};

/// Activity fields as entered on the command line.
#[derive(Subcommand, Clone)]
pub enum ActivityInput {
    /// Food eaten
    Diet {
        #[arg(long)]
        food: String,
        #[arg(long)]
        calories: i32,
    },

    /// A workout
    Exercise {
        /// What kind of exercise (e.g. Running)
        #[arg(long = "type", value_name = "TYPE")]
        exercise_type: String,
        /// Duration in minutes
        #[arg(long)]
        duration: i32,
        #[arg(long)]
        calories_burned: i32,
    },

    /// Step count
    Steps { steps: i32 },

    /// Mood and sleep
    MentalHealth {
        /// happy, neutral, angry, sad, or a score from 1 to 5
        #[arg(long)]
        mood: Mood,
        #[arg(long)]
        sleep_hours: f64,
    },

    /// Water drunk, in liters
    #[command(alias = "water-intake")]
    Water { liters: f64 },
}

impl From<ActivityInput> for Activity {
    fn from(input: ActivityInput) -> Self {
        match input {
            ActivityInput::Diet { food, calories } => Activity::Diet {
                food_item: food,
                calories,
            },
            ActivityInput::Exercise {
                exercise_type,
                duration,
                calories_burned,
            } => Activity::Exercise {
                exercise_type,
                duration,
                calories_burned,
            },
            ActivityInput::Steps { steps } => Activity::Steps { steps },
            ActivityInput::MentalHealth { mood, sleep_hours } => {
                Activity::MentalHealth { mood, sleep_hours }
            }
            ActivityInput::Water { liters } => Activity::WaterIntake { liters },
        }
    }
}

#[derive(Args)]
pub struct LogCommand {
    #[command(subcommand)]
    pub activity: ActivityInput,

    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,
}

impl LogCommand {
    pub async fn run(
        &self,
        log: &ActivityLog,
        user: &User,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let activity: Activity = self.activity.clone().into();
        let pending = log.track(user.id, activity.clone())?;
        let category = pending.category();
        if let OutputFormat::Text = self.format {
            println!("{}", pending.summary());
        }

        // The process exits after this command, which would abort a detached save.
        let activity_id = pending.wait().await.map_err(|e| {
            format!(
                "Failed to log {} activity: {}",
                category.label().to_lowercase(),
                e
            )
        })?;

        match self.format {
            OutputFormat::Json => {
                let logged = serde_json::json!({
                    "activity_id": activity_id,
                    "activity": activity,
                });
                println!("{}", serde_json::to_string_pretty(&logged)?);
            }
            OutputFormat::Text => {
                println!(
                    "{} logged successfully! (activity #{})",
                    category.label(),
                    activity_id
                );
            }
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct UpdateCommand {
    /// Activity ID (see `summary`)
    pub activity_id: i64,

    #[command(subcommand)]
    pub activity: ActivityInput,
}

impl UpdateCommand {
    pub async fn run(
        &self,
        log: &ActivityLog,
        user: &User,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let activity: Activity = self.activity.clone().into();
        let changed = log.update(user.id, self.activity_id, &activity).await?;

        if changed == 0 {
            println!(
                "No {} activity with id {}; nothing changed",
                activity.category().label(),
                self.activity_id
            );
        } else {
            println!(
                "Updated {} activity #{}",
                activity.category().label(),
                self.activity_id
            );
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct DeleteCommand {
    /// diet, exercise, steps, mental_health or water_intake
    pub category: Category,

    pub activity_id: i64,
}

impl DeleteCommand {
    pub async fn run(
        &self,
        log: &ActivityLog,
        user: &User,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let removed = log.delete(user.id, self.category, self.activity_id).await?;

        if removed == 0 {
            println!(
                "No {} activity with id {}; nothing deleted",
                self.category.label(),
                self.activity_id
            );
        } else {
            println!(
                "Deleted {} activity #{}",
                self.category.label(),
                self.activity_id
            );
        }
        Ok(())
    }
}
