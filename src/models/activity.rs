use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::category::Category;
use crate::validation::{self, ValidationError};

/// Mood rating on a 1 (worst) to 5 (best) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "i32")]
pub struct Mood(i32);

impl Mood {
    pub const HAPPY: Mood = Mood(5);
    pub const NEUTRAL: Mood = Mood(3);
    pub const ANGRY: Mood = Mood(2);
    pub const SAD: Mood = Mood(1);

    pub fn new(score: i32) -> Result<Self, ValidationError> {
        if (1..=5).contains(&score) {
            Ok(Mood(score))
        } else {
            Err(ValidationError::InvalidNumeric(
                "Mood must be between 1 and 5.".to_string(),
            ))
        }
    }

    pub fn score(&self) -> i32 {
        self.0
    }
}

impl From<Mood> for i32 {
    fn from(mood: Mood) -> Self {
        mood.0
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "happy" => Ok(Mood::HAPPY),
            "neutral" => Ok(Mood::NEUTRAL),
            "angry" => Ok(Mood::ANGRY),
            "sad" => Ok(Mood::SAD),
            other => {
                let score: i32 = other.parse().map_err(|_| {
                    format!(
                        "Invalid mood '{}'. Valid options: happy, neutral, angry, sad, or 1-5",
                        s
                    )
                })?;
                Mood::new(score).map_err(|e| e.to_string())
            }
        }
    }
}

/// A single loggable activity. The variant selects the category table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Activity {
    Diet {
        food_item: String,
        calories: i32,
    },
    Exercise {
        /// Free-form label ("Running"). Only used in the summary text.
        exercise_type: String,
        duration: i32,
        calories_burned: i32,
    },
    Steps {
        steps: i32,
    },
    MentalHealth {
        mood: Mood,
        sleep_hours: f64,
    },
    WaterIntake {
        liters: f64,
    },
}

impl Activity {
    pub fn category(&self) -> Category {
        match self {
            Activity::Diet { .. } => Category::Diet,
            Activity::Exercise { .. } => Category::Exercise,
            Activity::Steps { .. } => Category::Steps,
            Activity::MentalHealth { .. } => Category::MentalHealth,
            Activity::WaterIntake { .. } => Category::WaterIntake,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Activity::Diet {
                food_item,
                calories,
            } => {
                validation::require_text("Food item", food_item)?;
                validation::require_non_negative("Calories", *calories)
            }
            Activity::Exercise {
                duration,
                calories_burned,
                ..
            } => {
                validation::require_non_negative("Duration", *duration)?;
                validation::require_non_negative("Calories burned", *calories_burned)
            }
            Activity::Steps { steps } => validation::require_non_negative("Steps", *steps),
            Activity::MentalHealth { sleep_hours, .. } => {
                validation::require_sleep_hours(*sleep_hours)
            }
            Activity::WaterIntake { liters } => validation::require_positive("Water intake", *liters),
        }
    }
}

/// Human-readable one-liner, printed when an activity is tracked.
impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activity::Diet {
                food_item,
                calories,
            } => write!(f, "Consumed {}: {} calories", food_item, calories),
            Activity::Exercise {
                exercise_type,
                duration,
                calories_burned,
            } => write!(
                f,
                "Performed {} for {} minutes, burned {} calories.",
                exercise_type, duration, calories_burned
            ),
            Activity::Steps { steps } => write!(f, "Tracked {} steps", steps),
            Activity::MentalHealth { mood, sleep_hours } => write!(
                f,
                "Mood level: {}/5, Slept {} hours",
                mood.score(),
                sleep_hours
            ),
            Activity::WaterIntake { liters } => {
                write!(f, "Consumed {} liters of water.", liters)
            }
        }
    }
}
