use std::fmt;
use std::str::FromStr;

/// One of the five tracked activity kinds. Each maps to its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Diet,
    Exercise,
    Steps,
    MentalHealth,
    WaterIntake,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Diet,
        Category::Exercise,
        Category::Steps,
        Category::MentalHealth,
        Category::WaterIntake,
    ];

    /// Table name. Doubles as the wire token for the category.
    pub fn table(&self) -> &'static str {
        match self {
            Category::Diet => "diet",
            Category::Exercise => "exercise",
            Category::Steps => "steps",
            Category::MentalHealth => "mental_health",
            Category::WaterIntake => "water_intake",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Diet => "Diet",
            Category::Exercise => "Exercise",
            Category::Steps => "Steps",
            Category::MentalHealth => "Mental Health",
            Category::WaterIntake => "Water Intake",
        }
    }

    /// Category-specific columns as `(name, sqlite type)`, in table order.
    pub fn fields(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Category::Diet => &[("food_item", "TEXT"), ("calories", "INTEGER")],
            Category::Exercise => &[("duration", "INTEGER"), ("calories_burned", "INTEGER")],
            Category::Steps => &[("steps", "INTEGER")],
            Category::MentalHealth => &[("mood", "INTEGER"), ("sleep_hours", "REAL")],
            Category::WaterIntake => &[("liters", "REAL")],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        if normalized == "water" {
            return Ok(Category::WaterIntake);
        }
        Category::ALL
            .into_iter()
            .find(|category| category.table() == normalized)
            .ok_or_else(|| {
                format!(
                    "Invalid category '{}'. Valid options: {}",
                    s,
                    Category::ALL.map(|c| c.table()).join(", ")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{}", Category::Diet), "diet");
        assert_eq!(format!("{}", Category::MentalHealth), "mental_health");
        assert_eq!(format!("{}", Category::WaterIntake), "water_intake");
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!(Category::from_str("diet").unwrap(), Category::Diet);
        assert_eq!(Category::from_str("STEPS").unwrap(), Category::Steps);
        assert_eq!(
            Category::from_str("Mental Health").unwrap(),
            Category::MentalHealth
        );
        assert_eq!(
            Category::from_str("water-intake").unwrap(),
            Category::WaterIntake
        );
        assert_eq!(Category::from_str("water").unwrap(), Category::WaterIntake);
    }

    #[test]
    fn test_category_from_str_invalid() {
        let err = Category::from_str("sleep").unwrap_err();
        assert!(err.ends_with("diet, exercise, steps, mental_health, water_intake"));
        assert!(Category::from_str("").is_err());
    }

    #[test]
    fn test_label_roundtrips_through_from_str() {
        for category in Category::ALL {
            assert_eq!(Category::from_str(category.label()).unwrap(), category);
        }
    }
}
