use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Single-letter code stored in the `users.gender` column.
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Other => "O",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" => Ok(Gender::Male),
            "f" | "female" => Ok(Gender::Female),
            "o" | "other" => Ok(Gender::Other),
            _ => Err(format!(
                "Invalid gender '{}'. Valid options: male, female, other",
                s
            )),
        }
    }
}

/// A registered user. The password hash never leaves the repository.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub weight: f64,
    pub height: f64,
    pub created_at: DateTime<Utc>,
}

/// Registration input. `password` is plaintext here and hashed on insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub weight: f64,
    pub height: f64,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (#{})", self.username, self.id)?;
        writeln!(f, "  Name:   {}", self.name)?;
        writeln!(f, "  Age:    {}", self.age)?;
        writeln!(f, "  Gender: {}", self.gender)?;
        writeln!(f, "  Weight: {} kg", self.weight)?;
        write!(f, "  Height: {} cm", self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_from_str() {
        assert_eq!(Gender::from_str("F").unwrap(), Gender::Female);
        assert_eq!(Gender::from_str("male").unwrap(), Gender::Male);
        assert_eq!(Gender::from_str("Other").unwrap(), Gender::Other);
        assert!(Gender::from_str("x").is_err());
    }

    #[test]
    fn test_gender_code_roundtrip() {
        for gender in [Gender::Male, Gender::Female, Gender::Other] {
            assert_eq!(Gender::from_str(gender.code()).unwrap(), gender);
        }
    }
}
