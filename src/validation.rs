//! Input validation run before anything touches the database.

use crate::models::{Gender, NewUser};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A text field is empty or contains disallowed characters
    #[error("{0} Enter text value only.")]
    InvalidText(String),
    /// A numeric field did not parse or is out of range
    #[error("{0} Enter numeric value only.")]
    InvalidNumeric(String),
}

/// Raw registration fields as typed by the user.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    pub name: String,
    pub age: String,
    pub gender: String,
    pub weight: String,
    pub height: String,
}

impl RegistrationForm {
    /// Validate every field and produce the record to insert.
    pub fn validate(&self) -> Result<NewUser, ValidationError> {
        require_text("Username", &self.username)?;
        if self.password.is_empty() {
            return Err(ValidationError::InvalidText(
                "Password must not be empty.".to_string(),
            ));
        }
        validate_name(&self.name)?;
        let age = parse_age(&self.age)?;
        let gender: Gender = self
            .gender
            .parse()
            .map_err(ValidationError::InvalidText)?;
        let weight = parse_positive("Weight", &self.weight)?;
        let height = parse_positive("Height", &self.height)?;

        Ok(NewUser {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            name: self.name.clone(),
            age,
            gender,
            weight,
            height,
        })
    }
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidText(
            "Name must contain only letters.".to_string(),
        ));
    }
    Ok(())
}

pub fn parse_age(input: &str) -> Result<i32, ValidationError> {
    let age: i32 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidNumeric("Age must be a valid integer.".to_string()))?;
    if age <= 0 {
        return Err(ValidationError::InvalidNumeric(
            "Age must be a positive integer.".to_string(),
        ));
    }
    Ok(age)
}

pub fn parse_positive(field: &str, input: &str) -> Result<f64, ValidationError> {
    let value: f64 = input.trim().parse().map_err(|_| {
        ValidationError::InvalidNumeric(format!("{} must be a valid number.", field))
    })?;
    require_positive(field, value)?;
    Ok(value)
}

pub fn require_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::InvalidText(format!(
            "{} must not be empty.",
            field
        )));
    }
    Ok(())
}

pub fn require_non_negative(field: &str, value: i32) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::InvalidNumeric(format!(
            "{} must not be negative.",
            field
        )));
    }
    Ok(())
}

pub fn require_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidNumeric(format!(
            "{} must be a positive number.",
            field
        )));
    }
    Ok(())
}

pub fn require_sleep_hours(hours: f64) -> Result<(), ValidationError> {
    if !(0.0..=24.0).contains(&hours) {
        return Err(ValidationError::InvalidNumeric(
            "Sleep hours must be between 0 and 24.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegistrationForm {
        RegistrationForm {
            username: "alice".into(),
            password: "pw1".into(),
            name: "Alice".into(),
            age: "30".into(),
            gender: "F".into(),
            weight: "65.0".into(),
            height: "170".into(),
        }
    }

    #[test]
    fn test_valid_form() {
        let user = form().validate().unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.age, 30);
        assert_eq!(user.gender, Gender::Female);
        assert_eq!(user.weight, 65.0);
        assert_eq!(user.height, 170.0);
    }

    #[test]
    fn test_name_must_be_letters() {
        let mut f = form();
        f.name = "Alice2".into();
        let err = f.validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidText("Name must contain only letters.".into())
        );

        f.name = "Mary Ann".into();
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_age_errors() {
        let mut f = form();
        f.age = "thirty".into();
        assert_eq!(
            f.validate().unwrap_err(),
            ValidationError::InvalidNumeric("Age must be a valid integer.".into())
        );

        f.age = "0".into();
        assert_eq!(
            f.validate().unwrap_err(),
            ValidationError::InvalidNumeric("Age must be a positive integer.".into())
        );
    }

    #[test]
    fn test_weight_and_height_must_be_positive() {
        let mut f = form();
        f.weight = "-3".into();
        assert!(f.validate().unwrap_err().to_string().contains("Weight"));

        let mut f = form();
        f.height = "tall".into();
        assert!(f
            .validate()
            .unwrap_err()
            .to_string()
            .contains("Height must be a valid number."));

        assert!(parse_positive("Weight", "NaN").is_err());
    }

    #[test]
    fn test_empty_credentials_rejected() {
        let mut f = form();
        f.username = " ".into();
        assert!(f.validate().is_err());

        let mut f = form();
        f.password = String::new();
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_error_display_suffix() {
        let err = ValidationError::InvalidNumeric("Age must be a valid integer.".into());
        assert_eq!(
            err.to_string(),
            "Age must be a valid integer. Enter numeric value only."
        );
    }
}
