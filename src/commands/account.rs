use clap::Args;

use super::OutputFormat;
use crate::config::Config;
use crate::db::UserRepository;
use crate::models::User;
use crate::session::Session;
use crate::validation::RegistrationForm;

#[derive(Args)]
pub struct RegisterCommand {
    /// Login name (must be unique)
    #[arg(long, short)]
    pub username: String,

    #[arg(long, short)]
    pub password: String,

    /// Given name (letters only)
    #[arg(long, short)]
    pub name: String,

    #[arg(long)]
    pub age: String,

    /// male, female or other (M/F/O)
    #[arg(long, short)]
    pub gender: String,

    /// Weight in kg
    #[arg(long)]
    pub weight: String,

    /// Height in cm
    #[arg(long)]
    pub height: String,
}

impl RegisterCommand {
    pub async fn run(&self, users: &UserRepository) -> Result<(), Box<dyn std::error::Error>> {
        let form = RegistrationForm {
            username: self.username.clone(),
            password: self.password.clone(),
            name: self.name.clone(),
            age: self.age.clone(),
            gender: self.gender.clone(),
            weight: self.weight.clone(),
            height: self.height.clone(),
        };
        let new_user = form.validate()?;
        let id = users.create_user(&new_user).await?;

        println!(
            "Registration successful! User '{}' created (id {}). Please login.",
            new_user.username, id
        );
        Ok(())
    }
}

#[derive(Args)]
pub struct LoginCommand {
    pub username: String,

    #[arg(long, short)]
    pub password: String,
}

impl LoginCommand {
    pub async fn run(
        &self,
        users: &UserRepository,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !users.validate(&self.username, &self.password).await {
            return Err("Invalid username or password".into());
        }

        let user = users
            .get_by_username(&self.username)
            .await?
            .ok_or("Invalid username or password")?;

        Session::new(user.id, &user.username).save(&config.session_path.value)?;
        println!("Logged in as {}", user.username);
        Ok(())
    }
}

pub fn logout(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if Session::clear(&config.session_path.value)? {
        println!("Logged out");
    } else {
        println!("Not logged in");
    }
    Ok(())
}

#[derive(Args)]
pub struct WhoamiCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl WhoamiCommand {
    pub async fn run(
        &self,
        users: &UserRepository,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let user = current_user(users, config).await?;
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&user)?),
            OutputFormat::Text => println!("{}", user),
        }
        Ok(())
    }
}

/// Resolve the session to a user that still exists in the database.
pub async fn current_user(
    users: &UserRepository,
    config: &Config,
) -> Result<User, Box<dyn std::error::Error>> {
    let session = Session::require(&config.session_path.value)?;

    match users.get_by_id(session.user_id).await? {
        Some(user) if user.username == session.username => Ok(user),
        _ => {
            tracing::warn!(
                "Session for '{}' (id {}) no longer matches a user",
                session.username,
                session.user_id
            );
            Err("Session is no longer valid. Please login again.".into())
        }
    }
}
