use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod db;
mod models;
mod password;
mod session;
mod validation;

use commands::{
    current_user, ConfigCommand, DeleteCommand, LogCommand, LoginCommand, RegisterCommand,
    ResetCommand, SummaryCommand, UpdateCommand, WhoamiCommand,
};
use config::Config;
use db::{init_db, ActivityLog, UserRepository};
use sqlx::SqlitePool;

#[derive(Parser)]
#[command(name = "healthtrack")]
#[command(version)]
#[command(about = "Track diet, exercise, steps, mood and water intake", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account
    Register(RegisterCommand),

    /// Log in and remember the user for later commands
    Login(LoginCommand),

    /// Forget the logged-in user
    Logout,

    /// Show the logged-in user's profile
    Whoami(WhoamiCommand),

    /// Record an activity for today
    Log(LogCommand),

    /// Replace the fields of a logged activity
    Update(UpdateCommand),

    /// Remove a logged activity
    Delete(DeleteCommand),

    /// List everything logged in a category
    Summary(SummaryCommand),

    /// Delete all of your logged activities
    Reset(ResetCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "healthtrack=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Register(cmd)) => {
            let (_, users) = open_db(&config).await?;
            cmd.run(&users).await?;
        }
        Some(Commands::Login(cmd)) => {
            let (_, users) = open_db(&config).await?;
            cmd.run(&users, &config).await?;
        }
        Some(Commands::Logout) => {
            commands::logout(&config)?;
        }
        Some(Commands::Whoami(cmd)) => {
            let (_, users) = open_db(&config).await?;
            cmd.run(&users, &config).await?;
        }
        Some(Commands::Log(cmd)) => {
            let (pool, users) = open_db(&config).await?;
            let user = current_user(&users, &config).await?;
            cmd.run(&ActivityLog::new(pool), &user).await?;
        }
        Some(Commands::Update(cmd)) => {
            let (pool, users) = open_db(&config).await?;
            let user = current_user(&users, &config).await?;
            cmd.run(&ActivityLog::new(pool), &user).await?;
        }
        Some(Commands::Delete(cmd)) => {
            let (pool, users) = open_db(&config).await?;
            let user = current_user(&users, &config).await?;
            cmd.run(&ActivityLog::new(pool), &user).await?;
        }
        Some(Commands::Summary(cmd)) => {
            let (pool, users) = open_db(&config).await?;
            let user = current_user(&users, &config).await?;
            cmd.run(&pool, &user).await?;
        }
        Some(Commands::Reset(cmd)) => {
            let (pool, users) = open_db(&config).await?;
            let user = current_user(&users, &config).await?;
            cmd.run(&pool, &user).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

async fn open_db(config: &Config) -> Result<(SqlitePool, UserRepository), sqlx::Error> {
    let pool = init_db(&config.database_path.value).await?;
    let users = UserRepository::new(pool.clone());
    Ok((pool, users))
}
