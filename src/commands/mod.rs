use clap::ValueEnum;

mod account;
mod activity;
mod config_cmd;
mod data;

pub use account::{current_user, logout, LoginCommand, RegisterCommand, WhoamiCommand};
pub use activity::{DeleteCommand, LogCommand, UpdateCommand};
pub use config_cmd::ConfigCommand;
pub use data::{ResetCommand, SummaryCommand};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
