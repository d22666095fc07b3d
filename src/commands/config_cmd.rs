use clap::{Args, Subcommand};

use super::OutputFormat;
use crate::config::{Config, ConfigValue};

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(config)?);
                }
                OutputFormat::Text => {
                    println!("Configuration");
                    println!("=============\n");

                    match &config.config_file {
                        Some(path) => println!("Config file: {}", path.display()),
                        None => println!(
                            "Config file: {} (not found)",
                            Config::default_config_path().display()
                        ),
                    }
                    println!();

                    print_path("database_path", &config.database_path);
                    println!();
                    print_path("session_path", &config.session_path);
                }
            },
        }
        Ok(())
    }
}

fn print_path(name: &str, value: &ConfigValue<std::path::PathBuf>) {
    println!("{}: {}", name, value.value.display());
    println!("  source: {}", value.source);
}
