pub mod cli;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "gym-export")]
#[command(about = "Exports the gyms table of a SQLite database as nested JSON")]
pub struct CliConfig {
    /// SQLite database holding the `gyms` table
    #[arg(long, default_value = "gyms.db")]
    pub database: String,

    /// Directory the JSON document is written into
    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn database_path(&self) -> &str {
        &self.database
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("database", &self.database)?;
        validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}
