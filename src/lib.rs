pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{cli::LocalStorage, CliConfig};
pub use crate::core::{etl::ExportEngine, pipeline::GymPipeline};
pub use crate::domain::model::{Gym, GymDocument, GymRow};
pub use crate::utils::error::{ExportError, Result};
