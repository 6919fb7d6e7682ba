pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{command::CommandMerger, http::RestWebApp};
pub use config::AdminConfig;
pub use core::admin::ProjectAdmin;
pub use domain::model::{Action, ProjectName, RunMode};
pub use utils::error::{AdminError, Result};
