pub mod admin;
pub mod install;

pub use crate::domain::model::{Action, ProjectName, RunMode};
pub use crate::domain::ports::{ConfigMerger, ConfigProvider, WebApp};
pub use crate::utils::error::Result;
