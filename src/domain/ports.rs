use crate::domain::model::ProjectName;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn base_dir(&self) -> &Path;
    fn webapp_uri(&self) -> &str;
    fn roconfig(&self) -> Option<&Path>;
    fn configmerge(&self) -> Option<&Path>;
    fn timeout(&self) -> Duration;
    fn api_token(&self) -> Option<&str>;

    /// `etc/configuration.xml` under the instance base.
    fn main_config_path(&self) -> PathBuf {
        self.base_dir().join("etc").join("configuration.xml")
    }
}

/// REST surface of a running OpenGrok web application.
#[async_trait]
pub trait WebApp: Send + Sync {
    async fn get_configuration(&self) -> Result<String>;
    async fn set_configuration(&self, config: String) -> Result<()>;
    async fn add_project(&self, project: &ProjectName) -> Result<()>;
    async fn delete_project(&self, project: &ProjectName) -> Result<()>;
    async fn get_config_value(&self, field: &str) -> Result<String>;
}

#[async_trait]
pub trait ConfigMerger: Send + Sync {
    /// Merges the read-only configuration over `current` and returns the
    /// merged document.
    async fn merge(&self, readonly: &Path, current: &Path) -> Result<String>;

    /// Human readable command line, for dry runs.
    fn describe(&self, readonly: &Path, current: &Path) -> String;
}
