#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::command::locate_command;
use crate::core::ConfigProvider;
use crate::utils::error::{AdminError, Result};
use crate::utils::validation::{self, Validate};
use std::path::{Path, PathBuf};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_BASE: &str = "/var/opengrok";
pub const DEFAULT_URI: &str = "http://localhost:8080/source";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const CONFIGMERGE_NAME: &str = "ConfigMerge";

/// Settings after merging command line, defaults file and built-in defaults.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub base: PathBuf,
    pub uri: String,
    pub roconfig: Option<PathBuf>,
    pub configmerge: Option<PathBuf>,
    pub timeout_seconds: u64,
    pub api_token: Option<String>,
    pub lock_dir: PathBuf,
}

/// Values given on the command line; `None` falls through to the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base: Option<PathBuf>,
    pub uri: Option<String>,
    pub roconfig: Option<PathBuf>,
    pub configmerge: Option<PathBuf>,
    pub timeout_seconds: Option<u64>,
}

impl AdminConfig {
    /// Merges overrides over the file values and built-in defaults. The
    /// ConfigMerge binary is looked up on `PATH` when not given explicitly;
    /// an explicit path is kept as given and checked by `validate`.
    pub fn resolve(overrides: Overrides, file: TomlConfig) -> Self {
        let configmerge = overrides
            .configmerge
            .or(file.tools.configmerge)
            .or_else(|| locate_command(CONFIGMERGE_NAME));

        Self {
            base: overrides
                .base
                .or(file.instance.base)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BASE)),
            uri: overrides
                .uri
                .or(file.webapp.uri)
                .unwrap_or_else(|| DEFAULT_URI.to_string()),
            roconfig: overrides.roconfig.or(file.instance.roconfig),
            configmerge,
            timeout_seconds: overrides
                .timeout_seconds
                .or(file.webapp.timeout_seconds)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            api_token: file.webapp.api_token,
            lock_dir: file.lock.dir.unwrap_or_else(std::env::temp_dir),
        }
    }

    #[cfg(feature = "cli")]
    pub fn from_cli(args: &cli::CliArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => {
                tracing::debug!("Loading defaults from {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        let overrides = Overrides {
            base: args.base.clone(),
            uri: args.uri.clone(),
            roconfig: args.roconfig.clone(),
            configmerge: args.configmerge.clone(),
            timeout_seconds: args.timeout,
        };

        Ok(Self::resolve(overrides, file))
    }
}

impl ConfigProvider for AdminConfig {
    fn base_dir(&self) -> &Path {
        &self.base
    }

    fn webapp_uri(&self) -> &str {
        &self.uri
    }

    fn roconfig(&self) -> Option<&Path> {
        self.roconfig.as_deref()
    }

    fn configmerge(&self) -> Option<&Path> {
        self.configmerge.as_deref()
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn api_token(&self) -> Option<&str> {
        self.api_token.as_deref()
    }
}

impl Validate for AdminConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_directory("base", &self.base)?;
        tracing::debug!("Using {} as instance base", self.base.display());

        if let Some(roconfig) = &self.roconfig {
            validation::validate_file("roconfig", roconfig)?;
            tracing::debug!("Using {} as read-only config", roconfig.display());

            // 只有合併唯讀配置時才需要 ConfigMerge
            match &self.configmerge {
                Some(configmerge) => validation::validate_file("configmerge", configmerge)?,
                None => {
                    return Err(AdminError::MissingConfigError {
                        field: "configmerge".to_string(),
                    })
                }
            }
        }

        validation::validate_url("uri", &self.uri)?;
        validation::validate_positive_number("timeout", self.timeout_seconds, 1)?;
        validation::validate_directory("lock.dir", &self.lock_dir)?;

        Ok(())
    }
}
