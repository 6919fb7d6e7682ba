use crate::core::install::{install_config, stage_temp};
use crate::domain::model::{Action, ProjectName, RunMode};
use crate::domain::ports::{ConfigMerger, ConfigProvider, WebApp};
use crate::utils::error::{AdminError, Result};
use crate::utils::validation::validate_non_empty_string;
use std::path::{Path, PathBuf};

pub const SOURCE_ROOT_FIELD: &str = "sourceRoot";

/// Drives project add/delete and configuration refresh/upload against one
/// OpenGrok instance.
pub struct ProjectAdmin<W: WebApp, C: ConfigProvider> {
    webapp: W,
    config: C,
    merger: Option<Box<dyn ConfigMerger>>,
    mode: RunMode,
}

impl<W: WebApp, C: ConfigProvider> ProjectAdmin<W, C> {
    pub fn new(webapp: W, config: C, mode: RunMode) -> Self {
        Self {
            webapp,
            config,
            merger: None,
            mode,
        }
    }

    pub fn with_merger(mut self, merger: impl ConfigMerger + 'static) -> Self {
        self.merger = Some(Box::new(merger));
        self
    }

    pub async fn run(&self, action: &Action, upload: bool) -> Result<()> {
        tracing::debug!("Running '{}' in {:?} mode", action.name(), self.mode);

        match action {
            Action::Add(projects) => {
                for project in projects {
                    self.project_add(project).await?;
                }
                self.config_refresh().await?;
            }
            Action::Delete(projects) => {
                for project in projects {
                    self.project_delete(project).await?;
                }
                self.config_refresh().await?;
            }
            Action::Refresh => self.config_refresh().await?,
        }

        if upload {
            self.upload().await?;
        }
        Ok(())
    }

    /// Adds the project to the web application configuration.
    pub async fn project_add(&self, project: &ProjectName) -> Result<()> {
        tracing::info!("Adding project {}", project);

        if self.mode.is_execute() {
            self.webapp.add_project(project).await?;
        }
        Ok(())
    }

    /// Removes the project from the configuration together with its index
    /// data, then removes its source tree under the source root.
    pub async fn project_delete(&self, project: &ProjectName) -> Result<()> {
        tracing::info!("Deleting project {} and its index data", project);

        if self.mode.is_execute() {
            self.webapp.delete_project(project).await?;
        }

        let source_dir = self.source_dir(project).await?;
        tracing::debug!("Removing directory tree {}", source_dir.display());

        if self.mode.is_execute() {
            tracing::info!("Removing source code under {}", source_dir.display());
            match tokio::fs::remove_dir_all(&source_dir).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::warn!("{} does not exist, nothing to remove", source_dir.display());
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    async fn source_dir(&self, project: &ProjectName) -> Result<PathBuf> {
        let source_root = self.webapp.get_config_value(SOURCE_ROOT_FIELD).await?;
        let source_root = source_root.trim();
        tracing::debug!("Source root = {}", source_root);

        validate_non_empty_string(SOURCE_ROOT_FIELD, source_root)
            .map_err(|_| AdminError::config("source root empty"))?;
        Ok(Path::new(source_root).join(project.as_str()))
    }

    /// Rewrites the on-disk configuration from the live web application
    /// configuration, merged with the read-only configuration when one is set.
    pub async fn config_refresh(&self) -> Result<()> {
        let main_config = self.existing_main_config()?;

        let current = if self.mode.is_execute() {
            let current = self.webapp.get_configuration().await?;
            if current.trim().is_empty() {
                return Err(AdminError::config(
                    "web application returned empty configuration",
                ));
            }
            Some(current)
        } else {
            None
        };

        let fcur = stage_temp(current.as_deref()).await?;
        tracing::debug!("Temporary file for current config: {}", fcur.path().display());

        let Some(roconfig) = self.config.roconfig() else {
            tracing::info!("Refreshing configuration");
            return install_config(self.mode, fcur.path(), &main_config).await;
        };

        tracing::info!("Refreshing configuration (merging with read-only config)");
        let merger = self
            .merger
            .as_ref()
            .ok_or_else(|| AdminError::MissingConfigError {
                field: "configmerge".to_string(),
            })?;

        if !self.mode.is_execute() {
            tracing::info!("{}", merger.describe(roconfig, fcur.path()));
            return Ok(());
        }

        let merged = merger.merge(roconfig, fcur.path()).await?;
        let fmerged = stage_temp(Some(&merged)).await?;
        tracing::debug!(
            "Temporary file for merged config: {}",
            fmerged.path().display()
        );

        install_config(self.mode, fmerged.path(), &main_config).await
    }

    /// Sends the on-disk configuration to the web application.
    pub async fn upload(&self) -> Result<()> {
        let main_config = self.existing_main_config()?;

        if !self.mode.is_execute() {
            tracing::info!("Not uploading {}", main_config.display());
            return Ok(());
        }

        tracing::info!("Uploading configuration {}", main_config.display());
        let content = tokio::fs::read_to_string(&main_config).await?;
        self.webapp.set_configuration(content).await
    }

    fn existing_main_config(&self) -> Result<PathBuf> {
        let main_config = self.config.main_config_path();
        if !main_config.is_file() {
            return Err(AdminError::config(format!(
                "file {} does not exist",
                main_config.display()
            )));
        }
        Ok(main_config)
    }
}
