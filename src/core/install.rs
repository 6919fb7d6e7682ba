use crate::domain::model::RunMode;
use crate::utils::error::{AdminError, Result};
use std::io::ErrorKind;
use std::path::Path;
use tempfile::NamedTempFile;

/// Creates a temporary file holding `content` (empty when `None`). The file
/// is removed when the returned handle is dropped.
pub async fn stage_temp(content: Option<&str>) -> Result<NamedTempFile> {
    let file = tokio::task::spawn_blocking(NamedTempFile::new)
        .await
        .map_err(|e| AdminError::IoError(std::io::Error::other(e)))??;

    if let Some(content) = content {
        tokio::fs::write(file.path(), content).await?;
    }
    Ok(file)
}

/// Copies `src` over `dst`. Copying rather than renaming leaves the temporary
/// source in place so its own cleanup still succeeds.
pub async fn install_config(mode: RunMode, src: &Path, dst: &Path) -> Result<()> {
    if !mode.is_execute() {
        tracing::debug!("Not copying {} to {}", src.display(), dst.display());
        return Ok(());
    }

    tracing::debug!("Copying {} to {}", src.display(), dst.display());
    tokio::fs::copy(src, dst).await.map_err(|e| {
        let reason = match e.kind() {
            ErrorKind::PermissionDenied => "permissions",
            _ => "I/O",
        };
        tracing::debug!("copy failed: {}", e);
        AdminError::InstallError {
            src: src.display().to_string(),
            dst: dst.display().to_string(),
            reason: reason.to_string(),
        }
    })?;

    Ok(())
}
