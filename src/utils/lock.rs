use crate::utils::error::{AdminError, Result};
use std::fs::{File, OpenOptions, TryLockError};
use std::path::{Path, PathBuf};

pub const LOCK_FILE_NAME: &str = "projadm.lock";

/// Exclusive, non-blocking lock that keeps a second `projadm` from running
/// against the same machine. Released when dropped.
#[derive(Debug)]
pub struct InstanceLock {
    file: File,
    path: PathBuf,
}

impl InstanceLock {
    pub fn acquire(dir: &Path) -> Result<Self> {
        let path = dir.join(LOCK_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;

        match file.try_lock() {
            Ok(()) => {
                tracing::debug!("Acquired lock {}", path.display());
                Ok(Self { file, path })
            }
            Err(TryLockError::WouldBlock) => Err(AdminError::LockHeldError {
                path: path.display().to_string(),
            }),
            Err(TryLockError::Error(e)) => Err(AdminError::IoError(e)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::warn!("Failed to release lock {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_second_acquire_fails_while_held() {
        let dir = TempDir::new().unwrap();
        let lock = InstanceLock::acquire(dir.path()).unwrap();
        assert_eq!(lock.path(), dir.path().join(LOCK_FILE_NAME));

        let err = InstanceLock::acquire(dir.path()).unwrap_err();
        assert!(matches!(err, AdminError::LockHeldError { .. }));

        drop(lock);
        assert!(InstanceLock::acquire(dir.path()).is_ok());
    }
}
