use crate::domain::ports::ConfigMerger;
use crate::utils::error::{AdminError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Searches `PATH` for an executable called `name`.
pub fn locate_command(name: &str) -> Option<PathBuf> {
    let search_path = std::env::var_os("PATH")?;
    std::env::split_paths(&search_path)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Output of a finished external command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

pub async fn execute(program: &Path, args: &[&Path]) -> Result<CommandOutput> {
    tracing::debug!("Executing {}", describe_command(program, args));
    let output = Command::new(program).args(args).output().await?;

    let result = CommandOutput {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    tracing::debug!(
        "{} exited with {:?}",
        program.display(),
        result.code
    );
    Ok(result)
}

fn describe_command(program: &Path, args: &[&Path]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs OpenGrok's `ConfigMerge <readonly> <current>` and collects stdout.
#[derive(Debug, Clone)]
pub struct CommandMerger {
    program: PathBuf,
}

impl CommandMerger {
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }
}

#[async_trait]
impl ConfigMerger for CommandMerger {
    async fn merge(&self, readonly: &Path, current: &Path) -> Result<String> {
        let output = execute(&self.program, &[readonly, current]).await?;
        if !output.success() {
            return Err(AdminError::CommandError {
                message: "cannot merge configuration".to_string(),
                code: output.code,
                output: format!("{}{}", output.stdout, output.stderr),
            });
        }
        Ok(output.stdout)
    }

    fn describe(&self, readonly: &Path, current: &Path) -> String {
        describe_command(&self.program, &[readonly, current])
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_locate_command_on_path() {
        assert!(locate_command("sh").is_some());
        assert_eq!(locate_command("projadm-no-such-command"), None);
    }

    #[test]
    fn test_non_executable_is_skipped() {
        let dir = TempDir::new().unwrap();
        let script = write_script(dir.path(), "ConfigMerge", "exit 0");
        assert!(is_executable(&script));

        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o644)).unwrap();
        assert!(!is_executable(&script));
    }

    #[tokio::test]
    async fn test_merge_returns_stdout() {
        let dir = TempDir::new().unwrap();
        let script = write_script(dir.path(), "ConfigMerge", "cat \"$1\" \"$2\"");
        let ro = dir.path().join("ro.xml");
        let cur = dir.path().join("cur.xml");
        std::fs::write(&ro, "<ro/>\n").unwrap();
        std::fs::write(&cur, "<cur/>\n").unwrap();

        let merger = CommandMerger::new(script.clone());
        let merged = merger.merge(&ro, &cur).await.unwrap();
        assert_eq!(merged, "<ro/>\n<cur/>\n");
        assert_eq!(
            merger.describe(&ro, &cur),
            format!("{} {} {}", script.display(), ro.display(), cur.display())
        );
    }

    #[tokio::test]
    async fn test_merge_failure_carries_output() {
        let dir = TempDir::new().unwrap();
        let script = write_script(dir.path(), "ConfigMerge", "echo 'bad input' >&2; exit 3");

        let merger = CommandMerger::new(script);
        let err = merger
            .merge(&dir.path().join("a"), &dir.path().join("b"))
            .await
            .unwrap_err();

        match err {
            AdminError::CommandError {
                message,
                code,
                output,
            } => {
                assert_eq!(message, "cannot merge configuration");
                assert_eq!(code, Some(3));
                assert!(output.contains("bad input"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
