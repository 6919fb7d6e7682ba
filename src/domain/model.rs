use crate::utils::error::{AdminError, Result};
use std::fmt;

/// Name of an OpenGrok project. It is also the directory name under the
/// source root, so it must be a single plain path component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(name: &str) -> Result<Self> {
        let invalid = |reason: &str| AdminError::InvalidProjectError {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(invalid("missing project"));
        }
        if trimmed == "." || trimmed == ".." {
            return Err(invalid("refers to a parent or current directory"));
        }
        if trimmed.contains(['/', '\\', '\0']) {
            return Err(invalid("contains a path separator or NUL"));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ProjectName {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add(Vec<ProjectName>),
    Delete(Vec<ProjectName>),
    Refresh,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Add(_) => "add",
            Action::Delete(_) => "delete",
            Action::Refresh => "refresh",
        }
    }
}

/// Whether mutating steps actually run (`Execute`) or are only reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Execute,
    DryRun,
}

impl RunMode {
    pub fn from_noop(noop: bool) -> Self {
        if noop {
            RunMode::DryRun
        } else {
            RunMode::Execute
        }
    }

    pub fn is_execute(self) -> bool {
        self == RunMode::Execute
    }
}
