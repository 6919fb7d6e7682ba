use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Web application request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid web application URI: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required setting: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectError { name: String, reason: String },

    #[error("{operation} failed with HTTP status {status}")]
    WebAppError { operation: String, status: u16 },

    #[error("{message} (exit code {code:?}): {output}")]
    CommandError {
        message: String,
        code: Option<i32>,
        output: String,
    },

    #[error("Failed to copy {src} to {dst} ({reason})")]
    InstallError {
        src: String,
        dst: String,
        reason: String,
    },

    #[error("Another instance holds the lock {path}")]
    LockHeldError { path: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    FileSystem,
    ExternalCommand,
    Concurrency,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AdminError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::WebAppError { .. } | Self::UrlError(_) => {
                ErrorCategory::Network
            }
            Self::IoError(_) | Self::InstallError { .. } => ErrorCategory::FileSystem,
            Self::TomlError(_)
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::InvalidProjectError { .. } => ErrorCategory::Input,
            Self::CommandError { .. } => ErrorCategory::ExternalCommand,
            Self::LockHeldError { .. } => ErrorCategory::Concurrency,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::LockHeldError { .. } => ErrorSeverity::Low,
            Self::HttpError(_) | Self::WebAppError { .. } => ErrorSeverity::Medium,
            // 來源樹可能已被部分刪除
            Self::IoError(_) | Self::InstallError { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::HttpError(e) if e.is_timeout() => {
                "The web application did not answer in time".to_string()
            }
            Self::HttpError(e) if e.is_connect() => {
                "Could not connect to the web application".to_string()
            }
            Self::WebAppError { operation, status } => {
                format!("The web application rejected '{}' (HTTP {})", operation, status)
            }
            Self::LockHeldError { .. } => "Already running, exiting.".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        if let Self::MissingConfigError { field } | Self::InvalidConfigValueError { field, .. } =
            self
        {
            if field == "configmerge" {
                return "Use the --configmerge option to specify the path to the ConfigMerge script";
            }
        }

        match self.category() {
            ErrorCategory::Network => {
                "Check that the web application is running and that --uri includes the context path"
            }
            ErrorCategory::FileSystem => {
                "Check permissions on the instance base directory and its etc/ subdirectory"
            }
            ErrorCategory::Configuration => {
                "Check command line options and the --config file"
            }
            ErrorCategory::ExternalCommand => {
                "Use the --configmerge option to specify the path to the ConfigMerge binary"
            }
            ErrorCategory::Concurrency => "Wait for the running instance to finish",
            ErrorCategory::Input => "Project names must be plain directory names under the source root",
        }
    }
}

pub type Result<T> = std::result::Result<T, AdminError>;
