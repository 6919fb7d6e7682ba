use crate::utils::error::{AdminError, Result};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(AdminError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "uri of the webapp not specified".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AdminError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(AdminError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AdminError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AdminError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_directory(field_name: &str, path: &Path) -> Result<()> {
    validate_path(field_name, &path.to_string_lossy())?;
    if !path.is_dir() {
        return Err(AdminError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.display().to_string(),
            reason: format!("Not a directory: {}", path.display()),
        });
    }
    Ok(())
}

pub fn validate_file(field_name: &str, path: &Path) -> Result<()> {
    validate_path(field_name, &path.to_string_lossy())?;
    if !path.is_file() {
        return Err(AdminError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.display().to_string(),
            reason: format!("File {} does not exist", path.display()),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(AdminError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AdminError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_validate_url() {
        assert!(validate_url("uri", "http://localhost:8080/source").is_ok());
        assert!(validate_url("uri", "https://grok.example.com").is_ok());
        assert!(validate_url("uri", "").is_err());
        assert!(validate_url("uri", "localhost:8080").is_err());
        assert!(validate_url("uri", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_directory_and_file() {
        let dir = TempDir::new().unwrap();
        let file = NamedTempFile::new_in(dir.path()).unwrap();

        assert!(validate_directory("base", dir.path()).is_ok());
        assert!(validate_directory("base", file.path()).is_err());
        assert!(validate_file("roconfig", file.path()).is_ok());
        assert!(validate_file("roconfig", &dir.path().join("missing.xml")).is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("timeout", 30, 1).is_ok());
        assert!(validate_positive_number("timeout", 0, 1).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("sourceRoot", "/src").is_ok());
        assert!(validate_non_empty_string("sourceRoot", "  \n").is_err());
    }
}
