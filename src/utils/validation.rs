use crate::utils::error::{GenError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: &str) -> GenError {
    GenError::InvalidConfigValue {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Rejects empty paths and paths carrying NUL bytes, which no syscall accepts.
pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(invalid(field_name, "", "Path cannot be empty"));
    }
    if path.as_os_str().as_encoded_bytes().contains(&0) {
        return Err(invalid(field_name, path.display(), "Path contains null bytes"));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}

/// 目錄名稱：只能是單一路徑元件，不可包含分隔符
pub fn validate_dir_name(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(invalid(field_name, value, "Must be a single directory name"));
    }
    Ok(())
}

/// ROS distro names are plain identifiers such as `noetic` or `humble`.
pub fn validate_distro_name(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    let plain = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !plain {
        return Err(invalid(
            field_name,
            value,
            "Only letters, digits, '_' and '-' are allowed",
        ));
    }
    Ok(())
}
