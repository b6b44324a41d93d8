use crate::utils::error::{OrganizerError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(OrganizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(OrganizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(OrganizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 識別碼直接當成目錄名稱使用，不能跳出 base 目錄
pub fn validate_identifier(field_name: &str, identifier: &str) -> Result<()> {
    validate_non_empty_string(field_name, identifier)?;

    let reason = if identifier == "." || identifier == ".." {
        Some("Identifier cannot be a relative directory reference")
    } else if identifier.contains('/') || identifier.contains('\\') {
        Some("Identifier cannot contain path separators")
    } else if identifier.contains('\0') {
        Some("Identifier contains null bytes")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(OrganizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: identifier.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("base_dir", "./downloads").is_ok());
        assert!(validate_path("base_dir", "").is_err());
        assert!(validate_path("base_dir", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("identifier", "do_3123").is_ok());
        assert!(validate_identifier("identifier", "").is_err());
        assert!(validate_identifier("identifier", "   ").is_err());
        assert!(validate_identifier("identifier", "..").is_err());
        assert!(validate_identifier("identifier", "a/b").is_err());
        assert!(validate_identifier("identifier", "a\\b").is_err());
    }
}
