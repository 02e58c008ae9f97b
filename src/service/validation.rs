//! Field rules for accounts and messages.

use crate::error::AppError;

pub const PASSWORD_MIN_LENGTH: usize = 4;
pub const MESSAGE_MAX_LENGTH: usize = 255;

pub struct RequestValidator;

impl RequestValidator {
    /// Username must be present and not blank. Returns it unchanged.
    pub fn username(value: Option<&str>) -> Result<&str, AppError> {
        match value {
            Some(s) if !is_blank(s) => Ok(s),
            Some(_) => Err(AppError::Validation("username must not be blank".into())),
            None => Err(AppError::Validation("username is required".into())),
        }
    }

    pub fn password(value: Option<&str>) -> Result<&str, AppError> {
        let s = value.ok_or_else(|| AppError::Validation("password is required".into()))?;
        if s.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(AppError::Validation(format!(
                "password must be at least {} characters",
                PASSWORD_MIN_LENGTH
            )));
        }
        Ok(s)
    }

    /// Message text must be present, not blank, and at most 255 characters.
    pub fn message_text(value: Option<&str>) -> Result<&str, AppError> {
        let s = value.ok_or_else(|| AppError::Validation("message_text is required".into()))?;
        if is_blank(s) {
            return Err(AppError::Validation("message_text must not be blank".into()));
        }
        if s.chars().count() > MESSAGE_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "message_text must be at most {} characters",
                MESSAGE_MAX_LENGTH
            )));
        }
        Ok(s)
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules() {
        assert!(RequestValidator::username(None).is_err());
        assert!(RequestValidator::username(Some("")).is_err());
        assert!(RequestValidator::username(Some(" \t")).is_err());
        assert_eq!(RequestValidator::username(Some("alice")).unwrap(), "alice");
    }

    #[test]
    fn password_minimum_length() {
        assert!(RequestValidator::password(None).is_err());
        assert!(RequestValidator::password(Some("abc")).is_err());
        assert!(RequestValidator::password(Some("abcd")).is_ok());
    }

    #[test]
    fn message_text_bounds() {
        assert!(RequestValidator::message_text(None).is_err());
        assert!(RequestValidator::message_text(Some("")).is_err());
        assert!(RequestValidator::message_text(Some("   ")).is_err());
        assert!(RequestValidator::message_text(Some("a".repeat(255).as_str())).is_ok());
        assert!(RequestValidator::message_text(Some("a".repeat(256).as_str())).is_err());
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        // 255 two-byte characters
        assert!(RequestValidator::message_text(Some("é".repeat(255).as_str())).is_ok());
        assert!(RequestValidator::password(Some("ééé")).is_err());
    }
}
