use serde::Deserialize;
use thiserror::Error;

pub const MAX_FULL_NAME_LENGTH: usize = 100;

/// Problems with a submitted confirmation form. These are shown inline above
/// the form rather than as an error page.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please enter your full name.")]
    MissingFullName,

    #[error("Name too long (maximum {MAX_FULL_NAME_LENGTH} characters).")]
    FullNameTooLong,

    #[error("You must accept the Terms of Service to proceed.")]
    TosConsentRequired,
}

#[derive(Deserialize, Debug, Default)]
pub struct ConfirmLoginForm {
    #[serde(default)]
    pub csrfmiddlewaretoken: String,
    #[serde(default)]
    pub full_name: String,
    /// Browsers omit unchecked checkboxes entirely and send "on" otherwise.
    #[serde(default)]
    pub tos_consent: Option<String>,
}

impl ConfirmLoginForm {
    pub fn tos_accepted(&self) -> bool {
        match self.tos_consent.as_deref().map(str::trim) {
            None | Some("") => false,
            Some(v) => !v.eq_ignore_ascii_case("false") && !v.eq_ignore_ascii_case("off"),
        }
    }

    /// Returns the trimmed full name once the form passes validation.
    pub fn validate(&self, tos_consent_needed: bool) -> Result<String, FormError> {
        let full_name = self.full_name.trim();
        if full_name.is_empty() {
            return Err(FormError::MissingFullName);
        }
        if full_name.chars().count() > MAX_FULL_NAME_LENGTH {
            return Err(FormError::FullNameTooLong);
        }
        if tos_consent_needed && !self.tos_accepted() {
            return Err(FormError::TosConsentRequired);
        }
        Ok(full_name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(full_name: &str, tos: Option<&str>) -> ConfirmLoginForm {
        ConfirmLoginForm {
            csrfmiddlewaretoken: String::new(),
            full_name: full_name.to_string(),
            tos_consent: tos.map(str::to_string),
        }
    }

    #[test]
    fn trims_the_submitted_name() {
        assert_eq!(form("  Iago  ", None).validate(false), Ok("Iago".to_string()));
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(form("   ", None).validate(false), Err(FormError::MissingFullName));
    }

    #[test]
    fn overlong_name_is_rejected() {
        let name = "x".repeat(MAX_FULL_NAME_LENGTH + 1);
        assert_eq!(form(&name, None).validate(false), Err(FormError::FullNameTooLong));
        let name = "é".repeat(MAX_FULL_NAME_LENGTH);
        assert!(form(&name, None).validate(false).is_ok());
    }

    #[test]
    fn consent_only_checked_when_needed() {
        assert!(form("Iago", None).validate(false).is_ok());
        assert_eq!(form("Iago", None).validate(true), Err(FormError::TosConsentRequired));
        assert_eq!(form("Iago", Some("off")).validate(true), Err(FormError::TosConsentRequired));
        assert!(form("Iago", Some("on")).validate(true).is_ok());
    }
}
