//! Form bodies posted by the HTML pages.
//!
//! Missing fields deserialize as empty strings so that they are reported by
//! validation (400) rather than by the `Form` extractor.

use serde::Deserialize;
use validator::Validate;

/// Body of `POST /`.
///
/// The index page posts either a URL to shorten or one of the `login` /
/// `register` navigation buttons.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IndexForm {
    pub url: Option<String>,
    pub login: Option<String>,
    pub register: Option<String>,
}

/// What a `POST /` asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum IndexAction {
    GoToLogin,
    GoToRegister,
    Shorten(String),
}

impl IndexForm {
    /// Navigation buttons win over a submitted URL. Returns `None` when the
    /// form carries nothing usable.
    pub fn action(self) -> Option<IndexAction> {
        if self.login.is_some() {
            Some(IndexAction::GoToLogin)
        } else if self.register.is_some() {
            Some(IndexAction::GoToRegister)
        } else {
            self.url.map(IndexAction::Shorten)
        }
    }
}

/// Body of `POST /dashboard`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShortenForm {
    pub url: String,
}

/// Body of `POST /login` and `POST /register`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CredentialsForm {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_button_wins() {
        let form = IndexForm {
            url: Some("example.com".to_string()),
            login: Some("Login".to_string()),
            register: None,
        };

        assert_eq!(form.action(), Some(IndexAction::GoToLogin));
    }

    #[test]
    fn test_register_button() {
        let form = IndexForm {
            register: Some(String::new()),
            ..Default::default()
        };

        assert_eq!(form.action(), Some(IndexAction::GoToRegister));
    }

    #[test]
    fn test_url_submission() {
        let form = IndexForm {
            url: Some("example.com".to_string()),
            ..Default::default()
        };

        assert_eq!(
            form.action(),
            Some(IndexAction::Shorten("example.com".to_string()))
        );
    }

    #[test]
    fn test_empty_form_has_no_action() {
        assert_eq!(IndexForm::default().action(), None);
    }

    #[test]
    fn test_credentials_validation() {
        let valid = CredentialsForm {
            username: "alice".to_string(),
            password: "pw".to_string(),
        };
        assert!(valid.validate().is_ok());

        let missing = CredentialsForm::default();
        let errors = missing.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("password"));
    }
}
