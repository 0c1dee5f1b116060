//! Form Validation
//!
//! Client-side checks run before any request is sent. Each check returns
//! the messages shown under the offending fields.

use std::sync::LazyLock;

use regex::Regex;

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern is valid")
});

/// Field name -> message, in form order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    fields: Vec<(&'static str, &'static str)>,
}

impl FormErrors {
    fn add(&mut self, field: &'static str, message: &'static str) {
        self.fields.push((field, message));
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.fields.iter().find(|(name, _)| *name == field).map(|(_, message)| *message)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn check_email(errors: &mut FormErrors, email: &str) {
    let email = email.trim();
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if !EMAIL_RE.is_match(email) {
        errors.add("email", "Invalid email address");
    }
}

fn check_password(errors: &mut FormErrors, password: &str) {
    if password.is_empty() {
        errors.add("password", "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add("password", "Password must be at least 6 characters");
    }
}

pub fn validate_login(email: &str, password: &str) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();
    check_email(&mut errors, email);
    check_password(&mut errors, password);
    errors.into_result()
}

pub fn validate_registration(name: &str, email: &str, password: &str, confirmation: &str) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();
    if name.trim().is_empty() {
        errors.add("name", "Username is required");
    }
    check_email(&mut errors, email);
    check_password(&mut errors, password);
    if confirmation.is_empty() {
        errors.add("password_confirmation", "Please confirm your password");
    } else if confirmation != password {
        errors.add("password_confirmation", "Passwords do not match");
    }
    errors.into_result()
}

pub fn validate_contact(name: &str, email: &str, subject: &str, message: &str) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();
    if name.trim().is_empty() {
        errors.add("name", "Name is required");
    }
    check_email(&mut errors, email);
    if subject.trim().is_empty() {
        errors.add("subject", "Subject is required");
    }
    if message.trim().is_empty() {
        errors.add("message", "Message is required");
    }
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_rules() {
        assert!(validate_login("ada@example.com", "secret").is_ok());

        let errors = validate_login("", "").unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));

        let errors = validate_login("ada@example", "12345").unwrap_err();
        assert_eq!(errors.get("email"), Some("Invalid email address"));
        assert_eq!(errors.get("password"), Some("Password must be at least 6 characters"));
    }

    #[test]
    fn test_email_is_case_insensitive() {
        assert!(validate_login("Ada.Lovelace+loans@Example.CO.UK", "secret").is_ok());
    }

    #[test]
    fn test_registration_rules() {
        assert!(validate_registration("ada", "ada@example.com", "secret", "secret").is_ok());

        let errors = validate_registration(" ", "ada@example.com", "secret", "secreT").unwrap_err();
        assert_eq!(errors.get("name"), Some("Username is required"));
        assert_eq!(errors.get("password_confirmation"), Some("Passwords do not match"));
        assert_eq!(errors.get("email"), None);
    }

    #[test]
    fn test_contact_rules() {
        let errors = validate_contact("Ada", "ada@example.com", "", "hello").unwrap_err();
        assert_eq!(errors.get("subject"), Some("Subject is required"));
        assert!(validate_contact("Ada", "ada@example.com", "Loans", "hello").is_ok());
    }
}
