//! Form validation
//!
//! Pure checks over typed form input. Nothing here touches storage or
//! prints; every check returns either a boolean or the message to show.

use std::sync::LazyLock;

use regex::Regex;
use zeroize::Zeroizing;

use crate::models::{Governorate, Money};

/// Characters that count as a "special character" in a password
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Minimum password length, in characters
pub const MIN_PASSWORD_LEN: usize = 8;

/// `local@domain.tld`: no whitespace, exactly one `@`, a dot inside the domain
static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

pub const MSG_NAME: &str = "Please enter your Full Name.";
pub const MSG_EMAIL: &str = "Please enter a valid Email Address.";
pub const MSG_PASSWORD_REQUIRED: &str = "Password is required";
pub const MSG_PASSWORD_LENGTH: &str = "Password must be at least 8 characters long";
pub const MSG_PASSWORD_CLASSES: &str = "Password must contain at least one uppercase letter, one lowercase letter, one number and one special character";
pub const MSG_GOVERNORATE: &str = "Please select your Governorate.";
pub const MSG_TERMS: &str = "You must accept the Terms and Privacy Policy.";

/// Name is present once surrounding whitespace is removed
pub fn is_name_present(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Stricter name check: at least two characters after trimming
pub fn is_name_valid_strict(name: &str) -> bool {
    name.trim().chars().count() >= 2
}

/// Loose email check: contains an `@` and a `.` somewhere
pub fn is_email_valid_loose(email: &str) -> bool {
    email.contains('@') && email.contains('.')
}

/// Strict email check: `local@domain.tld` with no whitespace and one `@`
pub fn is_email_valid_strict(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email))
}

/// Check password strength
///
/// Returns `None` for an acceptable password, otherwise the message for the
/// first unmet group of requirements. The character classes are reported
/// together, not individually.
pub fn password_strength(password: &str) -> Option<&'static str> {
    if password.is_empty() {
        return Some(MSG_PASSWORD_REQUIRED);
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Some(MSG_PASSWORD_LENGTH);
    }

    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| PASSWORD_SYMBOLS.contains(c));

    if !(has_upper && has_lower && has_digit && has_symbol) {
        return Some(MSG_PASSWORD_CLASSES);
    }

    None
}

/// A select field has a non-empty value
pub fn is_selected(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Optional numeric field: blank is fine, otherwise a non-negative amount
pub fn is_non_negative_number(value: &str) -> bool {
    value.trim().is_empty() || Money::parse(value).is_ok_and(|m| !m.is_negative())
}

/// Registration form input
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,

    /// Wiped from memory when the form is dropped
    pub password: Zeroizing<String>,

    /// Selected governorate name, empty when nothing was chosen
    pub governorate: String,

    pub accept_terms: bool,
}

impl RegistrationForm {
    /// Validate the form, stopping at the first failure
    ///
    /// Order: name, email, password, governorate, terms.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !is_name_present(&self.name) {
            return Err(MSG_NAME);
        }

        if !is_email_valid_loose(&self.email) {
            return Err(MSG_EMAIL);
        }

        if let Some(message) = password_strength(&self.password) {
            return Err(message);
        }

        if !is_selected(&self.governorate) {
            return Err(MSG_GOVERNORATE);
        }

        if !self.accept_terms {
            return Err(MSG_TERMS);
        }

        Ok(())
    }

    /// The selected governorate, if it names a known one
    pub fn selected_governorate(&self) -> Option<Governorate> {
        Governorate::from_name(&self.governorate)
    }
}
