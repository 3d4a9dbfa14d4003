use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::catalog::LearningArea;
use crate::models::UserRegistration;

const NAME_MIN_CHARS: usize = 2;
const PHONE_MIN_DIGITS: usize = 10;
const PHONE_MAX_DIGITS: usize = 15;

pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PHONE: &str = "phoneNumber";
pub const FIELD_AREA: &str = "learningArea";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Raw registration form as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub learning_area: Option<String>,
}

/// First failing rule per field, keyed by wire field name.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

impl RegistrationForm {
    pub fn validate(&self) -> Result<UserRegistration, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = self.name.trim();
        if let Some(message) = name_error(name) {
            errors.insert(FIELD_NAME, message);
        }

        let email = self.email.trim();
        if let Some(message) = email_error(email) {
            errors.insert(FIELD_EMAIL, message);
        }

        let phone = self.phone_number.trim();
        if let Some(message) = phone_error(phone) {
            errors.insert(FIELD_PHONE, message);
        }

        let area = self
            .learning_area
            .as_deref()
            .map(str::trim)
            .and_then(|raw| raw.parse::<LearningArea>().ok());
        if area.is_none() {
            errors.insert(FIELD_AREA, "Please select a learning area");
        }

        match area {
            Some(learning_area) if errors.is_empty() => Ok(UserRegistration {
                name: name.to_string(),
                email: email.to_string(),
                phone_number: phone.to_string(),
                learning_area,
            }),
            _ => Err(errors),
        }
    }
}

fn name_error(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("Name is required")
    } else if name.chars().count() < NAME_MIN_CHARS {
        Some("Name must be at least 2 characters")
    } else {
        None
    }
}

fn email_error(email: &str) -> Option<&'static str> {
    if email.is_empty() {
        Some("Email is required")
    } else if !is_valid_email(email) {
        Some("Invalid email address")
    } else {
        None
    }
}

fn phone_error(phone: &str) -> Option<&'static str> {
    if phone.is_empty() {
        Some("Phone number is required")
    } else if !is_valid_phone(phone) {
        Some("Invalid phone number")
    } else {
        None
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
        .is_match(email)
}

/// Accepts separators `space - . ( )` and one leading `+`; the rest must be
/// 10 to 15 ASCII digits.
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();
    let digits = compact.strip_prefix('+').unwrap_or(&compact);
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit())
}
