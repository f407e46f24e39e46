use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::models::CustomerRecord;

lazy_static! {
    // Anchored at the start only: trailing text after the first `x@y.z` is accepted.
    static ref EMAIL_PATTERN: Regex = Regex::new(r"^[^@]+@[^@]+\.[^@]+").unwrap();
    // chrono alone accepts unpadded fields, signs and short years.
    static ref BIRTHDAY_PATTERN: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

/// Input-shape rejections, decided before storage is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is a required field.")]
    MissingName,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please enter the birthday as YYYY-MM-DD.")]
    InvalidBirthday,
}

/// Which optional checks run on top of the name and email rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationRules {
    /// Reject non-empty birthdays that are not a real `YYYY-MM-DD` date.
    pub strict_birthday: bool,
}

impl ValidationRules {
    pub fn strict() -> Self {
        Self {
            strict_birthday: true,
        }
    }

    /// Checks run in order: name, email, then birthday when enabled.
    pub fn validate(&self, record: &CustomerRecord) -> Result<(), ValidationError> {
        if record.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }

        if !record.email.is_empty() && !is_valid_email(&record.email) {
            return Err(ValidationError::InvalidEmail);
        }

        if self.strict_birthday
            && !record.birthday.is_empty()
            && !is_valid_birthday(&record.birthday)
        {
            return Err(ValidationError::InvalidBirthday);
        }

        Ok(())
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn is_valid_birthday(birthday: &str) -> bool {
    BIRTHDAY_PATTERN.is_match(birthday)
        && NaiveDate::parse_from_str(birthday, BIRTHDAY_FORMAT).is_ok()
}
