//! Single-step contact form.
//!
//! Unlike the quote wizard, which only checks presence, the contact form
//! validates the shape of the email address and phone number.

use crate::core::error::UnknownFieldError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+]?[(]?[0-9]{1,4}[)]?[-\s.]?[(]?[0-9]{1,4}[)]?[-\s.]?[0-9]{1,9}$")
        .expect("valid phone regex")
});

const MIN_NAME_CHARS: usize = 2;

/// Fields of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Company,
    Phone,
    Email,
}

impl ContactField {
    /// Prompt order used by interactive hosts.
    pub const ALL: [ContactField; 4] = [
        ContactField::Name,
        ContactField::Company,
        ContactField::Phone,
        ContactField::Email,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Company => "company",
            ContactField::Phone => "phone",
            ContactField::Email => "email",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, ContactField::Company)
    }
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(ContactField::Name),
            "company" => Ok(ContactField::Company),
            "phone" => Ok(ContactField::Phone),
            "email" => Ok(ContactField::Email),
            _ => Err(UnknownFieldError(s.to_string())),
        }
    }
}

/// Per-field validation messages. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactErrors(BTreeMap<ContactField, String>);

impl ContactErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: ContactField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Drop the message for `field`, e.g. when the user edits it.
    pub fn clear(&mut self, field: ContactField) {
        self.0.remove(&field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: ContactField, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

impl std::fmt::Display for ContactErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Contact form data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub company: String,
    pub phone: String,
    pub email: String,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.name = value,
            ContactField::Company => self.company = value,
            ContactField::Phone => self.phone = value,
            ContactField::Email => self.email = value,
        }
    }

    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Company => &self.company,
            ContactField::Phone => &self.phone,
            ContactField::Email => &self.email,
        }
    }

    /// Validate every field, collecting one message per failing field.
    pub fn validate(&self) -> Result<(), ContactErrors> {
        let mut errors = ContactErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(ContactField::Name, "Name is required");
        } else if name.chars().count() < MIN_NAME_CHARS {
            errors.insert(ContactField::Name, "Name must be at least 2 characters");
        }

        if self.email.trim().is_empty() {
            errors.insert(ContactField::Email, "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.insert(ContactField::Email, "Please enter a valid email address");
        }

        if self.phone.trim().is_empty() {
            errors.insert(ContactField::Phone, "Phone number is required");
        } else if !is_valid_phone(&self.phone) {
            errors.insert(ContactField::Phone, "Please enter a valid phone number");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}
