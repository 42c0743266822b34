//! Checkout form validation and order response handling.
//!
//! Each field is checked on its own after trimming; there are no cross-field
//! rules. A form with an empty [`ValidationErrors`] may be submitted.

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::Email;

/// Message shown when the order API rejects or fails a checkout.
pub const CHECKOUT_FAILED_MESSAGE: &str = "Checkout failed. Please try again.";

/// Body the order API answers with when it accepts an order.
const SUCCESS_BODY: &str = "success";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]{9,}$").expect("Invalid regex"));
static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("Invalid regex"));

const MIN_NAME_CHARS: usize = 2;

/// Contact details collected at checkout, in the order API's JSON shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub zip_code: String,
}

impl CheckoutForm {
    /// Check every field, returning the messages for the ones that fail.
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();

        let checks = [
            (Field::Name, validate_name(&self.name, "Name")),
            (Field::Surname, validate_name(&self.surname, "Surname")),
            (Field::PhoneNumber, validate_phone(&self.phone_number)),
            (Field::Email, validate_email(&self.email)),
            (Field::ZipCode, validate_zip(&self.zip_code)),
        ];
        for (field, result) in checks {
            if let Err(message) = result {
                errors.insert(field, message);
            }
        }

        errors
    }

    /// Copy with surrounding whitespace removed from every field.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            surname: self.surname.trim().to_owned(),
            phone_number: self.phone_number.trim().to_owned(),
            email: self.email.trim().to_owned(),
            zip_code: self.zip_code.trim().to_owned(),
        }
    }

    /// Current value of `field`.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Surname => &self.surname,
            Field::PhoneNumber => &self.phone_number,
            Field::Email => &self.email,
            Field::ZipCode => &self.zip_code,
        }
    }
}

fn validate_name(value: &str, label: &'static str) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{label} is required"));
    }
    if value.chars().count() < MIN_NAME_CHARS {
        return Err(format!("{label} must be at least {MIN_NAME_CHARS} characters"));
    }
    Ok(())
}

fn validate_phone(value: &str) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Phone number is required".to_owned());
    }
    if !PHONE_RE.is_match(value) {
        return Err("Please enter a valid phone number".to_owned());
    }
    Ok(())
}

fn validate_email(value: &str) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Email is required".to_owned());
    }
    Email::parse(value)
        .map(|_| ())
        .map_err(|_| "Please enter a valid email address".to_owned())
}

fn validate_zip(value: &str) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Zip code is required".to_owned());
    }
    if !ZIP_RE.is_match(value) {
        return Err("Please enter a valid zip code (e.g., 12345 or 12345-6789)".to_owned());
    }
    Ok(())
}

/// A checkout form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Surname,
    PhoneNumber,
    Email,
    ZipCode,
}

impl Field {
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Surname,
        Self::PhoneNumber,
        Self::Email,
        Self::ZipCode,
    ];

    /// Form and JSON key for this field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Surname => "surname",
            Self::PhoneNumber => "phoneNumber",
            Self::Email => "email",
            Self::ZipCode => "zipCode",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown checkout field: {s}"))
    }
}

/// Per-field validation messages. A field without an entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Drop the message for `field`, as happens when the shopper edits it.
    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// How the order API answered a checkout submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Accepted,
    /// Anything other than the success body.
    Rejected { body: String },
}

impl CheckoutOutcome {
    /// Interpret a 2xx response body. Only the exact body `success` counts.
    #[must_use]
    pub fn from_response_body(body: &str) -> Self {
        if body == SUCCESS_BODY {
            Self::Accepted
        } else {
            Self::Rejected {
                body: body.to_owned(),
            }
        }
    }

    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            name: "Ada".to_string(),
            surname: "Lovelace".to_string(),
            phone_number: "+1 (555) 010-2030".to_string(),
            email: "ada@example.com".to_string(),
            zip_code: "12345".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(valid_form().validate().is_empty());
    }

    #[test]
    fn test_required_fields() {
        let errors = CheckoutForm::default().validate();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get(Field::Name), Some("Name is required"));
        assert_eq!(errors.get(Field::Surname), Some("Surname is required"));
        assert_eq!(errors.get(Field::PhoneNumber), Some("Phone number is required"));
        assert_eq!(errors.get(Field::Email), Some("Email is required"));
        assert_eq!(errors.get(Field::ZipCode), Some("Zip code is required"));
    }

    #[test]
    fn test_whitespace_only_is_missing() {
        let form = CheckoutForm {
            name: "   ".to_string(),
            ..valid_form()
        };
        assert_eq!(form.validate().get(Field::Name), Some("Name is required"));
    }

    #[test]
    fn test_name_min_length_after_trim() {
        let form = CheckoutForm {
            name: " A ".to_string(),
            surname: "B".to_string(),
            ..valid_form()
        };
        let errors = form.validate();
        assert_eq!(errors.get(Field::Name), Some("Name must be at least 2 characters"));
        assert_eq!(
            errors.get(Field::Surname),
            Some("Surname must be at least 2 characters")
        );
    }

    #[test]
    fn test_email_rules() {
        let mut form = valid_form();
        form.email = "foo".to_string();
        assert_eq!(
            form.validate().get(Field::Email),
            Some("Please enter a valid email address")
        );

        form.email = "a@b.co".to_string();
        assert!(form.validate().get(Field::Email).is_none());
    }

    #[test]
    fn test_zip_rules() {
        let mut form = valid_form();
        for bad in ["1234", "123456", "12345-678", "abcde"] {
            form.zip_code = bad.to_string();
            assert!(form.validate().get(Field::ZipCode).is_some(), "{bad}");
        }
        for good in ["12345", "12345-6789", " 12345 "] {
            form.zip_code = good.to_string();
            assert!(form.validate().get(Field::ZipCode).is_none(), "{good}");
        }
    }

    #[test]
    fn test_phone_rules() {
        let mut form = valid_form();
        for bad in ["12345678", "555-abc-1234", "++123456789"] {
            form.phone_number = bad.to_string();
            assert_eq!(
                form.validate().get(Field::PhoneNumber),
                Some("Please enter a valid phone number"),
                "{bad}"
            );
        }
        form.phone_number = "123456789".to_string();
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_clear_single_field() {
        let mut errors = CheckoutForm::default().validate();
        errors.clear(Field::Email);
        assert!(errors.get(Field::Email).is_none());
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_serializes_with_api_keys() {
        let json = serde_json::to_value(valid_form()).unwrap();
        assert_eq!(json["phoneNumber"], "+1 (555) 010-2030");
        assert_eq!(json["zipCode"], "12345");
    }

    #[test]
    fn test_trimmed() {
        let form = CheckoutForm {
            email: "  ada@example.com\n".to_string(),
            ..valid_form()
        };
        assert_eq!(form.trimmed().email, "ada@example.com");
    }

    #[test]
    fn test_outcome_requires_exact_body() {
        assert!(CheckoutOutcome::from_response_body("success").is_accepted());
        assert!(!CheckoutOutcome::from_response_body("Success").is_accepted());
        assert!(!CheckoutOutcome::from_response_body("success\n").is_accepted());
        assert_eq!(
            CheckoutOutcome::from_response_body("out of stock"),
            CheckoutOutcome::Rejected {
                body: "out of stock".to_string()
            }
        );
    }

    #[test]
    fn test_field_names() {
        assert_eq!("zipCode".parse::<Field>().unwrap(), Field::ZipCode);
        assert!("zip".parse::<Field>().is_err());
    }
}
