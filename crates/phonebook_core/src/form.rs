//! Add-contact form validation.
//!
//! # Responsibility
//! - Normalize raw form input and reject it before it reaches `ContactBook::add`.
//!
//! # Invariants
//! - Accepted names are trimmed, non-empty and made of letters separated by
//!   single apostrophes, dashes or spaces.
//! - Accepted numbers are trimmed and match the phone-number pattern, using
//!   ASCII digits and ASCII space, tab, dash or dot separators only.
//! - A name already present in the list (ignoring case) is rejected.

use crate::model::contact::Contact;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{L}+(([' -][\p{L} ])?\p{L}*)*$").expect("valid name regex"));
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\+?[0-9]{1,4}?[-. \t]?\(?[0-9]{1,3}?\)?[-. \t]?[0-9]{1,4}[-. \t]?[0-9]{1,4}[-. \t]?[0-9]{1,9}$",
    )
    .expect("valid number regex")
});

/// Human-readable hint for the accepted name shape.
pub const NAME_HINT: &str =
    "Name may contain only letters, apostrophe, dash and spaces. For example Adrian, Jacob Mercer";
/// Human-readable hint for the accepted number shape.
pub const NUMBER_HINT: &str =
    "Phone number must be digits and can contain spaces, dashes, parentheses and can start with +";

/// Validated, normalized add-contact input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub number: String,
}

/// Rejection reasons for add-contact input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    EmptyName,
    InvalidName(String),
    EmptyNumber,
    InvalidNumber(String),
    DuplicateName(String),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::InvalidName(name) => write!(f, "invalid name `{name}`: {NAME_HINT}"),
            Self::EmptyNumber => write!(f, "number must not be empty"),
            Self::InvalidNumber(number) => write!(f, "invalid number `{number}`: {NUMBER_HINT}"),
            Self::DuplicateName(name) => write!(f, "{name} is already in contacts"),
        }
    }
}

impl Error for FormError {}

/// Validates raw form input against the current list.
pub fn validate_new_contact(
    name: &str,
    number: &str,
    existing: &[Contact],
) -> Result<NewContact, FormError> {
    let name = name.trim();
    let number = number.trim();

    if name.is_empty() {
        return Err(FormError::EmptyName);
    }
    if !NAME_RE.is_match(name) {
        return Err(FormError::InvalidName(name.to_string()));
    }
    if number.is_empty() {
        return Err(FormError::EmptyNumber);
    }
    if !NUMBER_RE.is_match(number) {
        return Err(FormError::InvalidNumber(number.to_string()));
    }

    let normalized = name.to_lowercase();
    if existing
        .iter()
        .any(|contact| contact.name.trim().to_lowercase() == normalized)
    {
        return Err(FormError::DuplicateName(name.to_string()));
    }

    Ok(NewContact {
        name: name.to_string(),
        number: number.to_string(),
    })
}
