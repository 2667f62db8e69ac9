//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical contact record and its opaque identifier.
//! - Provide the fixed seed list used when storage holds nothing usable.
//!
//! # Invariants
//! - `id` is stable and never reused for another contact.
//! - A contact is immutable once created; there is no edit path.
//! - Within one contact list, ids are unique.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque contact identifier.
///
/// Generated contacts carry a UUID v4 string; seed contacts carry the fixed
/// `id-N` values, so the identifier is kept as free-form text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    /// Generates a fresh unique identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for ContactId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ContactId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for ContactId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One phonebook entry.
///
/// Serialized as `{ "id", "name", "number" }`, which is also the persisted
/// storage shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub number: String,
}

impl Contact {
    /// Creates a contact with a generated id.
    ///
    /// Does not validate `name`/`number`; that belongs to the add-contact form.
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self::with_id(ContactId::generate(), name, number)
    }

    /// Creates a contact with a caller-provided id.
    pub fn with_id(
        id: impl Into<ContactId>,
        name: impl Into<String>,
        number: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            number: number.into(),
        }
    }
}

/// Structural problems found in a contact sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactListError {
    EmptyId { index: usize },
    DuplicateId(ContactId),
}

impl Display for ContactListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId { index } => write!(f, "contact at index {index} has an empty id"),
            Self::DuplicateId(id) => write!(f, "duplicate contact id `{id}`"),
        }
    }
}

impl Error for ContactListError {}

/// Checks the list-level invariants: non-empty ids, no duplicates.
pub fn validate_contact_list(contacts: &[Contact]) -> Result<(), ContactListError> {
    let mut seen = HashSet::with_capacity(contacts.len());
    for (index, contact) in contacts.iter().enumerate() {
        if contact.id.is_empty() {
            return Err(ContactListError::EmptyId { index });
        }
        if !seen.insert(&contact.id) {
            return Err(ContactListError::DuplicateId(contact.id.clone()));
        }
    }
    Ok(())
}

/// Returns the fixed seed list used on first run.
pub fn seed_contacts() -> Vec<Contact> {
    vec![
        Contact::with_id("id-1", "Rosie Simpson", "459-12-56"),
        Contact::with_id("id-2", "Hermione Kline", "443-89-12"),
        Contact::with_id("id-3", "Eden Clements", "645-17-79"),
        Contact::with_id("id-4", "Annie Copeland", "227-91-26"),
    ]
}
