//! Contact list state.
//!
//! # Responsibility
//! - Own the in-memory, insertion-ordered contact list.
//! - Mirror every mutation to local storage under one fixed key.
//! - Report add/delete success through the injected `Notifier`.
//!
//! # Invariants
//! - Contact ids are unique within the list.
//! - Insertion order is preserved; add appends, delete removes in place.
//! - Storage is written after every mutation, even a no-op delete.
//! - `add` does not re-validate input; the add-contact form does that.

use crate::model::contact::{
    seed_contacts, validate_contact_list, Contact, ContactId, ContactListError,
};
use crate::notify::Notifier;
use crate::store::contacts::{load_contacts, save_contacts, CONTACTS_STORAGE_KEY};
use crate::store::KeyValueStore;
use log::info;

/// Success message emitted after a contact is removed.
pub const CONTACT_REMOVED_MESSAGE: &str = "Contact successfully removed";

/// Success message emitted after `name` is added.
pub fn contact_added_message(name: &str) -> String {
    format!("{name} was successfully added to contacts")
}

/// Where the initial list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSource {
    Storage,
    Seed,
}

/// Stateful contact list synchronized to a `KeyValueStore`.
pub struct ContactBook<S: KeyValueStore, N: Notifier> {
    store: S,
    notifier: N,
    key: String,
    contacts: Vec<Contact>,
    source: ContactSource,
    revision: u64,
}

impl<S: KeyValueStore, N: Notifier> ContactBook<S, N> {
    /// Loads the book from the default `contacts` key.
    pub fn open(store: S, notifier: N) -> Self {
        Self::open_with_key(store, notifier, CONTACTS_STORAGE_KEY)
    }

    /// Loads the book from `key`, falling back to the seed list.
    ///
    /// # Side effects
    /// - Writes the resulting list back to storage once, so a first run
    ///   leaves the seed list persisted.
    pub fn open_with_key(store: S, notifier: N, key: impl Into<String>) -> Self {
        let key = key.into();
        let (contacts, source) = match load_contacts(&store, &key) {
            Some(contacts) => (contacts, ContactSource::Storage),
            None => (seed_contacts(), ContactSource::Seed),
        };
        info!(
            "event=contacts_init module=service status=ok source={} count={}",
            source_label(source),
            contacts.len()
        );

        let book = Self {
            store,
            notifier,
            key,
            contacts,
            source,
            revision: 0,
        };
        book.persist();
        book
    }

    /// Current list in insertion order.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Monotonic counter bumped on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn source(&self) -> ContactSource {
        self.source
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn get(&self, id: &ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|contact| &contact.id == id)
    }

    /// Appends a new contact with a fresh id and returns it.
    pub fn add(&mut self, name: impl Into<String>, number: impl Into<String>) -> Contact {
        let mut contact = Contact::new(name, number);
        while self.get(&contact.id).is_some() {
            contact.id = ContactId::generate();
        }

        self.contacts.push(contact.clone());
        self.revision += 1;
        self.persist();
        info!(
            "event=contact_add module=service status=ok id={} count={}",
            contact.id,
            self.contacts.len()
        );
        self.notifier.success(&contact_added_message(&contact.name));
        contact
    }

    /// Removes the contact with `id`; returns whether one was removed.
    ///
    /// An unknown id leaves the list unchanged but still persists and notifies.
    pub fn delete(&mut self, id: &ContactId) -> bool {
        let before = self.contacts.len();
        self.contacts.retain(|contact| &contact.id != id);
        let removed = self.contacts.len() != before;
        if removed {
            self.revision += 1;
        }

        self.persist();
        info!(
            "event=contact_delete module=service status=ok id={} removed={} count={}",
            id,
            removed,
            self.contacts.len()
        );
        self.notifier.success(CONTACT_REMOVED_MESSAGE);
        removed
    }

    /// Replaces the whole list.
    ///
    /// # Errors
    /// - Returns `ContactListError` when `contacts` has blank or duplicate ids;
    ///   the current list is kept in that case.
    pub fn replace(&mut self, contacts: Vec<Contact>) -> Result<(), ContactListError> {
        validate_contact_list(&contacts)?;
        self.contacts = contacts;
        self.revision += 1;
        self.persist();
        Ok(())
    }

    fn persist(&self) {
        save_contacts(&self.store, &self.key, &self.contacts);
    }
}

fn source_label(source: ContactSource) -> &'static str {
    match source {
        ContactSource::Storage => "storage",
        ContactSource::Seed => "seed",
    }
}
