//! Contact list persistence adapter.
//!
//! # Responsibility
//! - Serialize the contact list as one JSON value under a fixed key.
//! - Turn every read problem into "absent" so callers fall back to seeds.
//!
//! # Invariants
//! - `load_contacts` never returns an error; malformed data reads as `None`.
//! - `save_contacts` is fire-and-forget; failures are logged, never surfaced.
//! - A successful `save_contacts(key, list)` is read back by
//!   `load_contacts(key)` as an equal list in the same order.

use super::KeyValueStore;
use crate::model::contact::{validate_contact_list, Contact};
use log::{debug, error, warn};

/// Fixed storage key for the contact list.
pub const CONTACTS_STORAGE_KEY: &str = "contacts";

/// Reads the contact list stored under `key`.
///
/// Returns `None` when nothing is stored, when the store cannot be read, or
/// when the stored value is not a well-formed contact list.
pub fn load_contacts<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<Vec<Contact>> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("event=contacts_load module=store status=absent key={key}");
            return None;
        }
        Err(err) => {
            error!(
                "event=contacts_load module=store status=error key={key} error_code=store_read_failed error={err}"
            );
            return None;
        }
    };

    match decode_contacts(&raw) {
        Ok(contacts) => {
            debug!(
                "event=contacts_load module=store status=ok key={key} count={}",
                contacts.len()
            );
            Some(contacts)
        }
        Err(reason) => {
            warn!(
                "event=contacts_load module=store status=malformed key={key} error_code=invalid_persisted_contacts error={reason}"
            );
            None
        }
    }
}

/// Writes the contact list under `key`, logging any failure.
pub fn save_contacts<S: KeyValueStore + ?Sized>(store: &S, key: &str, contacts: &[Contact]) {
    let encoded = match serde_json::to_string(contacts) {
        Ok(encoded) => encoded,
        Err(err) => {
            error!(
                "event=contacts_save module=store status=error key={key} error_code=encode_failed error={err}"
            );
            return;
        }
    };

    match store.set(key, &encoded) {
        Ok(()) => debug!(
            "event=contacts_save module=store status=ok key={key} count={}",
            contacts.len()
        ),
        Err(err) => error!(
            "event=contacts_save module=store status=error key={key} error_code=store_write_failed error={err}"
        ),
    }
}

fn decode_contacts(raw: &str) -> Result<Vec<Contact>, String> {
    let contacts: Vec<Contact> = serde_json::from_str(raw).map_err(|err| err.to_string())?;
    validate_contact_list(&contacts).map_err(|err| err.to_string())?;
    Ok(contacts)
}
