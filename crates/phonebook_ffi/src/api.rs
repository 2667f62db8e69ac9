//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level phonebook functions to Dart via FRB.
//! - Keep error semantics simple: envelopes carry `ok` plus a message.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call opens storage, applies one operation and closes it again.

use phonebook_core::db::open_db;
use phonebook_core::{
    core_version as core_version_inner, filter_contacts, init_logging as init_logging_inner,
    ping as ping_inner, validate_new_contact, Contact, ContactBook, ContactId, NoticeKind,
    RecordingNotifier, SqliteKeyValueStore,
};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

const CONTACTS_DB_FILE_NAME: &str = "phonebook.sqlite3";
static CONTACTS_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
// Each call rewrites the whole list, so calls must not interleave.
static CONTACTS_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), PathBuf::from(log_dir.trim())) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One contact row for list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactItem {
    pub id: String,
    pub name: String,
    pub number: String,
}

/// Action response envelope for add/delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected contact ID, when known.
    pub contact_id: Option<String>,
    /// Notification text on success, error description otherwise.
    pub message: String,
}

impl ContactActionResponse {
    fn success(message: impl Into<String>, contact_id: Option<String>) -> Self {
        Self {
            ok: true,
            contact_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            contact_id: None,
            message: message.into(),
        }
    }
}

/// Lists contacts whose name contains `filter`, ignoring case.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; returns an empty list when storage cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_list(filter: String) -> Vec<ContactItem> {
    match with_contact_book(|book| {
        filter_contacts(book.contacts(), &filter)
            .into_iter()
            .map(to_contact_item)
            .collect::<Vec<_>>()
    }) {
        Ok(items) => items,
        Err(err) => {
            log::error!("event=ffi_contacts_list module=ffi status=error error={err}");
            Vec::new()
        }
    }
}

/// Validates and adds one contact.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns the created contact ID and the success notification text.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_add(name: String, number: String) -> ContactActionResponse {
    let result = with_contact_book(|book| {
        let accepted = validate_new_contact(&name, &number, book.contacts())
            .map_err(|err| err.to_string())?;
        let contact = book.add(accepted.name, accepted.number);
        Ok::<_, String>((contact.id.to_string(), last_success(book.notifier())))
    });

    match result {
        Ok(Ok((contact_id, message))) => ContactActionResponse::success(message, Some(contact_id)),
        Ok(Err(err)) => ContactActionResponse::failure(err),
        Err(err) => ContactActionResponse::failure(format!("contact_add failed: {err}")),
    }
}

/// Deletes one contact by ID; unknown IDs are a successful no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_delete(id: String) -> ContactActionResponse {
    let contact_id = ContactId::from(id.trim());
    match with_contact_book(|book| {
        book.delete(&contact_id);
        last_success(book.notifier())
    }) {
        Ok(message) => ContactActionResponse::success(message, Some(contact_id.to_string())),
        Err(err) => ContactActionResponse::failure(format!("contact_delete failed: {err}")),
    }
}

fn resolve_contacts_db_path() -> PathBuf {
    CONTACTS_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("PHONEBOOK_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(CONTACTS_DB_FILE_NAME)
        })
        .clone()
}

fn with_contact_book<T>(
    f: impl FnOnce(&mut ContactBook<SqliteKeyValueStore<'_>, RecordingNotifier>) -> T,
) -> Result<T, String> {
    let _guard = CONTACTS_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let db_path = resolve_contacts_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("contacts DB open failed: {err}"))?;
    let mut book = ContactBook::open(SqliteKeyValueStore::new(&conn), RecordingNotifier::new());
    Ok(f(&mut book))
}

fn last_success(notifier: &RecordingNotifier) -> String {
    notifier
        .notices()
        .into_iter()
        .rev()
        .find(|(kind, _)| *kind == NoticeKind::Success)
        .map(|(_, message)| message)
        .unwrap_or_default()
}

fn to_contact_item(contact: &Contact) -> ContactItem {
    ContactItem {
        id: contact.id.to_string(),
        name: contact.name.clone(),
        number: contact.number.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        contact_add, contact_delete, contacts_list, core_version, init_logging, ping,
        resolve_contacts_db_path,
    };
    use phonebook_core::db::open_db;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn contact_add_returns_notification_and_is_listed() {
        let name = unique_name("Ffi Added");
        let response = contact_add(name.clone(), "111-11-11".to_string());
        assert!(response.ok, "{}", response.message);
        assert_eq!(
            response.message,
            format!("{name} was successfully added to contacts")
        );
        let contact_id = response.contact_id.expect("add should return contact_id");

        let listed = contacts_list(name.to_uppercase());
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, contact_id);

        let conn = open_db(resolve_contacts_db_path()).expect("open db");
        let raw: String = conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = 'contacts'",
                [],
                |row| row.get(0),
            )
            .expect("contacts row");
        assert!(raw.contains(&contact_id));
    }

    #[test]
    fn contact_add_rejects_invalid_number() {
        let response = contact_add(unique_name("Ffi Invalid"), "not a number".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid number"));
    }

    #[test]
    fn contact_delete_removes_contact_and_tolerates_unknown_ids() {
        let name = unique_name("Ffi Deleted");
        let added = contact_add(name.clone(), "222-22-22".to_string());
        let contact_id = added.contact_id.expect("add should return contact_id");

        let deleted = contact_delete(contact_id);
        assert!(deleted.ok, "{}", deleted.message);
        assert_eq!(deleted.message, "Contact successfully removed");
        assert!(contacts_list(name).is_empty());

        let unknown = contact_delete("no-such-id".to_string());
        assert!(unknown.ok);
    }

    /// Letters only, so generated names pass form validation.
    fn unique_name(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        let suffix: String = nanos
            .to_string()
            .chars()
            .map(|digit| char::from(b'a' + digit.to_digit(10).unwrap_or(0) as u8))
            .collect();
        format!("{prefix} {suffix}")
    }
}
