//! Core domain logic for the phonebook.
//! This crate is the single source of truth for contact list invariants.

pub mod config;
pub mod db;
pub mod form;
pub mod logging;
pub mod model;
pub mod notify;
pub mod service;
pub mod shell;
pub mod store;
pub mod view;

pub use config::{resolve_config, AppConfig, ConfigError, ConfigOverrides};
pub use form::{validate_new_contact, FormError, NewContact};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::contact::{seed_contacts, Contact, ContactId, ContactListError};
pub use notify::{LogNotifier, NoticeKind, Notifier, RecordingNotifier};
pub use service::contact_book::{ContactBook, ContactSource, CONTACT_REMOVED_MESSAGE};
pub use shell::{
    PhonebookShell, ShellError, ShellEvent, ShellOutcome, ToggleError, ToggleTarget, Toggles,
};
pub use store::contacts::{load_contacts, save_contacts, CONTACTS_STORAGE_KEY};
pub use store::memory_store::MemoryKeyValueStore;
pub use store::sqlite_store::SqliteKeyValueStore;
pub use store::{KeyValueStore, StoreError, StoreResult};
pub use view::filter::{filter_contacts, FilteredView};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
