//! UI shell state.
//!
//! # Responsibility
//! - Hold the two panel toggles, the filter text and the contact book.
//! - Turn UI events into contact list / filter mutations.
//! - Render a plain-text frame of the current state.
//!
//! # Invariants
//! - Toggles are independent two-state machines; no event couples them.
//! - Filter text survives closing the filter panel and is never persisted.
//! - A successful submit closes the add-contact form; a rejected one keeps it open.

use crate::form::{validate_new_contact, FormError};
use crate::model::contact::{Contact, ContactId};
use crate::notify::Notifier;
use crate::service::contact_book::ContactBook;
use crate::store::KeyValueStore;
use crate::view::filter::FilteredView;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter, Write as _};
use std::str::FromStr;

/// Closed set of toggleable panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleTarget {
    Form,
    Filter,
}

impl ToggleTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Form => "form",
            Self::Filter => "filter",
        }
    }
}

impl FromStr for ToggleTarget {
    type Err = ToggleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "form" => Ok(Self::Form),
            "filter" => Ok(Self::Filter),
            _ => Err(ToggleError::UnknownTarget(value.to_string())),
        }
    }
}

/// Toggle target outside the enumerated set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleError {
    UnknownTarget(String),
}

impl Display for ToggleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTarget(value) => write!(f, "component not found: `{value}`"),
        }
    }
}

impl Error for ToggleError {}

/// Open/closed flags for the shell panels, both closed by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toggles {
    pub is_open_form: bool,
    pub is_open_filter: bool,
}

impl Toggles {
    /// Flips one flag and returns its new value.
    pub fn toggle(&mut self, target: ToggleTarget) -> bool {
        let flag = match target {
            ToggleTarget::Form => &mut self.is_open_form,
            ToggleTarget::Filter => &mut self.is_open_filter,
        };
        *flag = !*flag;
        *flag
    }

    pub fn is_open(&self, target: ToggleTarget) -> bool {
        match target {
            ToggleTarget::Form => self.is_open_form,
            ToggleTarget::Filter => self.is_open_filter,
        }
    }
}

/// Input delivered by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    Toggle(ToggleTarget),
    SetFilter(String),
    Submit { name: String, number: String },
    Delete(ContactId),
}

/// What an accepted event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    Toggled { target: ToggleTarget, open: bool },
    FilterChanged { visible: usize },
    Added(Contact),
    Rejected(FormError),
    Deleted { removed: bool },
}

/// Event delivered to a panel that is not shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellError {
    PanelClosed(ToggleTarget),
}

impl Display for ShellError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PanelClosed(target) => {
                write!(f, "`{}` panel is closed; toggle it open first", target.as_str())
            }
        }
    }
}

impl Error for ShellError {}

/// Phonebook UI state driven by `ShellEvent`s.
pub struct PhonebookShell<S: KeyValueStore, N: Notifier> {
    book: ContactBook<S, N>,
    toggles: Toggles,
    filter: String,
    view: FilteredView,
}

impl<S: KeyValueStore, N: Notifier> PhonebookShell<S, N> {
    pub fn new(book: ContactBook<S, N>) -> Self {
        Self {
            book,
            toggles: Toggles::default(),
            filter: String::new(),
            view: FilteredView::new(),
        }
    }

    pub fn book(&self) -> &ContactBook<S, N> {
        &self.book
    }

    pub fn toggles(&self) -> Toggles {
        self.toggles
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Applies one UI event.
    ///
    /// # Errors
    /// - `PanelClosed` when a submit or filter edit targets a hidden panel.
    pub fn handle(&mut self, event: ShellEvent) -> Result<ShellOutcome, ShellError> {
        match event {
            ShellEvent::Toggle(target) => {
                let open = self.toggles.toggle(target);
                debug!(
                    "event=shell_toggle module=shell status=ok target={} open={open}",
                    target.as_str()
                );
                Ok(ShellOutcome::Toggled { target, open })
            }
            ShellEvent::SetFilter(text) => {
                self.require_open(ToggleTarget::Filter)?;
                self.filter = text;
                let visible = self.visible_contacts().len();
                Ok(ShellOutcome::FilterChanged { visible })
            }
            ShellEvent::Submit { name, number } => {
                self.require_open(ToggleTarget::Form)?;
                match validate_new_contact(&name, &number, self.book.contacts()) {
                    Ok(accepted) => {
                        let contact = self.book.add(accepted.name, accepted.number);
                        self.toggles.toggle(ToggleTarget::Form);
                        Ok(ShellOutcome::Added(contact))
                    }
                    Err(err) => {
                        self.book.notifier().warning(&err.to_string());
                        Ok(ShellOutcome::Rejected(err))
                    }
                }
            }
            ShellEvent::Delete(id) => {
                let removed = self.book.delete(&id);
                Ok(ShellOutcome::Deleted { removed })
            }
        }
    }

    /// Contacts currently shown, after filtering.
    pub fn visible_contacts(&mut self) -> &[Contact] {
        self.view
            .refresh(self.book.revision(), self.book.contacts(), &self.filter)
    }

    /// Id of the visible contact at 1-based `position`.
    pub fn visible_contact_id(&mut self, position: usize) -> Option<ContactId> {
        let index = position.checked_sub(1)?;
        self.visible_contacts()
            .get(index)
            .map(|contact| contact.id.clone())
    }

    /// Renders the nav bar, open panels and the visible list.
    pub fn render(&mut self) -> String {
        let toggles = self.toggles;
        let filter = self.filter.clone();
        let mut frame = String::new();

        let _ = writeln!(
            frame,
            "[form: {}] [filter: {}]",
            open_label(toggles.is_open_form),
            open_label(toggles.is_open_filter)
        );
        if toggles.is_open_form {
            let _ = writeln!(frame, "-- add contact: name; number --");
        }
        if toggles.is_open_filter {
            let _ = writeln!(frame, "-- find contacts by name: \"{filter}\" --");
        }

        let visible = self.visible_contacts();
        if visible.is_empty() {
            let _ = writeln!(frame, "(no contacts)");
        }
        for (index, contact) in visible.iter().enumerate() {
            let _ = writeln!(
                frame,
                "{}. {}: {} [{}]",
                index + 1,
                contact.name,
                contact.number,
                contact.id
            );
        }
        frame
    }

    fn require_open(&self, target: ToggleTarget) -> Result<(), ShellError> {
        if self.toggles.is_open(target) {
            Ok(())
        } else {
            Err(ShellError::PanelClosed(target))
        }
    }
}

fn open_label(open: bool) -> &'static str {
    if open {
        "open"
    } else {
        "closed"
    }
}

#[cfg(test)]
mod tests {
    use super::{ToggleError, ToggleTarget, Toggles};

    #[test]
    fn toggles_start_closed_and_flip_independently() {
        let mut toggles = Toggles::default();
        assert!(!toggles.is_open(ToggleTarget::Form));
        assert!(!toggles.is_open(ToggleTarget::Filter));

        assert!(toggles.toggle(ToggleTarget::Form));
        assert!(!toggles.is_open(ToggleTarget::Filter));

        assert!(toggles.toggle(ToggleTarget::Filter));
        assert!(!toggles.toggle(ToggleTarget::Form));
        assert!(toggles.is_open(ToggleTarget::Filter));
    }

    #[test]
    fn parses_known_targets_and_rejects_others() {
        assert_eq!("form".parse::<ToggleTarget>(), Ok(ToggleTarget::Form));
        assert_eq!(" Filter ".parse::<ToggleTarget>(), Ok(ToggleTarget::Filter));
        assert_eq!(
            "sidebar".parse::<ToggleTarget>(),
            Err(ToggleError::UnknownTarget("sidebar".to_string()))
        );
    }
}
