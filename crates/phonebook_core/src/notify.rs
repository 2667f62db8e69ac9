//! Transient user notifications.
//!
//! State-mutating operations report success through an injected `Notifier`,
//! so core logic never depends on a concrete toast/print mechanism.

use log::info;
use std::cell::RefCell;

/// Capability for transient user-facing messages.
pub trait Notifier {
    fn success(&self, message: &str);

    /// Non-fatal user input problems (for example a rejected form).
    fn warning(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn success(&self, message: &str) {
        (**self).success(message)
    }

    fn warning(&self, message: &str) {
        (**self).warning(message)
    }
}

/// Routes notifications to the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        info!("event=notify module=notify status=ok kind=success message={message}");
    }

    fn warning(&self, message: &str) {
        info!("event=notify module=notify status=ok kind=warning message={message}");
    }
}

/// Notification kind captured by `RecordingNotifier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
}

/// Keeps every notification in memory, oldest first.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<(NoticeKind, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<(NoticeKind, String)> {
        self.notices.borrow().clone()
    }

    /// Messages of all success notifications.
    pub fn successes(&self) -> Vec<String> {
        self.messages(NoticeKind::Success)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(NoticeKind::Warning)
    }

    fn messages(&self, kind: NoticeKind) -> Vec<String> {
        self.notices
            .borrow()
            .iter()
            .filter(|(notice_kind, _)| *notice_kind == kind)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.notices
            .borrow_mut()
            .push((NoticeKind::Success, message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.notices
            .borrow_mut()
            .push((NoticeKind::Warning, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::{NoticeKind, Notifier, RecordingNotifier};

    #[test]
    fn recording_notifier_keeps_order_and_kind() {
        let notifier = RecordingNotifier::new();
        notifier.success("added");
        notifier.warning("duplicate");

        assert_eq!(notifier.successes(), vec!["added".to_string()]);
        assert_eq!(notifier.warnings(), vec!["duplicate".to_string()]);
        assert_eq!(
            notifier.notices(),
            vec![
                (NoticeKind::Success, "added".to_string()),
                (NoticeKind::Warning, "duplicate".to_string()),
            ]
        );
    }

    #[test]
    fn borrowed_notifier_keeps_warning_channel() {
        fn warn_through(notifier: impl Notifier) {
            notifier.warning("heads up");
        }

        let notifier = RecordingNotifier::new();
        warn_through(&notifier);
        assert_eq!(
            notifier.notices(),
            vec![(NoticeKind::Warning, "heads up".to_string())]
        );
    }
}
