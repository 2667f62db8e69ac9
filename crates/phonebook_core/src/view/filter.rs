//! Filtered contact view.
//!
//! # Invariants
//! - Output order is the input list order.
//! - Matching is a case-insensitive substring test on `name` only.
//! - An empty filter matches every contact.

use crate::model::contact::Contact;

/// Returns contacts whose lower-cased name contains the lower-cased filter.
pub fn filter_contacts<'a>(contacts: &'a [Contact], filter: &str) -> Vec<&'a Contact> {
    let needle = filter.to_lowercase();
    contacts
        .iter()
        .filter(|contact| matches_filter(contact, &needle))
        .collect()
}

fn matches_filter(contact: &Contact, normalized_filter: &str) -> bool {
    normalized_filter.is_empty() || contact.name.to_lowercase().contains(normalized_filter)
}

/// Memoized filter result.
///
/// Keyed on the contact list revision and the filter text; `refresh`
/// recomputes only when either changed since the last call.
#[derive(Debug, Default)]
pub struct FilteredView {
    cached: Option<CachedView>,
    recomputations: u64,
}

#[derive(Debug)]
struct CachedView {
    revision: u64,
    filter: String,
    contacts: Vec<Contact>,
}

impl FilteredView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the visible contacts for `(revision, filter)`.
    pub fn refresh(&mut self, revision: u64, contacts: &[Contact], filter: &str) -> &[Contact] {
        let stale = self
            .cached
            .as_ref()
            .map_or(true, |cached| cached.revision != revision || cached.filter != filter);

        if stale {
            self.recomputations += 1;
            self.cached = Some(CachedView {
                revision,
                filter: filter.to_string(),
                contacts: filter_contacts(contacts, filter)
                    .into_iter()
                    .cloned()
                    .collect(),
            });
        }

        self.cached
            .as_ref()
            .map_or(&[][..], |cached| cached.contacts.as_slice())
    }

    /// How many times the view was actually recomputed.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}

#[cfg(test)]
mod tests {
    use super::{filter_contacts, FilteredView};
    use crate::model::contact::{seed_contacts, Contact};

    fn names(contacts: &[&Contact]) -> Vec<String> {
        contacts.iter().map(|contact| contact.name.clone()).collect()
    }

    #[test]
    fn empty_filter_matches_everything_in_order() {
        let seeds = seed_contacts();
        let visible = filter_contacts(&seeds, "");
        assert_eq!(
            names(&visible),
            vec![
                "Rosie Simpson",
                "Hermione Kline",
                "Eden Clements",
                "Annie Copeland"
            ]
        );
    }

    #[test]
    fn filter_is_case_insensitive() {
        let seeds = seed_contacts();
        assert_eq!(names(&filter_contacts(&seeds, "ros")), vec!["Rosie Simpson"]);
        assert_eq!(names(&filter_contacts(&seeds, "ROS")), vec!["Rosie Simpson"]);
        assert!(filter_contacts(&seeds, "xyz").is_empty());
    }

    #[test]
    fn filter_matches_inner_substrings_only_on_name() {
        let seeds = seed_contacts();
        assert_eq!(
            names(&filter_contacts(&seeds, "e c")),
            vec!["Annie Copeland"]
        );
        assert_eq!(
            names(&filter_contacts(&seeds, "en")),
            vec!["Eden Clements"]
        );
        assert!(filter_contacts(&seeds, "459").is_empty());
    }

    #[test]
    fn filtering_twice_gives_the_same_result() {
        let seeds = seed_contacts();
        let once = filter_contacts(&seeds, "an");
        let owned: Vec<Contact> = once.iter().map(|c| (*c).clone()).collect();
        let twice = filter_contacts(&owned, "an");
        assert_eq!(names(&once), names(&twice));
    }

    #[test]
    fn memoized_view_recomputes_only_on_input_change() {
        let seeds = seed_contacts();
        let mut view = FilteredView::new();

        assert_eq!(view.refresh(0, &seeds, "ros").len(), 1);
        assert_eq!(view.refresh(0, &seeds, "ros").len(), 1);
        assert_eq!(view.recomputations(), 1);

        assert_eq!(view.refresh(0, &seeds, "").len(), 4);
        assert_eq!(view.refresh(1, &seeds[..2], "").len(), 2);
        assert_eq!(view.recomputations(), 3);
    }
}
