use phonebook_core::{
    load_contacts, ContactBook, ContactId, FormError, MemoryKeyValueStore, NoticeKind,
    PhonebookShell, RecordingNotifier, ShellError, ShellEvent, ShellOutcome, ToggleTarget,
    CONTACTS_STORAGE_KEY,
};

fn shell(
    store: &MemoryKeyValueStore,
) -> PhonebookShell<&MemoryKeyValueStore, RecordingNotifier> {
    PhonebookShell::new(ContactBook::open(store, RecordingNotifier::new()))
}

fn submit(name: &str, number: &str) -> ShellEvent {
    ShellEvent::Submit {
        name: name.to_string(),
        number: number.to_string(),
    }
}

#[test]
fn panels_start_closed_and_toggle_independently() {
    let store = MemoryKeyValueStore::new();
    let mut shell = shell(&store);

    assert!(!shell.toggles().is_open_form);
    assert!(!shell.toggles().is_open_filter);

    let outcome = shell.handle(ShellEvent::Toggle(ToggleTarget::Filter)).unwrap();
    assert_eq!(
        outcome,
        ShellOutcome::Toggled {
            target: ToggleTarget::Filter,
            open: true
        }
    );
    assert!(!shell.toggles().is_open_form);
    assert!(shell.toggles().is_open_filter);
}

#[test]
fn submit_adds_contact_and_closes_form() {
    let store = MemoryKeyValueStore::new();
    let mut shell = shell(&store);
    shell.handle(ShellEvent::Toggle(ToggleTarget::Form)).unwrap();

    let outcome = shell.handle(submit(" Test User ", "111-11-11")).unwrap();

    let contact = match outcome {
        ShellOutcome::Added(contact) => contact,
        other => panic!("expected Added, got {other:?}"),
    };
    assert_eq!(contact.name, "Test User");
    assert!(!shell.toggles().is_open_form);
    assert_eq!(shell.visible_contacts().len(), 5);
    assert_eq!(
        load_contacts(&store, CONTACTS_STORAGE_KEY).unwrap().len(),
        5
    );
    assert_eq!(
        shell.book().notifier().successes(),
        vec!["Test User was successfully added to contacts".to_string()]
    );
}

#[test]
fn rejected_submit_keeps_form_open_and_warns() {
    let store = MemoryKeyValueStore::new();
    let mut shell = shell(&store);
    shell.handle(ShellEvent::Toggle(ToggleTarget::Form)).unwrap();

    let outcome = shell.handle(submit("Rosie Simpson", "000-00-00")).unwrap();

    assert_eq!(
        outcome,
        ShellOutcome::Rejected(FormError::DuplicateName("Rosie Simpson".to_string()))
    );
    assert!(shell.toggles().is_open_form);
    assert_eq!(shell.book().len(), 4);
    assert_eq!(
        shell.book().notifier().notices(),
        vec![(
            NoticeKind::Warning,
            "Rosie Simpson is already in contacts".to_string()
        )]
    );
}

#[test]
fn events_for_closed_panels_are_refused() {
    let store = MemoryKeyValueStore::new();
    let mut shell = shell(&store);

    assert_eq!(
        shell.handle(submit("Test User", "111-11-11")),
        Err(ShellError::PanelClosed(ToggleTarget::Form))
    );
    assert_eq!(
        shell.handle(ShellEvent::SetFilter("ros".to_string())),
        Err(ShellError::PanelClosed(ToggleTarget::Filter))
    );
    assert_eq!(shell.book().len(), 4);
}

#[test]
fn filter_narrows_view_and_survives_closing_panel() {
    let store = MemoryKeyValueStore::new();
    let mut shell = shell(&store);
    shell.handle(ShellEvent::Toggle(ToggleTarget::Filter)).unwrap();

    let outcome = shell.handle(ShellEvent::SetFilter("ROS".to_string())).unwrap();
    assert_eq!(outcome, ShellOutcome::FilterChanged { visible: 1 });
    assert_eq!(shell.visible_contacts()[0].name, "Rosie Simpson");

    shell.handle(ShellEvent::Toggle(ToggleTarget::Filter)).unwrap();
    assert_eq!(shell.filter(), "ROS");
    assert_eq!(shell.visible_contacts().len(), 1);

    shell.handle(ShellEvent::Toggle(ToggleTarget::Filter)).unwrap();
    let outcome = shell.handle(ShellEvent::SetFilter("xyz".to_string())).unwrap();
    assert_eq!(outcome, ShellOutcome::FilterChanged { visible: 0 });
}

#[test]
fn delete_by_visible_position_refreshes_view() {
    let store = MemoryKeyValueStore::new();
    let mut shell = shell(&store);
    shell.handle(ShellEvent::Toggle(ToggleTarget::Filter)).unwrap();
    shell.handle(ShellEvent::SetFilter("e".to_string())).unwrap();

    let id = shell.visible_contact_id(3).expect("third visible contact");
    assert_eq!(id, ContactId::from("id-3"));
    assert_eq!(shell.visible_contact_id(0), None);

    let outcome = shell.handle(ShellEvent::Delete(id)).unwrap();
    assert_eq!(outcome, ShellOutcome::Deleted { removed: true });
    assert!(shell
        .visible_contacts()
        .iter()
        .all(|contact| contact.name != "Eden Clements"));
    assert_eq!(
        shell.book().notifier().successes(),
        vec!["Contact successfully removed".to_string()]
    );
}

#[test]
fn render_shows_panels_and_numbered_list() {
    let store = MemoryKeyValueStore::new();
    let mut shell = shell(&store);

    let frame = shell.render();
    assert!(frame.starts_with("[form: closed] [filter: closed]"));
    assert!(frame.contains("1. Rosie Simpson: 459-12-56 [id-1]"));
    assert!(frame.contains("4. Annie Copeland: 227-91-26 [id-4]"));

    shell.handle(ShellEvent::Toggle(ToggleTarget::Filter)).unwrap();
    shell.handle(ShellEvent::SetFilter("zzz".to_string())).unwrap();
    let frame = shell.render();
    assert!(frame.contains("[filter: open]"));
    assert!(frame.contains("\"zzz\""));
    assert!(frame.contains("(no contacts)"));
}
