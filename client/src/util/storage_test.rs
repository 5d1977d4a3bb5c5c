#![cfg(not(feature = "hydrate"))]

use super::*;
use session::{JsonPersistence, MemorySession, PersistedSession, SessionService};

#[test]
fn reads_nothing_outside_the_browser() {
    assert_eq!(BrowserStorage.get_item("authStore").unwrap(), None);
}

#[test]
fn writes_report_unavailable() {
    assert!(matches!(BrowserStorage.set_item("authStore", "{}"), Err(PersistError::Unavailable)));
    assert!(matches!(BrowserStorage.remove_item("authStore"), Err(PersistError::Unavailable)));
}

#[test]
fn persisted_session_still_transitions_without_storage() {
    let session = PersistedSession::restore(MemorySession::default(), JsonPersistence::new(BrowserStorage));
    assert!(!session.is_authenticated());
    session.logout();
    assert!(!session.is_authenticated());
}
