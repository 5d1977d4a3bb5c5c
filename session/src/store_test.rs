use super::*;
use crate::test_support::{sample_tokens, sample_user};

fn holds_invariant(session: &Session) -> bool {
    session.user().is_some() == session.tokens().is_some()
}

// =============================================================
// Pure transitions
// =============================================================

#[test]
fn empty_session_is_unauthenticated() {
    let session = Session::empty();
    assert!(!session.is_authenticated());
    assert_eq!(session.user(), None);
    assert_eq!(session.access_token(), None);
}

#[test]
fn logged_in_exposes_user_and_tokens() {
    let session = Session::logged_in(sample_user(), sample_tokens());
    assert!(session.is_authenticated());
    assert_eq!(session.role(), Some("admin"));
    assert_eq!(session.access_token(), Some("access-1"));
}

#[test]
fn user_patch_on_empty_session_yields_none() {
    let patch = UserPatch { first_name: Some("Ghost".to_owned()), ..UserPatch::default() };
    assert_eq!(Session::empty().with_user_patch(patch), None);
}

#[test]
fn user_patch_keeps_tokens() {
    let session = Session::logged_in(sample_user(), sample_tokens());
    let patch = UserPatch { email: Some("new@example.com".to_owned()), ..UserPatch::default() };
    let next = session.with_user_patch(patch).unwrap();
    assert_eq!(next.user().unwrap().email, "new@example.com");
    assert_eq!(next.tokens(), session.tokens());
}

// =============================================================
// Serialization
// =============================================================

#[test]
fn session_serializes_as_user_and_backend_tokens() {
    let value = serde_json::to_value(Session::logged_in(sample_user(), sample_tokens())).unwrap();
    assert_eq!(value["user"]["firstName"], "Ada");
    assert_eq!(value["backendTokens"]["accessToken"], "access-1");
    assert_eq!(value["backendTokens"]["refreshToken"], "refresh-1");

    let empty = serde_json::to_value(Session::empty()).unwrap();
    assert_eq!(empty, serde_json::json!({ "user": null, "backendTokens": null }));
}

#[test]
fn session_rejects_user_without_tokens() {
    let raw = serde_json::json!({ "user": serde_json::to_value(sample_user()).unwrap(), "backendTokens": null });
    assert!(serde_json::from_value::<Session>(raw).is_err());
}

#[test]
fn session_rejects_tokens_without_user() {
    let raw = serde_json::json!({
        "user": null,
        "backendTokens": { "accessToken": "a", "refreshToken": "r" }
    });
    assert!(serde_json::from_value::<Session>(raw).is_err());
}

// =============================================================
// Service
// =============================================================

#[test]
fn memory_session_login_logout_round() {
    let session = MemorySession::default();
    session.login(sample_user(), sample_tokens());
    assert!(session.is_authenticated());
    assert_eq!(session.access_token().as_deref(), Some("access-1"));

    session.logout();
    assert!(!session.is_authenticated());
    assert_eq!(session.snapshot(), Session::empty());
}

#[test]
fn memory_session_clones_share_state() {
    let session = MemorySession::default();
    let reader = session.clone();
    session.login(sample_user(), sample_tokens());
    assert!(reader.is_authenticated());
}

#[test]
fn update_user_without_user_is_noop() {
    let session = MemorySession::default();
    let applied = session.update_user(UserPatch { role: Some("admin".to_owned()), ..UserPatch::default() });
    assert!(!applied);
    assert_eq!(session.snapshot(), Session::empty());
}

enum Op {
    Login(&'static str),
    Logout,
    Update(&'static str),
}

#[test]
fn invariant_holds_across_mixed_operation_sequences() {
    let session = MemorySession::default();
    let ops = [
        Op::Update("Byron"),
        Op::Login("access-1"),
        Op::Update("Byron"),
        Op::Logout,
        Op::Logout,
        Op::Login("access-2"),
        Op::Update("King"),
    ];
    for op in ops {
        match op {
            Op::Login(token) => session.login(sample_user(), BackendTokens::new(token, "refresh")),
            Op::Logout => session.logout(),
            Op::Update(last_name) => {
                session.update_user(UserPatch { last_name: Some(last_name.to_owned()), ..UserPatch::default() });
            }
        }
        assert!(holds_invariant(&session.snapshot()));
    }
    assert_eq!(session.snapshot().user().unwrap().last_name, "King");
    assert_eq!(session.access_token().as_deref(), Some("access-2"));
}
