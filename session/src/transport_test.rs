use std::sync::atomic::{AtomicUsize, Ordering};

use futures::executor::block_on;

use super::*;
use crate::test_support::{ScriptedBackend, sample_config};

fn transport(backend: &ScriptedBackend) -> Transport {
    Transport::protected(&sample_config(), Arc::new(backend.clone()))
}

// =============================================================
// URL resolution
// =============================================================

#[test]
fn resolve_joins_base_path_and_relative_path() {
    let backend = ScriptedBackend::default();
    let t = transport(&backend);
    assert_eq!(t.resolve("/users").unwrap(), "https://api.example.com/v1/users");
    assert_eq!(t.resolve("users/7").unwrap(), "https://api.example.com/v1/users/7");
}

#[test]
fn resolve_passes_absolute_urls_through() {
    let backend = ScriptedBackend::default();
    let t = transport(&backend);
    assert_eq!(t.resolve("https://other.example.com/x").unwrap(), "https://other.example.com/x");
}

// =============================================================
// Instances
// =============================================================

#[test]
fn protected_transport_sends_json_content_type() {
    let backend = ScriptedBackend::default();
    let request = transport(&backend).build(Method::Get, "/me").unwrap();
    assert_eq!(request.header("content-type"), Some("application/json"));
}

#[test]
fn public_transport_has_no_default_headers() {
    let backend = ScriptedBackend::default();
    let request = Transport::public(&sample_config(), Arc::new(backend)).build(Method::Get, "/me").unwrap();
    assert!(request.headers.is_empty());
}

#[test]
fn set_header_replaces_case_insensitively() {
    let backend = ScriptedBackend::default();
    let mut request = transport(&backend).build(Method::Get, "/me").unwrap();
    request.set_header("content-type", "text/plain");
    assert_eq!(request.headers.len(), 1);
    assert_eq!(request.header(CONTENT_TYPE), Some("text/plain"));
}

// =============================================================
// Hooks
// =============================================================

#[test]
fn request_hooks_see_every_outgoing_request() {
    let backend = ScriptedBackend::default();
    let t = transport(&backend);
    let _handle = t.interceptors().on_request(|req| req.set_header("X-Trace", "1"));

    block_on(t.send(t.build(Method::Get, "/a").unwrap())).unwrap();
    block_on(t.send(t.build(Method::Get, "/b").unwrap())).unwrap();

    let seen = backend.requests();
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().all(|req| req.header("x-trace") == Some("1")));
}

#[test]
fn dropping_handle_unregisters_hook() {
    let backend = ScriptedBackend::default();
    let t = transport(&backend);
    let handle = t.interceptors().on_request(|req| req.set_header("X-Trace", "1"));
    assert_eq!(t.interceptors().request_hook_count(), 1);

    handle.eject();
    assert_eq!(t.interceptors().request_hook_count(), 0);

    block_on(t.send(t.build(Method::Get, "/a").unwrap())).unwrap();
    assert_eq!(backend.requests()[0].header("x-trace"), None);
}

#[test]
fn handles_get_distinct_ids() {
    let backend = ScriptedBackend::default();
    let t = transport(&backend);
    let a = t.interceptors().on_request(|_| {});
    let b = t.interceptors().on_error(|_| {});
    assert_ne!(a.id(), b.id());
}

#[test]
fn handle_outliving_transport_drops_quietly() {
    let backend = ScriptedBackend::default();
    let handle = transport(&backend).interceptors().on_error(|_| {});
    drop(handle);
}

#[test]
fn error_status_becomes_status_error_with_body() {
    let backend = ScriptedBackend::default();
    backend.respond(422, serde_json::json!({ "message": "Invalid email" }));
    let t = transport(&backend);

    let err = block_on(t.send(t.build(Method::Post, "/users").unwrap())).unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.message(), Some("Invalid email"));
}

#[test]
fn error_hooks_run_then_error_propagates() {
    let backend = ScriptedBackend::default();
    backend.respond(500, serde_json::json!({}));
    let t = transport(&backend);
    let calls = Arc::new(AtomicUsize::new(0));
    let _handle = {
        let calls = Arc::clone(&calls);
        t.interceptors().on_error(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };

    let result = block_on(t.send(t.build(Method::Get, "/boom").unwrap()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(result.unwrap_err().status(), Some(500));
}

#[test]
fn success_does_not_run_error_hooks() {
    let backend = ScriptedBackend::default();
    backend.respond(200, serde_json::json!({ "ok": true }));
    let t = transport(&backend);
    let calls = Arc::new(AtomicUsize::new(0));
    let _handle = {
        let calls = Arc::clone(&calls);
        t.interceptors().on_error(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };

    let body: serde_json::Value = block_on(t.send_json(t.build(Method::Get, "/ok").unwrap())).unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn network_errors_reach_hooks_without_status() {
    let backend = ScriptedBackend::default();
    backend.fail(HttpError::Network("offline".to_owned()));
    let t = transport(&backend);
    let statuses = Arc::new(Mutex::new(Vec::new()));
    let _handle = {
        let statuses = Arc::clone(&statuses);
        t.interceptors().on_error(move |e| statuses.lock().unwrap().push(e.status()))
    };

    let err = block_on(t.send(t.build(Method::Get, "/x").unwrap())).unwrap_err();
    assert_eq!(err, HttpError::Network("offline".to_owned()));
    assert_eq!(*statuses.lock().unwrap(), vec![None]);
}

#[test]
fn hook_dropped_before_resolution_does_not_fire() {
    let backend = ScriptedBackend::default();
    backend.respond(404, serde_json::json!({}));
    let t = transport(&backend);
    let calls = Arc::new(AtomicUsize::new(0));
    let handle = {
        let calls = Arc::clone(&calls);
        t.interceptors().on_error(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };
    let pending = t.send(t.build(Method::Get, "/late").unwrap());
    drop(handle);

    assert!(block_on(pending).is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn json_body_is_sent_and_reply_decoded() {
    let backend = ScriptedBackend::default();
    backend.respond(201, serde_json::json!({ "id": "n1" }));
    let t = transport(&backend);

    let mut request = t.build(Method::Post, "/notes").unwrap();
    request.set_json_body(&serde_json::json!({ "text": "hi" })).unwrap();
    let created: serde_json::Value = block_on(t.send_json(request)).unwrap();
    assert_eq!(created["id"], "n1");
    let sent = &backend.requests()[0];
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.body, Some(serde_json::json!({ "text": "hi" })));
}

#[test]
fn decode_failure_is_reported() {
    let backend = ScriptedBackend::default();
    backend.respond(200, serde_json::json!("not an object"));
    let t = transport(&backend);

    #[derive(Debug, serde::Deserialize)]
    struct Shape {
        #[allow(dead_code)]
        id: String,
    }
    let err = block_on(t.send_json::<Shape>(t.build(Method::Get, "/shape").unwrap())).unwrap_err();
    assert!(matches!(err, HttpError::Decode(_)));
}
