//! Logical navigation targets and the navigation sink.
//!
//! SYSTEM CONTEXT
//! ==============
//! Interceptors, guards and the sign-in flow all redirect through a
//! [`Navigator`]; the client backs it with the router, tests record it.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use std::sync::{Arc, Mutex, PoisonError};

use url::Url;

/// Fixed app paths.
pub mod paths {
    pub const ROOT: &str = "/";
    pub const DASHBOARD: &str = "/dashboard";
    pub const SIGN_IN: &str = "/sign-in";
}

/// Query parameter carrying the destination a guard redirect interrupted.
pub const FROM_PARAM: &str = "from";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationRequest {
    pub path: String,
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

impl NavigationRequest {
    pub fn replace(path: impl Into<String>) -> Self {
        Self { path: path.into(), replace: true }
    }
}

pub trait Navigator {
    fn navigate(&self, request: NavigationRequest);
}

/// Sign-in redirect that remembers `from` for after login.
#[must_use]
pub fn sign_in_redirect(from: &str) -> NavigationRequest {
    if from.is_empty() || from == paths::ROOT {
        return NavigationRequest::replace(paths::SIGN_IN);
    }
    let encoded: String = url::form_urlencoded::byte_serialize(from.as_bytes()).collect();
    NavigationRequest::replace(format!("{}?{FROM_PARAM}={encoded}", paths::SIGN_IN))
}

/// Where to land after login: `from` when it is a local path other than the
/// sign-in page, else the dashboard.
#[must_use]
pub fn return_path(from: Option<&str>) -> &str {
    match from {
        Some(path) if is_local_path(path) && !is_sign_in(path) => path,
        _ => paths::DASHBOARD,
    }
}

/// Placeholder origin a candidate path is resolved against.
const LOCAL_ORIGIN: &str = "https://console.invalid/";

/// Browsers drop tab, CR and LF while parsing and read `\` as `/`, so the
/// path is resolved the way they would and must keep the origin.
fn is_local_path(path: &str) -> bool {
    if !path.starts_with('/') || path.chars().any(char::is_control) {
        return false;
    }
    let Ok(base) = Url::parse(LOCAL_ORIGIN) else {
        return false;
    };
    base.join(path).is_ok_and(|resolved| resolved.origin() == base.origin())
}

fn is_sign_in(path: &str) -> bool {
    let bare = path.split(['?', '#']).next().unwrap_or(path);
    bare.trim_end_matches('/') == paths::SIGN_IN
}

/// In-memory history used by tests and the server render pass.
///
/// Models the browser stack: a push appends, a replace overwrites the
/// current entry.
#[derive(Clone, Debug, Default)]
pub struct RecordingNavigator {
    history: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn starting_at(path: impl Into<String>) -> Self {
        Self { history: Arc::new(Mutex::new(vec![path.into()])) }
    }

    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }

    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, request: NavigationRequest) {
        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        if request.replace {
            history.pop();
        }
        history.push(request.path);
    }
}
