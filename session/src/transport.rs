//! HTTP transport with per-instance request/error interceptors.
//!
//! SYSTEM CONTEXT
//! ==============
//! The app talks to the API through two [`Transport`] instances: a public one
//! for sign-in (base URL only) and a protected one that layouts decorate with
//! bearer-token and 401 handling. The actual HTTP call is delegated to an
//! [`HttpBackend`] (`gloo-net` in the browser, scripted in tests).
//!
//! DESIGN
//! ======
//! Hooks live in a shared registry and are registered through handles that
//! unregister on drop, so a layout's hooks cannot outlive it. The registry
//! lock is released before any hook runs; hooks may log out, navigate or
//! register other hooks without deadlocking.
//!
//! ERROR HANDLING
//! ==============
//! Responses with status >= 400 become [`HttpError::Status`]. Every error runs
//! the error hooks registered at resolution time and is then returned to the
//! caller unchanged; hooks never swallow it.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::types::ApiErrorBody;

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Outgoing request after base-URL resolution, before hooks run.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    /// Header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Set a header, replacing any existing value under the same name.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
        self.headers.insert(name.to_owned(), value.into());
    }

    /// # Errors
    ///
    /// [`HttpError::Decode`] when `body` does not serialize to JSON.
    pub fn set_json_body<B: Serialize + ?Sized>(&mut self, body: &B) -> Result<(), HttpError> {
        self.body = Some(serde_json::to_value(body).map_err(|e| HttpError::Decode(e.to_string()))?);
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum HttpError {
    /// The server answered with status >= 400.
    #[error("request failed with status {status}")]
    Status { status: u16, body: Option<ApiErrorBody> },
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("invalid request url `{0}`")]
    InvalidUrl(String),
}

impl HttpError {
    /// Response status, for errors that got one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `message` from the error body, if the server sent one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Status { body: Some(body), .. } => body.message.as_deref(),
            _ => None,
        }
    }
}

/// Executes one HTTP exchange. Futures are not `Send`; browser fetch is
/// single-threaded.
#[async_trait(?Send)]
pub trait HttpBackend {
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] when no response was received and
    /// [`HttpError::Decode`] when the body could not be read.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

type RequestHook = Arc<dyn Fn(&mut HttpRequest) + Send + Sync>;
type ErrorHook = Arc<dyn Fn(&HttpError) + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HookKind {
    Request,
    Error,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    request: Vec<(u64, RequestHook)>,
    error: Vec<(u64, ErrorHook)>,
}

impl Registry {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Hook registry of one transport instance. Clones share the registry.
#[derive(Clone, Default)]
pub struct Interceptors {
    registry: Arc<Mutex<Registry>>,
}

impl Interceptors {
    fn lock(&self) -> std::sync::MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `hook` on every outgoing request until the handle is dropped.
    pub fn on_request(&self, hook: impl Fn(&mut HttpRequest) + Send + Sync + 'static) -> InterceptorHandle {
        let mut registry = self.lock();
        let id = registry.allocate_id();
        registry.request.push((id, Arc::new(hook)));
        self.handle(id, HookKind::Request)
    }

    /// Run `hook` on every failed exchange until the handle is dropped.
    pub fn on_error(&self, hook: impl Fn(&HttpError) + Send + Sync + 'static) -> InterceptorHandle {
        let mut registry = self.lock();
        let id = registry.allocate_id();
        registry.error.push((id, Arc::new(hook)));
        self.handle(id, HookKind::Error)
    }

    fn handle(&self, id: u64, kind: HookKind) -> InterceptorHandle {
        InterceptorHandle { registry: Arc::downgrade(&self.registry), id, kind }
    }

    #[must_use]
    pub fn request_hook_count(&self) -> usize {
        self.lock().request.len()
    }

    #[must_use]
    pub fn response_hook_count(&self) -> usize {
        self.lock().error.len()
    }

    fn apply_request(&self, request: &mut HttpRequest) {
        let hooks: Vec<RequestHook> = self.lock().request.iter().map(|(_, hook)| Arc::clone(hook)).collect();
        for hook in hooks {
            hook(request);
        }
    }

    fn notify_error(&self, error: &HttpError) {
        let hooks: Vec<ErrorHook> = self.lock().error.iter().map(|(_, hook)| Arc::clone(hook)).collect();
        for hook in hooks {
            hook(error);
        }
    }
}

impl fmt::Debug for Interceptors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interceptors")
            .field("request", &self.request_hook_count())
            .field("error", &self.response_hook_count())
            .finish()
    }
}

/// Registration of one hook. Dropping (or [`eject`](Self::eject)ing) it
/// unregisters the hook; since `eject` consumes the handle, disposal happens
/// exactly once.
#[must_use = "dropping the handle unregisters the hook immediately"]
#[derive(Debug)]
pub struct InterceptorHandle {
    registry: Weak<Mutex<Registry>>,
    id: u64,
    kind: HookKind,
}

impl InterceptorHandle {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn eject(self) {}
}

impl Drop for InterceptorHandle {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
        match self.kind {
            HookKind::Request => registry.request.retain(|(id, _)| *id != self.id),
            HookKind::Error => registry.error.retain(|(id, _)| *id != self.id),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("next_id", &self.next_id).finish_non_exhaustive()
    }
}

/// One logical HTTP client: base URL, default headers and its own hooks.
#[derive(Clone)]
pub struct Transport {
    base_url: Url,
    default_headers: BTreeMap<String, String>,
    interceptors: Interceptors,
    backend: Arc<dyn HttpBackend + Send + Sync>,
}

impl Transport {
    pub fn new(base_url: Url, backend: Arc<dyn HttpBackend + Send + Sync>) -> Self {
        Self { base_url, default_headers: BTreeMap::new(), interceptors: Interceptors::default(), backend }
    }

    /// Client for unauthenticated calls such as sign-in.
    pub fn public(config: &Config, backend: Arc<dyn HttpBackend + Send + Sync>) -> Self {
        Self::new(config.api_url.clone(), backend)
    }

    /// Client for bearer-authenticated JSON calls. Credentials (cookies) are
    /// never sent implicitly; the token comes from the request hook.
    pub fn protected(config: &Config, backend: Arc<dyn HttpBackend + Send + Sync>) -> Self {
        Self::new(config.api_url.clone(), backend).with_default_header(CONTENT_TYPE, "application/json")
    }

    #[must_use]
    pub fn with_default_header(mut self, name: &str, value: &str) -> Self {
        self.default_headers.insert(name.to_owned(), value.to_owned());
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn interceptors(&self) -> &Interceptors {
        &self.interceptors
    }

    /// Resolve `path` against the base URL. Absolute URLs pass through.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] if the result is not a valid URL.
    pub fn resolve(&self, path: &str) -> Result<String, HttpError> {
        let joined = if Url::parse(path).is_ok() {
            path.to_owned()
        } else {
            format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path.trim_start_matches('/'))
        };
        Url::parse(&joined).map(String::from).map_err(|_| HttpError::InvalidUrl(joined))
    }

    /// Request for `path` carrying the default headers.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] if `path` does not resolve.
    pub fn build(&self, method: Method, path: &str) -> Result<HttpRequest, HttpError> {
        Ok(HttpRequest { method, url: self.resolve(path)?, headers: self.default_headers.clone(), body: None })
    }

    /// Run request hooks, execute, then run error hooks on failure.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Status`] for status >= 400 and the backend's error
    /// otherwise, after the error hooks have seen it.
    pub async fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.interceptors.apply_request(&mut request);
        log::debug!("{} {}", request.method.as_str(), request.url);

        let outcome = match self.backend.execute(request).await {
            Ok(response) if response.status >= 400 => Err(HttpError::Status {
                status: response.status,
                body: serde_json::from_value(response.body).ok(),
            }),
            other => other,
        };
        if let Err(e) = &outcome {
            self.interceptors.notify_error(e);
        }
        outcome
    }

    /// [`Transport::send`] with the response body decoded into `T`.
    ///
    /// # Errors
    ///
    /// See [`Transport::send`]; also [`HttpError::Decode`] for an unexpected body.
    pub async fn send_json<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, HttpError> {
        let response = self.send(request).await?;
        serde_json::from_value(response.body).map_err(|e| HttpError::Decode(e.to_string()))
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url.as_str())
            .field("default_headers", &self.default_headers)
            .field("interceptors", &self.interceptors)
            .finish_non_exhaustive()
    }
}

