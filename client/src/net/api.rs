//! HTTP plumbing for the API behind the console.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): the backend fails every call with a network error,
//! since these endpoints are only meaningful in the browser.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`Transports`] holds the public and protected transports (both on the
//! configured API base URL) plus the configured sign-in API. Layouts install
//! their hooks on these instances; pages call through them.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is an [`HttpError`] so the transport hooks see it before the
//! caller does. Bodies that are not JSON are kept as a JSON string.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use async_trait::async_trait;
use leptos::prelude::*;
use session::auth::ConfiguredAuthApi;
use session::transport::{HttpBackend, HttpRequest, HttpResponse};
use session::{Config, HttpError, Transport};

/// [`HttpBackend`] over the browser fetch API.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooBackend;

#[async_trait(?Send)]
impl HttpBackend for GlooBackend {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::RequestBuilder;

            let mut builder = RequestBuilder::new(&request.url)
                .method(gloo_method(request.method))
                .credentials(web_sys::RequestCredentials::Omit);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let built = match &request.body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| HttpError::Network(e.to_string()))?;

            let resp = built.send().await.map_err(|e| HttpError::Network(e.to_string()))?;
            let status = resp.status();
            let text = resp.text().await.map_err(|e| HttpError::Decode(e.to_string()))?;
            Ok(HttpResponse { status, body: parse_body(&text) })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(HttpError::Network(format!("{} {} is not available on server", request.method.as_str(), request.url)))
        }
    }
}

#[cfg(feature = "hydrate")]
fn gloo_method(method: session::transport::Method) -> gloo_net::http::Method {
    use session::transport::Method;
    match method {
        Method::Get => gloo_net::http::Method::GET,
        Method::Post => gloo_net::http::Method::POST,
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn parse_body(text: &str) -> serde_json::Value {
    if text.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_owned()))
}

/// The app's transports and sign-in API, shared through context.
#[derive(Clone, Debug)]
pub struct Transports {
    pub public: Transport,
    pub protected: Transport,
    pub auth: ConfiguredAuthApi,
}

impl Transports {
    pub fn new(config: &Config) -> Self {
        let backend = Arc::new(GlooBackend);
        let public = Transport::public(config, backend.clone());
        let protected = Transport::protected(config, backend);
        let auth = ConfiguredAuthApi::for_mode(config.auth_mode, &public);
        Self { public, protected, auth }
    }
}

pub fn provide_transports(config: &Config) -> Transports {
    let transports = Transports::new(config);
    provide_context(transports.clone());
    transports
}

pub fn use_transports() -> Transports {
    expect_context::<Transports>()
}
