//! Fixtures and a scripted HTTP backend for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::{AuthMode, Config};
use crate::transport::{HttpBackend, HttpError, HttpRequest, HttpResponse};
use crate::types::{BackendTokens, User};

pub fn sample_user() -> User {
    User {
        id: "u1".to_owned(),
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        email: "ada@example.com".to_owned(),
        role: "admin".to_owned(),
    }
}

pub fn sample_tokens() -> BackendTokens {
    BackendTokens::new("access-1", "refresh-1")
}

pub fn sample_config() -> Config {
    Config { api_url: "https://api.example.com/v1".parse().unwrap(), auth_mode: AuthMode::Mock }
}

/// Backend that replays queued outcomes and records every request it saw.
#[derive(Clone, Default)]
pub struct ScriptedBackend {
    outcomes: Arc<Mutex<VecDeque<Result<HttpResponse, HttpError>>>>,
    seen: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedBackend {
    pub fn respond(&self, status: u16, body: serde_json::Value) -> &Self {
        self.outcomes.lock().unwrap().push_back(Ok(HttpResponse { status, body }));
        self
    }

    pub fn fail(&self, error: HttpError) -> &Self {
        self.outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait(?Send)]
impl HttpBackend for ScriptedBackend {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.seen.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse { status: 200, body: serde_json::Value::Null }))
    }
}
