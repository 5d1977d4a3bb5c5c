//! Sign-in call, form validation and the post-login transition.
//!
//! SYSTEM CONTEXT
//! ==============
//! The sign-in page validates the form with [`validate_sign_in`], calls an
//! [`AuthApi`] (mock or HTTP, chosen by [`AuthMode`]) and hands the result to
//! [`complete_sign_in`], which logs in and leaves the sign-in page.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AuthMode;
use crate::navigation::{NavigationRequest, Navigator, return_path};
use crate::store::SessionService;
use crate::transport::{HttpError, Method, Transport};
use crate::types::{BackendTokens, User};

pub const SIGN_IN_ENDPOINT: &str = "/auth/login";
/// Header identifying this front end to the auth service.
pub const APP_HEADER: &str = "app";
pub const DEFAULT_APP_ID: &str = "admin-console";

pub const EMAIL_MESSAGE: &str = "Enter your email.";
pub const PASSWORD_MESSAGE: &str = "Enter your password.";
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SignInBody {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignInBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInBody").field("email", &self.email).field("password", &"<redacted>").finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateResponse {
    pub user: User,
    pub backend_tokens: BackendTokens,
}

/// Per-field validation messages; `None` means the field is fine.
#[derive(Clone, Debug, Default, PartialEq, Eq, thiserror::Error)]
#[error("sign-in form is invalid")]
pub struct SignInFormError {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

/// Trim and check the sign-in form.
///
/// # Errors
///
/// Returns [`SignInFormError`] naming every invalid field.
pub fn validate_sign_in(email: &str, password: &str) -> Result<SignInBody, SignInFormError> {
    let email = email.trim();
    let errors = SignInFormError {
        email: (!looks_like_email(email)).then_some(EMAIL_MESSAGE),
        password: (password.chars().count() < MIN_PASSWORD_LEN).then_some(PASSWORD_MESSAGE),
    };
    if errors.email.is_some() || errors.password.is_some() {
        return Err(errors);
    }
    Ok(SignInBody { email: email.to_owned(), password: password.to_owned() })
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !value.contains(char::is_whitespace)
        && !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

/// The consumed authentication call.
#[async_trait(?Send)]
pub trait AuthApi {
    /// # Errors
    ///
    /// Returns the transport error of the underlying call.
    async fn sign_in(&self, body: &SignInBody) -> Result<AuthenticateResponse, HttpError>;
}

/// Accepts any credentials and returns a fixed admin user.
#[derive(Clone, Copy, Debug, Default)]
pub struct MockAuthApi;

impl MockAuthApi {
    #[must_use]
    pub fn response() -> AuthenticateResponse {
        AuthenticateResponse {
            user: User {
                id: "123".to_owned(),
                first_name: "Test".to_owned(),
                last_name: "User".to_owned(),
                email: "test@test.com".to_owned(),
                role: "admin".to_owned(),
            },
            backend_tokens: BackendTokens::new("fakeAccessToken123", "fakeRefreshToken123"),
        }
    }
}

#[async_trait(?Send)]
impl AuthApi for MockAuthApi {
    async fn sign_in(&self, body: &SignInBody) -> Result<AuthenticateResponse, HttpError> {
        log::debug!("mock sign-in for {}", body.email);
        Ok(Self::response())
    }
}

/// `POST /auth/login` on the public transport.
#[derive(Clone, Debug)]
pub struct HttpAuthApi {
    transport: Transport,
    app_id: String,
}

impl HttpAuthApi {
    pub fn new(transport: Transport, app_id: impl Into<String>) -> Self {
        Self { transport, app_id: app_id.into() }
    }
}

#[async_trait(?Send)]
impl AuthApi for HttpAuthApi {
    async fn sign_in(&self, body: &SignInBody) -> Result<AuthenticateResponse, HttpError> {
        let mut request = self.transport.build(Method::Post, SIGN_IN_ENDPOINT)?;
        request.set_header(APP_HEADER, self.app_id.as_str());
        request.set_json_body(body)?;
        self.transport.send_json(request).await
    }
}

/// Either implementation behind one type, picked from configuration.
#[derive(Clone, Debug)]
pub enum ConfiguredAuthApi {
    Mock(MockAuthApi),
    Http(HttpAuthApi),
}

impl ConfiguredAuthApi {
    /// `public` is only used in [`AuthMode::Http`].
    #[must_use]
    pub fn for_mode(mode: AuthMode, public: &Transport) -> Self {
        match mode {
            AuthMode::Mock => Self::Mock(MockAuthApi),
            AuthMode::Http => Self::Http(HttpAuthApi::new(public.clone(), DEFAULT_APP_ID)),
        }
    }
}

#[async_trait(?Send)]
impl AuthApi for ConfiguredAuthApi {
    async fn sign_in(&self, body: &SignInBody) -> Result<AuthenticateResponse, HttpError> {
        match self {
            Self::Mock(api) => api.sign_in(body).await,
            Self::Http(api) => api.sign_in(body).await,
        }
    }
}

/// Log in with `response` and leave the sign-in page, replacing it in history.
pub fn complete_sign_in<S, N>(session: &S, navigator: &N, response: AuthenticateResponse, from: Option<&str>)
where
    S: SessionService + ?Sized,
    N: Navigator + ?Sized,
{
    let AuthenticateResponse { user, backend_tokens } = response;
    log::info!("signed in as {}", user.email);
    session.login(user, backend_tokens);
    navigator.navigate(NavigationRequest::replace(return_path(from)));
}

/// Call `api` and, on success, complete the sign-in. On failure the session is
/// untouched; notification is left to the transport hooks.
///
/// # Errors
///
/// Returns the error from [`AuthApi::sign_in`].
pub async fn sign_in<A, S, N>(
    api: &A,
    session: &S,
    navigator: &N,
    body: &SignInBody,
    from: Option<&str>,
) -> Result<(), HttpError>
where
    A: AuthApi + ?Sized,
    S: SessionService + ?Sized,
    N: Navigator + ?Sized,
{
    let response = api.sign_in(body).await?;
    complete_sign_in(session, navigator, response, from);
    Ok(())
}
