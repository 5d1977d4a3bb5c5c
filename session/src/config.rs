//! Application configuration parsed from environment-style settings.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use url::Url;

pub const API_URL_VAR: &str = "API_URL";
pub const AUTH_MODE_VAR: &str = "AUTH_MODE";

/// Which sign-in implementation the app uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    /// Hard-coded success response; no backend call.
    #[default]
    Mock,
    /// `POST /auth/login` on the public transport.
    Http,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Base URL shared by the public and protected transports.
    pub api_url: Url,
    pub auth_mode: AuthMode,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is required")]
    Missing { var: &'static str },
    #[error("{var} must be a valid URL: {reason}")]
    InvalidUrl { var: &'static str, reason: String },
    #[error("unknown {var} `{value}` (expected `mock` or `http`)")]
    InvalidAuthMode { var: &'static str, value: String },
}

impl Config {
    /// Build typed config from raw setting values.
    ///
    /// # Errors
    ///
    /// Returns an error when the API URL is missing, unparseable or cannot
    /// serve as a base for request paths, or when the auth mode is unknown.
    pub fn parse(api_url: Option<&str>, auth_mode: Option<&str>) -> Result<Self, ConfigError> {
        let api_url = parse_api_url(api_url)?;
        let auth_mode = parse_auth_mode(auth_mode)?;
        Ok(Self { api_url, auth_mode })
    }

    /// Build typed config from process environment variables.
    ///
    /// Required:
    /// - `API_URL`: absolute base URL of the API
    ///
    /// Optional:
    /// - `AUTH_MODE`: `mock` (default) or `http`
    ///
    /// # Errors
    ///
    /// See [`Config::parse`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = std::env::var(API_URL_VAR).ok();
        let auth_mode = std::env::var(AUTH_MODE_VAR).ok();
        Self::parse(api_url.as_deref(), auth_mode.as_deref())
    }
}

fn parse_api_url(raw: Option<&str>) -> Result<Url, ConfigError> {
    let raw = raw.map(str::trim).filter(|v| !v.is_empty()).ok_or(ConfigError::Missing { var: API_URL_VAR })?;
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl { var: API_URL_VAR, reason: e.to_string() })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl { var: API_URL_VAR, reason: "cannot be used as a base URL".to_owned() });
    }
    Ok(url)
}

fn parse_auth_mode(raw: Option<&str>) -> Result<AuthMode, ConfigError> {
    match raw.map(str::trim).unwrap_or("mock").to_ascii_lowercase().as_str() {
        "" | "mock" => Ok(AuthMode::Mock),
        "http" => Ok(AuthMode::Http),
        other => Err(ConfigError::InvalidAuthMode { var: AUTH_MODE_VAR, value: other.to_owned() }),
    }
}
