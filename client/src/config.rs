//! Build-time configuration for the browser bundle.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM bundle has no process environment, so `API_URL` and `AUTH_MODE`
//! are captured when the crate is compiled. The server validates the same
//! variables at startup; a bundle built without them renders a configuration
//! error instead of the app.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use session::{Config, ConfigError};

/// Configuration captured from the build environment.
///
/// # Errors
///
/// Returns [`ConfigError`] when `API_URL` was unset or invalid at build time.
pub fn app_config() -> Result<Config, ConfigError> {
    Config::parse(option_env!("API_URL"), option_env!("AUTH_MODE"))
}

/// User-facing text for a configuration failure.
pub fn describe_config_error(error: &ConfigError) -> String {
    match error {
        ConfigError::Missing { var } => format!("{var} was not set when this bundle was built."),
        ConfigError::InvalidUrl { var, reason } => format!("{var} is not a valid base URL: {reason}."),
        ConfigError::InvalidAuthMode { var, value } => format!("{var} must be `mock` or `http`, got `{value}`."),
    }
}
