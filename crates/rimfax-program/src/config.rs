//! API access configuration.
//!
//! Remote execution needs an access token and an endpoint URL. Both come
//! from the environment, with a `.env` file read first if one exists next
//! to the working directory. The local simulators need neither; the token
//! check only fires when configuration is actually loaded.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ProgramError, ProgramResult};

/// Default API endpoint.
pub const DEFAULT_API_URL: &str = "https://quantumexperience.ng.bluemix.net/api";

/// Access credentials for the remote API.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// The access token.
    pub token: String,
    /// Base URL of the API.
    pub url: String,
}

impl ApiConfig {
    /// Load configuration, reading a `.env` file first if present.
    ///
    /// Fails with [`ProgramError::MissingToken`] when `RIMFAX_API_TOKEN`
    /// is unset or blank.
    pub fn load() -> ProgramResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Read `RIMFAX_API_TOKEN` and `RIMFAX_API_URL` from the process
    /// environment. The URL falls back to [`DEFAULT_API_URL`].
    pub fn from_env() -> ProgramResult<Self> {
        let token = std::env::var("RIMFAX_API_TOKEN").unwrap_or_default();
        if token.trim().is_empty() {
            return Err(ProgramError::MissingToken);
        }
        let url =
            std::env::var("RIMFAX_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Ok(Self { token, url })
    }

    /// Create a configuration from explicit values.
    pub fn new(token: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            url: url.into(),
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("token", &"[REDACTED]")
            .field("url", &self.url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test covers every environment combination so that no two tests
    // race on the same process-wide variables.
    #[test]
    fn test_from_env_guard() {
        unsafe {
            std::env::remove_var("RIMFAX_API_TOKEN");
            std::env::remove_var("RIMFAX_API_URL");
        }
        let err = ApiConfig::from_env().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please set up your access token. See .env.example."
        );

        unsafe { std::env::set_var("RIMFAX_API_TOKEN", "   ") };
        assert!(matches!(
            ApiConfig::from_env(),
            Err(ProgramError::MissingToken)
        ));

        unsafe { std::env::set_var("RIMFAX_API_TOKEN", "QX_TOKEN_123") };
        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.token, "QX_TOKEN_123");
        assert_eq!(config.url, DEFAULT_API_URL);

        unsafe { std::env::set_var("RIMFAX_API_URL", "https://example.test/api") };
        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.url, "https://example.test/api");

        unsafe {
            std::env::remove_var("RIMFAX_API_TOKEN");
            std::env::remove_var("RIMFAX_API_URL");
        }
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ApiConfig::new("very-secret-token", DEFAULT_API_URL);
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("very-secret-token"));
        assert!(rendered.contains("[REDACTED]"));
        assert!(rendered.contains(DEFAULT_API_URL));
    }
}
