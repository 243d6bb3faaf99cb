//! Client configuration.
//!
//! `PartialConfig` is what callers hand in; `ClientConfig` is what the
//! client keeps. Resolution is a field-by-field merge over the defaults.
//! Unknown keys in JSON input are ignored so newer settings never break
//! older clients.

use std::fmt;

use serde::Deserialize;

use crate::error::{ClientError, Result};

pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_LOCALE: &str = "en_US";

/// Immutable configuration held by a `Client`.
///
/// `Debug` output redacts the three tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub access_token: Option<String>,
    pub server_token: Option<String>,
    pub use_sandbox: bool,
    pub api_version: String,
    pub locale: String,
    pub app_token: Option<String>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("access_token", &redact(&self.access_token))
            .field("server_token", &redact(&self.server_token))
            .field("use_sandbox", &self.use_sandbox)
            .field("api_version", &self.api_version)
            .field("locale", &self.locale)
            .field("app_token", &redact(&self.app_token))
            .finish()
    }
}

fn redact(token: &Option<String>) -> Option<&'static str> {
    token.as_ref().map(|_| "<redacted>")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            server_token: None,
            use_sandbox: false,
            api_version: DEFAULT_API_VERSION.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            app_token: None,
        }
    }
}

/// User-supplied settings; any subset of the recognized keys.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialConfig {
    #[serde(default, alias = "accessToken")]
    pub access_token: Option<String>,
    #[serde(default, alias = "serverToken")]
    pub server_token: Option<String>,
    #[serde(default, alias = "useSandbox")]
    pub use_sandbox: Option<bool>,
    #[serde(default, alias = "version", alias = "apiVersion")]
    pub api_version: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default, alias = "appToken")]
    pub app_token: Option<String>,
}

impl ClientConfig {
    /// Merge `input` over the defaults.
    pub fn resolve(input: PartialConfig) -> Self {
        let defaults = Self::default();
        Self {
            access_token: input.access_token.or(defaults.access_token),
            server_token: input.server_token.or(defaults.server_token),
            use_sandbox: input.use_sandbox.unwrap_or(defaults.use_sandbox),
            api_version: input.api_version.unwrap_or(defaults.api_version),
            locale: input.locale.unwrap_or(defaults.locale),
            app_token: input.app_token.or(defaults.app_token),
        }
    }

    /// Resolve a configuration from a JSON object.
    ///
    /// Unknown keys are dropped. A recognized key holding the wrong type is
    /// an `InvalidConfig` error.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let partial: PartialConfig =
            serde_json::from_value(value).map_err(ClientError::InvalidConfig)?;
        Ok(Self::resolve(partial))
    }
}
