//! Client configuration
//!
//! All settings are supplied through `FRAGDOC_*` environment variables so
//! the same binary can run against different deployments without rebuilds.
//! Nothing about the identity provider or the backend base URL is hardcoded.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Prefix for all environment variables read by [`ClientConfig::from_env`]
pub const ENV_PREFIX: &str = "FRAGDOC_";

fn env_key(key: &str) -> String {
    format!("{}{}", ENV_PREFIX, key)
}

fn get_env(key: &str) -> Option<String> {
    std::env::var(env_key(key)).ok()
}

/// Which interactive login flow to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthFlow {
    /// Authorization code + PKCE through the system browser with a
    /// loopback redirect listener
    #[default]
    Browser,
    /// OAuth2 device-authorization grant (verification URI + user code)
    Device,
}

impl FromStr for AuthFlow {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "browser" => Ok(AuthFlow::Browser),
            "device" => Ok(AuthFlow::Device),
            other => Err(ClientError::InvalidConfig(format!(
                "unknown auth flow: {} (expected 'browser' or 'device')",
                other
            ))),
        }
    }
}

/// Identity-provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// OAuth2 client identifier registered with the provider
    #[serde(default)]
    pub client_id: String,

    /// Authorization endpoint URL
    #[serde(default)]
    pub auth_url: String,

    /// Token endpoint URL
    #[serde(default)]
    pub token_url: String,

    /// Device-authorization endpoint URL (device flow only)
    #[serde(default)]
    pub device_auth_url: String,

    /// Scopes requested at login
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,

    /// Which interactive flow to run
    #[serde(default)]
    pub flow: AuthFlow,

    /// Loopback port for the browser-flow redirect (0 = ephemeral)
    #[serde(default)]
    pub redirect_port: u16,
}

fn default_scopes() -> Vec<String> {
    vec!["openid".to_string(), "profile".to_string(), "email".to_string()]
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            auth_url: String::new(),
            token_url: String::new(),
            device_auth_url: String::new(),
            scopes: default_scopes(),
            flow: AuthFlow::default(),
            redirect_port: 0,
        }
    }
}

/// Top-level client configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL. Empty means same-origin behind a reverse proxy;
    /// the CLI requires a concrete URL.
    #[serde(default)]
    pub api_base: String,

    /// Identity-provider settings
    #[serde(default)]
    pub auth: AuthConfig,
}

impl ClientConfig {
    /// Load the configuration from `FRAGDOC_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(v) = get_env("API_BASE") {
            config.api_base = v;
        }
        if let Some(v) = get_env("OIDC_CLIENT_ID") {
            config.auth.client_id = v;
        }
        if let Some(v) = get_env("OIDC_AUTH_URL") {
            config.auth.auth_url = v;
        }
        if let Some(v) = get_env("OIDC_TOKEN_URL") {
            config.auth.token_url = v;
        }
        if let Some(v) = get_env("OIDC_DEVICE_AUTH_URL") {
            config.auth.device_auth_url = v;
        }
        if let Some(v) = get_env("OIDC_SCOPES") {
            config.auth.scopes = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(v) = get_env("AUTH_FLOW") {
            config.auth.flow = v.parse()?;
        }
        if let Some(v) = get_env("REDIRECT_PORT") {
            config.auth.redirect_port = v
                .parse()
                .map_err(|_| ClientError::InvalidConfig(format!("invalid redirect port: {}", v)))?;
        }

        Ok(config)
    }
}
