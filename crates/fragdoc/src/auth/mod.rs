//! Authentication strategies and session state
//!
//! The interactive login flow is modeled as a capability: anything that can
//! produce a bearer [`Credential`] implements [`AuthStrategy`]. The two
//! shipped strategies cover the browser authorization-code+PKCE flow and
//! the device-authorization flow; tests inject fakes.

use std::fmt;

use async_trait::async_trait;

use crate::config::{AuthConfig, AuthFlow};
use crate::error::ClientResult;

pub mod browser;
pub mod device;

pub use browser::BrowserAuth;
pub use device::DeviceCodeAuth;

/// Opaque bearer token proving authenticated identity
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: String) -> Self {
        Self(token)
    }

    /// The raw token, for the Authorization header
    pub fn secret(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Keep the token out of logs and debug output.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Per-run authentication state
///
/// Not persisted across runs; the credential is re-acquired each time.
/// Token expiry is not modeled — an expired credential simply makes
/// subsequent requests fail at the backend.
#[derive(Debug, Default)]
pub struct Session {
    authenticated: bool,
    credential: Option<Credential>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// Transition to Authenticated with the given credential.
    pub fn authenticate(&mut self, credential: Credential) {
        self.authenticated = true;
        self.credential = Some(credential);
    }
}

/// Capability: run an interactive login and yield a bearer credential
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    async fn login(&self) -> ClientResult<Credential>;
}

/// Construct the strategy selected by configuration.
pub fn strategy_for(config: &AuthConfig) -> Box<dyn AuthStrategy> {
    match config.flow {
        AuthFlow::Browser => Box::new(BrowserAuth::new(config.clone())),
        AuthFlow::Device => Box::new(DeviceCodeAuth::new(config.clone())),
    }
}
