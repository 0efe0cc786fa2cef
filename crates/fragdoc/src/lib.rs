//! fragdoc — native client for a document retrieval-augmented-query service
//!
//! A user signs in against an OAuth2/OIDC identity provider, uploads
//! documents (or audio recordings) tagged with an access level, and asks
//! natural-language questions against the backend search endpoint.
//!
//! The [`SessionController`] owns the authentication state and mediates the
//! upload and query operations; the concrete login flow is injected as an
//! [`AuthStrategy`], so the controller never touches a global identity
//! client and tests can substitute a fake provider.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod session;

pub use api::ApiClient;
pub use auth::{strategy_for, AuthStrategy, Credential, Session};
pub use config::{AuthConfig, AuthFlow, ClientConfig};
pub use error::{ClientError, ClientResult};
pub use session::SessionController;
