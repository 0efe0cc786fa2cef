//! Device-authorization login (RFC 8628)
//!
//! For terminals without a usable browser: the provider hands out a user
//! code, the user enters it on a second device, and the client polls the
//! token endpoint until the grant completes.

use async_trait::async_trait;
use oauth2::basic::BasicClient;
use oauth2::{
    ClientId, DeviceAuthorizationUrl, Scope, StandardDeviceAuthorizationResponse, TokenResponse,
    TokenUrl,
};

use crate::config::AuthConfig;
use crate::error::{ClientError, ClientResult};

use super::{AuthStrategy, Credential};

/// OAuth2 device-authorization grant
pub struct DeviceCodeAuth {
    config: AuthConfig,
}

impl DeviceCodeAuth {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl AuthStrategy for DeviceCodeAuth {
    async fn login(&self) -> ClientResult<Credential> {
        let client = BasicClient::new(ClientId::new(self.config.client_id.clone()))
            .set_device_authorization_url(DeviceAuthorizationUrl::new(
                self.config.device_auth_url.clone(),
            )?)
            .set_token_uri(TokenUrl::new(self.config.token_url.clone())?);

        let http = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let mut request = client.exchange_device_code();
        for scope in &self.config.scopes {
            request = request.add_scope(Scope::new(scope.clone()));
        }
        let details: StandardDeviceAuthorizationResponse = request
            .request_async(&http)
            .await
            .map_err(|e| ClientError::AuthFailed(e.to_string()))?;

        // Interactive prompt belongs on stderr so piped output stays clean.
        eprintln!(
            "Zum Anmelden {} öffnen und Code {} eingeben",
            details.verification_uri().as_str(),
            details.user_code().secret()
        );

        let token = client
            .exchange_device_access_token(&details)
            .request_async(&http, tokio::time::sleep, None)
            .await
            .map_err(|e| ClientError::AuthFailed(e.to_string()))?;

        Ok(Credential::new(token.access_token().secret().clone()))
    }
}
