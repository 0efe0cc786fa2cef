//! Browser-based authorization-code login with PKCE
//!
//! Opens the provider's authorization URL in the system browser and
//! receives the authorization code on a loopback listener, per RFC 8252.
//! The listener binds before the browser opens so the redirect can never
//! race it.

use async_trait::async_trait;
use oauth2::basic::BasicClient;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, CsrfToken, PkceCodeChallenge, RedirectUrl, Scope,
    TokenResponse, TokenUrl,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

use crate::config::AuthConfig;
use crate::error::{ClientError, ClientResult};

use super::{AuthStrategy, Credential};

const CALLBACK_PATH: &str = "/callback";

/// Authorization code + PKCE through the system browser
pub struct BrowserAuth {
    config: AuthConfig,
}

impl BrowserAuth {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl AuthStrategy for BrowserAuth {
    async fn login(&self) -> ClientResult<Credential> {
        let listener = TcpListener::bind(("127.0.0.1", self.config.redirect_port)).await?;
        let port = listener.local_addr()?.port();
        let redirect_uri = format!("http://127.0.0.1:{}{}", port, CALLBACK_PATH);

        let client = BasicClient::new(ClientId::new(self.config.client_id.clone()))
            .set_auth_uri(AuthUrl::new(self.config.auth_url.clone())?)
            .set_token_uri(TokenUrl::new(self.config.token_url.clone())?)
            .set_redirect_uri(RedirectUrl::new(redirect_uri)?);

        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let mut authorize = client
            .authorize_url(CsrfToken::new_random)
            .set_pkce_challenge(pkce_challenge);
        for scope in &self.config.scopes {
            authorize = authorize.add_scope(Scope::new(scope.clone()));
        }
        let (auth_url, csrf_state) = authorize.url();

        if webbrowser::open(auth_url.as_str()).is_err() {
            // Headless session: the user can still follow the URL manually.
            tracing::info!("open this URL in a browser to sign in: {}", auth_url);
        }

        let (code, state) = wait_for_callback(&listener).await?;
        if state != *csrf_state.secret() {
            return Err(ClientError::AuthFailed(
                "state mismatch in authorization redirect".to_string(),
            ));
        }

        let http = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        let token = client
            .exchange_code(AuthorizationCode::new(code))
            .set_pkce_verifier(pkce_verifier)
            .request_async(&http)
            .await
            .map_err(|e| ClientError::AuthFailed(e.to_string()))?;

        Ok(Credential::new(token.access_token().secret().clone()))
    }
}

/// Accept a single redirect request and extract `code` and `state`.
///
/// A redirect without a code (e.g. `error=access_denied` after the user
/// backed out of the consent screen) is treated as cancellation.
async fn wait_for_callback(listener: &TcpListener) -> ClientResult<(String, String)> {
    let (mut stream, _) = listener.accept().await?;
    let mut buf = vec![0u8; 8192];
    let n = stream.read(&mut buf).await?;
    let request = String::from_utf8_lossy(&buf[..n]).into_owned();

    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .ok_or_else(|| ClientError::AuthFailed("malformed redirect request".to_string()))?;
    let url = Url::parse(&format!("http://127.0.0.1{}", path))?;

    let mut code = None;
    let mut state = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            _ => {}
        }
    }

    respond(&mut stream, code.is_some()).await?;

    match (code, state) {
        (Some(code), Some(state)) => Ok((code, state)),
        _ => Err(ClientError::AuthCancelled),
    }
}

async fn respond(stream: &mut TcpStream, ok: bool) -> ClientResult<()> {
    let body = if ok {
        "Anmeldung abgeschlossen. Dieses Fenster kann geschlossen werden."
    } else {
        "Anmeldung abgebrochen."
    };
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn send_redirect(port: u16, path_and_query: &str) {
        let mut stream = TcpStream::connect(("127.0.0.1", port)).await.unwrap();
        let request = format!("GET {} HTTP/1.1\r\nHost: 127.0.0.1\r\n\r\n", path_and_query);
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK"));
    }

    #[tokio::test]
    async fn callback_extracts_code_and_state() {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let client = tokio::spawn(async move {
            send_redirect(port, "/callback?code=abc123&state=xyz").await;
        });

        let (code, state) = wait_for_callback(&listener).await.unwrap();
        assert_eq!(code, "abc123");
        assert_eq!(state, "xyz");
        client.await.unwrap();
    }

    #[tokio::test]
    async fn callback_without_code_is_cancellation() {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let client = tokio::spawn(async move {
            send_redirect(port, "/callback?error=access_denied&state=xyz").await;
        });

        let err = wait_for_callback(&listener).await.unwrap_err();
        assert!(matches!(err, ClientError::AuthCancelled));
        client.await.unwrap();
    }
}
