//! HTTP client for the backend contract
//!
//! One method per endpoint; every call attaches the bearer credential.
//! Non-2xx responses become [`ClientError::Api`] with the body's `detail`
//! field when present. No retries, no timeouts beyond reqwest defaults.

use reqwest::multipart;
use serde::de::DeserializeOwned;

use crate::auth::Credential;
use crate::error::{ClientError, ClientResult};
use crate::models::{AccessLevel, ApiErrorBody, QueryRequest, SearchResponse, UploadRequest, UploadResponse};

/// Thin reqwest wrapper around the backend endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL. A trailing slash is
    /// stripped so endpoint paths concatenate cleanly; an empty base
    /// means same-origin relative URLs behind a reverse proxy.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upload a document for indexing.
    pub async fn upload(
        &self,
        credential: &Credential,
        request: &UploadRequest,
    ) -> ClientResult<UploadResponse> {
        self.upload_to("/upload", credential, request).await
    }

    /// Upload an audio recording for transcription and indexing.
    pub async fn upload_audio(
        &self,
        credential: &Credential,
        request: &UploadRequest,
    ) -> ClientResult<UploadResponse> {
        self.upload_to("/upload-audio", credential, request).await
    }

    async fn upload_to(
        &self,
        path: &str,
        credential: &Credential,
        request: &UploadRequest,
    ) -> ClientResult<UploadResponse> {
        let part = multipart::Part::bytes(request.file.content.clone())
            .file_name(request.file.name.clone())
            .mime_str(&request.file.content_type)?;
        let mut form = multipart::Form::new()
            .part("file", part)
            .text("access", request.access.as_str());
        // The group field travels only with restricted uploads, and may be
        // empty (current behavior, not validated client-side).
        if request.access == AccessLevel::Restricted {
            form = form.text("group", request.group.clone());
        }

        let response = self
            .http
            .post(self.endpoint(path))
            .bearer_auth(credential.secret())
            .multipart(form)
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Run a natural-language query against the indexed documents.
    pub async fn search(
        &self,
        credential: &Credential,
        request: &QueryRequest,
    ) -> ClientResult<SearchResponse> {
        // Percent-encode by hand so a space becomes %20, matching the
        // encoding the backend logs and tests pin down.
        let url = format!(
            "{}/search?query={}",
            self.base_url,
            urlencoding::encode(&request.text)
        );
        let response = self
            .http
            .get(url)
            .bearer_auth(credential.secret())
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail);
            return Err(ClientError::Api {
                status: status.as_u16(),
                detail,
            });
        }
        Ok(response.json().await?)
    }
}
