//! Client session controller
//!
//! Owns the authentication state and the per-form fields of the interface,
//! and mediates the upload and query operations. Every operation requires a
//! stored credential; missing preconditions make the operation a silent
//! no-op (no network call, no status change). Failures are absorbed locally
//! and rendered as status text, never propagated.

use crate::api::ApiClient;
use crate::auth::{AuthStrategy, Session};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::models::{AccessLevel, QueryRequest, SelectedFile, UploadRequest};

/// Status shown while an upload is in flight
pub const UPLOAD_PENDING: &str = "Uploading...";
/// Status shown after a successful upload
pub const UPLOAD_SUCCESS: &str = "Upload erfolgreich";
/// Placeholder shown while a query is in flight
pub const ANSWER_PENDING: &str = "...";

const GENERIC_DETAIL: &str = "Unknown";

/// Render a failure as inline status text, using the server-supplied
/// detail when present.
fn failure_label(err: &ClientError) -> String {
    match err.detail() {
        Some(detail) => format!("Fehler: {}", detail),
        None => format!("Fehler: {}", GENERIC_DETAIL),
    }
}

/// Session controller: authentication lifecycle plus the two request
/// operations, with the login flow injected as an [`AuthStrategy`]
pub struct SessionController {
    session: Session,
    api: ApiClient,
    auth: Box<dyn AuthStrategy>,

    // Form state, owned exclusively by this instance
    selected_file: Option<SelectedFile>,
    access: AccessLevel,
    group: String,
    query: String,

    // Display state observable by the interface
    upload_status: Option<String>,
    response: Option<String>,
}

impl SessionController {
    pub fn new(config: &ClientConfig, auth: Box<dyn AuthStrategy>) -> Self {
        Self {
            session: Session::default(),
            api: ApiClient::new(config.api_base.clone()),
            auth,
            selected_file: None,
            access: AccessLevel::default(),
            group: String::new(),
            query: String::new(),
            upload_status: None,
            response: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Inline status of the last upload, if any
    pub fn upload_status(&self) -> Option<&str> {
        self.upload_status.as_deref()
    }

    /// Displayed answer (or error text) of the last query, if any
    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    pub fn select_file(&mut self, file: SelectedFile) {
        self.selected_file = Some(file);
    }

    pub fn set_access(&mut self, access: AccessLevel) {
        self.access = access;
    }

    pub fn set_group(&mut self, group: impl Into<String>) {
        self.group = group.into();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Run the injected interactive login flow.
    ///
    /// On success the session becomes authenticated and the credential is
    /// stored. On failure or cancellation the session stays unauthenticated
    /// with no credential and no automatic retry; the failure is logged,
    /// not surfaced as a message.
    pub async fn login(&mut self) -> bool {
        match self.auth.login().await {
            Ok(credential) => {
                self.session.authenticate(credential);
                true
            }
            Err(err) => {
                tracing::warn!("login failed: {}", err);
                false
            }
        }
    }

    /// Upload the selected document with its access metadata.
    ///
    /// Skipped silently unless a file is selected and a credential is
    /// present.
    pub async fn upload(&mut self) {
        let Some(request) = self.pending_upload() else {
            return;
        };
        let Some(credential) = self.session.credential().cloned() else {
            return;
        };
        self.upload_status = Some(UPLOAD_PENDING.to_string());
        self.upload_status = match self.api.upload(&credential, &request).await {
            Ok(_) => Some(UPLOAD_SUCCESS.to_string()),
            Err(err) => {
                tracing::warn!("upload failed: {}", err);
                Some(failure_label(&err))
            }
        };
    }

    /// Upload the selected file as an audio recording for transcription.
    ///
    /// Same preconditions and status handling as [`upload`](Self::upload);
    /// format validation is left to the backend.
    pub async fn upload_audio(&mut self) {
        let Some(request) = self.pending_upload() else {
            return;
        };
        let Some(credential) = self.session.credential().cloned() else {
            return;
        };
        self.upload_status = Some(UPLOAD_PENDING.to_string());
        self.upload_status = match self.api.upload_audio(&credential, &request).await {
            Ok(_) => Some(UPLOAD_SUCCESS.to_string()),
            Err(err) => {
                tracing::warn!("audio upload failed: {}", err);
                Some(failure_label(&err))
            }
        };
    }

    /// Submit the current query text.
    ///
    /// Skipped silently unless the query is non-empty and a credential is
    /// present. Shows the placeholder before the call, then the answer or
    /// an error label.
    pub async fn ask(&mut self) {
        if self.query.is_empty() {
            return;
        }
        let Some(credential) = self.session.credential().cloned() else {
            return;
        };
        let request = QueryRequest {
            text: self.query.clone(),
        };
        self.response = Some(ANSWER_PENDING.to_string());
        self.response = match self.api.search(&credential, &request).await {
            Ok(result) => Some(result.answer),
            Err(err) => {
                tracing::warn!("query failed: {}", err);
                Some(failure_label(&err))
            }
        };
    }

    fn pending_upload(&self) -> Option<UploadRequest> {
        let file = self.selected_file.clone()?;
        Some(UploadRequest {
            file,
            access: self.access,
            group: self.group.clone(),
        })
    }
}
