//! Request and response shapes for the backend contract

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClientResult;

/// Document visibility tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// Readable by everyone
    #[default]
    Public,
    /// Readable only by members of the tagged group
    Restricted,
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Public => "public",
            AccessLevel::Restricted => "restricted",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "public" => Ok(AccessLevel::Public),
            "restricted" => Ok(AccessLevel::Restricted),
            other => Err(format!(
                "unknown access level: {} (expected 'public' or 'restricted')",
                other
            )),
        }
    }
}

/// A file the user picked for upload
#[derive(Debug, Clone)]
pub struct SelectedFile {
    /// Original file name, sent as the multipart file name
    pub name: String,
    pub content: Vec<u8>,
    pub content_type: String,
}

impl SelectedFile {
    /// Read a file from disk, deriving the content type from its extension.
    pub fn read(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.bin")
            .to_string();
        let content_type = content_type_for(&name).to_string();
        Ok(Self {
            name,
            content,
            content_type,
        })
    }
}

/// Content type from the file extension, matching the formats the backend
/// ingest understands. Anything unknown is sent as an octet stream and
/// parsed as plain text server-side.
pub fn content_type_for(name: &str) -> &'static str {
    let ext = name.rsplit('.').next().unwrap_or_default().to_lowercase();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "html" | "htm" => "text/html",
        "rtf" => "application/rtf",
        "odt" => "application/vnd.oasis.opendocument.text",
        "txt" | "md" => "text/plain",
        "csv" | "tsv" => "text/csv",
        "xlsx" | "xls" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "m4a" => "audio/mp4",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        _ => "application/octet-stream",
    }
}

/// A document upload, carrying the file and its access metadata
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file: SelectedFile,
    pub access: AccessLevel,
    /// Group allowed to read a restricted document. May be empty; the
    /// backend accepts that as-is (current behavior, not validated).
    pub group: String,
}

/// A natural-language query
#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub text: String,
}

/// Backend response for a successful upload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    /// Number of chunks actually indexed (duplicates are skipped server-side)
    #[serde(default)]
    pub chunks: usize,
    #[serde(default)]
    pub ids: Vec<String>,
}

/// Backend response for a successful query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub hits: usize,
}

/// Failure shape for non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_level_round_trips_through_str() {
        assert_eq!("public".parse::<AccessLevel>().unwrap(), AccessLevel::Public);
        assert_eq!(
            "Restricted".parse::<AccessLevel>().unwrap(),
            AccessLevel::Restricted
        );
        assert!("secret".parse::<AccessLevel>().is_err());
        assert_eq!(AccessLevel::Restricted.as_str(), "restricted");
    }

    #[test]
    fn content_types_cover_backend_formats() {
        assert_eq!(content_type_for("bericht.pdf"), "application/pdf");
        assert_eq!(content_type_for("notes.TXT"), "text/plain");
        assert_eq!(content_type_for("meeting.m4a"), "audio/mp4");
        assert_eq!(content_type_for("blob"), "application/octet-stream");
    }

    #[test]
    fn selected_file_reads_name_content_and_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notizen.txt");
        std::fs::write(&path, b"hallo").unwrap();

        let file = SelectedFile::read(&path).unwrap();
        assert_eq!(file.name, "notizen.txt");
        assert_eq!(file.content, b"hallo");
        assert_eq!(file.content_type, "text/plain");
    }

    #[test]
    fn search_response_parses_backend_shape() {
        let json = r#"{"question":"Was ist X?","answer":"42","hits":5}"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.answer, "42");
        assert_eq!(parsed.hits, 5);
    }

    #[test]
    fn error_body_detail_is_optional() {
        let parsed: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert!(parsed.detail.is_none());
    }
}
