//! ApiClient wire-format checks against a mock backend

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fragdoc::models::{AccessLevel, QueryRequest, SelectedFile, UploadRequest};
use fragdoc::{ApiClient, ClientError, Credential};

fn upload_request(access: AccessLevel, group: &str) -> UploadRequest {
    UploadRequest {
        file: SelectedFile {
            name: "bericht.pdf".to_string(),
            content: b"%PDF-1.4".to_vec(),
            content_type: "application/pdf".to_string(),
        },
        access,
        group: group.to_string(),
    }
}

#[tokio::test]
async fn upload_sends_multipart_file_and_access_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(header("authorization", "Bearer tok"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"bericht.pdf\""))
        .and(body_string_contains("name=\"access\""))
        .and(body_string_contains("public"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "chunks": 2, "ids": ["a", "b"]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri());
    let credential = Credential::new("tok".to_string());
    let response = api
        .upload(&credential, &upload_request(AccessLevel::Public, ""))
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.chunks, 2);
    assert_eq!(response.ids, vec!["a", "b"]);
}

#[tokio::test]
async fn restricted_upload_carries_the_group_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(body_string_contains("name=\"access\""))
        .and(body_string_contains("restricted"))
        .and(body_string_contains("name=\"group\""))
        .and(body_string_contains("finanzen"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "chunks": 1, "ids": ["a"]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri());
    let credential = Credential::new("tok".to_string());
    api.upload(&credential, &upload_request(AccessLevel::Restricted, "finanzen"))
        .await
        .unwrap();
}

#[tokio::test]
async fn public_upload_omits_the_group_field() {
    let server = MockServer::start().await;
    // A public upload must never match this group-field expectation.
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(body_string_contains("name=\"group\""))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "chunks": 1, "ids": ["a"]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri());
    let credential = Credential::new("tok".to_string());
    api.upload(&credential, &upload_request(AccessLevel::Public, "ignored"))
        .await
        .unwrap();
}

#[tokio::test]
async fn audio_upload_posts_to_the_audio_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload-audio"))
        .and(body_string_contains("filename=\"memo.mp3\""))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "chunks": 1, "ids": ["a"]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri());
    let credential = Credential::new("tok".to_string());
    let request = UploadRequest {
        file: SelectedFile {
            name: "memo.mp3".to_string(),
            content: vec![0u8; 32],
            content_type: "audio/mpeg".to_string(),
        },
        access: AccessLevel::Public,
        group: String::new(),
    };
    api.upload_audio(&credential, &request).await.unwrap();
}

#[tokio::test]
async fn non_success_becomes_api_error_with_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "LLM failed"})))
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri());
    let credential = Credential::new("tok".to_string());
    let err = api
        .search(
            &credential,
            &QueryRequest {
                text: "frage".to_string(),
            },
        )
        .await
        .unwrap_err();

    match err {
        ClientError::Api { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail.as_deref(), Some("LLM failed"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"question": "q", "answer": "a", "hits": 0})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(format!("{}/", server.uri()));
    let credential = Credential::new("tok".to_string());
    let response = api
        .search(
            &credential,
            &QueryRequest {
                text: "frage".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(response.answer, "a");
}
