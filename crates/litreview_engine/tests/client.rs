use std::path::{Path, PathBuf};
use std::time::Duration;

use litreview_core::{
    Credential, FileCandidate, FileCollection, OutputLanguage, ReviewRequest, UploadedFile,
    PDF_MEDIA_TYPE,
};
use litreview_engine::{
    ClientSettings, FailureKind, ReqwestReviewClient, ReviewClient, API_KEY_HEADER, GENERATE_PATH,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_pdf(dir: &Path, name: &str, size: usize) -> PathBuf {
    let path = dir.join(name);
    let mut bytes = b"%PDF-1.7\n".to_vec();
    bytes.resize(size, b'x');
    std::fs::write(&path, bytes).unwrap();
    path
}

fn uploaded(files: &[(&str, PathBuf, u64)]) -> Vec<UploadedFile> {
    // Ids are only ever minted by the collection; build real ones through it.
    let mut collection = FileCollection::new();
    collection
        .add_files(
            files
                .iter()
                .map(|(name, path, size)| FileCandidate {
                    name: name.to_string(),
                    size: *size,
                    media_type: PDF_MEDIA_TYPE.to_string(),
                    path: path.clone(),
                })
                .collect(),
        )
        .unwrap();
    collection.files().to_vec()
}

fn request(files: Vec<UploadedFile>) -> ReviewRequest {
    ReviewRequest {
        research_topic: "AI in education".to_string(),
        output_language: OutputLanguage::English,
        credential: Credential::new("sk-or-x"),
        files,
    }
}

fn client_for(server: &MockServer) -> ReqwestReviewClient {
    ReqwestReviewClient::new(ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    })
}

#[tokio::test]
async fn generate_sends_one_multipart_request_and_parses_review() {
    litreview_logging::initialize_for_tests();
    let temp = TempDir::new().unwrap();
    let a = write_pdf(temp.path(), "a.pdf", 1024 * 1024);
    let b = write_pdf(temp.path(), "b.pdf", 2 * 1024 * 1024);

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header(API_KEY_HEADER, "sk-or-x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "literature_review": "Para1\nPara2",
            "message": "Literature review generated successfully",
            "citations": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let files = uploaded(&[
        ("a.pdf", a, 1024 * 1024),
        ("b.pdf", b, 2 * 1024 * 1024),
    ]);
    let response = client_for(&server)
        .generate(&request(files))
        .await
        .expect("generate ok");

    assert_eq!(response.literature_review, "Para1\nPara2");

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    let content_type = received[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&received[0].body);
    assert!(body.contains("name=\"research_topic\"\r\n\r\nAI in education\r\n"));
    assert!(body.contains("name=\"output_language\"\r\n\r\nenglish\r\n"));
    assert_eq!(body.matches("name=\"files\"").count(), 2);
    assert!(body.contains("filename=\"a.pdf\""));
    assert!(body.contains("filename=\"b.pdf\""));
    assert_eq!(body.matches("Content-Type: application/pdf").count(), 2);
    assert!(!body.contains("sk-or-x"));
    assert!(received[0].body.len() > 3 * 1024 * 1024);
}

#[tokio::test]
async fn non_success_status_carries_server_detail() {
    let temp = TempDir::new().unwrap();
    let a = write_pdf(temp.path(), "a.pdf", 64);

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(serde_json::json!({ "detail": "quota exceeded" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate(&request(uploaded(&[("a.pdf", a, 64)])))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(429));
    assert_eq!(err.detail.as_deref(), Some("quota exceeded"));
}

#[tokio::test]
async fn non_json_error_body_has_no_detail() {
    let temp = TempDir::new().unwrap();
    let a = write_pdf(temp.path(), "a.pdf", 64);

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate(&request(uploaded(&[("a.pdf", a, 64)])))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(502));
    assert_eq!(err.detail, None);
}

#[tokio::test]
async fn success_without_review_field_is_invalid_response() {
    let temp = TempDir::new().unwrap();
    let a = write_pdf(temp.path(), "a.pdf", 64);

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate(&request(uploaded(&[("a.pdf", a, 64)])))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::InvalidResponse);
    assert_eq!(err.detail, None);
}

#[tokio::test]
async fn unreachable_service_is_a_network_failure_without_detail() {
    let temp = TempDir::new().unwrap();
    let a = write_pdf(temp.path(), "a.pdf", 64);

    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let client = ReqwestReviewClient::new(ClientSettings {
        base_url: uri,
        connect_timeout: Duration::from_secs(2),
        ..ClientSettings::default()
    });

    let err = client
        .generate(&request(uploaded(&[("a.pdf", a, 64)])))
        .await
        .unwrap_err();

    assert!(matches!(err.kind, FailureKind::Network | FailureKind::Timeout));
    assert_eq!(err.detail, None);
}

#[tokio::test]
async fn slow_service_times_out() {
    let temp = TempDir::new().unwrap();
    let a = write_pdf(temp.path(), "a.pdf", 64);

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(serde_json::json!({ "literature_review": "late" })),
        )
        .mount(&server)
        .await;

    let client = ReqwestReviewClient::new(ClientSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(100),
        ..ClientSettings::default()
    });

    let err = client
        .generate(&request(uploaded(&[("a.pdf", a, 64)])))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn vanished_file_fails_before_anything_is_sent() {
    let temp = TempDir::new().unwrap();
    let a = write_pdf(temp.path(), "a.pdf", 64);
    let files = uploaded(&[("a.pdf", a.clone(), 64)]);
    std::fs::remove_file(&a).unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server).generate(&request(files)).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::FileUnavailable);
    assert!(err.detail.unwrap().contains("a.pdf"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn ping_reads_service_banner() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "message": "Literature Review API is running" })),
        )
        .mount(&server)
        .await;

    let banner = client_for(&server).ping().await.unwrap();
    assert_eq!(banner.message, "Literature Review API is running");
}
