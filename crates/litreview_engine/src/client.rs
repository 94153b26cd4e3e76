use std::time::Duration;

use litreview_core::{ReviewRequest, UploadedFile, PDF_MEDIA_TYPE};
use litreview_logging::{review_debug, review_info, review_warn};
use reqwest::multipart::{Form, Part};
use tokio_util::io::ReaderStream;

use crate::{FailureKind, ReviewResponse, ServiceBanner, TransportError};

pub const GENERATE_PATH: &str = "/generate-literature-review";
/// Header carrying the user's key; the key never appears in the body.
pub const API_KEY_HEADER: &str = "x-openrouter-api-key";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            // Generation over several papers routinely takes minutes.
            request_timeout: Duration::from_secs(300),
        }
    }
}

#[async_trait::async_trait]
pub trait ReviewClient: Send + Sync {
    /// Issues exactly one request for `request` and awaits the single response.
    async fn generate(&self, request: &ReviewRequest) -> Result<ReviewResponse, TransportError>;

    async fn ping(&self) -> Result<ServiceBanner, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestReviewClient {
    settings: ClientSettings,
}

impl ReqwestReviewClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, TransportError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, TransportError> {
        reqwest::Url::parse(&self.settings.base_url)
            .and_then(|base| base.join(path))
            .map_err(|err| TransportError::new(FailureKind::InvalidEndpoint, err.to_string()))
    }
}

#[async_trait::async_trait]
impl ReviewClient for ReqwestReviewClient {
    async fn generate(&self, request: &ReviewRequest) -> Result<ReviewResponse, TransportError> {
        let url = self.endpoint(GENERATE_PATH)?;
        let client = self.build_client()?;
        let form = build_form(request).await?;

        review_info!(
            "POST {} files={} language={} topic_len={}",
            url,
            request.files.len(),
            request.output_language,
            request.research_topic.len()
        );

        let response = client
            .post(url)
            .header(API_KEY_HEADER, request.credential.expose())
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        review_debug!("generation response status={} bytes={}", status, body.len());

        if !status.is_success() {
            let detail = extract_detail(&body);
            review_warn!("generation failed: status={} detail={:?}", status, detail);
            return Err(
                TransportError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
                    .with_detail(detail),
            );
        }

        serde_json::from_slice::<ReviewResponse>(&body)
            .map_err(|err| TransportError::new(FailureKind::InvalidResponse, err.to_string()))
    }

    async fn ping(&self) -> Result<ServiceBanner, TransportError> {
        let url = self.endpoint("/")?;
        let client = self.build_client()?;

        let response = client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            return Err(
                TransportError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
                    .with_detail(extract_detail(&body)),
            );
        }

        serde_json::from_slice::<ServiceBanner>(&body)
            .map_err(|err| TransportError::new(FailureKind::InvalidResponse, err.to_string()))
    }
}

async fn build_form(request: &ReviewRequest) -> Result<Form, TransportError> {
    let mut form = Form::new()
        .text("research_topic", request.research_topic.clone())
        .text("output_language", request.output_language.wire_value());
    for file in &request.files {
        form = form.part("files", file_part(file).await?);
    }
    Ok(form)
}

/// Streams the file from its handle instead of buffering it.
async fn file_part(file: &UploadedFile) -> Result<Part, TransportError> {
    let unavailable = |err: std::io::Error| {
        TransportError::new(FailureKind::FileUnavailable, err.to_string())
            .with_detail(Some(format!("Could not read {}: {}", file.name, err)))
    };

    let handle = tokio::fs::File::open(&file.path).await.map_err(unavailable)?;
    let length = handle.metadata().await.map_err(unavailable)?.len();
    let body = reqwest::Body::wrap_stream(ReaderStream::new(handle));

    Part::stream_with_length(body, length)
        .file_name(file.name.clone())
        .mime_str(PDF_MEDIA_TYPE)
        .map_err(|err| TransportError::new(FailureKind::InvalidRequest, err.to_string()))
}

/// `detail` from an error body, when it is a plain string.
fn extract_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("detail")
        .and_then(|detail| detail.as_str())
        .map(ToOwned::to_owned)
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return TransportError::new(FailureKind::InvalidRequest, err.to_string());
    }
    TransportError::new(FailureKind::Network, err.to_string())
}
