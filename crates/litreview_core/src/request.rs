use crate::{text, Credential, OutputLanguage, UploadedFile};

/// Snapshot of the form taken when a submission passes validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    pub research_topic: String,
    pub output_language: OutputLanguage,
    pub credential: Credential,
    pub files: Vec<UploadedFile>,
}

/// A failed submission as seen by the form: the server's own explanation,
/// when it sent one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewFailure {
    pub detail: Option<String>,
}

impl ReviewFailure {
    pub fn with_detail(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
        }
    }

    /// Text for the status line: the detail verbatim, or the fixed fallback.
    pub fn message_text(&self) -> &str {
        self.detail
            .as_deref()
            .unwrap_or(text::REVIEW_FAILED_FALLBACK)
    }
}
