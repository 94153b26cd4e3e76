//! User-facing message texts.

pub const MISSING_CREDENTIAL: &str = "Please enter your OpenRouter API key.";
pub const MISSING_TOPIC: &str = "Please enter your research topic.";
pub const MISSING_FILES: &str = "Please upload at least one PDF file.";
pub const OVER_CAPACITY: &str = "You can upload at most 10 PDF files.";

pub const REVIEW_SUCCEEDED: &str = "Literature review generated successfully!";
/// Shown when a failed request carries no server-supplied detail.
pub const REVIEW_FAILED_FALLBACK: &str =
    "An error occurred while generating the literature review.";

pub const COPY_SUCCEEDED: &str = "Text copied to clipboard!";
pub const COPY_FAILED: &str = "An error occurred while copying the text.";
