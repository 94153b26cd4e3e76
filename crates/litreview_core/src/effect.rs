#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write a non-empty credential to the persistent store.
    PersistCredential(crate::Credential),
    /// Send the request to the generation service.
    SubmitReview(crate::ReviewRequest),
    /// Hand the verbatim result text to the clipboard.
    CopyToClipboard(String),
}
