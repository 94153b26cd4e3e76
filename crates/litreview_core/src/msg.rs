#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the API key field.
    CredentialChanged(String),
    /// User edited the research topic.
    TopicChanged(String),
    /// User picked the output language.
    LanguageSelected(crate::OutputLanguage),
    /// Files dropped onto / picked in the selection surface.
    FilesDropped(Vec<crate::FileCandidate>),
    /// User removed one pending file.
    FileRemoved(crate::FileId),
    /// User asked for a literature review.
    SubmitClicked,
    /// Engine completion for the outstanding submission.
    ReviewFinished(Result<String, crate::ReviewFailure>),
    /// User asked to copy the result.
    CopyClicked,
    /// Clipboard completion; the error carries a reason for logs only.
    CopyFinished(Result<(), String>),
}
