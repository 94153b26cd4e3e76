use crate::{FileId, Message, OutputLanguage, Status};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub status: Status,
    pub research_topic: String,
    pub output_language: OutputLanguage,
    pub has_credential: bool,
    pub files: Vec<FileRowView>,
    /// e.g. `2/10`
    pub file_counter: String,
    pub can_submit: bool,
    pub message: Option<Message>,
    /// Non-PDF names from the last file drop.
    pub skipped_files: Vec<String>,
    /// Result paragraphs; empty until a review arrives.
    pub segments: Vec<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub id: FileId,
    pub name: String,
    pub size_label: String,
}
