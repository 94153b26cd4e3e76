use std::fmt;
use std::str::FromStr;

use crate::view_model::{AppViewModel, FileRowView};
use crate::{can_submit, format_megabytes, segments, Credential, FileCollection, MAX_FILES};

/// Language the service should write the review in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputLanguage {
    #[default]
    Turkish,
    English,
}

impl OutputLanguage {
    /// Value sent in the `output_language` form field.
    pub fn wire_value(self) -> &'static str {
        match self {
            OutputLanguage::Turkish => "turkish",
            OutputLanguage::English => "english",
        }
    }
}

impl fmt::Display for OutputLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_value())
    }
}

impl FromStr for OutputLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "turkish" | "tr" => Ok(OutputLanguage::Turkish),
            "english" | "en" => Ok(OutputLanguage::English),
            other => Err(format!("unsupported output language: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    Success,
}

/// The single status line shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }
}

/// Everything the user has entered plus the outcome of the last submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    research_topic: String,
    output_language: OutputLanguage,
    files: FileCollection,
    credential: Credential,
    status: Status,
    result_text: Option<String>,
    message: Option<Message>,
    /// Names left out of the last dropped batch because they were not PDFs.
    skipped_files: Vec<String>,
    dirty: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session start: the credential comes from the persisted store.
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential,
            ..Self::default()
        }
    }

    pub fn research_topic(&self) -> &str {
        &self.research_topic
    }

    pub fn output_language(&self) -> OutputLanguage {
        self.output_language
    }

    pub fn files(&self) -> &FileCollection {
        &self.files
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    pub fn result_text(&self) -> Option<&str> {
        self.result_text.as_deref()
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn skipped_files(&self) -> &[String] {
        &self.skipped_files
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            status: self.status,
            research_topic: self.research_topic.clone(),
            output_language: self.output_language,
            has_credential: !self.credential.is_blank(),
            files: self
                .files
                .files()
                .iter()
                .map(|file| FileRowView {
                    id: file.id,
                    name: file.name.clone(),
                    size_label: format!("({})", format_megabytes(file.size)),
                })
                .collect(),
            file_counter: format!("{}/{}", self.files.len(), MAX_FILES),
            can_submit: can_submit(self),
            message: self.message.clone(),
            skipped_files: self.skipped_files.clone(),
            segments: self
                .result_text
                .as_deref()
                .map(|text| segments(text).into_iter().map(str::to_owned).collect())
                .unwrap_or_default(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_research_topic(&mut self, topic: String) {
        if self.research_topic != topic {
            self.research_topic = topic;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_output_language(&mut self, language: OutputLanguage) {
        if self.output_language != language {
            self.output_language = language;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_credential(&mut self, credential: Credential) {
        self.credential = credential;
        self.mark_dirty();
    }

    pub(crate) fn files_mut(&mut self) -> &mut FileCollection {
        &mut self.files
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        if self.status != status {
            self.status = status;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_result_text(&mut self, text: String) {
        self.result_text = Some(text);
        self.mark_dirty();
    }

    pub(crate) fn set_skipped_files(&mut self, names: Vec<String>) {
        if self.skipped_files != names {
            self.skipped_files = names;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_message(&mut self, message: Message) {
        self.message = Some(message);
        self.mark_dirty();
    }

    pub(crate) fn clear_message(&mut self) {
        if self.message.take().is_some() {
            self.mark_dirty();
        }
    }

    /// Drops the current message only if it is an error.
    pub(crate) fn clear_error(&mut self) {
        if matches!(&self.message, Some(m) if m.kind == MessageKind::Error) {
            self.clear_message();
        }
    }
}
