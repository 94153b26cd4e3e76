//! Literature review core: pure form state machine and view-model helpers.
mod credential;
mod effect;
mod files;
mod msg;
mod presenter;
mod request;
mod state;
pub mod text;
mod update;
mod validate;
mod view_model;

pub use credential::Credential;
pub use effect::Effect;
pub use files::{
    AddedFiles, FileCandidate, FileCollection, FileCollectionError, FileId, UploadedFile,
    MAX_FILES, PDF_MEDIA_TYPE,
};
pub use msg::Msg;
pub use presenter::{format_megabytes, segments};
pub use request::{ReviewFailure, ReviewRequest};
pub use state::{FormState, Message, MessageKind, OutputLanguage, Status};
pub use update::update;
pub use validate::{can_submit, validate, ValidationError};
pub use view_model::{AppViewModel, FileRowView};
