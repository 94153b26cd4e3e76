//! Literature review engine: HTTP submission, single-flight orchestration and
//! the IO capabilities the form depends on.
mod client;
mod clipboard;
mod credential;
mod engine;
mod local_file;
mod orchestrator;
mod persist;
mod types;

pub use client::{
    ClientSettings, ReqwestReviewClient, ReviewClient, API_KEY_HEADER, GENERATE_PATH,
};
pub use clipboard::{export_verbatim, Clipboard, ClipboardError, MemoryClipboard, Osc52Clipboard};
pub use credential::{
    CredentialError, CredentialStore, FileCredentialStore, MemoryCredentialStore,
    CREDENTIALS_FILENAME,
};
pub use engine::EngineHandle;
pub use local_file::inspect_local_file;
pub use orchestrator::{InFlightGuard, ReviewOrchestrator, SubmitError};
pub use persist::{ensure_dir, AtomicFileWriter, PersistError};
pub use types::{EngineEvent, FailureKind, ReviewResponse, ServiceBanner, TransportError};
