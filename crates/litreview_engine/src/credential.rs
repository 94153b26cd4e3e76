use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use litreview_core::Credential;
use litreview_logging::{review_debug, review_info, review_warn};
use serde::{Deserialize, Serialize};

use crate::{AtomicFileWriter, PersistError};

pub const CREDENTIALS_FILENAME: &str = "credentials.ron";

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("failed to serialize credentials: {0}")]
    Serialize(#[from] ron::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Persisted home of the API key. Outlives any one session.
pub trait CredentialStore: Send + Sync {
    /// The stored key, or an empty credential when nothing is stored.
    fn load(&self) -> Credential;

    /// Stores `credential`. Empty values are never written, so an accidental
    /// clear keeps the previous key.
    fn save(&self, credential: &Credential) -> Result<(), CredentialError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedCredentials {
    #[serde(default)]
    openrouter_api_key: String,
}

/// Keeps the key in `credentials.ron` inside a configuration directory.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    writer: AtomicFileWriter,
}

impl FileCredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir.into()),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.writer.dir().join(CREDENTIALS_FILENAME)
    }

    fn read(path: &Path) -> Option<PersistedCredentials> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                review_warn!("Failed to read credentials from {:?}: {}", path, err);
                return None;
            }
        };
        match ron::from_str(&content) {
            Ok(stored) => Some(stored),
            Err(err) => {
                review_warn!("Failed to parse credentials from {:?}: {}", path, err);
                None
            }
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Credential {
        let path = self.path();
        let stored = Self::read(&path).unwrap_or_default();
        review_debug!(
            "Loaded credential from {:?} (present: {})",
            path,
            !stored.openrouter_api_key.is_empty()
        );
        Credential::new(stored.openrouter_api_key)
    }

    fn save(&self, credential: &Credential) -> Result<(), CredentialError> {
        if credential.is_empty() {
            return Ok(());
        }
        let stored = PersistedCredentials {
            openrouter_api_key: credential.expose().to_owned(),
        };
        let content = ron::ser::to_string_pretty(&stored, ron::ser::PrettyConfig::new())?;
        let target = self.writer.write_private(CREDENTIALS_FILENAME, &content)?;
        review_info!("Saved credential to {:?}", target);
        Ok(())
    }
}

/// In-process store for tests and runs that must not touch the disk.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    value: Mutex<Credential>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(credential: Credential) -> Self {
        Self {
            value: Mutex::new(credential),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Credential {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, credential: &Credential) -> Result<(), CredentialError> {
        if !credential.is_empty() {
            *self.value.lock().unwrap_or_else(PoisonError::into_inner) = credential.clone();
        }
        Ok(())
    }
}
