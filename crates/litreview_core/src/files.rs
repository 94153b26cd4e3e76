use std::fmt;
use std::path::PathBuf;

use crate::text;

/// Upper bound on the number of files a single request may carry.
pub const MAX_FILES: usize = 10;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Identifier of an [`UploadedFile`].
///
/// Ids come from a per-collection counter and are never reused within a
/// session, so any two entries held at the same time have distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u64);

impl FileId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file-{}", self.0)
    }
}

/// A file offered by the selection surface, not yet part of the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub size: u64,
    pub media_type: String,
    pub path: PathBuf,
}

impl FileCandidate {
    pub fn is_pdf(&self) -> bool {
        let essence = self
            .media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim();
        essence.eq_ignore_ascii_case(PDF_MEDIA_TYPE)
    }
}

/// A pending upload. `path` is a handle to the user's local data; the bytes
/// are only read when the request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub id: FileId,
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
}

/// Outcome of a successful [`FileCollection::add_files`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddedFiles {
    pub added: Vec<FileId>,
    /// Names of candidates that were not PDFs.
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileCollectionError {
    #[error("adding {incoming} files to {current} would exceed the limit of {limit}")]
    OverCapacity {
        limit: usize,
        current: usize,
        incoming: usize,
    },
}

impl FileCollectionError {
    pub fn user_message(&self) -> &'static str {
        match self {
            FileCollectionError::OverCapacity { .. } => text::OVER_CAPACITY,
        }
    }
}

/// Ordered, capacity-bounded set of pending uploads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileCollection {
    files: Vec<UploadedFile>,
    last_id: u64,
}

impl FileCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every PDF candidate, or none of them.
    ///
    /// Non-PDF candidates are dropped and reported in [`AddedFiles::skipped`];
    /// they do not count towards the capacity check.
    pub fn add_files(
        &mut self,
        candidates: Vec<FileCandidate>,
    ) -> Result<AddedFiles, FileCollectionError> {
        let (accepted, rejected): (Vec<_>, Vec<_>) =
            candidates.into_iter().partition(FileCandidate::is_pdf);

        let incoming = accepted.len();
        if self.files.len() + incoming > MAX_FILES {
            return Err(FileCollectionError::OverCapacity {
                limit: MAX_FILES,
                current: self.files.len(),
                incoming,
            });
        }

        let mut added = Vec::with_capacity(incoming);
        for candidate in accepted {
            let id = self.next_id();
            self.files.push(UploadedFile {
                id,
                name: candidate.name,
                size: candidate.size,
                path: candidate.path,
            });
            added.push(id);
        }

        Ok(AddedFiles {
            added,
            skipped: rejected.into_iter().map(|c| c.name).collect(),
        })
    }

    /// Removes the entry with `id`. Returns false when no such entry exists.
    pub fn remove_file(&mut self, id: FileId) -> bool {
        let before = self.files.len();
        self.files.retain(|file| file.id != id);
        self.files.len() != before
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn get(&self, id: FileId) -> Option<&UploadedFile> {
        self.files.iter().find(|file| file.id == id)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|file| file.size).sum()
    }

    fn next_id(&mut self) -> FileId {
        self.last_id += 1;
        FileId(self.last_id)
    }
}
