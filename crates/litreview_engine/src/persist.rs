use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("{path:?} is not a usable directory: {reason}")]
    Dir { path: PathBuf, reason: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl PersistError {
    fn dir(path: &Path, reason: impl ToString) -> Self {
        PersistError::Dir {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Creates `dir` (and its parents) when missing, then probes that it accepts new files.
pub fn ensure_dir(dir: &Path) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(PersistError::dir(dir, "path is not a directory")),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|e| PersistError::dir(dir, e))?;
        }
        Err(err) => return Err(PersistError::dir(dir, err)),
    }
    NamedTempFile::new_in(dir).map_err(|e| PersistError::dir(dir, e))?;
    Ok(())
}

/// Replaces files inside one directory atomically: content goes to a temp
/// file in the same directory, which is then renamed over the target.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        self.write_with(filename, content, false)
    }

    /// Like [`AtomicFileWriter::write`], but the file is readable by its owner
    /// only (on Unix). Used for secrets.
    pub fn write_private(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        self.write_with(filename, content, true)
    }

    fn write_with(
        &self,
        filename: &str,
        content: &str,
        private: bool,
    ) -> Result<PathBuf, PersistError> {
        ensure_dir(&self.dir)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        if private {
            restrict_to_owner(tmp.as_file())?;
        }
        tmp.write_all(content.as_bytes())?;
        tmp.as_file_mut().sync_all()?;

        let target = self.dir.join(filename);
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

#[cfg(unix)]
fn restrict_to_owner(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_file: &fs::File) -> io::Result<()> {
    Ok(())
}
