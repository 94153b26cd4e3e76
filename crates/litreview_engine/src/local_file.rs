use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use litreview_core::{FileCandidate, PDF_MEDIA_TYPE};

const PDF_MAGIC: &[u8] = b"%PDF-";
const OCTET_STREAM: &str = "application/octet-stream";

/// Builds a [`FileCandidate`] for a local path.
///
/// The media type comes from a `.pdf` extension or, failing that, the `%PDF-`
/// signature at the start of the file. Only metadata and the signature are read.
pub fn inspect_local_file(path: &Path) -> io::Result<FileCandidate> {
    let meta = std::fs::metadata(path)?;
    if !meta.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a regular file", path.display()),
        ));
    }

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let media_type = if has_pdf_extension(path) || has_pdf_signature(path)? {
        PDF_MEDIA_TYPE
    } else {
        OCTET_STREAM
    };

    Ok(FileCandidate {
        name,
        size: meta.len(),
        media_type: media_type.to_string(),
        path: path.to_path_buf(),
    })
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

fn has_pdf_signature(path: &Path) -> io::Result<bool> {
    let mut head = [0u8; 5];
    let mut file = File::open(path)?;
    let mut filled = 0;
    while filled < head.len() {
        match file.read(&mut head[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(&head[..filled] == PDF_MAGIC)
}
