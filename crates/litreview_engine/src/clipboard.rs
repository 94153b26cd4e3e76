use std::io::{self, Write};

use base64::Engine;
use litreview_logging::{review_info, review_warn};

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard write failed: {0}")]
    Io(#[from] io::Error),
    #[error("clipboard unavailable")]
    Unavailable,
}

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Copies through the terminal with an OSC 52 escape sequence.
///
/// Works in most modern terminal emulators, including over SSH.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl Osc52Clipboard<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
        self.out
            .write_all(format!("\x1b]52;c;{encoded}\x07").as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_owned());
        Ok(())
    }
}

/// Hands the review to the clipboard exactly as received, line breaks included.
pub fn export_verbatim(text: &str, clipboard: &mut dyn Clipboard) -> Result<(), ClipboardError> {
    match clipboard.set_text(text) {
        Ok(()) => {
            review_info!("Copied {} bytes to clipboard", text.len());
            Ok(())
        }
        Err(err) => {
            review_warn!("Clipboard export failed: {}", err);
            Err(err)
        }
    }
}
