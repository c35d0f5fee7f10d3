//! Clipboard port and an OSC 52 terminal implementation.
//!
//! OSC 52 asks the terminal emulator to set the system clipboard:
//! `ESC ] 52 ; c ; <base64 payload> BEL`. It works over SSH and needs no
//! platform clipboard library, but the terminal has to allow it.

use std::io::Write;
use std::sync::Mutex;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::ErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl ErrorCode for ClipboardError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "E_CLIPBOARD_IO",
        }
    }
}

pub trait Clipboard: Send + Sync {
    /// Place `text` on the clipboard.
    ///
    /// # Errors
    ///
    /// Returns a [`ClipboardError`] if the text could not be delivered.
    fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Writes OSC 52 sequences to a terminal stream.
pub struct Osc52Clipboard<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<W: Write + Send> Clipboard for Osc52Clipboard<W> {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let mut out = self.out.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        out.write_all(osc52_sequence(text).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Encode `text` as an OSC 52 set-clipboard sequence.
#[must_use]
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}
