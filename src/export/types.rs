//! Data types for image export.

use std::path::PathBuf;
use thiserror::Error;

/// Where an exported image should be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportDestination {
    ClipboardOnly,
    FileOnly,
    ClipboardAndFile,
}

impl ExportDestination {
    /// Picks the destination from the two front-end switches, `None` if neither is set.
    pub fn from_flags(clipboard: bool, file: bool) -> Option<Self> {
        match (clipboard, file) {
            (true, true) => Some(Self::ClipboardAndFile),
            (true, false) => Some(Self::ClipboardOnly),
            (false, true) => Some(Self::FileOnly),
            (false, false) => None,
        }
    }

    pub fn includes_clipboard(self) -> bool {
        matches!(self, Self::ClipboardOnly | Self::ClipboardAndFile)
    }

    pub fn includes_file(self) -> bool {
        matches!(self, Self::FileOnly | Self::ClipboardAndFile)
    }
}

/// Result of an export.
#[derive(Debug, Clone, Default)]
pub struct ExportResult {
    /// Path where the image was saved (if saved).
    pub saved_path: Option<PathBuf>,
    /// Whether the image was copied to clipboard.
    pub copied_to_clipboard: bool,
}

/// Errors that can occur while exporting the canvas.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to save image: {0}")]
    Save(#[from] std::io::Error),

    #[error("Invalid filename template: {0:?}")]
    FilenameTemplate(String),

    #[error("Clipboard operation failed: {0}")]
    Clipboard(String),
}
