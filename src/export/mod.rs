//! Image export for sketchboard.
//!
//! The canvas leaves the application in two ways:
//! - Clipboard copy (`wl-copy`, falling back to wl-clipboard-rs)
//! - PNG files, either at an explicit path or in the configured directory

pub mod clipboard;
pub mod file;
pub mod types;

pub use file::FileSaveConfig;
pub use types::{ExportDestination, ExportError, ExportResult};

/// Delivers encoded PNG data to `destination`.
///
/// The file is written before the clipboard is touched, so a clipboard
/// failure never loses the saved copy.
pub fn export_png(
    png: &[u8],
    destination: ExportDestination,
    config: &FileSaveConfig,
) -> Result<ExportResult, ExportError> {
    let mut result = ExportResult::default();

    if destination.includes_file() {
        result.saved_path = Some(file::save_png(png, config)?);
    }

    if destination.includes_clipboard() {
        clipboard::copy_to_clipboard(png)?;
        result.copied_to_clipboard = true;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn destination_from_flags() {
        assert_eq!(ExportDestination::from_flags(false, false), None);
        assert_eq!(
            ExportDestination::from_flags(true, true),
            Some(ExportDestination::ClipboardAndFile)
        );
        assert!(ExportDestination::FileOnly.includes_file());
        assert!(!ExportDestination::FileOnly.includes_clipboard());
    }

    #[test]
    fn file_only_export_skips_clipboard() {
        let temp = TempDir::new().unwrap();
        let config = FileSaveConfig {
            save_directory: temp.path().to_path_buf(),
            filename_template: "export".to_string(),
        };

        let result = export_png(b"png", ExportDestination::FileOnly, &config).unwrap();

        assert!(!result.copied_to_clipboard);
        assert!(result.saved_path.unwrap().ends_with("export.png"));
    }
}
