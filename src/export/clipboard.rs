//! Clipboard integration for copying the canvas image.

use super::types::ExportError;
use std::process::{Command, Stdio};
use wl_clipboard_rs::copy::{MimeType, Options, Source};

/// Copy PNG data to the Wayland clipboard.
///
/// Prefers the `wl-copy` command (wl-clipboard package) and falls back to
/// the wl-clipboard-rs library when it is missing or fails.
///
/// # Arguments
/// * `png` - Encoded PNG image bytes
pub fn copy_to_clipboard(png: &[u8]) -> Result<(), ExportError> {
    log::debug!("Copying canvas image to clipboard ({} bytes)", png.len());

    if !is_clipboard_available() {
        log::debug!("wl-copy not found, using wl-clipboard-rs");
        return copy_via_library(png);
    }

    match copy_via_command(png) {
        Ok(()) => {
            log::info!("Copied canvas image via wl-copy");
            Ok(())
        }
        Err(cmd_err) => {
            log::warn!("wl-copy failed ({cmd_err}). Falling back to wl-clipboard-rs");
            match copy_via_library(png) {
                Ok(()) => {
                    log::info!("Copied canvas image via wl-clipboard-rs fallback");
                    Ok(())
                }
                Err(lib_err) => Err(ExportError::Clipboard(format!(
                    "wl-copy failed: {cmd_err} ; wl-clipboard-rs failed: {lib_err}"
                ))),
            }
        }
    }
}

fn copy_via_library(png: &[u8]) -> Result<(), ExportError> {
    use wl_clipboard_rs::copy::ServeRequests;

    let mut opts = Options::new();
    // Keep the image available for one paste after we return
    opts.serve_requests(ServeRequests::Only(1));

    opts.copy(
        Source::Bytes(png.into()),
        MimeType::Specific("image/png".to_string()),
    )
    .map_err(|e| ExportError::Clipboard(format!("wl-clipboard-rs error: {e}")))?;

    Ok(())
}

fn copy_via_command(png: &[u8]) -> Result<(), ExportError> {
    use std::io::Write;

    let mut child = Command::new("wl-copy")
        .arg("--type")
        .arg("image/png")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            ExportError::Clipboard(format!("Failed to spawn wl-copy (is it installed?): {e}"))
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(png)
            .map_err(|e| ExportError::Clipboard(format!("Failed to write to wl-copy stdin: {e}")))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| ExportError::Clipboard(format!("Failed to wait for wl-copy: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ExportError::Clipboard(format!("wl-copy failed: {stderr}")));
    }

    Ok(())
}

/// Check if the `wl-copy` command is installed.
pub fn is_clipboard_available() -> bool {
    Command::new("wl-copy")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}
