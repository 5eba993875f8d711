//! Saving exported images to disk.

use super::types::ExportError;
use crate::config::ExportConfig;
use chrono::Local;
use chrono::format::{Item, StrftimeItems};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for file saving.
#[derive(Debug, Clone)]
pub struct FileSaveConfig {
    /// Directory to save images to.
    pub save_directory: PathBuf,
    /// Filename template (supports chrono format specifiers).
    pub filename_template: String,
}

impl Default for FileSaveConfig {
    fn default() -> Self {
        Self::from(&ExportConfig::default())
    }
}

impl From<&ExportConfig> for FileSaveConfig {
    fn from(config: &ExportConfig) -> Self {
        Self {
            save_directory: expand_tilde(&config.save_directory),
            filename_template: config.filename_template.clone(),
        }
    }
}

/// True when every specifier in `template` is one chrono understands.
pub fn is_valid_filename_template(template: &str) -> bool {
    !StrftimeItems::new(template).any(|item| matches!(item, Item::Error))
}

/// Generate a `.png` filename from the template and the current local time.
pub fn generate_filename(template: &str) -> Result<String, ExportError> {
    if !is_valid_filename_template(template) {
        return Err(ExportError::FilenameTemplate(template.to_string()));
    }
    let now = Local::now();
    Ok(format!("{}.png", now.format(template)))
}

/// Ensure the save directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// First path in `directory` for `filename` that does not exist yet.
///
/// Two exports within the same template resolution (e.g. the same second)
/// get `_1`, `_2`, ... suffixes instead of overwriting each other.
fn unique_path(directory: &Path, filename: &str) -> PathBuf {
    let candidate = directory.join(filename);
    if !candidate.exists() {
        return candidate;
    }

    let stem = filename.strip_suffix(".png").unwrap_or(filename);
    (1..)
        .map(|n| directory.join(format!("{stem}_{n}.png")))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Save PNG data into the configured directory under a templated name.
///
/// # Returns
/// Path to the saved file
pub fn save_png(png: &[u8], config: &FileSaveConfig) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(&config.save_directory)?;
    let filename = generate_filename(&config.filename_template)?;
    let file_path = unique_path(&directory, &filename);

    write_png(png, &file_path)?;
    Ok(file_path)
}

/// Write PNG data to an explicit path, creating parent directories.
///
/// The file is made readable by the owner only on unix.
pub fn write_png(png: &[u8], path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_directory_exists(parent)?;
    }

    log::info!("Saving image to: {} ({} bytes)", path.display(), png.len());
    fs::write(path, png)?;

    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, Permissions::from_mode(0o600))?;
    }

    log::debug!("Image saved: {}", path.display());
    Ok(())
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_filename() {
        let filename = generate_filename("sketch_%Y%m%d").unwrap();
        assert!(filename.starts_with("sketch_"));
        assert!(filename.ends_with(".png"));
        assert_eq!(filename.len(), "sketch_20260101.png".len());
    }

    #[test]
    fn test_generate_filename_rejects_unknown_specifier() {
        assert!(!is_valid_filename_template("sketch_%Q"));
        assert!(matches!(
            generate_filename("sketch_%Q"),
            Err(ExportError::FilenameTemplate(template)) if template == "sketch_%Q"
        ));
    }

    #[test]
    fn test_save_png_with_bad_template_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let config = FileSaveConfig {
            save_directory: temp.path().to_path_buf(),
            filename_template: "sketch_%Q".to_string(),
        };

        assert!(save_png(&[0x89, b'P', b'N', b'G'], &config).is_err());
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/Pictures");
        assert!(!expanded.to_string_lossy().starts_with('~'));

        let no_tilde = expand_tilde("/absolute/path");
        assert_eq!(no_tilde, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_default_config_uses_sketchboard_directory() {
        let config = FileSaveConfig::default();
        assert!(config.save_directory.ends_with("Pictures/Sketchboard"));
        assert!(config.filename_template.starts_with("sketchboard_"));
    }

    #[test]
    fn test_save_png_creates_directory_and_avoids_overwrites() {
        let temp = TempDir::new().unwrap();
        let config = FileSaveConfig {
            save_directory: temp.path().join("nested").join("out"),
            filename_template: "fixed".to_string(),
        };

        let first = save_png(b"first", &config).unwrap();
        let second = save_png(b"second", &config).unwrap();

        assert!(first.ends_with("fixed.png"));
        assert!(second.ends_with("fixed_1.png"));
        assert_eq!(fs::read(&first).unwrap(), b"first");
        assert_eq!(fs::read(&second).unwrap(), b"second");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_png_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("canvas.png");
        write_png(b"png", &path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
