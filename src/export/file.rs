//! Saving selections to disk.

use super::types::ExportError;
use crate::config::{ExportConfig, ImageFormat};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for file saving.
#[derive(Debug, Clone)]
pub struct FileSaveConfig {
    /// Directory to save selections to.
    pub save_directory: PathBuf,
    /// Filename template (chrono format specifiers).
    pub filename_template: String,
    pub format: ImageFormat,
}

impl FileSaveConfig {
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            save_directory: expand_tilde(&config.save_directory),
            filename_template: config.filename_template.clone(),
            format: config.image_format(),
        }
    }
}

impl Default for FileSaveConfig {
    fn default() -> Self {
        Self {
            save_directory: dirs::picture_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Leer"),
            filename_template: "Leer_%-d_%-m_%Y".to_string(),
            format: ImageFormat::Png,
        }
    }
}

/// Formats the template with the current local time.
pub fn generate_stem(template: &str) -> String {
    Local::now().format(template).to_string()
}

/// First free `<stem>.<ext>`, `<stem>_1.<ext>`, ... in `directory`.
pub fn unique_path(directory: &Path, stem: &str, extension: &str) -> PathBuf {
    let first = directory.join(format!("{}.{}", stem, extension));
    if !first.exists() {
        return first;
    }

    (1u32..)
        .map(|n| directory.join(format!("{}_{}.{}", stem, n, extension)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

/// Writes encoded image bytes to a new file and returns its path.
///
/// Existing files are never overwritten. The file is readable by the owner only.
pub fn save_image(image_data: &[u8], config: &FileSaveConfig) -> Result<PathBuf, ExportError> {
    if !config.save_directory.exists() {
        log::info!("Creating save directory: {}", config.save_directory.display());
        fs::create_dir_all(&config.save_directory)?;
    }

    let stem = generate_stem(&config.filename_template);
    let file_path = unique_path(&config.save_directory, &stem, config.format.extension());

    log::info!(
        "Saving selection to: {} ({} bytes)",
        file_path.display(),
        image_data.len()
    );
    fs::write(&file_path, image_data)?;

    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&file_path, Permissions::from_mode(0o600))?;
    }

    Ok(file_path)
}

/// Expand a leading `~/` to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(stripped), Some(home)) => home.join(stripped),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_template_has_no_padding() {
        let stem = generate_stem("Leer_%-d_%-m_%Y");
        let now = Local::now();
        assert_eq!(stem, format!("Leer_{}_{}_{}", now.format("%-d"), now.format("%-m"), now.format("%Y")));
        assert!(!stem.contains("_0"));
    }

    #[test]
    fn save_never_overwrites() {
        let temp = TempDir::new().unwrap();
        let config = FileSaveConfig {
            save_directory: temp.path().join("nested"),
            filename_template: "shot".to_string(),
            format: ImageFormat::Bmp,
        };

        let first = save_image(b"one", &config).unwrap();
        let second = save_image(b"two", &config).unwrap();

        assert_eq!(first.file_name().unwrap(), "shot.bmp");
        assert_eq!(second.file_name().unwrap(), "shot_1.bmp");
        assert_eq!(fs::read(&first).unwrap(), b"one");
        assert_eq!(fs::read(&second).unwrap(), b"two");
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let config = FileSaveConfig {
            save_directory: temp.path().to_path_buf(),
            filename_template: "private".to_string(),
            format: ImageFormat::Png,
        };
        let path = save_image(b"data", &config).unwrap();
        let mode = fs::metadata(path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/Pictures");
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
    }

    #[test]
    fn from_config_expands_directory() {
        let config = FileSaveConfig::from_config(&ExportConfig::default());
        assert!(config.save_directory.ends_with("Pictures/Leer"));
        assert_eq!(config.format, ImageFormat::Png);
    }
}
