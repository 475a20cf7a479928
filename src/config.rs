/// Application configuration
///
/// Read from `config.json` in the user's config directory:
/// - Linux: ~/.config/smart-notes/config.json
/// - macOS: ~/Library/Application Support/smart-notes/config.json
/// - Windows: %APPDATA%\smart-notes\config.json
///
/// Precedence, lowest first: built-in defaults, the config file, the
/// `SMART_NOTES_MANIFEST` environment variable, command-line flags.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::state::query::PAGE_SIZE;

/// Class standards offered by the filters and the admin form
pub const CLASS_STANDARDS: [&str; 6] = ["5", "6", "7", "8", "9", "10"];

/// Subjects offered by the filters and the admin form
pub const SUBJECTS: [&str; 4] = ["Science", "Maths", "English", "Social Science"];

/// Overrides `manifest_source`
pub const MANIFEST_ENV: &str = "SMART_NOTES_MANIFEST";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// URL or local path of materials.json
    pub manifest_source: String,
    /// Base for site-relative document links
    pub site_base_url: String,
    /// WhatsApp number behind the contact button
    pub contact_number: String,
    pub app_title: String,
    pub page_size: usize,
    pub dark_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            manifest_source: "http://localhost:5173/materials.json".to_string(),
            site_base_url: "http://localhost:5173".to_string(),
            contact_number: "7021396917".to_string(),
            app_title: "Notes".to_string(),
            page_size: PAGE_SIZE,
            dark_mode: false,
        }
    }
}

impl AppConfig {
    /// Default config file location, None if the platform has no config dir
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("smart-notes");
        path.push("config.json");
        Some(path)
    }

    /// Read a config file. A missing file is not an error.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` (or the default location), then apply the
    /// environment. Problems are logged and fall back to defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.map(Path::to_path_buf).or_else(Self::default_path);

        let mut config = match path {
            Some(path) => Self::from_file(&path).unwrap_or_else(|err| {
                warn!(error = %err, "⚠️  ignoring config file");
                Self::default()
            }),
            None => Self::default(),
        };

        if let Ok(source) = std::env::var(MANIFEST_ENV) {
            config.apply_manifest_override(Some(source));
        }
        config
    }

    /// Replace `manifest_source` when `source` is non-blank
    pub fn apply_manifest_override(&mut self, source: Option<String>) {
        if let Some(source) = source.filter(|s| !s.trim().is_empty()) {
            self.manifest_source = source;
        }
    }

    /// Outbound chat link for the contact button
    pub fn contact_url(&self) -> String {
        format!("https://wa.me/{}", self.contact_number)
    }
}
