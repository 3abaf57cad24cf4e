// Run settings
// Loaded from ~/.config/sdnwatch/settings.toml, or a path given on the command line

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_EXPORT_URL: &str =
    "https://sanctionslistservice.ofac.treas.gov/api/PublicationPreview/exports/SDN.CSV";
pub const DEFAULT_SEARCH_URL: &str = "https://sanctionssearch.ofac.treas.gov/";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("invalid settings in {}: {source}", .path.display())]
    Parse { path: PathBuf, source: toml::de::Error },

    #[error("invalid setting '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the bulk export is downloaded from
    pub export_url: String,

    /// Search page of the lookup service
    pub search_url: String,

    /// Timeout for each lookup request, in seconds
    pub request_timeout_secs: u64,

    /// Timeout for the bulk export download, in seconds
    pub download_timeout_secs: u64,

    /// Local copy of the downloaded export
    pub export_path: PathBuf,

    /// Result file, also read back as the prior snapshot
    pub data_path: PathBuf,

    /// Markdown report whose stats section is regenerated
    pub report_path: PathBuf,

    /// Remarks length at which truncation is suspected
    pub truncation_threshold: usize,

    /// Query the search service for truncated rows
    pub lookup_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            export_url: DEFAULT_EXPORT_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            request_timeout_secs: 30,
            download_timeout_secs: 60,
            export_path: PathBuf::from("sdn.csv"),
            data_path: PathBuf::from("data.csv"),
            report_path: PathBuf::from("README.md"),
            truncation_threshold: 990,
            lookup_enabled: true,
        }
    }
}

impl Settings {
    /// Default settings file location
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("sdnwatch").join("settings.toml"))
    }

    /// Load settings.
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// when present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let settings = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    log::debug!("no settings file, using defaults");
                    Self::default()
                }
            },
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let settings = Self::from_toml(&contents)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "request_timeout_secs",
                reason: "must be at least 1".into(),
            });
        }
        if self.download_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "download_timeout_secs",
                reason: "must be at least 1".into(),
            });
        }
        if self.truncation_threshold == 0 {
            return Err(ConfigError::Invalid {
                key: "truncation_threshold",
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}
