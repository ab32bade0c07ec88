//! The settings file.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use vidl_host::config::DEFAULT_PROGRESS_REGEX;
use vidl_host::{HostConfig, TimingOptions};

/// The settings read from `config.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// The downloader command, including its fixed arguments.
    pub target: String,
    /// The initial window title.
    pub program_name: String,
    /// The directory prefilled in the form. Defaults to `~/Downloads`.
    pub default_dir: Option<PathBuf>,
    /// The progress pattern. An empty string disables the progress bar.
    pub progress_regex: String,
    /// Do not echo progress lines to the console.
    pub hide_progress_msg: bool,
    /// Show the estimated time remaining.
    pub show_time_remaining: bool,
    /// Hide the elapsed and remaining time once the download completed.
    pub hide_time_remaining_on_complete: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target: "youtube-dl --newline".to_string(),
            program_name: "Video downloader".to_string(),
            default_dir: None,
            progress_regex: DEFAULT_PROGRESS_REGEX.to_string(),
            hide_progress_msg: true,
            show_time_remaining: true,
            hide_time_remaining_on_complete: true,
        }
    }
}

impl Settings {
    /// Returns `<config dir>/vidl/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vidl").join("config.toml"))
    }

    /// Reads the settings at `path`. A missing or empty file gives the defaults.
    ///
    /// # Errors
    ///
    /// This function will return an error if the file could not be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Reads the settings at `path`, falling back to the defaults on any error.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match Self::load(path) {
            Ok(settings) => {
                log::debug!("Settings loaded from {}", path.display());
                settings
            }
            Err(e) => {
                log::error!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Returns the directory prefilled in the form.
    pub fn default_dir(&self) -> String {
        self.default_dir
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
            .unwrap_or_else(|| PathBuf::from("Downloads"))
            .to_string_lossy()
            .into_owned()
    }

    /// Returns the host configuration.
    pub fn host_config(&self) -> HostConfig {
        HostConfig {
            program_name: self.program_name.clone(),
            target: self.target.clone(),
            progress_regex: Some(self.progress_regex.clone()).filter(|regex| !regex.is_empty()),
            hide_progress_msg: self.hide_progress_msg,
            timing: TimingOptions {
                show_time_remaining: self.show_time_remaining,
                hide_time_remaining_on_complete: self.hide_time_remaining_on_complete,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "target = \"yt-dlp --newline\"").unwrap();
        writeln!(file, "default_dir = \"/srv/videos\"").unwrap();
        writeln!(file, "progress_regex = \"\"").unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.target, "yt-dlp --newline");
        assert_eq!(settings.default_dir(), "/srv/videos");
        assert_eq!(settings.program_name, "Video downloader");

        let config = settings.host_config();
        assert_eq!(config.target, "yt-dlp --newline");
        assert_eq!(config.progress_regex, None);
    }

    #[test]
    fn malformed_file_is_an_error_and_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "target = [").unwrap();

        assert!(matches!(Settings::load(file.path()), Err(Error::Settings(_))));
        assert_eq!(Settings::load_or_default(Some(file.path())), Settings::default());
    }

    #[test]
    fn default_host_config_uses_the_progress_pattern() {
        let config = Settings::default().host_config();
        assert_eq!(config.progress_regex.as_deref(), Some(DEFAULT_PROGRESS_REGEX));
        assert_eq!(config, HostConfig::default());
    }
}
