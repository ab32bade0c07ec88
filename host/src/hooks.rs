//! The extension points of the host.
//!
//! The host never calls its own construction, dispatch or output-processing
//! code directly: it goes through the objects held in [`Hooks`]. Replacing
//! one of them with a wrapper that keeps the original and calls through to it
//! changes the host's behaviour without touching the host.

use crate::app::Application;
use crate::config::HostConfig;
use crate::error::Result;
use crate::processor::Launcher;
use regex::bytes::{Regex, RegexBuilder};
use std::sync::Arc;

/// Runs once, right after the host window is allocated.
pub trait Construct: Send + Sync {
    /// Finishes building `app`.
    fn construct(&self, app: &mut Application);
}

/// Launches the child process for a full command line.
pub trait Dispatch: Send + Sync {
    /// Runs `command` through `launcher`.
    fn run(&self, command: &str, launcher: &Launcher) -> Result<()>;
}

/// Turns one raw output line of the child into a progress percentage.
pub trait ExtractProgress: Send + Sync {
    /// Returns the progress carried by `raw`, if any.
    fn extract_progress(&self, raw: &[u8]) -> Option<u8>;
}

/// The default construction: shows the program name as the title.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowProgramName;

impl Construct for ShowProgramName {
    fn construct(&self, app: &mut Application) {
        let title = app.config().program_name.clone();
        app.set_title(&title);
    }
}

/// The default dispatch: spawns the command line as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spawn;

impl Dispatch for Spawn {
    fn run(&self, command: &str, launcher: &Launcher) -> Result<()> {
        launcher.launch(command)
    }
}

/// The default progress extraction, driven by a pattern whose first group is
/// the percentage.
#[derive(Debug, Clone, Default)]
pub struct ProgressPattern {
    regex: Option<Regex>,
}

impl ProgressPattern {
    /// Compiles `pattern` in multi-line mode. `None` disables extraction.
    pub fn new(pattern: Option<&str>) -> Result<Self> {
        let regex = pattern
            .map(|pattern| RegexBuilder::new(pattern).multi_line(true).build())
            .transpose()?;

        Ok(Self { regex })
    }
}

impl ExtractProgress for ProgressPattern {
    fn extract_progress(&self, raw: &[u8]) -> Option<u8> {
        let captures = self.regex.as_ref()?.captures(raw)?;
        let value = std::str::from_utf8(captures.get(1)?.as_bytes()).ok()?;
        let percent = value.parse::<f32>().ok()?;

        Some(percent.clamp(0.0, 100.0) as u8)
    }
}

/// One object per extension point.
#[derive(Clone)]
pub struct Hooks {
    /// The construction point.
    pub construct: Arc<dyn Construct>,
    /// The command dispatch point.
    pub dispatch: Arc<dyn Dispatch>,
    /// The output processing point.
    pub extract: Arc<dyn ExtractProgress>,
}

impl Hooks {
    /// Returns the host's own behaviour for every point.
    pub fn standard(config: &HostConfig) -> Result<Self> {
        Ok(Self {
            construct: Arc::new(ShowProgramName),
            dispatch: Arc::new(Spawn),
            extract: Arc::new(ProgressPattern::new(config.progress_regex.as_deref())?),
        })
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PROGRESS_REGEX;

    #[test]
    fn extracts_truncated_percentage() {
        let pattern = ProgressPattern::new(Some(DEFAULT_PROGRESS_REGEX)).unwrap();
        assert_eq!(
            pattern.extract_progress(b"[download]  45.7% of 10.00MiB at 1.00MiB/s ETA 00:05"),
            Some(45)
        );
        assert_eq!(pattern.extract_progress(b"[download] 100% of 10.00MiB"), Some(100));
    }

    #[test]
    fn ignores_other_lines() {
        let pattern = ProgressPattern::new(Some(DEFAULT_PROGRESS_REGEX)).unwrap();
        assert_eq!(pattern.extract_progress(b"[download] Destination: a.mp4"), None);
        assert_eq!(pattern.extract_progress(b"[youtube] abc: Downloading webpage"), None);
    }

    #[test]
    fn unparsable_percentage_is_no_progress() {
        let pattern = ProgressPattern::new(Some(DEFAULT_PROGRESS_REGEX)).unwrap();
        assert_eq!(pattern.extract_progress(b"[download] 1.2.3% done"), None);
    }

    #[test]
    fn no_pattern_means_no_progress() {
        let pattern = ProgressPattern::new(None).unwrap();
        assert_eq!(pattern.extract_progress(b"[download]  45.7%"), None);
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(ProgressPattern::new(Some("([0-9")).is_err());
    }
}
