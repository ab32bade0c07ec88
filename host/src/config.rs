//! Host configuration.

/// The default progress pattern, matching youtube-dl's `--newline` output.
pub const DEFAULT_PROGRESS_REGEX: &str = r"^\[download\]\s+([0-9\.]+)*%";

/// How elapsed and remaining time are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingOptions {
    /// Show the estimated time remaining while running.
    pub show_time_remaining: bool,
    /// Hide the elapsed and remaining time once the run succeeded.
    pub hide_time_remaining_on_complete: bool,
}

impl Default for TimingOptions {
    fn default() -> Self {
        Self {
            show_time_remaining: true,
            hide_time_remaining_on_complete: true,
        }
    }
}

/// The configuration of the host window.
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    /// The window title shown at start.
    pub program_name: String,
    /// The command prefix of the child process.
    pub target: String,
    /// The pattern whose first group is the progress percentage.
    pub progress_regex: Option<String>,
    /// Do not echo lines carrying a progress value to the console.
    pub hide_progress_msg: bool,
    /// Time display options.
    pub timing: TimingOptions,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            program_name: "Video downloader".to_string(),
            target: "youtube-dl --newline".to_string(),
            progress_regex: Some(DEFAULT_PROGRESS_REGEX.to_string()),
            hide_progress_msg: true,
            timing: TimingOptions::default(),
        }
    }
}
