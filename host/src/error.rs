//! The errors that can occur.

use thiserror::Error;

/// A type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// The possible errors that can occur.
#[derive(Debug, Error)]
pub enum Error {
    /// An error occurred while running the runtime.
    #[error("An error occurred while running the runtime: {0}")]
    Runtime(#[from] tokio::task::JoinError),
    /// An error occurred while interacting with the file system or a child process.
    #[error("An IO error occurred: {0}")]
    IO(#[from] std::io::Error),
    /// The progress pattern could not be compiled.
    #[error("Invalid progress pattern: {0}")]
    Regex(#[from] regex::Error),

    /// An error occurred while running a command.
    #[error("Failed to execute command: {0}")]
    Command(String),
    /// A child process is already running.
    #[error("A process is already running")]
    Busy,
    /// The window could not be created or driven.
    #[error("GUI error: {0}")]
    Gui(String),
}

impl From<eframe::Error> for Error {
    fn from(error: eframe::Error) -> Self {
        Error::Gui(error.to_string())
    }
}
