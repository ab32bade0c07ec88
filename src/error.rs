//! The errors that can occur.

use thiserror::Error;

/// A type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// The possible errors that can occur.
#[derive(Debug, Error)]
pub enum Error {
    /// An accelerator was registered for a button the host does not have.
    #[error("Unknown button name: {button}")]
    Configuration { button: String },
    /// The host failed.
    #[error(transparent)]
    Host(#[from] vidl_host::Error),
    /// The settings file could not be parsed.
    #[error("Malformed settings file: {0}")]
    Settings(#[from] toml::de::Error),
    /// An error occurred while interacting with the file system.
    #[error("An IO error occurred: {0}")]
    IO(#[from] std::io::Error),
}
