//! A video downloader window on top of youtube-dl.
//!
//! The window itself is the [`vidl_host`] GUI host. This crate extends it:
//! the download directory becomes youtube-dl's `--output` template, the
//! window is retitled after the video being downloaded, and the footer
//! buttons get keyboard shortcuts.

use crate::config::Settings;
use crate::error::Result;
use crate::extensions::Extensions;
use vidl_host::Hooks;

pub mod config;
pub mod error;
pub mod extensions;
pub mod headless;
pub mod youtube;

/// Registers the extensions, installs them and runs the window until it is closed.
///
/// # Errors
///
/// This function will return an error if an extension could not be
/// registered or the window could not be created.
pub fn run(settings: &Settings) -> Result<()> {
    let mut extensions = Extensions::new();
    youtube::register_extensions(&mut extensions)?;

    let config = settings.host_config();
    let mut hooks = Hooks::standard(&config)?;
    extensions.install(&mut hooks);

    let form = youtube::startup_form(settings);
    vidl_host::run(config, form, hooks)?;
    Ok(())
}
