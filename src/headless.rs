//! Running a download in the terminal, without a window.

use crate::config::Settings;
use crate::error::Result;
use crate::extensions::Extensions;
use crate::youtube;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use vidl_host::{Hooks, ProcessController, ProcessEvent, Window};

/// A progress bar standing in for the window. Its message is the title.
struct TerminalWindow {
    bar: ProgressBar,
}

impl Window for TerminalWindow {
    fn set_title(&self, title: &str) {
        self.bar.set_message(title.to_string());
    }
}

/// Downloads `url` into `output_dir` (or the configured directory).
///
/// Returns the exit code of the downloader, 1 when it is unknown.
///
/// # Errors
///
/// This function will return an error if the extensions could not be
/// registered or the downloader could not be started.
pub fn download(
    settings: &Settings,
    url: &str,
    output_dir: Option<&str>,
    multi: &MultiProgress,
) -> Result<i32> {
    let mut extensions = Extensions::new();
    youtube::register_extensions(&mut extensions)?;
    let host = extensions.host();

    let config = settings.host_config();
    let mut hooks = Hooks::standard(&config)?;
    extensions.install(&mut hooks);

    let bar = multi.add(ProgressBar::new(100));
    bar.set_style(
        ProgressStyle::with_template("{msg:30!} [{bar:40.cyan/blue}] {pos:>3}% {elapsed_precise} ETA {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    bar.set_message(config.program_name.clone());

    let window = Arc::new(TerminalWindow { bar: bar.clone() });
    host.capture(window.clone());

    let (controller, events) = ProcessController::new(&hooks, &config, window)?;

    let output_dir = output_dir.map_or_else(|| settings.default_dir(), str::to_string);
    let form = youtube::form(url, output_dir);
    controller.run(&form.command_line(&config.target, &form.defaults()))?;

    for event in events.iter() {
        match event {
            ProcessEvent::Output(line) | ProcessEvent::Failed(line) => bar.println(line),
            ProcessEvent::Progress(progress) => bar.set_position(u64::from(progress)),
            ProcessEvent::Finished(code) => {
                if code == Some(0) {
                    bar.set_position(100);
                    bar.finish();
                } else {
                    bar.abandon();
                }
                return Ok(code.unwrap_or(1));
            }
        }
    }

    Ok(1)
}
