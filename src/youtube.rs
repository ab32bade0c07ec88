use crate::config::Settings;
use crate::error::Result;
use crate::extensions::{Extensions, HostRef};
use vidl_host::{Field, FieldWidget, Form, Modifiers, keys};

/// The youtube-dl line announcing the file being written.
pub const DESTINATION_PREFIX: &str = "[download] Destination: ";

/// Builds youtube-dl's `--output` template from the directory picked in the form.
pub fn transform_output_arg(dir: &str) -> String {
    let dir = dir.trim_matches('"');
    format!(r"{}\%(title)s.%(ext)s", dir)
}

/// Sets the window title to the name of the video youtube-dl is writing.
pub fn set_window_title_to_video_name(host: &HostRef, text: &str) {
    if let Some(path) = text.strip_prefix(DESTINATION_PREFIX) {
        host.set_title(file_stem(path));
    }
}

/// Returns the file name of `path` without its extension.
///
/// Both `/` and `\` separate components, whatever the platform, since the
/// path comes from the child process's output.
pub fn file_stem(path: &str) -> &str {
    let name = path
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    match name.rfind('.') {
        Some(0) | None => name,
        Some(dot) => &name[..dot],
    }
}

/// Returns the text to prefill the URL with: the clipboard, if it holds a URL.
pub fn seed_url(clipboard: Option<String>) -> String {
    clipboard
        .filter(|text| text.starts_with("http"))
        .unwrap_or_default()
}

/// Reads the system clipboard.
pub fn clipboard_text() -> Option<String> {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
        Ok(text) => Some(text),
        Err(e) => {
            log::debug!("No clipboard text: {}", e);
            None
        }
    }
}

/// The download form: the video URL and the destination directory.
pub fn form(url: impl Into<String>, output_dir: impl Into<String>) -> Form {
    Form::new("Download videos using youtube-dl")
        .field(
            Field::positional("video URL")
                .metavar("Video URL")
                .help("URL for the video to download")
                .default_value(url),
        )
        .field(
            Field::optional(["-o", "--output"])
                .metavar("Download Directory")
                .help("Directory where the video is to be downloaded")
                .default_value(output_dir)
                .widget(FieldWidget::DirChooser),
        )
}

/// Registers the output template, the window retitling and the footer shortcuts.
pub fn register_extensions(extensions: &mut Extensions) -> Result<()> {
    extensions.transformers.register("-o", transform_output_arg);
    extensions.transformers.register("--output", transform_output_arg);

    let host = extensions.host();
    extensions
        .listeners
        .register(move |text| set_window_title_to_video_name(&host, text));

    extensions.accelerators.register("start", Modifiers::NORMAL, keys::RETURN)?;
    extensions.accelerators.register("stop", Modifiers::NORMAL, keys::ascii('S'))?;
    extensions.accelerators.register("close", Modifiers::NORMAL, keys::ESCAPE)?;
    extensions.accelerators.register("edit", Modifiers::NORMAL, keys::ascii('E'))?;
    extensions.accelerators.register("restart", Modifiers::NORMAL, keys::ascii('R'))?;

    Ok(())
}

/// The form as configured by `settings`, with the URL seeded from the clipboard.
pub fn startup_form(settings: &Settings) -> Form {
    form(seed_url(clipboard_text()), settings.default_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use vidl_host::Window;

    #[derive(Default)]
    struct Titles(Mutex<Vec<String>>);

    impl Window for Titles {
        fn set_title(&self, title: &str) {
            self.0.lock().unwrap().push(title.to_string());
        }
    }

    #[test]
    fn output_arg_appends_the_template() {
        assert_eq!(
            transform_output_arg(r"C:\Users\me\Downloads"),
            r"C:\Users\me\Downloads\%(title)s.%(ext)s"
        );
    }

    #[test]
    fn output_arg_strips_quotes() {
        assert_eq!(
            transform_output_arg(r#""C:\quoted\""#),
            r"C:\quoted\\%(title)s.%(ext)s"
        );
    }

    #[test]
    fn destination_line_sets_the_title() {
        let host = HostRef::default();
        let window = Arc::new(Titles::default());
        host.capture(window.clone());

        set_window_title_to_video_name(&host, r"[download] Destination: C:\videos\MyClip.mp4");
        set_window_title_to_video_name(&host, "some other line");

        assert_eq!(*window.0.lock().unwrap(), vec!["MyClip".to_string()]);
    }

    #[test]
    fn destination_line_without_host_is_a_no_op() {
        set_window_title_to_video_name(&HostRef::default(), "[download] Destination: a.mp4");
    }

    #[test]
    fn stems() {
        assert_eq!(file_stem("/home/me/Videos/My.Clip.webm"), "My.Clip");
        assert_eq!(file_stem(r"C:\videos\MyClip.mp4"), "MyClip");
        assert_eq!(file_stem("noext"), "noext");
        assert_eq!(file_stem(".hidden"), ".hidden");
        assert_eq!(file_stem(r"C:\videos\"), "videos");
    }

    #[test]
    fn only_urls_seed_the_form() {
        assert_eq!(seed_url(Some("https://youtu.be/x".to_string())), "https://youtu.be/x");
        assert_eq!(seed_url(Some("not a url".to_string())), "");
        assert_eq!(seed_url(None), "");
    }

    #[test]
    fn registers_both_output_flags_and_five_accelerators() {
        let mut extensions = Extensions::new();
        register_extensions(&mut extensions).unwrap();

        assert!(extensions.transformers.lookup("-o").is_some());
        assert!(extensions.transformers.lookup("--output").is_some());
        assert_eq!(extensions.listeners.len(), 1);
        assert_eq!(extensions.accelerators.len(), 5);
    }

    #[test]
    fn form_builds_the_youtube_dl_command_line() {
        let form = form("https://youtu.be/x", r"C:\Downloads");
        assert_eq!(
            form.command_line("youtube-dl --newline", &form.defaults()),
            r#"youtube-dl --newline -o "C:\Downloads" "https://youtu.be/x""#
        );
    }
}
