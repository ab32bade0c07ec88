//! A tool for executing commands.

use crate::error::{Error, Result};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Represents a command executor.
///
/// # Example
///
/// ```rust,no_run
/// # use vidl_host::executor::Executor;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let runtime = tokio::runtime::Runtime::new()?;
/// let _guard = runtime.enter();
///
/// let executor = Executor::parse(r#"youtube-dl --newline "https://example.com/watch?v=1""#)?;
/// let child = executor.spawn()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Executor {
    /// The path to the command executable.
    pub executable_path: PathBuf,

    /// The arguments to pass to the command.
    pub args: Vec<String>,
}

impl Executor {
    /// Builds an executor from a full command line.
    ///
    /// The first token is the executable, the rest are its arguments.
    ///
    /// # Errors
    ///
    /// This function will return an error if the command line holds no token.
    pub fn parse(command: &str) -> Result<Self> {
        let mut tokens = split_command_line(command).into_iter();
        let executable = tokens
            .next()
            .ok_or_else(|| Error::Command("Empty command line".to_string()))?;

        Ok(Self {
            executable_path: PathBuf::from(executable),
            args: tokens.collect(),
        })
    }

    /// Spawns the command with stdout and stderr piped.
    ///
    /// Must be called from within a tokio runtime context.
    ///
    /// # Errors
    ///
    /// This function will return an error if the command could not be started.
    pub fn spawn(&self) -> Result<tokio::process::Child> {
        log::debug!("Executing command: {:?}", self);

        let mut command = tokio::process::Command::new(&self.executable_path);
        command.stdin(std::process::Stdio::null());
        command.stdout(std::process::Stdio::piped());
        command.stderr(std::process::Stdio::piped());
        command.kill_on_drop(true);

        #[cfg(target_os = "windows")]
        {
            command.creation_flags(0x08000000);
        }

        command.args(&self.args);
        let child = command.spawn()?;

        Ok(child)
    }
}

/// Splits a command line on whitespace.
///
/// Double-quoted spans are kept in one token and lose their quotes; `\"`
/// inside a quoted span is a literal quote. Backslashes are otherwise kept,
/// so Windows paths survive untouched.
pub fn split_command_line(command: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;
    let mut chars = command.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            '\\' if quoted && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        tokens.push(current);
    }

    tokens
}

/// Reads `reader` until EOF, calling `on_line` with each raw line.
///
/// The trailing `\n` (and `\r` before it) is removed. A final line without a
/// newline is still delivered.
pub async fn pump_lines<R, F>(reader: R, mut on_line: F) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    F: FnMut(&[u8]),
{
    let mut reader = BufReader::new(reader);
    let mut buffer = Vec::new();

    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer).await? == 0 {
            return Ok(());
        }

        let mut line = buffer.as_slice();
        if let Some(stripped) = line.strip_suffix(b"\n") {
            line = stripped;
        }
        if let Some(stripped) = line.strip_suffix(b"\r") {
            line = stripped;
        }

        on_line(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_plain_and_quoted_tokens() {
        let tokens = split_command_line(r#"youtube-dl --newline -o "C:\My Videos" "https://x.y/z""#);
        assert_eq!(
            tokens,
            vec!["youtube-dl", "--newline", "-o", r"C:\My Videos", "https://x.y/z"]
        );
    }

    #[test]
    fn keeps_empty_quoted_token() {
        assert_eq!(split_command_line(r#"a "" b"#), vec!["a", "", "b"]);
    }

    #[test]
    fn unescapes_quotes_inside_quoted_span() {
        assert_eq!(split_command_line(r#""say \"hi\"""#), vec![r#"say "hi""#]);
    }

    #[test]
    fn empty_command_line_is_an_error() {
        assert!(matches!(Executor::parse("   "), Err(Error::Command(_))));
    }

    #[test]
    fn parse_separates_executable_from_args() {
        let executor = Executor::parse("youtube-dl --newline url").unwrap();
        assert_eq!(executor.executable_path, PathBuf::from("youtube-dl"));
        assert_eq!(executor.args, vec!["--newline", "url"]);
    }

    #[test]
    fn pump_lines_strips_line_endings() {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let mut lines = Vec::new();
        runtime
            .block_on(pump_lines(&b"one\r\ntwo\nthree"[..], |line| {
                lines.push(String::from_utf8_lossy(line).into_owned())
            }))
            .unwrap();
        assert_eq!(lines, vec!["one", "two", "three"]);
    }
}
