//! Runs the child process and streams its output back to the window.

use crate::config::HostConfig;
use crate::error::{Error, Result};
use crate::executor::{self, Executor};
use crate::hooks::{Dispatch, ExtractProgress, Hooks};
use crate::window::Window;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::process::Child;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;

/// What the child process reports back.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    /// A line to show in the console.
    Output(String),
    /// A progress percentage.
    Progress(u8),
    /// The process exited. `None` when it was killed or the code is unknown.
    Finished(Option<i32>),
    /// The process could not be waited for.
    Failed(String),
}

/// How long the output readers may keep draining once the process is gone.
///
/// A grandchild that inherited the pipes can hold them open long after the
/// process itself exited or was killed.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Where each output line goes: through the progress hook, then to the window.
#[derive(Clone)]
struct OutputSink {
    extract: Arc<dyn ExtractProgress>,
    events: Sender<ProcessEvent>,
    window: Arc<dyn Window>,
    hide_progress_msg: bool,
}

impl OutputSink {
    fn line(&self, raw: &[u8]) {
        let progress = self.extract.extract_progress(raw);
        if let Some(progress) = progress {
            let _ = self.events.send(ProcessEvent::Progress(progress));
        }
        if !(self.hide_progress_msg && progress.is_some()) {
            let text = String::from_utf8_lossy(raw).into_owned();
            let _ = self.events.send(ProcessEvent::Output(text));
        }
        self.window.request_repaint();
    }

    fn send(&self, event: ProcessEvent) {
        let _ = self.events.send(event);
        self.window.request_repaint();
    }
}

/// Spawns child processes and pumps their output.
pub struct Launcher {
    runtime: Runtime,
    sink: OutputSink,
    stop: Mutex<Option<oneshot::Sender<()>>>,
    running: Arc<AtomicBool>,
}

impl Launcher {
    /// Spawns `command` and starts pumping its stdout and stderr.
    ///
    /// Every line goes through the installed [`ExtractProgress`]; the exit is
    /// reported as [`ProcessEvent::Finished`] once both streams are drained.
    ///
    /// # Errors
    ///
    /// This function will return an error if a process is already running,
    /// if the command line is empty or if the process could not be started.
    pub fn launch(&self, command: &str) -> Result<()> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(Error::Busy);
        }

        let child = Executor::parse(command).and_then(|executor| {
            let _guard = self.runtime.enter();
            executor.spawn()
        });
        let child = match child {
            Ok(child) => child,
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                return Err(e);
            }
        };

        log::info!("Launched: {}", command);

        let (stop_tx, stop_rx) = oneshot::channel();
        *self.stop.lock().unwrap_or_else(PoisonError::into_inner) = Some(stop_tx);

        self.runtime.spawn(supervise(
            child,
            stop_rx,
            self.sink.clone(),
            self.running.clone(),
        ));

        Ok(())
    }

    /// Kills the running process. Returns false if nothing was running.
    pub fn stop(&self) -> bool {
        let stop = self.stop.lock().unwrap_or_else(PoisonError::into_inner).take();
        match stop {
            Some(stop) if self.is_running() => stop.send(()).is_ok(),
            _ => false,
        }
    }

    /// Returns true while a process is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

async fn supervise(
    mut child: Child,
    stop: oneshot::Receiver<()>,
    sink: OutputSink,
    running: Arc<AtomicBool>,
) {
    let pumps: Vec<_> = [
        child.stdout.take().map(|stdout| {
            let sink = sink.clone();
            tokio::spawn(async move { executor::pump_lines(stdout, |line| sink.line(line)).await })
        }),
        child.stderr.take().map(|stderr| {
            let sink = sink.clone();
            tokio::spawn(async move { executor::pump_lines(stderr, |line| sink.line(line)).await })
        }),
    ]
    .into_iter()
    .flatten()
    .collect();

    let outcome = tokio::select! {
        status = child.wait() => Some(status),
        _ = stop => None,
    };

    let code = match outcome {
        Some(Ok(status)) => status.code(),
        Some(Err(e)) => {
            log::error!("Failed to wait for the process: {}", e);
            sink.send(ProcessEvent::Failed(e.to_string()));
            None
        }
        None => {
            log::info!("Stopping the process");
            if let Err(e) = child.kill().await {
                log::warn!("Failed to kill the process: {}", e);
            }
            None
        }
    };

    let deadline = tokio::time::Instant::now() + DRAIN_TIMEOUT;
    for mut pump in pumps {
        match tokio::time::timeout_at(deadline, &mut pump).await {
            Ok(Ok(Ok(()))) => {}
            Ok(Ok(Err(e))) => log::warn!("Failed to read process output: {}", e),
            Ok(Err(e)) => log::warn!("Output reader stopped: {}", Error::Runtime(e)),
            Err(_) => {
                log::warn!("Output still open after the process ended, closing it");
                pump.abort();
            }
        }
    }

    log::info!("Process finished with code {:?}", code);
    running.store(false, Ordering::SeqCst);
    sink.send(ProcessEvent::Finished(code));
}

/// Runs command lines through the installed [`Dispatch`].
pub struct ProcessController {
    dispatch: Arc<dyn Dispatch>,
    launcher: Launcher,
}

impl ProcessController {
    /// Creates a controller using the dispatch and progress points of `hooks`.
    ///
    /// Returns the controller and the receiving end of its events.
    ///
    /// # Errors
    ///
    /// This function will return an error if the runtime could not be built.
    pub fn new(
        hooks: &Hooks,
        config: &HostConfig,
        window: Arc<dyn Window>,
    ) -> Result<(Self, Receiver<ProcessEvent>)> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("vidl-host-process")
            .enable_all()
            .build()?;
        let (events, receiver) = mpsc::channel();

        let launcher = Launcher {
            runtime,
            sink: OutputSink {
                extract: hooks.extract.clone(),
                events,
                window,
                hide_progress_msg: config.hide_progress_msg,
            },
            stop: Mutex::new(None),
            running: Arc::new(AtomicBool::new(false)),
        };

        Ok((
            Self {
                dispatch: hooks.dispatch.clone(),
                launcher,
            },
            receiver,
        ))
    }

    /// Runs `command`.
    pub fn run(&self, command: &str) -> Result<()> {
        self.dispatch.run(command, &self.launcher)
    }

    /// Kills the running process, if any.
    pub fn stop(&self) -> bool {
        self.launcher.stop()
    }

    /// Returns true while a process is running.
    pub fn is_running(&self) -> bool {
        self.launcher.is_running()
    }
}
