//! The wrappers installed over the host's extension points.
//!
//! Each wrapper holds the object it replaced and calls through to it, so the
//! host's own behaviour always runs.

use super::accelerators::AcceleratorRegistry;
use super::host::HostRef;
use super::listeners::ListenerRegistry;
use super::transformers::TransformerRegistry;
use std::sync::Arc;
use vidl_host::{Application, Construct, Dispatch, ExtractProgress, Launcher};

/// Replaces the object at `point` with `replacement(original)`.
pub fn patch<T: ?Sized>(point: &mut Arc<T>, replacement: impl FnOnce(Arc<T>) -> Arc<T>) {
    let original = point.clone();
    *point = replacement(original);
}

/// Construction: captures the host, then installs the accelerators.
pub struct InstallAccelerators {
    pub original: Arc<dyn Construct>,
    pub host: HostRef,
    pub accelerators: Arc<AcceleratorRegistry>,
}

impl Construct for InstallAccelerators {
    fn construct(&self, app: &mut Application) {
        // The host must be reachable before the original construction runs.
        self.host.capture(app.window());
        self.original.construct(app);

        app.set_accelerator_table(self.accelerators.table());
        let accelerators = self.accelerators.clone();
        app.bind_menu(move |app, event| accelerators.handle(app, event));

        log::debug!("{} accelerators installed", self.accelerators.len());
    }
}

/// Dispatch: rewrites flag values before launching.
pub struct TransformArgs {
    pub original: Arc<dyn Dispatch>,
    pub transformers: Arc<TransformerRegistry>,
}

impl Dispatch for TransformArgs {
    fn run(&self, command: &str, launcher: &Launcher) -> vidl_host::Result<()> {
        let command = self.transformers.rewrite(command);
        log::debug!("Dispatching: {}", command);
        self.original.run(&command, launcher)
    }
}

/// Output processing: notifies the listeners, then extracts progress.
pub struct NotifyListeners {
    pub original: Arc<dyn ExtractProgress>,
    pub listeners: Arc<ListenerRegistry>,
}

impl ExtractProgress for NotifyListeners {
    fn extract_progress(&self, raw: &[u8]) -> Option<u8> {
        let text = String::from_utf8_lossy(raw);
        self.listeners.notify_all(&text);
        self.original.extract_progress(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_keeps_the_original_reachable() {
        trait Greet {
            fn greet(&self) -> String;
        }
        struct Plain;
        impl Greet for Plain {
            fn greet(&self) -> String {
                "hello".to_string()
            }
        }
        struct Loud(Arc<dyn Greet>);
        impl Greet for Loud {
            fn greet(&self) -> String {
                format!("{}!", self.0.greet())
            }
        }

        let mut point: Arc<dyn Greet> = Arc::new(Plain);
        patch(&mut point, |original| Arc::new(Loud(original)));
        patch(&mut point, |original| Arc::new(Loud(original)));

        assert_eq!(point.greet(), "hello!!");
    }

    #[test]
    fn listeners_see_decoded_text_and_progress_is_kept() {
        struct Fixed;
        impl ExtractProgress for Fixed {
            fn extract_progress(&self, _raw: &[u8]) -> Option<u8> {
                Some(42)
            }
        }

        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut listeners = ListenerRegistry::default();
        let sink = seen.clone();
        listeners.register(move |line| sink.lock().unwrap().push(line.to_string()));

        let hook = NotifyListeners {
            original: Arc::new(Fixed),
            listeners: Arc::new(listeners),
        };

        assert_eq!(hook.extract_progress("[download] é\u{fffd}".as_bytes()), Some(42));
        assert_eq!(hook.extract_progress(b"bad \xff byte"), Some(42));
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["[download] é\u{fffd}".to_string(), "bad \u{fffd} byte".to_string()]
        );
    }
}
