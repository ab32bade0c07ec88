//! The shared reference to the host window.

use std::fmt;
use std::sync::{Arc, OnceLock};
use vidl_host::Window;

/// A reference to the host window, empty until the host is constructed.
///
/// Clones share the same slot.
#[derive(Clone, Default)]
pub struct HostRef {
    window: Arc<OnceLock<Arc<dyn Window>>>,
}

impl HostRef {
    /// Records `window` as the host. Only the first capture is kept.
    pub fn capture(&self, window: Arc<dyn Window>) {
        if self.window.set(window).is_err() {
            log::warn!("Host window already captured, ignoring");
        }
    }

    /// Returns true once the host has been captured.
    pub fn is_set(&self) -> bool {
        self.window.get().is_some()
    }

    /// Sets the host window title. Does nothing before the host exists.
    pub fn set_title(&self, title: &str) {
        if let Some(window) = self.window.get() {
            log::debug!("Setting window title to {:?}", title);
            window.set_title(title);
        }
    }
}

impl fmt::Debug for HostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostRef").field("set", &self.is_set()).finish()
    }
}
