//! Extensions to the host window.
//!
//! The host exposes three extension points (construction, command dispatch
//! and output processing). [`Extensions`] gathers what the application wants
//! to add at each point, then [`Extensions::install`] wraps the host's
//! objects so the additions run before the host's own behaviour.
//!
//! Everything is registered once, at startup, before the window opens.
//! Installing freezes the registries.

pub mod accelerators;
pub mod host;
pub mod installer;
pub mod listeners;
pub mod transformers;

pub use accelerators::{Accelerator, AcceleratorRegistry, Button};
pub use host::HostRef;
pub use installer::{InstallAccelerators, NotifyListeners, TransformArgs, patch};
pub use listeners::ListenerRegistry;
pub use transformers::TransformerRegistry;

use std::sync::Arc;
use vidl_host::Hooks;

/// Everything the application adds to the host.
#[derive(Debug, Default)]
pub struct Extensions {
    /// Keyboard accelerators for the footer buttons.
    pub accelerators: AcceleratorRegistry,
    /// Command-line value rewriters.
    pub transformers: TransformerRegistry,
    /// Output line listeners.
    pub listeners: ListenerRegistry,
    host: HostRef,
}

impl Extensions {
    /// Creates empty registries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the reference to the host window, set once it is constructed.
    pub fn host(&self) -> HostRef {
        self.host.clone()
    }

    /// Wraps the three extension points of `hooks`.
    pub fn install(self, hooks: &mut Hooks) {
        log::info!(
            "Installing {} accelerators, {:?} transformers and {} listeners",
            self.accelerators.len(),
            self.transformers,
            self.listeners.len()
        );

        let accelerators = Arc::new(self.accelerators);
        let transformers = Arc::new(self.transformers);
        let listeners = Arc::new(self.listeners);
        let host = self.host;

        patch(&mut hooks.construct, |original| {
            Arc::new(InstallAccelerators {
                original,
                host,
                accelerators,
            })
        });
        patch(&mut hooks.dispatch, |original| {
            Arc::new(TransformArgs {
                original,
                transformers,
            })
        });
        patch(&mut hooks.extract, |original| {
            Arc::new(NotifyListeners { original, listeners })
        });
    }
}
