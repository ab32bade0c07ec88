//! Listeners of the child process output.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Called with every output line of the child process.
pub type Listener = Box<dyn Fn(&str) + Send + Sync>;

/// The registered listeners, in registration order.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<Listener>,
}

impl ListenerRegistry {
    /// Appends `listener`.
    pub fn register(&mut self, listener: impl Fn(&str) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Returns the number of listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns true if no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Calls every listener with `text`, in registration order.
    ///
    /// A listener that panics is logged and skipped; the others still run.
    pub fn notify_all(&self, text: &str) {
        for (index, listener) in self.listeners.iter().enumerate() {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| listener(text))) {
                log::error!("Output listener #{} panicked: {}", index, panic_message(&*payload));
            }
        }
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn listeners_run_in_registration_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ListenerRegistry::default();
        for name in ["A", "B", "C"] {
            let calls = calls.clone();
            registry.register(move |line| calls.lock().unwrap().push(format!("{name}:{line}")));
        }

        registry.notify_all("one");
        registry.notify_all("two");

        assert_eq!(
            *calls.lock().unwrap(),
            vec!["A:one", "B:one", "C:one", "A:two", "B:two", "C:two"]
        );
    }

    #[test]
    fn panicking_listener_does_not_stop_the_others() {
        let calls = Arc::new(Mutex::new(0));
        let mut registry = ListenerRegistry::default();
        registry.register(|_| panic!("listener failure"));
        let counter = calls.clone();
        registry.register(move |_| *counter.lock().unwrap() += 1);

        registry.notify_all("line");

        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut registry = ListenerRegistry::default();
        registry.register(|_| {});
        registry.register(|_| {});
        assert_eq!(registry.len(), 2);
    }
}
