//! The handle used to drive the host window from any thread.

use eframe::egui::{Context, ViewportCommand};

/// A window that can be retitled, closed and repainted.
///
/// Implementations must be callable from the worker threads that pump the
/// child process output.
pub trait Window: Send + Sync {
    /// Sets the window title.
    fn set_title(&self, title: &str);

    /// Closes the window.
    fn close(&self) {}

    /// Asks for the window to be redrawn.
    fn request_repaint(&self) {}
}

impl Window for Context {
    fn set_title(&self, title: &str) {
        self.send_viewport_cmd(ViewportCommand::Title(title.to_string()));
        Context::request_repaint(self);
    }

    fn close(&self) {
        self.send_viewport_cmd(ViewportCommand::Close);
    }

    fn request_repaint(&self) {
        Context::request_repaint(self);
    }
}
