//! The footer buttons and when they are shown.

use std::fmt;

/// The phase the host window is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// The form is being filled in.
    #[default]
    Configuring,
    /// The child process is running.
    Running,
    /// The child process exited with code 0.
    Success,
    /// The child process failed, could not start or was stopped.
    Error,
}

/// A footer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Widget {
    StartButton,
    RestartButton,
    StopButton,
    CloseButton,
    CancelButton,
    EditButton,
}

impl Widget {
    /// All the footer buttons, in display order.
    pub const ALL: [Widget; 6] = [
        Widget::EditButton,
        Widget::CancelButton,
        Widget::StopButton,
        Widget::CloseButton,
        Widget::RestartButton,
        Widget::StartButton,
    ];

    /// Returns the widget name.
    pub fn name(self) -> &'static str {
        match self {
            Widget::StartButton => "start_button",
            Widget::RestartButton => "restart_button",
            Widget::StopButton => "stop_button",
            Widget::CloseButton => "close_button",
            Widget::CancelButton => "cancel_button",
            Widget::EditButton => "edit_button",
        }
    }

    /// Returns the button label.
    pub fn label(self) -> &'static str {
        match self {
            Widget::StartButton => "Start",
            Widget::RestartButton => "Restart",
            Widget::StopButton => "Stop",
            Widget::CloseButton => "Close",
            Widget::CancelButton => "Cancel",
            Widget::EditButton => "Edit",
        }
    }

    /// Returns true if the button is shown during `phase`.
    pub fn is_shown(self, phase: Phase) -> bool {
        match phase {
            Phase::Configuring => matches!(self, Widget::CancelButton | Widget::StartButton),
            Phase::Running => self == Widget::StopButton,
            Phase::Success | Phase::Error => matches!(
                self,
                Widget::EditButton | Widget::RestartButton | Widget::CloseButton
            ),
        }
    }
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_phase_shows_its_buttons() {
        let shown = |phase| {
            Widget::ALL
                .into_iter()
                .filter(|widget| widget.is_shown(phase))
                .collect::<Vec<_>>()
        };

        assert_eq!(shown(Phase::Configuring), vec![Widget::CancelButton, Widget::StartButton]);
        assert_eq!(shown(Phase::Running), vec![Widget::StopButton]);
        assert_eq!(
            shown(Phase::Success),
            vec![Widget::EditButton, Widget::CloseButton, Widget::RestartButton]
        );
        assert_eq!(shown(Phase::Error), shown(Phase::Success));
    }
}
