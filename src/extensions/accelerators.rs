//! Keyboard accelerators for the host's footer buttons.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use vidl_host::{AcceleratorTable, Action, Application, MenuEvent, Modifiers, Widget};

/// A footer button an accelerator can press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Start,
    Restart,
    Stop,
    Close,
    Cancel,
    Edit,
}

impl Button {
    /// Returns the host action the button runs and the widget it lives in.
    pub fn binding(self) -> (Action, Widget) {
        match self {
            Button::Start => (Application::on_start as Action, Widget::StartButton),
            Button::Restart => (Application::on_start as Action, Widget::RestartButton),
            Button::Stop => (Application::on_stop_execution as Action, Widget::StopButton),
            Button::Close => (Application::on_close as Action, Widget::CloseButton),
            Button::Cancel => (Application::on_cancel as Action, Widget::CancelButton),
            Button::Edit => (Application::on_edit as Action, Widget::EditButton),
        }
    }

    /// Returns the logical name of the button.
    pub fn name(self) -> &'static str {
        match self {
            Button::Start => "start",
            Button::Restart => "restart",
            Button::Stop => "stop",
            Button::Close => "close",
            Button::Cancel => "cancel",
            Button::Edit => "edit",
        }
    }
}

impl FromStr for Button {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "start" => Ok(Button::Start),
            "restart" => Ok(Button::Restart),
            "stop" => Ok(Button::Stop),
            "close" => Ok(Button::Close),
            "cancel" => Ok(Button::Cancel),
            "edit" => Ok(Button::Edit),
            _ => Err(Error::Configuration {
                button: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A key combination bound to a footer button.
#[derive(Clone, Copy)]
pub struct Accelerator {
    pub button: Button,
    pub modifiers: Modifiers,
    pub key: i32,
    pub action: Action,
    pub widget: Widget,
}

impl fmt::Debug for Accelerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accelerator")
            .field("button", &self.button)
            .field("modifiers", &self.modifiers)
            .field("key", &self.key)
            .field("widget", &self.widget)
            .finish_non_exhaustive()
    }
}

/// The registered accelerators, by control id.
#[derive(Debug, Default)]
pub struct AcceleratorRegistry {
    accelerators: BTreeMap<i32, Accelerator>,
}

impl AcceleratorRegistry {
    /// Binds `modifiers` + `key` to the button called `button`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `button` is not one of `start`,
    /// `restart`, `stop`, `close`, `cancel` or `edit`. Nothing is registered
    /// in that case.
    pub fn register(&mut self, button: &str, modifiers: Modifiers, key: i32) -> Result<()> {
        let button = button.parse::<Button>()?;
        let (action, widget) = button.binding();
        let id = vidl_host::new_control_id();

        log::debug!("Accelerator {} bound to key {} (modifiers {:?}) as id {}", button, key, modifiers, id);

        self.accelerators.insert(
            id,
            Accelerator {
                button,
                modifiers,
                key,
                action,
                widget,
            },
        );
        Ok(())
    }

    /// Returns the accelerator registered under `id`.
    pub fn lookup(&self, id: i32) -> Option<&Accelerator> {
        self.accelerators.get(&id)
    }

    /// Iterates over `(id, accelerator)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &Accelerator)> {
        self.accelerators.iter().map(|(id, accelerator)| (*id, accelerator))
    }

    /// Returns the number of accelerators.
    pub fn len(&self) -> usize {
        self.accelerators.len()
    }

    /// Returns true if no accelerator is registered.
    pub fn is_empty(&self) -> bool {
        self.accelerators.is_empty()
    }

    /// Builds the table the host window reacts to.
    pub fn table(&self) -> AcceleratorTable {
        AcceleratorTable::new(
            self.iter()
                .map(|(id, accelerator)| (accelerator.modifiers, accelerator.key, id)),
        )
    }

    /// Runs the action of the accelerator that fired, if its button is shown.
    pub fn handle(&self, app: &mut Application, event: MenuEvent) {
        let Some(accelerator) = self.lookup(event.id()) else {
            log::warn!("No accelerator registered under id {}", event.id());
            return;
        };

        if app.is_shown(accelerator.widget) {
            log::debug!("Accelerator for {} fired", accelerator.button);
            (accelerator.action)(app);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidl_host::keys;

    #[test]
    fn unknown_button_is_a_configuration_error() {
        let mut registry = AcceleratorRegistry::default();
        let error = registry.register("bogus", Modifiers::NORMAL, keys::RETURN).unwrap_err();

        assert!(matches!(error, Error::Configuration { ref button } if button == "bogus"));
        assert_eq!(error.to_string(), "Unknown button name: bogus");
        assert!(registry.is_empty());
    }

    #[test]
    fn buttons_get_distinct_ids() {
        let mut registry = AcceleratorRegistry::default();
        registry.register("start", Modifiers::NORMAL, keys::RETURN).unwrap();
        registry.register("stop", Modifiers::NORMAL, keys::ascii('S')).unwrap();

        let ids: Vec<i32> = registry.iter().map(|(id, _)| id).collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn resolves_button_bindings() {
        let mut registry = AcceleratorRegistry::default();
        registry.register("restart", Modifiers::CTRL, keys::ascii('R')).unwrap();

        let (id, accelerator) = registry.iter().next().unwrap();
        assert_eq!(accelerator.button, Button::Restart);
        assert_eq!(accelerator.widget, Widget::RestartButton);
        assert_eq!(registry.lookup(id).map(|a| a.key), Some('R' as i32));
        assert!(registry.lookup(id + 1_000_000).is_none());
    }

    #[test]
    fn table_lists_every_accelerator() {
        let mut registry = AcceleratorRegistry::default();
        registry.register("close", Modifiers::NORMAL, keys::ESCAPE).unwrap();
        registry.register("edit", Modifiers::NORMAL, keys::ascii('E')).unwrap();

        let table = registry.table();
        assert_eq!(table.entries().len(), 2);
        for entry in table.entries() {
            assert_eq!(registry.lookup(entry.id).map(|a| a.key), Some(entry.key));
        }
    }

    #[test]
    fn parses_every_button_name() {
        for name in ["start", "restart", "stop", "close", "cancel", "edit"] {
            assert_eq!(name.parse::<Button>().unwrap().name(), name);
        }
    }
}
