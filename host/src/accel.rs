//! Keyboard accelerators: modifier masks, key codes and control ids.

use std::sync::atomic::{AtomicI32, Ordering};

/// Highest id handed out by [`new_control_id`]. Ids then decrease.
pub const ID_AUTO_HIGHEST: i32 = -2000;

static NEXT_CONTROL_ID: AtomicI32 = AtomicI32::new(ID_AUTO_HIGHEST);

/// Allocates a control id that is unique for the life of the process.
pub fn new_control_id() -> i32 {
    NEXT_CONTROL_ID.fetch_sub(1, Ordering::Relaxed)
}

/// A modifier mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u8);

impl Modifiers {
    /// No modifier.
    pub const NORMAL: Modifiers = Modifiers(0);
    /// The Alt key.
    pub const ALT: Modifiers = Modifiers(1);
    /// The Ctrl key (Cmd on macOS).
    pub const CTRL: Modifiers = Modifiers(2);
    /// The Shift key.
    pub const SHIFT: Modifiers = Modifiers(4);

    /// Returns true if every modifier of `other` is set in `self`.
    pub fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if the modifiers held in `state` are exactly this mask.
    pub fn matches(self, state: eframe::egui::Modifiers) -> bool {
        self.contains(Modifiers::ALT) == state.alt
            && self.contains(Modifiers::CTRL) == state.command
            && self.contains(Modifiers::SHIFT) == state.shift
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

/// Key codes. Letters and digits use their (uppercase) ASCII code point.
pub mod keys {
    /// The Return / Enter key.
    pub const RETURN: i32 = 13;
    /// The Escape key.
    pub const ESCAPE: i32 = 27;
    /// The space bar.
    pub const SPACE: i32 = 32;

    /// Returns the key code of an ASCII letter or digit.
    pub const fn ascii(c: char) -> i32 {
        c.to_ascii_uppercase() as i32
    }
}

/// Maps a key code to the egui key it stands for.
pub fn egui_key(code: i32) -> Option<eframe::egui::Key> {
    use eframe::egui::Key;

    match code {
        keys::RETURN => Some(Key::Enter),
        keys::ESCAPE => Some(Key::Escape),
        keys::SPACE => Some(Key::Space),
        _ => {
            let c = char::from(u8::try_from(code).ok()?);
            if c.is_ascii_alphanumeric() {
                Key::from_name(&c.to_ascii_uppercase().to_string())
            } else {
                None
            }
        }
    }
}

/// One entry of an [`AcceleratorTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceleratorEntry {
    /// The modifier mask.
    pub modifiers: Modifiers,
    /// The key code.
    pub key: i32,
    /// The id reported when the combination is pressed.
    pub id: i32,
}

/// The key combinations a window reacts to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceleratorTable {
    entries: Vec<AcceleratorEntry>,
}

impl AcceleratorTable {
    /// Creates a table from `(modifiers, key, id)` triples.
    pub fn new(entries: impl IntoIterator<Item = (Modifiers, i32, i32)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(modifiers, key, id)| AcceleratorEntry { modifiers, key, id })
                .collect(),
        }
    }

    /// Returns the entries of the table.
    pub fn entries(&self) -> &[AcceleratorEntry] {
        &self.entries
    }

    /// Returns the ids whose combination was pressed this frame.
    pub fn pressed(&self, input: &eframe::egui::InputState) -> Vec<i32> {
        self.entries
            .iter()
            .filter(|entry| {
                egui_key(entry.key)
                    .is_some_and(|key| input.key_pressed(key) && entry.modifiers.matches(input.modifiers))
            })
            .map(|entry| entry.id)
            .collect()
    }
}

/// The event delivered to the menu handler when an accelerator fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEvent {
    id: i32,
}

impl MenuEvent {
    /// Creates an event for the given id.
    pub fn new(id: i32) -> Self {
        Self { id }
    }

    /// Returns the id of the accelerator that fired.
    pub fn id(&self) -> i32 {
        self.id
    }
}
