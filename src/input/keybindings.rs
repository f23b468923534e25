//! Serializable keyboard binding table.
//!
//! Key strings use the `winit::keyboard::KeyCode` debug format
//! (`"KeyB"`, `"Digit1"`, `"Escape"`). Actions serialize as
//! `snake_case` strings so a TOML rendering stays readable:
//!
//! ```toml
//! [bindings]
//! toggle_base = "KeyB"
//! quit = "Escape"
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::controller::Mode;

/// Discrete actions that can be bound to keys. Directional input is not
/// bindable — arrow keys feed the controller's direction latch directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorAction {
    /// Toggle base-translation mode.
    ToggleBase,
    /// Toggle turntable-rotation mode.
    ToggleTop,
    /// Toggle lower-arm mode.
    ToggleArm1,
    /// Toggle upper-arm mode.
    ToggleArm2,
    /// Toggle pen mode.
    TogglePen,
    /// Toggle camera-orbit mode.
    ToggleCamera,
    /// Quit the editor.
    Quit,
}

impl EditorAction {
    /// The mode this action toggles, or `None` for `Quit`.
    #[must_use]
    pub const fn mode(self) -> Option<Mode> {
        match self {
            Self::ToggleBase => Some(Mode::Base),
            Self::ToggleTop => Some(Mode::Top),
            Self::ToggleArm1 => Some(Mode::Arm1),
            Self::ToggleArm2 => Some(Mode::Arm2),
            Self::TogglePen => Some(Mode::Pen),
            Self::ToggleCamera => Some(Mode::Camera),
            Self::Quit => None,
        }
    }
}

/// Action → key-string map with a reverse lookup cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    /// Maps action → key string (e.g. `ToggleBase` → `"KeyB"`).
    pub bindings: HashMap<EditorAction, String>,
    /// Reverse lookup cache (key string → action). Rebuilt on load.
    #[serde(skip)]
    key_to_action: HashMap<String, EditorAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            (EditorAction::ToggleBase, "KeyB".into()),
            (EditorAction::ToggleTop, "KeyT".into()),
            (EditorAction::ToggleArm1, "Digit1".into()),
            (EditorAction::ToggleArm2, "Digit2".into()),
            (EditorAction::TogglePen, "KeyP".into()),
            (EditorAction::ToggleCamera, "KeyC".into()),
            (EditorAction::Quit, "Escape".into()),
        ]);

        let mut out = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        out.rebuild_reverse_map();
        out
    }
}

impl KeyBindings {
    /// Rebuild the reverse lookup map (key string → action).
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for (action, key) in &self.bindings {
            let _ = self.key_to_action.insert(key.clone(), *action);
        }
    }

    /// Look up the action for a physical key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<EditorAction> {
        self.key_to_action.get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_cover_every_mode() {
        let kb = KeyBindings::default();
        assert_eq!(kb.lookup("KeyB"), Some(EditorAction::ToggleBase));
        assert_eq!(kb.lookup("KeyC"), Some(EditorAction::ToggleCamera));
        assert_eq!(kb.lookup("Digit1"), Some(EditorAction::ToggleArm1));
        assert_eq!(kb.lookup("Escape"), Some(EditorAction::Quit));
        assert_eq!(kb.lookup("KeyZ"), None);
    }

    #[test]
    fn actions_map_to_modes() {
        assert_eq!(EditorAction::ToggleArm2.mode(), Some(Mode::Arm2));
        assert_eq!(EditorAction::Quit.mode(), None);
    }

    #[test]
    fn toml_round_trip_rebuilds_lookup() {
        let kb = KeyBindings::default();
        let text = toml::to_string(&kb).expect("serialize");
        let mut parsed: KeyBindings =
            toml::from_str(&text).expect("deserialize");
        parsed.rebuild_reverse_map();
        assert_eq!(parsed.bindings, kb.bindings);
        assert_eq!(parsed.lookup("KeyP"), Some(EditorAction::TogglePen));
    }
}
