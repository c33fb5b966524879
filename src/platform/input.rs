//! Keyboard input adapter
//!
//! Key events arrive whenever the browser delivers them and only record state
//! here. The frame loop takes a `TickInput` snapshot once per tick.

use crate::sim::TickInput;

/// Logical action a key maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    /// Start / pause / resume
    Toggle,
    /// Restart after game over or win
    Restart,
}

impl Action {
    /// Whether the browser's default handling for this key should be suppressed
    pub fn suppress_default(&self) -> bool {
        matches!(self, Action::Toggle)
    }
}

/// Map a `KeyboardEvent.key` (or `.code`) value to an action
pub fn map_key(key: &str) -> Option<Action> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Action::Left),
        "ArrowRight" | "d" | "D" => Some(Action::Right),
        " " | "Space" | "Spacebar" => Some(Action::Toggle),
        "r" | "R" => Some(Action::Restart),
        _ => None,
    }
}

/// Held-key state plus latched one-shot triggers
#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    left_held: bool,
    right_held: bool,
    toggle_pending: bool,
    restart_pending: bool,
}

impl InputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Auto-repeat presses never re-trigger one-shot actions.
    ///
    /// Returns the mapped action so the host can decide on default suppression.
    pub fn key_down(&mut self, key: &str, repeat: bool) -> Option<Action> {
        let action = map_key(key)?;
        if !repeat || matches!(action, Action::Left | Action::Right) {
            self.press(action);
        }
        Some(action)
    }

    /// Hold a direction or latch a one-shot action
    pub fn press(&mut self, action: Action) {
        match action {
            Action::Left => self.left_held = true,
            Action::Right => self.right_held = true,
            Action::Toggle => self.toggle_pending = true,
            Action::Restart => self.restart_pending = true,
        }
    }

    pub fn key_up(&mut self, key: &str) -> Option<Action> {
        let action = map_key(key)?;
        match action {
            Action::Left => self.left_held = false,
            Action::Right => self.right_held = false,
            _ => {}
        }
        Some(action)
    }

    /// Release everything (e.g. window lost focus and key-ups will never arrive)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Current snapshot; one-shot triggers are consumed
    pub fn snapshot(&mut self) -> TickInput {
        TickInput {
            left: self.left_held,
            right: self.right_held,
            toggle: std::mem::take(&mut self.toggle_pending),
            restart: std::mem::take(&mut self.restart_pending),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(map_key("ArrowLeft"), Some(Action::Left));
        assert_eq!(map_key("a"), Some(Action::Left));
        assert_eq!(map_key("ArrowRight"), Some(Action::Right));
        assert_eq!(map_key("d"), Some(Action::Right));
        assert_eq!(map_key(" "), Some(Action::Toggle));
        assert_eq!(map_key("R"), Some(Action::Restart));
        assert_eq!(map_key("Escape"), None);
        assert_eq!(map_key("x"), None);
        assert!(Action::Toggle.suppress_default());
        assert!(!Action::Left.suppress_default());
    }

    #[test]
    fn test_held_keys_persist_across_snapshots() {
        let mut input = InputAdapter::new();
        input.key_down("ArrowLeft", false);
        assert!(input.snapshot().left);
        assert!(input.snapshot().left);

        // Letter and arrow share the same intent
        input.key_up("a");
        assert!(!input.snapshot().left);

        input.key_down("d", false);
        input.key_down("ArrowLeft", false);
        let snap = input.snapshot();
        assert!(snap.left && snap.right);
        assert_eq!(snap.direction(), 0.0);
    }

    #[test]
    fn test_one_shots_consumed_once() {
        let mut input = InputAdapter::new();
        input.key_down(" ", false);
        input.key_down("r", false);
        let snap = input.snapshot();
        assert!(snap.toggle && snap.restart);

        let snap = input.snapshot();
        assert!(!snap.toggle && !snap.restart);

        // Holding space auto-repeats without toggling again
        input.key_down(" ", true);
        assert!(!input.snapshot().toggle);

        input.press(Action::Toggle);
        assert!(input.snapshot().toggle);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut input = InputAdapter::new();
        assert_eq!(input.key_down("Shift", false), None);
        assert_eq!(input.key_up("Enter"), None);
        assert_eq!(input.snapshot(), TickInput::default());
    }

    #[test]
    fn test_release_all() {
        let mut input = InputAdapter::new();
        input.key_down("ArrowRight", false);
        input.key_down(" ", false);
        input.release_all();
        assert_eq!(input.snapshot(), TickInput::default());
    }
}
