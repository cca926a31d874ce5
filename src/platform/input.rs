//! Keyboard and pointer input
//!
//! Key events arrive one at a time; the controller wants "is left held right
//! now" once per tick. `KeyTracker` bridges the two.

use glam::Vec2;

use crate::sim::InputState;

/// One-shot commands a key press can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Enter / Space: press the visible button
    Confirm,
}

/// Held-key state built from keydown/keyup events
#[derive(Debug, Clone, Default)]
pub struct KeyTracker {
    state: InputState,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keydown. Returns a command for keys that trigger one.
    /// `key` is a `KeyboardEvent.key` value.
    pub fn key_down(&mut self, key: &str) -> Option<KeyCommand> {
        match key {
            " " | "Enter" => Some(KeyCommand::Confirm),
            _ => {
                self.set(key, true);
                None
            }
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.set(key, false);
    }

    /// Focus lost: keyup events won't arrive, so forget everything held
    pub fn release_all(&mut self) {
        self.state = InputState::default();
    }

    pub fn state(&self) -> InputState {
        self.state
    }

    /// True if `key` is one of the tracked arrows (callers suppress scrolling)
    pub fn is_arrow(key: &str) -> bool {
        matches!(key, "ArrowLeft" | "ArrowRight" | "ArrowUp" | "ArrowDown")
    }

    fn set(&mut self, key: &str, held: bool) {
        match key {
            "ArrowLeft" => self.state.left = held,
            "ArrowRight" => self.state.right = held,
            "ArrowUp" => self.state.up = held,
            "ArrowDown" => self.state.down = held,
            _ => {}
        }
    }
}

/// Map a point on a canvas drawn at `client_size` CSS pixels into world
/// coordinates of a `world_size` playfield stretched to fill it
pub fn to_world(client_pos: Vec2, client_size: Vec2, world_size: Vec2) -> Vec2 {
    if client_size.x <= 0.0 || client_size.y <= 0.0 {
        return client_pos;
    }
    client_pos * world_size / client_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_tracked_until_released() {
        let mut keys = KeyTracker::new();
        keys.key_down("ArrowLeft");
        keys.key_down("ArrowUp");
        assert_eq!(
            keys.state(),
            InputState {
                left: true,
                up: true,
                ..Default::default()
            }
        );

        keys.key_up("ArrowLeft");
        assert!(!keys.state().left);
        assert!(keys.state().up);
    }

    #[test]
    fn test_confirm_keys() {
        let mut keys = KeyTracker::new();
        assert_eq!(keys.key_down("Enter"), Some(KeyCommand::Confirm));
        assert_eq!(keys.key_down(" "), Some(KeyCommand::Confirm));
        assert_eq!(keys.key_down("ArrowRight"), None);
        assert_eq!(keys.key_down("q"), None);
        assert_eq!(
            keys.state(),
            InputState {
                right: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_release_all_on_blur() {
        let mut keys = KeyTracker::new();
        keys.key_down("ArrowRight");
        keys.key_down("ArrowDown");
        keys.release_all();
        assert_eq!(keys.state(), InputState::default());
    }

    #[test]
    fn test_to_world_scales() {
        let world = Vec2::new(1200.0, 650.0);
        let client = Vec2::new(600.0, 325.0);
        assert_eq!(to_world(Vec2::new(300.0, 162.5), client, world), Vec2::new(600.0, 325.0));
        assert_eq!(to_world(Vec2::new(5.0, 5.0), Vec2::ZERO, world), Vec2::new(5.0, 5.0));
    }
}
