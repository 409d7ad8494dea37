//! Keyboard mapping

use crate::sim::TickInput;

/// Game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Thrust,
    Brake,
    Fire,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Key> {
        match key {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Thrust),
            "ArrowDown" => Some(Key::Brake),
            " " => Some(Key::Fire),
            _ => None,
        }
    }
}

/// Apply a key press/release. Fire only triggers on press and is one-shot.
pub fn apply_key(input: &mut TickInput, key: Key, pressed: bool) {
    match key {
        Key::Left => input.left = pressed,
        Key::Right => input.right = pressed,
        Key::Thrust => input.thrust = pressed,
        Key::Brake => input.brake = pressed,
        Key::Fire => {
            if pressed {
                input.fire = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_keys() {
        assert_eq!(Key::from_dom("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_dom("ArrowRight"), Some(Key::Right));
        assert_eq!(Key::from_dom("ArrowUp"), Some(Key::Thrust));
        assert_eq!(Key::from_dom("ArrowDown"), Some(Key::Brake));
        assert_eq!(Key::from_dom(" "), Some(Key::Fire));
        assert_eq!(Key::from_dom("a"), None);
    }

    #[test]
    fn test_held_keys_follow_press_and_release() {
        let mut input = TickInput::default();
        apply_key(&mut input, Key::Left, true);
        apply_key(&mut input, Key::Thrust, true);
        assert!(input.left && input.thrust);
        apply_key(&mut input, Key::Left, false);
        assert!(!input.left);
        assert!(input.thrust);
    }

    #[test]
    fn test_fire_is_one_shot() {
        let mut input = TickInput::default();
        apply_key(&mut input, Key::Fire, true);
        assert!(input.fire);
        // Release doesn't cancel a pending shot
        apply_key(&mut input, Key::Fire, false);
        assert!(input.fire);
    }
}
