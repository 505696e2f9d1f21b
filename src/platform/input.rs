//! Directional input capture
//!
//! Keyboard and touch each keep their own held flags; the simulation sees
//! the union. Opposite directions may be held together and cancel out in the
//! movement integration.

use crate::sim::TickInput;

/// A captured direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDir {
    Up,
    Down,
}

impl KeyDir {
    /// Map a `KeyboardEvent.key` value to a direction
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(KeyDir::Up),
            "ArrowDown" | "s" | "S" => Some(KeyDir::Down),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Held {
    up: bool,
    down: bool,
}

impl Held {
    fn set(&mut self, dir: KeyDir, pressed: bool) {
        match dir {
            KeyDir::Up => self.up = pressed,
            KeyDir::Down => self.down = pressed,
        }
    }
}

/// Live up/down intent, updated by events between frames
#[derive(Debug, Clone, Default)]
pub struct InputCapture {
    keyboard: Held,
    touch: Held,
}

impl InputCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press or release
    ///
    /// Returns true if the key is one we capture, in which case the caller
    /// should suppress the browser's default scrolling.
    pub fn key(&mut self, key: &str, pressed: bool) -> bool {
        match KeyDir::from_key(key) {
            Some(dir) => {
                self.keyboard.set(dir, pressed);
                true
            }
            None => false,
        }
    }

    /// Record an on-screen button press or release
    pub fn touch(&mut self, dir: KeyDir, pressed: bool) {
        self.touch.set(dir, pressed);
    }

    /// Release everything (focus lost, keyups will never arrive)
    pub fn clear(&mut self) {
        self.keyboard = Held::default();
        self.touch = Held::default();
    }

    /// Sample the current intent for a frame
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            up: self.keyboard.up || self.touch.up,
            down: self.keyboard.down || self.touch.down,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        for key in ["ArrowUp", "w", "W"] {
            assert_eq!(KeyDir::from_key(key), Some(KeyDir::Up));
        }
        for key in ["ArrowDown", "s", "S"] {
            assert_eq!(KeyDir::from_key(key), Some(KeyDir::Down));
        }
        assert_eq!(KeyDir::from_key("ArrowLeft"), None);
        assert_eq!(KeyDir::from_key(" "), None);
    }

    #[test]
    fn test_press_and_release() {
        let mut input = InputCapture::new();
        assert!(input.key("w", true));
        assert_eq!(input.tick_input(), TickInput { up: true, down: false });

        // Release via the other key bound to the same direction
        assert!(input.key("ArrowUp", false));
        assert_eq!(input.tick_input(), TickInput::default());
    }

    #[test]
    fn test_uncaptured_key_ignored() {
        let mut input = InputCapture::new();
        assert!(!input.key("Enter", true));
        assert_eq!(input.tick_input(), TickInput::default());
    }

    #[test]
    fn test_both_directions_held() {
        let mut input = InputCapture::new();
        input.key("W", true);
        input.key("S", true);
        assert_eq!(input.tick_input(), TickInput { up: true, down: true });
    }

    #[test]
    fn test_touch_combines_with_keyboard() {
        let mut input = InputCapture::new();
        input.touch(KeyDir::Down, true);
        input.key("ArrowDown", false);
        assert!(input.tick_input().down);

        input.touch(KeyDir::Down, false);
        input.key("ArrowUp", true);
        assert_eq!(input.tick_input(), TickInput { up: true, down: false });

        input.clear();
        assert_eq!(input.tick_input(), TickInput::default());
    }
}
