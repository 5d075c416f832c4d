//! Player input flags and the host events that drive them.
//!
//! The host translates its keyboard, pointer and focus callbacks into
//! [`InputEvent`]s; [`InputState::handle`] folds them into the boolean flags
//! the frame pipeline reads.

use serde::{Deserialize, Serialize};

/// Keys the game distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// `A` or left arrow.
    Left,
    /// `D` or right arrow.
    Right,
    /// Space bar.
    Action,
    /// Escape.
    Pause,
    /// Anything else.
    Other,
}

impl Key {
    /// Map a DOM-style key name to a [`Key`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "a" | "A" | "ArrowLeft" => Key::Left,
            "d" | "D" | "ArrowRight" => Key::Right,
            " " | "Space" | "Spacebar" => Key::Action,
            "Escape" | "Esc" => Key::Pause,
            _ => Key::Other,
        }
    }
}

/// One host input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown { key: Key, repeat: bool },
    KeyUp { key: Key, repeat: bool },
    PointerDown,
    PointerUp,
    /// The window lost focus.
    Blur,
    /// The window regained focus.
    Focus,
}

/// The flags the pipeline reads each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    /// Press-and-hold action (pointer, touch or space).
    pub action: bool,
    pub pause: bool,
}

impl InputState {
    /// Fold one event into the flags.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown { repeat: true, .. } | InputEvent::KeyUp { repeat: true, .. } => {}
            InputEvent::KeyDown { key, .. } => {
                match key {
                    Key::Left => self.left = true,
                    Key::Right => self.right = true,
                    Key::Action => self.action = true,
                    Key::Pause | Key::Other => {}
                }
                // Escape toggles; any other key press resumes.
                self.pause = key == Key::Pause && !self.pause;
            }
            InputEvent::KeyUp { key, .. } => match key {
                Key::Left => self.left = false,
                Key::Right => self.right = false,
                Key::Action => self.action = false,
                Key::Pause | Key::Other => {}
            },
            InputEvent::PointerDown => self.action = true,
            InputEvent::PointerUp => self.action = false,
            InputEvent::Blur => self.pause = true,
            InputEvent::Focus => self.pause = false,
        }
    }

    /// Net steering direction: -1, 0 or 1.
    pub fn steering(&self) -> f64 {
        let mut steering = 0.0;
        if self.left {
            steering -= 1.0;
        }
        if self.right {
            steering += 1.0;
        }
        steering
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(key: Key) -> InputEvent {
        InputEvent::KeyDown { key, repeat: false }
    }

    fn up(key: Key) -> InputEvent {
        InputEvent::KeyUp { key, repeat: false }
    }

    #[test]
    fn key_names_map() {
        assert_eq!(Key::from_name("a"), Key::Left);
        assert_eq!(Key::from_name("ArrowRight"), Key::Right);
        assert_eq!(Key::from_name("Escape"), Key::Pause);
        assert_eq!(Key::from_name(" "), Key::Action);
        assert_eq!(Key::from_name("q"), Key::Other);
    }

    #[test]
    fn steering_from_held_keys() {
        let mut input = InputState::default();
        input.handle(down(Key::Left));
        assert_eq!(input.steering(), -1.0);
        input.handle(down(Key::Right));
        assert_eq!(input.steering(), 0.0);
        input.handle(up(Key::Left));
        assert_eq!(input.steering(), 1.0);
    }

    #[test]
    fn escape_toggles_other_keys_resume() {
        let mut input = InputState::default();
        input.handle(down(Key::Pause));
        assert!(input.pause);
        input.handle(down(Key::Pause));
        assert!(!input.pause);
        input.handle(down(Key::Pause));
        input.handle(down(Key::Other));
        assert!(!input.pause);
    }

    #[test]
    fn repeats_are_ignored() {
        let mut input = InputState::default();
        input.handle(down(Key::Pause));
        input.handle(InputEvent::KeyDown {
            key: Key::Pause,
            repeat: true,
        });
        assert!(input.pause);
        input.handle(down(Key::Left));
        input.handle(InputEvent::KeyUp {
            key: Key::Left,
            repeat: true,
        });
        assert!(input.left);
    }

    #[test]
    fn focus_controls_pause() {
        let mut input = InputState::default();
        input.handle(InputEvent::Blur);
        assert!(input.pause);
        input.handle(InputEvent::Focus);
        assert!(!input.pause);
    }

    #[test]
    fn pointer_drives_action() {
        let mut input = InputState::default();
        input.handle(InputEvent::PointerDown);
        assert!(input.action);
        input.handle(InputEvent::PointerUp);
        assert!(!input.action);
    }
}
