//! Keyboard bindings.

use std::{error::Error, fmt, str::FromStr};

use dronewell_core::InputState;

/// Keys the game listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// `W`.
    W,
    /// `A`.
    A,
    /// `S`.
    S,
    /// `D`.
    D,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Spacebar.
    Space,
    /// Shift.
    Shift,
    /// Tab.
    Tab,
}

impl Key {
    /// Records this key as held in `input`.
    pub fn press(self, input: &mut InputState) {
        match self {
            Self::W | Self::Up => input.up = true,
            Self::A | Self::Left => input.left = true,
            Self::S | Self::Down => input.down = true,
            Self::D | Self::Right => input.right = true,
            Self::Space => input.primary = true,
            Self::Shift | Self::Tab => input.cycle = true,
        }
    }
}

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let key = match name.trim().to_ascii_lowercase().as_str() {
            "w" => Self::W,
            "a" => Self::A,
            "s" => Self::S,
            "d" => Self::D,
            "left" => Self::Left,
            "right" => Self::Right,
            "up" => Self::Up,
            "down" => Self::Down,
            "space" | "spacebar" => Self::Space,
            "shift" => Self::Shift,
            "tab" => Self::Tab,
            _ => {
                return Err(UnknownKey {
                    name: name.to_owned(),
                })
            }
        };
        Ok(key)
    }
}

/// Error raised when a key name is not bound to anything.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownKey {
    name: String,
}

impl UnknownKey {
    /// Name that failed to parse.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for UnknownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key `{}`", self.name)
    }
}

impl Error for UnknownKey {}

/// Builds the polled input state from the keys held this frame.
#[must_use]
pub fn input_from_keys(keys: impl IntoIterator<Item = Key>) -> InputState {
    let mut input = InputState::default();
    for key in keys {
        key.press(&mut input);
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_arrows_share_directions() {
        assert_eq!(
            input_from_keys([Key::W, Key::Left]),
            input_from_keys([Key::Up, Key::A])
        );
        let input = input_from_keys([Key::Tab, Key::Space]);
        assert!(input.cycle && input.primary);
        assert!(!input.up && !input.left);
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("Space".parse::<Key>(), Ok(Key::Space));
        assert_eq!(" shift ".parse::<Key>(), Ok(Key::Shift));
        let error = "q".parse::<Key>().unwrap_err();
        assert_eq!(error.name(), "q");
        assert_eq!(error.to_string(), "unknown key `q`");
    }
}
