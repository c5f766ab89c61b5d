//! Input normalization
//!
//! Every control the game accepts collapses into a single jump intent.

/// Raw input as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent<'a> {
    /// Key press, by physical key code (`KeyboardEvent.code`)
    Key(&'a str),
    PointerDown,
    TouchStart,
}

/// What the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Jump,
}

/// Key codes that jump
pub const JUMP_KEYS: [&str; 2] = ["Space", "ArrowUp"];

/// Map a raw event to an intent. `None` means the event is not ours and
/// the host should leave its default action alone.
pub fn map_input(event: InputEvent<'_>) -> Option<Intent> {
    match event {
        InputEvent::Key(code) if JUMP_KEYS.contains(&code) => Some(Intent::Jump),
        InputEvent::Key(_) => None,
        InputEvent::PointerDown | InputEvent::TouchStart => Some(Intent::Jump),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_sources() {
        assert_eq!(map_input(InputEvent::Key("Space")), Some(Intent::Jump));
        assert_eq!(map_input(InputEvent::Key("ArrowUp")), Some(Intent::Jump));
        assert_eq!(map_input(InputEvent::PointerDown), Some(Intent::Jump));
        assert_eq!(map_input(InputEvent::TouchStart), Some(Intent::Jump));
    }

    #[test]
    fn test_other_keys_ignored() {
        for code in ["KeyW", "ArrowDown", "Enter", "Escape", " "] {
            assert_eq!(map_input(InputEvent::Key(code)), None, "{}", code);
        }
    }
}
