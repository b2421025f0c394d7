//! Event codes and the reserved built-in range.

/// Capacity of the event code space. Codes at or above this value are
/// rejected at the API boundary.
pub const MAX_EVENT_CODES: u16 = 16384;

/// Identifies a class of occurrence on the bus.
///
/// Codes below [`EventCode::MAX_RESERVED`] are pre-assigned to the engine's
/// built-in occurrences; applications take codes above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventCode(pub u16);

impl EventCode {
    /// Shuts the application down at the next loop check. Context unused.
    pub const APPLICATION_QUIT: EventCode = EventCode(0x01);
    /// Keyboard key pressed. Context: `u16[0]` = key code.
    pub const KEY_PRESSED: EventCode = EventCode(0x02);
    /// Keyboard key released. Context: `u16[0]` = key code.
    pub const KEY_RELEASED: EventCode = EventCode(0x03);
    /// Mouse button pressed. Context: `u16[0]` = button.
    pub const BUTTON_PRESSED: EventCode = EventCode(0x04);
    /// Mouse button released. Context: `u16[0]` = button.
    pub const BUTTON_RELEASED: EventCode = EventCode(0x05);
    /// Mouse moved. Context: `i16[0]` = x, `i16[1]` = y.
    pub const MOUSE_MOVED: EventCode = EventCode(0x06);
    /// Mouse wheel turned. Context: `i8[0]` = delta.
    pub const MOUSE_WHEEL: EventCode = EventCode(0x07);
    /// Window resized. Context: `u16[0]` = width, `u16[1]` = height.
    pub const WINDOW_RESIZED: EventCode = EventCode(0x08);
    /// Gamepad button pressed. Context: `u16[0]` = button.
    pub const GAMEPAD_BUTTON_PRESSED: EventCode = EventCode(0x09);
    /// Gamepad button released. Context: `u16[0]` = button.
    pub const GAMEPAD_BUTTON_RELEASED: EventCode = EventCode(0x0A);
    /// Left stick moved. Context: `i16[0]` = x, `i16[1]` = y.
    pub const GAMEPAD_LEFT_STICK_MOVED: EventCode = EventCode(0x0B);
    /// Right stick moved. Context: `i16[0]` = x, `i16[1]` = y.
    pub const GAMEPAD_RIGHT_STICK_MOVED: EventCode = EventCode(0x0C);
    /// Left trigger value changed. Context: `u16[0]` = value.
    pub const GAMEPAD_LEFT_TRIGGER_CHANGED: EventCode = EventCode(0x0D);
    /// Right trigger value changed. Context: `u16[0]` = value.
    pub const GAMEPAD_RIGHT_TRIGGER_CHANGED: EventCode = EventCode(0x0E);

    /// Upper bound (exclusive) of the reserved built-in range.
    pub const MAX_RESERVED: EventCode = EventCode(0xFF);

    /// Whether this code lies inside the bounded code space.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.0 < MAX_EVENT_CODES
    }

    /// Registration-table index for this code.
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_codes_are_valid_and_below_reserved_bound() {
        let reserved = [
            EventCode::APPLICATION_QUIT,
            EventCode::KEY_PRESSED,
            EventCode::KEY_RELEASED,
            EventCode::BUTTON_PRESSED,
            EventCode::BUTTON_RELEASED,
            EventCode::MOUSE_MOVED,
            EventCode::MOUSE_WHEEL,
            EventCode::WINDOW_RESIZED,
            EventCode::GAMEPAD_BUTTON_PRESSED,
            EventCode::GAMEPAD_BUTTON_RELEASED,
            EventCode::GAMEPAD_LEFT_STICK_MOVED,
            EventCode::GAMEPAD_RIGHT_STICK_MOVED,
            EventCode::GAMEPAD_LEFT_TRIGGER_CHANGED,
            EventCode::GAMEPAD_RIGHT_TRIGGER_CHANGED,
        ];
        for code in reserved {
            assert!(code.is_valid());
            assert!(code < EventCode::MAX_RESERVED);
        }
    }

    #[test]
    fn test_out_of_range_code_is_invalid() {
        assert!(!EventCode(MAX_EVENT_CODES).is_valid());
        assert!(!EventCode(u16::MAX).is_valid());
        assert!(EventCode(MAX_EVENT_CODES - 1).is_valid());
    }
}
