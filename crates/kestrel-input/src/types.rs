//! Key, mouse button, and gamepad button vocabularies.
//!
//! These are the engine's own device codes: the platform collaborator
//! translates whatever the OS delivers into them before feeding the tracker.

/// Keyboard key codes, drawn from a fixed 256-entry space.
///
/// Discriminants follow the conventional virtual-key layout so platform
/// shims translate cheaply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Key {
    Backspace = 0x08,
    Tab = 0x09,
    Enter = 0x0D,
    Shift = 0x10,
    Control = 0x11,
    Alt = 0x12,
    Pause = 0x13,
    CapsLock = 0x14,
    Escape = 0x1B,
    Space = 0x20,
    PageUp = 0x21,
    PageDown = 0x22,
    End = 0x23,
    Home = 0x24,
    Left = 0x25,
    Up = 0x26,
    Right = 0x27,
    Down = 0x28,
    Insert = 0x2D,
    Delete = 0x2E,
    Num0 = 0x30,
    Num1 = 0x31,
    Num2 = 0x32,
    Num3 = 0x33,
    Num4 = 0x34,
    Num5 = 0x35,
    Num6 = 0x36,
    Num7 = 0x37,
    Num8 = 0x38,
    Num9 = 0x39,
    A = 0x41,
    B = 0x42,
    C = 0x43,
    D = 0x44,
    E = 0x45,
    F = 0x46,
    G = 0x47,
    H = 0x48,
    I = 0x49,
    J = 0x4A,
    K = 0x4B,
    L = 0x4C,
    M = 0x4D,
    N = 0x4E,
    O = 0x4F,
    P = 0x50,
    Q = 0x51,
    R = 0x52,
    S = 0x53,
    T = 0x54,
    U = 0x55,
    V = 0x56,
    W = 0x57,
    X = 0x58,
    Y = 0x59,
    Z = 0x5A,
    F1 = 0x70,
    F2 = 0x71,
    F3 = 0x72,
    F4 = 0x73,
    F5 = 0x74,
    F6 = 0x75,
    F7 = 0x76,
    F8 = 0x77,
    F9 = 0x78,
    F10 = 0x79,
    F11 = 0x7A,
    F12 = 0x7B,
    Semicolon = 0xBA,
    Equal = 0xBB,
    Comma = 0xBC,
    Minus = 0xBD,
    Period = 0xBE,
    Slash = 0xBF,
    Grave = 0xC0,
}

impl Key {
    /// Size of the key-code space; sizes the keyboard snapshot arrays.
    pub const MAX_KEYS: usize = 256;

    /// The code carried in key event contexts.
    #[must_use]
    pub fn code(self) -> u16 {
        self as u16
    }
}

/// Mouse buttons tracked by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    Left = 0,
    Right = 1,
    Middle = 2,
}

impl MouseButton {
    /// Number of tracked buttons.
    pub const COUNT: usize = 3;

    /// The code carried in button event contexts.
    #[must_use]
    pub fn code(self) -> u16 {
        self as u16
    }
}

/// Unified gamepad buttons that work across Xbox / PlayStation / generic
/// pads; the platform collaborator maps vendor buttons onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GamepadButton {
    /// A / Cross
    South = 0,
    /// B / Circle
    East = 1,
    /// Y / Triangle
    North = 2,
    /// X / Square
    West = 3,
    DPadUp = 4,
    DPadDown = 5,
    DPadLeft = 6,
    DPadRight = 7,
    LeftShoulder = 8,
    RightShoulder = 9,
    LeftStick = 10,
    RightStick = 11,
    Start = 12,
    Select = 13,
}

impl GamepadButton {
    /// Number of tracked gamepad buttons.
    pub const COUNT: usize = 14;

    /// The code carried in gamepad button event contexts.
    #[must_use]
    pub fn code(self) -> u16 {
        self as u16
    }
}
