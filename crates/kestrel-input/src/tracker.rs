//! The tracker: per-device snapshots, edge detection, and queries.

use kestrel_events::{EventBus, EventCode, EventContext};
use tracing::{debug, trace};

use crate::types::{GamepadButton, Key, MouseButton};

#[derive(Clone, Copy)]
struct KeyboardSnapshot {
    keys: [bool; Key::MAX_KEYS],
}

impl Default for KeyboardSnapshot {
    fn default() -> Self {
        Self {
            keys: [false; Key::MAX_KEYS],
        }
    }
}

#[derive(Clone, Copy, Default)]
struct MouseSnapshot {
    x: i16,
    y: i16,
    buttons: [bool; MouseButton::COUNT],
}

#[derive(Clone, Copy, Default)]
struct GamepadSnapshot {
    buttons: [bool; GamepadButton::COUNT],
    left_trigger: u8,
    right_trigger: u8,
    left_stick: (i16, i16),
    right_stick: (i16, i16),
}

/// Double-buffered keyboard/mouse/gamepad state.
///
/// "Current" is mutated continuously as the platform collaborator feeds raw
/// notifications through the `process_*` methods; "previous" is overwritten
/// with current's prior contents exactly once per frame by
/// [`update`](Self::update). The `process_*` methods are edge-triggered:
/// a semantic event goes out on the bus only when the stored state actually
/// changes, which also filters platform auto-repeat. The wheel is the one
/// level-triggered exception, since it has no persisted state.
///
/// An uninitialized tracker degrades safely: `process_*` calls are ignored
/// (no state recorded, no events published), `is/was_*_down` queries answer
/// `false`, `is/was_*_up` answer `true`, position getters answer `(0, 0)`.
pub struct InputTracker {
    ready: bool,
    keyboard_current: KeyboardSnapshot,
    keyboard_previous: KeyboardSnapshot,
    mouse_current: MouseSnapshot,
    mouse_previous: MouseSnapshot,
    gamepad_current: GamepadSnapshot,
    gamepad_previous: GamepadSnapshot,
}

impl InputTracker {
    /// Creates a tracker in the uninitialized state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ready: false,
            keyboard_current: KeyboardSnapshot::default(),
            keyboard_previous: KeyboardSnapshot::default(),
            mouse_current: MouseSnapshot::default(),
            mouse_previous: MouseSnapshot::default(),
            gamepad_current: GamepadSnapshot::default(),
            gamepad_previous: GamepadSnapshot::default(),
        }
    }

    /// Zeroes all snapshots and marks the tracker ready.
    pub fn initialize(&mut self) {
        *self = Self::new();
        self.ready = true;
        debug!("input tracker initialized");
    }

    /// Returns the tracker to the uninitialized state.
    pub fn shutdown(&mut self) {
        self.ready = false;
    }

    /// Whether the tracker has been initialized.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.ready
    }

    /// Copies current snapshots into previous for all three device classes.
    ///
    /// Must run exactly once per frame, after that frame's raw-input
    /// processing and before the next frame's; this is what makes "was down"
    /// mean "as of the previous completed frame".
    pub fn update(&mut self, _delta_time: f64) {
        if !self.ready {
            return;
        }
        self.keyboard_previous = self.keyboard_current;
        self.mouse_previous = self.mouse_current;
        self.gamepad_previous = self.gamepad_current;
    }

    // ── Raw-input processing ────────────────────────────────────────

    /// Records a key state and, on an edge, fires
    /// [`EventCode::KEY_PRESSED`] or [`EventCode::KEY_RELEASED`].
    pub fn process_key(&mut self, key: Key, pressed: bool, bus: &EventBus) {
        if !self.ready {
            return;
        }
        let slot = &mut self.keyboard_current.keys[key.code() as usize];
        if *slot != pressed {
            *slot = pressed;
            let code = if pressed {
                EventCode::KEY_PRESSED
            } else {
                EventCode::KEY_RELEASED
            };
            bus.fire(code, EventContext::from_u16_pair(key.code(), 0));
        }
    }

    /// Records a mouse button state and fires on an edge.
    pub fn process_button(&mut self, button: MouseButton, pressed: bool, bus: &EventBus) {
        if !self.ready {
            return;
        }
        let slot = &mut self.mouse_current.buttons[button as usize];
        if *slot != pressed {
            *slot = pressed;
            let code = if pressed {
                EventCode::BUTTON_PRESSED
            } else {
                EventCode::BUTTON_RELEASED
            };
            bus.fire(code, EventContext::from_u16_pair(button.code(), 0));
        }
    }

    /// Records the cursor position; fires [`EventCode::MOUSE_MOVED`] only
    /// when the position actually changed.
    pub fn process_mouse_move(&mut self, x: i16, y: i16, bus: &EventBus) {
        if !self.ready {
            return;
        }
        if self.mouse_current.x != x || self.mouse_current.y != y {
            trace!("mouse pos: {x}, {y}");
            self.mouse_current.x = x;
            self.mouse_current.y = y;
            bus.fire(EventCode::MOUSE_MOVED, EventContext::from_i16_pair(x, y));
        }
    }

    /// Fires [`EventCode::MOUSE_WHEEL`] unconditionally; the wheel carries no
    /// persisted state.
    pub fn process_mouse_wheel(&mut self, delta: i8, bus: &EventBus) {
        if !self.ready {
            return;
        }
        let mut context = EventContext::empty();
        context.set_i8(0, delta);
        bus.fire(EventCode::MOUSE_WHEEL, context);
    }

    /// Records a gamepad button state and fires on an edge.
    pub fn process_gamepad_button(&mut self, button: GamepadButton, pressed: bool, bus: &EventBus) {
        if !self.ready {
            return;
        }
        let slot = &mut self.gamepad_current.buttons[button as usize];
        if *slot != pressed {
            trace!("gamepad button {button:?} {}", if pressed { "pressed" } else { "released" });
            *slot = pressed;
            let code = if pressed {
                EventCode::GAMEPAD_BUTTON_PRESSED
            } else {
                EventCode::GAMEPAD_BUTTON_RELEASED
            };
            bus.fire(code, EventContext::from_u16_pair(button.code(), 0));
        }
    }

    /// Records the left trigger value and fires on change.
    ///
    /// Values arrive however the platform scaled them; deadzone and response
    /// curves are the platform collaborator's business.
    pub fn process_gamepad_trigger_left(&mut self, value: u8, bus: &EventBus) {
        if !self.ready {
            return;
        }
        if self.gamepad_current.left_trigger != value {
            self.gamepad_current.left_trigger = value;
            bus.fire(
                EventCode::GAMEPAD_LEFT_TRIGGER_CHANGED,
                EventContext::from_u16_pair(value as u16, 0),
            );
        }
    }

    /// Records the right trigger value and fires on change.
    pub fn process_gamepad_trigger_right(&mut self, value: u8, bus: &EventBus) {
        if !self.ready {
            return;
        }
        if self.gamepad_current.right_trigger != value {
            self.gamepad_current.right_trigger = value;
            bus.fire(
                EventCode::GAMEPAD_RIGHT_TRIGGER_CHANGED,
                EventContext::from_u16_pair(value as u16, 0),
            );
        }
    }

    /// Records the left stick axes and fires on change. Axis values are
    /// recorded uninterpreted.
    pub fn process_gamepad_left_stick_move(&mut self, x: i16, y: i16, bus: &EventBus) {
        if !self.ready {
            return;
        }
        if self.gamepad_current.left_stick != (x, y) {
            self.gamepad_current.left_stick = (x, y);
            bus.fire(
                EventCode::GAMEPAD_LEFT_STICK_MOVED,
                EventContext::from_i16_pair(x, y),
            );
        }
    }

    /// Records the right stick axes and fires on change.
    pub fn process_gamepad_right_stick_move(&mut self, x: i16, y: i16, bus: &EventBus) {
        if !self.ready {
            return;
        }
        if self.gamepad_current.right_stick != (x, y) {
            self.gamepad_current.right_stick = (x, y);
            bus.fire(
                EventCode::GAMEPAD_RIGHT_STICK_MOVED,
                EventContext::from_i16_pair(x, y),
            );
        }
    }

    // ── Keyboard queries ────────────────────────────────────────────

    /// Whether `key` is down right now.
    #[must_use]
    pub fn is_key_down(&self, key: Key) -> bool {
        self.ready && self.keyboard_current.keys[key.code() as usize]
    }

    /// Whether `key` is up right now.
    #[must_use]
    pub fn is_key_up(&self, key: Key) -> bool {
        !self.is_key_down(key)
    }

    /// Whether `key` was down as of the last completed frame.
    #[must_use]
    pub fn was_key_down(&self, key: Key) -> bool {
        self.ready && self.keyboard_previous.keys[key.code() as usize]
    }

    /// Whether `key` was up as of the last completed frame.
    #[must_use]
    pub fn was_key_up(&self, key: Key) -> bool {
        !self.was_key_down(key)
    }

    // ── Mouse queries ───────────────────────────────────────────────

    /// Whether `button` is down right now.
    #[must_use]
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.ready && self.mouse_current.buttons[button as usize]
    }

    /// Whether `button` is up right now.
    #[must_use]
    pub fn is_button_up(&self, button: MouseButton) -> bool {
        !self.is_button_down(button)
    }

    /// Whether `button` was down as of the last completed frame.
    #[must_use]
    pub fn was_button_down(&self, button: MouseButton) -> bool {
        self.ready && self.mouse_previous.buttons[button as usize]
    }

    /// Whether `button` was up as of the last completed frame.
    #[must_use]
    pub fn was_button_up(&self, button: MouseButton) -> bool {
        !self.was_button_down(button)
    }

    /// Current cursor position; `(0, 0)` when uninitialized.
    #[must_use]
    pub fn mouse_position(&self) -> (i32, i32) {
        if !self.ready {
            return (0, 0);
        }
        (self.mouse_current.x as i32, self.mouse_current.y as i32)
    }

    /// Cursor position as of the last completed frame.
    #[must_use]
    pub fn previous_mouse_position(&self) -> (i32, i32) {
        if !self.ready {
            return (0, 0);
        }
        (self.mouse_previous.x as i32, self.mouse_previous.y as i32)
    }

    // ── Gamepad queries ─────────────────────────────────────────────

    /// Whether `button` is down right now.
    #[must_use]
    pub fn is_gamepad_button_down(&self, button: GamepadButton) -> bool {
        self.ready && self.gamepad_current.buttons[button as usize]
    }

    /// Whether `button` is up right now.
    #[must_use]
    pub fn is_gamepad_button_up(&self, button: GamepadButton) -> bool {
        !self.is_gamepad_button_down(button)
    }

    /// Whether `button` was down as of the last completed frame.
    #[must_use]
    pub fn was_gamepad_button_down(&self, button: GamepadButton) -> bool {
        self.ready && self.gamepad_previous.buttons[button as usize]
    }

    /// Whether `button` was up as of the last completed frame.
    #[must_use]
    pub fn was_gamepad_button_up(&self, button: GamepadButton) -> bool {
        !self.was_gamepad_button_down(button)
    }

    /// Current left stick axes; `(0, 0)` when uninitialized.
    #[must_use]
    pub fn gamepad_left_stick(&self) -> (i16, i16) {
        if self.ready { self.gamepad_current.left_stick } else { (0, 0) }
    }

    /// Left stick axes as of the last completed frame.
    #[must_use]
    pub fn previous_gamepad_left_stick(&self) -> (i16, i16) {
        if self.ready { self.gamepad_previous.left_stick } else { (0, 0) }
    }

    /// Current right stick axes; `(0, 0)` when uninitialized.
    #[must_use]
    pub fn gamepad_right_stick(&self) -> (i16, i16) {
        if self.ready { self.gamepad_current.right_stick } else { (0, 0) }
    }

    /// Right stick axes as of the last completed frame.
    #[must_use]
    pub fn previous_gamepad_right_stick(&self) -> (i16, i16) {
        if self.ready { self.gamepad_previous.right_stick } else { (0, 0) }
    }

    /// Current left trigger value; 0 when uninitialized.
    #[must_use]
    pub fn gamepad_left_trigger(&self) -> u8 {
        if self.ready { self.gamepad_current.left_trigger } else { 0 }
    }

    /// Current right trigger value; 0 when uninitialized.
    #[must_use]
    pub fn gamepad_right_trigger(&self) -> u8 {
        if self.ready { self.gamepad_current.right_trigger } else { 0 }
    }
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_events::ListenerId;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Bus with a recorder on every code the tracker publishes; events land
    /// in the shared log as `(code, slot0, slot1)`.
    fn recording_bus() -> (EventBus, Rc<RefCell<Vec<(EventCode, u16, u16)>>>) {
        let bus = EventBus::new();
        bus.initialize().unwrap();
        let log: Rc<RefCell<Vec<(EventCode, u16, u16)>>> = Rc::new(RefCell::new(Vec::new()));
        for code in [
            EventCode::KEY_PRESSED,
            EventCode::KEY_RELEASED,
            EventCode::BUTTON_PRESSED,
            EventCode::BUTTON_RELEASED,
            EventCode::MOUSE_MOVED,
            EventCode::MOUSE_WHEEL,
            EventCode::GAMEPAD_BUTTON_PRESSED,
            EventCode::GAMEPAD_BUTTON_RELEASED,
            EventCode::GAMEPAD_LEFT_STICK_MOVED,
            EventCode::GAMEPAD_RIGHT_STICK_MOVED,
            EventCode::GAMEPAD_LEFT_TRIGGER_CHANGED,
            EventCode::GAMEPAD_RIGHT_TRIGGER_CHANGED,
        ] {
            let log = Rc::clone(&log);
            bus.register(
                code,
                ListenerId::new(1000),
                Rc::new(move |code: EventCode, ctx: EventContext, _: &EventBus| {
                    log.borrow_mut().push((code, ctx.u16_at(0), ctx.u16_at(1)));
                    true
                }),
            )
            .unwrap();
        }
        (bus, log)
    }

    fn ready_tracker() -> InputTracker {
        let mut tracker = InputTracker::new();
        tracker.initialize();
        tracker
    }

    #[test]
    fn test_repeated_press_fires_exactly_one_event() {
        let (bus, log) = recording_bus();
        let mut tracker = ready_tracker();

        tracker.process_key(Key::W, true, &bus);
        tracker.process_key(Key::W, true, &bus);
        assert_eq!(
            *log.borrow(),
            vec![(EventCode::KEY_PRESSED, Key::W.code(), 0)]
        );

        tracker.process_key(Key::W, false, &bus);
        assert_eq!(log.borrow().len(), 2);
        assert_eq!(
            log.borrow()[1],
            (EventCode::KEY_RELEASED, Key::W.code(), 0)
        );
    }

    #[test]
    fn test_key_queries_track_current_and_previous() {
        let (bus, _log) = recording_bus();
        let mut tracker = ready_tracker();

        tracker.process_key(Key::Space, true, &bus);
        assert!(tracker.is_key_down(Key::Space));
        assert!(tracker.was_key_up(Key::Space));

        tracker.update(0.016);
        assert!(tracker.was_key_down(Key::Space));

        tracker.process_key(Key::Space, false, &bus);
        assert!(tracker.is_key_up(Key::Space));
        assert!(tracker.was_key_down(Key::Space));
    }

    #[test]
    fn test_was_down_after_update_equals_is_down_before() {
        let (bus, _log) = recording_bus();
        let mut tracker = ready_tracker();

        for (key, pressed) in [(Key::A, true), (Key::D, true), (Key::A, false)] {
            tracker.process_key(key, pressed, &bus);
            let before: Vec<bool> = [Key::A, Key::D, Key::W]
                .iter()
                .map(|&k| tracker.is_key_down(k))
                .collect();
            tracker.update(0.016);
            let after: Vec<bool> = [Key::A, Key::D, Key::W]
                .iter()
                .map(|&k| tracker.was_key_down(k))
                .collect();
            assert_eq!(before, after);
        }
    }

    #[test]
    fn test_mouse_button_edges() {
        let (bus, log) = recording_bus();
        let mut tracker = ready_tracker();

        tracker.process_button(MouseButton::Left, true, &bus);
        tracker.process_button(MouseButton::Left, true, &bus);
        tracker.process_button(MouseButton::Left, false, &bus);
        assert_eq!(
            *log.borrow(),
            vec![
                (EventCode::BUTTON_PRESSED, 0, 0),
                (EventCode::BUTTON_RELEASED, 0, 0),
            ]
        );
        assert!(tracker.is_button_up(MouseButton::Left));
    }

    #[test]
    fn test_mouse_move_fires_only_on_change() {
        let (bus, log) = recording_bus();
        let mut tracker = ready_tracker();

        tracker.process_mouse_move(10, 20, &bus);
        tracker.process_mouse_move(10, 20, &bus);
        tracker.process_mouse_move(11, 20, &bus);
        assert_eq!(log.borrow().len(), 2);
        assert_eq!(tracker.mouse_position(), (11, 20));

        tracker.update(0.016);
        assert_eq!(tracker.previous_mouse_position(), (11, 20));
    }

    #[test]
    fn test_mouse_wheel_is_level_triggered() {
        let (bus, log) = recording_bus();
        let mut tracker = ready_tracker();

        tracker.process_mouse_wheel(1, &bus);
        tracker.process_mouse_wheel(1, &bus);
        tracker.process_mouse_wheel(-1, &bus);
        let fired: Vec<_> = log.borrow().iter().map(|e| e.0).collect();
        assert_eq!(
            fired,
            vec![
                EventCode::MOUSE_WHEEL,
                EventCode::MOUSE_WHEEL,
                EventCode::MOUSE_WHEEL
            ]
        );
    }

    #[test]
    fn test_gamepad_button_edges() {
        let (bus, log) = recording_bus();
        let mut tracker = ready_tracker();

        tracker.process_gamepad_button(GamepadButton::South, true, &bus);
        tracker.process_gamepad_button(GamepadButton::South, true, &bus);
        assert!(tracker.is_gamepad_button_down(GamepadButton::South));
        assert_eq!(log.borrow().len(), 1);

        tracker.update(0.016);
        assert!(tracker.was_gamepad_button_down(GamepadButton::South));

        tracker.process_gamepad_button(GamepadButton::South, false, &bus);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_gamepad_sticks_and_triggers_fire_on_change_only() {
        let (bus, log) = recording_bus();
        let mut tracker = ready_tracker();

        tracker.process_gamepad_left_stick_move(100, -200, &bus);
        tracker.process_gamepad_left_stick_move(100, -200, &bus);
        tracker.process_gamepad_right_stick_move(0, 0, &bus); // no change from zero
        tracker.process_gamepad_trigger_left(128, &bus);
        tracker.process_gamepad_trigger_left(128, &bus);
        tracker.process_gamepad_trigger_right(0, &bus); // no change from zero

        let fired: Vec<_> = log.borrow().iter().map(|e| e.0).collect();
        assert_eq!(
            fired,
            vec![
                EventCode::GAMEPAD_LEFT_STICK_MOVED,
                EventCode::GAMEPAD_LEFT_TRIGGER_CHANGED,
            ]
        );
        assert_eq!(tracker.gamepad_left_stick(), (100, -200));
        assert_eq!(tracker.gamepad_left_trigger(), 128);

        tracker.update(0.016);
        assert_eq!(tracker.previous_gamepad_left_stick(), (100, -200));
        assert_eq!(tracker.previous_gamepad_right_stick(), (0, 0));
    }

    #[test]
    fn test_stick_event_carries_signed_axes() {
        let (bus, log) = recording_bus();
        let mut tracker = ready_tracker();

        tracker.process_gamepad_left_stick_move(-320, 240, &bus);
        let (code, x, y) = log.borrow()[0];
        assert_eq!(code, EventCode::GAMEPAD_LEFT_STICK_MOVED);
        assert_eq!(x as i16, -320);
        assert_eq!(y as i16, 240);
    }

    #[test]
    fn test_uninitialized_tracker_degrades_safely() {
        let tracker = InputTracker::new();
        assert!(!tracker.is_key_down(Key::Escape));
        assert!(tracker.is_key_up(Key::Escape));
        assert!(!tracker.was_key_down(Key::Escape));
        assert!(tracker.was_key_up(Key::Escape));
        assert!(!tracker.is_button_down(MouseButton::Left));
        assert!(tracker.is_button_up(MouseButton::Left));
        assert!(!tracker.is_gamepad_button_down(GamepadButton::Start));
        assert!(tracker.is_gamepad_button_up(GamepadButton::Start));
        assert_eq!(tracker.mouse_position(), (0, 0));
        assert_eq!(tracker.previous_mouse_position(), (0, 0));
        assert_eq!(tracker.gamepad_left_stick(), (0, 0));
        assert_eq!(tracker.gamepad_right_stick(), (0, 0));
    }

    #[test]
    fn test_uninitialized_tracker_ignores_raw_input() {
        let (bus, log) = recording_bus();
        let mut tracker = InputTracker::new();

        tracker.process_key(Key::A, true, &bus);
        tracker.process_button(MouseButton::Left, true, &bus);
        tracker.process_mouse_move(10, 20, &bus);
        tracker.process_mouse_wheel(1, &bus);
        tracker.process_gamepad_button(GamepadButton::South, true, &bus);
        tracker.process_gamepad_trigger_left(128, &bus);
        tracker.process_gamepad_left_stick_move(100, -200, &bus);

        assert!(log.borrow().is_empty());

        // Nothing was recorded either; readiness makes the state live.
        tracker.initialize();
        assert!(!tracker.is_key_down(Key::A));
        assert!(!tracker.is_button_down(MouseButton::Left));
        assert_eq!(tracker.mouse_position(), (0, 0));
        assert_eq!(tracker.gamepad_left_trigger(), 0);
    }

    #[test]
    fn test_update_before_initialize_is_a_no_op() {
        let mut tracker = InputTracker::new();
        tracker.update(0.016);
        assert!(!tracker.is_initialized());
    }

    #[test]
    fn test_shutdown_returns_to_safe_defaults() {
        let (bus, _log) = recording_bus();
        let mut tracker = ready_tracker();
        tracker.process_key(Key::A, true, &bus);
        tracker.shutdown();
        assert!(!tracker.is_key_down(Key::A));
        assert!(tracker.is_key_up(Key::A));
    }
}
