//! The platform collaborator contract.

use kestrel_events::EventBus;
use kestrel_input::InputTracker;
use std::time::Duration;

/// What the engine requires of the OS-facing shim.
///
/// The platform owns window creation and the native message queue; during
/// [`pump_messages`](Self::pump_messages) it translates raw OS notifications
/// into tracker calls (which publish the semantic events) and fires
/// window-level events such as
/// [`EventCode::APPLICATION_QUIT`](kestrel_events::EventCode::APPLICATION_QUIT)
/// on window close. Pumping is expected to be poll-style; a blocking pump
/// stalls the whole engine.
pub trait Platform {
    /// Creates the native window. `false` aborts application creation.
    fn startup(&mut self, name: &str, x: i32, y: i32, width: u32, height: u32) -> bool;

    /// Destroys the native window and releases platform resources.
    fn shutdown(&mut self);

    /// Drains pending OS messages, feeding `input` and firing on `events`.
    /// Returning `false` stops the application loop.
    fn pump_messages(&mut self, input: &mut InputTracker, events: &EventBus) -> bool;

    /// Monotonic time in seconds; the loop derives frame deltas from it.
    fn seconds_now(&self) -> f64;

    /// Yields the thread for roughly `duration`.
    fn sleep(&self, duration: Duration);
}
