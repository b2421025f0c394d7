//! Double-buffered input tracking for the Kestrel engine core.
//!
//! The [`InputTracker`] owns current and previous snapshots of keyboard,
//! mouse, and gamepad state. Raw, possibly-repeated notifications from the
//! platform collaborator are converted into edge-triggered semantic events
//! published through the event bus; the rest of the engine asks point-in-time
//! ("is down") and edge ("was down as of the last completed frame")
//! questions.

mod tracker;
mod types;

pub use tracker::InputTracker;
pub use types::{GamepadButton, Key, MouseButton};
