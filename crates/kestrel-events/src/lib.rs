//! Synchronous publish/subscribe event bus for the Kestrel engine core.
//!
//! Listeners register a capability ([`EventHandler`]) against a small-integer
//! [`EventCode`]; producers fire a code with a fixed 16-byte
//! [`EventContext`]. Dispatch is fully synchronous and runs listeners in
//! registration order, stopping at the first one that claims the event as
//! handled.

mod bus;
mod code;
mod context;
mod error;

pub use bus::{EventBus, EventHandler, ListenerId};
pub use code::{EventCode, MAX_EVENT_CODES};
pub use context::EventContext;
pub use error::EventError;
