//! Application orchestration for the Kestrel engine core.
//!
//! The [`Application`] is the top-level state machine: it brings the engine
//! subsystems up in order, registers the built-in listeners (window-close →
//! quit, escape → quit), runs the fixed per-frame sequence (pump → update →
//! render → input swap), and tears everything down in order when the running
//! flag clears. Everything is single-threaded and cooperative; the only tick
//! source is the loop itself.

mod application;
mod config;
mod error;
mod game;
mod platform;

pub use application::Application;
pub use config::{AppConfig, ConfigError};
pub use error::AppError;
pub use game::Game;
pub use platform::Platform;
