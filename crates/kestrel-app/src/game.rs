//! The game collaborator contract.

use crate::config::AppConfig;

/// What the engine requires of the hosted game.
///
/// The game owns its own state; the orchestrator only drives the lifecycle.
/// All calls arrive on the single engine thread. Boolean returns follow the
/// engine-wide two-valued convention: `false` from `initialize`, `update`,
/// or `render` is fatal to the application.
pub trait Game {
    /// The window configuration the game wants at startup.
    fn config(&self) -> AppConfig;

    /// One-time setup, called after the platform window exists.
    fn initialize(&mut self) -> bool;

    /// Advances game state by `delta_time` seconds. Called once per frame
    /// unless the application is suspended.
    fn update(&mut self, delta_time: f64) -> bool;

    /// Draws the current state. Called after a successful `update`.
    fn render(&mut self, delta_time: f64) -> bool;

    /// Notifies the game of a window size change. Also called once during
    /// creation with the configured dimensions.
    fn on_resize(&mut self, width: u32, height: u32);
}
