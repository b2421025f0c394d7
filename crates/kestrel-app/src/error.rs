//! Orchestrator error types.

use kestrel_events::EventError;

/// Errors surfaced by [`Application`](crate::Application) lifecycle calls.
///
/// Collaborator failures inside the frame loop are fatal to the application
/// rather than errors: they clear the running flag and drive ordered
/// teardown, after which `run` still returns `Ok`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// `create` was called on an orchestrator that is already created.
    #[error("application has already been created")]
    AlreadyInitialized,

    /// `run` was called before `create`.
    #[error("application has not been created")]
    NotInitialized,

    /// The event system refused a lifecycle or registration call.
    #[error("event system failure: {0}")]
    Event(#[from] EventError),

    /// The platform collaborator reported startup failure.
    #[error("platform startup failed")]
    PlatformStartup,

    /// The game collaborator reported initialization failure.
    #[error("game initialization failed")]
    GameInitialize,
}
