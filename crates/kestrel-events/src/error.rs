//! Event system error types.

use crate::bus::ListenerId;
use crate::code::EventCode;

/// Errors reported by [`EventBus`](crate::EventBus) lifecycle and
/// registration operations.
///
/// Registration errors are ordinary recoverable results; lifecycle errors
/// mean the caller violated the initialize/shutdown contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    /// An operation was attempted before `initialize` (or after `shutdown`).
    #[error("event bus is not initialized")]
    NotInitialized,

    /// `initialize` was called on a bus that is already ready.
    #[error("event bus is already initialized")]
    AlreadyInitialized,

    /// The supplied code lies outside the bounded code space.
    #[error("event code {0} is outside the valid code space")]
    InvalidCode(u16),

    /// A registration already exists for this (code, listener) pair.
    #[error("listener {id:?} is already registered for {code:?}")]
    DuplicateRegistration { code: EventCode, id: ListenerId },

    /// No registration exists for this (code, listener) pair.
    #[error("listener {id:?} is not registered for {code:?}")]
    RegistrationNotFound { code: EventCode, id: ListenerId },
}
