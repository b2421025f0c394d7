//! The dispatcher: registration table, ordering, and snapshot dispatch.

use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};

use crate::code::{EventCode, MAX_EVENT_CODES};
use crate::context::EventContext;
use crate::error::EventError;

/// Opaque identity of a registering listener.
///
/// Used only for equality: it says *who* registered, not what the handler
/// does. At most one registration may exist per (code, identity) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Wraps a caller-chosen identity value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// The capability a listener registers: "handles an event".
///
/// Returning `true` claims the event as fully processed and short-circuits
/// dispatch for the current fire. The bus passes itself back in so handlers
/// can re-entrantly fire follow-up events or adjust registrations.
pub trait EventHandler {
    /// Reacts to `code` with payload `context`. `true` = handled.
    fn handle(&self, code: EventCode, context: EventContext, bus: &EventBus) -> bool;
}

impl<F> EventHandler for F
where
    F: Fn(EventCode, EventContext, &EventBus) -> bool,
{
    fn handle(&self, code: EventCode, context: EventContext, bus: &EventBus) -> bool {
        self(code, context, bus)
    }
}

#[derive(Clone)]
struct Registration {
    id: ListenerId,
    handler: Rc<dyn EventHandler>,
}

/// Process-wide synchronous event dispatcher.
///
/// Lifecycle: constructed uninitialized, [`initialize`](Self::initialize)
/// allocates the registration table, [`shutdown`](Self::shutdown) releases
/// every code's listener sequence; re-initialization afterwards is permitted.
///
/// The registration table lives in a `RefCell` so that [`fire`](Self::fire)
/// can run handlers through `&self` while they re-entrantly mutate the table.
/// Dispatch always iterates a snapshot taken at the start of the fire, so
/// in-flight mutation never invalidates the iteration; a handler removed
/// mid-dispatch may still see the event it was registered for once.
pub struct EventBus {
    // One ordered listener sequence per code; order encodes dispatch priority.
    table: RefCell<Option<Vec<Vec<Registration>>>>,
}

impl EventBus {
    /// Creates a bus in the uninitialized state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: RefCell::new(None),
        }
    }

    /// Allocates the registration table. Fails if already ready.
    pub fn initialize(&self) -> Result<(), EventError> {
        let mut table = self.table.borrow_mut();
        if table.is_some() {
            return Err(EventError::AlreadyInitialized);
        }
        *table = Some(vec![Vec::new(); MAX_EVENT_CODES as usize]);
        debug!("event bus initialized ({MAX_EVENT_CODES} codes)");
        Ok(())
    }

    /// Releases every code's listener sequence and returns to uninitialized.
    pub fn shutdown(&self) -> Result<(), EventError> {
        let mut table = self.table.borrow_mut();
        if table.is_none() {
            return Err(EventError::NotInitialized);
        }
        *table = None;
        debug!("event bus shut down");
        Ok(())
    }

    /// Whether the bus is ready for registrations and fires.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.table.borrow().is_some()
    }

    /// Appends a registration for `code`, preserving arrival order.
    ///
    /// # Errors
    ///
    /// [`EventError::NotInitialized`], [`EventError::InvalidCode`], or
    /// [`EventError::DuplicateRegistration`] if `id` already listens on
    /// `code`; the table is unchanged on failure.
    pub fn register(
        &self,
        code: EventCode,
        id: ListenerId,
        handler: Rc<dyn EventHandler>,
    ) -> Result<(), EventError> {
        if !code.is_valid() {
            return Err(EventError::InvalidCode(code.0));
        }
        let mut table = self.table.borrow_mut();
        let entries = table
            .as_mut()
            .ok_or(EventError::NotInitialized)?
            .get_mut(code.index())
            .expect("validated code index");

        if entries.iter().any(|r| r.id == id) {
            warn!("duplicate registration for {code:?} by {id:?}");
            return Err(EventError::DuplicateRegistration { code, id });
        }
        entries.push(Registration { id, handler });
        Ok(())
    }

    /// Removes the registration of `id` for `code`.
    ///
    /// Removal preserves the relative order of the remaining entries, because
    /// order encodes dispatch priority.
    ///
    /// # Errors
    ///
    /// [`EventError::NotInitialized`], [`EventError::InvalidCode`], or
    /// [`EventError::RegistrationNotFound`].
    pub fn unregister(&self, code: EventCode, id: ListenerId) -> Result<(), EventError> {
        if !code.is_valid() {
            return Err(EventError::InvalidCode(code.0));
        }
        let mut table = self.table.borrow_mut();
        let entries = table
            .as_mut()
            .ok_or(EventError::NotInitialized)?
            .get_mut(code.index())
            .expect("validated code index");

        match entries.iter().position(|r| r.id == id) {
            // Vec::remove, not swap_remove: later entries keep their priority.
            Some(pos) => {
                entries.remove(pos);
                Ok(())
            }
            None => Err(EventError::RegistrationNotFound { code, id }),
        }
    }

    /// Fires `code` with `context` at every listener, in registration order.
    ///
    /// Returns `true` as soon as a handler claims the event; `false` when no
    /// handler did, when the bus is uninitialized, or when `code` is out of
    /// range or has no listeners. A `false` return is explicitly not a
    /// failure signal.
    pub fn fire(&self, code: EventCode, context: EventContext) -> bool {
        if !code.is_valid() {
            return false;
        }
        // Snapshot under a short borrow, then dispatch with the borrow
        // released so handlers can register/unregister/fire re-entrantly.
        let snapshot: Vec<Registration> = {
            let table = self.table.borrow();
            match table.as_ref() {
                Some(entries) => entries[code.index()].clone(),
                None => return false,
            }
        };

        for registration in snapshot {
            if registration.handler.handle(code, context, self) {
                return true;
            }
        }
        false
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
