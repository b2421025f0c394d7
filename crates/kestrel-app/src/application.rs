//! The top-level application state machine and frame loop.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use kestrel_events::{EventBus, EventCode, EventContext, EventHandler, ListenerId};
use kestrel_input::{InputTracker, Key};
use kestrel_memory::MemoryMetrics;
use tracing::{debug, error, info, warn};

use crate::error::AppError;
use crate::game::Game;
use crate::platform::Platform;

/// Identity of the built-in quit listener.
const QUIT_LISTENER: ListenerId = ListenerId::new(1);
/// Identity of the built-in key listener.
const KEY_LISTENER: ListenerId = ListenerId::new(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Uncreated,
    Created,
    Running,
    Stopped,
}

/// Flags shared between the frame loop and the built-in listeners.
struct AppSignals {
    running: Cell<bool>,
    suspended: Cell<bool>,
}

/// Clears the running flag when the quit code arrives; registered for
/// [`EventCode::APPLICATION_QUIT`]. Claims the event.
struct QuitHandler {
    signals: Rc<AppSignals>,
}

impl EventHandler for QuitHandler {
    fn handle(&self, _code: EventCode, _context: EventContext, _bus: &EventBus) -> bool {
        info!("application quit requested, shutting down");
        self.signals.running.set(false);
        true
    }
}

/// Translates Escape into the quit code; registered for key pressed and
/// released. Non-escape keys are logged and left for other listeners.
struct KeyHandler;

impl EventHandler for KeyHandler {
    fn handle(&self, code: EventCode, context: EventContext, bus: &EventBus) -> bool {
        let key = context.u16_at(0);
        if code == EventCode::KEY_PRESSED {
            if key == Key::Escape.code() {
                bus.fire(EventCode::APPLICATION_QUIT, EventContext::empty());
                return true;
            }
            debug!("key {key:#x} pressed");
        } else if code == EventCode::KEY_RELEASED {
            debug!("key {key:#x} released");
        }
        false
    }
}

/// The engine's top-level orchestrator.
///
/// Owns the event bus, the input tracker, the memory accountant handle, and
/// the two collaborators, and walks the lifecycle uncreated → created →
/// running → stopped. One instance drives one application; the lifecycle
/// state rejects a second [`create`](Self::create).
pub struct Application {
    game: Box<dyn Game>,
    platform: Box<dyn Platform>,
    events: EventBus,
    input: InputTracker,
    metrics: Arc<MemoryMetrics>,
    signals: Rc<AppSignals>,
    width: u32,
    height: u32,
    last_time: f64,
    lifecycle: Lifecycle,
}

impl Application {
    /// Wraps the collaborators in an uncreated orchestrator with a fresh
    /// memory accountant.
    #[must_use]
    pub fn new(game: Box<dyn Game>, platform: Box<dyn Platform>) -> Self {
        Self::with_metrics(game, platform, MemoryMetrics::new())
    }

    /// Like [`new`](Self::new), but shares an existing accountant so the
    /// usage report covers allocations the game made before creation.
    #[must_use]
    pub fn with_metrics(
        game: Box<dyn Game>,
        platform: Box<dyn Platform>,
        metrics: Arc<MemoryMetrics>,
    ) -> Self {
        Self {
            game,
            platform,
            events: EventBus::new(),
            input: InputTracker::new(),
            metrics,
            signals: Rc::new(AppSignals {
                running: Cell::new(false),
                suspended: Cell::new(false),
            }),
            width: 0,
            height: 0,
            last_time: 0.0,
            lifecycle: Lifecycle::Uncreated,
        }
    }

    /// Brings the subsystems up in order: logging sink, input tracker, event
    /// bus, built-in listeners, platform startup, game initialize, initial
    /// resize. On success the application is running (not yet looping) and
    /// not suspended.
    ///
    /// # Errors
    ///
    /// [`AppError::AlreadyInitialized`] on a second call, with existing state
    /// untouched. Any step failing aborts the sequence, tears the already
    /// initialized steps back down, and surfaces the step's error; the
    /// orchestrator remains uncreated.
    pub fn create(&mut self) -> Result<(), AppError> {
        if self.lifecycle != Lifecycle::Uncreated {
            error!("Application::create called more than once");
            return Err(AppError::AlreadyInitialized);
        }

        kestrel_log::init_default();
        self.input.initialize();

        if let Err(e) = self.events.initialize() {
            error!("event system failed initialization, application cannot continue");
            self.input.shutdown();
            return Err(e.into());
        }

        if let Err(e) = self.register_builtins() {
            self.rollback_subsystems();
            return Err(e.into());
        }

        let config = self.game.config();
        self.width = config.start_width;
        self.height = config.start_height;

        if !self.platform.startup(
            &config.name,
            config.start_x,
            config.start_y,
            config.start_width,
            config.start_height,
        ) {
            error!("platform startup failed");
            self.rollback_subsystems();
            return Err(AppError::PlatformStartup);
        }

        if !self.game.initialize() {
            error!("game failed to initialize");
            self.platform.shutdown();
            self.rollback_subsystems();
            return Err(AppError::GameInitialize);
        }

        self.game.on_resize(self.width, self.height);

        self.signals.running.set(true);
        self.signals.suspended.set(false);
        self.lifecycle = Lifecycle::Created;
        Ok(())
    }

    /// Runs the frame loop until the running flag clears, then performs the
    /// ordered teardown: unregister built-ins, event bus shutdown, input
    /// tracker shutdown, platform shutdown.
    ///
    /// Each iteration: pump platform messages (failure clears running and
    /// exits), then — unless suspended — game update and render (either
    /// failing is fatal and exits; render is skipped when update fails),
    /// then the input snapshot swap, exactly once, regardless of suspension.
    /// A quit fired from anywhere only takes effect at the top-of-loop check,
    /// so the current iteration always completes.
    ///
    /// Always returns `Ok` once teardown completes; teardown failures are
    /// logged, not surfaced.
    ///
    /// # Errors
    ///
    /// [`AppError::NotInitialized`] when called before a successful
    /// [`create`](Self::create).
    pub fn run(&mut self) -> Result<(), AppError> {
        if self.lifecycle != Lifecycle::Created {
            return Err(AppError::NotInitialized);
        }
        self.lifecycle = Lifecycle::Running;

        info!("{}", self.metrics.usage_report());
        self.last_time = self.platform.seconds_now();

        while self.signals.running.get() {
            if !self.platform.pump_messages(&mut self.input, &self.events) {
                warn!("platform message pump failed, shutting down");
                self.signals.running.set(false);
                break;
            }

            let now = self.platform.seconds_now();
            let delta_time = now - self.last_time;
            self.last_time = now;

            if !self.signals.suspended.get() {
                if !self.game.update(delta_time) {
                    error!("game update failed, shutting down");
                    self.signals.running.set(false);
                    break;
                }
                if !self.game.render(delta_time) {
                    error!("game render failed, shutting down");
                    self.signals.running.set(false);
                    break;
                }
            }

            // The snapshot swap runs even while suspended so edge queries
            // stay correct across a suspend/resume cycle.
            self.input.update(delta_time);
        }

        self.signals.running.set(false);
        self.teardown();
        self.lifecycle = Lifecycle::Stopped;
        Ok(())
    }

    /// Shared memory accountant; collaborators attribute allocations here.
    #[must_use]
    pub fn metrics(&self) -> &Arc<MemoryMetrics> {
        &self.metrics
    }

    /// The event bus; external callers may fire application-level events
    /// (firing [`EventCode::APPLICATION_QUIT`] requests shutdown).
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// The input tracker, for point-in-time and edge queries.
    #[must_use]
    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    /// Whether the running flag is currently set.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.signals.running.get()
    }

    /// Whether update/render are currently being skipped.
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.signals.suspended.get()
    }

    /// Suspends or resumes update/render. Message pumping and the input
    /// snapshot swap continue while suspended.
    pub fn set_suspended(&mut self, suspended: bool) {
        self.signals.suspended.set(suspended);
    }

    /// Window dimensions as configured at creation.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn register_builtins(&self) -> Result<(), kestrel_events::EventError> {
        let quit = Rc::new(QuitHandler {
            signals: Rc::clone(&self.signals),
        });
        self.events
            .register(EventCode::APPLICATION_QUIT, QUIT_LISTENER, quit)?;
        let keys: Rc<dyn EventHandler> = Rc::new(KeyHandler);
        self.events
            .register(EventCode::KEY_PRESSED, KEY_LISTENER, Rc::clone(&keys))?;
        self.events
            .register(EventCode::KEY_RELEASED, KEY_LISTENER, keys)?;
        Ok(())
    }

    fn unregister_builtins(&self) {
        for (code, id) in [
            (EventCode::APPLICATION_QUIT, QUIT_LISTENER),
            (EventCode::KEY_PRESSED, KEY_LISTENER),
            (EventCode::KEY_RELEASED, KEY_LISTENER),
        ] {
            if let Err(e) = self.events.unregister(code, id) {
                warn!("failed to unregister built-in listener: {e}");
            }
        }
    }

    /// Reverse-order teardown of the core subsystems, for `create` failures.
    fn rollback_subsystems(&mut self) {
        self.unregister_builtins();
        if let Err(e) = self.events.shutdown() {
            warn!("event bus shutdown during rollback failed: {e}");
        }
        self.input.shutdown();
    }

    fn teardown(&mut self) {
        self.unregister_builtins();
        if let Err(e) = self.events.shutdown() {
            warn!("event bus shutdown failed: {e}");
        }
        self.input.shutdown();
        self.platform.shutdown();
        info!("application stopped");
    }
}
