//! Structured logging for the Kestrel engine core.
//!
//! Provides a leveled sink (error through trace) via the `tracing` ecosystem:
//! console output with an uptime timer and module targets, plus an optional
//! JSON file layer in debug builds for post-mortem analysis. Initialization is
//! idempotent so the application orchestrator can bring the sink up without
//! caring whether the embedding binary already did.

use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Name of the JSON log file written in debug builds.
const LOG_FILE_NAME: &str = "kestrel.log";

/// Initialize the global tracing subscriber.
///
/// - Console layer with uptime timestamps, targets, and severity.
/// - `RUST_LOG` overrides `filter`; `filter` falls back to `"info"` when
///   `None`.
/// - In debug builds, if `log_dir` is given and writable, a JSON file layer is
///   added at `<log_dir>/kestrel.log`.
///
/// Calling this more than once is a no-op: a subscriber that is already
/// installed wins. The engine treats the sink as infallible.
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, filter: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter.unwrap_or("info")));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        let _ = subscriber.with(file_layer).try_init();
        return;
    }

    let _ = subscriber.try_init();
}

/// Convenience used by the orchestrator: console-only sink at the default
/// level, safe to call when a subscriber is already installed.
pub fn init_default() {
    init_logging(None, false, None);
}

/// The filter used when neither `RUST_LOG` nor an explicit override is set.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new("info")
}
