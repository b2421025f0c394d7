//! The testbed's game collaborator.

use std::sync::Arc;

use kestrel_app::{AppConfig, Game};
use kestrel_memory::{MemoryMetrics, MemoryTag, TaggedBlock};
use tracing::{debug, info};

/// How much game-tagged scratch the testbed claims, so the usage report has
/// something to show.
const SCRATCH_BYTES: u64 = 64 * 1024;

/// A minimal game: accumulates time, touches its scratch block every frame,
/// and logs a heartbeat once a second.
pub struct TestbedGame {
    config: AppConfig,
    metrics: Arc<MemoryMetrics>,
    scratch: Option<TaggedBlock>,
    elapsed: f64,
    since_heartbeat: f64,
    frames: u64,
}

impl TestbedGame {
    pub fn new(config: AppConfig, metrics: Arc<MemoryMetrics>) -> Self {
        Self {
            config,
            metrics,
            scratch: None,
            elapsed: 0.0,
            since_heartbeat: 0.0,
            frames: 0,
        }
    }
}

impl Game for TestbedGame {
    fn config(&self) -> AppConfig {
        self.config.clone()
    }

    fn initialize(&mut self) -> bool {
        self.scratch = Some(self.metrics.allocate(SCRATCH_BYTES, MemoryTag::Game));
        info!("testbed game initialized with {SCRATCH_BYTES} bytes of scratch");
        true
    }

    fn update(&mut self, delta_time: f64) -> bool {
        self.elapsed += delta_time;
        self.since_heartbeat += delta_time;
        self.frames += 1;

        if let Some(scratch) = self.scratch.as_mut() {
            scratch.bytes_mut()[0] = (self.frames & 0xFF) as u8;
        }

        if self.since_heartbeat >= 1.0 {
            self.since_heartbeat = 0.0;
            info!(
                "heartbeat: {:.1}s elapsed, {} frames, {} bytes tagged",
                self.elapsed,
                self.frames,
                self.metrics.total_allocated()
            );
        }
        true
    }

    fn render(&mut self, _delta_time: f64) -> bool {
        true
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        debug!("testbed resized to {width}x{height}");
    }
}
