//! A windowless platform backed by the system clock.

use std::time::{Duration, Instant};

use kestrel_app::Platform;
use kestrel_events::EventBus;
use kestrel_input::{InputTracker, Key};
use tracing::info;

/// Simulated frame pacing for the headless pump.
const FRAME_SLEEP: Duration = Duration::from_millis(4);

/// Stands in for the OS shim: no window, messages scripted. After
/// `frame_budget` pumps it injects an Escape press, exercising the same
/// input-to-quit path a real keyboard would.
pub struct HeadlessPlatform {
    started: Instant,
    frame_budget: u64,
    pumps: u64,
}

impl HeadlessPlatform {
    pub fn new(frame_budget: u64) -> Self {
        Self {
            started: Instant::now(),
            frame_budget,
            pumps: 0,
        }
    }
}

impl Platform for HeadlessPlatform {
    fn startup(&mut self, name: &str, x: i32, y: i32, width: u32, height: u32) -> bool {
        info!("headless platform up: {name} at ({x}, {y}), {width}x{height}");
        true
    }

    fn shutdown(&mut self) {
        info!("headless platform down after {} pumps", self.pumps);
    }

    fn pump_messages(&mut self, input: &mut InputTracker, events: &EventBus) -> bool {
        self.pumps += 1;
        if self.pumps == self.frame_budget {
            info!("frame budget reached, injecting Escape");
            input.process_key(Key::Escape, true, events);
        }
        self.sleep(FRAME_SLEEP);
        true
    }

    fn seconds_now(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
