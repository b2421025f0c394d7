//! Headless testbed for the kestrel runtime.
//!
//! Drives the full application lifecycle without a real window: a scripted
//! platform pumps a fixed number of frames and then injects an Escape press,
//! which the built-in key listener turns into a quit. Useful for smoke
//! testing the loop, the event path, and the memory report from a terminal.
//!
//! Run with: `cargo run -p kestrel-testbed -- --frames 120`

mod game;
mod platform;

use std::sync::Arc;

use clap::Parser;
use kestrel_app::{AppConfig, Application};
use kestrel_memory::MemoryMetrics;
use tracing::{error, info};

use game::TestbedGame;
use platform::HeadlessPlatform;

/// CLI arguments for the testbed binary.
#[derive(Parser, Debug)]
#[command(name = "kestrel-testbed", about = "Kestrel runtime headless testbed")]
struct TestbedArgs {
    /// Window width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Window height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Frames to run before the platform injects an Escape press.
    #[arg(long, default_value_t = 240)]
    frames: u64,

    /// Window title override.
    #[arg(long)]
    title: Option<String>,
}

fn main() {
    let args = TestbedArgs::parse();

    kestrel_log::init_logging(None, cfg!(debug_assertions), None);

    let config = AppConfig {
        name: args
            .title
            .unwrap_or_else(|| "Kestrel Testbed".to_string()),
        start_width: args.width,
        start_height: args.height,
        ..AppConfig::default()
    };
    info!(
        "testbed: {}x{}, {} frames, title {:?}",
        config.start_width, config.start_height, args.frames, config.name
    );

    let metrics = MemoryMetrics::new();
    let game = TestbedGame::new(config, Arc::clone(&metrics));
    let platform = HeadlessPlatform::new(args.frames);

    let mut app = Application::with_metrics(Box::new(game), Box::new(platform), metrics);
    if let Err(e) = app.create() {
        error!("failed to create application: {e}");
        std::process::exit(1);
    }
    if let Err(e) = app.run() {
        error!("application run failed: {e}");
        std::process::exit(1);
    }

    info!("final {}", app.metrics().usage_report());
}
