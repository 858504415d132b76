//! Spiral Raffle entry point
//!
//! Headless demo: runs the fixed-timestep simulation for a bounded stretch
//! and logs scheduling activity and frame summaries. A host UI would drive
//! the same loop from its own render callback.

use std::path::PathBuf;

use spiral_raffle::consts::{DEFAULT_CANVAS_WIDTH, SIM_DT};
use spiral_raffle::renderer::build_frame;
use spiral_raffle::sim::{tick, CanvasSize, LayoutKey, Player, RaffleState, SpiralLayout};
use spiral_raffle::RaffleConfig;

/// Demo length in simulated seconds
const DEMO_SECONDS: u32 = 30;
/// Demo roster size
const DEMO_PLAYERS: usize = 12;

fn main() {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("raffle.json"));
    let config = RaffleConfig::load(&config_path);
    if let Err(e) = config.validate() {
        log::error!("{e}");
        std::process::exit(1);
    }

    let canvas = CanvasSize::portrait(DEFAULT_CANVAS_WIDTH);
    let layout = SpiralLayout::new(LayoutKey {
        canvas,
        lanes: config.lanes,
        params: config.spiral,
        curve_samples: config.curve_samples,
        guide_samples: config.guide_samples,
    });

    let roster: Vec<Player> = (0..DEMO_PLAYERS)
        .map(|i| Player::new(i as u32 + 1, "user", i % config.lanes))
        .collect();
    let mut state = RaffleState::new(0x5EED, roster);

    log::info!(
        "spiral raffle demo: {} players, {} lanes, {:.0}x{:.0} canvas",
        DEMO_PLAYERS,
        config.lanes,
        canvas.width,
        canvas.height
    );

    let ticks_per_second = (1.0 / SIM_DT) as u64;
    let total_ticks = DEMO_SECONDS as u64 * ticks_per_second;
    let mut scheduled_total = 0usize;

    for _ in 0..total_ticks {
        scheduled_total += tick(&mut state, &layout, &config).len();

        if state.time_ticks % ticks_per_second == 0 {
            match build_frame(&state, &layout, &config) {
                Ok(frame) => log::info!(
                    "t={:>3}s active={} scheduled={} strokes={} sprites={}",
                    state.time_ticks / ticks_per_second,
                    state.active_count(),
                    scheduled_total,
                    frame.strokes.len(),
                    frame.sprites.len()
                ),
                Err(e) => {
                    log::error!("frame build failed: {e}");
                    std::process::exit(1);
                }
            }
        }
    }

    log::info!("demo finished: {scheduled_total} activations over {DEMO_SECONDS}s");
}
