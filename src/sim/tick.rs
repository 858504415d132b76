//! Fixed timestep scheduling tick
//!
//! The perpetual scheduling loop of the reference becomes a pure function
//! of (state, layout, config) driven by an external caller at the fixed
//! timestep, so scheduling is unit-testable without real time.

use rand::seq::SliceRandom;

use super::easing::Anim;
use super::spiral::SpiralLayout;
use super::state::{RaffleState, SelectionMode};
use crate::config::RaffleConfig;

/// Advance the simulation by one tick. Runs a scheduling round whenever the
/// configured interval has elapsed; returns the ids activated this tick.
pub fn tick(state: &mut RaffleState, layout: &SpiralLayout, config: &RaffleConfig) -> Vec<u32> {
    let activated = if state.time_ticks >= state.next_schedule_tick {
        state.next_schedule_tick = state.time_ticks + config.interval_ticks();
        schedule(state, layout, config)
    } else {
        Vec::new()
    };
    state.time_ticks += 1;
    activated
}

/// One scheduling round: retire finished players first, then fill the freed
/// lanes from the waiting pool. Cleanup running before activation lets a
/// lane freed this round be reused in the same round.
pub fn schedule(
    state: &mut RaffleState,
    layout: &SpiralLayout,
    config: &RaffleConfig,
) -> Vec<u32> {
    let now = state.time_ticks;
    let threshold = config.completion_threshold;

    // 1. Retire players whose traversal countdown has completed
    let players = &mut state.players;
    let active = &mut state.active;
    active.retain(|&id| {
        let Some(player) = players.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        if player.progress.value_at(now) < threshold {
            player.reset();
            false
        } else {
            true
        }
    });

    // 2. Pick up to one waiting player per free lane
    let free = state.free_lanes(config.lanes);
    if free.is_empty() {
        log::debug!("schedule at tick {now}: no free lanes");
        return Vec::new();
    }

    let mut waiting: Vec<usize> = state
        .players
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.active)
        .map(|(i, _)| i)
        .collect();

    if config.selection == SelectionMode::Shuffled {
        let mut rng = state.rng_state.to_rng();
        waiting.shuffle(&mut rng);
        state.rng_state.stream += 1;
    }
    waiting.truncate(free.len());

    // 3. Assign each selected player the guide path of a free lane and
    //    start its countdown and delayed shrink
    let mut activated = Vec::new();
    for (slot, &player_index) in waiting.iter().enumerate() {
        let lane = free[slot];
        let Some(path) = layout.guide_path(lane) else {
            continue;
        };
        let progress = Anim::new(
            now,
            config.traversal_ticks(),
            1.0,
            0.0,
            config.position_easing,
        );
        let scale = Anim::new(
            now + config.scale_delay_ticks(),
            config.scale_duration_ticks(),
            1.0,
            config.scale_floor,
            config.scale_easing,
        );
        let player = &mut state.players[player_index];
        player.activate(path.clone(), progress, scale);
        let id = player.id;
        state.active.push(id);
        activated.push(id);
        log::info!("tick {now}: player {id} enters lane {lane}");
    }

    log::debug!(
        "schedule at tick {now}: {} activated, {} active",
        activated.len(),
        state.active.len()
    );
    activated
}
