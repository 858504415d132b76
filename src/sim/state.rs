//! Raffle state and core simulation types
//!
//! Everything the scheduler mutates lives here. State is serializable apart
//! from the shared path handles, which are re-assigned from the geometry
//! cache on activation.

use std::sync::Arc;

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::easing::Anim;
use super::spiral::SpiralPath;

/// Simulation errors. Querying position without an assigned path is a
/// caller-contract violation and surfaces immediately; nothing retries it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("player {0} has no assigned path; position is undefined")]
    PathUnassigned(u32),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// How the scheduler picks waiting players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionMode {
    /// First inactive players in roster order (the reference behavior)
    #[default]
    InOrder,
    /// Seeded shuffle of the waiting pool each scheduling round
    Shuffled,
}

/// RNG state wrapper for serialization. The stream counter advances once
/// per shuffled scheduling round so rounds draw distinct permutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// A raffle participant traveling along a spiral lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    /// Image reference resolved by the host renderer
    pub image: String,
    /// Lane suggested at creation; the lane actually used is assigned by
    /// the scheduler and may differ
    pub lane_hint: usize,
    pub active: bool,
    /// Guide path shared read-only with every player on the same lane.
    /// Non-empty whenever `active` is true.
    #[serde(skip)]
    pub path: Option<Arc<SpiralPath>>,
    /// Position progress, counting down 1.0 -> 0.0 over the traversal
    pub progress: Anim,
    /// Sprite scale, shrinking 1.0 -> floor on a delayed schedule
    pub scale: Anim,
}

impl Player {
    pub fn new(id: u32, image: impl Into<String>, lane_hint: usize) -> Self {
        Self {
            id,
            image: image.into(),
            lane_hint,
            active: false,
            path: None,
            progress: Anim::hold(1.0),
            scale: Anim::hold(1.0),
        }
    }

    /// Assign a guide path and start both animations
    pub fn activate(&mut self, path: Arc<SpiralPath>, progress: Anim, scale: Anim) {
        self.path = Some(path);
        self.progress = progress;
        self.scale = scale;
        self.active = true;
    }

    /// Deactivate, clear the path, and re-arm animations at their start
    /// values. Any in-flight animation is cancelled by construction since
    /// values are derived from the stored anims, not pushed into them.
    pub fn reset(&mut self) {
        self.active = false;
        self.path = None;
        self.progress = Anim::hold(1.0);
        self.scale = Anim::hold(1.0);
    }

    /// Current position along the assigned guide path.
    ///
    /// `usable_range` caps how far along the point sequence progress can
    /// reach (1.0 = full path); the reference keeps it at 0.8 so sprites
    /// stop short of the exact spiral center.
    pub fn position(&self, now: u64, usable_range: f32) -> Result<Vec2, SimError> {
        let path = self
            .path
            .as_ref()
            .filter(|p| !p.points.is_empty())
            .ok_or(SimError::PathUnassigned(self.id))?;
        let fraction = self.progress.value_at(now).clamp(0.0, 1.0) * usable_range;
        let index = ((path.points.len() - 1) as f32 * fraction) as usize;
        Ok(path.points[index])
    }

    /// Current sprite scale (1.0 until the delayed shrink starts)
    pub fn scale_at(&self, now: u64) -> f32 {
        self.scale.value_at(now)
    }
}

/// Complete raffle state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaffleState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    /// Full roster, in entry order; the waiting pool is everyone inactive
    pub players: Vec<Player>,
    /// Ids of players currently traveling, bounded by the lane count
    pub active: Vec<u32>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Next tick at which the scheduler runs
    pub next_schedule_tick: u64,
}

impl RaffleState {
    pub fn new(seed: u64, players: Vec<Player>) -> Self {
        Self {
            seed,
            rng_state: RngState::new(seed),
            players,
            active: Vec::new(),
            time_ticks: 0,
            next_schedule_tick: 0,
        }
    }

    pub fn player(&self, id: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Active player count, bounded by the lane count at the end of any tick
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Lanes no active player currently travels, in ascending order
    pub fn free_lanes(&self, lane_count: usize) -> Vec<usize> {
        let occupied: Vec<usize> = self
            .players
            .iter()
            .filter(|p| p.active)
            .filter_map(|p| p.path.as_ref().map(|path| path.lane))
            .collect();
        (0..lane_count).filter(|l| !occupied.contains(l)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::easing::Easing;

    fn path_with_points(lane: usize, count: usize) -> Arc<SpiralPath> {
        Arc::new(SpiralPath {
            lane,
            points: (0..count).map(|i| Vec2::new(i as f32, 0.0)).collect(),
            arc_length_parameterized: true,
        })
    }

    #[test]
    fn test_position_without_path_is_an_error() {
        let player = Player::new(7, "user", 0);
        assert_eq!(
            player.position(0, 0.8),
            Err(SimError::PathUnassigned(7))
        );
    }

    #[test]
    fn test_position_indexing() {
        let mut player = Player::new(1, "user", 0);
        // 11 points, indices 0..=10
        player.activate(
            path_with_points(0, 11),
            Anim::new(0, 100, 1.0, 0.0, Easing::Linear),
            Anim::hold(1.0),
        );

        // At start: progress 1.0, usable 0.8 -> index 8
        let pos = player.position(0, 0.8).unwrap();
        assert_eq!(pos, Vec2::new(8.0, 0.0));

        // At end: progress 0.0 -> index 0
        let pos = player.position(100, 0.8).unwrap();
        assert_eq!(pos, Vec2::new(0.0, 0.0));

        // Full usable range reaches the last point
        let pos = player.position(0, 1.0).unwrap();
        assert_eq!(pos, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_reset_clears_path_and_rearms() {
        let mut player = Player::new(2, "user", 1);
        player.activate(
            path_with_points(1, 5),
            Anim::new(0, 10, 1.0, 0.0, Easing::Linear),
            Anim::new(5, 5, 1.0, 0.4, Easing::Linear),
        );
        assert!(player.active);

        player.reset();
        assert!(!player.active);
        assert!(player.path.is_none());
        assert_eq!(player.progress.value_at(1000), 1.0);
        assert_eq!(player.scale_at(1000), 1.0);
        assert!(player.position(0, 0.8).is_err());
    }

    #[test]
    fn test_free_lanes() {
        let mut players = vec![
            Player::new(1, "user", 0),
            Player::new(2, "user", 1),
            Player::new(3, "user", 2),
        ];
        players[0].activate(
            path_with_points(0, 5),
            Anim::hold(1.0),
            Anim::hold(1.0),
        );
        players[2].activate(
            path_with_points(2, 5),
            Anim::hold(1.0),
            Anim::hold(1.0),
        );
        let state = RaffleState::new(1, players);
        assert_eq!(state.free_lanes(4), vec![1, 3]);
    }

    #[test]
    fn test_rng_state_streams_differ() {
        use rand::RngCore;
        let rng_state = RngState::new(42);
        let a = rng_state.to_rng().next_u32();
        let later = RngState { seed: 42, stream: 1 };
        let b = later.to_rng().next_u32();
        assert_ne!(a, b);
    }
}
