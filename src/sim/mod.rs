//! Deterministic raffle simulation
//!
//! All scheduling and animation logic lives here. This module must be pure
//! and deterministic:
//! - Fixed timestep only, no wall clock
//! - Seeded RNG only (and only in shuffled selection)
//! - Stable roster order
//! - No rendering or platform dependencies

pub mod easing;
pub mod spiral;
pub mod state;
pub mod tick;

pub use easing::{Anim, Easing};
pub use spiral::{CanvasSize, LayoutKey, SpiralLayout, SpiralParams, SpiralPath};
pub use state::{Player, RaffleState, RngState, SelectionMode, SimError};
pub use tick::{schedule, tick};
