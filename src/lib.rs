//! Spiral Raffle - a raffle-style visual reveal engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spiral geometry, lane scheduling, animation)
//! - `renderer`: Draw-command frame building (no GPU or platform dependency)
//! - `config`: Data-driven tuning of lanes, timing, and spiral shape

pub mod config;
pub mod renderer;
pub mod sim;

pub use config::RaffleConfig;

use glam::Vec2;

/// Engine configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Canvas aspect ratio (width / height), portrait 3:4
    pub const CANVAS_ASPECT: f32 = 3.0 / 4.0;
    /// Default canvas width in pixels
    pub const DEFAULT_CANVAS_WIDTH: f32 = 600.0;

    /// Spiral shape defaults: r(theta) = a * e^(b * theta)
    pub const SPIRAL_A: f32 = 10.0;
    pub const SPIRAL_B: f32 = 0.95;
    pub const SPIRAL_REVOLUTIONS: f32 = 1.0;

    /// Sample counts for the visible curve and the travel guide
    pub const CURVE_SAMPLES: usize = 64;
    pub const GUIDE_SAMPLES: usize = 350;

    /// Scheduler defaults
    pub const TICK_INTERVAL_MS: u32 = 500;
    pub const TRAVERSAL_MS: u32 = 8000;
    /// Position progress below this counts as traversal complete
    pub const COMPLETION_THRESHOLD: f32 = 0.05;
    /// Fraction of the guide path a player may actually cover
    pub const USABLE_RANGE: f32 = 0.8;

    /// Scale shrink defaults
    pub const SCALE_DELAY_MS: u32 = 4000;
    pub const SCALE_FLOOR: f32 = 0.4;

    /// Sprite sizing
    pub const SPRITE_BASE_SIZE: f32 = 48.0;
    /// Sprite size never shrinks below this fraction of base
    pub const SPRITE_MIN_SCALE: f32 = 1.0 / 3.0;

    /// Streak highlight: window length in curve points, advance per tick
    pub const STREAK_WINDOW: usize = 8;
    pub const STREAK_SPEED: f32 = 0.5;

    /// Stroke width for spiral paths
    pub const PATH_STROKE_WIDTH: f32 = 2.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Rotate a point rigidly about a center by the given angle in degrees.
///
/// Translate to the origin, apply the rotation matrix, translate back.
/// Degrees 0 is the exact identity (sin 0 = 0, cos 0 = 1).
pub fn rotate_about(point: Vec2, center: Vec2, degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    let (sin, cos) = radians.sin_cos();
    let translated = point - center;
    let rotated = Vec2::new(
        translated.x * cos - translated.y * sin,
        translated.x * sin + translated.y * cos,
    );
    rotated + center
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_polar_to_cartesian_axes() {
        let p = polar_to_cartesian(5.0, 0.0);
        assert!((p.x - 5.0).abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);

        let p = polar_to_cartesian(5.0, FRAC_PI_2);
        assert!(p.x.abs() < 1e-5);
        assert!((p.y - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let center = Vec2::new(300.0, 400.0);
        let p = Vec2::new(310.0, 450.0);
        let rotated = rotate_about(p, center, 0.0);
        assert_eq!(rotated, p);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let center = Vec2::ZERO;
        let p = Vec2::new(1.0, 0.0);
        let rotated = rotate_about(p, center, 90.0);
        assert!(rotated.x.abs() < 1e-6);
        assert!((rotated.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_full_turn_returns_home() {
        let center = Vec2::new(100.0, 100.0);
        let p = Vec2::new(250.0, 80.0);
        let rotated = rotate_about(p, center, 360.0);
        assert!((rotated - p).length() < 1e-3);
    }
}
