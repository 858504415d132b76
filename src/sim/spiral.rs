//! Logarithmic spiral geometry for lanes
//!
//! In polar coordinates a lane follows r(theta) = a * e^(b * theta).
//! Two sampling policies exist:
//! - uniform angle, for the visible decorative curve
//! - uniform arc length, for the guide curve players travel along, so
//!   traversal speed looks constant regardless of curvature
//!
//! Closed forms used for arc-length parameterization:
//!   L(theta) = (a * sqrt(1 + b^2) / b) * e^(b * theta)
//!   theta(L) = (1 / b) * ln(L * b / (a * sqrt(1 + b^2)))

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{polar_to_cartesian, rotate_about};

/// Shape parameters of a logarithmic spiral
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpiralParams {
    /// Scale constant (radius at theta = 0)
    pub a: f32,
    /// Growth constant, must be nonzero
    pub b: f32,
    /// Start angle in radians
    pub theta_min: f32,
    /// Number of revolutions between start and end angle
    pub revolutions: f32,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            a: crate::consts::SPIRAL_A,
            b: crate::consts::SPIRAL_B,
            theta_min: 0.0,
            revolutions: crate::consts::SPIRAL_REVOLUTIONS,
        }
    }
}

impl SpiralParams {
    /// End angle (start plus the full revolution span)
    #[inline]
    pub fn theta_max(&self) -> f32 {
        self.theta_min + self.revolutions * std::f32::consts::TAU
    }

    /// Cumulative arc length from the spiral pole to the given angle
    #[inline]
    pub fn arc_length_at(&self, theta: f32) -> f32 {
        (self.a * (1.0 + self.b * self.b).sqrt() / self.b) * (self.b * theta).exp()
    }

    /// Invert the arc-length function: angle at a given cumulative length
    #[inline]
    pub fn theta_at_arc_length(&self, length: f32) -> f32 {
        (length * self.b / (self.a * (1.0 + self.b * self.b).sqrt())).ln() / self.b
    }
}

/// Angular offset in degrees of a lane's decorative curve
#[inline]
pub fn decorative_offset(lane: usize, lane_count: usize) -> f32 {
    lane as f32 * 360.0 / lane_count as f32
}

/// Angular offset in degrees of a lane's guide curve, halfway between
/// neighboring decorative curves
#[inline]
pub fn guide_offset(lane: usize, lane_count: usize) -> f32 {
    decorative_offset(lane, lane_count) + 180.0 / lane_count as f32
}

/// An immutable sampled lane trajectory, shared read-only by every player
/// assigned to the lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpiralPath {
    pub lane: usize,
    /// samples + 1 points, from the spiral origin outward
    pub points: Vec<Vec2>,
    pub arc_length_parameterized: bool,
}

impl SpiralPath {
    /// Sample a decorative curve: `samples` evenly spaced angles plus the
    /// start point, rotated by the lane's decorative offset.
    pub fn decorative(
        params: &SpiralParams,
        center: Vec2,
        lane: usize,
        lane_count: usize,
        samples: usize,
    ) -> Self {
        let offset = decorative_offset(lane, lane_count);
        let points = sample_uniform_angle(params, center, samples)
            .map(|p| rotate_about(p, center, offset))
            .collect();
        Self {
            lane,
            points,
            arc_length_parameterized: false,
        }
    }

    /// Sample a guide curve: `samples` equal arc-length steps plus the start
    /// point, rotated to sit exactly between decorative curves.
    pub fn guide(
        params: &SpiralParams,
        center: Vec2,
        lane: usize,
        lane_count: usize,
        samples: usize,
    ) -> Self {
        let offset = guide_offset(lane, lane_count);
        let points = sample_uniform_arc_length(params, center, samples)
            .map(|p| rotate_about(p, center, offset))
            .collect();
        Self {
            lane,
            points,
            arc_length_parameterized: true,
        }
    }
}

/// Iterator over samples + 1 points at evenly spaced angles
fn sample_uniform_angle(
    params: &SpiralParams,
    center: Vec2,
    samples: usize,
) -> impl Iterator<Item = Vec2> + '_ {
    let span = params.theta_max() - params.theta_min;
    (0..=samples).map(move |i| {
        let theta = params.theta_min + (i as f32 / samples as f32) * span;
        let r = params.a * (params.b * theta).exp();
        center + polar_to_cartesian(r, theta)
    })
}

/// Iterator over samples + 1 points at equal arc-length steps
fn sample_uniform_arc_length(
    params: &SpiralParams,
    center: Vec2,
    samples: usize,
) -> impl Iterator<Item = Vec2> + '_ {
    let len_min = params.arc_length_at(params.theta_min);
    let len_max = params.arc_length_at(params.theta_max());
    (0..=samples).map(move |i| {
        let theta = if i == 0 {
            // Avoid round-tripping the start angle through ln/exp
            params.theta_min
        } else {
            let s = len_min + (i as f32 / samples as f32) * (len_max - len_min);
            params.theta_at_arc_length(s)
        };
        let r = params.a * (params.b * theta).exp();
        center + polar_to_cartesian(r, theta)
    })
}

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Portrait canvas at the default 3:4 aspect
    pub fn portrait(width: f32) -> Self {
        Self::new(width, width / crate::consts::CANVAS_ASPECT)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Everything the cached geometry depends on. A layout is rebuilt only
/// when its key changes (canvas resize, lane count, spiral reshape).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutKey {
    pub canvas: CanvasSize,
    pub lanes: usize,
    pub params: SpiralParams,
    pub curve_samples: usize,
    pub guide_samples: usize,
}

/// Cached per-lane geometry: one decorative and one guide curve per lane
#[derive(Debug, Clone)]
pub struct SpiralLayout {
    key: LayoutKey,
    pub decorative: Vec<Arc<SpiralPath>>,
    pub guide: Vec<Arc<SpiralPath>>,
}

impl SpiralLayout {
    pub fn new(key: LayoutKey) -> Self {
        let center = key.canvas.center();
        let decorative = (0..key.lanes)
            .map(|lane| {
                Arc::new(SpiralPath::decorative(
                    &key.params,
                    center,
                    lane,
                    key.lanes,
                    key.curve_samples,
                ))
            })
            .collect();
        let guide = (0..key.lanes)
            .map(|lane| {
                Arc::new(SpiralPath::guide(
                    &key.params,
                    center,
                    lane,
                    key.lanes,
                    key.guide_samples,
                ))
            })
            .collect();
        log::debug!(
            "computed spiral layout: {} lanes, {}x{} canvas",
            key.lanes,
            key.canvas.width,
            key.canvas.height
        );
        Self {
            key,
            decorative,
            guide,
        }
    }

    pub fn key(&self) -> &LayoutKey {
        &self.key
    }

    /// Recompute geometry iff the key changed
    pub fn ensure(&mut self, key: LayoutKey) {
        if self.key != key {
            *self = Self::new(key);
        }
    }

    pub fn lane_count(&self) -> usize {
        self.key.lanes
    }

    pub fn guide_path(&self, lane: usize) -> Option<&Arc<SpiralPath>> {
        self.guide.get(lane)
    }
}
