//! Timestamped value animation
//!
//! Replaces framework-driven "animate to X over D" with stored
//! (start tick, from, to, duration, easing); the current value is a pure
//! function of the current tick, so sampling never mutates state and
//! resetting a player implicitly cancels its in-flight animation.

use serde::{Deserialize, Serialize};

/// Easing curves applied to normalized elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    /// Quick start, gentle landing (cubic ease-out)
    FastOutSlowIn,
    /// Symmetric acceleration and deceleration (piecewise quadratic)
    EaseInOut,
}

impl Easing {
    /// Map t in [0, 1] to an eased fraction in [0, 1]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::FastOutSlowIn => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// A value animated between two endpoints over a tick interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anim {
    pub start_tick: u64,
    pub duration_ticks: u64,
    pub from: f32,
    pub to: f32,
    pub easing: Easing,
}

impl Anim {
    pub fn new(start_tick: u64, duration_ticks: u64, from: f32, to: f32, easing: Easing) -> Self {
        Self {
            start_tick,
            duration_ticks,
            from,
            to,
            easing,
        }
    }

    /// A constant value (the "not yet started" state)
    pub fn hold(value: f32) -> Self {
        Self {
            start_tick: 0,
            duration_ticks: 0,
            from: value,
            to: value,
            easing: Easing::Linear,
        }
    }

    /// Current value at the given tick. Holds `from` before the start tick
    /// and `to` after the animation ends.
    pub fn value_at(&self, now: u64) -> f32 {
        if now < self.start_tick {
            return self.from;
        }
        if self.duration_ticks == 0 {
            return self.to;
        }
        let elapsed = (now - self.start_tick) as f32;
        let t = elapsed / self.duration_ticks as f32;
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    /// Whether the animation has reached its end value
    pub fn finished(&self, now: u64) -> bool {
        now >= self.start_tick + self.duration_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::FastOutSlowIn, Easing::EaseInOut] {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in [Easing::Linear, Easing::FastOutSlowIn, Easing::EaseInOut] {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!(v >= prev, "{easing:?} not monotonic at {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_anim_countdown() {
        let anim = Anim::new(10, 20, 1.0, 0.0, Easing::Linear);
        assert_eq!(anim.value_at(0), 1.0); // before start
        assert_eq!(anim.value_at(10), 1.0);
        assert!((anim.value_at(20) - 0.5).abs() < 1e-6);
        assert_eq!(anim.value_at(30), 0.0);
        assert_eq!(anim.value_at(1000), 0.0);
        assert!(!anim.finished(29));
        assert!(anim.finished(30));
    }

    #[test]
    fn test_hold_is_constant() {
        let anim = Anim::hold(1.0);
        assert_eq!(anim.value_at(0), 1.0);
        assert_eq!(anim.value_at(u64::MAX), 1.0);
    }

    #[test]
    fn test_delayed_anim_holds_start_value() {
        let anim = Anim::new(100, 50, 1.0, 0.4, Easing::Linear);
        assert_eq!(anim.value_at(99), 1.0);
        assert!((anim.value_at(125) - 0.7).abs() < 1e-6);
        assert!((anim.value_at(150) - 0.4).abs() < 1e-6);
    }
}
