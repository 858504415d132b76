//! Raffle tuning configuration
//!
//! All timing is expressed in milliseconds and converted to simulation
//! ticks at the fixed timestep, so a config file reads naturally while the
//! scheduler stays wall-clock free.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::sim::easing::Easing;
use crate::sim::spiral::SpiralParams;
use crate::sim::state::{SelectionMode, SimError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaffleConfig {
    /// Number of spiral lanes (and the bound on concurrently active players)
    pub lanes: usize,
    /// Scheduling interval
    pub tick_interval_ms: u32,
    /// Duration of one full lane traversal
    pub traversal_ms: u32,
    /// Delay before the sprite starts shrinking
    pub scale_delay_ms: u32,
    /// Final sprite scale after the shrink
    pub scale_floor: f32,
    /// Position progress below this counts as traversal complete
    pub completion_threshold: f32,
    /// Fraction of the guide path actually covered (keeps sprites off the
    /// exact center)
    pub usable_range: f32,
    /// Spiral shape shared by every lane
    pub spiral: SpiralParams,
    /// Sample count for the visible decorative curve
    pub curve_samples: usize,
    /// Sample count for the arc-length guide curve
    pub guide_samples: usize,
    pub position_easing: Easing,
    pub scale_easing: Easing,
    pub selection: SelectionMode,
    /// Also emit guide-path strokes (debug aid; the reference keeps the
    /// equivalent drawing commented out)
    pub draw_guides: bool,
}

impl Default for RaffleConfig {
    fn default() -> Self {
        Self {
            lanes: 4,
            tick_interval_ms: consts::TICK_INTERVAL_MS,
            traversal_ms: consts::TRAVERSAL_MS,
            scale_delay_ms: consts::SCALE_DELAY_MS,
            scale_floor: consts::SCALE_FLOOR,
            completion_threshold: consts::COMPLETION_THRESHOLD,
            usable_range: consts::USABLE_RANGE,
            spiral: SpiralParams::default(),
            curve_samples: consts::CURVE_SAMPLES,
            guide_samples: consts::GUIDE_SAMPLES,
            position_easing: Easing::FastOutSlowIn,
            scale_easing: Easing::Linear,
            selection: SelectionMode::InOrder,
            draw_guides: false,
        }
    }
}

/// Convert a millisecond duration to simulation ticks (at least 1)
fn ms_to_ticks(ms: u32) -> u64 {
    (((ms as f32 / 1000.0) / consts::SIM_DT).round() as u64).max(1)
}

impl RaffleConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        if self.lanes == 0 {
            return Err(SimError::InvalidConfig("lanes must be at least 1".into()));
        }
        if self.spiral.b == 0.0 {
            return Err(SimError::InvalidConfig(
                "spiral growth constant b must be nonzero".into(),
            ));
        }
        if self.curve_samples < 2 || self.guide_samples < 2 {
            return Err(SimError::InvalidConfig(
                "sample counts must be at least 2".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.usable_range) || self.usable_range == 0.0 {
            return Err(SimError::InvalidConfig(
                "usable_range must be in (0, 1]".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.completion_threshold) {
            return Err(SimError::InvalidConfig(
                "completion_threshold must be in [0, 1)".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.scale_floor) {
            return Err(SimError::InvalidConfig(
                "scale_floor must be in [0, 1]".into(),
            ));
        }
        Ok(())
    }

    /// Scheduling interval in ticks
    pub fn interval_ticks(&self) -> u64 {
        ms_to_ticks(self.tick_interval_ms)
    }

    /// Traversal duration in ticks
    pub fn traversal_ticks(&self) -> u64 {
        ms_to_ticks(self.traversal_ms)
    }

    /// Shrink delay in ticks, capped at the traversal duration
    pub fn scale_delay_ticks(&self) -> u64 {
        ms_to_ticks(self.scale_delay_ms).min(self.traversal_ticks())
    }

    /// Shrink duration: the traversal remainder after the delay
    pub fn scale_duration_ticks(&self) -> u64 {
        (self.traversal_ticks() - self.scale_delay_ticks()).max(1)
    }

    /// Load from a JSON file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("bad config {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no config at {}; using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates() {
        assert!(RaffleConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_growth() {
        let mut config = RaffleConfig::default();
        config.spiral.b = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_degenerate_sampling() {
        let mut config = RaffleConfig::default();
        config.curve_samples = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_lanes() {
        let mut config = RaffleConfig::default();
        config.lanes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tick_conversions() {
        let config = RaffleConfig::default();
        // 500 ms at 60 Hz
        assert_eq!(config.interval_ticks(), 30);
        // 8000 ms at 60 Hz
        assert_eq!(config.traversal_ticks(), 480);
        // Delay plus shrink spans exactly the traversal
        assert_eq!(
            config.scale_delay_ticks() + config.scale_duration_ticks(),
            config.traversal_ticks()
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = RaffleConfig::default();
        config.lanes = 6;
        config.selection = SelectionMode::Shuffled;
        let json = serde_json::to_string(&config).unwrap();
        let back: RaffleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: RaffleConfig = serde_json::from_str(r#"{"lanes": 8}"#).unwrap();
        assert_eq!(config.lanes, 8);
        assert_eq!(config.tick_interval_ms, 500);
    }
}
