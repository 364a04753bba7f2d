//! Per-axis rotation settings for a celestial body

use orrery_core::Axis;
use serde::{Deserialize, Serialize};

/// How an axis moves over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisMode {
    /// Unbounded rotation at a constant angular rate
    #[default]
    Continuous,
    /// Bounded sinusoidal back-and-forth between a minimum and maximum angle
    Oscillate,
}

/// Motion settings for a single rotation axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    /// Whether this axis moves at all
    pub enabled: bool,
    /// Continuous or oscillating motion
    pub mode: AxisMode,
    /// Continuous: degrees per second. Oscillate: phase rate in radians per
    /// second, giving a full swing period of `2*PI / speed`.
    pub speed: f32,
    /// Lower bound of the oscillation range, in degrees
    pub min_degrees: f32,
    /// Upper bound of the oscillation range, in degrees
    pub max_degrees: f32,
    /// Lock this axis' oscillation frequency to a continuous partner axis,
    /// completing exactly one swing per partner revolution
    pub sync_axis: Option<Axis>,
    /// Force a continuous axis to one full revolution per in-game day
    pub lock_to_day_length: bool,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: AxisMode::Continuous,
            speed: 1.0,
            min_degrees: -30.0,
            max_degrees: 30.0,
            sync_axis: None,
            lock_to_day_length: false,
        }
    }
}

impl AxisConfig {
    /// A continuous axis at the given rate in degrees per second
    pub fn continuous(speed: f32) -> Self {
        Self {
            enabled: true,
            mode: AxisMode::Continuous,
            speed,
            ..Default::default()
        }
    }

    /// A continuous axis locked to one revolution per day; the speed is
    /// rewritten by [`resync_speeds`](crate::SeasonTable::resync_speeds)
    pub fn day_locked() -> Self {
        Self {
            enabled: true,
            mode: AxisMode::Continuous,
            lock_to_day_length: true,
            ..Default::default()
        }
    }

    /// An oscillating axis swinging between `min` and `max` degrees
    pub fn oscillate(speed: f32, min_degrees: f32, max_degrees: f32) -> Self {
        Self {
            enabled: true,
            mode: AxisMode::Oscillate,
            speed,
            min_degrees,
            max_degrees,
            ..Default::default()
        }
    }

    /// Oscillation synchronized to a continuous partner axis
    pub fn oscillate_synced(partner: Axis, min_degrees: f32, max_degrees: f32) -> Self {
        Self {
            enabled: true,
            mode: AxisMode::Oscillate,
            min_degrees,
            max_degrees,
            sync_axis: Some(partner),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let cont = AxisConfig::continuous(15.0);
        assert!(cont.enabled);
        assert_eq!(cont.mode, AxisMode::Continuous);
        assert_eq!(cont.speed, 15.0);

        let osc = AxisConfig::oscillate(0.5, -20.0, 20.0);
        assert_eq!(osc.mode, AxisMode::Oscillate);
        assert_eq!(osc.min_degrees, -20.0);
        assert_eq!(osc.max_degrees, 20.0);

        let synced = AxisConfig::oscillate_synced(Axis::Y, 0.0, 45.0);
        assert_eq!(synced.sync_axis, Some(Axis::Y));

        let locked = AxisConfig::day_locked();
        assert!(locked.lock_to_day_length);
    }

    #[test]
    fn test_default_is_disabled() {
        assert!(!AxisConfig::default().enabled);
    }
}
