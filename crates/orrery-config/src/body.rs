//! Celestial body configuration

use orrery_core::Axis;
use serde::{Deserialize, Serialize};

use crate::axis::AxisConfig;

/// Orbital parameters for moon-type bodies
///
/// Drives the slow secondary Y-axis offset that makes a moon rise later each
/// day instead of tracking the sun exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitConfig {
    /// Length of one full orbit, in in-game days
    pub period_days: f32,
    /// Starting point within the orbit, in days
    pub phase_offset_days: f32,
}

impl OrbitConfig {
    /// An orbit of the given period starting at phase zero
    pub fn new(period_days: f32) -> Self {
        Self {
            period_days,
            phase_offset_days: 0.0,
        }
    }
}

/// Motion settings for one celestial body within a season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    /// Display name ("Sun", "Pale Moon", ...)
    pub name: String,
    /// Inactive bodies keep their base rotation untouched
    pub active: bool,
    /// Per-axis motion, indexed by [`Axis`]
    pub axes: [AxisConfig; 3],
    /// Present only for moon-type bodies
    pub orbit: Option<OrbitConfig>,
}

impl BodyConfig {
    /// A new active body with all axes disabled
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
            axes: Default::default(),
            orbit: None,
        }
    }

    /// Settings for the given axis
    pub fn axis(&self, axis: Axis) -> &AxisConfig {
        &self.axes[axis.index()]
    }

    /// Mutable settings for the given axis
    pub fn axis_mut(&mut self, axis: Axis) -> &mut AxisConfig {
        &mut self.axes[axis.index()]
    }

    /// Whether this body carries orbital drift
    pub fn is_moon(&self) -> bool {
        self.orbit.is_some()
    }

    /// Builder-style: set one axis' settings
    pub fn with_axis(mut self, axis: Axis, config: AxisConfig) -> Self {
        self.axes[axis.index()] = config;
        self
    }

    /// Builder-style: attach an orbit
    pub fn with_orbit(mut self, orbit: OrbitConfig) -> Self {
        self.orbit = Some(orbit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let moon = BodyConfig::new("Moon")
            .with_axis(Axis::Y, AxisConfig::day_locked())
            .with_orbit(OrbitConfig::new(29.5));

        assert!(moon.is_moon());
        assert!(moon.axis(Axis::Y).enabled);
        assert!(!moon.axis(Axis::X).enabled);
        assert_eq!(moon.orbit.as_ref().map(|o| o.period_days), Some(29.5));
    }
}
