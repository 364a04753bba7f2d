//! Rotation evaluation for continuous, oscillating, and orbiting bodies

use glam::Vec3;
use orrery_core::{lerp, Axis, BodyId};
use orrery_config::{AxisConfig, AxisMode, BodyConfig, OrbitConfig, SeasonConfig};
use std::f32::consts::PI;

/// Below this continuous speed (deg/s) a sync partner is treated as
/// stationary and the locked axis falls back to its configured speed
pub const SYNC_SPEED_EPSILON: f32 = 1e-4;

/// Stateless rotation calculator
///
/// Construct once with the active day length and query freely; there is no
/// retained per-body state to invalidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationCalculator {
    day_length_seconds: f32,
}

impl RotationCalculator {
    /// Create a calculator for the given day length in seconds (minimum 1)
    pub fn new(day_length_seconds: f32) -> Self {
        Self {
            day_length_seconds: day_length_seconds.max(1.0),
        }
    }

    /// Day length this calculator converts days and hours with
    pub fn day_length_seconds(&self) -> f32 {
        self.day_length_seconds
    }

    /// Continuous speed required for exactly one revolution per day
    pub fn required_day_speed(&self) -> f32 {
        360.0 / self.day_length_seconds
    }

    /// Rotation of `body` under `season` at celestial time `time` (seconds)
    ///
    /// Fail-soft: a missing season, unknown body id, or inactive body
    /// returns `base` unchanged.
    pub fn calculate_rotation(
        &self,
        season: Option<&SeasonConfig>,
        body: BodyId,
        base: Vec3,
        time: f64,
    ) -> Vec3 {
        let Some(season) = season else {
            return base;
        };
        let Some(config) = season.body(body) else {
            return base;
        };
        if !config.active {
            return base;
        }
        self.body_rotation(config, base, time)
    }

    /// Rotation blended between two seasons' configurations
    ///
    /// Both rotations are evaluated at the same time value and interpolated
    /// component-wise. The blend is deliberately linear rather than
    /// spherical; transitions are short relative to rotation and oscillation
    /// periods, so the straight path stays visually indistinguishable.
    pub fn interpolate_rotation(
        &self,
        from: Option<&SeasonConfig>,
        to: Option<&SeasonConfig>,
        body: BodyId,
        base: Vec3,
        time: f64,
        progress: f32,
    ) -> Vec3 {
        let a = self.calculate_rotation(from, body, base, time);
        let b = self.calculate_rotation(to, body, base, time);
        a.lerp(b, progress.clamp(0.0, 1.0))
    }

    fn body_rotation(&self, config: &BodyConfig, base: Vec3, time: f64) -> Vec3 {
        let mut base = base;
        if let Some(orbit) = &config.orbit {
            base.y = (f64::from(base.y) + self.orbital_drift(orbit, time)).rem_euclid(360.0) as f32;
        }

        let mut rotation = base;
        for axis in Axis::ALL {
            let axis_config = config.axis(axis);
            if !axis_config.enabled {
                continue;
            }
            let angle = match axis_config.mode {
                AxisMode::Continuous => {
                    let swept = f64::from(axis_config.speed) * time;
                    (f64::from(axis.component(base)) + swept).rem_euclid(360.0) as f32
                }
                AxisMode::Oscillate => {
                    let speed = self.oscillation_speed(config, axis_config);
                    let phase = (time * f64::from(speed)).sin();
                    let u = ((phase + 1.0) / 2.0) as f32;
                    lerp(axis_config.min_degrees, axis_config.max_degrees, u)
                }
            };
            axis.set_component(&mut rotation, angle);
        }
        rotation
    }

    /// Oscillation phase rate for an axis, honoring a continuous sync partner
    ///
    /// A partner revolving at `S` deg/s takes `360 / S` seconds per turn, so
    /// one full swing per turn needs `2*PI / (360 / S) = PI * S / 180`.
    fn oscillation_speed(&self, body: &BodyConfig, axis: &AxisConfig) -> f32 {
        if let Some(partner_axis) = axis.sync_axis {
            let partner = body.axis(partner_axis);
            if partner.enabled
                && partner.mode == AxisMode::Continuous
                && partner.speed.abs() >= SYNC_SPEED_EPSILON
            {
                return PI * partner.speed / 180.0;
            }
        }
        axis.speed
    }

    /// Y-axis offset in degrees from orbital motion, smooth across day
    /// boundaries because elapsed days keeps its fractional part
    fn orbital_drift(&self, orbit: &OrbitConfig, time: f64) -> f64 {
        let period = f64::from(orbit.period_days);
        if period <= 0.0 {
            return 0.0;
        }
        let elapsed_days =
            time / f64::from(self.day_length_seconds) + f64::from(orbit.phase_offset_days);
        elapsed_days.rem_euclid(period) / period * 360.0
    }
}
