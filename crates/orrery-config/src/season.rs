//! Season table: the full set of per-season configurations

use orrery_core::{Axis, BodyId, SeasonId};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::axis::AxisConfig;
use crate::body::{BodyConfig, OrbitConfig};
use crate::validate::{self, ConfigIssue};
use crate::weather::WeatherConfig;

/// Everything one season changes about the sky and the weather
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonConfig {
    /// Display name ("Thaw", "Long Night", ...)
    pub name: String,
    /// Celestial bodies driven this season, indexed by [`BodyId`]
    pub bodies: Vec<BodyConfig>,
    /// Weather scheduling parameters
    pub weather: WeatherConfig,
}

impl SeasonConfig {
    /// A new season with no bodies and weather disabled
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bodies: Vec::new(),
            weather: WeatherConfig::default(),
        }
    }

    /// Settings for the given body, if it exists
    pub fn body(&self, id: BodyId) -> Option<&BodyConfig> {
        self.bodies.get(id.index())
    }

    /// Mutable settings for the given body
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut BodyConfig> {
        self.bodies.get_mut(id.index())
    }

    /// Builder-style: append a body
    pub fn with_body(mut self, body: BodyConfig) -> Self {
        self.bodies.push(body);
        self
    }

    /// Builder-style: set the weather block
    pub fn with_weather(mut self, weather: WeatherConfig) -> Self {
        self.weather = weather;
        self
    }
}

/// Ordered collection of seasons, indexed by [`SeasonId`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonTable {
    seasons: Vec<SeasonConfig>,
}

impl SeasonTable {
    /// Build a table from an ordered season list
    pub fn new(seasons: Vec<SeasonConfig>) -> Self {
        Self { seasons }
    }

    /// Look up one season's configuration
    pub fn get(&self, id: SeasonId) -> Option<&SeasonConfig> {
        self.seasons.get(id.index())
    }

    /// Mutable lookup, for editor tooling
    pub fn get_mut(&mut self, id: SeasonId) -> Option<&mut SeasonConfig> {
        self.seasons.get_mut(id.index())
    }

    /// Number of seasons
    pub fn len(&self) -> usize {
        self.seasons.len()
    }

    /// Whether the table holds no seasons
    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }

    /// Iterate seasons in id order
    pub fn iter(&self) -> impl Iterator<Item = &SeasonConfig> {
        self.seasons.iter()
    }

    /// Auto-correct invalid data in place and return what was fixed
    ///
    /// Inverted ranges are swapped, empty ranges widened, probabilities
    /// clamped, non-positive orbital periods dropped. Each fix is also
    /// logged as a warning; none are fatal.
    pub fn validate(&mut self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        for season in &mut self.seasons {
            validate::validate_season(season, &mut issues);
        }
        for issue in &issues {
            warn!("seasonal config: {issue}");
        }
        issues
    }

    /// Rewrite every day-locked continuous axis to one revolution per day
    ///
    /// The single sanctioned mutation after load; run by the calendar clock
    /// at startup and whenever the day length changes.
    pub fn resync_speeds(&mut self, day_length_seconds: f32) {
        let day_length = day_length_seconds.max(1.0);
        let speed = 360.0 / day_length;
        for season in &mut self.seasons {
            for body in &mut season.bodies {
                for axis in &mut body.axes {
                    if axis.enabled && axis.lock_to_day_length {
                        axis.speed = speed;
                    }
                }
            }
        }
    }
}

impl Default for SeasonTable {
    /// A single temperate season: day-locked sun, day-locked moon on a
    /// 29.5-day orbit, weather off
    fn default() -> Self {
        let sun = BodyConfig::new("Sun")
            .with_axis(Axis::Y, AxisConfig::day_locked())
            .with_axis(Axis::X, AxisConfig::oscillate_synced(Axis::Y, -23.5, 23.5));
        let moon = BodyConfig::new("Moon")
            .with_axis(Axis::Y, AxisConfig::day_locked())
            .with_orbit(OrbitConfig::new(29.5));

        Self::new(vec![SeasonConfig::new("Temperate")
            .with_body(sun)
            .with_body(moon)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisMode;

    #[test]
    fn test_lookup() {
        let table = SeasonTable::default();
        let season = table.get(SeasonId(0)).unwrap();
        assert_eq!(season.name, "Temperate");
        assert_eq!(season.body(BodyId(0)).unwrap().name, "Sun");
        assert!(season.body(BodyId(1)).unwrap().is_moon());

        assert!(table.get(SeasonId(99)).is_none());
        assert!(season.body(BodyId(99)).is_none());
    }

    #[test]
    fn test_resync_speeds() {
        let mut table = SeasonTable::default();
        table.resync_speeds(7200.0);

        let sun_y = table.get(SeasonId(0)).unwrap().body(BodyId(0)).unwrap().axis(Axis::Y);
        assert_eq!(sun_y.mode, AxisMode::Continuous);
        assert!((sun_y.speed - 0.05).abs() < 1e-6);

        // Synced oscillation axes are left alone
        let sun_x = table.get(SeasonId(0)).unwrap().body(BodyId(0)).unwrap().axis(Axis::X);
        assert_eq!(sun_x.mode, AxisMode::Oscillate);
    }

    #[test]
    fn test_resync_guards_degenerate_day_length() {
        let mut table = SeasonTable::default();
        table.resync_speeds(0.0);
        let sun_y = table.get(SeasonId(0)).unwrap().body(BodyId(0)).unwrap().axis(Axis::Y);
        assert_eq!(sun_y.speed, 360.0);
    }

    #[test]
    fn test_table_survives_serialization() {
        let table = SeasonTable::default();
        let json = serde_json::to_string(&table).unwrap();
        let restored: SeasonTable = serde_json::from_str(&json).unwrap();
        assert_eq!(table, restored);
    }
}
