//! Per-season weather parameters

use serde::{Deserialize, Serialize};

/// Weather scheduling parameters for one season
///
/// All duration fields are in in-game hours; the weather system converts to
/// seconds using the active day length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Whether weather runs at all this season
    pub enabled: bool,
    /// Chance of a clear period ending in snowfall, per day, in `[0, 1]`
    pub snow_chance: f32,
    /// Shortest snowfall period, in hours
    pub min_snow_hours: f32,
    /// Longest snowfall period, in hours
    pub max_snow_hours: f32,
    /// Shortest clear period, in hours
    pub min_clear_hours: f32,
    /// Longest clear period, in hours
    pub max_clear_hours: f32,
    /// How often the early-change roll runs, in hours
    pub check_interval_hours: f32,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            snow_chance: 0.3,
            min_snow_hours: 2.0,
            max_snow_hours: 8.0,
            min_clear_hours: 12.0,
            max_clear_hours: 48.0,
            check_interval_hours: 1.0,
        }
    }
}

impl WeatherConfig {
    /// Enabled weather with the given snow chance and default durations
    pub fn snowy(snow_chance: f32) -> Self {
        Self {
            enabled: true,
            snow_chance,
            ..Default::default()
        }
    }

    /// Snow period bounds `(min, max)` in hours
    pub fn snow_range(&self) -> (f32, f32) {
        (self.min_snow_hours, self.max_snow_hours)
    }

    /// Clear period bounds `(min, max)` in hours
    pub fn clear_range(&self) -> (f32, f32) {
        (self.min_clear_hours, self.max_clear_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ranges_are_ordered() {
        let config = WeatherConfig::default();
        assert!(config.min_snow_hours < config.max_snow_hours);
        assert!(config.min_clear_hours < config.max_clear_hours);
        assert!((0.0..=1.0).contains(&config.snow_chance));
    }
}
