//! Load-time auto-correction of configuration data

use crate::axis::AxisMode;
use crate::season::SeasonConfig;

/// A non-fatal configuration problem that was corrected in place
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigIssue {
    #[error("{season}: snow chance {value} outside [0, 1], clamped")]
    SnowChanceClamped { season: String, value: f32 },

    #[error("{season}: {field} range inverted ({min} > {max}), swapped")]
    RangeSwapped {
        season: String,
        field: &'static str,
        min: f32,
        max: f32,
    },

    #[error("{season}: {field} range empty at {value}, widened")]
    RangeWidened {
        season: String,
        field: &'static str,
        value: f32,
    },

    #[error("{season}: check interval {value} not positive, reset to 1 hour")]
    CheckIntervalReset { season: String, value: f32 },

    #[error("{season}/{body}: orbital period {period} not positive, orbit removed")]
    OrbitRemoved {
        season: String,
        body: String,
        period: f32,
    },

    #[error("{season}/{body}: {axis} axis oscillation range inverted ({min} > {max}), swapped")]
    AxisRangeSwapped {
        season: String,
        body: String,
        axis: &'static str,
        min: f32,
        max: f32,
    },
}

/// Corrects `(min, max)` so that `0 <= min < max`, recording what changed
fn fix_range(
    season: &str,
    field: &'static str,
    min: &mut f32,
    max: &mut f32,
    issues: &mut Vec<ConfigIssue>,
) {
    if *min > *max {
        issues.push(ConfigIssue::RangeSwapped {
            season: season.to_string(),
            field,
            min: *min,
            max: *max,
        });
        std::mem::swap(min, max);
    }
    if *min < 0.0 {
        *min = 0.0;
    }
    if *max <= *min {
        issues.push(ConfigIssue::RangeWidened {
            season: season.to_string(),
            field,
            value: *min,
        });
        *max = *min + 1.0;
    }
}

/// Auto-correct one season's data in place
pub(crate) fn validate_season(season: &mut SeasonConfig, issues: &mut Vec<ConfigIssue>) {
    let name = season.name.clone();
    let weather = &mut season.weather;

    if !(0.0..=1.0).contains(&weather.snow_chance) {
        issues.push(ConfigIssue::SnowChanceClamped {
            season: name.clone(),
            value: weather.snow_chance,
        });
        weather.snow_chance = weather.snow_chance.clamp(0.0, 1.0);
    }

    fix_range(
        &name,
        "snow duration",
        &mut weather.min_snow_hours,
        &mut weather.max_snow_hours,
        issues,
    );
    fix_range(
        &name,
        "clear duration",
        &mut weather.min_clear_hours,
        &mut weather.max_clear_hours,
        issues,
    );

    if weather.check_interval_hours <= 0.0 {
        issues.push(ConfigIssue::CheckIntervalReset {
            season: name.clone(),
            value: weather.check_interval_hours,
        });
        weather.check_interval_hours = 1.0;
    }

    for body in &mut season.bodies {
        if let Some(orbit) = &body.orbit {
            if orbit.period_days <= 0.0 {
                issues.push(ConfigIssue::OrbitRemoved {
                    season: name.clone(),
                    body: body.name.clone(),
                    period: orbit.period_days,
                });
                body.orbit = None;
            }
        }

        for (axis, axis_name) in body.axes.iter_mut().zip(["X", "Y", "Z"]) {
            if axis.mode == AxisMode::Oscillate && axis.min_degrees > axis.max_degrees {
                issues.push(ConfigIssue::AxisRangeSwapped {
                    season: name.clone(),
                    body: body.name.clone(),
                    axis: axis_name,
                    min: axis.min_degrees,
                    max: axis.max_degrees,
                });
                std::mem::swap(&mut axis.min_degrees, &mut axis.max_degrees);
            }
        }
    }
}
