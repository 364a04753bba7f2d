//! Day-length synchronization auditing
//!
//! Editor tooling rewrites day-locked axis speeds through
//! [`SeasonTable::resync_speeds`](orrery_config::SeasonTable::resync_speeds);
//! this report surfaces axes that were authored or mutated past that.

use orrery_config::{AxisMode, SeasonTable};
use orrery_core::{Axis, BodyId, SeasonId};
use serde::{Deserialize, Serialize};

use crate::calculator::RotationCalculator;

/// A day-locked axis whose configured speed no longer matches the day length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsyncedAxis {
    pub season: SeasonId,
    pub body: BodyId,
    pub body_name: String,
    pub axis: Axis,
    /// Speed currently in the configuration, deg/s
    pub configured_speed: f32,
    /// Speed one revolution per day requires, deg/s
    pub required_speed: f32,
}

impl RotationCalculator {
    /// Report every day-locked continuous axis whose speed diverges from
    /// `360 / day_length` by more than `tolerance` deg/s
    pub fn unsynced_axes(&self, table: &SeasonTable, tolerance: f32) -> Vec<UnsyncedAxis> {
        let required = self.required_day_speed();
        let mut report = Vec::new();

        for (season_index, season) in table.iter().enumerate() {
            for (body_index, body) in season.bodies.iter().enumerate() {
                for axis in Axis::ALL {
                    let config = body.axis(axis);
                    if !config.enabled
                        || !config.lock_to_day_length
                        || config.mode != AxisMode::Continuous
                    {
                        continue;
                    }
                    if (config.speed - required).abs() > tolerance {
                        report.push(UnsyncedAxis {
                            season: SeasonId(season_index as u32),
                            body: BodyId(body_index as u32),
                            body_name: body.name.clone(),
                            axis,
                            configured_speed: config.speed,
                            required_speed: required,
                        });
                    }
                }
            }
        }
        report
    }
}
