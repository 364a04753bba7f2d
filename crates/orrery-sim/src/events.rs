//! Event payloads and signal bundles for the simulation state machines

use orrery_core::{SeasonId, Signal};

use crate::weather::WeatherKind;

/// The day counter advanced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayChanged {
    pub day: u32,
    pub year: u32,
}

/// The year counter advanced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearChanged {
    pub year: u32,
}

/// A season transition committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonChanged {
    pub from: SeasonId,
    pub to: SeasonId,
}

/// Progress update while a season transition blends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonTransitionProgress {
    pub from: SeasonId,
    pub to: SeasonId,
    pub progress: f32,
}

/// The time scale was changed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScaleChanged {
    pub time_scale: f32,
}

/// A weather transition committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherChanged {
    pub from: WeatherKind,
    pub to: WeatherKind,
}

/// Progress update while a weather transition blends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherTransitionProgress {
    pub from: WeatherKind,
    pub to: WeatherKind,
    pub progress: f32,
}

/// Snow intensity moved (0 = clear sky, 1 = full snowfall)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherIntensityChanged {
    pub intensity: f32,
}

/// Signals owned by [`CalendarClock`](crate::CalendarClock)
#[derive(Debug, Default)]
pub struct CalendarEvents {
    pub day_changed: Signal<DayChanged>,
    pub year_changed: Signal<YearChanged>,
    pub season_changed: Signal<SeasonChanged>,
    pub season_transition_progress: Signal<SeasonTransitionProgress>,
    pub time_scale_changed: Signal<TimeScaleChanged>,
}

/// Signals owned by [`WeatherSystem`](crate::WeatherSystem)
#[derive(Debug, Default)]
pub struct WeatherEvents {
    pub weather_changed: Signal<WeatherChanged>,
    pub weather_transition_progress: Signal<WeatherTransitionProgress>,
    pub weather_intensity_changed: Signal<WeatherIntensityChanged>,
}
