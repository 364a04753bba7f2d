//! Calendar clock: celestial time, day/year counters, and the season
//! state machine
//!
//! The master clock every other system reads. Constructed once with its
//! season table and passed by reference into dependents; nothing here is a
//! global.

use orrery_config::{SeasonConfig, SeasonTable};
use orrery_core::{smooth_step, SeasonId};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::events::{
    CalendarEvents, DayChanged, SeasonChanged, SeasonTransitionProgress, TimeScaleChanged,
    YearChanged,
};

/// Calendar timing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Length of one in-game day in celestial seconds (minimum 1)
    pub day_length_seconds: f32,
    /// Days in a year before the counter wraps to 1
    pub days_per_year: u32,
    /// Days each season lasts; the final season absorbs any remainder
    pub days_per_season: u32,
    /// In-game seconds per real second (0 freezes time)
    pub time_scale: f32,
    /// Extra multiplier applied on top of the time scale, for celestial
    /// fast-forward without touching gameplay speed
    pub celestial_multiplier: f32,
    /// Real seconds a season transition blend takes
    pub transition_duration_seconds: f32,
    /// Day the simulation starts on (1-based)
    pub start_day: u32,
    /// Year the simulation starts in
    pub start_year: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            day_length_seconds: 1440.0,
            days_per_year: 360,
            days_per_season: 90,
            time_scale: 1.0,
            celestial_multiplier: 1.0,
            transition_duration_seconds: 10.0,
            start_day: 1,
            start_year: 1,
        }
    }
}

/// Owns celestial-time accumulation and the season state machine
pub struct CalendarClock {
    config: CalendarConfig,
    seasons: SeasonTable,
    celestial_time: f64,
    /// Celestial time at which the current day began
    day_start: f64,
    day: u32,
    year: u32,
    current_season: SeasonId,
    target_season: SeasonId,
    transitioning: bool,
    transition_elapsed: f32,
    transition_progress: f32,
    paused: bool,
    /// Subscriber lists for calendar notifications
    pub events: CalendarEvents,
}

impl CalendarClock {
    /// Build a clock, validating the season table and resynchronizing
    /// day-locked axis speeds to the configured day length
    pub fn new(mut config: CalendarConfig, mut seasons: SeasonTable) -> Self {
        config.day_length_seconds = config.day_length_seconds.max(1.0);
        config.days_per_year = config.days_per_year.max(1);
        config.days_per_season = config.days_per_season.max(1);
        config.time_scale = config.time_scale.max(0.0);
        config.transition_duration_seconds = config.transition_duration_seconds.max(f32::EPSILON);

        seasons.validate();
        seasons.resync_speeds(config.day_length_seconds);

        let day = config.start_day.clamp(1, config.days_per_year);
        let year = config.start_year.max(1);
        let mut clock = Self {
            celestial_time: 0.0,
            day_start: 0.0,
            day,
            year,
            current_season: SeasonId(0),
            target_season: SeasonId(0),
            transitioning: false,
            transition_elapsed: 0.0,
            transition_progress: 0.0,
            paused: false,
            events: CalendarEvents::default(),
            config,
            seasons,
        };
        let season = clock.season_for_day(day);
        clock.current_season = season;
        clock.target_season = season;

        info!(
            "calendar clock initialized: {} seasons, {}s day, day {}/{} of year {}",
            clock.seasons.len(),
            clock.config.day_length_seconds,
            clock.day,
            clock.config.days_per_year,
            clock.year
        );
        clock
    }

    /// Advance the clock by one tick of `delta_seconds` real time
    ///
    /// Skipped entirely while paused. Day and season evaluation happen here
    /// and nowhere else, so readers within a tick always see a fully
    /// advanced clock.
    pub fn update(&mut self, delta_seconds: f32) {
        if self.paused {
            return;
        }

        self.celestial_time +=
            f64::from(delta_seconds * self.config.time_scale * self.config.celestial_multiplier);

        let day_length = f64::from(self.config.day_length_seconds);
        let mut day_rolled = false;
        while self.celestial_time - self.day_start >= day_length {
            self.day_start += day_length;
            self.advance_day();
            day_rolled = true;
        }
        if day_rolled {
            self.evaluate_season();
        }

        if self.transitioning {
            self.advance_transition(delta_seconds);
        }
    }

    /// Start a transition if the calendar day has moved into another season
    fn evaluate_season(&mut self) {
        let expected = self.season_for_day(self.day);
        if expected != self.current_season && (!self.transitioning || expected != self.target_season)
        {
            self.start_season_transition(expected);
        }
    }

    fn advance_day(&mut self) {
        self.day += 1;
        if self.day > self.config.days_per_year {
            self.day = 1;
            self.year += 1;
            self.events.year_changed.emit(&YearChanged { year: self.year });
        }
        self.events.day_changed.emit(&DayChanged {
            day: self.day,
            year: self.year,
        });
    }

    /// Season the given day falls in, clamped to the table
    fn season_for_day(&self, day: u32) -> SeasonId {
        let index = (day.saturating_sub(1) / self.config.days_per_season) as usize;
        let last = self.seasons.len().saturating_sub(1);
        SeasonId(index.min(last) as u32)
    }

    /// Begin blending toward `target`; progress restarts at zero
    pub fn start_season_transition(&mut self, target: SeasonId) {
        if target == self.current_season && !self.transitioning {
            return;
        }
        if self.seasons.get(target).is_none() {
            warn!("starting transition toward {target} with no configuration; dependents will fall back");
        }
        self.target_season = target;
        self.transitioning = true;
        self.transition_elapsed = 0.0;
        self.transition_progress = 0.0;
    }

    fn advance_transition(&mut self, delta_seconds: f32) {
        self.transition_elapsed += delta_seconds;
        let progress =
            smooth_step(self.transition_elapsed / self.config.transition_duration_seconds);
        self.transition_progress = progress;
        self.events
            .season_transition_progress
            .emit(&SeasonTransitionProgress {
                from: self.current_season,
                to: self.target_season,
                progress,
            });

        if progress >= 1.0 {
            let from = self.current_season;
            self.current_season = self.target_season;
            self.transitioning = false;
            self.transition_progress = 0.0;
            if from != self.current_season {
                self.events.season_changed.emit(&SeasonChanged {
                    from,
                    to: self.current_season,
                });
            }
        }
    }

    /// Jump to a season, either blended or immediately
    pub fn set_season(&mut self, season: SeasonId, immediate: bool) {
        if immediate {
            let from = self.current_season;
            self.current_season = season;
            self.target_season = season;
            self.transitioning = false;
            self.transition_progress = 0.0;
            if from != season {
                self.events.season_changed.emit(&SeasonChanged { from, to: season });
            }
        } else {
            self.start_season_transition(season);
        }
    }

    /// Set the day and year counters; the current day restarts at the
    /// present celestial time and the season is re-evaluated right away
    pub fn set_day(&mut self, day: u32, year: u32) {
        self.day = day.clamp(1, self.config.days_per_year);
        self.year = year.max(1);
        self.day_start = self.celestial_time;
        self.events.day_changed.emit(&DayChanged {
            day: self.day,
            year: self.year,
        });
        self.evaluate_season();
    }

    /// Set the celestial-time accumulator directly
    ///
    /// Forward jumps fast-forward day rollovers on the next update;
    /// backward jumps restart the current day at the new time.
    pub fn set_celestial_time(&mut self, time: f64) {
        self.celestial_time = time;
        if time < self.day_start {
            self.day_start = time;
        }
    }

    /// Change the time scale (clamped to >= 0) and notify subscribers
    pub fn set_time_scale(&mut self, scale: f32) {
        self.config.time_scale = scale.max(0.0);
        self.events.time_scale_changed.emit(&TimeScaleChanged {
            time_scale: self.config.time_scale,
        });
    }

    /// Change the day length (clamped to >= 1 second) and resynchronize
    /// day-locked axis speeds
    pub fn set_day_length(&mut self, seconds: f32) {
        self.config.day_length_seconds = seconds.max(1.0);
        self.seasons.resync_speeds(self.config.day_length_seconds);
    }

    /// Stop accumulating time
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume accumulating time
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Configuration for one season; a miss is warned and returns `None` so
    /// dependents can fall back to base rotation / no weather
    pub fn seasonal_data(&self, season: SeasonId) -> Option<&SeasonConfig> {
        let config = self.seasons.get(season);
        if config.is_none() {
            warn!("no seasonal configuration for {season}");
        }
        config
    }

    /// The full season table (quiet lookup path)
    pub fn seasons(&self) -> &SeasonTable {
        &self.seasons
    }

    /// Scaled, monotonically increasing simulation time in seconds
    pub fn celestial_time(&self) -> f64 {
        self.celestial_time
    }

    /// Current day of the year, 1-based
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Current year, 1-based
    pub fn year(&self) -> u32 {
        self.year
    }

    /// Season currently in effect
    pub fn current_season(&self) -> SeasonId {
        self.current_season
    }

    /// Season being blended toward; equals the current season when stable
    pub fn target_season(&self) -> SeasonId {
        self.target_season
    }

    /// Whether a season blend is in flight
    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Blend progress in `[0, 1]`; 0 when stable
    pub fn transition_progress(&self) -> f32 {
        self.transition_progress
    }

    /// Whether the clock is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Day length in celestial seconds
    pub fn day_length_seconds(&self) -> f32 {
        self.config.day_length_seconds
    }

    /// Current time scale
    pub fn time_scale(&self) -> f32 {
        self.config.time_scale
    }

    /// How far through the current day we are, in `[0, 1)`
    pub fn day_progress(&self) -> f32 {
        let day_length = f64::from(self.config.day_length_seconds);
        (((self.celestial_time - self.day_start) / day_length) as f32).clamp(0.0, 1.0)
    }

    /// Total elapsed days of celestial time, fractional part included
    pub fn elapsed_days(&self) -> f64 {
        self.celestial_time / f64::from(self.config.day_length_seconds)
    }

    /// Clock readout as (hour, minute, second) of the current day
    pub fn time_of_day(&self) -> (u32, u32, u32) {
        let day_seconds = f64::from(self.day_progress()) * 86_400.0;
        let hour = (day_seconds / 3600.0) as u32;
        let minute = (day_seconds / 60.0) as u32 % 60;
        let second = day_seconds as u32 % 60;
        (hour.min(23), minute, second)
    }

    /// Formatted HH:MM readout
    pub fn formatted_time(&self) -> String {
        let (hour, minute, _) = self.time_of_day();
        format!("{:02}:{:02}", hour, minute)
    }
}
