//! Weather state machine: clear and snow periods scheduled off the calendar
//!
//! Runs independently of the season state machine but reads the calendar
//! clock for time, the active season's weather block, and season-blend
//! progress. Periods are duration-bounded draws; early changes are
//! low-probability rolls between period ends.

use orrery_config::WeatherConfig;
use orrery_core::{lerp, smooth_step};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calendar::CalendarClock;
use crate::events::{
    WeatherChanged, WeatherEvents, WeatherIntensityChanged, WeatherTransitionProgress,
};

/// Weather state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherKind {
    #[default]
    Clear,
    Snowing,
}

impl WeatherKind {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Snowing => "Snowing",
        }
    }

    /// Whether precipitation is falling in this state
    pub fn is_snowing(&self) -> bool {
        matches!(self, Self::Snowing)
    }
}

/// Damping applied to the configured snow chance at natural period ends
const PERIOD_SNOW_DAMPING: f32 = 0.3;
/// Probability of an early change per scheduled check
const EARLY_CHANGE_CHANCE: f64 = 0.05;
/// Scale on the early-change chance before half the period has elapsed
const YOUNG_PERIOD_SCALE: f64 = 0.2;
/// Scale on the snow chance for early Clear -> Snowing changes
const EARLY_SNOW_SCALE: f32 = 0.1;
/// Fallback period length when a season has no usable weather block
const DEFAULT_PERIOD_HOURS: f32 = 1.0;

/// In-game hours to celestial seconds at the clock's day length
fn hours_to_seconds(hours: f32, clock: &CalendarClock) -> f64 {
    f64::from(hours) * f64::from(clock.day_length_seconds()) / 24.0
}

/// Schedules and blends clear/snow weather periods
pub struct WeatherSystem {
    enabled: bool,
    current: WeatherKind,
    target: WeatherKind,
    transitioning: bool,
    transition_elapsed: f32,
    /// Real seconds a weather blend takes, minimum 1
    transition_duration: f32,
    progress: f32,
    intensity: f32,
    /// Celestial time the current period began
    period_start: f64,
    /// Celestial seconds the current period lasts
    period_duration: f64,
    /// Celestial time of the next early-change roll
    next_check: f64,
    rng: StdRng,
    config_warned: bool,
    /// Subscriber lists for weather notifications
    pub events: WeatherEvents,
}

impl Default for WeatherSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherSystem {
    /// A weather system with an entropy-seeded RNG
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// A weather system with a fixed seed, for deterministic runs
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            enabled: true,
            current: WeatherKind::Clear,
            target: WeatherKind::Clear,
            transitioning: false,
            transition_elapsed: 0.0,
            transition_duration: 5.0,
            progress: 0.0,
            intensity: 0.0,
            period_start: 0.0,
            period_duration: 0.0,
            next_check: 0.0,
            rng,
            config_warned: false,
            events: WeatherEvents::default(),
        }
    }

    /// Advance the weather by one tick; must run after the clock's update
    pub fn update(&mut self, delta_seconds: f32, clock: &CalendarClock) {
        if !self.enabled {
            return;
        }
        if self.transitioning {
            self.advance_transition(delta_seconds);
            return;
        }

        let time = clock.celestial_time();
        if time >= self.period_start + self.period_duration {
            self.on_period_end(time, clock);
        } else if time >= self.next_check {
            self.on_early_check(time, clock);
        }
    }

    /// Force a weather state
    ///
    /// `duration_seconds` overrides the sampled period length (forced
    /// periods are exempt from the configured bounds); `None` draws from
    /// the active season's configuration.
    pub fn force_weather(
        &mut self,
        state: WeatherKind,
        immediate: bool,
        duration_seconds: Option<f64>,
        clock: &CalendarClock,
    ) {
        let time = clock.celestial_time();
        let config = self.active_weather(clock);

        let duration = match duration_seconds {
            Some(seconds) => seconds.max(0.0),
            None => {
                let (min_hours, max_hours) = match (&config, state) {
                    (Some(c), WeatherKind::Snowing) => c.snow_range(),
                    (Some(c), WeatherKind::Clear) => c.clear_range(),
                    (None, _) => (DEFAULT_PERIOD_HOURS, DEFAULT_PERIOD_HOURS),
                };
                let hours = if max_hours > min_hours {
                    self.rng.gen_range(min_hours..max_hours)
                } else {
                    min_hours
                };
                hours_to_seconds(hours, clock)
            }
        };

        self.period_start = time;
        self.period_duration = duration;

        if immediate {
            let from = self.current;
            self.current = state;
            self.target = state;
            self.transitioning = false;
            self.progress = 0.0;
            self.set_intensity(if state.is_snowing() { 1.0 } else { 0.0 });
            if from != state {
                self.events.weather_changed.emit(&WeatherChanged { from, to: state });
            }
        } else if state != self.current {
            self.target = state;
            self.transitioning = true;
            self.transition_elapsed = 0.0;
            self.progress = 0.0;
        }

        match &config {
            Some(config) => self.schedule_check(config, time, clock),
            None => self.next_check = time + duration,
        }
    }

    /// Enable or disable the whole system; disabling forces Clear
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if enabled {
            // Restart scheduling on the next update
            self.period_start = 0.0;
            self.period_duration = 0.0;
            self.next_check = 0.0;
        } else {
            let from = self.current;
            self.current = WeatherKind::Clear;
            self.target = WeatherKind::Clear;
            self.transitioning = false;
            self.progress = 0.0;
            self.set_intensity(0.0);
            if from != WeatherKind::Clear {
                self.events.weather_changed.emit(&WeatherChanged {
                    from,
                    to: WeatherKind::Clear,
                });
            }
        }
    }

    /// Real seconds a weather blend takes, clamped to >= 1
    pub fn set_transition_duration(&mut self, seconds: f32) {
        self.transition_duration = seconds.max(1.0);
    }

    fn advance_transition(&mut self, delta_seconds: f32) {
        self.transition_elapsed += delta_seconds;
        let progress = smooth_step(self.transition_elapsed / self.transition_duration);
        self.progress = progress;
        let intensity = match self.target {
            WeatherKind::Snowing => progress,
            WeatherKind::Clear => 1.0 - progress,
        };
        self.set_intensity(intensity);
        self.events
            .weather_transition_progress
            .emit(&WeatherTransitionProgress {
                from: self.current,
                to: self.target,
                progress,
            });

        if progress >= 1.0 {
            let from = self.current;
            self.current = self.target;
            self.transitioning = false;
            self.progress = 0.0;
            if from != self.current {
                self.events.weather_changed.emit(&WeatherChanged {
                    from,
                    to: self.current,
                });
            }
        }
    }

    /// The scheduled period duration expired; pick what comes next
    fn on_period_end(&mut self, time: f64, clock: &CalendarClock) {
        let Some(config) = self.active_weather(clock) else {
            self.fall_back_clear(time, clock);
            return;
        };

        let next = match self.current {
            WeatherKind::Clear => {
                let chance = self.effective_snow_chance(&config, clock) * PERIOD_SNOW_DAMPING;
                if self.rng.gen::<f32>() < chance {
                    WeatherKind::Snowing
                } else {
                    WeatherKind::Clear
                }
            }
            WeatherKind::Snowing => WeatherKind::Clear,
        };
        self.begin_period(next, &config, time, clock);
    }

    /// Low-probability roll to break a period before its scheduled end
    fn on_early_check(&mut self, time: f64, clock: &CalendarClock) {
        let Some(config) = self.active_weather(clock) else {
            self.fall_back_clear(time, clock);
            return;
        };

        // Floor guarantee: never cut a period below its configured minimum
        let min_hours = match self.current {
            WeatherKind::Snowing => config.min_snow_hours,
            WeatherKind::Clear => config.min_clear_hours,
        };
        let elapsed = time - self.period_start;
        if elapsed < hours_to_seconds(min_hours, clock) {
            self.schedule_check(&config, time, clock);
            return;
        }

        let mut chance = EARLY_CHANGE_CHANCE;
        if elapsed < self.period_duration * 0.5 {
            chance *= YOUNG_PERIOD_SCALE;
        }

        if self.rng.gen::<f64>() < chance {
            let next = match self.current {
                WeatherKind::Clear => {
                    let snow = self.effective_snow_chance(&config, clock) * EARLY_SNOW_SCALE;
                    if self.rng.gen::<f32>() < snow {
                        WeatherKind::Snowing
                    } else {
                        WeatherKind::Clear
                    }
                }
                WeatherKind::Snowing => WeatherKind::Clear,
            };
            if next != self.current {
                self.begin_period(next, &config, time, clock);
                return;
            }
        }
        self.schedule_check(&config, time, clock);
    }

    /// Start a fresh period for `next`, transitioning if the state changes
    fn begin_period(
        &mut self,
        next: WeatherKind,
        config: &WeatherConfig,
        time: f64,
        clock: &CalendarClock,
    ) {
        let (min_hours, max_hours) = match next {
            WeatherKind::Snowing => config.snow_range(),
            WeatherKind::Clear => config.clear_range(),
        };
        let hours = if max_hours > min_hours {
            self.rng.gen_range(min_hours..max_hours)
        } else {
            min_hours
        };
        self.period_start = time;
        self.period_duration = hours_to_seconds(hours, clock);

        if next != self.current {
            self.target = next;
            self.transitioning = true;
            self.transition_elapsed = 0.0;
            self.progress = 0.0;
        }
        self.schedule_check(config, time, clock);
    }

    /// Next early-change roll, jittered to avoid periodic aliasing
    fn schedule_check(&mut self, config: &WeatherConfig, time: f64, clock: &CalendarClock) {
        let min_hours = match self.target {
            WeatherKind::Snowing => config.min_snow_hours,
            WeatherKind::Clear => config.min_clear_hours,
        };
        let min_seconds = hours_to_seconds(min_hours, clock);
        let interval = hours_to_seconds(config.check_interval_hours, clock).max(0.25 * min_seconds);
        let jitter = self.rng.gen_range(0.8..1.2);
        self.next_check = time + interval * jitter;
    }

    /// Snow chance with season-blend coupling: while the calendar is
    /// transitioning, the chance is interpolated between the two seasons
    fn effective_snow_chance(&self, config: &WeatherConfig, clock: &CalendarClock) -> f32 {
        if !clock.is_transitioning() {
            return config.snow_chance;
        }
        let from = clock
            .seasons()
            .get(clock.current_season())
            .map_or(config.snow_chance, |s| s.weather.snow_chance);
        let to = clock
            .seasons()
            .get(clock.target_season())
            .map_or(from, |s| s.weather.snow_chance);
        lerp(from, to, clock.transition_progress())
    }

    /// Weather block of the active season, if present and enabled
    fn active_weather(&mut self, clock: &CalendarClock) -> Option<WeatherConfig> {
        let season = clock.current_season();
        match clock.seasons().get(season) {
            Some(config) if config.weather.enabled => {
                self.config_warned = false;
                Some(config.weather.clone())
            }
            _ => {
                if !self.config_warned {
                    warn!("no usable weather configuration for {season}; forcing clear");
                    self.config_warned = true;
                }
                None
            }
        }
    }

    /// Degraded mode: clear sky on a default one-hour period
    fn fall_back_clear(&mut self, time: f64, clock: &CalendarClock) {
        self.period_start = time;
        self.period_duration = hours_to_seconds(DEFAULT_PERIOD_HOURS, clock);
        self.next_check = time + self.period_duration;
        self.target = WeatherKind::Clear;
        if self.current != WeatherKind::Clear {
            self.transitioning = true;
            self.transition_elapsed = 0.0;
            self.progress = 0.0;
        }
    }

    fn set_intensity(&mut self, intensity: f32) {
        let intensity = intensity.clamp(0.0, 1.0);
        if (intensity - self.intensity).abs() > f32::EPSILON {
            self.intensity = intensity;
            self.events
                .weather_intensity_changed
                .emit(&WeatherIntensityChanged { intensity });
        }
    }

    /// State currently in effect
    pub fn current(&self) -> WeatherKind {
        self.current
    }

    /// State being blended toward; equals the current state when stable
    pub fn target(&self) -> WeatherKind {
        self.target
    }

    /// Whether a weather blend is in flight
    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Blend progress in `[0, 1]`; 0 when stable
    pub fn transition_progress(&self) -> f32 {
        self.progress
    }

    /// Snowfall intensity in `[0, 1]`
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Whether the system is running
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Celestial time the current period began
    pub fn period_start(&self) -> f64 {
        self.period_start
    }

    /// Celestial seconds the current period lasts
    pub fn period_duration(&self) -> f64 {
        self.period_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{CalendarClock, CalendarConfig};
    use orrery_config::{SeasonConfig, SeasonTable};
    use orrery_core::SeasonId;
    use std::cell::RefCell;
    use std::rc::Rc;

    const DAY: f32 = 86_400.0;
    const HOUR: f64 = 3600.0;

    fn snowy_clock() -> CalendarClock {
        let season = SeasonConfig::new("Winter").with_weather(WeatherConfig {
            enabled: true,
            snow_chance: 0.5,
            min_snow_hours: 2.0,
            max_snow_hours: 8.0,
            min_clear_hours: 12.0,
            max_clear_hours: 48.0,
            check_interval_hours: 1.0,
        });
        CalendarClock::new(
            CalendarConfig {
                day_length_seconds: DAY,
                ..Default::default()
            },
            SeasonTable::new(vec![season]),
        )
    }

    #[test]
    fn test_missing_config_falls_back_to_clear() {
        // Default table has weather disabled
        let clock = CalendarClock::new(
            CalendarConfig {
                day_length_seconds: DAY,
                ..Default::default()
            },
            SeasonTable::default(),
        );
        let mut weather = WeatherSystem::with_seed(1);

        weather.update(1.0, &clock);
        assert_eq!(weather.current(), WeatherKind::Clear);
        assert!((weather.period_duration() - HOUR).abs() < 1e-6);
    }

    #[test]
    fn test_period_durations_stay_within_bounds() {
        let mut clock = snowy_clock();
        let mut weather = WeatherSystem::with_seed(7);

        let mut snow_periods = 0;
        let mut clear_periods = 0;
        let mut last_start = -1.0;
        for _ in 0..200_000 {
            clock.update(1000.0);
            weather.update(1000.0, &clock);

            if weather.period_duration() > 0.0 && weather.period_start() != last_start {
                last_start = weather.period_start();
                let (lo, hi) = match weather.target() {
                    WeatherKind::Snowing => (2.0 * HOUR, 8.0 * HOUR),
                    WeatherKind::Clear => (12.0 * HOUR, 48.0 * HOUR),
                };
                assert!(
                    weather.period_duration() >= lo && weather.period_duration() <= hi,
                    "period {} out of [{lo}, {hi}] for {:?}",
                    weather.period_duration(),
                    weather.target()
                );
                match weather.target() {
                    WeatherKind::Snowing => snow_periods += 1,
                    WeatherKind::Clear => clear_periods += 1,
                }
            }
        }
        // Over ~2300 simulated days both states must have occurred
        assert!(snow_periods > 10, "only {snow_periods} snow periods");
        assert!(clear_periods > 10, "only {clear_periods} clear periods");
    }

    #[test]
    fn test_natural_snow_rate_converges_to_damped_chance() {
        let clock = snowy_clock();
        let mut weather = WeatherSystem::with_seed(42);

        let trials = 10_000;
        let mut snows = 0;
        for _ in 0..trials {
            weather.current = WeatherKind::Clear;
            weather.target = WeatherKind::Clear;
            weather.transitioning = false;
            weather.on_period_end(0.0, &clock);
            if weather.target == WeatherKind::Snowing {
                snows += 1;
            }
        }

        // snow_chance 0.5 damped by 0.3 -> 0.15
        let rate = snows as f64 / f64::from(trials);
        assert!((rate - 0.15).abs() < 0.02, "rate {rate}");
    }

    #[test]
    fn test_forced_snow_period_returns_to_clear() {
        let mut clock = snowy_clock();
        let mut weather = WeatherSystem::with_seed(3);

        weather.force_weather(WeatherKind::Snowing, true, Some(3600.0), &clock);
        assert_eq!(weather.current(), WeatherKind::Snowing);
        assert_eq!(weather.intensity(), 1.0);

        // One forced hour of snow, then the blend back to clear
        for _ in 0..62 {
            clock.update(60.0);
            weather.update(60.0, &clock);
        }
        assert_eq!(weather.current(), WeatherKind::Clear);
        assert_eq!(weather.intensity(), 0.0);
    }

    #[test]
    fn test_early_check_respects_minimum_duration() {
        let clock = snowy_clock();
        let mut weather = WeatherSystem::with_seed(5);
        weather.period_start = 0.0;
        weather.period_duration = 30.0 * HOUR;

        // 10000 s is far below the 12 h clear minimum: only reschedules
        for _ in 0..200 {
            weather.on_early_check(10_000.0, &clock);
            assert_eq!(weather.current(), WeatherKind::Clear);
            assert!(!weather.is_transitioning());
            assert!(weather.next_check > 10_000.0);
        }
    }

    #[test]
    fn test_early_check_eventually_breaks_snow_period() {
        let clock = snowy_clock();
        let mut weather = WeatherSystem::with_seed(11);
        weather.current = WeatherKind::Snowing;
        weather.target = WeatherKind::Snowing;
        weather.intensity = 1.0;
        weather.period_start = 0.0;
        weather.period_duration = 8.0 * HOUR;

        // Past the minimum and past half the period: 5% per roll
        let mut rolls = 0;
        while !weather.is_transitioning() && rolls < 1000 {
            weather.on_early_check(7.0 * HOUR, &clock);
            rolls += 1;
        }
        assert!(weather.is_transitioning(), "no early change in {rolls} rolls");
        assert_eq!(weather.target(), WeatherKind::Clear);
    }

    #[test]
    fn test_disable_forces_clear() {
        let clock = snowy_clock();
        let mut weather = WeatherSystem::with_seed(9);

        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        weather
            .events
            .weather_changed
            .subscribe(move |e: &WeatherChanged| sink.borrow_mut().push((e.from, e.to)));

        weather.force_weather(WeatherKind::Snowing, true, None, &clock);
        weather.set_enabled(false);

        assert_eq!(weather.current(), WeatherKind::Clear);
        assert_eq!(weather.intensity(), 0.0);
        assert!(!weather.is_enabled());
        assert_eq!(
            *changes.borrow(),
            vec![
                (WeatherKind::Clear, WeatherKind::Snowing),
                (WeatherKind::Snowing, WeatherKind::Clear)
            ]
        );

        // Disabled: updates are inert
        weather.update(1000.0, &clock);
        assert_eq!(weather.current(), WeatherKind::Clear);
    }

    #[test]
    fn test_transition_emits_progress_and_intensity() {
        let clock = snowy_clock();
        let mut weather = WeatherSystem::with_seed(13);
        weather.set_transition_duration(10.0);

        let intensities = Rc::new(RefCell::new(Vec::new()));
        let sink = intensities.clone();
        weather
            .events
            .weather_intensity_changed
            .subscribe(move |e: &WeatherIntensityChanged| sink.borrow_mut().push(e.intensity));

        weather.force_weather(WeatherKind::Snowing, false, Some(10.0 * HOUR), &clock);
        for _ in 0..12 {
            weather.update(1.0, &clock);
        }

        assert_eq!(weather.current(), WeatherKind::Snowing);
        let intensities = intensities.borrow();
        assert!(intensities.windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(*intensities.last().unwrap(), 1.0);
    }

    #[test]
    fn test_snow_chance_blends_during_season_transition() {
        let calm = SeasonConfig::new("Calm").with_weather(WeatherConfig {
            enabled: true,
            snow_chance: 0.0,
            ..Default::default()
        });
        let harsh = SeasonConfig::new("Harsh").with_weather(WeatherConfig {
            enabled: true,
            snow_chance: 1.0,
            ..Default::default()
        });
        let mut clock = CalendarClock::new(
            CalendarConfig {
                day_length_seconds: DAY,
                transition_duration_seconds: 10.0,
                ..Default::default()
            },
            SeasonTable::new(vec![calm, harsh]),
        );
        let weather = WeatherSystem::with_seed(17);

        clock.start_season_transition(SeasonId(1));
        clock.update(2.0);
        assert!(clock.is_transitioning());

        let config = clock.seasons().get(SeasonId(0)).unwrap().weather.clone();
        let blended = weather.effective_snow_chance(&config, &clock);
        assert!((blended - clock.transition_progress()).abs() < 1e-6);

        // Stable clock reads the plain configured chance
        let stable = CalendarClock::new(CalendarConfig::default(), SeasonTable::new(vec![]));
        assert_eq!(weather.effective_snow_chance(&config, &stable), 0.0);
    }
}
