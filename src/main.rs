//! Orrery - seasonal sky and weather simulation
//!
//! Headless demo driver: builds a four-season world, wires the calendar
//! clock, weather system, and rotation calculator together, and runs a
//! fixed-step simulation while logging what changes.

use anyhow::Result;
use glam::Vec3;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use orrery_config::{AxisConfig, BodyConfig, OrbitConfig, SeasonConfig, SeasonTable, WeatherConfig};
use orrery_core::{Axis, BodyId};
use orrery_sim::{CalendarClock, CalendarConfig, WeatherSystem};
use orrery_sky::RotationCalculator;

mod scenario;

use scenario::Scenario;

const SUN: BodyId = BodyId(0);
const MOON: BodyId = BodyId(1);

/// A season with the given solar tilt range and weather block
fn season(name: &str, tilt_degrees: f32, weather: WeatherConfig) -> SeasonConfig {
    SeasonConfig::new(name)
        .with_body(
            BodyConfig::new("Sun")
                .with_axis(Axis::Y, AxisConfig::day_locked())
                .with_axis(
                    Axis::X,
                    AxisConfig::oscillate_synced(Axis::Y, -tilt_degrees, tilt_degrees),
                ),
        )
        .with_body(
            BodyConfig::new("Moon")
                .with_axis(Axis::Y, AxisConfig::day_locked())
                .with_orbit(OrbitConfig::new(29.5)),
        )
        .with_weather(weather)
}

fn season_table() -> SeasonTable {
    SeasonTable::new(vec![
        season(
            "Spring",
            18.0,
            WeatherConfig {
                enabled: true,
                snow_chance: 0.05,
                ..Default::default()
            },
        ),
        // Summer skies stay clear
        season("Summer", 23.5, WeatherConfig::default()),
        season(
            "Autumn",
            15.0,
            WeatherConfig {
                enabled: true,
                snow_chance: 0.15,
                ..Default::default()
            },
        ),
        season(
            "Winter",
            8.0,
            WeatherConfig {
                enabled: true,
                snow_chance: 0.6,
                min_snow_hours: 4.0,
                max_snow_hours: 16.0,
                min_clear_hours: 6.0,
                max_clear_hours: 24.0,
                check_interval_hours: 1.0,
            },
        ),
    ])
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let scenario = Scenario::load("scenario.toml");
    info!(
        "starting demo: {} days at {}s per day",
        scenario.simulate_days, scenario.day_length_seconds
    );

    let mut clock = CalendarClock::new(
        CalendarConfig {
            day_length_seconds: scenario.day_length_seconds,
            days_per_year: scenario.days_per_year,
            days_per_season: scenario.days_per_season,
            ..Default::default()
        },
        season_table(),
    );
    let mut weather = WeatherSystem::with_seed(scenario.weather_seed);
    let calculator = RotationCalculator::new(scenario.day_length_seconds);

    clock
        .events
        .season_changed
        .subscribe(|e| info!("season changed: {} -> {}", e.from, e.to));
    clock
        .events
        .year_changed
        .subscribe(|e| info!("a new year begins: year {}", e.year));
    weather
        .events
        .weather_changed
        .subscribe(|e| info!("weather: {} -> {}", e.from.name(), e.to.name()));

    let ticks_per_day = (scenario.day_length_seconds / scenario.tick_seconds).ceil() as u64;
    let total_ticks = ticks_per_day * u64::from(scenario.simulate_days);
    let mut last_day = clock.day();

    for _ in 0..total_ticks {
        clock.update(scenario.tick_seconds);
        weather.update(scenario.tick_seconds, &clock);

        if clock.day() != last_day {
            last_day = clock.day();

            let current = clock.seasonal_data(clock.current_season());
            let sun = if clock.is_transitioning() {
                calculator.interpolate_rotation(
                    current,
                    clock.seasonal_data(clock.target_season()),
                    SUN,
                    Vec3::ZERO,
                    clock.celestial_time(),
                    clock.transition_progress(),
                )
            } else {
                calculator.calculate_rotation(current, SUN, Vec3::ZERO, clock.celestial_time())
            };
            let moon = calculator.calculate_rotation(current, MOON, Vec3::ZERO, clock.celestial_time());

            info!(
                "day {:>3} {} | sun y {:>5.1} x {:>5.1} | moon y {:>5.1} | {} ({:.0}%)",
                clock.day(),
                clock.formatted_time(),
                sun.y,
                sun.x,
                moon.y,
                weather.current().name(),
                weather.intensity() * 100.0
            );
        }
    }

    info!(
        "simulation finished: day {} of year {}, {} skies",
        clock.day(),
        clock.year(),
        weather.current().name()
    );
    Ok(())
}
