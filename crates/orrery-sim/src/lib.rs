//! Orrery Sim - Calendar and weather state machines
//!
//! The stateful half of the simulation. [`CalendarClock`] owns celestial
//! time, day/year counters, and the season state machine; [`WeatherSystem`]
//! schedules clear and snow periods off the clock's time.
//!
//! Everything is single-threaded and tick-driven. Within one tick the clock
//! must be advanced first, then the weather system, and only then should
//! rotations be computed, so readers never observe a half-advanced clock.
//! Timed completions are plain comparisons against accumulated time; there
//! are no scheduled callbacks.

pub mod calendar;
pub mod events;
pub mod weather;

pub use calendar::{CalendarClock, CalendarConfig};
pub use events::{
    CalendarEvents, DayChanged, SeasonChanged, SeasonTransitionProgress, TimeScaleChanged,
    WeatherChanged, WeatherEvents, WeatherIntensityChanged, WeatherTransitionProgress, YearChanged,
};
pub use weather::{WeatherKind, WeatherSystem};
