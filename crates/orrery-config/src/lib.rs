//! Orrery Config - Seasonal configuration data
//!
//! Declarative, per-season settings for celestial body motion and weather.
//! Tables are authored externally (assets, editor tooling), loaded once, and
//! treated as read-only by the simulation. The only sanctioned mutations are
//! [`SeasonTable::validate`] at load time and [`SeasonTable::resync_speeds`]
//! when the day length changes.

pub mod axis;
pub mod body;
pub mod season;
pub mod validate;
pub mod weather;

pub use axis::{AxisConfig, AxisMode};
pub use body::{BodyConfig, OrbitConfig};
pub use season::{SeasonConfig, SeasonTable};
pub use validate::ConfigIssue;
pub use weather::WeatherConfig;
