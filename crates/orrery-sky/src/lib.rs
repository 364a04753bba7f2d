//! Orrery Sky - Celestial rotation math
//!
//! Pure mapping from seasonal configuration and elapsed celestial time to
//! per-body rotation vectors. The calculator holds no per-body state; every
//! call recomputes from its inputs, so repeated evaluation at the same time
//! yields the same rotation.

pub mod audit;
pub mod calculator;

pub use audit::UnsyncedAxis;
pub use calculator::{RotationCalculator, SYNC_SPEED_EPSILON};
