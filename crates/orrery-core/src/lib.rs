//! Orrery Core - Foundational types for the Orrery simulation
//!
//! This crate provides the types shared by every simulation crate:
//! - Mathematical primitives (re-exported from glam)
//! - Season/body identifiers and rotation axes
//! - Angle and interpolation helpers
//! - Event signals for cross-component notification

pub mod ids;
pub mod math;
pub mod signal;

pub use glam::{Vec2, Vec3, Vec4};
pub use ids::{Axis, BodyId, SeasonId};
pub use math::{inverse_lerp, lerp, smooth_step, wrap_degrees};
pub use signal::{Signal, SubscriberId};
