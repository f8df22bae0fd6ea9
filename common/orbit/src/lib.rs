//! Orbit and spin kinematics for a scaled-down solar system.
//!
//! Bodies trace closed ellipses around a focus point and spin about their local up axis. Real orbital and
//! rotational periods are compressed with a [`TimeScale`] so a demo stays watchable while preserving the ratios
//! between bodies.
//!
//! Nothing in here depends on an engine; positions and rotations are plain [`bevy_math`] values.

pub mod body;
pub mod kinematics;
pub mod time;

pub use body::{Body, PhysicalParams, UnknownBody};
pub use kinematics::{OrbitInit, OrbitPlane, OrbitStep, OrbitingBody};
pub use time::TimeScale;
