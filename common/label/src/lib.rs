//! Keeping world-space labels readable.
//!
//! Labels grow with their distance from the camera so they stay roughly the same size on screen, and turn to face
//! the camera. Both are computed in world space; helpers are provided to convert back to a parent's local space.

pub mod billboard;
pub mod curve;

pub use billboard::{billboard_rotation, facing_rotation, local_rotation_for, local_scale_for};
pub use curve::{Keyframe, LabelScaleCurve};
