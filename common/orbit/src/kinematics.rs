//! Elliptical orbits with spin.
//!
//! An orbit lives in a plane through its focus. In plane-local coordinates the body sits at
//! `(cos(θ) * a, 0, sin(θ) * b)`, where `θ` is the orbit progress times `τ`, `a` is the semi-major axis and `b` is the
//! semi-minor axis. The plane's normal is its local `+Y`.

use crate::body::PhysicalParams;
use crate::time::TimeScale;
use bevy_math::{Quat, Vec3};
use std::f32::consts::TAU;

pub const MAX_ECCENTRICITY: f32 = 0.9;
/// Semi-major axis used when the starting position is (nearly) on top of the focus.
pub const FALLBACK_RADIUS: f32 = 10.0;
const MIN_RADIUS: f32 = 1e-3;
const MIN_AXIS: f32 = 1e-6;
/// Fewest points a baked path can have.
pub const MIN_PATH_SEGMENTS: usize = 3;

/// Wrap `value` into `[0, modulus)`.
///
/// [`f32::rem_euclid`] can round up to `modulus` for tiny negative inputs, so that's folded back to zero.
fn wrap(value: f32, modulus: f32) -> f32 {
    let r = value.rem_euclid(modulus);
    if r >= modulus { 0.0 } else { r }
}

/// Orientation of an orbital plane relative to the reference (XZ) plane.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrbitPlane {
    /// Tilt about the X axis, in degrees
    pub inclination_deg: f32,
    /// Rotation of the tilted plane about the Y axis, in degrees
    pub longitude_of_periapsis_deg: f32,
}
impl OrbitPlane {
    /// The reference plane itself.
    pub const REFERENCE: Self = Self {
        inclination_deg: 0.0,
        longitude_of_periapsis_deg: 0.0,
    };

    /// Rotation from plane-local coordinates to world coordinates.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.longitude_of_periapsis_deg.to_radians())
            * Quat::from_rotation_x(self.inclination_deg.to_radians())
    }
    /// World-space normal of the plane.
    pub fn normal(&self) -> Vec3 {
        self.rotation() * Vec3::Y
    }
}

/// Everything needed to set up an [`OrbitingBody`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitInit {
    /// Point being orbited, or `None` for the origin.
    pub focus: Option<Vec3>,
    /// Where the body is placed before the orbit takes over.
    pub start: Vec3,
    pub eccentricity: f32,
    pub plane: OrbitPlane,
    pub params: PhysicalParams,
    pub time_scale: TimeScale,
}
impl Default for OrbitInit {
    fn default() -> Self {
        Self {
            focus: None,
            start: Vec3::X * FALLBACK_RADIUS,
            eccentricity: 0.03,
            plane: OrbitPlane::REFERENCE,
            params: PhysicalParams::EARTH,
            time_scale: TimeScale::DEFAULT,
        }
    }
}

/// The result of a single [`OrbitingBody::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitStep {
    /// New world position.
    pub position: Vec3,
    /// Degrees spun about the local up axis during this step.
    pub spin_delta_deg: f32,
}
impl OrbitStep {
    /// Local rotation for this step's spin, to be post-multiplied onto the body's rotation.
    pub fn spin(&self) -> Quat {
        Quat::from_rotation_y(self.spin_delta_deg.to_radians())
    }
}

/// A body revolving around a focus and spinning about its own axis.
///
/// All of the shape and rate constants are derived once in [`Self::new`]; afterwards, only the orbit progress, spin
/// angle, and focus change.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitingBody {
    focus: Vec3,
    eccentricity: f32,
    plane: OrbitPlane,
    plane_rotation: Quat,
    semi_major: f32,
    semi_minor: f32,
    progress: f32,
    period: f32,
    spin_rate: f32,
    spin_angle: f32,
    axial_tilt_deg: f32,
}
impl OrbitingBody {
    /// Derive an orbit from a starting placement.
    ///
    /// The distance from the focus to `start`, projected onto the orbital plane, becomes the semi-major axis, and
    /// the direction becomes the initial phase. The body is considered to be on the ellipse at that phase
    /// afterwards, which is generally *not* `start` itself; use [`Self::position`] to snap it.
    pub fn new(init: OrbitInit) -> Self {
        let focus = init.focus.unwrap_or(Vec3::ZERO);
        let eccentricity = if init.eccentricity.is_finite() {
            init.eccentricity.clamp(0.0, MAX_ECCENTRICITY)
        } else {
            0.0
        };
        let plane_rotation = init.plane.rotation();
        let normal = plane_rotation * Vec3::Y;

        let projected = (init.start - focus).reject_from_normalized(normal);
        let radius = projected.length();
        // written this way so NaN also falls back
        let semi_major = if radius >= MIN_RADIUS {
            radius
        } else {
            FALLBACK_RADIUS
        };
        let semi_minor = semi_major * (1.0 - eccentricity * eccentricity).sqrt();

        let mut local = plane_rotation.inverse() * projected;
        if !(local.length_squared() >= 1e-6) {
            local = Vec3::new(semi_major, 0.0, 0.0);
        }
        let angle = f32::atan2(
            local.z / semi_minor.max(MIN_AXIS),
            local.x / semi_major.max(MIN_AXIS),
        );
        let progress = wrap(angle / TAU, 1.0);

        Self {
            focus,
            eccentricity,
            plane: init.plane,
            plane_rotation,
            semi_major,
            semi_minor,
            progress,
            period: init.time_scale.orbit_period_seconds(init.params.year_days),
            spin_rate: init.time_scale.spin_degrees_per_second(&init.params),
            spin_angle: 0.0,
            axial_tilt_deg: init.params.axial_tilt_deg,
        }
    }

    #[inline(always)]
    pub const fn focus(&self) -> Vec3 {
        self.focus
    }
    /// Move the focus, e.g. to follow a parent that's orbiting too. `None` puts it at the origin.
    pub fn set_focus(&mut self, focus: Option<Vec3>) {
        self.focus = focus.unwrap_or(Vec3::ZERO);
    }
    #[inline(always)]
    pub const fn eccentricity(&self) -> f32 {
        self.eccentricity
    }
    #[inline(always)]
    pub const fn plane(&self) -> OrbitPlane {
        self.plane
    }
    #[inline(always)]
    pub const fn plane_rotation(&self) -> Quat {
        self.plane_rotation
    }
    #[inline(always)]
    pub const fn semi_major_axis(&self) -> f32 {
        self.semi_major
    }
    #[inline(always)]
    pub const fn semi_minor_axis(&self) -> f32 {
        self.semi_minor
    }
    /// Fraction of the current revolution that's been completed, in `[0, 1)`.
    #[inline(always)]
    pub const fn progress(&self) -> f32 {
        self.progress
    }
    /// Jump to a point in the orbit. The value is wrapped into `[0, 1)`; non-finite values reset it to 0.
    pub fn set_progress(&mut self, progress: f32) {
        self.progress = if progress.is_finite() {
            wrap(progress, 1.0)
        } else {
            0.0
        };
    }
    /// Demo seconds per revolution.
    #[inline(always)]
    pub const fn period_seconds(&self) -> f32 {
        self.period
    }
    #[inline(always)]
    pub const fn spin_degrees_per_second(&self) -> f32 {
        self.spin_rate
    }
    /// Total spin so far, in `[0, 360)` degrees.
    #[inline(always)]
    pub const fn spin_angle_deg(&self) -> f32 {
        self.spin_angle
    }
    #[inline(always)]
    pub const fn axial_tilt_deg(&self) -> f32 {
        self.axial_tilt_deg
    }
    /// Fixed rotation for the axial tilt, about the local Z axis.
    ///
    /// This should be applied once, before the first step; the spin from [`OrbitStep::spin`] happens about the
    /// tilted axis.
    pub fn tilt_rotation(&self) -> Quat {
        Quat::from_rotation_z(self.axial_tilt_deg.to_radians())
    }

    /// Offset from the focus in plane-local coordinates at the given progress.
    pub fn local_offset_at(&self, progress: f32) -> Vec3 {
        let (sin, cos) = (progress * TAU).sin_cos();
        Vec3::new(cos * self.semi_major, 0.0, sin * self.semi_minor)
    }
    /// World position at the given progress.
    pub fn position_at(&self, progress: f32) -> Vec3 {
        self.focus + self.plane_rotation * self.local_offset_at(progress)
    }
    /// Current world position.
    pub fn position(&self) -> Vec3 {
        self.position_at(self.progress)
    }

    /// Step the simulation forward by `dt` seconds.
    ///
    /// Negative and non-finite time steps are treated as zero.
    pub fn advance(&mut self, dt: f32) -> OrbitStep {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let spin_delta_deg = if self.spin_rate != 0.0 {
            self.spin_rate * dt
        } else {
            0.0
        };
        self.spin_angle = wrap(self.spin_angle + spin_delta_deg, 360.0);
        if self.period > 0.0 {
            self.progress = wrap(self.progress + dt / self.period, 1.0);
        }
        OrbitStep {
            position: self.position(),
            spin_delta_deg,
        }
    }

    /// Sample the orbit at `segments` evenly spaced phases, starting at progress 0.
    ///
    /// At least [`MIN_PATH_SEGMENTS`] points are always produced.
    pub fn bake_path(&self, segments: usize) -> Vec<Vec3> {
        let mut out = Vec::new();
        self.bake_path_into(segments, &mut out);
        out
    }
    /// Like [`Self::bake_path`], but reuses an existing buffer.
    pub fn bake_path_into(&self, segments: usize, out: &mut Vec<Vec3>) {
        let n = segments.max(MIN_PATH_SEGMENTS);
        out.clear();
        out.reserve(n);
        out.extend((0..n).map(|i| self.position_at(i as f32 / n as f32)));
    }
}
