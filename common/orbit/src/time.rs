//! Mapping between real periods and demo time.

use crate::body::PhysicalParams;

pub const EARTH_YEAR_DAYS: f32 = 365.0;
pub const SECONDS_PER_HOUR: f32 = 3600.0;
pub const SECONDS_PER_DAY: f32 = 24.0 * SECONDS_PER_HOUR;

/// Smallest allowed demo year, demo day, and real day length.
const MIN_SCALE: f32 = 0.1;
const MIN_PERIOD_SECONDS: f32 = 0.01;

/// How much real time gets compressed.
///
/// An Earth year lasts `demo_year_seconds` and an Earth day lasts `demo_day_seconds`; every other body is scaled
/// proportionally.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeScale {
    pub demo_year_seconds: f32,
    pub demo_day_seconds: f32,
}
impl TimeScale {
    pub const DEFAULT: Self = Self {
        demo_year_seconds: 120.0,
        demo_day_seconds: 10.0,
    };

    /// Demo seconds for one revolution of a body with a year of `year_days`.
    ///
    /// This never returns less than 0.01.
    pub fn orbit_period_seconds(&self, year_days: f32) -> f32 {
        (year_days / EARTH_YEAR_DAYS * self.demo_year_seconds.max(MIN_SCALE)).max(MIN_PERIOD_SECONDS)
    }
    /// Spin rate in degrees per demo second, negative for retrograde bodies.
    pub fn spin_degrees_per_second(&self, params: &PhysicalParams) -> f32 {
        let real = 360.0 / (params.day_hours.max(MIN_SCALE) * SECONDS_PER_HOUR);
        let rate = real * (SECONDS_PER_DAY / self.demo_day_seconds.max(MIN_SCALE));
        if params.retrograde { -rate } else { rate }
    }
}
impl Default for TimeScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}
