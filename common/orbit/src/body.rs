//! Physical parameters for the bodies of the solar system.

use std::fmt;
use std::str::FromStr;

/// Real-world periods and orientation of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalParams {
    /// Length of a year, in Earth days
    pub year_days: f32,
    /// Length of a day, in hours
    pub day_hours: f32,
    /// Whether the body spins against its direction of revolution
    pub retrograde: bool,
    /// Tilt of the spin axis, in degrees
    pub axial_tilt_deg: f32,
}
impl PhysicalParams {
    pub const MERCURY: Self = Self::prograde(88.0, 1408.0, 0.03);
    pub const VENUS: Self = Self::retrograde(225.0, 5832.0, 177.4);
    pub const EARTH: Self = Self::prograde(365.0, 24.0, 23.5);
    pub const MARS: Self = Self::prograde(687.0, 24.6, 25.2);
    pub const JUPITER: Self = Self::prograde(4333.0, 9.9, 3.1);
    pub const SATURN: Self = Self::prograde(10759.0, 10.7, 26.7);
    pub const URANUS: Self = Self::retrograde(30687.0, 17.2, 97.8);
    pub const NEPTUNE: Self = Self::prograde(60190.0, 16.1, 28.3);
    pub const PLUTO: Self = Self::prograde(90520.0, 153.3, 122.5);

    pub const fn prograde(year_days: f32, day_hours: f32, axial_tilt_deg: f32) -> Self {
        Self {
            year_days,
            day_hours,
            retrograde: false,
            axial_tilt_deg,
        }
    }
    pub const fn retrograde(year_days: f32, day_hours: f32, axial_tilt_deg: f32) -> Self {
        Self {
            year_days,
            day_hours,
            retrograde: true,
            axial_tilt_deg,
        }
    }
}
impl Default for PhysicalParams {
    /// Earth is the baseline that the time scale is defined against.
    fn default() -> Self {
        Self::EARTH
    }
}

/// A known body with a baked-in set of [`PhysicalParams`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Body {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}
impl Body {
    /// All bodies, ordered by distance from the sun.
    pub const ALL: [Self; 9] = [
        Self::Mercury,
        Self::Venus,
        Self::Earth,
        Self::Mars,
        Self::Jupiter,
        Self::Saturn,
        Self::Uranus,
        Self::Neptune,
        Self::Pluto,
    ];

    pub const fn params(self) -> PhysicalParams {
        match self {
            Self::Mercury => PhysicalParams::MERCURY,
            Self::Venus => PhysicalParams::VENUS,
            Self::Earth => PhysicalParams::EARTH,
            Self::Mars => PhysicalParams::MARS,
            Self::Jupiter => PhysicalParams::JUPITER,
            Self::Saturn => PhysicalParams::SATURN,
            Self::Uranus => PhysicalParams::URANUS,
            Self::Neptune => PhysicalParams::NEPTUNE,
            Self::Pluto => PhysicalParams::PLUTO,
        }
    }
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Earth => "Earth",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
        }
    }
    /// Find the first body whose name appears anywhere in `name`, ignoring case.
    ///
    /// This is meant for scene authoring, where objects are named things like `"Planet_Mars (1)"`. Bodies are
    /// checked in [`Self::ALL`] order.
    pub fn from_display_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|b| name.contains(&b.name().to_ascii_lowercase()))
    }
}
impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown body {0:?}")]
pub struct UnknownBody(pub String);

impl FromStr for Body {
    type Err = UnknownBody;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownBody(s.to_owned()))
    }
}
