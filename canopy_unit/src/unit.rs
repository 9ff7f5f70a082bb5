// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of units a style dimension can carry.

use core::f64::consts::PI;
use core::fmt;

/// The unit attached to a [`UnitValue`](crate::UnitValue).
///
/// The set is closed: style input using any other suffix is rejected by the
/// dimension parser.
///
/// # Example
///
/// ```
/// use canopy_unit::Unit;
///
/// assert_eq!(Unit::from_suffix("px"), Some(Unit::Px));
/// assert_eq!(Unit::from_suffix("%"), Some(Unit::Percent));
/// assert_eq!(Unit::from_suffix("em"), None);
/// assert!(Unit::Turn.is_angle());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Unit {
    /// A plain number.
    Number,
    /// A percentage of some reference dimension.
    Percent,
    /// CSS pixels.
    Px,
    /// Degrees.
    Deg,
    /// Radians.
    Rad,
    /// Full turns.
    Turn,
    /// Gradians (400 per turn).
    Grad,
    /// The `none` keyword in a dimension slot.
    None,
}

impl Unit {
    /// Every unit, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Number,
        Self::Percent,
        Self::Px,
        Self::Deg,
        Self::Rad,
        Self::Turn,
        Self::Grad,
        Self::None,
    ];

    /// Looks up a unit by its suffix, ignoring ASCII case.
    ///
    /// The empty suffix is not mapped here: a bare number takes whatever default
    /// unit the caller's syntax prescribes.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        [
            Self::Percent,
            Self::Px,
            Self::Deg,
            Self::Rad,
            Self::Turn,
            Self::Grad,
        ]
        .into_iter()
        .find(|unit| unit.suffix().eq_ignore_ascii_case(suffix))
    }

    /// Returns the suffix used when formatting a value of this unit.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Number | Self::None => "",
            Self::Percent => "%",
            Self::Px => "px",
            Self::Deg => "deg",
            Self::Rad => "rad",
            Self::Turn => "turn",
            Self::Grad => "grad",
        }
    }

    /// Returns `true` for `deg`, `rad`, `turn`, and `grad`.
    #[must_use]
    pub const fn is_angle(self) -> bool {
        matches!(self, Self::Deg | Self::Rad | Self::Turn | Self::Grad)
    }

    /// Number of degrees in one of this unit, for angle units.
    #[must_use]
    pub(crate) const fn degrees_per_unit(self) -> Option<f64> {
        match self {
            Self::Deg => Some(1.0),
            Self::Rad => Some(180.0 / PI),
            Self::Turn => Some(360.0),
            Self::Grad => Some(0.9),
            _ => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number => f.write_str("number"),
            Self::None => f.write_str("none"),
            other => f.write_str(other.suffix()),
        }
    }
}
