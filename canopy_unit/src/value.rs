// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed `(magnitude, unit)` pairs.

use alloc::string::ToString;
use core::fmt;

use crate::error::{MixError, ParseError};
use crate::unit::Unit;

/// A finite magnitude paired with a [`Unit`].
///
/// Values are immutable; arithmetic returns new instances. The magnitude is
/// always finite: [`UnitValue::new`] rejects NaN and infinities, and every
/// arithmetic operation re-checks its result.
///
/// # Example
///
/// ```
/// use canopy_unit::{Unit, UnitValue};
///
/// let a = UnitValue::px(10.0);
/// let b = UnitValue::px(30.0);
/// assert_eq!(a.mix(b, 0.5).unwrap(), UnitValue::px(20.0));
///
/// // No implicit conversion between units.
/// assert!(a.mix(UnitValue::percent(30.0), 0.5).is_err());
///
/// // Angles convert between each other.
/// let quarter = UnitValue::new(0.25, Unit::Turn).unwrap();
/// assert_eq!(quarter.to_degrees(), Some(90.0));
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UnitValue {
    magnitude: f64,
    unit: Unit,
}

impl UnitValue {
    /// Zero pixels.
    pub const ZERO_PX: Self = Self::px(0.0);

    /// The `none` keyword in a dimension slot.
    pub const NONE: Self = Self {
        magnitude: 0.0,
        unit: Unit::None,
    };

    /// Creates a value, rejecting non-finite magnitudes.
    pub fn new(magnitude: f64, unit: Unit) -> Result<Self, ParseError> {
        if magnitude.is_finite() {
            Ok(Self { magnitude, unit })
        } else {
            Err(ParseError::NonFinite {
                token: magnitude.to_string(),
            })
        }
    }

    const fn checked(magnitude: f64, unit: Unit) -> Self {
        assert!(magnitude.is_finite(), "UnitValue magnitude must be finite");
        Self { magnitude, unit }
    }

    /// A pixel length.
    ///
    /// # Panics
    ///
    /// Panics if `magnitude` is not finite.
    #[must_use]
    pub const fn px(magnitude: f64) -> Self {
        Self::checked(magnitude, Unit::Px)
    }

    /// A percentage.
    ///
    /// # Panics
    ///
    /// Panics if `magnitude` is not finite.
    #[must_use]
    pub const fn percent(magnitude: f64) -> Self {
        Self::checked(magnitude, Unit::Percent)
    }

    /// A plain number.
    ///
    /// # Panics
    ///
    /// Panics if `magnitude` is not finite.
    #[must_use]
    pub const fn number(magnitude: f64) -> Self {
        Self::checked(magnitude, Unit::Number)
    }

    /// An angle in degrees.
    ///
    /// # Panics
    ///
    /// Panics if `magnitude` is not finite.
    #[must_use]
    pub const fn deg(magnitude: f64) -> Self {
        Self::checked(magnitude, Unit::Deg)
    }

    /// Returns the magnitude.
    #[must_use]
    #[inline]
    pub const fn magnitude(self) -> f64 {
        self.magnitude
    }

    /// Returns the unit.
    #[must_use]
    #[inline]
    pub const fn unit(self) -> Unit {
        self.unit
    }

    /// Returns `true` if the magnitude is zero (of either sign).
    #[must_use]
    #[inline]
    pub fn is_zero(self) -> bool {
        self.magnitude == 0.0
    }

    /// Returns a copy with a different magnitude and the same unit.
    pub fn with_magnitude(self, magnitude: f64) -> Result<Self, MixError> {
        if magnitude.is_finite() {
            Ok(Self {
                magnitude,
                unit: self.unit,
            })
        } else {
            Err(MixError::NonFinite)
        }
    }

    /// Checks that `self` and `other` share a unit and returns both magnitudes
    /// with that unit, ready to be combined.
    pub fn merge(self, other: Self) -> Result<(f64, f64, Unit), MixError> {
        if self.unit == other.unit {
            Ok((self.magnitude, other.magnitude, self.unit))
        } else {
            Err(MixError::IncompatibleUnits {
                from: self.unit,
                to: other.unit,
            })
        }
    }

    /// Adds two values of the same unit.
    pub fn add(self, other: Self) -> Result<Self, MixError> {
        let (a, b, _) = self.merge(other)?;
        self.with_magnitude(a + b)
    }

    /// Subtracts `other` from `self`; both must share a unit.
    pub fn sub(self, other: Self) -> Result<Self, MixError> {
        let (a, b, _) = self.merge(other)?;
        self.with_magnitude(a - b)
    }

    /// Multiplies the magnitude by `factor`.
    pub fn scale(self, factor: f64) -> Result<Self, MixError> {
        self.with_magnitude(self.magnitude * factor)
    }

    /// Interpolates linearly towards `to`.
    ///
    /// `ratio` is not clamped, so overshooting easing curves extrapolate. The
    /// endpoints are exact: a ratio of `0.0` yields `self` and `1.0` yields `to`.
    pub fn mix(self, to: Self, ratio: f64) -> Result<Self, MixError> {
        let (a, b, _) = self.merge(to)?;
        self.with_magnitude(lerp(a, b, ratio))
    }

    /// Converts between angle units, or returns `self` for the same unit.
    ///
    /// Returns `None` for any other conversion.
    #[must_use]
    pub fn convert(self, unit: Unit) -> Option<Self> {
        if self.unit == unit {
            return Some(self);
        }
        let from = self.unit.degrees_per_unit()?;
        let to = unit.degrees_per_unit()?;
        let magnitude = self.magnitude * from / to;
        magnitude.is_finite().then_some(Self { magnitude, unit })
    }

    /// Returns the angle in degrees, for angle units.
    #[must_use]
    pub fn to_degrees(self) -> Option<f64> {
        self.convert(Unit::Deg).map(Self::magnitude)
    }
}

/// Linear interpolation that is exact at both endpoints.
#[inline]
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

impl fmt::Display for UnitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit == Unit::None {
            f.write_str("none")
        } else {
            write!(f, "{}{}", self.magnitude, self.unit.suffix())
        }
    }
}
