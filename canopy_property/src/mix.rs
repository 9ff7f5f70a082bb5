// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interpolation building blocks shared by the canonical mixers.
//!
//! Numeric values interpolate as `a·(1 − t) + b·t`, which is exact at both
//! endpoints. The ratio is never clamped: easing curves may overshoot and
//! the result extrapolates. Units are never converted while mixing.

use canopy_unit::{DimensionList, MixError, UnitValue, lerp};
use kurbo::Point;

use crate::value::ComputedValue;

/// Discrete interpolation for values without a mixer.
///
/// Yields `from` while `ratio < 1` and `to` once `ratio >= 1`.
///
/// ```rust
/// use canopy_property::{ComputedValue, mix::step};
///
/// let from = ComputedValue::Keyword("butt");
/// let to = ComputedValue::Keyword("round");
/// assert_eq!(step(&from, &to, 0.99), from);
/// assert_eq!(step(&from, &to, 1.0), to);
/// ```
#[must_use]
pub fn step(from: &ComputedValue, to: &ComputedValue, ratio: f64) -> ComputedValue {
    if ratio >= 1.0 {
        to.clone()
    } else {
        from.clone()
    }
}

/// The error for operands of different variants.
pub(crate) fn kind_mismatch(from: &ComputedValue, to: &ComputedValue) -> MixError {
    MixError::KindMismatch {
        from: from.shape().name(),
        to: to.shape().name(),
    }
}

/// Mixes two single dimensions.
pub(crate) fn mix_unit(
    from: &ComputedValue,
    to: &ComputedValue,
    ratio: f64,
) -> Result<ComputedValue, MixError> {
    match (from, to) {
        (ComputedValue::Unit(a), ComputedValue::Unit(b)) => {
            Ok(ComputedValue::Unit(a.mix(*b, ratio)?))
        }
        _ => Err(kind_mismatch(from, to)),
    }
}

/// Mixes two dimension lists element-wise.
pub(crate) fn mix_list(
    from: &ComputedValue,
    to: &ComputedValue,
    ratio: f64,
) -> Result<ComputedValue, MixError> {
    match (from, to) {
        (ComputedValue::List(a), ComputedValue::List(b)) => {
            Ok(ComputedValue::List(mix_dimensions(a, b, ratio)?))
        }
        _ => Err(kind_mismatch(from, to)),
    }
}

/// Mixes two equally long dimension slices element-wise.
pub(crate) fn mix_dimensions(
    from: &[UnitValue],
    to: &[UnitValue],
    ratio: f64,
) -> Result<DimensionList, MixError> {
    check_arity(from.len(), to.len())?;
    from.iter()
        .zip(to)
        .map(|(a, b)| a.mix(*b, ratio))
        .collect()
}

/// Mixes two points coordinate-wise.
pub(crate) fn mix_point(from: Point, to: Point, ratio: f64) -> Result<Point, MixError> {
    Ok(Point::new(
        mix_f64(from.x, to.x, ratio)?,
        mix_f64(from.y, to.y, ratio)?,
    ))
}

/// Mixes two plain magnitudes, rejecting non-finite results.
pub(crate) fn mix_f64(from: f64, to: f64, ratio: f64) -> Result<f64, MixError> {
    let value = lerp(from, to, ratio);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MixError::NonFinite)
    }
}

pub(crate) fn check_arity(from: usize, to: usize) -> Result<(), MixError> {
    if from == to {
        Ok(())
    } else {
        Err(MixError::ArityMismatch { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_unit::Unit;
    use smallvec::smallvec;

    fn px(v: f64) -> ComputedValue {
        ComputedValue::Unit(UnitValue::px(v))
    }

    #[test]
    fn unit_endpoints_are_exact() {
        let (a, b) = (px(0.1), px(0.7));
        assert_eq!(mix_unit(&a, &b, 0.0), Ok(a.clone()));
        assert_eq!(mix_unit(&a, &b, 1.0), Ok(b));
    }

    #[test]
    fn overshoot_extrapolates() {
        assert_eq!(mix_unit(&px(0.0), &px(10.0), 1.5), Ok(px(15.0)));
        assert_eq!(mix_unit(&px(0.0), &px(10.0), -0.5), Ok(px(-5.0)));
    }

    #[test]
    fn unit_mismatch_is_an_error() {
        let pct = ComputedValue::Unit(UnitValue::percent(50.0));
        assert_eq!(
            mix_unit(&px(10.0), &pct, 0.5),
            Err(MixError::IncompatibleUnits {
                from: Unit::Px,
                to: Unit::Percent
            })
        );
    }

    #[test]
    fn list_arity_must_match() {
        let two = ComputedValue::List(smallvec![UnitValue::px(1.0); 2]);
        let four = ComputedValue::List(smallvec![UnitValue::px(1.0); 4]);
        assert_eq!(
            mix_list(&two, &four, 0.5),
            Err(MixError::ArityMismatch { from: 2, to: 4 })
        );
    }

    #[test]
    fn list_mixes_element_wise() {
        let a = ComputedValue::List(smallvec![UnitValue::px(0.0), UnitValue::px(10.0)]);
        let b = ComputedValue::List(smallvec![UnitValue::px(10.0), UnitValue::px(30.0)]);
        assert_eq!(
            mix_list(&a, &b, 0.5),
            Ok(ComputedValue::List(smallvec![
                UnitValue::px(5.0),
                UnitValue::px(20.0)
            ]))
        );
    }

    #[test]
    fn kinds_must_match() {
        let keyword = ComputedValue::Keyword("round");
        assert!(matches!(
            mix_unit(&px(1.0), &keyword, 0.5),
            Err(MixError::KindMismatch { .. })
        ));
    }

    #[test]
    fn points_and_overflow() {
        let p = mix_point(Point::new(0.0, 0.0), Point::new(10.0, 20.0), 0.5).unwrap();
        assert_eq!(p, Point::new(5.0, 10.0));
        assert_eq!(mix_f64(f64::MAX, -f64::MAX, -1.0), Err(MixError::NonFinite));
    }
}
