// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point lists and path data.

use alloc::vec::Vec;

use canopy_unit::{
    MixError, ParseError, RawItem, RawValue, Unit, UnitValue, check_units, parse_dimension_token,
};
use kurbo::{BezPath, PathEl, Point};

use crate::mix::{check_arity, kind_mismatch, mix_point};
use crate::value::ComputedValue;

/// Parses `"x,y x,y ..."` text or a flat numeric list into points.
///
/// Commas and whitespace both separate coordinates, so `"0,0 10,0"`,
/// `"0 0 10 0"` and `[0, 0, 10, 0]` are the same polygon.
pub(crate) fn parse_points(raw: &RawValue) -> Result<Vec<Point>, ParseError> {
    let coords = match raw {
        RawValue::Number(_) => {
            return Err(ParseError::Arity {
                expected: "an even number of",
                found: 1,
            });
        }
        RawValue::Text(text) if text.trim().is_empty() => return Err(ParseError::Empty),
        RawValue::Text(text) => text
            .split(|c: char| c == ',' || c.is_ascii_whitespace())
            .filter(|token| !token.is_empty())
            .map(coordinate)
            .collect::<Result<Vec<_>, _>>()?,
        RawValue::List(items) => items
            .iter()
            .map(|item| match item {
                RawItem::Number(n) => coordinate_value(*n),
                RawItem::Text(text) => coordinate(text.trim()),
            })
            .collect::<Result<Vec<_>, _>>()?,
    };
    if coords.len() % 2 != 0 {
        return Err(ParseError::Arity {
            expected: "an even number of",
            found: coords.len(),
        });
    }
    Ok(coords
        .chunks_exact(2)
        .map(|xy| Point::new(xy[0], xy[1]))
        .collect())
}

fn coordinate(token: &str) -> Result<f64, ParseError> {
    let value = parse_dimension_token(token, Unit::Px)?;
    check_units(&[value], &[Unit::Px])?;
    Ok(value.magnitude())
}

fn coordinate_value(n: f64) -> Result<f64, ParseError> {
    UnitValue::new(n, Unit::Px).map(|value| value.magnitude())
}

/// Parses SVG path data.
#[cfg(feature = "std")]
pub(crate) fn parse_path(raw: &RawValue) -> Result<BezPath, ParseError> {
    use alloc::string::ToString;

    let RawValue::Text(text) = raw else {
        return Err(ParseError::invalid("path", "expected SVG path data"));
    };
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }
    let path =
        BezPath::from_svg(text).map_err(|err| ParseError::invalid("path", err.to_string()))?;
    if !path.elements().iter().all(element_is_finite) {
        return Err(ParseError::invalid("path", "coordinates must be finite"));
    }
    Ok(path)
}

#[cfg(feature = "std")]
fn element_is_finite(el: &PathEl) -> bool {
    match el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => p.is_finite(),
        PathEl::QuadTo(p1, p2) => p1.is_finite() && p2.is_finite(),
        PathEl::CurveTo(p1, p2, p3) => p1.is_finite() && p2.is_finite() && p3.is_finite(),
        PathEl::ClosePath => true,
    }
}

/// Parses SVG path data.
#[cfg(not(feature = "std"))]
pub(crate) fn parse_path(_raw: &RawValue) -> Result<BezPath, ParseError> {
    Err(ParseError::invalid(
        "path",
        "SVG path data requires the `std` feature",
    ))
}

pub(crate) fn mix_points(
    from: &ComputedValue,
    to: &ComputedValue,
    ratio: f64,
) -> Result<ComputedValue, MixError> {
    let (ComputedValue::Points(a), ComputedValue::Points(b)) = (from, to) else {
        return Err(kind_mismatch(from, to));
    };
    check_arity(a.len(), b.len())?;
    a.iter()
        .zip(b)
        .map(|(a, b)| mix_point(*a, *b, ratio))
        .collect::<Result<Vec<_>, _>>()
        .map(ComputedValue::Points)
}

/// Mixes two paths with the same verb sequence point by point.
pub(crate) fn mix_path(
    from: &ComputedValue,
    to: &ComputedValue,
    ratio: f64,
) -> Result<ComputedValue, MixError> {
    let (ComputedValue::Path(a), ComputedValue::Path(b)) = (from, to) else {
        return Err(kind_mismatch(from, to));
    };
    let (a, b) = (a.elements(), b.elements());
    check_arity(a.len(), b.len())?;
    let mut path = BezPath::new();
    for (a, b) in a.iter().zip(b) {
        let el = match (a, b) {
            (PathEl::MoveTo(p), PathEl::MoveTo(q)) => {
                PathEl::MoveTo(mix_point(*p, *q, ratio)?)
            }
            (PathEl::LineTo(p), PathEl::LineTo(q)) => {
                PathEl::LineTo(mix_point(*p, *q, ratio)?)
            }
            (PathEl::QuadTo(p1, p2), PathEl::QuadTo(q1, q2)) => PathEl::QuadTo(
                mix_point(*p1, *q1, ratio)?,
                mix_point(*p2, *q2, ratio)?,
            ),
            (PathEl::CurveTo(p1, p2, p3), PathEl::CurveTo(q1, q2, q3)) => PathEl::CurveTo(
                mix_point(*p1, *q1, ratio)?,
                mix_point(*p2, *q2, ratio)?,
                mix_point(*p3, *q3, ratio)?,
            ),
            (PathEl::ClosePath, PathEl::ClosePath) => PathEl::ClosePath,
            _ => {
                return Err(MixError::KindMismatch {
                    from: verb(a),
                    to: verb(b),
                });
            }
        };
        path.push(el);
    }
    Ok(ComputedValue::Path(path))
}

fn verb(el: &PathEl) -> &'static str {
    match el {
        PathEl::MoveTo(_) => "move-to",
        PathEl::LineTo(_) => "line-to",
        PathEl::QuadTo(..) => "quad-to",
        PathEl::CurveTo(..) => "curve-to",
        PathEl::ClosePath => "close-path",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn point_spellings_agree() {
        let expected = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 5.0),
        ];
        let parse = |text: &str| parse_points(&RawValue::from(text)).unwrap();
        assert_eq!(parse("0,0 10,0 10,5"), expected);
        assert_eq!(parse("0 0 10 0 10 5"), expected);
        assert_eq!(parse("0px,0 10,0px 10,5"), expected);
        assert_eq!(
            parse_points(&RawValue::from([0.0, 0.0, 10.0, 0.0, 10.0, 5.0])).unwrap(),
            expected
        );
    }

    #[test]
    fn odd_coordinate_count() {
        assert_eq!(
            parse_points(&RawValue::from("0,0 10")),
            Err(ParseError::Arity {
                expected: "an even number of",
                found: 3
            })
        );
        assert!(parse_points(&RawValue::from(5)).is_err());
        assert!(parse_points(&RawValue::from("0,0 10%,5")).is_err());
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(parse_points(&RawValue::from(" ")), Err(ParseError::Empty));
    }

    #[test]
    fn points_mix_element_wise() {
        let a = ComputedValue::Points(vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)]);
        let b = ComputedValue::Points(vec![Point::new(10.0, 0.0), Point::new(20.0, 30.0)]);
        assert_eq!(
            mix_points(&a, &b, 0.5),
            Ok(ComputedValue::Points(vec![
                Point::new(5.0, 0.0),
                Point::new(15.0, 20.0)
            ]))
        );
        let c = ComputedValue::Points(vec![Point::ZERO]);
        assert_eq!(
            mix_points(&a, &c, 0.5),
            Err(MixError::ArityMismatch { from: 2, to: 1 })
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn svg_path_data() {
        let path = parse_path(&RawValue::from("M0 0 L10 0 L10 10 Z")).unwrap();
        assert_eq!(path.elements().len(), 4);
        assert!(parse_path(&RawValue::from("M0 0 X")).is_err());
        assert!(parse_path(&RawValue::from(1)).is_err());
    }

    #[cfg(feature = "std")]
    #[test]
    fn paths_mix_when_verbs_match() {
        let a = ComputedValue::Path(parse_path(&RawValue::from("M0 0 L10 0")).unwrap());
        let b = ComputedValue::Path(parse_path(&RawValue::from("M0 10 L20 10")).unwrap());
        let mid = mix_path(&a, &b, 0.5).unwrap();
        let expected = parse_path(&RawValue::from("M0 5 L15 5")).unwrap();
        assert_eq!(mid, ComputedValue::Path(expected));
        assert_eq!(mix_path(&a, &b, 1.0), Ok(b));
    }

    #[cfg(feature = "std")]
    #[test]
    fn paths_with_different_verbs_do_not_mix() {
        let a = ComputedValue::Path(parse_path(&RawValue::from("M0 0 L10 0")).unwrap());
        let b = ComputedValue::Path(parse_path(&RawValue::from("M0 0 Q5 5 10 0")).unwrap());
        assert_eq!(
            mix_path(&a, &b, 0.5),
            Err(MixError::KindMismatch {
                from: "line-to",
                to: "quad-to"
            })
        );
        let c = ComputedValue::Path(parse_path(&RawValue::from("M0 0")).unwrap());
        assert_eq!(
            mix_path(&a, &c, 0.5),
            Err(MixError::ArityMismatch { from: 2, to: 1 })
        );
    }
}
