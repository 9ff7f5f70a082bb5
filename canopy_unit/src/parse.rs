// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dimension parser.
//!
//! Turns [`RawValue`]s into [`UnitValue`]s. Tokens follow the grammar
//! `<number><suffix>?`, where the number uses `.` as its only decimal
//! separator and the suffix is one of `%`, `px`, `deg`, `rad`, `grad`, `turn`.
//! A bare number takes the caller's default unit, so a bare `0` is valid for
//! every syntax. The literal `none` parses to [`UnitValue::NONE`].

use alloc::string::ToString;
use smallvec::{SmallVec, smallvec};

use crate::error::ParseError;
use crate::raw::{RawItem, RawValue};
use crate::unit::Unit;
use crate::value::UnitValue;

/// An ordered list of parsed dimensions; four fit inline.
pub type DimensionList = SmallVec<[UnitValue; 4]>;

/// Parses a single token such as `10`, `-2.5px`, `50%`, or `0.25turn`.
///
/// # Example
///
/// ```
/// use canopy_unit::{Unit, UnitValue, parse_dimension_token};
///
/// assert_eq!(parse_dimension_token("50%", Unit::Px), Ok(UnitValue::percent(50.0)));
/// assert_eq!(parse_dimension_token("12", Unit::Px), Ok(UnitValue::px(12.0)));
/// assert!(parse_dimension_token("12em", Unit::Px).is_err());
/// ```
pub fn parse_dimension_token(token: &str, default_unit: Unit) -> Result<UnitValue, ParseError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ParseError::Empty);
    }
    if token.eq_ignore_ascii_case("none") {
        return Ok(UnitValue::NONE);
    }

    let split = numeric_prefix_len(token);
    let (number, suffix) = token.split_at(split);
    let magnitude: f64 = number.parse().map_err(|_| ParseError::InvalidNumber {
        token: token.to_string(),
    })?;
    if !magnitude.is_finite() {
        return Err(ParseError::NonFinite {
            token: token.to_string(),
        });
    }

    let unit = if suffix.is_empty() {
        default_unit
    } else {
        Unit::from_suffix(suffix).ok_or_else(|| ParseError::UnknownUnit {
            token: token.to_string(),
            suffix: suffix.to_string(),
        })?
    };
    UnitValue::new(magnitude, unit)
}

/// Length in bytes of the leading `[+-]digits[.digits][e[+-]digits]` run.
///
/// Only ASCII is consumed, so the returned index is always a char boundary.
fn numeric_prefix_len(token: &str) -> usize {
    let bytes = token.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
    }
    // Only treat `e` as an exponent when digits follow, so `1em` keeps its suffix.
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        if bytes.get(j).is_some_and(u8::is_ascii_digit) {
            while bytes.get(j).is_some_and(u8::is_ascii_digit) {
                j += 1;
            }
            i = j;
        }
    }
    i
}

fn parse_item(item: &RawItem, default_unit: Unit) -> Result<UnitValue, ParseError> {
    match item {
        RawItem::Number(n) => UnitValue::new(*n, default_unit),
        RawItem::Text(text) => {
            let mut tokens = text.split_ascii_whitespace();
            match (tokens.next(), tokens.next()) {
                (Some(token), None) => parse_dimension_token(token, default_unit),
                (None, _) => Err(ParseError::Empty),
                (Some(_), Some(_)) => Err(ParseError::Arity {
                    expected: "1",
                    found: text.split_ascii_whitespace().count(),
                }),
            }
        }
    }
}

/// Parses input that must hold exactly one dimension.
///
/// # Example
///
/// ```
/// use canopy_unit::{RawValue, Unit, UnitValue, parse_single_dimension};
///
/// let value = parse_single_dimension(&RawValue::from(10), Unit::Px).unwrap();
/// assert_eq!(value, UnitValue::px(10.0));
///
/// let value = parse_single_dimension(&RawValue::from("90deg"), Unit::Deg).unwrap();
/// assert_eq!(value, UnitValue::deg(90.0));
/// ```
pub fn parse_single_dimension(
    raw: &RawValue,
    default_unit: Unit,
) -> Result<UnitValue, ParseError> {
    let values = parse_dimension_array(raw, default_unit)?;
    match values.as_slice() {
        [value] => Ok(*value),
        _ => Err(ParseError::Arity {
            expected: "1",
            found: values.len(),
        }),
    }
}

/// Parses a single length where a bare number means pixels.
#[inline]
pub fn parse_single_dimension_px(raw: &RawValue) -> Result<UnitValue, ParseError> {
    parse_single_dimension(raw, Unit::Px)
}

/// Parses input that may hold several dimensions, preserving their order.
///
/// Strings are split on ASCII whitespace; list elements are parsed one by one.
/// No shorthand expansion happens here, see [`expand_box_shorthand`].
///
/// # Example
///
/// ```
/// use canopy_unit::{RawValue, Unit, UnitValue, parse_dimension_array};
///
/// let values = parse_dimension_array(&RawValue::from("10 20%"), Unit::Px).unwrap();
/// assert_eq!(values.as_slice(), &[UnitValue::px(10.0), UnitValue::percent(20.0)]);
/// ```
pub fn parse_dimension_array(
    raw: &RawValue,
    default_unit: Unit,
) -> Result<DimensionList, ParseError> {
    let values: DimensionList = match raw {
        RawValue::Number(n) => smallvec![UnitValue::new(*n, default_unit)?],
        RawValue::Text(text) => text
            .split_ascii_whitespace()
            .map(|token| parse_dimension_token(token, default_unit))
            .collect::<Result<_, _>>()?,
        RawValue::List(items) => items
            .iter()
            .map(|item| parse_item(item, default_unit))
            .collect::<Result<_, _>>()?,
    };
    if values.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(values)
}

/// Expands one to four values into four positional values using the
/// CSS margin rule.
///
/// | tokens | result |
/// |--------|--------|
/// | `a` | `[a, a, a, a]` |
/// | `a b` | `[a, b, a, b]` |
/// | `a b c` | `[a, b, c, b]` |
/// | `a b c d` | `[a, b, c, d]` |
///
/// For corner radii the positions are top-left, top-right, bottom-right,
/// bottom-left. The rule is generic so shorthand groups can spread raw
/// tokens with it before any parsing.
pub fn expand_box_shorthand<T: Clone>(values: &[T]) -> Result<[T; 4], ParseError> {
    match values {
        [a] => Ok([a.clone(), a.clone(), a.clone(), a.clone()]),
        [a, b] => Ok([a.clone(), b.clone(), a.clone(), b.clone()]),
        [a, b, c] => Ok([a.clone(), b.clone(), c.clone(), b.clone()]),
        [a, b, c, d] => Ok([a.clone(), b.clone(), c.clone(), d.clone()]),
        _ => Err(ParseError::Arity {
            expected: "1 to 4",
            found: values.len(),
        }),
    }
}

/// Expands one or two values into a pair: `a` becomes `[a, a]`.
pub fn expand_pair_shorthand<T: Clone>(values: &[T]) -> Result<[T; 2], ParseError> {
    match values {
        [a] => Ok([a.clone(), a.clone()]),
        [a, b] => Ok([a.clone(), b.clone()]),
        _ => Err(ParseError::Arity {
            expected: "1 or 2",
            found: values.len(),
        }),
    }
}

/// Parses then expands a four-part shorthand such as a corner radius.
///
/// # Example
///
/// ```
/// use canopy_unit::{RawValue, Unit, UnitValue, parse_box_shorthand};
///
/// let corners = parse_box_shorthand(&RawValue::from("10 20"), Unit::Px).unwrap();
/// assert_eq!(corners.map(UnitValue::magnitude), [10.0, 20.0, 10.0, 20.0]);
///
/// assert!(parse_box_shorthand(&RawValue::from("1 2 3 4 5"), Unit::Px).is_err());
/// ```
pub fn parse_box_shorthand(
    raw: &RawValue,
    default_unit: Unit,
) -> Result<[UnitValue; 4], ParseError> {
    expand_box_shorthand(&parse_dimension_array(raw, default_unit)?)
}

/// Parses then expands a two-part shorthand.
pub fn parse_pair_shorthand(
    raw: &RawValue,
    default_unit: Unit,
) -> Result<[UnitValue; 2], ParseError> {
    expand_pair_shorthand(&parse_dimension_array(raw, default_unit)?)
}

/// Rejects any value whose unit is not in `accepted`.
pub fn check_units(values: &[UnitValue], accepted: &[Unit]) -> Result<(), ParseError> {
    match values.iter().find(|v| !accepted.contains(&v.unit())) {
        Some(value) => Err(ParseError::UnexpectedUnit { unit: value.unit() }),
        None => Ok(()),
    }
}
