// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform function lists.
//!
//! A `transform` value is parsed into a list of [`TransformFn`]s and kept in
//! that form as its computed value, so two lists with the same functions in
//! the same order can be interpolated argument by argument. The used value
//! folds the list into a single [`Affine`], applying functions left to right
//! the way CSS does: `translate(10) scale(2)` translates the scaled shape.
//!
//! Supported functions: `matrix(a, b, c, d, e, f)`, `translate(x [, y])`,
//! `translateX(x)`, `translateY(y)`, `scale(sx [, sy])`, `scaleX(sx)`,
//! `scaleY(sy)`, `rotate(angle)`, `skew(ax [, ay])`, `skewX(ax)` and
//! `skewY(ay)`. Arguments are separated by commas or whitespace.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `tan`
use kurbo::{Affine, Vec2};
use smallvec::SmallVec;

use canopy_unit::{
    MixError, ParseError, RawValue, Unit, UnitValue, check_units, parse_dimension_token,
};

use crate::context::{CalcContext, PercentBasis};
use crate::mix::{check_arity, kind_mismatch, mix_f64};
use crate::value::ComputedValue;

/// One function of a transform list.
///
/// The single-axis spellings are normalized when parsing (`translateX(a)`
/// becomes `Translate(a, 0px)`, `scaleY(s)` becomes `Scale(1, s)`), and
/// angles are converted to degrees, so equivalent inputs mix with each other.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TransformFn {
    /// Raw affine coefficients `[a, b, c, d, e, f]`.
    Matrix([f64; 6]),
    /// A translation; percentages refer to the reference box.
    Translate(UnitValue, UnitValue),
    /// A scale along x and y.
    Scale(f64, f64),
    /// A clockwise rotation, in degrees.
    Rotate(f64),
    /// A skew along x and y, in degrees.
    Skew(f64, f64),
}

impl TransformFn {
    /// Returns this function as an affine transform.
    #[must_use]
    pub fn to_affine(&self, cx: &CalcContext) -> Affine {
        match *self {
            Self::Matrix(coeffs) => Affine::new(coeffs),
            Self::Translate(x, y) => Affine::translate(Vec2::new(
                resolve_translation(x, PercentBasis::Width, cx),
                resolve_translation(y, PercentBasis::Height, cx),
            )),
            Self::Scale(sx, sy) => Affine::scale_non_uniform(sx, sy),
            Self::Rotate(deg) => Affine::rotate(deg.to_radians()),
            Self::Skew(ax, ay) => Affine::skew(ax.to_radians().tan(), ay.to_radians().tan()),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Matrix(_) => "matrix",
            Self::Translate(..) => "translate",
            Self::Scale(..) => "scale",
            Self::Rotate(_) => "rotate",
            Self::Skew(..) => "skew",
        }
    }
}

fn resolve_translation(value: UnitValue, basis: PercentBasis, cx: &CalcContext) -> f64 {
    match value.unit() {
        Unit::Percent => value.magnitude() / 100.0 * basis.reference(cx),
        _ => value.magnitude(),
    }
}

/// Parses `none` or a transform function list.
pub(crate) fn parse_transform(raw: &RawValue) -> Result<Vec<TransformFn>, ParseError> {
    let RawValue::Text(text) = raw else {
        return Err(ParseError::invalid(
            "transform",
            "expected a list of transform functions",
        ));
    };
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }
    if text.eq_ignore_ascii_case("none") {
        return Ok(Vec::new());
    }

    let mut functions = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let open = rest
            .find('(')
            .ok_or_else(|| ParseError::invalid("transform", "expected `(`"))?;
        let close = rest
            .find(')')
            .ok_or_else(|| ParseError::invalid("transform", "unclosed `(`"))?;
        if close < open {
            return Err(ParseError::invalid("transform", "unexpected `)`"));
        }
        let name = rest[..open].trim();
        let args: SmallVec<[&str; 6]> = rest[open + 1..close]
            .split(|c: char| c == ',' || c.is_ascii_whitespace())
            .filter(|arg| !arg.is_empty())
            .collect();
        functions.push(parse_function(name, &args)?);
        rest = rest[close + 1..]
            .trim_start_matches(|c: char| c == ',' || c.is_ascii_whitespace());
    }
    Ok(functions)
}

fn parse_function(name: &str, args: &[&str]) -> Result<TransformFn, ParseError> {
    let zero = UnitValue::ZERO_PX;
    let function = match name {
        "matrix" => {
            let [a, b, c, d, e, f] = args else {
                return Err(arity("6", args));
            };
            TransformFn::Matrix([
                number(a)?,
                number(b)?,
                number(c)?,
                number(d)?,
                number(e)?,
                number(f)?,
            ])
        }
        "translate" => match args {
            [x] => TransformFn::Translate(length(x)?, zero),
            [x, y] => TransformFn::Translate(length(x)?, length(y)?),
            _ => return Err(arity("1 or 2", args)),
        },
        "translateX" => TransformFn::Translate(length(one(args)?)?, zero),
        "translateY" => TransformFn::Translate(zero, length(one(args)?)?),
        "scale" => match args {
            [s] => {
                let s = number(s)?;
                TransformFn::Scale(s, s)
            }
            [sx, sy] => TransformFn::Scale(number(sx)?, number(sy)?),
            _ => return Err(arity("1 or 2", args)),
        },
        "scaleX" => TransformFn::Scale(number(one(args)?)?, 1.0),
        "scaleY" => TransformFn::Scale(1.0, number(one(args)?)?),
        "rotate" => TransformFn::Rotate(angle(one(args)?)?),
        "skew" => match args {
            [ax] => TransformFn::Skew(angle(ax)?, 0.0),
            [ax, ay] => TransformFn::Skew(angle(ax)?, angle(ay)?),
            _ => return Err(arity("1 or 2", args)),
        },
        "skewX" => TransformFn::Skew(angle(one(args)?)?, 0.0),
        "skewY" => TransformFn::Skew(0.0, angle(one(args)?)?),
        _ => return Err(ParseError::InvalidKeyword(name.into())),
    };
    Ok(function)
}

fn arity(expected: &'static str, args: &[&str]) -> ParseError {
    ParseError::Arity {
        expected,
        found: args.len(),
    }
}

fn one<'a>(args: &[&'a str]) -> Result<&'a str, ParseError> {
    match args {
        [arg] => Ok(arg),
        _ => Err(arity("1", args)),
    }
}

fn number(token: &str) -> Result<f64, ParseError> {
    let value = parse_dimension_token(token, Unit::Number)?;
    check_units(&[value], &[Unit::Number])?;
    Ok(value.magnitude())
}

fn length(token: &str) -> Result<UnitValue, ParseError> {
    let value = parse_dimension_token(token, Unit::Px)?;
    check_units(&[value], &[Unit::Px, Unit::Percent])?;
    Ok(value)
}

fn angle(token: &str) -> Result<f64, ParseError> {
    let value = parse_dimension_token(token, Unit::Deg)?;
    value
        .to_degrees()
        .ok_or(ParseError::UnexpectedUnit { unit: value.unit() })
}

/// Folds a function list into one matrix, leftmost function outermost.
pub(crate) fn compose(functions: &[TransformFn], cx: &CalcContext) -> Affine {
    functions
        .iter()
        .fold(Affine::IDENTITY, |acc, function| acc * function.to_affine(cx))
}

/// Mixes two transform lists made of the same functions in the same order.
pub(crate) fn mix_transform(
    from: &ComputedValue,
    to: &ComputedValue,
    ratio: f64,
) -> Result<ComputedValue, MixError> {
    let (ComputedValue::Transform(a), ComputedValue::Transform(b)) = (from, to) else {
        return Err(kind_mismatch(from, to));
    };
    check_arity(a.len(), b.len())?;
    a.iter()
        .zip(b)
        .map(|(a, b)| mix_function(a, b, ratio))
        .collect::<Result<Vec<_>, _>>()
        .map(ComputedValue::Transform)
}

fn mix_function(
    from: &TransformFn,
    to: &TransformFn,
    ratio: f64,
) -> Result<TransformFn, MixError> {
    use TransformFn::*;
    let mixed = match (from, to) {
        (Matrix(a), Matrix(b)) => {
            let mut out = [0.0; 6];
            for (slot, (a, b)) in out.iter_mut().zip(a.iter().zip(b)) {
                *slot = mix_f64(*a, *b, ratio)?;
            }
            Matrix(out)
        }
        (Translate(ax, ay), Translate(bx, by)) => {
            Translate(ax.mix(*bx, ratio)?, ay.mix(*by, ratio)?)
        }
        (Scale(ax, ay), Scale(bx, by)) => {
            Scale(mix_f64(*ax, *bx, ratio)?, mix_f64(*ay, *by, ratio)?)
        }
        (Rotate(a), Rotate(b)) => Rotate(mix_f64(*a, *b, ratio)?),
        (Skew(ax, ay), Skew(bx, by)) => {
            Skew(mix_f64(*ax, *bx, ratio)?, mix_f64(*ay, *by, ratio)?)
        }
        _ => {
            return Err(MixError::KindMismatch {
                from: from.name(),
                to: to.name(),
            });
        }
    };
    Ok(mixed)
}
