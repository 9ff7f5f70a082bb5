// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property syntaxes and their canonical behavior.
//!
//! Every property declares one [`PropertySyntax`]. The syntax fixes the
//! [`ValueShape`] of the property's computed values and supplies the
//! canonical parser, the optional mixer and the optional calculator. The
//! mapping is a static table indexed by the syntax, so dispatch is a single
//! array access and the set of syntaxes is closed.
//!
//! | syntax | computed value | mixer | calculator |
//! |--------|----------------|-------|------------|
//! | `Number` | plain number | lerp | |
//! | `Opacity` | number or `%` | lerp | `%` → fraction, clamp to [0, 1] |
//! | `ShadowBlur` | px | lerp | clamp to ≥ 0 |
//! | `ZIndex` | plain number | lerp, rounded | |
//! | `Angle` | deg/rad/turn/grad | lerp | → deg |
//! | `LengthPercentage` | px or `%` | lerp | `%` → px against the basis |
//! | `LengthPercentage12` | 2 × px or `%` | element-wise | `%` → px |
//! | `LengthPercentage14` | 4 × px or `%` | element-wise | `%` → px |
//! | `Color` | sRGB color | premultiplied blend | |
//! | `Paint` | `none` or color | blend, else step | |
//! | `Keyword` | keyword | step | |
//! | `Text` | string | step | |
//! | `ListOfPoints` | points | element-wise | |
//! | `Path` | path elements | element-wise | |
//! | `Transform` | function list | element-wise | → matrix |
//! | `TransformOrigin` | 2 × px or `%` | element-wise | `%` → px against the box |

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use canopy_unit::{
    MixError, ParseError, RawItem, RawValue, Unit, UnitValue, check_units, parse_box_shorthand,
    parse_dimension_token, parse_pair_shorthand, parse_single_dimension,
};
use kurbo::BezPath;
use peniko::Color;
use smallvec::{SmallVec, smallvec};

use crate::color::{mix_color, mix_paint, parse_color, parse_paint};
use crate::context::{CalcContext, PercentBasis};
use crate::definition::PropertyDefinition;
use crate::geometry::{mix_path, mix_points, parse_path, parse_points};
use crate::mix::{kind_mismatch, mix_list, mix_unit};
use crate::transform::{compose, mix_transform, parse_transform};
use crate::value::{ComputedValue, Paint, UsedValue, ValueShape};

/// The value grammar of a property.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertySyntax {
    /// A plain number, such as `miterLimit`.
    Number,
    /// A number or percentage used as an alpha value.
    Opacity,
    /// A non-negative blur radius in px.
    ShadowBlur,
    /// A stacking order; interpolates in whole steps.
    ZIndex,
    /// An angle; a bare number means degrees.
    Angle,
    /// A length or percentage; a bare number means px.
    LengthPercentage,
    /// One or two lengths or percentages (`lineDash`), or `none`.
    LengthPercentage12,
    /// One to four lengths or percentages expanded to four corners (`radius`).
    LengthPercentage14,
    /// A CSS color.
    Color,
    /// `none` or a CSS color.
    Paint,
    /// One keyword out of the property's keyword set.
    Keyword,
    /// Free text.
    Text,
    /// A polygon or polyline point list.
    ListOfPoints,
    /// SVG path data.
    Path,
    /// `none` or a transform function list.
    Transform,
    /// One or two positions with `left`/`center`/`right`/`top`/`bottom` keywords.
    TransformOrigin,
}

impl PropertySyntax {
    /// Every syntax, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::Number,
        Self::Opacity,
        Self::ShadowBlur,
        Self::ZIndex,
        Self::Angle,
        Self::LengthPercentage,
        Self::LengthPercentage12,
        Self::LengthPercentage14,
        Self::Color,
        Self::Paint,
        Self::Keyword,
        Self::Text,
        Self::ListOfPoints,
        Self::Path,
        Self::Transform,
        Self::TransformOrigin,
    ];

    /// Returns the shape every computed value of this syntax has.
    #[must_use]
    pub const fn shape(self) -> ValueShape {
        match self {
            Self::Number
            | Self::Opacity
            | Self::ShadowBlur
            | Self::ZIndex
            | Self::Angle
            | Self::LengthPercentage => ValueShape::Dimension,
            Self::LengthPercentage12 | Self::TransformOrigin => ValueShape::Dimensions(2),
            Self::LengthPercentage14 => ValueShape::Dimensions(4),
            Self::Color => ValueShape::Color,
            Self::Paint => ValueShape::Paint,
            Self::Keyword => ValueShape::Keyword,
            Self::Text => ValueShape::Text,
            Self::ListOfPoints => ValueShape::Points,
            Self::Path => ValueShape::Path,
            Self::Transform => ValueShape::Transform,
        }
    }

    /// Returns the unit a bare number takes, for dimension syntaxes.
    #[must_use]
    pub const fn default_unit(self) -> Option<Unit> {
        match self {
            Self::Number | Self::Opacity | Self::ZIndex => Some(Unit::Number),
            Self::Angle => Some(Unit::Deg),
            Self::ShadowBlur
            | Self::LengthPercentage
            | Self::LengthPercentage12
            | Self::LengthPercentage14
            | Self::TransformOrigin => Some(Unit::Px),
            _ => None,
        }
    }

    /// Returns `true` if values of this syntax interpolate continuously
    /// rather than stepping.
    #[must_use]
    pub fn has_mixer(self) -> bool {
        self.handler().mix.is_some()
    }

    /// Returns `true` if used values differ from computed values.
    #[must_use]
    pub fn has_calculator(self) -> bool {
        self.handler().calculate.is_some()
    }

    pub(crate) fn handler(self) -> &'static SyntaxHandler {
        let handler = &HANDLERS[self as usize];
        debug_assert_eq!(handler.syntax, self, "syntax table out of order");
        handler
    }

    /// The initial value used when a definition does not specify one.
    pub(crate) fn fallback_initial(self, keywords: &[&'static str]) -> ComputedValue {
        let zero = |unit| {
            ComputedValue::Unit(UnitValue::new(0.0, unit).unwrap_or(UnitValue::ZERO_PX))
        };
        match self {
            Self::Number | Self::ZIndex => zero(Unit::Number),
            Self::Opacity => ComputedValue::Unit(UnitValue::number(1.0)),
            Self::ShadowBlur | Self::LengthPercentage => zero(Unit::Px),
            Self::Angle => zero(Unit::Deg),
            Self::LengthPercentage12 => ComputedValue::List(smallvec![UnitValue::ZERO_PX; 2]),
            Self::LengthPercentage14 => ComputedValue::List(smallvec![UnitValue::ZERO_PX; 4]),
            Self::Color => ComputedValue::Color(Color::TRANSPARENT),
            Self::Paint => ComputedValue::Paint(Paint::None),
            Self::Keyword => ComputedValue::Keyword(keywords.first().copied().unwrap_or("")),
            Self::Text => ComputedValue::Text(String::new()),
            Self::ListOfPoints => ComputedValue::Points(Vec::new()),
            Self::Path => ComputedValue::Path(BezPath::new()),
            Self::Transform => ComputedValue::Transform(Vec::new()),
            Self::TransformOrigin => {
                ComputedValue::List(smallvec![UnitValue::percent(50.0); 2])
            }
        }
    }
}

pub(crate) type ParseFn =
    fn(&RawValue, &PropertyDefinition) -> Result<ComputedValue, ParseError>;
pub(crate) type MixFn =
    fn(&ComputedValue, &ComputedValue, f64) -> Result<ComputedValue, MixError>;
pub(crate) type CalcFn = fn(&ComputedValue, &PropertyDefinition, &CalcContext) -> UsedValue;

/// The canonical implementation of one syntax.
pub(crate) struct SyntaxHandler {
    pub(crate) syntax: PropertySyntax,
    pub(crate) parse: ParseFn,
    pub(crate) mix: Option<MixFn>,
    pub(crate) calculate: Option<CalcFn>,
}

const fn handler(
    syntax: PropertySyntax,
    parse: ParseFn,
    mix: Option<MixFn>,
    calculate: Option<CalcFn>,
) -> SyntaxHandler {
    SyntaxHandler {
        syntax,
        parse,
        mix,
        calculate,
    }
}

/// Indexed by `PropertySyntax as usize`.
static HANDLERS: [SyntaxHandler; 16] = [
    handler(PropertySyntax::Number, parse_number, Some(mix_unit), None),
    handler(
        PropertySyntax::Opacity,
        parse_opacity,
        Some(mix_unit),
        Some(calc_opacity),
    ),
    handler(
        PropertySyntax::ShadowBlur,
        parse_shadow_blur,
        Some(mix_unit),
        Some(calc_shadow_blur),
    ),
    handler(PropertySyntax::ZIndex, parse_number, Some(mix_z_index), None),
    handler(
        PropertySyntax::Angle,
        parse_angle,
        Some(mix_unit),
        Some(calc_angle),
    ),
    handler(
        PropertySyntax::LengthPercentage,
        parse_length,
        Some(mix_unit),
        Some(calc_length),
    ),
    handler(
        PropertySyntax::LengthPercentage12,
        parse_length_pair,
        Some(mix_list),
        Some(calc_lengths),
    ),
    handler(
        PropertySyntax::LengthPercentage14,
        parse_length_box,
        Some(mix_list),
        Some(calc_lengths),
    ),
    handler(PropertySyntax::Color, parse_color_value, Some(mix_color), None),
    handler(PropertySyntax::Paint, parse_paint_value, Some(mix_paint), None),
    handler(PropertySyntax::Keyword, parse_keyword, None, None),
    handler(PropertySyntax::Text, parse_text, None, None),
    handler(
        PropertySyntax::ListOfPoints,
        parse_points_value,
        Some(mix_points),
        None,
    ),
    handler(PropertySyntax::Path, parse_path_value, Some(mix_path), None),
    handler(
        PropertySyntax::Transform,
        parse_transform_value,
        Some(mix_transform),
        Some(calc_transform),
    ),
    handler(
        PropertySyntax::TransformOrigin,
        parse_transform_origin,
        Some(mix_list),
        Some(calc_transform_origin),
    ),
];

const LENGTH_UNITS: &[Unit] = &[Unit::Px, Unit::Percent];

fn single(
    raw: &RawValue,
    default_unit: Unit,
    accepted: &[Unit],
) -> Result<ComputedValue, ParseError> {
    let value = parse_single_dimension(raw, default_unit)?;
    check_units(&[value], accepted)?;
    Ok(ComputedValue::Unit(value))
}

fn parse_number(raw: &RawValue, _: &PropertyDefinition) -> Result<ComputedValue, ParseError> {
    single(raw, Unit::Number, &[Unit::Number])
}

fn parse_opacity(raw: &RawValue, _: &PropertyDefinition) -> Result<ComputedValue, ParseError> {
    single(raw, Unit::Number, &[Unit::Number, Unit::Percent])
}

fn parse_shadow_blur(raw: &RawValue, _: &PropertyDefinition) -> Result<ComputedValue, ParseError> {
    single(raw, Unit::Px, &[Unit::Px])
}

fn parse_angle(raw: &RawValue, _: &PropertyDefinition) -> Result<ComputedValue, ParseError> {
    single(raw, Unit::Deg, &[Unit::Deg, Unit::Rad, Unit::Turn, Unit::Grad])
}

fn parse_length(raw: &RawValue, _: &PropertyDefinition) -> Result<ComputedValue, ParseError> {
    single(raw, Unit::Px, LENGTH_UNITS)
}

fn parse_length_pair(raw: &RawValue, _: &PropertyDefinition) -> Result<ComputedValue, ParseError> {
    if raw.is_keyword("none") {
        return Ok(ComputedValue::List(smallvec![UnitValue::ZERO_PX; 2]));
    }
    let pair = parse_pair_shorthand(raw, Unit::Px)?;
    check_units(&pair, LENGTH_UNITS)?;
    Ok(ComputedValue::List(SmallVec::from_slice(&pair)))
}

fn parse_length_box(raw: &RawValue, _: &PropertyDefinition) -> Result<ComputedValue, ParseError> {
    let corners = parse_box_shorthand(raw, Unit::Px)?;
    check_units(&corners, LENGTH_UNITS)?;
    Ok(ComputedValue::List(SmallVec::from_slice(&corners)))
}

fn parse_color_value(raw: &RawValue, _: &PropertyDefinition) -> Result<ComputedValue, ParseError> {
    parse_color(raw).map(ComputedValue::Color)
}

fn parse_paint_value(raw: &RawValue, _: &PropertyDefinition) -> Result<ComputedValue, ParseError> {
    parse_paint(raw).map(ComputedValue::Paint)
}

fn parse_keyword(raw: &RawValue, def: &PropertyDefinition) -> Result<ComputedValue, ParseError> {
    let text = raw.to_string();
    let token = text.trim();
    if token.is_empty() {
        return Err(ParseError::Empty);
    }
    def.keywords()
        .iter()
        .find(|keyword| keyword.eq_ignore_ascii_case(token))
        .copied()
        .map(ComputedValue::Keyword)
        .ok_or_else(|| ParseError::InvalidKeyword(token.into()))
}

fn parse_text(raw: &RawValue, _: &PropertyDefinition) -> Result<ComputedValue, ParseError> {
    Ok(ComputedValue::Text(match raw {
        RawValue::Text(text) => text.clone(),
        other => other.to_string(),
    }))
}

fn parse_points_value(raw: &RawValue, _: &PropertyDefinition) -> Result<ComputedValue, ParseError> {
    parse_points(raw).map(ComputedValue::Points)
}

fn parse_path_value(raw: &RawValue, _: &PropertyDefinition) -> Result<ComputedValue, ParseError> {
    parse_path(raw).map(ComputedValue::Path)
}

fn parse_transform_value(
    raw: &RawValue,
    _: &PropertyDefinition,
) -> Result<ComputedValue, ParseError> {
    parse_transform(raw).map(ComputedValue::Transform)
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum OriginToken {
    Left,
    Center,
    Right,
    Top,
    Bottom,
    Length(UnitValue),
}

impl OriginToken {
    fn parse(token: &str) -> Result<Self, ParseError> {
        const KEYWORDS: [(&str, OriginToken); 5] = [
            ("left", OriginToken::Left),
            ("center", OriginToken::Center),
            ("right", OriginToken::Right),
            ("top", OriginToken::Top),
            ("bottom", OriginToken::Bottom),
        ];
        if let Some((_, keyword)) = KEYWORDS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(token))
        {
            return Ok(*keyword);
        }
        let value = parse_dimension_token(token, Unit::Px)?;
        check_units(&[value], LENGTH_UNITS)?;
        Ok(Self::Length(value))
    }

    fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    fn position(self) -> UnitValue {
        match self {
            Self::Left | Self::Top => UnitValue::percent(0.0),
            Self::Center => UnitValue::percent(50.0),
            Self::Right | Self::Bottom => UnitValue::percent(100.0),
            Self::Length(value) => value,
        }
    }
}

fn parse_transform_origin(
    raw: &RawValue,
    _: &PropertyDefinition,
) -> Result<ComputedValue, ParseError> {
    let tokens: SmallVec<[OriginToken; 2]> = match raw {
        RawValue::Number(n) => smallvec![OriginToken::Length(UnitValue::new(*n, Unit::Px)?)],
        RawValue::Text(text) => text
            .split_ascii_whitespace()
            .map(OriginToken::parse)
            .collect::<Result<_, _>>()?,
        RawValue::List(items) => items
            .iter()
            .map(|item| match item {
                RawItem::Number(n) => UnitValue::new(*n, Unit::Px).map(OriginToken::Length),
                RawItem::Text(text) => OriginToken::parse(text.trim()),
            })
            .collect::<Result<_, _>>()?,
    };
    let (x, y) = match tokens.as_slice() {
        [] => return Err(ParseError::Empty),
        [only] if only.is_vertical() => (OriginToken::Center, *only),
        [only] => (*only, OriginToken::Center),
        [a, b] if a.is_vertical() || b.is_horizontal() => (*b, *a),
        [a, b] => (*a, *b),
        _ => {
            return Err(ParseError::Arity {
                expected: "1 or 2",
                found: tokens.len(),
            });
        }
    };
    if x.is_vertical() || y.is_horizontal() {
        return Err(ParseError::InvalidKeyword(raw.to_string()));
    }
    Ok(ComputedValue::List(smallvec![x.position(), y.position()]))
}

fn mix_z_index(
    from: &ComputedValue,
    to: &ComputedValue,
    ratio: f64,
) -> Result<ComputedValue, MixError> {
    let mixed = mix_unit(from, to, ratio)?;
    // Endpoints are returned as parsed, fractional or not.
    if ratio == 0.0 {
        return Ok(from.clone());
    }
    if ratio == 1.0 {
        return Ok(to.clone());
    }
    match mixed {
        ComputedValue::Unit(value) => {
            Ok(ComputedValue::Unit(value.with_magnitude(value.magnitude().round())?))
        }
        _ => Err(kind_mismatch(from, to)),
    }
}

/// Resolves a percentage against `basis`; other units pass through.
///
/// A non-finite reference box resolves percentages to `0px`.
#[must_use]
pub fn resolve_length(value: UnitValue, basis: PercentBasis, cx: &CalcContext) -> UnitValue {
    if value.unit() != Unit::Percent {
        return value;
    }
    UnitValue::new(value.magnitude() / 100.0 * basis.reference(cx), Unit::Px)
        .unwrap_or(UnitValue::ZERO_PX)
}

fn calc_opacity(value: &ComputedValue, _: &PropertyDefinition, _: &CalcContext) -> UsedValue {
    match value {
        ComputedValue::Unit(v) => {
            let fraction = match v.unit() {
                Unit::Percent => v.magnitude() / 100.0,
                _ => v.magnitude(),
            };
            ComputedValue::Unit(UnitValue::number(fraction.clamp(0.0, 1.0)))
        }
        other => other.clone(),
    }
}

fn calc_shadow_blur(value: &ComputedValue, _: &PropertyDefinition, _: &CalcContext) -> UsedValue {
    match value {
        ComputedValue::Unit(v) => ComputedValue::Unit(UnitValue::px(v.magnitude().max(0.0))),
        other => other.clone(),
    }
}

fn calc_angle(value: &ComputedValue, _: &PropertyDefinition, _: &CalcContext) -> UsedValue {
    match value {
        ComputedValue::Unit(v) => ComputedValue::Unit(v.convert(Unit::Deg).unwrap_or(*v)),
        other => other.clone(),
    }
}

fn calc_length(value: &ComputedValue, def: &PropertyDefinition, cx: &CalcContext) -> UsedValue {
    match value {
        ComputedValue::Unit(v) => ComputedValue::Unit(resolve_length(*v, def.basis(), cx)),
        other => other.clone(),
    }
}

fn calc_lengths(value: &ComputedValue, def: &PropertyDefinition, cx: &CalcContext) -> UsedValue {
    match value {
        ComputedValue::List(values) => ComputedValue::List(
            values
                .iter()
                .map(|v| resolve_length(*v, def.basis(), cx))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn calc_transform(value: &ComputedValue, _: &PropertyDefinition, cx: &CalcContext) -> UsedValue {
    match value {
        ComputedValue::Transform(functions) => ComputedValue::Matrix(compose(functions, cx)),
        other => other.clone(),
    }
}

fn calc_transform_origin(
    value: &ComputedValue,
    _: &PropertyDefinition,
    cx: &CalcContext,
) -> UsedValue {
    match value.as_list() {
        Some([x, y]) => ComputedValue::List(smallvec![
            resolve_length(*x, PercentBasis::Width, cx),
            resolve_length(*y, PercentBasis::Height, cx),
        ]),
        _ => value.clone(),
    }
}
