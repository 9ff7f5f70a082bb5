// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Colors and paints.
//!
//! Any CSS color string the `color` crate understands is accepted
//! (`#f00`, `rgb(255 0 0 / 50%)`, `hsl(...)`, `oklch(...)`, named colors,
//! `transparent`). Colors are stored in sRGB; blending happens on
//! premultiplied channels so a fade towards `transparent` does not darken.

use alloc::string::ToString;

use canopy_unit::{MixError, ParseError, RawValue, lerp};
use peniko::Color;
use peniko::color::{Srgb, parse_color as parse_css_color};

use crate::mix::{kind_mismatch, step};
use crate::value::{ComputedValue, Paint};

/// Parses a CSS color string into an sRGB color.
pub(crate) fn parse_color(raw: &RawValue) -> Result<Color, ParseError> {
    let RawValue::Text(text) = raw else {
        return Err(ParseError::invalid("color", "expected a color string"));
    };
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }
    parse_css_color(text)
        .map(|color| color.to_alpha_color::<Srgb>())
        .map_err(|err| ParseError::invalid("color", err.to_string()))
}

/// Parses `none` or a color.
pub(crate) fn parse_paint(raw: &RawValue) -> Result<Paint, ParseError> {
    if raw.is_keyword("none") {
        Ok(Paint::None)
    } else {
        parse_color(raw).map(Paint::Color)
    }
}

/// Blends two colors on premultiplied channels.
///
/// Exact at both endpoints; the result is clamped to the displayable range
/// when the ratio overshoots.
#[must_use]
pub fn blend(from: Color, to: Color, ratio: f64) -> Color {
    if ratio == 0.0 {
        return from;
    }
    if ratio == 1.0 {
        return to;
    }
    let [fr, fg, fb, fa] = from.components.map(f64::from);
    let [tr, tg, tb, ta] = to.components.map(f64::from);
    let alpha = lerp(fa, ta, ratio).clamp(0.0, 1.0);
    let channel = |f: f64, t: f64| {
        if alpha == 0.0 {
            0.0
        } else {
            (lerp(f * fa, t * ta, ratio) / alpha).clamp(0.0, 1.0)
        }
    };
    #[expect(
        clippy::cast_possible_truncation,
        reason = "components are clamped to [0, 1] and stored as f32"
    )]
    let components =
        [channel(fr, tr), channel(fg, tg), channel(fb, tb), alpha].map(|c| c as f32);
    Color::new(components)
}

pub(crate) fn mix_color(
    from: &ComputedValue,
    to: &ComputedValue,
    ratio: f64,
) -> Result<ComputedValue, MixError> {
    match (from, to) {
        (ComputedValue::Color(a), ComputedValue::Color(b)) => {
            Ok(ComputedValue::Color(blend(*a, *b, ratio)))
        }
        _ => Err(kind_mismatch(from, to)),
    }
}

/// Blends two color paints; anything involving `none` steps.
pub(crate) fn mix_paint(
    from: &ComputedValue,
    to: &ComputedValue,
    ratio: f64,
) -> Result<ComputedValue, MixError> {
    match (from, to) {
        (ComputedValue::Paint(Paint::Color(a)), ComputedValue::Paint(Paint::Color(b))) => {
            Ok(ComputedValue::Paint(Paint::Color(blend(*a, *b, ratio))))
        }
        (ComputedValue::Paint(_), ComputedValue::Paint(_)) => Ok(step(from, to, ratio)),
        _ => Err(kind_mismatch(from, to)),
    }
}
