// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout context relative values are resolved against.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sqrt`
use kurbo::Size;

/// Font size assumed when the host does not supply one.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Inputs a calculator needs to turn a computed value into a used value.
///
/// Used-value caches remember the context they were computed against and
/// are reused only while the context compares equal.
///
/// ```rust
/// use canopy_property::{CalcContext, PercentBasis};
/// use kurbo::Size;
///
/// let cx = CalcContext::new(Size::new(200.0, 100.0));
/// assert_eq!(PercentBasis::Width.reference(&cx), 200.0);
/// assert_eq!(PercentBasis::Min.reference(&cx), 100.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CalcContext {
    /// The reference box for percentages, usually the parent's content box.
    pub reference: Size,
    /// The font size `em`-like percentages resolve against.
    pub font_size: f64,
}

impl CalcContext {
    /// Creates a context for the given reference box and the default font size.
    #[must_use]
    pub const fn new(reference: Size) -> Self {
        Self {
            reference,
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    /// Returns a copy with a different font size.
    #[must_use]
    pub const fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }
}

impl Default for CalcContext {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

/// Which length a property's percentages refer to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PercentBasis {
    /// The reference box width (horizontal positions and sizes).
    #[default]
    Width,
    /// The reference box height (vertical positions and sizes).
    Height,
    /// The normalized diagonal `sqrt((w² + h²) / 2)`, for lengths with no
    /// direction such as a circle radius or a stroke width.
    Diagonal,
    /// The smaller box dimension.
    Min,
    /// The context font size.
    FontSize,
}

impl PercentBasis {
    /// Returns the length that `100%` stands for in `cx`.
    #[must_use]
    pub fn reference(self, cx: &CalcContext) -> f64 {
        let Size { width, height } = cx.reference;
        match self {
            Self::Width => width,
            Self::Height => height,
            Self::Diagonal => ((width * width + height * height) / 2.0).sqrt(),
            Self::Min => width.min(height),
            Self::FontSize => cx.font_size,
        }
    }
}
