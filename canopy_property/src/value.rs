// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Computed and used style values.
//!
//! A [`ComputedValue`] is what a property's parser produces from raw input.
//! Its [`ValueShape`] is fixed per property: whatever node the value lives
//! on, `radius` is always four dimensions and `fill` is always a paint.
//! A [`UsedValue`] is the same enum after a calculator resolved relative
//! units against a [`CalcContext`](crate::CalcContext).

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use canopy_unit::{DimensionList, RawValue, UnitValue};
use kurbo::{Affine, BezPath, Point};
use peniko::Color;

use crate::transform::TransformFn;

/// A fill or stroke paint.
#[derive(Copy, Clone, Debug)]
pub enum Paint {
    /// Nothing is painted.
    None,
    /// A solid color.
    Color(Color),
}

impl PartialEq for Paint {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Color(a), Self::Color(b)) => a.components == b.components,
            _ => false,
        }
    }
}

/// A parsed style value.
///
/// The variant is determined by the property's
/// [`PropertySyntax`](crate::PropertySyntax); [`Raw`](Self::Raw) only holds
/// values of unregistered properties, which are passed through untouched.
#[derive(Clone, Debug)]
pub enum ComputedValue {
    /// A single dimension: a length, percentage, plain number or angle.
    Unit(UnitValue),
    /// A fixed number of dimensions, such as the four corners of a radius.
    List(DimensionList),
    /// A color.
    Color(Color),
    /// A fill or stroke paint.
    Paint(Paint),
    /// A keyword from the property's keyword set.
    Keyword(&'static str),
    /// Free text.
    Text(String),
    /// A polygon or polyline point list.
    Points(Vec<Point>),
    /// Path geometry.
    Path(BezPath),
    /// A transform function list, in application order.
    Transform(Vec<TransformFn>),
    /// A composed transform; the used value of a transform list.
    Matrix(Affine),
    /// Raw input of a property the registry does not know.
    Raw(RawValue),
}

/// The variant of a [`ComputedValue`], with the arity of lists.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueShape {
    /// [`ComputedValue::Unit`].
    Dimension,
    /// [`ComputedValue::List`] with the given number of items.
    Dimensions(usize),
    /// [`ComputedValue::Color`].
    Color,
    /// [`ComputedValue::Paint`].
    Paint,
    /// [`ComputedValue::Keyword`].
    Keyword,
    /// [`ComputedValue::Text`].
    Text,
    /// [`ComputedValue::Points`].
    Points,
    /// [`ComputedValue::Path`].
    Path,
    /// [`ComputedValue::Transform`].
    Transform,
    /// [`ComputedValue::Matrix`].
    Matrix,
    /// [`ComputedValue::Raw`].
    Raw,
}

impl ValueShape {
    /// Returns a short name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dimension => "dimension",
            Self::Dimensions(2) => "dimension pair",
            Self::Dimensions(4) => "four-dimension",
            Self::Dimensions(_) => "dimension list",
            Self::Color => "color",
            Self::Paint => "paint",
            Self::Keyword => "keyword",
            Self::Text => "text",
            Self::Points => "point list",
            Self::Path => "path",
            Self::Transform => "transform list",
            Self::Matrix => "matrix",
            Self::Raw => "raw",
        }
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A computed value whose relative units have been resolved for rendering.
pub type UsedValue = ComputedValue;

impl ComputedValue {
    /// Classifies this value.
    #[must_use]
    pub fn shape(&self) -> ValueShape {
        match self {
            Self::Unit(_) => ValueShape::Dimension,
            Self::List(list) => ValueShape::Dimensions(list.len()),
            Self::Color(_) => ValueShape::Color,
            Self::Paint(_) => ValueShape::Paint,
            Self::Keyword(_) => ValueShape::Keyword,
            Self::Text(_) => ValueShape::Text,
            Self::Points(_) => ValueShape::Points,
            Self::Path(_) => ValueShape::Path,
            Self::Transform(_) => ValueShape::Transform,
            Self::Matrix(_) => ValueShape::Matrix,
            Self::Raw(_) => ValueShape::Raw,
        }
    }

    /// Returns the single dimension, if this is one.
    #[must_use]
    pub fn as_unit(&self) -> Option<UnitValue> {
        match self {
            Self::Unit(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the magnitude of a single dimension.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_unit().map(UnitValue::magnitude)
    }

    /// Returns the dimension list, if this is one.
    #[must_use]
    pub fn as_list(&self) -> Option<&[UnitValue]> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the color of a color value or a color paint.
    #[must_use]
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(color) | Self::Paint(Paint::Color(color)) => Some(*color),
            _ => None,
        }
    }

    /// Returns the keyword, if this is one.
    #[must_use]
    pub fn as_keyword(&self) -> Option<&'static str> {
        match self {
            Self::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }

    /// Returns the text of a text value or a raw string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) | Self::Raw(RawValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Returns the point list, if this is one.
    #[must_use]
    pub fn as_points(&self) -> Option<&[Point]> {
        match self {
            Self::Points(points) => Some(points),
            _ => None,
        }
    }

    /// Returns the path, if this is one.
    #[must_use]
    pub fn as_path(&self) -> Option<&BezPath> {
        match self {
            Self::Path(path) => Some(path),
            _ => None,
        }
    }

    /// Returns the composed matrix, if this is one.
    #[must_use]
    pub fn as_matrix(&self) -> Option<Affine> {
        match self {
            Self::Matrix(matrix) => Some(*matrix),
            _ => None,
        }
    }

    /// Returns the pass-through input, if this is one.
    #[must_use]
    pub fn as_raw(&self) -> Option<&RawValue> {
        match self {
            Self::Raw(raw) => Some(raw),
            _ => None,
        }
    }
}

impl PartialEq for ComputedValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unit(a), Self::Unit(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Color(a), Self::Color(b)) => a.components == b.components,
            (Self::Paint(a), Self::Paint(b)) => a == b,
            (Self::Keyword(a), Self::Keyword(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Points(a), Self::Points(b)) => a == b,
            (Self::Path(a), Self::Path(b)) => a.elements() == b.elements(),
            (Self::Transform(a), Self::Transform(b)) => a == b,
            (Self::Matrix(a), Self::Matrix(b)) => a == b,
            (Self::Raw(a), Self::Raw(b)) => a == b,
            _ => false,
        }
    }
}

impl From<UnitValue> for ComputedValue {
    fn from(value: UnitValue) -> Self {
        Self::Unit(value)
    }
}

impl From<Color> for ComputedValue {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

impl From<Paint> for ComputedValue {
    fn from(paint: Paint) -> Self {
        Self::Paint(paint)
    }
}
