// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property definitions.
//!
//! This module provides [`PropertyDefinition`], the immutable description of
//! one style property, and [`PropertyDefinitionBuilder`] for ergonomic
//! construction.

use alloc::boxed::Box;

use canopy_unit::{MixError, ParseError, RawValue};

use crate::context::{CalcContext, PercentBasis};
use crate::dirty::DirtyFlags;
use crate::mix::step;
use crate::syntax::PropertySyntax;
use crate::value::{ComputedValue, UsedValue};

/// Replaces the syntax's parser for one property.
///
/// The output must still have the syntax's [`ValueShape`](crate::ValueShape);
/// anything else is rejected with [`ParseError::ShapeMismatch`].
pub type ParseHook = Box<dyn Fn(&RawValue) -> Result<ComputedValue, ParseError> + Send + Sync>;

/// Replaces the syntax's mixer for one property.
pub type MixHook = Box<
    dyn Fn(&ComputedValue, &ComputedValue, f64) -> Result<ComputedValue, MixError> + Send + Sync,
>;

/// Replaces the syntax's calculator for one property.
pub type CalcHook = Box<dyn Fn(&ComputedValue, &CalcContext) -> UsedValue + Send + Sync>;

/// The description of one style property.
///
/// Definitions are built once at startup, registered in a
/// [`PropertyRegistry`](crate::PropertyRegistry) and never mutated. Parsing,
/// mixing and calculation go through the syntax's canonical implementation
/// unless the definition carries its own hook.
///
/// # Example
///
/// ```rust
/// use canopy_property::{ComputedValue, DirtyFlags, PropertyDefinitionBuilder, PropertySyntax};
/// use canopy_unit::UnitValue;
///
/// let width = PropertyDefinitionBuilder::new("width", PropertySyntax::LengthPercentage)
///     .affects(DirtyFlags::BOUNDS)
///     .build();
///
/// assert_eq!(width.initial(), &ComputedValue::Unit(UnitValue::ZERO_PX));
/// assert_eq!(
///     width.parse(&"10".into()),
///     Ok(ComputedValue::Unit(UnitValue::px(10.0)))
/// );
/// assert!(width.affects().contains(DirtyFlags::BOUNDS));
/// ```
pub struct PropertyDefinition {
    name: &'static str,
    syntax: PropertySyntax,
    initial: ComputedValue,
    inherits: bool,
    affects: DirtyFlags,
    basis: PercentBasis,
    keywords: &'static [&'static str],
    parser: Option<ParseHook>,
    mixer: Option<MixHook>,
    calculator: Option<CalcHook>,
}

impl PropertyDefinition {
    /// Returns the property name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the property's syntax.
    #[must_use]
    #[inline]
    pub fn syntax(&self) -> PropertySyntax {
        self.syntax
    }

    /// Returns the value used when nothing is set.
    #[must_use]
    #[inline]
    pub fn initial(&self) -> &ComputedValue {
        &self.initial
    }

    /// Returns whether this property inherits from ancestors.
    #[must_use]
    #[inline]
    pub fn inherits(&self) -> bool {
        self.inherits
    }

    /// Returns the dirty flags raised on top of
    /// [`DirtyFlags::STYLE_CHANGED`] when this property changes.
    #[must_use]
    #[inline]
    pub fn affects(&self) -> DirtyFlags {
        self.affects
    }

    /// Returns what percentages of this property refer to.
    #[must_use]
    #[inline]
    pub fn basis(&self) -> PercentBasis {
        self.basis
    }

    /// Returns the accepted keywords, for keyword properties.
    #[must_use]
    #[inline]
    pub fn keywords(&self) -> &'static [&'static str] {
        self.keywords
    }

    /// Returns whether values of this property interpolate rather than step.
    #[must_use]
    pub fn has_mixer(&self) -> bool {
        self.mixer.is_some() || self.syntax.has_mixer()
    }

    /// Returns whether used values go through a calculator.
    #[must_use]
    pub fn has_calculator(&self) -> bool {
        self.calculator.is_some() || self.syntax.has_calculator()
    }

    /// Parses raw input into a computed value.
    ///
    /// Pure: the same input always yields the same result.
    pub fn parse(&self, raw: &RawValue) -> Result<ComputedValue, ParseError> {
        let value = match &self.parser {
            Some(parser) => parser(raw)?,
            None => (self.syntax.handler().parse)(raw, self)?,
        };
        self.check_shape(&value)?;
        Ok(value)
    }

    /// Checks that `value` has this property's shape.
    pub fn check_shape(&self, value: &ComputedValue) -> Result<(), ParseError> {
        let expected = self.syntax.shape();
        let found = value.shape();
        if expected == found {
            Ok(())
        } else {
            Err(ParseError::ShapeMismatch {
                expected: expected.name(),
                found: found.name(),
            })
        }
    }

    /// Interpolates between two computed values of this property.
    ///
    /// Without a mixer the result steps from `from` to `to` at `ratio >= 1`.
    /// `ratio` is not clamped.
    pub fn mix(
        &self,
        from: &ComputedValue,
        to: &ComputedValue,
        ratio: f64,
    ) -> Result<ComputedValue, MixError> {
        if let Some(mixer) = &self.mixer {
            return mixer(from, to, ratio);
        }
        match self.syntax.handler().mix {
            Some(mix) => mix(from, to, ratio),
            None => Ok(step(from, to, ratio)),
        }
    }

    /// Resolves a computed value against a layout context.
    ///
    /// Without a calculator the computed value is the used value.
    #[must_use]
    pub fn calculate(&self, value: &ComputedValue, cx: &CalcContext) -> UsedValue {
        if let Some(calculator) = &self.calculator {
            return calculator(value, cx);
        }
        match self.syntax.handler().calculate {
            Some(calculate) => calculate(value, self, cx),
            None => value.clone(),
        }
    }
}

// Manual Debug impl since hooks aren't Debug
impl core::fmt::Debug for PropertyDefinition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PropertyDefinition")
            .field("name", &self.name)
            .field("syntax", &self.syntax)
            .field("initial", &self.initial)
            .field("inherits", &self.inherits)
            .field("affects", &self.affects)
            .field("basis", &self.basis)
            .field("keywords", &self.keywords)
            .field("has_parser", &self.parser.is_some())
            .field("has_mixer", &self.mixer.is_some())
            .field("has_calculator", &self.calculator.is_some())
            .finish()
    }
}

/// Builder for [`PropertyDefinition`].
///
/// # Example
///
/// ```rust
/// use canopy_property::{ComputedValue, PropertyDefinitionBuilder, PropertySyntax};
///
/// let visibility = PropertyDefinitionBuilder::new("visibility", PropertySyntax::Keyword)
///     .keywords(&["visible", "hidden"])
///     .inherits(true)
///     .build();
///
/// // Keyword properties start at their first keyword.
/// assert_eq!(visibility.initial(), &ComputedValue::Keyword("visible"));
/// ```
pub struct PropertyDefinitionBuilder {
    name: &'static str,
    syntax: PropertySyntax,
    initial: Option<ComputedValue>,
    inherits: bool,
    affects: DirtyFlags,
    basis: PercentBasis,
    keywords: &'static [&'static str],
    parser: Option<ParseHook>,
    mixer: Option<MixHook>,
    calculator: Option<CalcHook>,
}

// Manual Debug impl since hooks aren't Debug
impl core::fmt::Debug for PropertyDefinitionBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PropertyDefinitionBuilder")
            .field("name", &self.name)
            .field("syntax", &self.syntax)
            .field("initial", &self.initial)
            .field("inherits", &self.inherits)
            .field("affects", &self.affects)
            .field("basis", &self.basis)
            .field("keywords", &self.keywords)
            .field("has_parser", &self.parser.is_some())
            .field("has_mixer", &self.mixer.is_some())
            .field("has_calculator", &self.calculator.is_some())
            .finish()
    }
}

impl PropertyDefinitionBuilder {
    /// Creates a new builder for a property with the given name and syntax.
    ///
    /// Defaults:
    /// - `initial`: the syntax's zero value (first keyword for keywords, `1`
    ///   for opacity, `none` for paints and transforms)
    /// - `inherits`: `false`
    /// - `affects`: empty
    /// - `basis`: [`PercentBasis::Width`]
    #[must_use]
    pub fn new(name: &'static str, syntax: PropertySyntax) -> Self {
        Self {
            name,
            syntax,
            initial: None,
            inherits: false,
            affects: DirtyFlags::empty(),
            basis: PercentBasis::default(),
            keywords: &[],
            parser: None,
            mixer: None,
            calculator: None,
        }
    }

    /// Sets the value used when nothing is set.
    #[must_use]
    pub fn initial(mut self, initial: ComputedValue) -> Self {
        self.initial = Some(initial);
        self
    }

    /// Sets whether this property inherits from ancestors.
    ///
    /// When `true`, inherited lookups walk up the parent chain to find a
    /// value if none is set on the node.
    #[must_use]
    pub fn inherits(mut self, inherits: bool) -> Self {
        self.inherits = inherits;
        self
    }

    /// Sets extra dirty flags raised when this property changes.
    #[must_use]
    pub fn affects(mut self, flags: DirtyFlags) -> Self {
        self.affects = flags;
        self
    }

    /// Sets what percentages of this property refer to.
    #[must_use]
    pub fn basis(mut self, basis: PercentBasis) -> Self {
        self.basis = basis;
        self
    }

    /// Sets the accepted keywords. Matching ignores ASCII case.
    #[must_use]
    pub fn keywords(mut self, keywords: &'static [&'static str]) -> Self {
        self.keywords = keywords;
        self
    }

    /// Replaces the syntax's parser.
    #[must_use]
    pub fn parser<F>(mut self, parser: F) -> Self
    where
        F: Fn(&RawValue) -> Result<ComputedValue, ParseError> + Send + Sync + 'static,
    {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Replaces the syntax's mixer.
    #[must_use]
    pub fn mixer<F>(mut self, mixer: F) -> Self
    where
        F: Fn(&ComputedValue, &ComputedValue, f64) -> Result<ComputedValue, MixError>
            + Send
            + Sync
            + 'static,
    {
        self.mixer = Some(Box::new(mixer));
        self
    }

    /// Replaces the syntax's calculator.
    #[must_use]
    pub fn calculator<F>(mut self, calculator: F) -> Self
    where
        F: Fn(&ComputedValue, &CalcContext) -> UsedValue + Send + Sync + 'static,
    {
        self.calculator = Some(Box::new(calculator));
        self
    }

    /// Builds the [`PropertyDefinition`].
    #[must_use]
    pub fn build(self) -> PropertyDefinition {
        let initial = self
            .initial
            .unwrap_or_else(|| self.syntax.fallback_initial(self.keywords));
        PropertyDefinition {
            name: self.name,
            syntax: self.syntax,
            initial,
            inherits: self.inherits,
            affects: self.affects,
            basis: self.basis,
            keywords: self.keywords,
            parser: self.parser,
            mixer: self.mixer,
            calculator: self.calculator,
        }
    }
}
