// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Property: style property definitions and the property registry.
//!
//! This crate describes *what* each style property is: its value grammar,
//! initial value, inheritance, the dirty flags it raises, and how its values
//! are parsed, interpolated and turned into used values. Storing values on
//! nodes and resolving them is the job of `canopy_style`.
//!
//! ## Core Concepts
//!
//! ### Definitions and syntaxes
//!
//! A [`PropertyDefinition`] names one [`PropertySyntax`]. The syntax fixes the
//! [`ValueShape`] of every computed value and supplies canonical behavior:
//!
//! - **parse**: [`RawValue`](canopy_unit::RawValue) → [`ComputedValue`]
//! - **mix**: two computed values and a ratio → a computed value
//! - **calculate**: computed value + [`CalcContext`] → [`UsedValue`]
//!
//! Definitions may replace any of the three with their own hook; parser hooks
//! are still held to the syntax's shape.
//!
//! ### Registry
//!
//! [`PropertyRegistry`] owns the definitions and maps names, aliases and
//! shorthands to them. It is built once and then shared by reference.
//!
//! ## Quick Start
//!
//! ```rust
//! use canopy_property::{CalcContext, ComputedValue, PropertyRegistry};
//! use canopy_unit::{RawValue, UnitValue};
//! use kurbo::Size;
//!
//! let registry = PropertyRegistry::with_builtins();
//! let width = registry.lookup("width").unwrap();
//!
//! // Parse: bare numbers are px for lengths.
//! let computed = width.parse(&RawValue::from("50%")).unwrap();
//! assert_eq!(computed, ComputedValue::Unit(UnitValue::percent(50.0)));
//!
//! // Calculate: percentages resolve against the reference box.
//! let cx = CalcContext::new(Size::new(200.0, 100.0));
//! assert_eq!(width.calculate(&computed, &cx).as_f64(), Some(100.0));
//!
//! // Mix: lengths interpolate linearly.
//! let from = width.parse(&RawValue::from(0)).unwrap();
//! let to = width.parse(&RawValue::from(10)).unwrap();
//! assert_eq!(
//!     width.mix(&from, &to, 0.5),
//!     Ok(ComputedValue::Unit(UnitValue::px(5.0)))
//! );
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables SVG path data parsing for the `path` syntax.
//! - `libm`: float math for `no_std` targets.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. Without `std`, path data is
//! rejected at parse time; every other syntax works unchanged.

#![no_std]

extern crate alloc;

pub mod builtin;
mod color;
mod context;
mod definition;
mod dirty;
mod error;
mod geometry;
mod id;
pub mod mix;
mod registry;
mod syntax;
mod transform;
mod value;

pub use color::blend;
pub use context::{CalcContext, DEFAULT_FONT_SIZE, PercentBasis};
pub use definition::{
    CalcHook, MixHook, ParseHook, PropertyDefinition, PropertyDefinitionBuilder,
};
pub use dirty::DirtyFlags;
pub use error::RegistryError;
pub use id::PropertyId;
pub use registry::{Lookup, PropertyRegistry, Shorthand};
pub use syntax::{PropertySyntax, resolve_length};
pub use transform::TransformFn;
pub use value::{ComputedValue, Paint, UsedValue, ValueShape};
