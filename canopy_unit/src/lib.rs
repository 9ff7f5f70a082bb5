// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Unit: typed style dimensions and the dimension parser.
//!
//! This crate is the leaf of the canopy style pipeline. It knows nothing about
//! individual style properties; it only turns loosely typed input into
//! `(magnitude, unit)` pairs and combines such pairs.
//!
//! ## Core Concepts
//!
//! - [`Unit`]: the closed set of units (`number`, `%`, `px`, `deg`, `rad`,
//!   `turn`, `grad`, `none`).
//! - [`UnitValue`]: an immutable, always-finite magnitude with a unit, with
//!   same-unit arithmetic and interpolation via [`UnitValue::mix`].
//! - [`RawValue`]: the tagged boundary input, `Number | Text | List`.
//! - The dimension parser: [`parse_single_dimension`],
//!   [`parse_dimension_array`], and the CSS margin-style
//!   [`expand_box_shorthand`].
//!
//! ## Quick Start
//!
//! ```rust
//! use canopy_unit::{
//!     RawValue, Unit, UnitValue, parse_box_shorthand, parse_dimension_array,
//! };
//!
//! // Numbers take the default unit chosen by the caller.
//! let values = parse_dimension_array(&RawValue::from(10), Unit::Px).unwrap();
//! assert_eq!(values[0], UnitValue::px(10.0));
//!
//! // Strings carry their own units.
//! let values = parse_dimension_array(&RawValue::from("10 50%"), Unit::Px).unwrap();
//! assert_eq!(values[1], UnitValue::percent(50.0));
//!
//! // Four-part shorthands expand like CSS margins.
//! let corners = parse_box_shorthand(&RawValue::from("10 20 30"), Unit::Px).unwrap();
//! assert_eq!(corners[3], UnitValue::px(20.0));
//! ```
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for [`RawValue`] and
//!   [`RawItem`] in untagged form, so style input can be read from JSON.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod error;
mod parse;
mod raw;
mod unit;
mod value;

pub use error::{MixError, ParseError};
pub use parse::{
    DimensionList, check_units, expand_box_shorthand, expand_pair_shorthand,
    parse_box_shorthand, parse_dimension_array, parse_dimension_token, parse_pair_shorthand,
    parse_single_dimension, parse_single_dimension_px,
};
pub use raw::{RawItem, RawValue};
pub use unit::Unit;
pub use value::UnitValue;

/// Interpolates two plain magnitudes, exact at `t == 0.0` and `t == 1.0`.
///
/// This is the scalar rule every canopy mixer builds on.
///
/// ```
/// assert_eq!(canopy_unit::lerp(2.0, 4.0, 0.5), 3.0);
/// ```
#[must_use]
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    value::lerp(a, b, t)
}
