// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while parsing or combining dimensions.

use alloc::string::String;

use crate::unit::Unit;

/// Raw style input could not be turned into a typed value.
///
/// Parse errors are always recoverable: the caller keeps whatever value it
/// had before the rejected input.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The input held no tokens at all.
    #[error("empty value")]
    Empty,
    /// A token did not start with a valid number.
    #[error("invalid number in `{token}`")]
    InvalidNumber {
        /// The offending token.
        token: String,
    },
    /// A token's suffix is not one of the supported units.
    #[error("unknown unit `{suffix}` in `{token}`")]
    UnknownUnit {
        /// The offending token.
        token: String,
        /// The unrecognized suffix.
        suffix: String,
    },
    /// A token's magnitude overflowed to infinity (or was otherwise not finite).
    #[error("value `{token}` is not finite")]
    NonFinite {
        /// The offending token.
        token: String,
    },
    /// The unit is valid but not accepted by the property's syntax.
    #[error("unit `{unit}` is not allowed here")]
    UnexpectedUnit {
        /// The rejected unit.
        unit: Unit,
    },
    /// The input had a number of components the syntax cannot accept.
    #[error("expected {expected} values, found {found}")]
    Arity {
        /// Human-readable description of the accepted counts (e.g. `"1 to 4"`).
        expected: &'static str,
        /// The number of components found.
        found: usize,
    },
    /// A keyword is not in the property's keyword set.
    #[error("invalid keyword `{0}`")]
    InvalidKeyword(String),
    /// A structured value (color, path, transform, ...) failed to parse.
    #[error("invalid {what}: {reason}")]
    Invalid {
        /// What kind of value was being parsed.
        what: &'static str,
        /// Why it was rejected.
        reason: String,
    },
    /// A parser produced a value whose shape the syntax does not accept.
    #[error("parser produced a {found} value, expected {expected}")]
    ShapeMismatch {
        /// The shape the syntax expects.
        expected: &'static str,
        /// The shape the parser produced.
        found: &'static str,
    },
}

impl ParseError {
    /// Shorthand for [`ParseError::Invalid`].
    pub fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            what,
            reason: reason.into(),
        }
    }
}

/// Two values could not be interpolated.
///
/// Mixing errors are recoverable by the animation driver, which should skip
/// the interpolation for the affected property rather than abort the frame.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum MixError {
    /// The operands carry different units; no conversion is attempted.
    #[error("cannot mix `{from}` with `{to}`")]
    IncompatibleUnits {
        /// Unit of the start value.
        from: Unit,
        /// Unit of the end value.
        to: Unit,
    },
    /// Element-wise mixing requires equal arity.
    #[error("cannot mix {from} components with {to} components")]
    ArityMismatch {
        /// Arity of the start value.
        from: usize,
        /// Arity of the end value.
        to: usize,
    },
    /// The operands are different kinds of value altogether.
    #[error("cannot mix a {from} value with a {to} value")]
    KindMismatch {
        /// Kind of the start value.
        from: &'static str,
        /// Kind of the end value.
        to: &'static str,
    },
    /// The interpolated magnitude is not finite.
    #[error("interpolated value is not finite")]
    NonFinite,
}
