// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry errors.

use alloc::string::String;

/// A registry operation was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The name is already taken by a property, alias or shorthand.
    #[error("property `{0}` is already registered")]
    Duplicate(&'static str),
    /// No property, alias or shorthand has this name.
    #[error("property `{0}` is not registered")]
    NotFound(String),
    /// A definition's initial value does not have its syntax's shape.
    #[error("initial value of `{name}` is a {found} value, expected {expected}")]
    InitialShape {
        /// The property name.
        name: &'static str,
        /// The shape the syntax requires.
        expected: &'static str,
        /// The shape of the supplied initial value.
        found: &'static str,
    },
    /// Shorthands spread onto two longhands (pair rule) or four (box rule).
    #[error("shorthand `{name}` must expand to 2 or 4 properties, not {count}")]
    ShorthandArity {
        /// The shorthand name.
        name: &'static str,
        /// The number of longhands supplied.
        count: usize,
    },
}
