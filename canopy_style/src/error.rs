// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolver errors.

use alloc::string::String;

use canopy_unit::{MixError, ParseError};

/// A style operation on one node and property failed.
///
/// Failures never leave a node partially updated: the property keeps the
/// value it had before the call.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StyleError {
    /// The raw value could not be parsed for this property.
    #[error("invalid value for `{name}`")]
    Parse {
        /// The property name as given by the caller.
        name: String,
        /// What was wrong with the value.
        #[source]
        source: ParseError,
    },
    /// The name is not registered, or has never been set on the node.
    #[error("property `{0}` is not registered")]
    NotFound(String),
    /// Two values of this property could not be interpolated.
    #[error("cannot interpolate `{name}`")]
    Mix {
        /// The property name.
        name: String,
        /// Why the values do not mix.
        #[source]
        source: MixError,
    },
}

impl StyleError {
    /// Returns the property name the error is about.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Parse { name, .. } | Self::Mix { name, .. } | Self::NotFound(name) => name,
        }
    }
}
