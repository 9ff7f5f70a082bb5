// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolver configuration.

/// Options for a [`Resolver`](crate::Resolver).
///
/// The default is permissive: names the registry does not know are stored
/// verbatim so hosts can attach custom attributes.
///
/// ```rust
/// use canopy_style::ResolverConfig;
///
/// let config = ResolverConfig::default().strict(true);
/// assert!(config.is_strict());
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    strict: bool,
}

impl ResolverConfig {
    /// Rejects unregistered names with [`StyleError::NotFound`](crate::StyleError::NotFound)
    /// instead of storing them verbatim.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Returns `true` if unregistered names are rejected.
    #[must_use]
    #[inline]
    pub fn is_strict(&self) -> bool {
        self.strict
    }
}
