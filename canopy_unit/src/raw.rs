// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loosely typed style input as it arrives at the boundary.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

/// A raw style assignment, before any property-specific parsing.
///
/// Applications hand style values to the engine as numbers, strings, or
/// arrays; this enum is the tagged form of that union.
///
/// # Example
///
/// ```
/// use canopy_unit::{RawItem, RawValue};
///
/// assert_eq!(RawValue::from(10), RawValue::Number(10.0));
/// assert_eq!(RawValue::from("10 20"), RawValue::Text("10 20".into()));
/// assert_eq!(
///     RawValue::from([1.0, 2.0]),
///     RawValue::List(vec![RawItem::Number(1.0), RawItem::Number(2.0)]),
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RawValue {
    /// A bare number.
    Number(f64),
    /// A string, possibly holding several whitespace-separated tokens.
    Text(String),
    /// An array of numbers and/or strings.
    List(Vec<RawItem>),
}

/// One element of a [`RawValue::List`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RawItem {
    /// A bare number.
    Number(f64),
    /// A single token.
    Text(String),
}

impl RawValue {
    /// Returns the number, if this is a bare number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the trimmed text, if this is a string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.trim()),
            _ => None,
        }
    }

    /// Returns `true` if this is a string equal to `keyword`, ignoring ASCII case
    /// and surrounding whitespace.
    #[must_use]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.as_text()
            .is_some_and(|text| text.eq_ignore_ascii_case(keyword))
    }

    /// Returns the number of components this input carries before any
    /// shorthand expansion.
    #[must_use]
    pub fn component_count(&self) -> usize {
        match self {
            Self::Number(_) => 1,
            Self::Text(s) => s.split_ascii_whitespace().count(),
            Self::List(items) => items.len(),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for RawItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for RawValue {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<RawItem>> for RawValue {
    fn from(items: Vec<RawItem>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<f64>> for RawValue {
    fn from(values: Vec<f64>) -> Self {
        Self::List(values.into_iter().map(RawItem::Number).collect())
    }
}

impl<const N: usize> From<[f64; N]> for RawValue {
    fn from(values: [f64; N]) -> Self {
        Self::List(values.into_iter().map(RawItem::Number).collect())
    }
}

impl<const N: usize> From<[&str; N]> for RawValue {
    fn from(values: [&str; N]) -> Self {
        Self::List(values.into_iter().map(RawItem::from).collect())
    }
}

impl From<f64> for RawItem {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for RawItem {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for RawItem {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawItem {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
