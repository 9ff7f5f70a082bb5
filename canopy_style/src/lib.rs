// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Style: per-node style storage and property resolution.
//!
//! This crate applies the definitions of `canopy_property` to scene nodes.
//! Nodes own a [`StyleStore`]; a [`Resolver`] borrowing the registry parses
//! raw input into it, answers computed and used value queries, and drives
//! the animation layer.
//!
//! **Animation → Local → Inherited → Initial**
//!
//! ## Core Concepts
//!
//! - [`StyleNode`]: the interface a scene node exposes: its store, a dirty
//!   signal and its place in the tree.
//! - [`StyleStore`]: sparse sorted layers of computed values, a used-value
//!   cache keyed by [`CalcContext`](canopy_property::CalcContext), and
//!   verbatim values of unregistered names.
//! - [`Resolver`]: `set_property`, `get_used_value`, `animate` and friends.
//!
//! ## Failure isolation
//!
//! Every operation concerns one (node, property) pair. A rejected
//! assignment leaves the property's previous value in place and reports a
//! [`StyleError`]; it never affects other properties or nodes.
//! [`Resolver::set_properties`] applies a batch and collects the failures.
//!
//! ## Quick Start
//!
//! ```rust
//! use canopy_property::{CalcContext, ComputedValue, DirtyFlags, PropertyRegistry};
//! use canopy_style::{Resolver, StyleError, StyleNode, StyleStore};
//! use canopy_unit::RawValue;
//! use kurbo::Size;
//!
//! struct Shape {
//!     store: StyleStore<u32>,
//!     dirty: DirtyFlags,
//! }
//!
//! impl StyleNode<u32> for Shape {
//!     fn style_store(&self) -> &StyleStore<u32> { &self.store }
//!     fn style_store_mut(&mut self) -> &mut StyleStore<u32> { &mut self.store }
//!     fn mark_dirty(&mut self, flags: DirtyFlags) { self.dirty |= flags; }
//!     fn key(&self) -> u32 { 0 }
//!     fn parent_key(&self) -> Option<u32> { None }
//! }
//!
//! let registry = PropertyRegistry::with_builtins();
//! let resolver = Resolver::new(&registry);
//! let mut shape = Shape { store: StyleStore::new(0), dirty: DirtyFlags::empty() };
//!
//! let failures = resolver.set_properties(
//!     &mut shape,
//!     [("r", "25%"), ("fill", "tomato"), ("opacity", "lots"), ("data-id", "c1")],
//! );
//! assert_eq!(failures.len(), 1);
//! assert!(matches!(&failures[0], StyleError::Parse { name, .. } if name == "opacity"));
//!
//! let cx = CalcContext::new(Size::new(100.0, 100.0));
//! let r = resolver.get_used_value(&mut shape, "r", &cx).unwrap();
//! assert_eq!(r.as_f64(), Some(25.0));
//! assert_eq!(
//!     resolver.get_used_value(&mut shape, "data-id", &cx),
//!     Ok(&ComputedValue::Raw(RawValue::from("c1")))
//! );
//! ```
//!
//! ## Logging
//!
//! Assignments, rejections and cache fills are reported through `tracing`.
//! Install a subscriber in the host application to see them.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod node;
mod resolve;
mod store;

pub use config::ResolverConfig;
pub use error::StyleError;
pub use node::{ParentLookup, StyleNode, walk_inherited};
pub use resolve::Resolver;
pub use store::{INLINE_CAPACITY, StyleStore};
