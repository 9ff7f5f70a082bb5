// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene-node interface the resolver works through.
//!
//! The resolver never owns nodes. It reads and writes a node's
//! [`StyleStore`] and raises [`DirtyFlags`] on it; propagating those flags
//! to the render loop is up to the host.

use canopy_property::{ComputedValue, DirtyFlags, PropertyId};

use crate::store::StyleStore;

/// A lookup mechanism for walking parent chains for inheritance.
///
/// Given a node key, returns the node's [`StyleStore`] and its parent key.
/// Closures of the matching shape implement this trait.
pub trait ParentLookup<'a, K: Copy + Eq + 'a> {
    /// Looks up the store and parent key for `key`.
    fn lookup(&self, key: K) -> Option<(&'a StyleStore<K>, Option<K>)>;
}

impl<'a, K, F> ParentLookup<'a, K> for F
where
    K: Copy + Eq + 'a,
    F: Fn(K) -> Option<(&'a StyleStore<K>, Option<K>)>,
{
    #[inline]
    fn lookup(&self, key: K) -> Option<(&'a StyleStore<K>, Option<K>)> {
        self(key)
    }
}

/// Walks the parent chain looking for an inherited value.
///
/// Checks Animation → Local at each ancestor, starting at `current_key`
/// (typically the node's parent), and returns the first value found.
/// Returns `None` if no ancestor has the property set or the chain ends at
/// a key the lookup does not know.
pub fn walk_inherited<'a, K, F>(
    mut current_key: Option<K>,
    id: PropertyId,
    store_lookup: &F,
) -> Option<&'a ComputedValue>
where
    K: Copy + Eq + 'a,
    F: ParentLookup<'a, K> + ?Sized,
{
    while let Some(key) = current_key {
        let (store, parent) = store_lookup.lookup(key)?;
        if let Some(value) = store.get_effective(id) {
            return Some(value);
        }
        current_key = parent;
    }
    None
}

/// A scene node with styles.
///
/// # Example
///
/// ```rust
/// use canopy_property::DirtyFlags;
/// use canopy_style::{StyleNode, StyleStore};
///
/// struct Circle {
///     key: u32,
///     parent: Option<u32>,
///     store: StyleStore<u32>,
///     dirty: DirtyFlags,
/// }
///
/// impl StyleNode<u32> for Circle {
///     fn style_store(&self) -> &StyleStore<u32> {
///         &self.store
///     }
///
///     fn style_store_mut(&mut self) -> &mut StyleStore<u32> {
///         &mut self.store
///     }
///
///     fn mark_dirty(&mut self, flags: DirtyFlags) {
///         self.dirty |= flags;
///     }
///
///     fn key(&self) -> u32 {
///         self.key
///     }
///
///     fn parent_key(&self) -> Option<u32> {
///         self.parent
///     }
/// }
/// ```
pub trait StyleNode<K: Copy + Eq> {
    /// Returns a reference to the node's style store.
    fn style_store(&self) -> &StyleStore<K>;

    /// Returns a mutable reference to the node's style store.
    fn style_store_mut(&mut self) -> &mut StyleStore<K>;

    /// Records that the node needs recalculation, rerendering or new bounds.
    ///
    /// Called once per accepted change with the union of the flags it raises.
    fn mark_dirty(&mut self, flags: DirtyFlags);

    /// Returns the key that identifies this node.
    fn key(&self) -> K;

    /// Returns the parent's key, if this node has a parent.
    ///
    /// This is used for inheritance.
    fn parent_key(&self) -> Option<K>;
}
