// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node sparse style storage.
//!
//! This module provides [`StyleStore`], which each scene node owns. It holds
//! the node's computed values in two layers, a cache of used values, and the
//! verbatim values of names the registry does not know.
//!
//! # Implementation
//!
//! Each layer is a vector sorted by [`PropertyId`] and searched with binary
//! search. Typical nodes set a handful of properties, so this beats a hash
//! map on both memory and cache locality. Local values are stored inline for
//! up to [`INLINE_CAPACITY`] properties.
//!
//! # Invalidation
//!
//! Every write to a property's local or animation layer drops that
//! property's cached used value and nothing else.

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use smallvec::SmallVec;

use canopy_property::{CalcContext, ComputedValue, PropertyId, UsedValue};
use canopy_unit::RawValue;

/// Number of local values stored without a heap allocation.
pub const INLINE_CAPACITY: usize = 4;

/// Per-node sparse storage for style values.
///
/// # Precedence
///
/// Animation values take precedence over local values:
/// [`get_effective`](Self::get_effective) returns Animation → Local. The
/// initial value and inheritance are applied by the
/// [`Resolver`](crate::Resolver).
///
/// # Example
///
/// ```rust
/// use canopy_property::{ComputedValue, PropertyRegistry};
/// use canopy_style::StyleStore;
/// use canopy_unit::UnitValue;
///
/// let registry = PropertyRegistry::with_builtins();
/// let width = registry.by_name("width").unwrap();
///
/// let mut store = StyleStore::new(1_u32);
/// assert!(store.get_local(width).is_none());
///
/// store.set_local(width, ComputedValue::Unit(UnitValue::px(100.0)));
/// store.set_animation(width, ComputedValue::Unit(UnitValue::px(200.0)));
/// assert_eq!(
///     store.get_effective(width),
///     Some(&ComputedValue::Unit(UnitValue::px(200.0)))
/// );
/// ```
#[derive(Clone, Debug)]
pub struct StyleStore<K> {
    /// Local values, sorted by [`PropertyId`].
    local_entries: SmallVec<[(PropertyId, ComputedValue); INLINE_CAPACITY]>,
    /// Animation values, sorted by [`PropertyId`].
    ///
    /// Stored out of line so that nodes that are never animated pay little
    /// for the layer.
    animation_entries: Vec<(PropertyId, ComputedValue)>,
    /// Used values with the context they were calculated for, sorted by
    /// [`PropertyId`].
    used_entries: Vec<(PropertyId, CalcContext, UsedValue)>,
    /// Values of unregistered names, kept as [`ComputedValue::Raw`].
    raw_entries: HashMap<String, ComputedValue>,
    owner: K,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Layer {
    Local,
    Animation,
}

impl<K: Copy + Eq> StyleStore<K> {
    /// Creates an empty store for the given owner key.
    #[must_use]
    pub fn new(owner: K) -> Self {
        Self {
            local_entries: SmallVec::new(),
            animation_entries: Vec::new(),
            used_entries: Vec::new(),
            raw_entries: HashMap::new(),
            owner,
        }
    }

    /// Returns the owner key of this store.
    #[must_use]
    #[inline]
    pub fn owner(&self) -> K {
        self.owner
    }

    /// Returns `true` if nothing is set, registered or not.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.local_entries.is_empty()
            && self.animation_entries.is_empty()
            && self.raw_entries.is_empty()
    }

    /// Returns the number of registered properties with a value in any layer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.property_ids().count()
    }

    /// Returns the registered properties that have a value, in id order.
    pub fn property_ids(&self) -> impl Iterator<Item = PropertyId> + '_ {
        PropertyIds {
            local: self.local_entries.as_slice(),
            animation: self.animation_entries.as_slice(),
            local_i: 0,
            animation_i: 0,
        }
    }

    #[inline]
    fn entries(&self, layer: Layer) -> &[(PropertyId, ComputedValue)] {
        match layer {
            Layer::Local => &self.local_entries,
            Layer::Animation => &self.animation_entries,
        }
    }

    #[inline]
    fn find_entry(&self, id: PropertyId, layer: Layer) -> Result<usize, usize> {
        self.entries(layer).binary_search_by_key(&id, |(pid, _)| *pid)
    }

    #[inline]
    fn find_used_entry(&self, id: PropertyId) -> Result<usize, usize> {
        self.used_entries
            .binary_search_by_key(&id, |(pid, _, _)| *pid)
    }

    #[inline]
    fn get_layer_value(&self, id: PropertyId, layer: Layer) -> Option<&ComputedValue> {
        self.find_entry(id, layer)
            .ok()
            .map(|idx| &self.entries(layer)[idx].1)
    }

    fn set_layer_value(&mut self, id: PropertyId, layer: Layer, value: ComputedValue) {
        let found = self.find_entry(id, layer);
        match (layer, found) {
            (Layer::Local, Ok(idx)) => self.local_entries[idx].1 = value,
            (Layer::Local, Err(idx)) => self.local_entries.insert(idx, (id, value)),
            (Layer::Animation, Ok(idx)) => self.animation_entries[idx].1 = value,
            (Layer::Animation, Err(idx)) => self.animation_entries.insert(idx, (id, value)),
        }
        self.invalidate_used(id);
    }

    fn clear_layer_value(&mut self, id: PropertyId, layer: Layer) -> bool {
        let Ok(idx) = self.find_entry(id, layer) else {
            return false;
        };
        match layer {
            Layer::Local => {
                self.local_entries.remove(idx);
            }
            Layer::Animation => {
                self.animation_entries.remove(idx);
            }
        }
        self.invalidate_used(id);
        true
    }

    // =========================================================================
    // Local values
    // =========================================================================

    /// Gets the local value, if set.
    #[must_use]
    #[inline]
    pub fn get_local(&self, id: PropertyId) -> Option<&ComputedValue> {
        self.get_layer_value(id, Layer::Local)
    }

    /// Sets the local value and drops the property's used value.
    pub fn set_local(&mut self, id: PropertyId, value: ComputedValue) {
        self.set_layer_value(id, Layer::Local, value);
    }

    /// Clears the local value.
    ///
    /// Returns `true` if a value was removed.
    pub fn clear_local(&mut self, id: PropertyId) -> bool {
        self.clear_layer_value(id, Layer::Local)
    }

    /// Returns `true` if the property has a local value.
    #[must_use]
    #[inline]
    pub fn has_local(&self, id: PropertyId) -> bool {
        self.find_entry(id, Layer::Local).is_ok()
    }

    // =========================================================================
    // Animation values
    // =========================================================================

    /// Gets the animation value, if set.
    #[must_use]
    #[inline]
    pub fn get_animation(&self, id: PropertyId) -> Option<&ComputedValue> {
        self.get_layer_value(id, Layer::Animation)
    }

    /// Sets the animation value and drops the property's used value.
    pub fn set_animation(&mut self, id: PropertyId, value: ComputedValue) {
        self.set_layer_value(id, Layer::Animation, value);
    }

    /// Clears the animation value.
    ///
    /// Returns `true` if a value was removed.
    pub fn clear_animation(&mut self, id: PropertyId) -> bool {
        self.clear_layer_value(id, Layer::Animation)
    }

    /// Returns `true` if the property has an animation value.
    #[must_use]
    #[inline]
    pub fn has_animation(&self, id: PropertyId) -> bool {
        self.find_entry(id, Layer::Animation).is_ok()
    }

    /// Clears all animation values, dropping the used values that depended
    /// on them.
    ///
    /// Returns the number of animation values removed.
    pub fn clear_all_animations(&mut self) -> usize {
        let animated = core::mem::take(&mut self.animation_entries);
        for (id, _) in &animated {
            self.invalidate_used(*id);
        }
        animated.len()
    }

    /// Gets the effective stored value (Animation → Local).
    #[must_use]
    pub fn get_effective(&self, id: PropertyId) -> Option<&ComputedValue> {
        self.get_animation(id).or_else(|| self.get_local(id))
    }

    // =========================================================================
    // Used values
    // =========================================================================

    /// Gets the cached used value if it was calculated for `cx`.
    #[must_use]
    pub fn get_used(&self, id: PropertyId, cx: &CalcContext) -> Option<&UsedValue> {
        let idx = self.find_used_entry(id).ok()?;
        let (_, cached_cx, value) = &self.used_entries[idx];
        (cached_cx == cx).then_some(value)
    }

    /// Caches a used value calculated for `cx`.
    ///
    /// Returns a reference to the cached value.
    pub fn set_used(&mut self, id: PropertyId, cx: CalcContext, value: UsedValue) -> &UsedValue {
        let idx = match self.find_used_entry(id) {
            Ok(idx) => {
                self.used_entries[idx] = (id, cx, value);
                idx
            }
            Err(idx) => {
                self.used_entries.insert(idx, (id, cx, value));
                idx
            }
        };
        &self.used_entries[idx].2
    }

    /// Drops the cached used value of one property.
    ///
    /// Returns `true` if a value was cached.
    pub fn invalidate_used(&mut self, id: PropertyId) -> bool {
        match self.find_used_entry(id) {
            Ok(idx) => {
                self.used_entries.remove(idx);
                true
            }
            Err(_) => false,
        }
    }

    /// Drops every cached used value.
    ///
    /// Returns the number of values dropped.
    pub fn invalidate_all_used(&mut self) -> usize {
        let len = self.used_entries.len();
        self.used_entries.clear();
        len
    }

    // =========================================================================
    // Unregistered names
    // =========================================================================

    /// Gets the verbatim value of an unregistered name as
    /// [`ComputedValue::Raw`].
    #[must_use]
    pub fn get_raw(&self, name: &str) -> Option<&ComputedValue> {
        self.raw_entries.get(name)
    }

    /// Stores the verbatim value of an unregistered name.
    ///
    /// Returns `false` if the same value was already stored.
    pub fn set_raw(&mut self, name: &str, raw: RawValue) -> bool {
        let value = ComputedValue::Raw(raw);
        match self.raw_entries.get_mut(name) {
            Some(existing) if *existing == value => false,
            Some(existing) => {
                *existing = value;
                true
            }
            None => {
                self.raw_entries.insert(String::from(name), value);
                true
            }
        }
    }

    /// Removes the value of an unregistered name.
    ///
    /// Returns `true` if a value was removed.
    pub fn clear_raw(&mut self, name: &str) -> bool {
        self.raw_entries.remove(name).is_some()
    }

    /// Returns the unregistered names that have a value, in no particular order.
    pub fn raw_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.raw_entries.keys().map(String::as_str)
    }
}

struct PropertyIds<'a> {
    local: &'a [(PropertyId, ComputedValue)],
    animation: &'a [(PropertyId, ComputedValue)],
    local_i: usize,
    animation_i: usize,
}

impl Iterator for PropertyIds<'_> {
    type Item = PropertyId;

    fn next(&mut self) -> Option<Self::Item> {
        let local = self.local.get(self.local_i).map(|(id, _)| *id);
        let animation = self.animation.get(self.animation_i).map(|(id, _)| *id);

        match (local, animation) {
            (None, None) => None,
            (Some(id), None) => {
                self.local_i += 1;
                Some(id)
            }
            (None, Some(id)) => {
                self.animation_i += 1;
                Some(id)
            }
            (Some(local_id), Some(animation_id)) => {
                if local_id < animation_id {
                    self.local_i += 1;
                    Some(local_id)
                } else if animation_id < local_id {
                    self.animation_i += 1;
                    Some(animation_id)
                } else {
                    self.local_i += 1;
                    self.animation_i += 1;
                    Some(local_id)
                }
            }
        }
    }
}
