// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style assignment and resolution.
//!
//! This module provides [`Resolver`], which turns raw style input into
//! computed values on nodes and computed values into used values for
//! renderers.

use alloc::string::ToString;
use alloc::vec::Vec;
use smallvec::SmallVec;

use canopy_property::{
    CalcContext, ComputedValue, DirtyFlags, Lookup, PropertyDefinition, PropertyId,
    PropertyRegistry, UsedValue,
};
use canopy_unit::{ParseError, RawValue};

use crate::config::ResolverConfig;
use crate::error::StyleError;
use crate::node::{ParentLookup, StyleNode, walk_inherited};

/// Resolves style properties on nodes against a [`PropertyRegistry`].
///
/// The resolver borrows the registry and holds no per-node state, so one
/// resolver serves a whole scene.
///
/// Value precedence is **Animation → Local → Initial**, with inherited
/// properties consulting ancestors before the initial value when resolved
/// through [`get_inherited_value`](Self::get_inherited_value).
///
/// # Example
///
/// ```rust
/// use canopy_property::{CalcContext, ComputedValue, DirtyFlags, PropertyRegistry};
/// use canopy_style::{Resolver, StyleNode, StyleStore};
/// use kurbo::Size;
///
/// struct Rect {
///     store: StyleStore<u32>,
///     dirty: DirtyFlags,
/// }
///
/// impl StyleNode<u32> for Rect {
///     fn style_store(&self) -> &StyleStore<u32> { &self.store }
///     fn style_store_mut(&mut self) -> &mut StyleStore<u32> { &mut self.store }
///     fn mark_dirty(&mut self, flags: DirtyFlags) { self.dirty |= flags; }
///     fn key(&self) -> u32 { 1 }
///     fn parent_key(&self) -> Option<u32> { None }
/// }
///
/// let registry = PropertyRegistry::with_builtins();
/// let resolver = Resolver::new(&registry);
/// let mut rect = Rect { store: StyleStore::new(1), dirty: DirtyFlags::empty() };
///
/// assert_eq!(resolver.set_property(&mut rect, "width", "50%"), Ok(true));
/// assert!(rect.dirty.contains(DirtyFlags::RECALCULATE | DirtyFlags::BOUNDS));
///
/// // A rejected assignment keeps the previous value.
/// assert!(resolver.set_property(&mut rect, "width", "wide").is_err());
///
/// let cx = CalcContext::new(Size::new(300.0, 100.0));
/// let used = resolver.get_used_value(&mut rect, "width", &cx).unwrap();
/// assert_eq!(used.as_f64(), Some(150.0));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'r> {
    registry: &'r PropertyRegistry,
    config: ResolverConfig,
}

impl<'r> Resolver<'r> {
    /// Creates a permissive resolver.
    #[must_use]
    pub fn new(registry: &'r PropertyRegistry) -> Self {
        Self::with_config(registry, ResolverConfig::default())
    }

    /// Creates a resolver with the given configuration.
    #[must_use]
    pub fn with_config(registry: &'r PropertyRegistry, config: ResolverConfig) -> Self {
        Self { registry, config }
    }

    /// Returns the registry this resolver reads definitions from.
    #[must_use]
    #[inline]
    pub fn registry(&self) -> &'r PropertyRegistry {
        self.registry
    }

    /// Returns the configuration.
    #[must_use]
    #[inline]
    pub fn config(&self) -> ResolverConfig {
        self.config
    }

    fn definition(
        &self,
        id: PropertyId,
        name: &str,
    ) -> Result<&'r PropertyDefinition, StyleError> {
        self.registry
            .get(id)
            .ok_or_else(|| StyleError::NotFound(name.to_string()))
    }

    fn unknown(&self, name: &str) -> StyleError {
        StyleError::NotFound(name.to_string())
    }

    fn rejected(name: &str, source: ParseError) -> StyleError {
        tracing::warn!(property = name, error = %source, "style assignment rejected");
        StyleError::Parse {
            name: name.to_string(),
            source,
        }
    }

    /// Parses a raw value for a property without touching any node.
    ///
    /// Animation drivers use this to build keyframe values for
    /// [`animate`](Self::animate).
    pub fn parse_value(&self, name: &str, raw: &RawValue) -> Result<ComputedValue, StyleError> {
        let def = self
            .registry
            .lookup(name)
            .map_err(|_| self.unknown(name))?;
        def.parse(raw).map_err(|source| StyleError::Parse {
            name: name.to_string(),
            source,
        })
    }

    // =========================================================================
    // Assignment
    // =========================================================================

    /// Assigns a raw value to a property on `node`.
    ///
    /// 1. `name` is resolved to a property (directly or through an alias) or
    ///    a shorthand.
    /// 2. The value is parsed. On failure nothing is stored, the previous
    ///    value is kept and [`StyleError::Parse`] is returned. A shorthand is
    ///    stored only if every longhand parses.
    /// 3. The computed value is stored as the local value and the property's
    ///    used value is dropped.
    /// 4. The node is marked [`DirtyFlags::STYLE_CHANGED`] plus whatever the
    ///    definition affects.
    ///
    /// Returns `Ok(false)` without touching the node when the stored value
    /// is already equal.
    ///
    /// Names the registry does not know are stored verbatim, or rejected
    /// with [`StyleError::NotFound`] in strict mode.
    pub fn set_property<K, N>(
        &self,
        node: &mut N,
        name: &str,
        raw: impl Into<RawValue>,
    ) -> Result<bool, StyleError>
    where
        K: Copy + Eq,
        N: StyleNode<K> + ?Sized,
    {
        let raw = raw.into();
        match self.registry.find(name) {
            Some(Lookup::Property(id, def)) => {
                let value = def.parse(&raw).map_err(|err| Self::rejected(name, err))?;
                Ok(Self::store_local(node, id, def, value))
            }
            Some(Lookup::Shorthand(shorthand)) => {
                let parts = shorthand
                    .expand(&raw)
                    .map_err(|err| Self::rejected(name, err))?;
                let mut parsed = SmallVec::<[_; 4]>::new();
                for (id, part) in parts {
                    let def = self.definition(id, name)?;
                    let value = def
                        .parse(&part)
                        .map_err(|err| Self::rejected(def.name(), err))?;
                    parsed.push((id, def, value));
                }
                let mut changed = false;
                for (id, def, value) in parsed {
                    changed |= Self::store_local(node, id, def, value);
                }
                Ok(changed)
            }
            None if self.config.is_strict() => {
                tracing::warn!(property = name, "unknown property rejected");
                Err(self.unknown(name))
            }
            None => {
                let changed = node.style_store_mut().set_raw(name, raw);
                if changed {
                    tracing::debug!(property = name, "unknown property stored verbatim");
                    node.mark_dirty(DirtyFlags::STYLE_CHANGED);
                }
                Ok(changed)
            }
        }
    }

    fn store_local<K, N>(
        node: &mut N,
        id: PropertyId,
        def: &PropertyDefinition,
        value: ComputedValue,
    ) -> bool
    where
        K: Copy + Eq,
        N: StyleNode<K> + ?Sized,
    {
        let store = node.style_store_mut();
        if store.get_local(id) == Some(&value) {
            tracing::trace!(property = def.name(), "style assignment unchanged");
            return false;
        }
        tracing::debug!(property = def.name(), value = ?value, "style assigned");
        store.set_local(id, value);
        node.mark_dirty(DirtyFlags::STYLE_CHANGED | def.affects());
        true
    }

    /// Applies assignments in order, isolating failures.
    ///
    /// A rejected assignment does not stop later ones; every failure is
    /// returned, in order.
    pub fn set_properties<K, N, I, S, V>(&self, node: &mut N, assignments: I) -> Vec<StyleError>
    where
        K: Copy + Eq,
        N: StyleNode<K> + ?Sized,
        I: IntoIterator<Item = (S, V)>,
        S: AsRef<str>,
        V: Into<RawValue>,
    {
        assignments
            .into_iter()
            .filter_map(|(name, raw)| self.set_property(node, name.as_ref(), raw).err())
            .collect()
    }

    /// Removes the local value of a property, returning it to its
    /// inherited or initial value.
    ///
    /// Returns `Ok(false)` if nothing was set.
    pub fn clear_property<K, N>(&self, node: &mut N, name: &str) -> Result<bool, StyleError>
    where
        K: Copy + Eq,
        N: StyleNode<K> + ?Sized,
    {
        let mut flags = DirtyFlags::empty();
        match self.registry.find(name) {
            Some(Lookup::Property(id, def)) => {
                if node.style_store_mut().clear_local(id) {
                    flags |= DirtyFlags::STYLE_CHANGED | def.affects();
                }
            }
            Some(Lookup::Shorthand(shorthand)) => {
                for &id in shorthand.longhands() {
                    let def = self.definition(id, name)?;
                    if node.style_store_mut().clear_local(id) {
                        flags |= DirtyFlags::STYLE_CHANGED | def.affects();
                    }
                }
            }
            None if self.config.is_strict() => return Err(self.unknown(name)),
            None => {
                if node.style_store_mut().clear_raw(name) {
                    flags |= DirtyFlags::STYLE_CHANGED;
                }
            }
        }
        if flags.is_empty() {
            return Ok(false);
        }
        tracing::debug!(property = name, "style cleared");
        node.mark_dirty(flags);
        Ok(true)
    }

    // =========================================================================
    // Reading
    // =========================================================================

    /// Gets the computed value of a property (Animation → Local → Initial).
    ///
    /// For unregistered names this is the stored verbatim value, and
    /// [`StyleError::NotFound`] if none was stored.
    pub fn get_computed_value<'a, K, N>(
        &'a self,
        node: &'a N,
        name: &str,
    ) -> Result<&'a ComputedValue, StyleError>
    where
        K: Copy + Eq + 'a,
        N: StyleNode<K> + ?Sized,
    {
        let store = node.style_store();
        match self.registry.find(name) {
            Some(Lookup::Property(id, def)) => {
                Ok(store.get_effective(id).unwrap_or_else(|| def.initial()))
            }
            Some(Lookup::Shorthand(_)) => Err(self.unknown(name)),
            None => store.get_raw(name).ok_or_else(|| self.unknown(name)),
        }
    }

    /// Gets the computed value with inheritance.
    ///
    /// Resolution order:
    /// 1. This node's Animation value
    /// 2. This node's Local value
    /// 3. If the property inherits: the parent chain, Animation → Local at
    ///    each ancestor
    /// 4. The initial value
    pub fn get_inherited_value<'a, K, N, F>(
        &'a self,
        node: &'a N,
        name: &str,
        store_lookup: &F,
    ) -> Result<&'a ComputedValue, StyleError>
    where
        K: Copy + Eq + 'a,
        N: StyleNode<K> + ?Sized,
        F: ParentLookup<'a, K> + ?Sized,
    {
        let Some(Lookup::Property(id, def)) = self.registry.find(name) else {
            return self.get_computed_value(node, name);
        };
        if let Some(value) = node.style_store().get_effective(id) {
            return Ok(value);
        }
        if def.inherits()
            && let Some(value) = walk_inherited(node.parent_key(), id, store_lookup)
        {
            return Ok(value);
        }
        Ok(def.initial())
    }

    /// Gets the used value of a property for a layout context.
    ///
    /// The cached value is returned while `cx` equals the context it was
    /// calculated for. Otherwise the definition's calculator runs on the
    /// computed value (identity without one) and the result is cached.
    ///
    /// Unregistered names yield their stored verbatim value.
    ///
    /// Only the node itself is consulted, so an inherited property the node
    /// does not set resolves from its initial value. Use
    /// [`get_inherited_used_value`](Self::get_inherited_used_value) to see
    /// ancestor values.
    pub fn get_used_value<'n, K, N>(
        &self,
        node: &'n mut N,
        name: &str,
        cx: &CalcContext,
    ) -> Result<&'n UsedValue, StyleError>
    where
        K: Copy + Eq + 'n,
        N: StyleNode<K> + ?Sized,
    {
        let store = node.style_store_mut();
        match self.registry.find(name) {
            Some(Lookup::Property(id, def)) => {
                if store.get_used(id, cx).is_some() {
                    tracing::trace!(property = name, "used value cache hit");
                    return store.get_used(id, cx).ok_or_else(|| self.unknown(name));
                }
                let computed = store.get_effective(id).unwrap_or_else(|| def.initial());
                let used = def.calculate(computed, cx);
                tracing::debug!(property = name, value = ?used, "used value calculated");
                Ok(store.set_used(id, *cx, used))
            }
            Some(Lookup::Shorthand(_)) => Err(self.unknown(name)),
            None => store.get_raw(name).ok_or_else(|| self.unknown(name)),
        }
    }

    /// Gets the used value of a property, walking ancestors for inherited
    /// properties the node does not set.
    ///
    /// The node's cache is read when the node has its own value. Values taken
    /// from ancestors are calculated on every call and never cached, since an
    /// ancestor's change does not invalidate the node.
    pub fn get_inherited_used_value<'a, K, N, F>(
        &'a self,
        node: &'a N,
        name: &str,
        cx: &CalcContext,
        store_lookup: &F,
    ) -> Result<UsedValue, StyleError>
    where
        K: Copy + Eq + 'a,
        N: StyleNode<K> + ?Sized,
        F: ParentLookup<'a, K> + ?Sized,
    {
        let def = match self.registry.find(name) {
            Some(Lookup::Property(id, def)) => {
                let store = node.style_store();
                if store.get_effective(id).is_some()
                    && let Some(used) = store.get_used(id, cx)
                {
                    return Ok(used.clone());
                }
                Some(def)
            }
            _ => None,
        };
        let computed = self.get_inherited_value(node, name, store_lookup)?;
        Ok(match def {
            Some(def) => def.calculate(computed, cx),
            None => computed.clone(),
        })
    }

    /// Drops every cached used value on `node`, for example after its
    /// reference box changed.
    ///
    /// Returns the number of values dropped.
    pub fn invalidate_used<K, N>(&self, node: &mut N) -> usize
    where
        K: Copy + Eq,
        N: StyleNode<K> + ?Sized,
    {
        node.style_store_mut().invalidate_all_used()
    }

    // =========================================================================
    // Interpolation
    // =========================================================================

    /// Interpolates two computed values of a property.
    pub fn mix(
        &self,
        name: &str,
        from: &ComputedValue,
        to: &ComputedValue,
        ratio: f64,
    ) -> Result<ComputedValue, StyleError> {
        let def = self
            .registry
            .lookup(name)
            .map_err(|_| self.unknown(name))?;
        def.mix(from, to, ratio).map_err(|source| StyleError::Mix {
            name: name.to_string(),
            source,
        })
    }

    /// Stores the interpolation of `from` and `to` at `ratio` in the node's
    /// animation layer, which overrides its local value.
    ///
    /// On a mixing error the node is left untouched so the driver can skip
    /// this frame's interpolation for the property.
    pub fn animate<K, N>(
        &self,
        node: &mut N,
        name: &str,
        from: &ComputedValue,
        to: &ComputedValue,
        ratio: f64,
    ) -> Result<bool, StyleError>
    where
        K: Copy + Eq,
        N: StyleNode<K> + ?Sized,
    {
        let Some(Lookup::Property(id, def)) = self.registry.find(name) else {
            return Err(self.unknown(name));
        };
        let value = self.mix(name, from, to, ratio).inspect_err(|err| {
            tracing::warn!(property = name, error = %err, "interpolation skipped");
        })?;
        let store = node.style_store_mut();
        if store.get_animation(id) == Some(&value) {
            return Ok(false);
        }
        tracing::trace!(property = name, ratio, "animation value stored");
        store.set_animation(id, value);
        node.mark_dirty(DirtyFlags::STYLE_CHANGED | def.affects());
        Ok(true)
    }

    /// Removes the animation value of a property.
    ///
    /// Returns `Ok(false)` if the property was not animated.
    pub fn clear_animation<K, N>(&self, node: &mut N, name: &str) -> Result<bool, StyleError>
    where
        K: Copy + Eq,
        N: StyleNode<K> + ?Sized,
    {
        let (id, def) = self
            .registry
            .by_name(name)
            .and_then(|id| Some((id, self.registry.get(id)?)))
            .ok_or_else(|| self.unknown(name))?;
        if !node.style_store_mut().clear_animation(id) {
            return Ok(false);
        }
        node.mark_dirty(DirtyFlags::STYLE_CHANGED | def.affects());
        Ok(true)
    }

    /// Removes every animation value on `node`.
    ///
    /// Returns the number of values removed.
    pub fn clear_all_animations<K, N>(&self, node: &mut N) -> usize
    where
        K: Copy + Eq,
        N: StyleNode<K> + ?Sized,
    {
        let store = node.style_store_mut();
        let animated: SmallVec<[PropertyId; 8]> = store
            .property_ids()
            .filter(|id| store.has_animation(*id))
            .collect();
        let removed = store.clear_all_animations();
        let flags = animated
            .iter()
            .filter_map(|id| self.registry.get(*id))
            .fold(DirtyFlags::empty(), |flags, def| flags | def.affects());
        if removed > 0 {
            node.mark_dirty(DirtyFlags::STYLE_CHANGED | flags);
        }
        removed
    }
}
