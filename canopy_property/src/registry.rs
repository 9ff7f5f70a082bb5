// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property registry.
//!
//! This module provides [`PropertyRegistry`] for registering and looking up
//! property definitions, their aliases and shorthand groups.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use hashbrown::HashMap;
use smallvec::SmallVec;

use canopy_unit::{ParseError, RawItem, RawValue, expand_box_shorthand, expand_pair_shorthand};

use crate::definition::PropertyDefinition;
use crate::error::RegistryError;
use crate::id::PropertyId;

/// A name that expands onto several longhand properties.
///
/// Two longhands follow the pair rule (`a` → `a a`); four follow the box
/// rule (`a b` → `a b a b`, `a b c` → `a b c b`). Each expanded token is
/// then parsed by its longhand's own definition.
#[derive(Clone, Debug)]
pub struct Shorthand {
    name: &'static str,
    longhands: SmallVec<[PropertyId; 4]>,
}

impl Shorthand {
    /// Returns the shorthand name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the longhands in expansion order.
    #[must_use]
    #[inline]
    pub fn longhands(&self) -> &[PropertyId] {
        &self.longhands
    }

    /// Splits raw input into one raw value per longhand.
    ///
    /// Only the token count is checked here; the tokens themselves are
    /// validated by the longhands' parsers.
    pub fn expand(
        &self,
        raw: &RawValue,
    ) -> Result<SmallVec<[(PropertyId, RawValue); 4]>, ParseError> {
        let tokens: SmallVec<[RawItem; 4]> = match raw {
            RawValue::Number(n) => SmallVec::from_elem(RawItem::Number(*n), 1),
            RawValue::Text(text) => text
                .split_ascii_whitespace()
                .map(|token| RawItem::Text(token.to_string()))
                .collect(),
            RawValue::List(items) => items.iter().cloned().collect(),
        };
        if tokens.is_empty() {
            return Err(ParseError::Empty);
        }
        let spread: SmallVec<[RawItem; 4]> = if self.longhands.len() == 2 {
            SmallVec::from_iter(expand_pair_shorthand(&tokens)?)
        } else {
            SmallVec::from_iter(expand_box_shorthand(&tokens)?)
        };
        Ok(self
            .longhands
            .iter()
            .zip(spread)
            .map(|(id, item)| {
                let raw = match item {
                    RawItem::Number(n) => RawValue::Number(n),
                    RawItem::Text(text) => RawValue::Text(text),
                };
                (*id, raw)
            })
            .collect())
    }
}

/// What a name refers to.
#[derive(Clone, Copy, Debug)]
pub enum Lookup<'a> {
    /// A property, possibly reached through an alias.
    Property(PropertyId, &'a PropertyDefinition),
    /// A shorthand group.
    Shorthand(&'a Shorthand),
}

/// A registry of style property definitions.
///
/// Definitions are registered once at startup; afterwards the registry is
/// only read, and is passed by shared reference to whatever resolves styles.
///
/// # Example
///
/// ```rust
/// use canopy_property::{DirtyFlags, PropertyDefinitionBuilder, PropertyRegistry, PropertySyntax};
///
/// let mut registry = PropertyRegistry::new();
///
/// let width = registry.register(
///     PropertyDefinitionBuilder::new("width", PropertySyntax::LengthPercentage)
///         .affects(DirtyFlags::BOUNDS)
///         .build(),
/// );
///
/// assert_eq!(registry.name(width), Some("width"));
/// assert!(registry.lookup("width").unwrap().affects().contains(DirtyFlags::BOUNDS));
/// assert!(registry.lookup("height").is_err());
/// ```
#[derive(Default)]
pub struct PropertyRegistry {
    definitions: Vec<PropertyDefinition>,
    by_name: HashMap<&'static str, PropertyId>,
    aliases: HashMap<&'static str, PropertyId>,
    shorthands: HashMap<&'static str, Shorthand>,
}

impl PropertyRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in scene-graph properties.
    ///
    /// See the [`builtin`](crate::builtin) module for the list.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::builtin::register_builtins(&mut registry);
        registry
    }

    fn is_taken(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
            || self.aliases.contains_key(name)
            || self.shorthands.contains_key(name)
    }

    /// Registers a definition, rejecting names that are already in use.
    ///
    /// # Panics
    ///
    /// Panics if more than 65,535 properties are registered.
    pub fn try_register(
        &mut self,
        definition: PropertyDefinition,
    ) -> Result<PropertyId, RegistryError> {
        let name = definition.name();
        if self.is_taken(name) {
            return Err(RegistryError::Duplicate(name));
        }
        let expected = definition.syntax().shape();
        let found = definition.initial().shape();
        if expected != found {
            return Err(RegistryError::InitialShape {
                name,
                expected: expected.name(),
                found: found.name(),
            });
        }
        assert!(
            self.definitions.len() < u16::MAX as usize,
            "Too many properties registered (max {})",
            u16::MAX
        );

        #[expect(clippy::cast_possible_truncation, reason = "checked above")]
        let id = PropertyId::new(self.definitions.len() as u16);

        tracing::trace!(property = name, id = id.index(), "registered property");
        self.definitions.push(definition);
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Registers a definition.
    ///
    /// # Panics
    ///
    /// Panics if the name is already registered or the initial value has the
    /// wrong shape. Both are programming errors in startup code.
    pub fn register(&mut self, definition: PropertyDefinition) -> PropertyId {
        match self.try_register(definition) {
            Ok(id) => id,
            Err(err) => panic!("{err}"),
        }
    }

    /// Makes `alias` another name for the registered property `target`.
    pub fn alias(
        &mut self,
        alias: &'static str,
        target: &str,
    ) -> Result<PropertyId, RegistryError> {
        if self.is_taken(alias) {
            return Err(RegistryError::Duplicate(alias));
        }
        let id = self
            .by_name
            .get(target)
            .copied()
            .ok_or_else(|| RegistryError::NotFound(target.to_string()))?;
        self.aliases.insert(alias, id);
        Ok(id)
    }

    /// Registers a shorthand that expands onto `longhands`, in order.
    pub fn shorthand(
        &mut self,
        name: &'static str,
        longhands: &[&str],
    ) -> Result<(), RegistryError> {
        if self.is_taken(name) {
            return Err(RegistryError::Duplicate(name));
        }
        if !matches!(longhands.len(), 2 | 4) {
            return Err(RegistryError::ShorthandArity {
                name,
                count: longhands.len(),
            });
        }
        let longhands = longhands
            .iter()
            .map(|longhand| {
                self.by_name(longhand)
                    .ok_or_else(|| RegistryError::NotFound(String::from(*longhand)))
            })
            .collect::<Result<_, _>>()?;
        self.shorthands.insert(name, Shorthand { name, longhands });
        Ok(())
    }

    /// Returns the number of registered properties.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` if no properties are registered.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Looks up a property id by name or alias.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<PropertyId> {
        self.by_name
            .get(name)
            .or_else(|| self.aliases.get(name))
            .copied()
    }

    /// Looks up a property definition by name or alias.
    pub fn lookup(&self, name: &str) -> Result<&PropertyDefinition, RegistryError> {
        self.by_name(name)
            .and_then(|id| self.get(id))
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Finds whatever `name` refers to: a property, an alias or a shorthand.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Lookup<'_>> {
        if let Some(id) = self.by_name(name) {
            return self.get(id).map(|def| Lookup::Property(id, def));
        }
        self.shorthands.get(name).map(Lookup::Shorthand)
    }

    /// Returns the shorthand with this name.
    #[must_use]
    pub fn get_shorthand(&self, name: &str) -> Option<&Shorthand> {
        self.shorthands.get(name)
    }

    /// Returns the canonical name of a property.
    #[must_use]
    pub fn name(&self, id: PropertyId) -> Option<&'static str> {
        self.get(id).map(PropertyDefinition::name)
    }

    /// Returns the definition of a property.
    #[must_use]
    pub fn get(&self, id: PropertyId) -> Option<&PropertyDefinition> {
        self.definitions.get(id.index() as usize)
    }

    /// Returns an iterator over all registered properties, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &PropertyDefinition)> {
        self.definitions.iter().enumerate().map(|(i, def)| {
            #[expect(clippy::cast_possible_truncation, reason = "index < len < u16::MAX")]
            (PropertyId::new(i as u16), def)
        })
    }
}

impl core::fmt::Debug for PropertyRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PropertyRegistry")
            .field("count", &self.definitions.len())
            .field("properties", &self.by_name.keys().collect::<Vec<_>>())
            .field("aliases", &self.aliases.keys().collect::<Vec<_>>())
            .field("shorthands", &self.shorthands.keys().collect::<Vec<_>>())
            .finish()
    }
}
