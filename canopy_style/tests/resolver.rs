// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end resolution on a small scene.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use canopy_property::{
    CalcContext, ComputedValue, DirtyFlags, Paint, PropertyDefinitionBuilder, PropertyRegistry,
    PropertySyntax,
};
use canopy_style::{Resolver, ResolverConfig, StyleError, StyleNode, StyleStore};
use canopy_unit::{MixError, ParseError, RawValue, UnitValue};
use kurbo::{Affine, Size};

struct Node {
    key: usize,
    parent: Option<usize>,
    store: StyleStore<usize>,
    dirty: DirtyFlags,
}

impl Node {
    fn new(key: usize, parent: Option<usize>) -> Self {
        Self {
            key,
            parent,
            store: StyleStore::new(key),
            dirty: DirtyFlags::empty(),
        }
    }
}

impl StyleNode<usize> for Node {
    fn style_store(&self) -> &StyleStore<usize> {
        &self.store
    }

    fn style_store_mut(&mut self) -> &mut StyleStore<usize> {
        &mut self.store
    }

    fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    fn key(&self) -> usize {
        self.key
    }

    fn parent_key(&self) -> Option<usize> {
        self.parent
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn px(n: f64) -> ComputedValue {
    ComputedValue::Unit(UnitValue::px(n))
}

#[test]
fn rejected_assignment_keeps_the_previous_value() {
    init_tracing();
    let registry = PropertyRegistry::with_builtins();
    let resolver = Resolver::new(&registry);
    let mut node = Node::new(0, None);
    let cx = CalcContext::default();

    resolver.set_property(&mut node, "width", 10).unwrap();
    node.dirty = DirtyFlags::empty();

    let err = resolver
        .set_property(&mut node, "width", "ten")
        .unwrap_err();
    assert!(matches!(
        &err,
        StyleError::Parse { name, source: ParseError::InvalidNumber { .. } } if name == "width"
    ));
    assert!(node.dirty.is_empty());
    assert_eq!(resolver.get_used_value(&mut node, "width", &cx), Ok(&px(10.0)));
}

#[test]
fn unknown_property_is_passed_through() {
    let registry = PropertyRegistry::with_builtins();
    let resolver = Resolver::new(&registry);
    let mut node = Node::new(0, None);

    assert_eq!(resolver.set_property(&mut node, "data-custom", "foo"), Ok(true));
    let used = resolver
        .get_used_value(&mut node, "data-custom", &CalcContext::default())
        .unwrap();
    assert_eq!(used, &ComputedValue::Raw(RawValue::from("foo")));
    assert!(node.dirty.contains(DirtyFlags::RECALCULATE));
}

#[test]
fn strict_mode_reports_typos() {
    let registry = PropertyRegistry::with_builtins();
    let resolver = Resolver::with_config(&registry, ResolverConfig::default().strict(true));
    let mut node = Node::new(0, None);

    assert_eq!(
        resolver.set_property(&mut node, "widht", 10),
        Err(StyleError::NotFound("widht".into()))
    );
    assert_eq!(resolver.set_property(&mut node, "width", 10), Ok(true));
}

#[test]
fn repeated_assignment_is_idempotent() {
    let registry = PropertyRegistry::with_builtins();
    let resolver = Resolver::new(&registry);
    let mut node = Node::new(0, None);
    let cx = CalcContext::new(Size::new(100.0, 100.0));

    assert_eq!(resolver.set_property(&mut node, "radius", "10 20"), Ok(true));
    let first = resolver
        .get_computed_value(&node, "radius")
        .unwrap()
        .clone();
    resolver.get_used_value(&mut node, "radius", &cx).unwrap();
    node.dirty = DirtyFlags::empty();

    assert_eq!(resolver.set_property(&mut node, "radius", "10 20"), Ok(false));
    assert_eq!(resolver.get_computed_value(&node, "radius"), Ok(&first));
    assert!(node.dirty.is_empty());
    let id = registry.by_name("radius").unwrap();
    assert!(node.store.get_used(id, &cx).is_some());
}

#[test]
fn alias_and_canonical_name_share_storage() {
    let registry = PropertyRegistry::with_builtins();
    let resolver = Resolver::new(&registry);
    let mut node = Node::new(0, None);

    resolver.set_property(&mut node, "d", "M0 0 L10 10").unwrap();
    let via_alias = resolver.get_computed_value(&node, "d").unwrap();
    let via_name = resolver.get_computed_value(&node, "path").unwrap();
    assert_eq!(via_alias, via_name);
    assert_eq!(via_name.as_path().map(|path| path.elements().len()), Some(2));
}

#[test]
fn shorthands_are_all_or_nothing() {
    let registry = PropertyRegistry::with_builtins();
    let resolver = Resolver::new(&registry);
    let mut node = Node::new(0, None);

    assert_eq!(resolver.set_property(&mut node, "shadowOffset", "4"), Ok(true));
    assert_eq!(resolver.get_computed_value(&node, "shadowOffsetX"), Ok(&px(4.0)));
    assert_eq!(resolver.get_computed_value(&node, "shadowOffsetY"), Ok(&px(4.0)));

    let err = resolver
        .set_property(&mut node, "shadowOffset", "8 nope")
        .unwrap_err();
    assert_eq!(err.name(), "shadowOffsetY");
    // The valid first half was not applied either.
    assert_eq!(resolver.get_computed_value(&node, "shadowOffsetX"), Ok(&px(4.0)));

    assert!(resolver.set_property(&mut node, "shadowOffset", "1 2 3").is_err());
    assert_eq!(resolver.clear_property(&mut node, "shadowOffset"), Ok(true));
    assert_eq!(resolver.get_computed_value(&node, "shadowOffsetX"), Ok(&px(0.0)));
}

#[test]
fn failures_are_isolated_per_property() {
    let registry = PropertyRegistry::with_builtins();
    let resolver = Resolver::new(&registry);
    let mut node = Node::new(0, None);

    let failures = resolver.set_properties(
        &mut node,
        [
            ("x", RawValue::from(5)),
            ("lineCap", RawValue::from("pointy")),
            ("fill", RawValue::from("#00ff00")),
            ("radius", RawValue::from("1 2 3 4 5")),
            ("y", RawValue::from(7)),
        ],
    );
    let names: Vec<_> = failures.iter().map(StyleError::name).collect();
    assert_eq!(names, ["lineCap", "radius"]);
    assert_eq!(resolver.get_computed_value(&node, "x"), Ok(&px(5.0)));
    assert_eq!(resolver.get_computed_value(&node, "y"), Ok(&px(7.0)));
    assert!(matches!(
        resolver.get_computed_value(&node, "fill"),
        Ok(ComputedValue::Paint(Paint::Color(_)))
    ));
}

#[test]
fn later_assignments_win() {
    let registry = PropertyRegistry::with_builtins();
    let resolver = Resolver::new(&registry);
    let mut node = Node::new(0, None);

    let failures = resolver.set_properties(&mut node, [("x", 1), ("x", 2), ("x", 3)]);
    assert!(failures.is_empty());
    assert_eq!(resolver.get_computed_value(&node, "x"), Ok(&px(3.0)));
}

#[test]
fn used_values_are_cached_per_context() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = PropertyRegistry::new();
    let counter = Arc::clone(&calls);
    registry.register(
        PropertyDefinitionBuilder::new("width", PropertySyntax::LengthPercentage)
            .calculator(move |value, cx| {
                counter.fetch_add(1, Ordering::Relaxed);
                let fraction = value.as_f64().unwrap_or_default() / 100.0;
                ComputedValue::Unit(UnitValue::px(fraction * cx.reference.width))
            })
            .build(),
    );
    let resolver = Resolver::new(&registry);
    let mut node = Node::new(0, None);
    let small = CalcContext::new(Size::new(100.0, 50.0));
    let large = CalcContext::new(Size::new(400.0, 50.0));

    resolver.set_property(&mut node, "width", "50%").unwrap();
    assert_eq!(resolver.get_used_value(&mut node, "width", &small), Ok(&px(50.0)));
    assert_eq!(resolver.get_used_value(&mut node, "width", &small), Ok(&px(50.0)));
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    assert_eq!(resolver.get_used_value(&mut node, "width", &large), Ok(&px(200.0)));
    assert_eq!(calls.load(Ordering::Relaxed), 2);

    // A write invalidates the cache.
    resolver.set_property(&mut node, "width", "25%").unwrap();
    assert_eq!(resolver.get_used_value(&mut node, "width", &large), Ok(&px(100.0)));
    assert_eq!(calls.load(Ordering::Relaxed), 3);

    assert_eq!(resolver.invalidate_used(&mut node), 1);
    resolver.get_used_value(&mut node, "width", &large).unwrap();
    assert_eq!(calls.load(Ordering::Relaxed), 4);
}

#[test]
fn inheritance_walks_ancestors() {
    let registry = PropertyRegistry::with_builtins();
    let resolver = Resolver::new(&registry);
    let mut nodes = vec![
        Node::new(0, None),
        Node::new(1, Some(0)),
        Node::new(2, Some(1)),
    ];
    resolver
        .set_property(&mut nodes[0], "visibility", "hidden")
        .unwrap();
    resolver.set_property(&mut nodes[0], "fill", "red").unwrap();
    resolver
        .set_property(&mut nodes[1], "fontSize", 24)
        .unwrap();

    let lookup = |key: usize| {
        nodes
            .get(key)
            .map(|node| (node.style_store(), node.parent_key()))
    };
    let leaf = &nodes[2];
    assert_eq!(
        resolver.get_inherited_value(leaf, "visibility", &lookup),
        Ok(&ComputedValue::Keyword("hidden"))
    );
    assert_eq!(
        resolver.get_inherited_value(leaf, "fontSize", &lookup),
        Ok(&px(24.0))
    );
    // `fill` does not inherit.
    assert_eq!(
        resolver.get_inherited_value(leaf, "fill", &lookup),
        Ok(&ComputedValue::Paint(Paint::None))
    );
    // Without inheritance only the node itself is consulted.
    assert_eq!(
        resolver.get_computed_value(leaf, "visibility"),
        Ok(&ComputedValue::Keyword("visible"))
    );
}

#[test]
fn inherited_used_values_follow_ancestors() {
    let registry = PropertyRegistry::with_builtins();
    let resolver = Resolver::new(&registry);
    let mut nodes = vec![Node::new(0, None), Node::new(1, Some(0))];
    resolver
        .set_property(&mut nodes[0], "fontSize", 24)
        .unwrap();
    resolver
        .set_property(&mut nodes[0], "visibility", "hidden")
        .unwrap();
    resolver.set_property(&mut nodes[0], "width", "50%").unwrap();
    resolver.set_property(&mut nodes[1], "x", "25%").unwrap();
    let cx = CalcContext::new(Size::new(200.0, 100.0));

    // The node-only path falls back to the initial value.
    assert_eq!(
        resolver.get_used_value(&mut nodes[1], "fontSize", &cx),
        Ok(&px(16.0))
    );

    let lookup = |key: usize| {
        nodes
            .get(key)
            .map(|node| (node.style_store(), node.parent_key()))
    };
    let child = &nodes[1];
    assert_eq!(
        resolver.get_inherited_used_value(child, "fontSize", &cx, &lookup),
        Ok(px(24.0))
    );
    assert_eq!(
        resolver.get_inherited_used_value(child, "visibility", &cx, &lookup),
        Ok(ComputedValue::Keyword("hidden"))
    );
    // `width` does not inherit.
    assert_eq!(
        resolver.get_inherited_used_value(child, "width", &cx, &lookup),
        Ok(px(0.0))
    );
    assert_eq!(
        resolver.get_inherited_used_value(child, "x", &cx, &lookup),
        Ok(px(50.0))
    );
}

#[test]
fn animation_overrides_local_until_cleared() {
    let registry = PropertyRegistry::with_builtins();
    let resolver = Resolver::new(&registry);
    let mut node = Node::new(0, None);
    let cx = CalcContext::default();

    resolver.set_property(&mut node, "opacity", 0.2).unwrap();
    let from = resolver.parse_value("opacity", &RawValue::from(0.0)).unwrap();
    let to = resolver.parse_value("opacity", &RawValue::from(1.0)).unwrap();

    assert_eq!(resolver.animate(&mut node, "opacity", &from, &to, 0.5), Ok(true));
    let used = resolver.get_used_value(&mut node, "opacity", &cx).unwrap();
    assert_eq!(used.as_f64(), Some(0.5));

    // Overshooting easing is clamped by the calculator only.
    resolver
        .animate(&mut node, "opacity", &from, &to, 1.3)
        .unwrap();
    assert_eq!(
        resolver.get_computed_value(&node, "opacity").unwrap().as_f64(),
        Some(1.3)
    );
    let used = resolver.get_used_value(&mut node, "opacity", &cx).unwrap();
    assert_eq!(used.as_f64(), Some(1.0));

    assert_eq!(resolver.clear_animation(&mut node, "opacity"), Ok(true));
    let used = resolver.get_used_value(&mut node, "opacity", &cx).unwrap();
    assert_eq!(used.as_f64(), Some(0.2));
    assert_eq!(resolver.clear_animation(&mut node, "opacity"), Ok(false));
}

#[test]
fn interpolation_endpoints_and_unit_mismatch() {
    let registry = PropertyRegistry::with_builtins();
    let resolver = Resolver::new(&registry);
    let a = resolver.parse_value("width", &RawValue::from("5")).unwrap();
    let b = resolver.parse_value("width", &RawValue::from("15")).unwrap();

    assert_eq!(resolver.mix("width", &a, &b, 0.0), Ok(a.clone()));
    assert_eq!(resolver.mix("width", &a, &b, 1.0), Ok(b.clone()));
    assert_eq!(resolver.mix("width", &a, &b, 0.5), Ok(px(10.0)));

    let percent = resolver.parse_value("width", &RawValue::from("5%")).unwrap();
    assert!(matches!(
        resolver.mix("width", &a, &percent, 0.5),
        Err(StyleError::Mix {
            source: MixError::IncompatibleUnits { .. },
            ..
        })
    ));

    let points = |text: &str| {
        resolver
            .parse_value("points", &RawValue::from(text))
            .unwrap()
    };
    assert!(matches!(
        resolver.mix("points", &points("0,0 1,1"), &points("0,0"), 0.5),
        Err(StyleError::Mix {
            source: MixError::ArityMismatch { from: 2, to: 1 },
            ..
        })
    ));
}

#[test]
fn transform_used_value_is_a_matrix() {
    let registry = PropertyRegistry::with_builtins();
    let resolver = Resolver::new(&registry);
    let mut node = Node::new(0, None);
    let cx = CalcContext::new(Size::new(40.0, 20.0));

    resolver
        .set_property(&mut node, "transform", "translateX(50%) rotate(90deg)")
        .unwrap();
    assert!(node.dirty.contains(DirtyFlags::BOUNDS));
    let Ok(ComputedValue::Matrix(matrix)) = resolver.get_used_value(&mut node, "transform", &cx)
    else {
        panic!("transform should calculate to a matrix");
    };
    let expected = Affine::translate((20.0, 0.0)) * Affine::rotate(90_f64.to_radians());
    let delta = matrix
        .as_coeffs()
        .iter()
        .zip(expected.as_coeffs())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    assert!(delta < 1e-9, "{matrix:?} != {expected:?}");
}

#[test]
fn unknown_names_are_not_found_when_never_set() {
    let registry = PropertyRegistry::with_builtins();
    let resolver = Resolver::new(&registry);
    let mut node = Node::new(0, None);

    assert_eq!(
        resolver.get_computed_value(&node, "data-missing"),
        Err(StyleError::NotFound("data-missing".into()))
    );
    assert!(matches!(
        resolver.animate(&mut node, "data-missing", &px(0.0), &px(1.0), 0.5),
        Err(StyleError::NotFound(_))
    ));
    assert_eq!(resolver.clear_property(&mut node, "data-missing"), Ok(false));
}
