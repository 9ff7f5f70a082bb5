// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `canopy_style` resolution and mixing.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::sync::Once;

use canopy_property::{CalcContext, DirtyFlags, PropertyRegistry};
use canopy_style::{Resolver, StyleNode, StyleStore};
use canopy_unit::RawValue;
use kurbo::Size;

#[derive(Clone)]
struct Elem {
    key: u32,
    parent: Option<u32>,
    store: StyleStore<u32>,
    dirty: DirtyFlags,
}

impl Elem {
    fn new(key: u32, parent: Option<u32>) -> Self {
        Self {
            key,
            parent,
            store: StyleStore::new(key),
            dirty: DirtyFlags::empty(),
        }
    }
}

impl StyleNode<u32> for Elem {
    fn style_store(&self) -> &StyleStore<u32> {
        &self.store
    }

    fn style_store_mut(&mut self) -> &mut StyleStore<u32> {
        &mut self.store
    }

    fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    fn key(&self) -> u32 {
        self.key
    }

    fn parent_key(&self) -> Option<u32> {
        self.parent
    }
}

fn bench_style(c: &mut Criterion) {
    static PRINT_SIZES: Once = Once::new();
    PRINT_SIZES.call_once(|| {
        eprintln!(
            "sizes: StyleStore<u32>={} Elem={} ComputedValue={}",
            core::mem::size_of::<StyleStore<u32>>(),
            core::mem::size_of::<Elem>(),
            core::mem::size_of::<canopy_property::ComputedValue>(),
        );
    });

    let registry = PropertyRegistry::with_builtins();
    let resolver = Resolver::new(&registry);
    let cx = CalcContext::new(Size::new(400.0, 300.0));

    // A small inheritance chain: 0 <- 1 <- ... <- N-1
    let chain_len: u32 = 16;
    let mut nodes: Vec<Elem> = (0..chain_len)
        .map(|i| Elem::new(i, if i == 0 { None } else { Some(i - 1) }))
        .collect();
    let _ = resolver.set_property(&mut nodes[0], "fontSize", 20);
    let leaf = &nodes[(chain_len - 1) as usize];

    let mut group = c.benchmark_group("style/resolve");

    group.bench_function("computed/local", |b| {
        let mut element = Elem::new(1, None);
        let _ = resolver.set_property(&mut element, "width", 100);
        b.iter(|| black_box(resolver.get_computed_value(&element, "width").is_ok()))
    });

    group.bench_function("computed/initial", |b| {
        let element = Elem::new(1, None);
        b.iter(|| black_box(resolver.get_computed_value(&element, "width").is_ok()))
    });

    group.bench_function("used/cached", |b| {
        let mut element = Elem::new(1, None);
        let _ = resolver.set_property(&mut element, "width", "50%");
        let _ = resolver.get_used_value(&mut element, "width", &cx);
        b.iter(|| black_box(resolver.get_used_value(&mut element, "width", &cx).is_ok()))
    });

    group.bench_function("used/recalculated", |b| {
        let mut element = Elem::new(1, None);
        let _ = resolver.set_property(&mut element, "transform", "translate(50%, 10) rotate(30)");
        b.iter(|| {
            resolver.invalidate_used(&mut element);
            black_box(resolver.get_used_value(&mut element, "transform", &cx).is_ok())
        })
    });

    group.bench_function(BenchmarkId::new("inherited", chain_len), |b| {
        let lookup = |key: u32| {
            nodes
                .get(key as usize)
                .map(|e| (e.style_store(), e.parent_key()))
        };
        b.iter(|| black_box(resolver.get_inherited_value(leaf, "fontSize", &lookup).is_ok()))
    });

    group.finish();

    let mut group = c.benchmark_group("style/mutate");

    group.bench_function("set_property/length", |b| {
        b.iter_batched(
            || Elem::new(1, None),
            |mut element| {
                black_box(resolver.set_property(&mut element, "width", "10px").is_ok());
                black_box(element);
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("set_property/shorthand", |b| {
        b.iter_batched(
            || Elem::new(1, None),
            |mut element| {
                black_box(resolver.set_property(&mut element, "shadowOffset", "4 8").is_ok());
                black_box(element);
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("set_property/unchanged", |b| {
        let mut element = Elem::new(1, None);
        let _ = resolver.set_property(&mut element, "width", "10px");
        b.iter(|| black_box(resolver.set_property(&mut element, "width", "10px").is_ok()))
    });

    group.bench_function("set_property/pass_through", |b| {
        b.iter_batched(
            || Elem::new(1, None),
            |mut element| {
                let raw = RawValue::from("custom");
                black_box(resolver.set_property(&mut element, "data-custom", raw).is_ok());
                black_box(element);
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();

    let mut group = c.benchmark_group("style/mix");

    for (name, from, to) in [
        ("width", "0", "100"),
        ("radius", "0", "4 8 12 16"),
        ("fill", "red", "blue"),
        ("points", "0,0 10,0 10,10", "5,5 15,5 15,15"),
        ("transform", "rotate(0) scale(1)", "rotate(90) scale(2)"),
    ] {
        let (Ok(from), Ok(to)) = (
            resolver.parse_value(name, &RawValue::from(from)),
            resolver.parse_value(name, &RawValue::from(to)),
        ) else {
            continue;
        };
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter(|| black_box(resolver.mix(name, &from, &to, black_box(0.5)).is_ok()))
        });
    }

    group.bench_function("animate/width", |b| {
        let mut element = Elem::new(1, None);
        let from = resolver.parse_value("width", &RawValue::from(0));
        let to = resolver.parse_value("width", &RawValue::from(100));
        let (Ok(from), Ok(to)) = (from, to) else {
            return;
        };
        let mut ratio = 0.0;
        b.iter(|| {
            ratio = (ratio + 0.01) % 1.0;
            black_box(
                resolver
                    .animate(&mut element, "width", &from, &to, ratio)
                    .is_ok(),
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_style);
criterion_main!(benches);
