// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for the dimension parser and the canonical syntax parsers.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use canopy_property::PropertyRegistry;
use canopy_unit::{RawValue, Unit, parse_box_shorthand, parse_single_dimension};

fn bench_dimensions(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse/dimension");

    let number = RawValue::from(10.0);
    group.bench_function("number", |b| {
        b.iter(|| black_box(parse_single_dimension(black_box(&number), Unit::Px)))
    });

    let text = RawValue::from("12.5px");
    group.bench_function("suffixed_text", |b| {
        b.iter(|| black_box(parse_single_dimension(black_box(&text), Unit::Px)))
    });

    for input in ["10", "10 20", "10 20 30", "10px 20% 30 40px"] {
        let raw = RawValue::from(input);
        group.bench_with_input(BenchmarkId::new("box_shorthand", input), &raw, |b, raw| {
            b.iter(|| black_box(parse_box_shorthand(black_box(raw), Unit::Px)))
        });
    }

    group.finish();
}

fn bench_syntaxes(c: &mut Criterion) {
    let registry = PropertyRegistry::with_builtins();
    let mut group = c.benchmark_group("parse/syntax");

    for (name, input) in [
        ("width", "50%"),
        ("radius", "4 8"),
        ("fill", "rgba(255, 99, 71, 0.5)"),
        ("lineCap", "round"),
        ("points", "0,0 10,0 10,10 0,10"),
        ("path", "M0 0 C10 0 10 10 20 10 Z"),
        ("transform", "translate(10, 20) rotate(45deg) scale(2)"),
        ("transformOrigin", "left top"),
    ] {
        let Ok(def) = registry.lookup(name) else {
            continue;
        };
        let raw = RawValue::from(input);
        group.bench_with_input(BenchmarkId::from_parameter(name), &raw, |b, raw| {
            b.iter(|| black_box(def.parse(black_box(raw))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dimensions, bench_syntaxes);
criterion_main!(benches);
