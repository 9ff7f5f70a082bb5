// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary-format tests for the dimension parser.
//!
//! These pin the raw input formats that callers rely on: numbers, suffixed
//! strings, whitespace shorthands, and arrays.

use canopy_unit::{
    MixError, ParseError, RawItem, RawValue, Unit, UnitValue, parse_box_shorthand,
    parse_dimension_array, parse_single_dimension,
};

#[test]
fn number_input_uses_default_unit() {
    let value = parse_single_dimension(&RawValue::from(42), Unit::Px).unwrap();
    assert_eq!(value, UnitValue::px(42.0));

    let value = parse_single_dimension(&RawValue::from(0.5), Unit::Number).unwrap();
    assert_eq!(value, UnitValue::number(0.5));
}

#[test]
fn string_suffix_decides_unit() {
    let units: Vec<_> = ["1", "1px", "1%", "1deg", "1rad", "1grad", "1turn"]
        .into_iter()
        .map(|s| parse_single_dimension(&RawValue::from(s), Unit::Number).unwrap().unit())
        .collect();
    assert_eq!(
        units,
        [
            Unit::Number,
            Unit::Px,
            Unit::Percent,
            Unit::Deg,
            Unit::Rad,
            Unit::Grad,
            Unit::Turn
        ]
    );
}

#[test]
fn radius_shorthand_ordering() {
    let expect = |input: &str, corners: [f64; 4]| {
        let parsed = parse_box_shorthand(&RawValue::from(input), Unit::Px).unwrap();
        assert_eq!(parsed.map(UnitValue::magnitude), corners, "{input}");
        assert!(parsed.iter().all(|v| v.unit() == Unit::Px));
    };
    expect("10", [10.0, 10.0, 10.0, 10.0]);
    expect("10 20", [10.0, 20.0, 10.0, 20.0]);
    expect("10 20 30", [10.0, 20.0, 30.0, 20.0]);
    expect("10 20 30 40", [10.0, 20.0, 30.0, 40.0]);

    assert!(matches!(
        parse_box_shorthand(&RawValue::from("10 20 30 40 50"), Unit::Px),
        Err(ParseError::Arity { found: 5, .. })
    ));
}

#[test]
fn arrays_are_parsed_element_wise_without_expansion() {
    let raw = RawValue::List(vec![RawItem::from(1), RawItem::from("2%"), RawItem::from(3)]);
    let values = parse_dimension_array(&raw, Unit::Px).unwrap();
    assert_eq!(
        values.as_slice(),
        &[UnitValue::px(1.0), UnitValue::percent(2.0), UnitValue::px(3.0)]
    );
}

#[test]
fn comma_decimal_is_not_accepted() {
    assert!(parse_single_dimension(&RawValue::from("1,5px"), Unit::Px).is_err());
}

#[test]
fn mixing_never_converts_units() {
    let deg = UnitValue::deg(90.0);
    let turn = UnitValue::new(0.25, Unit::Turn).unwrap();
    assert_eq!(
        deg.mix(turn, 0.5),
        Err(MixError::IncompatibleUnits {
            from: Unit::Deg,
            to: Unit::Turn
        })
    );
}

#[cfg(feature = "serde")]
#[test]
fn raw_values_deserialize_untagged() {
    let raw: RawValue = serde_json::from_str("10").unwrap();
    assert_eq!(raw, RawValue::Number(10.0));

    let raw: RawValue = serde_json::from_str("\"10 20\"").unwrap();
    assert_eq!(raw, RawValue::from("10 20"));

    let raw: RawValue = serde_json::from_str("[10, \"20%\"]").unwrap();
    assert_eq!(
        raw,
        RawValue::List(vec![RawItem::Number(10.0), RawItem::from("20%")])
    );
}
