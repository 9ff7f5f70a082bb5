// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The built-in scene-graph properties.
//!
//! [`PropertyRegistry::with_builtins`] registers:
//!
//! - geometry (affects bounds): `cx cy r rx ry x y width height x1 y1 x2 y2`,
//!   `radius`, `points`, `path` (alias `d`)
//! - stroke and fill: `fill stroke opacity fillOpacity strokeOpacity lineWidth
//!   lineDash lineDashOffset lineCap lineJoin miterLimit`
//! - shadow: `shadowColor shadowBlur shadowOffsetX shadowOffsetY`, shorthand
//!   `shadowOffset`
//! - transform: `transform transformOrigin`
//! - text (inherited): `text fontFamily fontSize letterSpacing lineHeight
//!   fontStyle fontWeight textAlign textBaseline textTransform`
//! - image: `src`
//! - misc: `visibility pointerEvents` (inherited), `zIndex`

use alloc::string::String;

use canopy_unit::UnitValue;

use crate::context::{DEFAULT_FONT_SIZE, PercentBasis};
use crate::definition::PropertyDefinitionBuilder;
use crate::dirty::DirtyFlags;
use crate::registry::PropertyRegistry;
use crate::syntax::PropertySyntax;
use crate::value::ComputedValue;

/// Keywords of `lineCap`.
pub const LINE_CAP: &[&str] = &["butt", "round", "square"];
/// Keywords of `lineJoin`.
pub const LINE_JOIN: &[&str] = &["miter", "round", "bevel"];
/// Keywords of `fontStyle`.
pub const FONT_STYLE: &[&str] = &["normal", "italic", "oblique"];
/// Keywords of `fontWeight`.
pub const FONT_WEIGHT: &[&str] = &[
    "normal", "bold", "bolder", "lighter", "100", "200", "300", "400", "500", "600", "700", "800",
    "900",
];
/// Keywords of `textAlign`.
pub const TEXT_ALIGN: &[&str] = &["start", "center", "end", "left", "right"];
/// Keywords of `textBaseline`.
pub const TEXT_BASELINE: &[&str] = &[
    "alphabetic",
    "top",
    "hanging",
    "middle",
    "ideographic",
    "bottom",
];
/// Keywords of `textTransform`.
pub const TEXT_TRANSFORM: &[&str] = &["none", "capitalize", "uppercase", "lowercase"];
/// Keywords of `visibility`.
pub const VISIBILITY: &[&str] = &["visible", "hidden"];
/// Keywords of `pointerEvents`.
pub const POINTER_EVENTS: &[&str] = &[
    "auto",
    "none",
    "visiblePainted",
    "visibleFill",
    "visibleStroke",
    "visible",
    "painted",
    "fill",
    "stroke",
    "all",
];

const WIDTH_LENGTHS: &[&str] = &["x", "cx", "x1", "x2", "width", "rx"];
const HEIGHT_LENGTHS: &[&str] = &["y", "cy", "y1", "y2", "height", "ry"];

fn geometry(name: &'static str, syntax: PropertySyntax) -> PropertyDefinitionBuilder {
    PropertyDefinitionBuilder::new(name, syntax).affects(DirtyFlags::BOUNDS)
}

fn keyword(name: &'static str, keywords: &'static [&'static str]) -> PropertyDefinitionBuilder {
    PropertyDefinitionBuilder::new(name, PropertySyntax::Keyword).keywords(keywords)
}

/// Registers the built-in set into `registry`.
///
/// # Panics
///
/// Panics if any built-in name is already registered.
pub fn register_builtins(registry: &mut PropertyRegistry) {
    use PropertySyntax as S;

    // Geometry.
    for &name in WIDTH_LENGTHS {
        registry.register(
            geometry(name, S::LengthPercentage)
                .basis(PercentBasis::Width)
                .build(),
        );
    }
    for &name in HEIGHT_LENGTHS {
        registry.register(
            geometry(name, S::LengthPercentage)
                .basis(PercentBasis::Height)
                .build(),
        );
    }
    registry.register(
        geometry("r", S::LengthPercentage)
            .basis(PercentBasis::Diagonal)
            .build(),
    );
    registry.register(
        geometry("radius", S::LengthPercentage14)
            .basis(PercentBasis::Diagonal)
            .build(),
    );
    registry.register(geometry("points", S::ListOfPoints).build());
    registry.register(geometry("path", S::Path).build());

    // Stroke and fill.
    registry.register(PropertyDefinitionBuilder::new("fill", S::Paint).build());
    registry.register(PropertyDefinitionBuilder::new("stroke", S::Paint).build());
    for name in ["opacity", "fillOpacity", "strokeOpacity"] {
        registry.register(PropertyDefinitionBuilder::new(name, S::Opacity).build());
    }
    registry.register(
        geometry("lineWidth", S::LengthPercentage)
            .basis(PercentBasis::Diagonal)
            .initial(ComputedValue::Unit(UnitValue::px(1.0)))
            .build(),
    );
    registry.register(PropertyDefinitionBuilder::new("lineDash", S::LengthPercentage12).build());
    registry.register(
        PropertyDefinitionBuilder::new("lineDashOffset", S::LengthPercentage).build(),
    );
    registry.register(keyword("lineCap", LINE_CAP).build());
    registry.register(keyword("lineJoin", LINE_JOIN).build());
    registry.register(
        PropertyDefinitionBuilder::new("miterLimit", S::Number)
            .initial(ComputedValue::Unit(UnitValue::number(10.0)))
            .build(),
    );

    // Shadow.
    registry.register(PropertyDefinitionBuilder::new("shadowColor", S::Color).build());
    registry.register(PropertyDefinitionBuilder::new("shadowBlur", S::ShadowBlur).build());
    registry.register(
        PropertyDefinitionBuilder::new("shadowOffsetX", S::LengthPercentage).build(),
    );
    registry.register(
        PropertyDefinitionBuilder::new("shadowOffsetY", S::LengthPercentage)
            .basis(PercentBasis::Height)
            .build(),
    );

    // Transform.
    registry.register(geometry("transform", S::Transform).build());
    registry.register(geometry("transformOrigin", S::TransformOrigin).build());

    // Text.
    registry.register(geometry("text", S::Text).build());
    registry.register(
        geometry("fontFamily", S::Text)
            .inherits(true)
            .initial(ComputedValue::Text(String::from("sans-serif")))
            .build(),
    );
    registry.register(
        geometry("fontSize", S::LengthPercentage)
            .inherits(true)
            .basis(PercentBasis::FontSize)
            .initial(ComputedValue::Unit(UnitValue::px(DEFAULT_FONT_SIZE)))
            .build(),
    );
    for name in ["letterSpacing", "lineHeight"] {
        registry.register(
            geometry(name, S::LengthPercentage)
                .inherits(true)
                .basis(PercentBasis::FontSize)
                .build(),
        );
    }
    for (name, keywords) in [
        ("fontStyle", FONT_STYLE),
        ("fontWeight", FONT_WEIGHT),
        ("textAlign", TEXT_ALIGN),
        ("textBaseline", TEXT_BASELINE),
        ("textTransform", TEXT_TRANSFORM),
    ] {
        registry.register(
            keyword(name, keywords)
                .inherits(true)
                .affects(DirtyFlags::BOUNDS)
                .build(),
        );
    }

    // Image.
    registry.register(geometry("src", S::Text).build());

    // Misc.
    registry.register(keyword("visibility", VISIBILITY).inherits(true).build());
    registry.register(keyword("pointerEvents", POINTER_EVENTS).inherits(true).build());
    registry.register(PropertyDefinitionBuilder::new("zIndex", S::ZIndex).build());

    if let Err(err) = registry.alias("d", "path") {
        panic!("{err}");
    }
    if let Err(err) = registry.shorthand("shadowOffset", &["shadowOffsetX", "shadowOffsetY"]) {
        panic!("{err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CalcContext;
    use crate::registry::Lookup;
    use canopy_unit::RawValue;
    use kurbo::Size;

    #[test]
    fn builtins_are_registered() {
        let registry = PropertyRegistry::with_builtins();
        for name in [
            "cx", "cy", "r", "rx", "ry", "x", "y", "width", "height", "x1", "y1", "x2", "y2",
            "radius", "points", "path", "fill", "stroke", "opacity", "fillOpacity",
            "strokeOpacity", "lineWidth", "lineDash", "lineDashOffset", "lineCap", "lineJoin",
            "miterLimit", "shadowColor", "shadowBlur", "shadowOffsetX", "shadowOffsetY",
            "transform", "transformOrigin", "text", "fontFamily", "fontSize", "letterSpacing",
            "lineHeight", "fontStyle", "fontWeight", "textAlign", "textBaseline",
            "textTransform", "src", "visibility", "pointerEvents", "zIndex",
        ] {
            assert!(registry.lookup(name).is_ok(), "{name}");
        }
        assert_eq!(registry.lookup("d").unwrap().name(), "path");
        assert!(matches!(
            registry.find("shadowOffset"),
            Some(Lookup::Shorthand(_))
        ));
    }

    #[test]
    fn geometry_affects_bounds() {
        let registry = PropertyRegistry::with_builtins();
        for name in ["cx", "width", "r", "radius", "points", "path", "transform"] {
            let def = registry.lookup(name).unwrap();
            assert!(def.affects().contains(DirtyFlags::BOUNDS), "{name}");
        }
        assert!(!registry.lookup("fill").unwrap().affects().contains(DirtyFlags::BOUNDS));
    }

    #[test]
    fn initial_values() {
        let registry = PropertyRegistry::with_builtins();
        let initial = |name| registry.lookup(name).unwrap().initial().clone();
        assert_eq!(initial("opacity"), ComputedValue::Unit(UnitValue::number(1.0)));
        assert_eq!(initial("miterLimit"), ComputedValue::Unit(UnitValue::number(10.0)));
        assert_eq!(initial("lineCap"), ComputedValue::Keyword("butt"));
        assert_eq!(initial("visibility"), ComputedValue::Keyword("visible"));
        assert_eq!(initial("fontSize"), ComputedValue::Unit(UnitValue::px(16.0)));
        assert_eq!(initial("width"), ComputedValue::Unit(UnitValue::ZERO_PX));
    }

    #[test]
    fn inheritance_flags() {
        let registry = PropertyRegistry::with_builtins();
        for name in ["visibility", "pointerEvents", "fontSize", "fontFamily", "textAlign"] {
            assert!(registry.lookup(name).unwrap().inherits(), "{name}");
        }
        for name in ["fill", "opacity", "width", "transform"] {
            assert!(!registry.lookup(name).unwrap().inherits(), "{name}");
        }
    }

    #[test]
    fn percentage_bases() {
        let registry = PropertyRegistry::with_builtins();
        let cx = CalcContext::new(Size::new(200.0, 100.0)).with_font_size(20.0);
        let used = |name, raw: &str| {
            let def = registry.lookup(name).unwrap();
            let value = def.parse(&RawValue::from(raw)).unwrap();
            def.calculate(&value, &cx).as_f64().unwrap()
        };
        assert_eq!(used("x", "50%"), 100.0);
        assert_eq!(used("height", "50%"), 50.0);
        assert_eq!(used("fontSize", "150%"), 30.0);
        let diagonal = used("r", "100%");
        assert!((diagonal - (50_000.0_f64 / 2.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn keyword_sets() {
        let registry = PropertyRegistry::with_builtins();
        let weight = registry.lookup("fontWeight").unwrap();
        assert_eq!(
            weight.parse(&RawValue::from("700")),
            Ok(ComputedValue::Keyword("700"))
        );
        assert!(weight.parse(&RawValue::from("heavy")).is_err());
        let events = registry.lookup("pointerEvents").unwrap();
        assert_eq!(
            events.parse(&RawValue::from("VISIBLEFILL")),
            Ok(ComputedValue::Keyword("visibleFill"))
        );
    }
}
