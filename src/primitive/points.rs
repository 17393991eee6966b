//! Point-marker symbolizer translation.
//!
//! Markers carry a fill and an outline, each with its own color, opacity,
//! and width, plus a collision toggle. The renderer has no dynamic form of
//! the collision flag, so `allow-overlap` is forced static and inverted.

use crate::descriptor::DrawGroup;
use crate::resolve::Resolver;
use crate::value::{PropertyValue, Value};

pub(crate) fn draw(resolver: &Resolver<'_>) -> DrawGroup {
    let widths = DrawGroup::new()
        .with("size", resolver.property("size"))
        .with_nested("outline", "width", resolver.property("outline.width"));

    let colors = DrawGroup::new()
        .with("color", resolver.color("color", "alpha"))
        .with_nested(
            "outline",
            "color",
            resolver.color("outline.color", "outline.alpha"),
        );

    let mut marker = widths.merge(colors);
    marker.put(
        "collide",
        PropertyValue::Literal(Value::Bool(!resolver.flag("collide"))),
    );
    marker
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::primitive::Primitive;
    use crate::reference::ReferenceRegistry;
    use crate::sheet::{StyleSheet, Symbolizer};
    use crate::value::EvalContext;

    fn draw_marker(symbolizer: Symbolizer) -> DrawGroup {
        let sheet = StyleSheet::new().with_symbolizer("markers", symbolizer);
        let registry = ReferenceRegistry::builtin();
        let context = registry.context(Primitive::Point).unwrap();
        draw(&Resolver::new(&sheet, context))
    }

    #[test]
    fn test_fill_and_outline() {
        let body = draw_marker(
            Symbolizer::new()
                .set("fill", "#ff0000")
                .set("fill-opacity", 0.5)
                .set("width", 10.0)
                .set("stroke", "#000000")
                .set("stroke-opacity", 0.8)
                .set("stroke-width", 2.0),
        );
        assert_eq!(
            body.evaluate(&EvalContext::default()),
            serde_json::json!({
                "collide": true,
                "color": [1.0, 0.0, 0.0, 0.5],
                "outline": { "color": [0.0, 0.0, 0.0, 0.8], "width": 2 },
                "size": 10
            })
        );
    }

    #[test]
    fn test_outline_omitted_without_stroke() {
        let body = draw_marker(Symbolizer::new().set("fill", "#ff0000"));
        assert!(body.group("outline").is_none());
    }

    #[test]
    fn test_outline_groups_union_across_partials() {
        // Width comes from the widths partial, color from the colors
        // partial; the merge must keep both.
        let body = draw_marker(
            Symbolizer::new()
                .set("stroke", "#123456")
                .set("stroke-width", 1.5),
        );
        let outline = body.group("outline").unwrap();
        assert!(outline.property("width").is_some());
        assert!(outline.property("color").is_some());
    }

    #[test]
    fn test_collide_inverts_allow_overlap() {
        let overlapping = draw_marker(Symbolizer::new().set("allow-overlap", true));
        assert_eq!(
            overlapping.property("collide").unwrap().as_literal(),
            Some(&Value::Bool(false))
        );

        // allow-overlap defaults to false, so markers collide by default.
        let default = draw_marker(Symbolizer::new());
        assert_eq!(
            default.property("collide").unwrap().as_literal(),
            Some(&Value::Bool(true))
        );
    }

    #[test]
    fn test_fill_opacity_falls_back_to_opacity() {
        let body = draw_marker(Symbolizer::new().set("fill", "#ff0000").set("opacity", 0.25));
        let color = body
            .property("color")
            .unwrap()
            .evaluate(&EvalContext::default());
        assert_eq!(color, Value::Color(Rgba::new(255, 0, 0, 0.25)));
    }
}
