//! The translation facade: compiled sheet in, descriptors out.

use std::fmt;

use log::debug;
use once_cell::sync::Lazy;

use crate::descriptor::{BlendMode, DrawDescriptor, DrawGroup, LayerStyle, StyleDescriptor};
use crate::error::Error;
use crate::primitive::Primitive;
use crate::reference::ReferenceRegistry;
use crate::resolve::Resolver;
use crate::sheet::StyleSheet;

/// Translates compiled style sheets into draw and style descriptors.
///
/// A translator owns its reference data. [`Translator::new`] uses the
/// builtin tables; [`Translator::with_registry`] accepts replacement data
/// loaded elsewhere. For one-off calls the free [`draw`](crate::draw) and
/// [`style`](crate::style) functions share a process-wide instance.
#[derive(Debug, Clone)]
pub struct Translator {
    registry: ReferenceRegistry,
}

impl Translator {
    /// A translator over the builtin reference tables.
    pub fn new() -> Self {
        Translator {
            registry: ReferenceRegistry::builtin(),
        }
    }

    /// A translator over custom reference data.
    pub fn with_registry(registry: ReferenceRegistry) -> Self {
        Translator { registry }
    }

    pub fn registry(&self) -> &ReferenceRegistry {
        &self.registry
    }

    /// Builds the draw descriptor for one primitive instance.
    ///
    /// A sheet without the kind's symbolizer yields a descriptor with an
    /// empty body — the key is still present so the instance participates
    /// in the scene.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownKind`] if the reference data has no entry for `kind`.
    pub fn draw(
        &self,
        sheet: &StyleSheet,
        kind: Primitive,
        id: impl fmt::Display,
    ) -> Result<DrawDescriptor, Error> {
        let context = self.registry.context(kind)?;
        let key = descriptor_key(kind, id);

        let body = if sheet.has_symbolizer(kind) {
            kind.draw_body(sheet, context)
        } else {
            debug!("{key}: no {kind} symbolizer, empty draw");
            DrawGroup::new()
        };

        Ok(DrawDescriptor::new(key, body))
    }

    /// Builds the style descriptor for one primitive instance.
    ///
    /// Always fully populated: `base` is the kind's layer name, `blend`
    /// defaults to overlay, and `blend_order` defaults to 1 when `order` is
    /// `None`. Point markers with a symbolizer present derive their blend
    /// mode from the sheet's composite operation instead.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownKind`] if the reference data has no entry for `kind`.
    pub fn style(
        &self,
        sheet: &StyleSheet,
        kind: Primitive,
        id: impl fmt::Display,
        order: Option<i32>,
    ) -> Result<StyleDescriptor, Error> {
        let context = self.registry.context(kind)?;

        let mut layer = LayerStyle {
            base: kind.layer(),
            blend: BlendMode::default(),
            blend_order: order.unwrap_or(1),
        };
        if kind.derives_blend() && sheet.has_symbolizer(kind) {
            layer.blend = Resolver::new(sheet, context).blend();
        }

        Ok(StyleDescriptor::new(descriptor_key(kind, id), layer))
    }
}

impl Default for Translator {
    fn default() -> Self {
        Translator::new()
    }
}

fn descriptor_key(kind: Primitive, id: impl fmt::Display) -> String {
    format!("{}_{}", kind.layer(), id)
}

static DEFAULT: Lazy<Translator> = Lazy::new(Translator::new);

/// Builds a draw descriptor using the builtin reference tables.
///
/// See [`Translator::draw`].
pub fn draw(
    sheet: &StyleSheet,
    kind: Primitive,
    id: impl fmt::Display,
) -> Result<DrawDescriptor, Error> {
    DEFAULT.draw(sheet, kind, id)
}

/// Builds a style descriptor using the builtin reference tables.
///
/// See [`Translator::style`].
pub fn style(
    sheet: &StyleSheet,
    kind: Primitive,
    id: impl fmt::Display,
    order: Option<i32>,
) -> Result<StyleDescriptor, Error> {
    DEFAULT.style(sheet, kind, id, order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Symbolizer;

    #[test]
    fn test_draw_key_accepts_numeric_and_string_ids() {
        let sheet = StyleSheet::new();
        assert_eq!(draw(&sheet, Primitive::Dot, 7).unwrap().key(), "dots_7");
        assert_eq!(
            draw(&sheet, Primitive::Point, "a").unwrap().key(),
            "points_a"
        );
    }

    #[test]
    fn test_style_defaults_blend_order_to_one() {
        let sheet = StyleSheet::new();
        let descriptor = style(&sheet, Primitive::Dot, 7, None).unwrap();
        assert_eq!(descriptor.layer().blend_order, 1);
        assert_eq!(descriptor.layer().base, "dots");
        assert_eq!(descriptor.layer().blend, BlendMode::Overlay);
    }

    #[test]
    fn test_style_respects_explicit_order() {
        let sheet = StyleSheet::new();
        let descriptor = style(&sheet, Primitive::Point, "a", Some(3)).unwrap();
        assert_eq!(descriptor.layer().blend_order, 3);
    }

    #[test]
    fn test_dot_never_derives_blend() {
        // Even with a comp-op declared, dots keep the default blend.
        let sheet = StyleSheet::new()
            .with_symbolizer("dot", Symbolizer::new().set("comp-op", "multiply"));
        let descriptor = style(&sheet, Primitive::Dot, 1, None).unwrap();
        assert_eq!(descriptor.layer().blend, BlendMode::Overlay);
    }

    #[test]
    fn test_marker_derives_blend_from_comp_op() {
        let sheet = StyleSheet::new()
            .with_symbolizer("markers", Symbolizer::new().set("comp-op", "multiply"));
        let descriptor = style(&sheet, Primitive::Point, 1, None).unwrap();
        assert_eq!(descriptor.layer().blend, BlendMode::Multiply);
    }

    #[test]
    fn test_custom_registry_misses_are_reported() {
        let translator = Translator::with_registry(
            ReferenceRegistry::from_json(r#"{"dot": {"size": {"css": "width"}}}"#).unwrap(),
        );
        let sheet = StyleSheet::new();
        assert!(translator.draw(&sheet, Primitive::Dot, 1).is_ok());
        assert!(matches!(
            translator.draw(&sheet, Primitive::Point, 1),
            Err(Error::UnknownKind(Primitive::Point))
        ));
        assert!(matches!(
            translator.style(&sheet, Primitive::Point, 1, None),
            Err(Error::UnknownKind(Primitive::Point))
        ));
    }
}
