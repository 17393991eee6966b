//! Per-kind reference data: output fields, property names, aliases, defaults.
//!
//! The registry is the only long-lived state in the crate. It is populated
//! once (the builtin tables, or replacement data via [`ReferenceRegistry::from_json`])
//! and read for every resolution afterwards; there is no mutation API.

use std::collections::HashMap;

use serde::Deserialize;

use crate::color::Rgba;
use crate::error::Error;
use crate::primitive::Primitive;
use crate::value::Value;

/// How one output field is sourced from the style sheet.
///
/// `css` is the primary property name; `aliases` are consulted in declared
/// order when the primary is absent; `default` (if any) stands in when
/// neither is present. A field with no default and no sheet value resolves
/// to absent and is omitted from output.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldSpec {
    css: String,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    default: Option<Value>,
}

impl FieldSpec {
    pub fn new(css: impl Into<String>) -> Self {
        FieldSpec {
            css: css.into(),
            aliases: Vec::new(),
            default: None,
        }
    }

    /// Appends a fallback property name. Order of calls is significant.
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.aliases.push(name.into());
        self
    }

    /// Sets the registry default for this field.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// The reference data for one primitive kind: output field name → [`FieldSpec`].
#[derive(Debug, Clone)]
pub struct ReferenceContext {
    kind: Primitive,
    fields: HashMap<String, FieldSpec>,
}

impl ReferenceContext {
    pub fn new(kind: Primitive) -> Self {
        ReferenceContext {
            kind,
            fields: HashMap::new(),
        }
    }

    /// Adds a field, returning the context for chaining.
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.insert(name.into(), spec);
        self
    }

    /// Looks up the spec for an output field name.
    pub fn spec(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    pub fn kind(&self) -> Primitive {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Reference contexts for every supported primitive kind.
#[derive(Debug, Clone)]
pub struct ReferenceRegistry {
    contexts: HashMap<Primitive, ReferenceContext>,
}

impl ReferenceRegistry {
    /// An empty registry, for assembling custom reference data.
    pub fn empty() -> Self {
        ReferenceRegistry {
            contexts: HashMap::new(),
        }
    }

    /// The stock dot and point-marker tables.
    pub fn builtin() -> Self {
        ReferenceRegistry::empty()
            .with_context(dot_context())
            .with_context(point_context())
    }

    /// Adds a context, returning the registry for chaining.
    pub fn with_context(mut self, context: ReferenceContext) -> Self {
        self.contexts.insert(context.kind(), context);
        self
    }

    /// Looks up the context for a primitive kind.
    ///
    /// Unlike individual property lookups, a missing kind is a caller error
    /// and never silently defaults.
    pub fn context(&self, kind: Primitive) -> Result<&ReferenceContext, Error> {
        self.contexts.get(&kind).ok_or(Error::UnknownKind(kind))
    }

    /// Loads replacement reference data from JSON.
    ///
    /// The expected shape is symbolizer name → field name → spec, e.g.
    ///
    /// ```json
    /// {
    ///   "dot": {
    ///     "color": { "css": "fill", "default": "#a8a8a8" },
    ///     "size":  { "css": "width" }
    ///   }
    /// }
    /// ```
    ///
    /// Symbolizer names this crate does not translate are rejected with
    /// [`Error::UnrecognizedSymbolizer`].
    pub fn from_json(input: &str) -> Result<Self, Error> {
        let data: HashMap<String, HashMap<String, FieldSpec>> =
            serde_json::from_str(input).map_err(|e| Error::malformed("reference data", e))?;

        let mut registry = ReferenceRegistry::empty();
        for (name, fields) in data {
            let kind = Primitive::from_symbolizer(&name)
                .ok_or_else(|| Error::UnrecognizedSymbolizer(name.clone()))?;
            let mut context = ReferenceContext::new(kind);
            for (field, spec) in fields {
                context = context.field(field, spec);
            }
            registry = registry.with_context(context);
        }
        Ok(registry)
    }
}

impl Default for ReferenceRegistry {
    fn default() -> Self {
        ReferenceRegistry::builtin()
    }
}

fn dot_context() -> ReferenceContext {
    ReferenceContext::new(Primitive::Dot)
        .field(
            "color",
            FieldSpec::new("fill").default_value(Rgba::rgb(168, 168, 168)),
        )
        .field("alpha", FieldSpec::new("opacity").default_value(1.0))
        .field("size", FieldSpec::new("width"))
}

fn point_context() -> ReferenceContext {
    ReferenceContext::new(Primitive::Point)
        .field(
            "color",
            FieldSpec::new("fill").default_value(Rgba::rgb(0, 0, 255)),
        )
        .field(
            "alpha",
            FieldSpec::new("fill-opacity")
                .alias("opacity")
                .default_value(1.0),
        )
        .field("size", FieldSpec::new("width"))
        .field("outline.color", FieldSpec::new("stroke"))
        .field(
            "outline.alpha",
            FieldSpec::new("stroke-opacity")
                .alias("opacity")
                .default_value(1.0),
        )
        .field("outline.width", FieldSpec::new("stroke-width"))
        .field(
            "collide",
            FieldSpec::new("allow-overlap").default_value(false),
        )
        .field("blend", FieldSpec::new("comp-op"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_every_kind() {
        let registry = ReferenceRegistry::builtin();
        for kind in Primitive::ALL {
            assert!(registry.context(kind).is_ok());
        }
    }

    #[test]
    fn test_builtin_dot_fields() {
        let registry = ReferenceRegistry::builtin();
        let dot = registry.context(Primitive::Dot).unwrap();
        assert_eq!(dot.spec("color").unwrap().css(), "fill");
        assert_eq!(
            dot.spec("color").unwrap().default(),
            Some(&Value::Color(Rgba::rgb(168, 168, 168)))
        );
        // Size has no default: an unsized dot stays unsized.
        assert!(dot.spec("size").unwrap().default().is_none());
        assert!(dot.spec("collide").is_none());
    }

    #[test]
    fn test_builtin_marker_alias_order() {
        let registry = ReferenceRegistry::builtin();
        let point = registry.context(Primitive::Point).unwrap();
        let alpha = point.spec("alpha").unwrap();
        assert_eq!(alpha.css(), "fill-opacity");
        assert_eq!(alpha.aliases(), ["opacity"]);
    }

    #[test]
    fn test_missing_kind_is_an_error() {
        let registry = ReferenceRegistry::empty().with_context(dot_context());
        assert!(registry.context(Primitive::Dot).is_ok());
        assert!(matches!(
            registry.context(Primitive::Point),
            Err(Error::UnknownKind(Primitive::Point))
        ));
    }

    #[test]
    fn test_from_json_builds_contexts() {
        let registry = ReferenceRegistry::from_json(
            r##"{
                "dot": {
                    "color": { "css": "fill", "default": "#123456" },
                    "size": { "css": "width" }
                },
                "markers": {
                    "alpha": { "css": "fill-opacity", "aliases": ["opacity"], "default": 1 }
                }
            }"##,
        )
        .unwrap();

        let dot = registry.context(Primitive::Dot).unwrap();
        assert_eq!(
            dot.spec("color").unwrap().default(),
            Some(&Value::String("#123456".to_string()))
        );
        let point = registry.context(Primitive::Point).unwrap();
        assert_eq!(point.spec("alpha").unwrap().aliases(), ["opacity"]);
    }

    #[test]
    fn test_from_json_rejects_unknown_symbolizer() {
        let result = ReferenceRegistry::from_json(r#"{"polygon": {}}"#);
        assert!(matches!(
            result,
            Err(Error::UnrecognizedSymbolizer(name)) if name == "polygon"
        ));
    }

    #[test]
    fn test_from_json_rejects_bad_shape() {
        assert!(matches!(
            ReferenceRegistry::from_json("[]"),
            Err(Error::Malformed { .. })
        ));
    }
}
