//! Draw and style descriptors, and the recursive merge between partials.
//!
//! Draw bodies are nested string-keyed trees. Absent fields are never
//! inserted, so no descriptor ever carries a null-valued key; a group that
//! would end up empty (an outline with neither color nor width) is omitted
//! entirely.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::value::{EvalContext, PropertyValue};

/// One field inside a draw body: a resolved property or a nested group.
#[derive(Debug, Clone)]
pub enum DrawField {
    Property(PropertyValue),
    Group(DrawGroup),
}

/// A nested key → field tree, the body of one draw descriptor.
#[derive(Debug, Clone, Default)]
pub struct DrawGroup {
    fields: BTreeMap<String, DrawField>,
}

impl DrawGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resolved field, returning the group for chaining.
    ///
    /// `None` (an absent resolution) is discarded — this is where the
    /// key-omission guarantee is enforced.
    pub fn with(mut self, name: &str, value: Option<PropertyValue>) -> Self {
        if let Some(value) = value {
            self.fields.insert(name.to_string(), DrawField::Property(value));
        }
        self
    }

    /// Adds a resolved field inside a nested group, creating the group on
    /// first use. Absent resolutions leave the tree untouched — no empty
    /// group is created for them.
    pub fn with_nested(mut self, group: &str, name: &str, value: Option<PropertyValue>) -> Self {
        let Some(value) = value else {
            return self;
        };
        let entry = self
            .fields
            .entry(group.to_string())
            .or_insert_with(|| DrawField::Group(DrawGroup::new()));
        if let DrawField::Group(inner) = entry {
            inner.fields.insert(name.to_string(), DrawField::Property(value));
        }
        self
    }

    /// Sets a concrete field in place (used for post-processing flags).
    pub fn put(&mut self, name: &str, value: PropertyValue) {
        self.fields.insert(name.to_string(), DrawField::Property(value));
    }

    /// Merges another group into this one.
    ///
    /// Precedence: per leaf key, the right side wins; where both sides hold
    /// a group under the same key, the groups union recursively instead of
    /// one replacing the other.
    pub fn merge(mut self, other: DrawGroup) -> DrawGroup {
        for (key, field) in other.fields {
            match (self.fields.remove(&key), field) {
                (Some(DrawField::Group(left)), DrawField::Group(right)) => {
                    self.fields.insert(key, DrawField::Group(left.merge(right)));
                }
                (_, field) => {
                    self.fields.insert(key, field);
                }
            }
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&DrawField> {
        self.fields.get(name)
    }

    /// The resolved property under `name`, if it is a leaf.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        match self.fields.get(name)? {
            DrawField::Property(value) => Some(value),
            DrawField::Group(_) => None,
        }
    }

    /// The nested group under `name`, if there is one.
    pub fn group(&self, name: &str) -> Option<&DrawGroup> {
        match self.fields.get(name)? {
            DrawField::Group(group) => Some(group),
            DrawField::Property(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the top-level field names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }

    /// Forces every field (dynamic ones against `ctx`) into renderer-ready
    /// JSON.
    pub fn evaluate(&self, ctx: &EvalContext) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        for (key, field) in &self.fields {
            let value = match field {
                DrawField::Property(p) => p.evaluate(ctx).to_json(),
                DrawField::Group(g) => g.evaluate(ctx),
            };
            object.insert(key.clone(), value);
        }
        serde_json::Value::Object(object)
    }
}

/// The draw descriptor for one primitive instance: a single
/// `<layer>_<id>` key over a [`DrawGroup`] body.
#[derive(Debug, Clone)]
pub struct DrawDescriptor {
    key: String,
    body: DrawGroup,
}

impl DrawDescriptor {
    pub(crate) fn new(key: String, body: DrawGroup) -> Self {
        DrawDescriptor { key, body }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn body(&self) -> &DrawGroup {
        &self.body
    }

    /// The `{ "<layer>_<id>": { ... } }` object, with dynamic fields forced
    /// against `ctx`.
    pub fn evaluate(&self, ctx: &EvalContext) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        object.insert(self.key.clone(), self.body.evaluate(ctx));
        serde_json::Value::Object(object)
    }
}

/// How a layer composites over the scene beneath it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    #[default]
    Overlay,
    Add,
    Multiply,
    Inlay,
    Opaque,
    Translucent,
}

impl BlendMode {
    /// Maps a style-sheet composite operation onto a blend mode.
    ///
    /// Operations without a renderer counterpart map to `None`; callers fall
    /// back to [`BlendMode::Overlay`].
    pub fn from_comp_op(op: &str) -> Option<Self> {
        match op {
            "src-over" => Some(BlendMode::Overlay),
            "plus" | "add" => Some(BlendMode::Add),
            "multiply" => Some(BlendMode::Multiply),
            "dst-over" => Some(BlendMode::Inlay),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlendMode::Overlay => "overlay",
            BlendMode::Add => "add",
            BlendMode::Multiply => "multiply",
            BlendMode::Inlay => "inlay",
            BlendMode::Opaque => "opaque",
            BlendMode::Translucent => "translucent",
        }
    }
}

/// Layering metadata for one primitive instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayerStyle {
    pub base: &'static str,
    pub blend: BlendMode,
    pub blend_order: i32,
}

/// The style descriptor for one primitive instance: a single
/// `<layer>_<id>` key over a [`LayerStyle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDescriptor {
    key: String,
    layer: LayerStyle,
}

impl StyleDescriptor {
    pub(crate) fn new(key: String, layer: LayerStyle) -> Self {
        StyleDescriptor { key, layer }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn layer(&self) -> &LayerStyle {
        &self.layer
    }
}

impl Serialize for StyleDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.layer)?;
        map.end()
    }
}
