//! Compiled style sheets and the symbolizer type guard.
//!
//! A [`StyleSheet`] is the output of an upstream style-sheet compiler: per
//! selector, zero or more symbolizer declarations, each mapping property
//! names to literal or dynamic values. This crate only reads it.

use std::collections::HashMap;

use crate::error::Error;
use crate::primitive::Primitive;
use crate::value::{PropertyValue, Value};

/// One symbolizer declaration: a property name → value mapping.
#[derive(Debug, Clone, Default)]
pub struct Symbolizer {
    properties: HashMap<String, PropertyValue>,
}

impl Symbolizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, returning the symbolizer for chaining.
    ///
    /// Accepts literals (`bool`, numbers, strings, colors) and
    /// [`DynFn`](crate::DynFn) dynamic values alike.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Looks up a property by its style-sheet name.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// A compiled style sheet: symbolizer name → declaration.
///
/// # Example
///
/// ```rust
/// use stipple::{Primitive, StyleSheet, Symbolizer};
///
/// let sheet = StyleSheet::new().with_symbolizer(
///     "dot",
///     Symbolizer::new().set("fill", "#ff0000").set("width", 4.0),
/// );
/// assert!(sheet.has_symbolizer(Primitive::Dot));
/// assert!(!sheet.has_symbolizer(Primitive::Point));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    symbolizers: HashMap<String, Symbolizer>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a symbolizer declaration, returning the sheet for chaining.
    ///
    /// Declarations for symbolizer names this crate does not translate are
    /// allowed; the type guard simply never reports them.
    pub fn with_symbolizer(mut self, name: impl Into<String>, symbolizer: Symbolizer) -> Self {
        self.symbolizers.insert(name.into(), symbolizer);
        self
    }

    /// Decodes a literal-only sheet from compiler JSON output.
    ///
    /// The expected shape is symbolizer name → property name → scalar value,
    /// e.g. `{"dot": {"fill": "#ff0000", "width": 4}}`. Dynamic values cannot
    /// be expressed in JSON; attach them with
    /// [`Symbolizer::set`] instead.
    pub fn from_json(input: &str) -> Result<Self, Error> {
        let decls: HashMap<String, HashMap<String, Value>> =
            serde_json::from_str(input).map_err(|e| Error::malformed("style sheet", e))?;

        let mut sheet = StyleSheet::new();
        for (name, properties) in decls {
            let mut symbolizer = Symbolizer::new();
            for (property, value) in properties {
                symbolizer = symbolizer.set(property, value);
            }
            sheet = sheet.with_symbolizer(name, symbolizer);
        }
        Ok(sheet)
    }

    /// Looks up a symbolizer declaration by name.
    pub fn symbolizer(&self, name: &str) -> Option<&Symbolizer> {
        self.symbolizers.get(name)
    }

    /// Whether the sheet declares a symbolizer of the given kind.
    ///
    /// Pure predicate: missing or unrelated declarations yield `false`,
    /// never an error.
    pub fn has_symbolizer(&self, kind: Primitive) -> bool {
        self.symbolizers.contains_key(kind.symbolizer())
    }
}
