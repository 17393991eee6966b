//! Style values and the literal/dynamic split.
//!
//! A compiled style sheet may carry a property either as a plain literal or
//! as a function of the rendering context (zoom level, feature attributes).
//! [`PropertyValue`] keeps that distinction intact through resolution so that
//! dynamic values reach the output descriptor unevaluated.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use crate::color::Rgba;

/// A concrete style value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Number(f64),
    String(String),
    Color(Rgba),
}

impl Value {
    /// Numeric reading of this value, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// String reading of this value, if it has one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean coercion used for forced-static toggles.
    ///
    /// Booleans read as themselves, numbers as "non-zero", and the strings
    /// `"true"`/`"yes"` as true. Everything else is false.
    pub fn as_flag(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => matches!(s.as_str(), "true" | "yes"),
            Value::Color(_) => false,
        }
    }

    /// Color reading of this value: either a color proper or a string in one
    /// of the supported color notations.
    pub fn to_color(&self) -> Option<Rgba> {
        match self {
            Value::Color(c) => Some(*c),
            Value::String(s) => Rgba::parse(s),
            _ => None,
        }
    }

    /// Converts into renderer-ready JSON.
    ///
    /// Whole numbers are emitted as integers; colors as `[r, g, b, a]`
    /// unit-range float arrays.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => number_to_json(*n),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Color(c) => serde_json::json!(c.to_unit_array()),
        }
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9e15 {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Value::from(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Rgba> for Value {
    fn from(c: Rgba) -> Self {
        Value::Color(c)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a boolean, number, or string")
            }

            fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
                Ok(Value::Bool(b))
            }

            fn visit_i64<E: de::Error>(self, n: i64) -> Result<Value, E> {
                Ok(Value::Number(n as f64))
            }

            fn visit_u64<E: de::Error>(self, n: u64) -> Result<Value, E> {
                Ok(Value::Number(n as f64))
            }

            fn visit_f64<E: de::Error>(self, n: f64) -> Result<Value, E> {
                Ok(Value::Number(n))
            }

            fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
                Ok(Value::String(s.to_string()))
            }

            fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
                Ok(Value::String(s))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Context a dynamic property is evaluated against.
///
/// `Default` is the neutral context: zoom 0 and no feature attributes. It is
/// what forced-static evaluation uses when a toggle turns out to be dynamic.
#[derive(Debug, Clone, Default)]
pub struct EvalContext {
    pub zoom: f64,
    pub feature: HashMap<String, Value>,
}

impl EvalContext {
    /// A context at the given zoom level with no feature attributes.
    pub fn at_zoom(zoom: f64) -> Self {
        EvalContext {
            zoom,
            feature: HashMap::new(),
        }
    }

    /// Adds a feature attribute, returning the context for chaining.
    pub fn with_feature(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.feature.insert(name.into(), value.into());
        self
    }
}

/// A shared, thread-safe dynamic property function.
#[derive(Clone)]
pub struct DynFn(Arc<dyn Fn(&EvalContext) -> Value + Send + Sync>);

impl DynFn {
    pub fn new(f: impl Fn(&EvalContext) -> Value + Send + Sync + 'static) -> Self {
        DynFn(Arc::new(f))
    }

    pub fn call(&self, ctx: &EvalContext) -> Value {
        (self.0)(ctx)
    }
}

impl fmt::Debug for DynFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DynFn")
    }
}

/// A resolved style property: a literal, or a function of the rendering
/// context that is carried through composition unevaluated.
#[derive(Debug, Clone)]
pub enum PropertyValue {
    Literal(Value),
    Dynamic(DynFn),
}

impl PropertyValue {
    /// Shorthand for a literal property.
    pub fn literal(value: impl Into<Value>) -> Self {
        PropertyValue::Literal(value.into())
    }

    /// Shorthand for a dynamic property.
    pub fn dynamic(f: impl Fn(&EvalContext) -> Value + Send + Sync + 'static) -> Self {
        PropertyValue::Dynamic(DynFn::new(f))
    }

    /// Forces either arm down to a concrete value.
    pub fn evaluate(&self, ctx: &EvalContext) -> Value {
        match self {
            PropertyValue::Literal(v) => v.clone(),
            PropertyValue::Dynamic(f) => f.call(ctx),
        }
    }

    /// The literal value, if this property is not dynamic.
    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            PropertyValue::Literal(v) => Some(v),
            PropertyValue::Dynamic(_) => None,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, PropertyValue::Dynamic(_))
    }
}

impl From<Value> for PropertyValue {
    fn from(v: Value) -> Self {
        PropertyValue::Literal(v)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Literal(Value::Bool(b))
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        PropertyValue::Literal(Value::Number(n))
    }
}

impl From<i32> for PropertyValue {
    fn from(n: i32) -> Self {
        PropertyValue::Literal(Value::Number(n as f64))
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Literal(Value::String(s.to_string()))
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Literal(Value::String(s))
    }
}

impl From<Rgba> for PropertyValue {
    fn from(c: Rgba) -> Self {
        PropertyValue::Literal(Value::Color(c))
    }
}

impl From<DynFn> for PropertyValue {
    fn from(f: DynFn) -> Self {
        PropertyValue::Dynamic(f)
    }
}
