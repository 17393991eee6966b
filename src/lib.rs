//! Compiled CartoCSS to renderer draw/style descriptor translation.
//!
//! `stipple` takes a compiled cartographic style sheet — symbolizer
//! declarations whose property values may be literals or functions of the
//! rendering context — and synthesizes the per-primitive `draw` and `style`
//! descriptors a Tangram-style vector-tile renderer consumes. Dots and
//! point markers are covered; each kind has its own property wiring,
//! defaults, and alias fallbacks, supplied by a per-kind reference table.
//!
//! Descriptors never carry null-valued keys: a property that resolves to
//! nothing (no sheet value, no alias, no registry default) is omitted.
//! Dynamic values are carried through composition unevaluated, so a
//! zoom-dependent fill stays zoom-dependent in the output.
//!
//! # Example
//!
//! ```rust
//! use stipple::{draw, style, EvalContext, Primitive, StyleSheet, Symbolizer};
//!
//! let sheet = StyleSheet::new().with_symbolizer(
//!     "dot",
//!     Symbolizer::new()
//!         .set("fill", "#ff0000")
//!         .set("opacity", 0.5)
//!         .set("width", 4.0),
//! );
//!
//! let draw = draw(&sheet, Primitive::Dot, 7).unwrap();
//! assert_eq!(
//!     draw.evaluate(&EvalContext::default()),
//!     serde_json::json!({ "dots_7": { "color": [1.0, 0.0, 0.0, 0.5], "size": 4 } })
//! );
//!
//! let style = style(&sheet, Primitive::Dot, 7, None).unwrap();
//! assert_eq!(style.layer().blend_order, 1);
//! ```

mod color;
mod descriptor;
mod error;
mod primitive;
mod reference;
mod resolve;
mod sheet;
mod translate;
mod value;

pub use color::Rgba;
pub use descriptor::{
    BlendMode, DrawDescriptor, DrawField, DrawGroup, LayerStyle, StyleDescriptor,
};
pub use error::Error;
pub use primitive::Primitive;
pub use reference::{FieldSpec, ReferenceContext, ReferenceRegistry};
pub use resolve::Resolver;
pub use sheet::{StyleSheet, Symbolizer};
pub use translate::{draw, style, Translator};
pub use value::{DynFn, EvalContext, PropertyValue, Value};
