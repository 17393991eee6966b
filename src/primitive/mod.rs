//! Primitive kinds and their draw synthesis wiring.
//!
//! Each kind maps a fixed set of style-sheet properties onto its draw
//! descriptor fields; the wiring lives in one module per kind.

mod dots;
mod points;

use std::fmt;

use crate::descriptor::DrawGroup;
use crate::reference::ReferenceContext;
use crate::resolve::Resolver;
use crate::sheet::StyleSheet;

/// The primitive kinds this crate translates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// A screen-space dot.
    Dot,
    /// A point marker with an optional outline.
    Point,
}

impl Primitive {
    pub const ALL: [Primitive; 2] = [Primitive::Dot, Primitive::Point];

    /// The symbolizer name this kind reads from the style sheet.
    pub fn symbolizer(self) -> &'static str {
        match self {
            Primitive::Dot => "dot",
            Primitive::Point => "markers",
        }
    }

    /// The renderer layer name used in descriptor keys and `base`.
    pub fn layer(self) -> &'static str {
        match self {
            Primitive::Dot => "dots",
            Primitive::Point => "points",
        }
    }

    /// The kind for a symbolizer name, if this crate translates it.
    pub fn from_symbolizer(name: &str) -> Option<Self> {
        Primitive::ALL.into_iter().find(|k| k.symbolizer() == name)
    }

    /// Whether this kind derives its blend mode from the sheet's composite
    /// operation. Other kinds always layer with the default blend.
    pub(crate) fn derives_blend(self) -> bool {
        matches!(self, Primitive::Point)
    }

    /// Builds the draw body for a sheet known to declare this symbolizer.
    pub(crate) fn draw_body(self, sheet: &StyleSheet, context: &ReferenceContext) -> DrawGroup {
        let resolver = Resolver::new(sheet, context);
        match self {
            Primitive::Dot => dots::draw(&resolver),
            Primitive::Point => points::draw(&resolver),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbolizer())
    }
}
