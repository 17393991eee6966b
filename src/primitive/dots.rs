//! Dot symbolizer translation.
//!
//! Dots are the simplest kind: a fill color with opacity folded in, and an
//! optional size. No outline, no collision control.

use crate::descriptor::DrawGroup;
use crate::resolve::Resolver;

pub(crate) fn draw(resolver: &Resolver<'_>) -> DrawGroup {
    let widths = DrawGroup::new().with("size", resolver.property("size"));
    let colors = DrawGroup::new().with("color", resolver.color("color", "alpha"));
    widths.merge(colors)
}
