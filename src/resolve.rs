//! Field resolution: literals, aliases, defaults, and forced evaluation.
//!
//! A [`Resolver`] borrows a style sheet and the reference context for one
//! primitive kind and answers, per output field, where its value comes from:
//! the primary property, an alias, the registry default, or nowhere (absent).

use log::trace;

use crate::descriptor::BlendMode;
use crate::reference::ReferenceContext;
use crate::sheet::{StyleSheet, Symbolizer};
use crate::value::{DynFn, EvalContext, PropertyValue, Value};

/// Resolves output fields for one (sheet, kind) pair.
pub struct Resolver<'a> {
    sheet: &'a StyleSheet,
    context: &'a ReferenceContext,
}

impl<'a> Resolver<'a> {
    pub fn new(sheet: &'a StyleSheet, context: &'a ReferenceContext) -> Self {
        Resolver { sheet, context }
    }

    fn symbolizer(&self) -> Option<&Symbolizer> {
        self.sheet.symbolizer(self.context.kind().symbolizer())
    }

    /// Resolves an output field to a literal or dynamic value.
    ///
    /// Lookup order: primary property, aliases in declared order, registry
    /// default. Dynamic values pass through unevaluated. `None` means the
    /// field is absent and must not appear in the output descriptor.
    pub fn property(&self, field: &str) -> Option<PropertyValue> {
        let spec = self.context.spec(field)?;

        if let Some(symbolizer) = self.symbolizer() {
            if let Some(value) = symbolizer.get(spec.css()) {
                trace!("{field}: from `{}`", spec.css());
                return Some(value.clone());
            }
            for alias in spec.aliases() {
                if let Some(value) = symbolizer.get(alias) {
                    trace!("{field}: from alias `{alias}`");
                    return Some(value.clone());
                }
            }
        }

        let default = spec.default()?;
        trace!("{field}: registry default");
        Some(PropertyValue::Literal(default.clone()))
    }

    /// Resolves a color field and an opacity field, folding the opacity into
    /// the color's alpha channel.
    ///
    /// An absent color makes the result absent regardless of opacity; an
    /// absent opacity leaves the color at full strength. If either side is
    /// dynamic, the fold is deferred to evaluation time.
    pub fn color(&self, color_field: &str, alpha_field: &str) -> Option<PropertyValue> {
        let color = self.property(color_field)?;
        match self.property(alpha_field) {
            Some(alpha) => Some(compose(color, alpha)),
            None => Some(color),
        }
    }

    /// Resolves a field and forces it to a concrete value, evaluating
    /// dynamic arms against the neutral context.
    pub fn value(&self, field: &str) -> Option<Value> {
        self.property(field)
            .map(|p| p.evaluate(&EvalContext::default()))
    }

    /// Forced-static boolean toggle. Absent resolves to `false`.
    pub fn flag(&self, field: &str) -> bool {
        self.value(field).map(|v| v.as_flag()).unwrap_or(false)
    }

    /// The blend mode derived from the sheet's composite operation, or
    /// [`BlendMode::Overlay`] when absent or unrecognized.
    pub fn blend(&self) -> BlendMode {
        self.value("blend")
            .and_then(|v| v.as_str().and_then(BlendMode::from_comp_op))
            .unwrap_or_default()
    }
}

/// Folds an opacity value into a color value.
///
/// Literal × literal folds eagerly; any dynamic operand produces a dynamic
/// result that re-folds per evaluation.
fn compose(color: PropertyValue, alpha: PropertyValue) -> PropertyValue {
    match (color, alpha) {
        (PropertyValue::Literal(color), PropertyValue::Literal(alpha)) => {
            PropertyValue::Literal(fold(color, &alpha))
        }
        (color, alpha) => PropertyValue::Dynamic(DynFn::new(move |ctx| {
            fold(color.evaluate(ctx), &alpha.evaluate(ctx))
        })),
    }
}

fn fold(color: Value, alpha: &Value) -> Value {
    let factor = alpha.as_number().unwrap_or(1.0);
    match color.to_color() {
        Some(rgba) => Value::Color(rgba.scale_alpha(factor)),
        // Not a color this crate can read; hand it to the renderer as-is.
        None => color,
    }
}
