//! Error types for reference lookups and data loading.

use thiserror::Error;

use crate::primitive::Primitive;

/// Errors surfaced to callers.
///
/// Only structurally invalid requests are reported: asking for a primitive
/// kind the reference data does not cover, or feeding undecodable data to a
/// loader. Resolution failures for individual properties never error — the
/// affected field is simply omitted from the output descriptor.
#[derive(Debug, Error)]
pub enum Error {
    /// The reference registry has no entry for the requested primitive kind.
    #[error("no reference entry for `{0}` symbolizers")]
    UnknownKind(Primitive),

    /// Reference data contained a symbolizer name this crate does not handle.
    #[error("unrecognized symbolizer `{0}` in reference data")]
    UnrecognizedSymbolizer(String),

    /// JSON input could not be decoded into the expected shape.
    #[error("malformed {what}: {source}")]
    Malformed {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn malformed(what: &'static str, source: serde_json::Error) -> Self {
        Error::Malformed { what, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Primitive;

    #[test]
    fn test_unknown_kind_display() {
        let err = Error::UnknownKind(Primitive::Point);
        assert_eq!(err.to_string(), "no reference entry for `markers` symbolizers");
    }

    #[test]
    fn test_unrecognized_symbolizer_display() {
        let err = Error::UnrecognizedSymbolizer("polygon".to_string());
        assert!(err.to_string().contains("polygon"));
    }
}
