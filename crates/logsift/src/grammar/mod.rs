//! Line grammars — named, registry-ordered rules for recognizing and
//! decomposing one log line format.
//!
//! Each grammar declares a cheap [`Grammar::matches`] pre-check used by
//! the classifier and a full [`Grammar::extract`] matcher that either
//! produces every declared field or nothing at all; half-structured
//! records are not modeled. The registry is static and append-only; a
//! new format is added by registering a new implementation, never by
//! branching on format names at call sites.

pub mod formats;
pub mod model;

pub use model::{ExtractError, FieldValue, Format, Record};

use once_cell::sync::Lazy;

pub trait Grammar: Send + Sync {
    fn format(&self) -> Format;

    /// Fast pre-check used by the classifier on sample lines.
    fn matches(&self, line: &str) -> bool;

    /// Full structured match. `None` when the line does not fully match.
    fn extract(&self, line: &str, line_no: usize) -> Option<Record>;
}

/// Priority order matters: narrow grammars first, broad catch-alls
/// (csv, key=value) last. The classifier returns the first grammar all
/// sample lines satisfy.
static REGISTRY: Lazy<Vec<Box<dyn Grammar>>> = Lazy::new(|| {
    vec![
        Box::new(formats::SshAuthGrammar),
        Box::new(formats::SoapTraceGrammar),
        Box::new(formats::CustomAccessGrammar),
        Box::new(formats::ApacheAccessGrammar),
        Box::new(formats::CsvStructuredGrammar),
        Box::new(formats::KeyValueGrammar),
    ]
});

pub fn registry() -> &'static [Box<dyn Grammar>] {
    &REGISTRY
}

/// Look up the registered grammar for a classified format.
/// `Format::Unknown` has no grammar; extraction falls back to the
/// heuristic splitter instead.
pub fn grammar_for(format: Format) -> Option<&'static dyn Grammar> {
    registry()
        .iter()
        .find(|g| g.format() == format)
        .map(|g| g.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order_is_declared_priority() {
        let order: Vec<Format> = registry().iter().map(|g| g.format()).collect();
        assert_eq!(
            order,
            vec![
                Format::SshAuth,
                Format::SoapTrace,
                Format::CustomAccess,
                Format::ApacheAccess,
                Format::CsvStructured,
                Format::KeyValue,
            ]
        );
    }

    #[test]
    fn test_grammar_for_known_formats() {
        for g in registry() {
            let found = grammar_for(g.format()).unwrap();
            assert_eq!(found.format(), g.format());
        }
    }

    #[test]
    fn test_grammar_for_unknown_is_none() {
        assert!(grammar_for(Format::Unknown).is_none());
    }
}
