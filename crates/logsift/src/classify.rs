//! Format classification over a small sample window.
//!
//! Adjacent lines in one stream are assumed homogeneous, so a grammar
//! only wins when **every** sampled line passes its pre-check; unanimity
//! avoids false positives from one coincidentally matching line in a
//! window this small. Ties go to registry priority order.

use crate::conf::AnalyzerConfig;
use crate::grammar::{registry, ExtractError, Format};

/// Classify a stream from its first `classify_sample_size` lines.
///
/// An empty stream classifies as [`Format::Unknown`] without error.
pub fn classify(lines: &[String], config: &AnalyzerConfig) -> Format {
    let sample_len = lines.len().min(config.classify_sample_size);
    let sample = &lines[..sample_len];

    if sample.is_empty() {
        tracing::debug!("empty stream, classifying as Unknown");
        return Format::Unknown;
    }

    for grammar in registry() {
        if sample.iter().all(|line| grammar.matches(line)) {
            tracing::debug!(
                format = grammar.format().as_str(),
                sample_len,
                "classified stream"
            );
            return grammar.format();
        }
    }

    tracing::debug!(
        sample_len,
        err = %ExtractError::UnclassifiableFormat,
        "falling back to heuristic extraction"
    );
    Format::Unknown
}
