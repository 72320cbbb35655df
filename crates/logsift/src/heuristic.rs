//! Delimiter-sniffing fallback for streams no grammar claimed.
//!
//! The delimiter (and therefore the implied field count) is derived
//! from the **first** line only. Later lines with a different shape are
//! dropped when they split into fewer than 2 parts, or yield misaligned
//! positional fields when they split into more. That gap is the
//! documented contract of this extractor, not something it papers over.

use crate::conf::AnalyzerConfig;
use crate::grammar::model::{ExtractError, FieldValue, Format, Record};

/// Choose a delimiter by probing the sample line against the configured
/// priority list. No whitespace fallback is attempted; a line with none
/// of the known delimiters fails sniffing outright.
pub fn sniff_delimiter(
    sample_line: &str,
    delimiters: &[char],
) -> Result<char, ExtractError> {
    delimiters
        .iter()
        .copied()
        .find(|d| sample_line.contains(*d))
        .ok_or(ExtractError::NoDelimiterFound)
}

/// Split every line on the sniffed delimiter into positional
/// `field_1..field_k` records. Returns an empty sequence when the first
/// line has no known delimiter; lines splitting into fewer than 2 parts
/// are dropped as unparsable.
pub fn infer_records(lines: &[String], config: &AnalyzerConfig) -> Vec<Record> {
    let Some(first) = lines.first() else {
        return Vec::new();
    };

    let delimiter = match sniff_delimiter(first, &config.delimiters) {
        Ok(d) => d,
        Err(err) => {
            tracing::debug!(%err, "heuristic extraction yields nothing");
            return Vec::new();
        }
    };
    tracing::debug!(?delimiter, "sniffed delimiter from first sample line");

    let mut records = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let parts: Vec<&str> = line.trim().split(delimiter).collect();
        if parts.len() < 2 {
            continue;
        }

        let mut rec = Record::new(Format::Unknown, idx + 1);
        for (i, part) in parts.iter().enumerate() {
            rec.push(
                format!("field_{}", i + 1),
                FieldValue::Text(part.trim().to_string()),
            );
        }
        records.push(rec);
    }

    records
}
