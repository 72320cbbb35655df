use crate::grammar::formats::TIMESTAMPS;
use crate::grammar::model::{FieldValue, Format, Record};
use crate::grammar::Grammar;
use once_cell::sync::Lazy;
use regex::Regex;

/// Application SOAP traces:
/// `2024-03-01 10:15:02,123 INFO  ... soap - SearchRequest ...`
static LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2},\d{3}).*soap - (?P<request_type>\w+Request)")
        .unwrap()
});

pub struct SoapTraceGrammar;

impl Grammar for SoapTraceGrammar {
    fn format(&self) -> Format {
        Format::SoapTrace
    }

    fn matches(&self, line: &str) -> bool {
        line.contains("soap - ")
    }

    fn extract(&self, line: &str, line_no: usize) -> Option<Record> {
        let caps = LINE.captures(line)?;

        // Skip lines whose stamp has impossible digit groups, same as
        // dropping a record the original tooling could not date.
        let ts = TIMESTAMPS.parse_line(caps.get(1)?.as_str()).ok()?;

        let mut rec = Record::new(Format::SoapTrace, line_no);
        rec.push("timestamp", FieldValue::Time(ts));
        rec.push(
            "request_type",
            FieldValue::Text(caps["request_type"].to_string()),
        );
        Some(rec)
    }
}
