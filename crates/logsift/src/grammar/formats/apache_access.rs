use crate::grammar::formats::TIMESTAMPS;
use crate::grammar::model::{FieldValue, Format, Record};
use crate::grammar::Grammar;
use once_cell::sync::Lazy;
use regex::Regex;

/// Common access log:
/// `ip - - [ts] "METHOD url HTTP/x" status size`
static LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?P<client_ip>\d+\.\d+\.\d+\.\d+)\s-\s-\s\[(?P<timestamp>[^\]]+)\]\s"(?P<method>\w+)\s(?P<url>\S+)\s(?P<protocol>HTTP/[\d.]+)"\s(?P<status>\d+)\s(?P<size>\d+)"#,
    )
    .unwrap()
});

pub struct ApacheAccessGrammar;

impl Grammar for ApacheAccessGrammar {
    fn format(&self) -> Format {
        Format::ApacheAccess
    }

    fn matches(&self, line: &str) -> bool {
        line.contains('"') && line.contains("HTTP/")
    }

    fn extract(&self, line: &str, line_no: usize) -> Option<Record> {
        let caps = LINE.captures(line)?;
        let mut rec = Record::new(Format::ApacheAccess, line_no);

        rec.push(
            "client_ip",
            FieldValue::Text(caps["client_ip"].to_string()),
        );

        let raw_ts = &caps["timestamp"];
        match TIMESTAMPS.parse_line(raw_ts) {
            Ok(ts) => rec.push("timestamp", FieldValue::Time(ts)),
            Err(_) => rec.push("timestamp", FieldValue::Text(raw_ts.to_string())),
        }

        rec.push("method", FieldValue::Text(caps["method"].to_string()));
        rec.push("url", FieldValue::Text(caps["url"].to_string()));
        rec.push("protocol", FieldValue::Text(caps["protocol"].to_string()));
        rec.push("status", FieldValue::Int(caps["status"].parse().ok()?));
        rec.push("size", FieldValue::Int(caps["size"].parse().ok()?));

        Some(rec)
    }
}
