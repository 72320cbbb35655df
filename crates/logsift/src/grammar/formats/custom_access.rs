use crate::grammar::formats::TIMESTAMPS;
use crate::grammar::model::{FieldValue, Format, Record};
use crate::grammar::Grammar;
use once_cell::sync::Lazy;
use regex::Regex;

/// Pre-check: a bracketed `DD/Mon/YYYY` date somewhere in the line.
static BRACKET_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\d{2}/[A-Za-z]+/\d{4}").unwrap());

/// Full matcher for grep-style extracted access logs:
/// `file:offset:client_ip, proxy_ip - - [ts] "METHOD url HTTP/x" status size "referer" "ua" code`
static LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?P<source_file>.+?):(?P<byte_offset>\d+):(?P<client_ip>[\d.]+), (?P<proxy_ip>[\d.]+) - - \[(?P<timestamp>.*?)\] "(?P<method>GET|POST|PUT|DELETE|HEAD|OPTIONS) (?P<url>.*?) (?P<protocol>HTTP/[\d.]+)" (?P<status>\d{3}) (?P<response_size>\d+|-) "(?P<referer>.*?)" "(?P<user_agent>.*?)" (?P<custom_code>\d+)"#,
    )
    .unwrap()
});

/// Access logs as they arrive from evidence collection: each line is
/// prefixed with the originating file and byte offset, the client sits
/// behind a proxy, and a trailing application code follows the agent.
pub struct CustomAccessGrammar;

impl Grammar for CustomAccessGrammar {
    fn format(&self) -> Format {
        Format::CustomAccess
    }

    fn matches(&self, line: &str) -> bool {
        line.contains(',') && BRACKET_DATE.is_match(line)
    }

    fn extract(&self, line: &str, line_no: usize) -> Option<Record> {
        let caps = LINE.captures(line.trim())?;
        let mut rec = Record::new(Format::CustomAccess, line_no);

        let text = |name: &str| caps.name(name).map(|m| m.as_str().to_string());
        let int = |name: &str| {
            caps.name(name)
                .and_then(|m| m.as_str().parse::<i64>().ok())
        };

        rec.push("source_file", FieldValue::Text(text("source_file")?));
        rec.push("byte_offset", FieldValue::Int(int("byte_offset")?));
        rec.push("client_ip", FieldValue::Text(text("client_ip")?));
        rec.push("proxy_ip", FieldValue::Text(text("proxy_ip")?));

        // Typed when the bracketed stamp parses, raw text otherwise; a
        // bad stamp never discards an otherwise matching line.
        let raw_ts = text("timestamp")?;
        match TIMESTAMPS.parse_line(&raw_ts) {
            Ok(ts) => rec.push("timestamp", FieldValue::Time(ts)),
            Err(_) => rec.push("timestamp", FieldValue::Text(raw_ts)),
        }

        rec.push("method", FieldValue::Text(text("method")?));
        rec.push("url", FieldValue::Text(text("url")?));
        rec.push("protocol", FieldValue::Text(text("protocol")?));
        rec.push("status", FieldValue::Int(int("status")?));

        // "-" means the response had no body; keep the sentinel.
        let size = caps.name("response_size")?.as_str();
        match size.parse::<i64>() {
            Ok(n) => rec.push("response_size", FieldValue::Int(n)),
            Err(_) => rec.push("response_size", FieldValue::Text(size.to_string())),
        }

        rec.push("referer", FieldValue::Text(text("referer")?));
        rec.push("user_agent", FieldValue::Text(text("user_agent")?));
        rec.push("custom_code", FieldValue::Int(int("custom_code")?));

        Some(rec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"access.log.3:48213:203.0.113.7, 10.1.2.3 - - [12/Mar/2024:10:15:02 +0000] "GET /mail/inbox?id=9 HTTP/1.1" 200 5123 "https://portal.example/login" "Mozilla/5.0 (X11; Linux x86_64)" 1042"#;

    #[test]
    fn test_matches_sample() {
        assert!(CustomAccessGrammar.matches(SAMPLE));
        assert!(!CustomAccessGrammar.matches("plain text, no bracket date"));
    }

    #[test]
    fn test_extract_all_declared_fields() {
        let rec = CustomAccessGrammar.extract(SAMPLE, 3).unwrap();
        assert_eq!(rec.format, Format::CustomAccess);
        assert_eq!(rec.line_no, 3);
        assert_eq!(rec.text("source_file"), Some("access.log.3"));
        assert_eq!(rec.int("byte_offset"), Some(48213));
        assert_eq!(rec.text("client_ip"), Some("203.0.113.7"));
        assert_eq!(rec.text("proxy_ip"), Some("10.1.2.3"));
        assert!(rec.time("timestamp").is_some());
        assert_eq!(rec.text("method"), Some("GET"));
        assert_eq!(rec.text("url"), Some("/mail/inbox?id=9"));
        assert_eq!(rec.text("protocol"), Some("HTTP/1.1"));
        assert_eq!(rec.int("status"), Some(200));
        assert_eq!(rec.int("response_size"), Some(5123));
        assert_eq!(rec.text("referer"), Some("https://portal.example/login"));
        assert_eq!(rec.int("custom_code"), Some(1042));
    }

    #[test]
    fn test_extract_no_body_sentinel() {
        let line = SAMPLE.replace(" 200 5123 ", " 304 - ");
        let rec = CustomAccessGrammar.extract(&line, 1).unwrap();
        assert_eq!(rec.int("status"), Some(304));
        assert_eq!(rec.text("response_size"), Some("-"));
    }

    #[test]
    fn test_extract_is_all_or_nothing() {
        // Trailing custom code missing: no partial record.
        let truncated = SAMPLE.rsplit_once(' ').unwrap().0;
        assert!(CustomAccessGrammar.extract(truncated, 1).is_none());
    }
}
