use crate::grammar::model::{FieldValue, Format, Record};
use crate::grammar::Grammar;

/// key=value token logs (logfmt-style). Values may be double-quoted to
/// carry spaces, with `\"` and `\\` escapes inside; surrounding quotes
/// are stripped. Tokens without `=` or with an empty key are skipped.
pub struct KeyValueGrammar;

impl Grammar for KeyValueGrammar {
    fn format(&self) -> Format {
        Format::KeyValue
    }

    fn matches(&self, line: &str) -> bool {
        line.contains('=')
    }

    fn extract(&self, line: &str, line_no: usize) -> Option<Record> {
        let mut rec = Record::new(Format::KeyValue, line_no);

        for (key, value) in scan_pairs(line) {
            rec.push(key, FieldValue::Text(value));
        }

        if rec.is_empty() {
            return None;
        }
        Some(rec)
    }
}

/// Scan `key=value` pairs left to right. A value opening with `"` runs
/// to the closing quote and may contain spaces; an unterminated quote
/// runs to end of line. Bare keys without `=` are skipped.
fn scan_pairs(line: &str) -> impl Iterator<Item = (String, String)> + '_ {
    let mut chars = line.chars().peekable();

    std::iter::from_fn(move || loop {
        while chars.peek().map_or(false, |c| c.is_whitespace()) {
            chars.next();
        }
        chars.peek()?;

        let mut key = String::new();
        while let Some(&c) = chars.peek() {
            if c == '=' || c.is_whitespace() {
                break;
            }
            key.push(c);
            chars.next();
        }

        if chars.peek() != Some(&'=') {
            // Bare word, not a pair.
            continue;
        }
        chars.next();

        if key.is_empty() {
            continue;
        }

        let mut value = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            let mut escaped = false;
            for c in chars.by_ref() {
                if escaped {
                    value.push(c);
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    break;
                } else {
                    value.push(c);
                }
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                value.push(c);
                chars.next();
            }
        }

        return Some((key, value));
    })
}
