//! Timestamp scanning — candidate grammars tried in a fixed declared order.
//!
//! Incident logs mix several stamp styles, and a single line can carry
//! more than one (an outer wrapper stamp plus an inner payload stamp).
//! The candidate order below is the contract: the first candidate whose
//! pattern occurs anywhere in the line wins, and a structurally matching
//! stamp with impossible digit groups (month 13, day 32) is reported as
//! [`ExtractError::MalformedTimestamp`] rather than falling through to a
//! later candidate. Both outcomes are recoverable; callers treat the
//! field as absent.

use crate::grammar::model::ExtractError;
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

/// ISO with comma milliseconds: `2024-03-01 10:15:02,123`
static ISO_MILLIS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2},\d{3}").unwrap()
});

/// ISO seconds, space or `T` separated: `2024-03-01T10:15:02`
static ISO_SECONDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2}:\d{2}").unwrap()
});

/// Apache CLF: `01/Mar/2024:10:15:02`
static APACHE_CLF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{2}/[A-Za-z]{3}/\d{4}:\d{2}:\d{2}:\d{2}").unwrap()
});

/// Syslog: `Mar  1 10:15:02` (no year)
static SYSLOG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Z][a-z]{2}\s+\d{1,2} \d{2}:\d{2}:\d{2}").unwrap()
});

/// Syslog stamps carry no year; they are pinned here so that ordering
/// within one capture stays meaningful.
pub const SYSLOG_PINNED_YEAR: i32 = 1970;

struct Candidate {
    name: &'static str,
    finder: &'static Lazy<Regex>,
    chrono_format: &'static str,
    prepare: fn(&str) -> String,
}

fn prepare_verbatim(s: &str) -> String {
    s.to_string()
}

fn prepare_iso(s: &str) -> String {
    s.replace('T', " ")
}

fn prepare_syslog(s: &str) -> String {
    // Collapse the double space in day-of-month < 10 and prepend the
    // pinned year so chrono has a complete date.
    let squeezed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("{} {}", SYSLOG_PINNED_YEAR, squeezed)
}

/// Finds and parses the first recognizable timestamp in a line.
pub struct TimestampParser {
    candidates: Vec<Candidate>,
}

impl TimestampParser {
    pub fn new() -> Self {
        // Declared order, most specific first. ISO_MILLIS must precede
        // ISO_SECONDS: the latter structurally matches a prefix of the
        // former and would silently drop the fraction.
        Self {
            candidates: vec![
                Candidate {
                    name: "iso-millis",
                    finder: &ISO_MILLIS,
                    chrono_format: "%Y-%m-%d %H:%M:%S,%3f",
                    prepare: prepare_verbatim,
                },
                Candidate {
                    name: "iso-seconds",
                    finder: &ISO_SECONDS,
                    chrono_format: "%Y-%m-%d %H:%M:%S",
                    prepare: prepare_iso,
                },
                Candidate {
                    name: "apache-clf",
                    finder: &APACHE_CLF,
                    chrono_format: "%d/%b/%Y:%H:%M:%S",
                    prepare: prepare_verbatim,
                },
                Candidate {
                    name: "syslog",
                    finder: &SYSLOG,
                    chrono_format: "%Y %b %d %H:%M:%S",
                    prepare: prepare_syslog,
                },
            ],
        }
    }

    /// Parse the first timestamp found in `line`.
    pub fn parse_line(&self, line: &str) -> Result<NaiveDateTime, ExtractError> {
        for candidate in &self.candidates {
            if let Some(m) = candidate.finder.find(line) {
                let prepared = (candidate.prepare)(m.as_str());
                return NaiveDateTime::parse_from_str(&prepared, candidate.chrono_format)
                    .map_err(|_| {
                        tracing::debug!(
                            candidate = candidate.name,
                            stamp = m.as_str(),
                            "timestamp matched structurally but has invalid digit groups"
                        );
                        ExtractError::MalformedTimestamp(m.as_str().to_string())
                    });
            }
        }
        Err(ExtractError::NoTimestampFound)
    }
}

impl Default for TimestampParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Pair every line with its first parseable timestamp and sort ascending.
///
/// Lines without a recognizable (or with a malformed) timestamp are
/// dropped. The sort is stable, so equal stamps keep input order, and
/// each payload travels with its own timestamp.
pub fn sort_by_timestamp<'a>(
    parser: &TimestampParser,
    lines: &'a [String],
) -> Vec<(NaiveDateTime, &'a str)> {
    let mut stamped: Vec<(NaiveDateTime, &'a str)> = lines
        .iter()
        .filter_map(|line| {
            parser
                .parse_line(line)
                .ok()
                .map(|ts| (ts, line.as_str()))
        })
        .collect();

    stamped.sort_by_key(|(ts, _)| *ts);
    stamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_parse_iso_millis() {
        let parser = TimestampParser::new();
        let got = parser
            .parse_line("2024-03-01 10:15:02,123 INFO soap - SearchRequest")
            .unwrap();
        assert_eq!(got.date(), ts(2024, 3, 1, 0, 0, 0).date());
        assert_eq!(got.time().second(), 2);
        assert_eq!(got.and_utc().timestamp_subsec_millis(), 123);
    }

    #[test]
    fn test_parse_iso_seconds_with_t_separator() {
        let parser = TimestampParser::new();
        let got = parser.parse_line("start 2024-03-01T10:15:02 end").unwrap();
        assert_eq!(got, ts(2024, 3, 1, 10, 15, 2));
    }

    #[test]
    fn test_parse_apache_clf() {
        let parser = TimestampParser::new();
        let got = parser
            .parse_line(r#"10.0.0.1 - - [01/Mar/2024:10:15:02 +0000] "GET / HTTP/1.1" 200 5"#)
            .unwrap();
        assert_eq!(got, ts(2024, 3, 1, 10, 15, 2));
    }

    #[test]
    fn test_parse_syslog_pinned_year() {
        let parser = TimestampParser::new();
        let got = parser
            .parse_line("Jun  7 15:16:01 combo sshd[19939]: session opened")
            .unwrap();
        assert_eq!(got, ts(SYSLOG_PINNED_YEAR, 6, 7, 15, 16, 1));
    }

    #[test]
    fn test_candidate_order_prefers_iso_over_inner_clf() {
        // Wrapper ISO stamp and inner CLF stamp on one line: declared
        // order makes this deterministic.
        let parser = TimestampParser::new();
        let line = r#"2024-03-02 08:00:00,000 fetched [01/Mar/2024:10:15:02 +0000]"#;
        let got = parser.parse_line(line).unwrap();
        assert_eq!(got.date(), ts(2024, 3, 2, 0, 0, 0).date());
    }

    #[test]
    fn test_malformed_month_is_not_fatal() {
        let parser = TimestampParser::new();
        let err = parser.parse_line("2026-13-45 10:00:00,123 boom").unwrap_err();
        assert!(matches!(err, ExtractError::MalformedTimestamp(_)));
    }

    #[test]
    fn test_malformed_day_is_not_fatal() {
        let parser = TimestampParser::new();
        let err = parser.parse_line("event at 2024-02-31 10:00:00").unwrap_err();
        assert!(matches!(err, ExtractError::MalformedTimestamp(_)));
    }

    #[test]
    fn test_no_timestamp() {
        let parser = TimestampParser::new();
        assert_eq!(
            parser.parse_line("no stamps here").unwrap_err(),
            ExtractError::NoTimestampFound
        );
    }

    #[test]
    fn test_sort_out_of_order_lines() {
        let parser = TimestampParser::new();
        let lines = vec![
            "2024-03-01 10:00:03,000 third".to_string(),
            "2024-03-01 10:00:01,000 first".to_string(),
            "2024-03-01 10:00:02,000 second".to_string(),
        ];
        let sorted = sort_by_timestamp(&parser, &lines);
        let payloads: Vec<&str> = sorted.iter().map(|(_, l)| *l).collect();
        assert_eq!(
            payloads,
            vec![
                "2024-03-01 10:00:01,000 first",
                "2024-03-01 10:00:02,000 second",
                "2024-03-01 10:00:03,000 third",
            ]
        );
        assert!(sorted.windows(2).all(|w| w[0].0 <= w[1].0));
    }

    #[test]
    fn test_sort_drops_unstamped_lines_and_is_stable() {
        let parser = TimestampParser::new();
        let lines = vec![
            "2024-03-01 10:00:01,000 a".to_string(),
            "no timestamp".to_string(),
            "2024-03-01 10:00:01,000 b".to_string(),
        ];
        let sorted = sort_by_timestamp(&parser, &lines);
        assert_eq!(sorted.len(), 2);
        // Equal stamps keep input order.
        assert!(sorted[0].1.ends_with('a'));
        assert!(sorted[1].1.ends_with('b'));
    }
}
