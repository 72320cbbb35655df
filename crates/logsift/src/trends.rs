//! Typed summary views handed to the rendering collaborator.
//!
//! Each view is plain data — counts, rankings, representative examples.
//! Tabular formatting and report writing live outside the core.

use crate::aggregate::{interval_summary, Aggregation, IntervalSummary};
use crate::conf::AnalyzerConfig;
use crate::generalize::{extract_select_queries, Generalizer};
use crate::grammar::Record;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Status codes surfaced in the errors-only view.
pub const ERROR_STATUSES: [i64; 2] = [404, 500];

/// One request that hit an error status.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEntry {
    pub line_no: usize,
    pub client_ip: String,
    pub url: String,
    pub status: i64,
    pub timestamp: Option<NaiveDateTime>,
}

/// Access-log trends: request volume per client, rankings, errors.
#[derive(Debug, Serialize)]
pub struct AccessSummary {
    /// Requests per client IP, first-seen order
    pub requests_by_ip: Vec<(String, usize)>,
    /// Top-N IPs by request count
    pub top_ips: Vec<(String, usize)>,
    /// Top-N requested URLs
    pub top_urls: Vec<(String, usize)>,
    /// Requests with status 404/500, line order
    pub errors: Vec<ErrorEntry>,
}

/// Summarize access-log records. Records missing the access fields
/// (client_ip, url, status) are skipped, so a mixed record set degrades
/// to a smaller summary rather than failing.
pub fn access_summary(records: &[Record], config: &AnalyzerConfig) -> AccessSummary {
    let mut by_ip: Aggregation<String, usize> = Aggregation::new();
    let mut by_url: Aggregation<String, usize> = Aggregation::new();
    let mut errors = Vec::new();

    for rec in records {
        let (Some(ip), Some(url), Some(status)) =
            (rec.text("client_ip"), rec.text("url"), rec.int("status"))
        else {
            continue;
        };

        by_ip.insert(ip.to_string(), rec.line_no);
        by_url.insert(url.to_string(), rec.line_no);

        if ERROR_STATUSES.contains(&status) {
            errors.push(ErrorEntry {
                line_no: rec.line_no,
                client_ip: ip.to_string(),
                url: url.to_string(),
                status,
                timestamp: rec.time("timestamp"),
            });
        }
    }

    AccessSummary {
        requests_by_ip: owned_counts(&by_ip),
        top_ips: owned_top_n(&by_ip, config.top_n),
        top_urls: owned_top_n(&by_url, config.top_n),
        errors,
    }
}

/// Interval statistics for one request type.
#[derive(Debug, Clone, Serialize)]
pub struct RequestTypeSummary {
    pub request_type: String,
    pub stats: IntervalSummary,
}

/// Per-request-type arrival statistics over SOAP trace records, in
/// first-seen request-type order.
pub fn request_type_summary(records: &[Record]) -> Vec<RequestTypeSummary> {
    let mut by_type: Aggregation<String, NaiveDateTime> = Aggregation::new();

    for rec in records {
        let (Some(request_type), Some(ts)) = (rec.text("request_type"), rec.time("timestamp"))
        else {
            continue;
        };
        by_type.insert(request_type.to_string(), ts);
    }

    by_type
        .groups()
        .iter()
        .map(|g| RequestTypeSummary {
            request_type: g.key.clone(),
            stats: interval_summary(&g.members),
        })
        .collect()
}

/// One failed SSH login attempt, stamp kept textual (no year in source).
#[derive(Debug, Clone, Serialize)]
pub struct FailedLoginAttempt {
    pub timestamp: String,
    pub source_ip: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct FailedLoginSummary {
    /// Attempts in line order
    pub attempts: Vec<FailedLoginAttempt>,
    /// Attempt count per source IP, first-seen order
    pub attempts_by_ip: Vec<(String, usize)>,
}

/// Summarize failed-login records from the SSH auth grammar.
pub fn failed_login_summary(records: &[Record]) -> FailedLoginSummary {
    let mut attempts = Vec::new();
    let mut by_ip: Aggregation<String, usize> = Aggregation::new();

    for rec in records {
        let (Some(ts), Some(ip), Some(user)) = (
            rec.text("timestamp"),
            rec.text("source_ip"),
            rec.text("username"),
        ) else {
            continue;
        };
        attempts.push(FailedLoginAttempt {
            timestamp: ts.to_string(),
            source_ip: ip.to_string(),
            username: user.to_string(),
        });
        by_ip.insert(ip.to_string(), rec.line_no);
    }

    FailedLoginSummary {
        attempts_by_ip: owned_counts(&by_ip),
        attempts,
    }
}

/// One generalized statement shape with its occurrence count and a
/// concrete example.
#[derive(Debug, Clone, Serialize)]
pub struct QueryShapeGroup {
    pub shape: String,
    pub occurrences: usize,
    /// First concrete statement that produced this shape
    pub example: String,
}

/// Extract SELECT statements from raw lines and group them by
/// generalized shape, in first-seen shape order.
pub fn query_shapes(lines: &[String], generalizer: &Generalizer) -> Vec<QueryShapeGroup> {
    let queries = extract_select_queries(lines);
    let shaped = Aggregation::from_items(queries, |q| generalizer.generalize(q));

    shaped
        .groups()
        .iter()
        .map(|g| QueryShapeGroup {
            shape: g.key.clone(),
            occurrences: g.count(),
            example: g.members[0].clone(),
        })
        .collect()
}

fn owned_counts<T>(agg: &Aggregation<String, T>) -> Vec<(String, usize)> {
    agg.counts()
        .into_iter()
        .map(|(k, c)| (k.clone(), c))
        .collect()
}

fn owned_top_n<T>(agg: &Aggregation<String, T>, n: usize) -> Vec<(String, usize)> {
    agg.top_n(n)
        .into_iter()
        .map(|(k, c)| (k.clone(), c))
        .collect()
}
