//! logsift — normalization and pattern-grouping core for incident log
//! triage.
//!
//! The core receives fully materialized text lines (file opening,
//! decompression, and encoding are the caller's problem), classifies
//! the stream against a registry of known line grammars, extracts
//! structured records (falling back to delimiter sniffing for unknown
//! formats), generalizes literal-bearing statements into shape keys,
//! and aggregates records into ranked, time-windowed summaries. The
//! caller renders; the core only returns typed data, and no failure in
//! here is fatal — bad lines shrink the output, they never abort it.

// Core pipeline
pub mod classify;
pub mod extract;
pub mod grammar;
pub mod heuristic;
pub mod timestamp;

// Grouping and reporting views
pub mod aggregate;
pub mod generalize;
pub mod trends;

// Support
pub mod conf;
pub mod wrap;

pub use aggregate::{interval_summary, Aggregation, Group, IntervalSummary};
pub use classify::classify;
pub use conf::AnalyzerConfig;
pub use extract::{extract, extract_as, Extraction};
pub use generalize::{extract_select_queries, Generalizer};
pub use grammar::{ExtractError, FieldValue, Format, Grammar, Record};
pub use timestamp::{sort_by_timestamp, TimestampParser};
pub use wrap::soft_wrap;
