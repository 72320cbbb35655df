use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use serde::ser::SerializeMap;
use thiserror::Error;

/// Known line formats, in human-readable registry naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Proxy-chained access log with source-file prefix and trailing app code
    CustomAccess,
    /// Apache/Nginx common access log
    ApacheAccess,
    /// Comma-delimited rows without a named schema
    CsvStructured,
    /// key=value token logs (logfmt-style)
    KeyValue,
    /// sshd failed-password auth lines
    SshAuth,
    /// Application SOAP request traces
    SoapTrace,
    /// No registered grammar matched the sample
    Unknown,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::CustomAccess => "Custom Access Log",
            Format::ApacheAccess => "Apache Access Log",
            Format::CsvStructured => "CSV Structured",
            Format::KeyValue => "Key=Value Log",
            Format::SshAuth => "SSH Auth Log",
            Format::SoapTrace => "SOAP Trace Log",
            Format::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single extracted field value.
///
/// The access-log "no body" response size is kept as `Text("-")` rather
/// than being coerced to zero, so renderers can show it verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Time(NaiveDateTime),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::Time(t) => Some(*t),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Time(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// One structured record extracted from one log line.
///
/// Always carries the 1-based source line number and the format that
/// produced it, so a record can be traced back to its line.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub format: Format,
    pub line_no: usize,
    /// Extraction-ordered fields, serialized as a JSON object
    #[serde(serialize_with = "serialize_fields_as_map")]
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new(format: Format, line_no: usize) -> Self {
        Self {
            format,
            line_no,
            fields: Vec::new(),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_int)
    }

    pub fn time(&self, name: &str) -> Option<NaiveDateTime> {
        self.get(name).and_then(FieldValue::as_time)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn serialize_fields_as_map<S>(
    fields: &[(String, FieldValue)],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(fields.len()))?;
    for (k, v) in fields {
        map.serialize_entry(k, v)?;
    }
    map.end()
}

/// Everything that can go wrong while scanning a line.
///
/// Nothing here is fatal: callers drop the line (or the field) and keep
/// whatever already parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no timestamp found")]
    NoTimestampFound,

    #[error("malformed timestamp: {0}")]
    MalformedTimestamp(String),

    #[error("line does not match the {0} grammar")]
    NoGrammarMatch(&'static str),

    #[error("sample did not match any registered grammar")]
    UnclassifiableFormat,

    #[error("no known delimiter in sample line")]
    NoDelimiterFound,
}
