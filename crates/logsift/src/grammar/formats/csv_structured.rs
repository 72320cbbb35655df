use crate::grammar::model::{FieldValue, Format, Record};
use crate::grammar::Grammar;

/// Comma-delimited rows without a named schema. Fields get positional
/// names, same vocabulary the heuristic splitter uses.
pub struct CsvStructuredGrammar;

impl Grammar for CsvStructuredGrammar {
    fn format(&self) -> Format {
        Format::CsvStructured
    }

    fn matches(&self, line: &str) -> bool {
        line.contains(',')
    }

    fn extract(&self, line: &str, line_no: usize) -> Option<Record> {
        let parts: Vec<&str> = line.trim().split(',').collect();
        if parts.len() < 2 {
            return None;
        }

        let mut rec = Record::new(Format::CsvStructured, line_no);
        for (i, part) in parts.iter().enumerate() {
            rec.push(
                format!("field_{}", i + 1),
                FieldValue::Text(part.trim().to_string()),
            );
        }
        Some(rec)
    }
}
