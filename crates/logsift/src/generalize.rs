//! Literal generalization of SQL-like statements.
//!
//! Two statements differing only in a bound value (a primary key, a
//! quoted name) describe the same kind of event; substituting the
//! literal with a placeholder while keeping the field name makes that
//! visible as an identical shape string.

use once_cell::sync::Lazy;
use regex::Regex;

/// `SELECT ... FROM ...` up to an ORDER/GROUP/LIMIT clause, a
/// semicolon, or end of line.
static SELECT_QUERY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)(SELECT\s+.+?\s+FROM\s+.+?)(?:\s+ORDER\b|\s+GROUP\b|\s+LIMIT\b|;|$)")
        .unwrap()
});

/// Identifier fields compared against integer literals.
static INT_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(mailbox_id|parent_id|folder_id|index_id|imap_id|size|mod_metadata|change_date|mod_content|id)\s*=\s*\d+",
    )
    .unwrap()
});

/// Fields compared against single-quoted string literals.
static STR_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(uuid|name|subject|tag_names|blob_digest|locator|metadata)\s*=\s*'[^']*'")
        .unwrap()
});

/// `parent_id IN (1, 2, 3)` membership clauses.
static IN_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bparent_id\s+IN\s*\(([\d,\s]+)\)").unwrap());

/// One ordered substitution rule: matched literals collapse to a
/// placeholder, the field name stays.
struct Rule {
    pattern: &'static Lazy<Regex>,
    replacement: &'static str,
}

/// Rewrites literal values inside one text value into placeholders.
///
/// Pure and idempotent: generalizing an already generalized value is a
/// no-op, and clause order / non-literal structure is never altered.
pub struct Generalizer {
    rules: Vec<Rule>,
}

impl Generalizer {
    pub fn new() -> Self {
        // Declared rule order is part of the shape contract.
        Self {
            rules: vec![
                Rule {
                    pattern: &INT_FIELD,
                    replacement: "${1}=?",
                },
                Rule {
                    pattern: &STR_FIELD,
                    replacement: "${1}='?'",
                },
                Rule {
                    pattern: &IN_CLAUSE,
                    replacement: "parent_id IN (?)",
                },
            ],
        }
    }

    /// Apply every rule in declared order and trim the result.
    pub fn generalize(&self, text: &str) -> String {
        let mut out = text.to_string();
        for rule in &self.rules {
            out = rule.pattern.replace_all(&out, rule.replacement).into_owned();
        }
        out.trim().to_string()
    }
}

impl Default for Generalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull every SELECT statement out of the raw lines, in line order.
pub fn extract_select_queries(lines: &[String]) -> Vec<String> {
    let mut queries = Vec::new();
    for line in lines {
        for caps in SELECT_QUERY.captures_iter(line) {
            if let Some(m) = caps.get(1) {
                queries.push(m.as_str().trim().to_string());
            }
        }
    }
    queries
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_integer_literal_collapses() {
        let g = Generalizer::new();
        assert_eq!(
            g.generalize("SELECT * FROM mailbox WHERE mailbox_id = 42"),
            "SELECT * FROM mailbox WHERE mailbox_id=?"
        );
    }

    #[test]
    fn test_same_shape_for_different_keys() {
        let g = Generalizer::new();
        let a = g.generalize("SELECT * FROM mailbox WHERE mailbox_id = 42");
        let b = g.generalize("SELECT * FROM mailbox WHERE mailbox_id = 99");
        assert_eq!(a, b);
        assert_eq!(a, "SELECT * FROM mailbox WHERE mailbox_id=?");
    }

    #[test]
    fn test_string_literal_collapses() {
        let g = Generalizer::new();
        assert_eq!(
            g.generalize("SELECT id FROM tags WHERE name = 'urgent'"),
            "SELECT id FROM tags WHERE name='?'"
        );
    }

    #[test]
    fn test_in_clause_collapses() {
        let g = Generalizer::new();
        assert_eq!(
            g.generalize("SELECT * FROM item WHERE parent_id IN (1, 2, 3)"),
            "SELECT * FROM item WHERE parent_id IN (?)"
        );
    }

    #[test]
    fn test_idempotent() {
        let g = Generalizer::new();
        let inputs = [
            "SELECT * FROM mailbox WHERE mailbox_id = 42 AND name = 'inbox'",
            "SELECT * FROM item WHERE parent_id IN (4,5) AND size = 10",
            "  SELECT 1 FROM dual  ",
        ];
        for input in inputs {
            let once = g.generalize(input);
            assert_eq!(g.generalize(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_clause_order_and_structure_preserved() {
        let g = Generalizer::new();
        let shape = g.generalize(
            "SELECT uuid, size FROM item WHERE folder_id = 7 AND uuid = 'ab-12' AND size = 300",
        );
        assert_eq!(
            shape,
            "SELECT uuid, size FROM item WHERE folder_id=? AND uuid='?' AND size=?"
        );
    }

    #[test]
    fn test_unknown_fields_untouched() {
        let g = Generalizer::new();
        assert_eq!(
            g.generalize("SELECT * FROM t WHERE other_col = 5"),
            "SELECT * FROM t WHERE other_col = 5"
        );
    }

    #[test]
    fn test_extract_select_queries() {
        let lines = vec![
            "2024-03-01 10:00:00,000 sql - SELECT * FROM mailbox WHERE mailbox_id = 42 ORDER BY id".to_string(),
            "no query here".to_string(),
            "trace: SELECT uuid FROM item WHERE folder_id = 9; commit".to_string(),
        ];
        let queries = extract_select_queries(&lines);
        assert_eq!(
            queries,
            vec![
                "SELECT * FROM mailbox WHERE mailbox_id = 42",
                "SELECT uuid FROM item WHERE folder_id = 9",
            ]
        );
    }
}
