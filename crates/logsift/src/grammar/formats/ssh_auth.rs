use crate::grammar::model::{FieldValue, Format, Record};
use crate::grammar::Grammar;
use once_cell::sync::Lazy;
use regex::Regex;

/// Failed-password sshd lines from an auth log:
/// `Mar  1 10:15:02 host sshd[1234]: Failed password for [invalid user] bob from 1.2.3.4 ...`
///
/// The syslog stamp carries no year, so it stays textual; downstream
/// ordering uses line order, which auth logs already guarantee.
static LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<timestamp>\w{3}\s+\d{1,2}\s[\d:]+)\s.*sshd\[\d+\]:\sFailed password for (?P<invalid>invalid user )?(?P<user>\w+) from (?P<ip>\d{1,3}(?:\.\d{1,3}){3})",
    )
    .unwrap()
});

pub struct SshAuthGrammar;

impl Grammar for SshAuthGrammar {
    fn format(&self) -> Format {
        Format::SshAuth
    }

    fn matches(&self, line: &str) -> bool {
        line.contains("sshd[")
    }

    fn extract(&self, line: &str, line_no: usize) -> Option<Record> {
        let caps = LINE.captures(line)?;
        let mut rec = Record::new(Format::SshAuth, line_no);

        rec.push("timestamp", FieldValue::Text(caps["timestamp"].to_string()));
        rec.push("username", FieldValue::Text(caps["user"].to_string()));
        rec.push("source_ip", FieldValue::Text(caps["ip"].to_string()));
        rec.push(
            "invalid_user",
            FieldValue::Int(caps.name("invalid").is_some() as i64),
        );

        Some(rec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_failed_login() {
        let line = "Mar  1 10:15:02 bastion sshd[4121]: Failed password for root from 203.0.113.9 port 55122 ssh2";
        let rec = SshAuthGrammar.extract(line, 9).unwrap();
        assert_eq!(rec.text("timestamp"), Some("Mar  1 10:15:02"));
        assert_eq!(rec.text("username"), Some("root"));
        assert_eq!(rec.text("source_ip"), Some("203.0.113.9"));
        assert_eq!(rec.int("invalid_user"), Some(0));
    }

    #[test]
    fn test_extract_invalid_user_variant() {
        let line = "Mar  1 10:16:44 bastion sshd[4150]: Failed password for invalid user admin from 203.0.113.9 port 55160 ssh2";
        let rec = SshAuthGrammar.extract(line, 1).unwrap();
        assert_eq!(rec.text("username"), Some("admin"));
        assert_eq!(rec.int("invalid_user"), Some(1));
    }

    #[test]
    fn test_successful_login_line_is_dropped() {
        let line = "Mar  1 10:17:00 bastion sshd[4160]: Accepted password for alice from 10.0.0.5 port 40112 ssh2";
        assert!(SshAuthGrammar.matches(line));
        assert!(SshAuthGrammar.extract(line, 1).is_none());
    }
}
