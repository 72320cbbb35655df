//! Individual format grammar implementations.

pub mod apache_access;
pub mod csv_structured;
pub mod custom_access;
pub mod key_value;
pub mod soap_trace;
pub mod ssh_auth;

pub use apache_access::ApacheAccessGrammar;
pub use csv_structured::CsvStructuredGrammar;
pub use custom_access::CustomAccessGrammar;
pub use key_value::KeyValueGrammar;
pub use soap_trace::SoapTraceGrammar;
pub use ssh_auth::SshAuthGrammar;

use crate::timestamp::TimestampParser;
use once_cell::sync::Lazy;

/// Shared timestamp scanner for grammars with typed timestamp fields.
pub(crate) static TIMESTAMPS: Lazy<TimestampParser> = Lazy::new(TimestampParser::new);
