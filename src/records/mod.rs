//! Record parsing: raw DNS answers into structured representations.
//!
//! One parser per record kind, all pure functions with no I/O:
//! - Tag-list records (SPF, DMARC, DKIM, BIMI) arrive as TXT strings
//! - Host records (A, AAAA, MX, NS, CNAME, SOA) arrive in presentation format
//!
//! Parsing never panics and never returns an error to the caller: anything
//! that cannot be parsed becomes an explicit [`RecordOutcome`] variant
//! (`Absent`, `Malformed`, `Ambiguous`) so that downstream rules can react
//! to each condition differently.

mod bimi;
mod dkim;
mod dmarc;
mod host;
mod kind;
mod outcome;
mod spf;
mod tags;

// Re-export public API
pub use bimi::BimiRecord;
pub use dkim::DkimRecord;
pub use dmarc::{DmarcPolicy, DmarcRecord};
pub use host::{parse_addresses, parse_hosts, parse_mx, parse_soa, MxExchange, SoaRecord};
pub use kind::{RecordKind, EVALUATION_ORDER};
pub use outcome::{ParsedRecord, RecordOutcome};
pub use spf::{Mechanism, Qualifier, SpfRecord, SpfTerm};
pub use tags::{parse_tag_list, Tag};
