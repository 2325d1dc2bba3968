//! IP-based admission filtering.
//!
//! The transport layer asks [`IpFilter::admit`] once per incoming
//! connection attempt; the console mutates the rule set through
//! `addip`/`removeip`. Rules match at octet granularity with trailing
//! wildcards:
//!
//! ```text
//! addip 192.246.40      # covers the whole class C network
//! addip 192.246.40.13   # covers one host
//! ```
//!
//! The mode flag selects deny-list semantics (a match rejects, the
//! default) or allow-list semantics (only a match admits), and the live
//! rule set serializes to a single settings value so bans survive
//! restarts.

mod events;
mod rule;
mod table;

pub use events::{AdmissionEvent, AdmissionLog};
pub use rule::{FilterError, FilterRule, MAX_FILTERS};
pub use table::{FilterStats, IpFilter, BAN_LIST_KEY, DENY_MODE_KEY};
