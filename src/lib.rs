//! Administrative access control for multiplayer game servers.
//!
//! Two components, coupled only through the console's admin commands:
//!
//! - [`filter`] - an IP admission filter: an ordered, bounded table of
//!   mask/compare rules with octet-granular wildcards, deny-list or
//!   allow-list semantics, and ban-list persistence through a settings
//!   store.
//! - [`console`] - a table-driven command dispatcher with case-insensitive
//!   lookup, minimum-argument enforcement, and uniform usage/error output.
//!
//! The transport layer calls [`filter::IpFilter::admit`] once per incoming
//! connection; the console subsystem calls [`console::Console::dispatch`]
//! once per typed line.

pub mod config;
pub mod console;
pub mod filter;
pub mod telemetry;
