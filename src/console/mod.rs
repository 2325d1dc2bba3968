//! Remote-console command surface.
//!
//! A table-driven dispatcher for privileged server commands:
//! - Case-insensitive lookup in an immutable registry
//! - Minimum-argument enforcement with uniform usage/error output
//! - A handled/unhandled return so the host can fall back to other
//!   command interpretations for unclaimed names
//!
//! The built-in commands (`addip`, `removeip`, `listip`, `status`)
//! administer the admission filter; the hosting console registers its own
//! commands through [`CommandRegistry::with_builtins`].

mod dispatch;
mod handlers;
mod registry;

pub use dispatch::{CommandContext, Console, ConsoleState};
pub use registry::{CommandEntry, CommandRegistry, CommandRegistryBuilder, Handler};
