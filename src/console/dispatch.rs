//! Command dispatch.
//!
//! Tokenizes a console line, resolves the command case-insensitively,
//! enforces the minimum argument count, and invokes the handler. The
//! returned boolean says whether the privileged command set claimed the
//! name: a recognized-but-malformed command is still "handled" so the
//! caller never falls through to another interpretation, while an unknown
//! name lets the caller try other resolution paths.

use std::fmt::Write as _;
use std::sync::Arc;

use tracing::debug;

use crate::config::store::{SettingsStore, SharedSettings};
use crate::filter::IpFilter;

use super::registry::CommandRegistry;

/// Mutable admin state shared by all handlers.
///
/// Owned by the console; handlers run one at a time on the console
/// processing step and are the only writers.
pub struct ConsoleState {
    /// The admission filter.
    pub filter: IpFilter,
    /// The settings store backing the filter and mode flag.
    pub settings: SharedSettings,
}

impl ConsoleState {
    /// Build state over a settings store, seeding the filter from the
    /// persisted ban list.
    pub fn new(settings: SharedSettings) -> Self {
        let mut filter = IpFilter::new(settings.clone());
        if let Some(ban_list) = settings.get(crate::filter::BAN_LIST_KEY) {
            filter.import(&ban_list);
        }
        Self { filter, settings }
    }
}

/// Everything a handler may touch: the argument vector of the line being
/// dispatched, the admin state, and the reply sink.
pub struct CommandContext<'a> {
    argv: &'a [&'a str],
    /// Mutable admin state.
    pub state: &'a mut ConsoleState,
    out: &'a mut String,
}

impl<'a> CommandContext<'a> {
    /// Number of tokens including the command name.
    pub fn argc(&self) -> usize {
        self.argv.len()
    }

    /// Token at `index` (0 is the command name); empty string when out of
    /// range.
    pub fn argv(&self, index: usize) -> &'a str {
        self.argv.get(index).copied().unwrap_or("")
    }

    /// All tokens after the command name.
    pub fn args(&self) -> &'a [&'a str] {
        &self.argv[1..]
    }

    /// Append one reply line.
    pub fn print(&mut self, line: impl AsRef<str>) {
        self.out.push_str(line.as_ref());
        self.out.push('\n');
    }
}

/// The console: a command registry plus the admin state it operates on.
pub struct Console {
    registry: Arc<CommandRegistry>,
    state: ConsoleState,
}

impl Console {
    /// Create a console over a built registry and state.
    pub fn new(registry: Arc<CommandRegistry>, state: ConsoleState) -> Self {
        Self { registry, state }
    }

    /// The admin state, for direct inspection.
    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    /// Mutable admin state, for hosts that drive the filter directly.
    pub fn state_mut(&mut self) -> &mut ConsoleState {
        &mut self.state
    }

    /// Dispatch one console line, appending reply text to `out`.
    ///
    /// Returns true when the command name belongs to this registry, even
    /// if the invocation was rejected for missing arguments; false for an
    /// empty line or an unknown name.
    pub fn dispatch(&mut self, line: &str, out: &mut String) -> bool {
        let argv: Vec<&str> = line.split_whitespace().collect();
        let Some(&name) = argv.first() else {
            return false;
        };

        let registry = self.registry.clone();
        let Some(entry) = registry.find(name) else {
            debug!(command = name, "unknown console command");
            let _ = writeln!(out, "Unknown command '{name}'.");
            return false;
        };

        if argv.len() - 1 >= entry.min_args {
            debug!(command = %entry.name, argc = argv.len(), "dispatching console command");
            let mut ctx = CommandContext {
                argv: &argv,
                state: &mut self.state,
                out,
            };
            (entry.handler)(&mut ctx);
        } else {
            debug!(
                command = %entry.name,
                argc = argv.len(),
                min_args = entry.min_args,
                "insufficient arguments"
            );
            out.push_str("Insufficient arguments.\n");
            if !entry.description.is_empty() {
                let _ = writeln!(out, "Description: {}.", entry.description);
            }
            if !entry.usage.is_empty() {
                let _ = writeln!(out, "Usage: /{} {}.", entry.name, entry.usage);
            }
            if entry.description.is_empty() && entry.usage.is_empty() {
                out.push_str(
                    "No description and usage guidance exists for this command at this time.\n",
                );
            }
        }

        true
    }
}
