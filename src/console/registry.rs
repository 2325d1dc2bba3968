//! The command registry.
//!
//! An immutable, ordered table of console commands built once at startup.
//! Lookup is a case-insensitive linear scan; the table is a handful of
//! entries and never mutates at runtime.

use super::dispatch::CommandContext;
use super::handlers;

/// A command handler.
///
/// Handlers take no arguments of their own; everything they need - the
/// current argument vector, the admin state, the reply sink - comes from
/// the [`CommandContext`].
pub type Handler = Box<dyn Fn(&mut CommandContext<'_>) + Send + Sync>;

/// One registered console command.
pub struct CommandEntry {
    /// Case-insensitive command name.
    pub name: String,
    /// Minimum number of arguments after the command name.
    pub min_args: usize,
    /// Argument synopsis for usage output; may be empty.
    pub usage: String,
    /// One-line description for usage output; may be empty.
    pub description: String,
    pub(crate) handler: Handler,
}

/// Immutable registry of console commands.
pub struct CommandRegistry {
    commands: Vec<CommandEntry>,
}

impl CommandRegistry {
    /// Start building an empty registry.
    pub fn builder() -> CommandRegistryBuilder {
        CommandRegistryBuilder {
            commands: Vec::new(),
        }
    }

    /// Start building a registry pre-loaded with the admin commands:
    /// `addip`, `removeip`, `listip`, and `status`.
    ///
    /// The hosting console registers its own commands (bot management,
    /// entity listing, chat, ...) on top before calling
    /// [`build`](CommandRegistryBuilder::build).
    pub fn with_builtins() -> CommandRegistryBuilder {
        Self::builder()
            .command(
                "addip",
                1,
                "<ip-mask>",
                "Blacklist an IP from the server",
                handlers::addip,
            )
            .command(
                "removeip",
                1,
                "<ip-mask>",
                "Remove a banned IP from the blacklist",
                handlers::removeip,
            )
            .command(
                "listip",
                0,
                "",
                "Prints the entire IP blacklist",
                handlers::listip,
            )
            .command(
                "status",
                0,
                "",
                "Prints filter table and admission statistics",
                handlers::status,
            )
    }

    /// Find a command by name, case-insensitively.
    pub fn find(&self, name: &str) -> Option<&CommandEntry> {
        self.commands
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    /// Registered commands, in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &CommandEntry> {
        self.commands.iter()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Builder for [`CommandRegistry`].
pub struct CommandRegistryBuilder {
    commands: Vec<CommandEntry>,
}

impl CommandRegistryBuilder {
    /// Register a command.
    pub fn command(
        mut self,
        name: &str,
        min_args: usize,
        usage: &str,
        description: &str,
        handler: impl Fn(&mut CommandContext<'_>) + Send + Sync + 'static,
    ) -> Self {
        self.commands.push(CommandEntry {
            name: name.to_string(),
            min_args,
            usage: usage.to_string(),
            description: description.to_string(),
            handler: Box::new(handler),
        });
        self
    }

    /// Finish building; the registry is immutable from here on.
    pub fn build(self) -> CommandRegistry {
        CommandRegistry {
            commands: self.commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_present() {
        let registry = CommandRegistry::with_builtins().build();
        for name in ["addip", "removeip", "listip", "status"] {
            assert!(registry.find(name).is_some(), "missing builtin {name}");
        }
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let registry = CommandRegistry::with_builtins().build();
        assert!(registry.find("AddIP").is_some());
        assert!(registry.find("LISTIP").is_some());
        assert!(registry.find("nosuch").is_none());
    }

    #[test]
    fn test_external_registration() {
        let registry = CommandRegistry::with_builtins()
            .command("say", 1, "<message>", "Broadcast a message", |ctx| {
                let _ = ctx;
            })
            .build();

        let entry = registry.find("say").unwrap();
        assert_eq!(entry.min_args, 1);
        assert_eq!(entry.usage, "<message>");
    }
}
