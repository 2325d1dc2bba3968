//! Built-in admin command handlers.

use crate::config::store::SettingsStore;
use crate::filter::{FilterError, BAN_LIST_KEY};

use super::dispatch::CommandContext;

/// `addip <ip-mask>` - add a filter rule.
///
/// Silent on success, like the console it replaces; parse and capacity
/// failures are reported inline.
pub(crate) fn addip(ctx: &mut CommandContext<'_>) {
    let address = ctx.argv(1);
    match ctx.state.filter.add(address) {
        Ok(()) => {}
        Err(FilterError::InvalidAddress(_)) => {
            ctx.print(format!("Bad filter address: {address}"));
        }
        Err(FilterError::TableFull) => {
            ctx.print("IP filter list is full");
        }
        Err(_) => {}
    }
}

/// `removeip <ip-mask>` - remove an exactly matching rule.
pub(crate) fn removeip(ctx: &mut CommandContext<'_>) {
    let address = ctx.argv(1);
    match ctx.state.filter.remove(address) {
        Ok(()) => ctx.print("Removed."),
        Err(_) => ctx.print(format!("Didn't find {address}.")),
    }
}

/// `listip` - echo the persisted ban-list value.
pub(crate) fn listip(ctx: &mut CommandContext<'_>) {
    let ban_list = ctx.state.settings.get(BAN_LIST_KEY).unwrap_or_default();
    ctx.print(format!("{BAN_LIST_KEY} is \"{ban_list}\""));
}

/// `status` - filter table and admission statistics.
pub(crate) fn status(ctx: &mut CommandContext<'_>) {
    let stats = ctx.state.filter.stats();
    let mode = if stats.deny_mode {
        "deny-list"
    } else {
        "allow-list"
    };
    ctx.print(format!("mode: {mode}"));
    ctx.print(format!(
        "filters: {} live, {} free, {} max",
        stats.live_rules, stats.free_slots, stats.capacity
    ));
    ctx.print(format!(
        "admissions: {} admitted, {} rejected",
        stats.admitted, stats.rejected
    ));
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::config::store::{MemorySettings, SettingsStore, SharedSettings};
    use crate::console::{CommandRegistry, Console, ConsoleState};
    use crate::filter::DENY_MODE_KEY;

    fn console() -> (Console, SharedSettings) {
        let settings: SharedSettings = Arc::new(MemorySettings::new());
        let console = Console::new(
            Arc::new(CommandRegistry::with_builtins().build()),
            ConsoleState::new(settings.clone()),
        );
        (console, settings)
    }

    fn run(console: &mut Console, line: &str) -> String {
        let mut out = String::new();
        assert!(console.dispatch(line, &mut out));
        out
    }

    #[test]
    fn test_addip_silent_on_success() {
        let (mut console, _) = console();
        assert_eq!(run(&mut console, "addip 192.168.1.1"), "");
        assert!(!console.state().filter.admit("192.168.1.1"));
    }

    #[test]
    fn test_addip_reports_bad_address() {
        let (mut console, _) = console();
        let out = run(&mut console, "addip bogus");
        assert_eq!(out, "Bad filter address: bogus\n");
    }

    #[test]
    fn test_removeip_reports_outcome() {
        let (mut console, _) = console();
        run(&mut console, "addip 10.0.0.1");

        assert_eq!(run(&mut console, "removeip 10.0.0.1"), "Removed.\n");
        assert_eq!(
            run(&mut console, "removeip 10.0.0.1"),
            "Didn't find 10.0.0.1.\n"
        );
    }

    #[test]
    fn test_listip_echoes_persisted_value() {
        let (mut console, _) = console();
        run(&mut console, "addip 192.168.1.1");
        run(&mut console, "addip 10");

        let out = run(&mut console, "listip");
        assert_eq!(out, "ban_list is \"192.168.1.1 10.0.0.0\"\n");
    }

    #[test]
    fn test_listip_empty() {
        let (mut console, _) = console();
        assert_eq!(run(&mut console, "listip"), "ban_list is \"\"\n");
    }

    #[test]
    fn test_status_reports_mode_and_counts() {
        let (mut console, settings) = console();
        run(&mut console, "addip 10.0.0.1");
        console.state().filter.admit("10.0.0.1");
        console.state().filter.admit("10.0.0.2");

        let out = run(&mut console, "status");
        assert!(out.contains("mode: deny-list"));
        assert!(out.contains("filters: 1 live, 0 free, 1024 max"));
        assert!(out.contains("admissions: 1 admitted, 1 rejected"));

        settings.set(DENY_MODE_KEY, "0").unwrap();
        let out = run(&mut console, "status");
        assert!(out.contains("mode: allow-list"));
    }
}
