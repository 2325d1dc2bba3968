use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use rcond::config::store::{FileSettings, MemorySettings, SettingsStore, SharedSettings};
use rcond::config::Config;
use rcond::console::{CommandRegistry, Console, ConsoleState};
use rcond::telemetry::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(name = "rcond")]
#[command(author, version, about = "Admin console and IP admission filter for game servers")]
struct Args {
    /// Path to config file (defaults apply when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Validate config and exit
    #[arg(long)]
    validate: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration first (to get log settings)
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let tracing_config = TracingConfig {
        service_name: "rcond".to_string(),
        log_level: config.telemetry.log_level.clone(),
        json_logs: config.telemetry.json_logs,
    };

    init_tracing(&tracing_config)?;

    info!(version = env!("CARGO_PKG_VERSION"), "starting rcond");

    if args.validate {
        info!("configuration is valid");
        return Ok(());
    }

    let settings: SharedSettings = match &config.settings.path {
        Some(path) => Arc::new(FileSettings::open(path)?),
        None => Arc::new(MemorySettings::new()),
    };
    info!(store = settings.name(), "settings store ready");

    let state = ConsoleState::new(settings);
    let stats = state.filter.stats();
    info!(
        live_rules = stats.live_rules,
        deny_mode = stats.deny_mode,
        "filter seeded from persisted ban list"
    );

    let registry = Arc::new(CommandRegistry::with_builtins().build());
    let mut console = Console::new(registry, state);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        let mut out = String::new();
                        console.dispatch(&line, &mut out);
                        print!("{out}");
                    }
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupt received, shutting down");
                break;
            }
        }
    }

    Ok(())
}
