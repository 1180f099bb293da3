//! # foodshop-cli
//!
//! Terminal front end for the food shop quoting engine.
//!
//! ## Module Organization
//! ```text
//! foodshop_cli/
//! ├── lib.rs      ◄─── You are here (startup & run)
//! ├── config.rs   ◄─── Flags, FOODSHOP_* env, ShopConfig
//! ├── shell.rs    ◄─── Numbered-menu loop
//! ├── render.rs   ◄─── Menu / quote / history tables
//! └── error.rs    ◄─── ShellError
//! ```
//!
//! ## Startup Sequence
//! 1. Parse flags
//! 2. Initialize tracing (stderr, so tables on stdout stay clean)
//! 3. Resolve configuration: flags > env > defaults
//! 4. Build catalog, history store and engine
//! 5. Run the shell on stdin/stdout

pub mod config;
pub mod error;
pub mod render;
pub mod shell;

use std::io;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Args, ConfigError, LogFormat, ShopConfig};
use foodshop_core::{Catalog, HistoryStore, QuoteEngine};
use shell::Shell;

pub fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose, args.log_format);

    let config = ShopConfig::from_env()
        .and_then(|config| config.apply_args(&args))
        .context("invalid configuration")?;

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    info!(
        currency_unit = %config.currency_unit,
        member_discount_percent = config.member_discount_percent,
        pair_discount_percent = config.pair_discount_percent,
        "Starting food shop shell"
    );

    let engine = build_engine(&config).context("invalid pricing policy")?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock(), engine, config.currency_unit);
    shell.run().context("shell terminated")?;

    info!(orders = shell.engine().order_count(), "Shell closed");
    Ok(())
}

/// Wires the default catalog and a fresh history store to the configured policy.
pub fn build_engine(config: &ShopConfig) -> Result<QuoteEngine, ConfigError> {
    Ok(QuoteEngine::new(
        Arc::new(Catalog::with_defaults()),
        Arc::new(HistoryStore::new()),
        config.pricing_policy()?,
    ))
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG` always wins when set
/// - `--verbose`: `info,foodshop=debug`
/// - Default: `error` only, keeping the interactive session quiet
fn init_tracing(verbose: bool, format: LogFormat) {
    let default = if verbose { "info,foodshop=debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.compact().init(),
    }
}
