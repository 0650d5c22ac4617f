//! Diagnostic logging for a `matrifast` run.
//!
//! Registration results go to stdout through the output manager. Everything
//! logged here goes to stderr, so a JSON report can be piped while the
//! diagnostics stay on the terminal. The core and adapter crates emit
//! events; only this binary installs a subscriber.
//!
//! What each level shows:
//!
//! - default: rejected submissions, unreadable forms, accepted but
//!   unrecognised `sexo` or `tipoRelacion` values
//! - `-v`: each registered user, linked student and batch summary
//! - `-vv`: each form file loaded and each submission handed to the service
//! - `-vvv`: no extra events today, but lets `trace!` calls through
//! - `--quiet`: configuration and internal failures only
//!
//! Setting `RUST_LOG` replaces this mapping entirely.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// The workspace crates. Dependencies stay silent unless `RUST_LOG` names them.
const CRATES: &[&str] = &["matrifast", "matrifast_core", "matrifast_adapters"];

/// Install the stderr subscriber for this run. Called once, before the
/// configuration is loaded, so config failures are logged too.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = derive_level(args);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(level)));

    let use_ansi = !args.no_color && std::io::stderr().is_terminal();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

fn filter_directives(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// `--quiet` wins; otherwise each `-v` lowers the threshold one level.
fn derive_level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
