//! Route auditor - command-line entry point.
//!
//! Reads the root routing file, audits every mounted route module and writes the route
//! manifest and scan report. Run without arguments from the service's crate root:
//!
//! ```bash
//! route-audit
//! ```
//!
//! Report annotations that are not bound to any handler and fail on duplicate handler names:
//!
//! ```bash
//! route-audit --strict --deny-collisions
//! ```
//!
//! Enable verbose logging:
//! ```bash
//! route-audit -v
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use route_audit::cli;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("Route auditor starting...");

    let args = cli::parse_args_from_parsed(args)?;

    cli::run(args)?;

    info!("Route audit completed successfully");

    Ok(())
}
