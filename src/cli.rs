use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

/// Route auditor - checks actix-web route annotations against scope registrations and
/// generates a route manifest
#[derive(Parser, Debug)]
#[command(name = "route-audit")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Directory holding the root routing file and the mounted module sources
    #[arg(long = "routes-dir", value_name = "DIR", default_value = "src/routes")]
    pub routes_dir: PathBuf,

    /// Root routing file, relative to the routes directory
    #[arg(long = "root-file", value_name = "FILE", default_value = "mod.rs")]
    pub root_file: PathBuf,

    /// Generated route manifest
    #[arg(long = "manifest", value_name = "FILE", default_value = "api-spec/api-routes.js")]
    pub manifest_path: PathBuf,

    /// Generated scan report
    #[arg(
        long = "scan-report",
        value_name = "FILE",
        default_value = "api-spec/route-scan.json"
    )]
    pub scan_report_path: PathBuf,

    /// Scan report format (json or yaml)
    #[arg(long = "scan-format", value_enum, default_value = "json")]
    pub scan_format: OutputFormat,

    /// How handler declarations are located in source files
    #[arg(long = "locator", value_enum, default_value = "line-window")]
    pub locator: LocatorKind,

    /// Report annotations without a reachable handler declaration in the scan report
    #[arg(long = "strict")]
    pub strict: bool,

    /// Fail when two declarations share a handler name instead of overwriting
    #[arg(long = "deny-collisions")]
    pub deny_collisions: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Declaration locator backends
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum LocatorKind {
    /// Bounded line-window pattern matching
    #[default]
    #[value(name = "line-window")]
    LineWindow,
    /// Rust syntax tree, falling back to line windows for files that do not parse
    Syntax,
}

/// Log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    info!("Routes directory: {}", args.routes_dir.display());
    info!("Root file: {}", args.root_file.display());
    info!("Manifest: {}", args.manifest_path.display());
    info!(
        "Scan report: {} ({:?})",
        args.scan_report_path.display(),
        args.scan_format
    );
    info!("Locator: {:?}", args.locator);
    if args.strict {
        info!("Strict mode: unbound annotations are reported");
    }
    if args.deny_collisions {
        info!("Handler name collisions are errors");
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::auditor::{AuditConfig, Auditor};
    use crate::extractor::AuditOptions;
    use crate::manifest::{CollisionPolicy, RouteManifest};
    use crate::serializer::{
        render_manifest, render_table, serialize_scan_json, serialize_scan_yaml, write_to_file,
    };

    info!("Starting route audit...");

    // Step 1: Resolve scopes and audit every mounted module
    let config = AuditConfig {
        routes_dir: args.routes_dir.clone(),
        root_file: args.root_file.clone(),
        locator: args.locator,
        options: AuditOptions {
            strict: args.strict,
        },
    };
    let report = Auditor::new(config).run()?;

    // Step 2: Build the manifest before anything is written, so a collision leaves old
    // artifacts untouched
    let policy = if args.deny_collisions {
        CollisionPolicy::Deny
    } else {
        CollisionPolicy::LastWriteWins
    };
    let manifest = RouteManifest::build(&report.routes, policy)?;

    let manifest_content = render_manifest(&manifest)?;
    let scan_content = match args.scan_format {
        OutputFormat::Json => serialize_scan_json(&report.scan_entries)?,
        OutputFormat::Yaml => serialize_scan_yaml(&report.scan_entries)?,
    };

    // Step 3: Route table
    print!("{}", render_table(&report.routes));

    // Step 4: Artifacts
    write_to_file(&manifest_content, &args.manifest_path)?;
    info!("Wrote route manifest to {}", args.manifest_path.display());
    write_to_file(&scan_content, &args.scan_report_path)?;
    info!("Wrote scan report to {}", args.scan_report_path.display());

    // Step 5: Summary
    info!("Audit complete!");
    info!("Summary:");
    info!("  - Scopes mounted: {}", report.scopes.len());
    info!("  - Scopes skipped: {}", report.skipped_files.len());
    info!("  - Routes found: {}", report.routes.len());
    info!("  - Manifest handlers: {}", manifest.len());
    info!("  - Scan entries: {}", report.scan_entries.len());
    info!("  - Unresolved entries: {}", report.unresolved().count());

    Ok(())
}
