use crate::cli::LocatorKind;
use crate::error::Result;
use crate::extractor::{audit_file, AuditOptions, RouteEntry, ScanEntry};
use crate::locator;
use crate::scope_resolver::{ScopeMapping, ScopeResolver};
use crate::source::SourceFile;
use log::{debug, info, warn};
use std::path::PathBuf;

/// Inputs of one audit run.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Directory holding the root routing file and every mounted module source
    pub routes_dir: PathBuf,
    /// Root routing file, relative to `routes_dir`
    pub root_file: PathBuf,
    pub locator: LocatorKind,
    pub options: AuditOptions,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            routes_dir: PathBuf::from("src/routes"),
            root_file: PathBuf::from("mod.rs"),
            locator: LocatorKind::LineWindow,
            options: AuditOptions::default(),
        }
    }
}

/// Accumulated result of auditing every mounted scope.
///
/// Routes and scan entries are grouped by scope in the order the root file declares them,
/// and keep file order within a scope.
#[derive(Debug, Default, Clone)]
pub struct AuditReport {
    pub root_prefix: String,
    pub scopes: Vec<ScopeMapping>,
    pub routes: Vec<RouteEntry>,
    pub scan_entries: Vec<ScanEntry>,
    /// Mounted module sources that could not be read
    pub skipped_files: Vec<PathBuf>,
}

impl AuditReport {
    /// Registered handlers whose declaration could not be located.
    pub fn unresolved(&self) -> impl Iterator<Item = &ScanEntry> {
        self.scan_entries.iter().filter(|entry| !entry.found)
    }
}

/// Runs the scope resolver and both extraction passes over a routes directory.
///
/// # Example
///
/// ```no_run
/// use route_audit::auditor::{AuditConfig, Auditor};
///
/// let report = Auditor::new(AuditConfig::default()).run().unwrap();
/// println!("{} routes", report.routes.len());
/// ```
pub struct Auditor {
    config: AuditConfig,
}

impl Auditor {
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    /// Audits every scope mounted by the root routing file.
    ///
    /// A mounted module whose source cannot be read is logged and skipped; the rest of the
    /// audit continues.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AuditError::RootFileUnreadable`] when the root routing file
    /// cannot be read.
    pub fn run(&self) -> Result<AuditReport> {
        let root_path = self.config.routes_dir.join(&self.config.root_file);
        let resolver = ScopeResolver::load(&root_path)?;

        let root_prefix = resolver.resolve_root_prefix();
        let scopes = resolver.resolve_sub_scopes();
        info!(
            "Root prefix '{}' with {} mounted scopes",
            root_prefix,
            scopes.len()
        );

        let mut report = AuditReport {
            root_prefix,
            ..AuditReport::default()
        };

        for scope in &scopes {
            let path = self.config.routes_dir.join(&scope.source_file);
            if !path.exists() {
                warn!("Missing file: {}", path.display());
                report.skipped_files.push(path);
                continue;
            }

            let file = match SourceFile::read(&path) {
                Ok(file) => file,
                Err(e) => {
                    warn!("Skipping scope '{}': {:#}", scope.base_path, e);
                    report.skipped_files.push(path);
                    continue;
                }
            };

            let url_prefix = format!("{}{}", report.root_prefix, scope.base_path);
            let locator = locator::for_file(self.config.locator, &file);
            let audit = audit_file(&file, &url_prefix, locator.as_ref(), self.config.options);

            debug!(
                "{}: {} routes, {} scan entries",
                file.display,
                audit.routes.len(),
                audit.scan_entries.len()
            );
            report.routes.extend(audit.routes);
            report.scan_entries.extend(audit.scan_entries);
        }

        report.scopes = scopes;
        Ok(report)
    }
}
