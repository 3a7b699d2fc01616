//! Route auditor - static checks of actix-web route declarations.
//!
//! The auditor reads a service's routing sources as text, finds every handler declared with a
//! method annotation (`#[get("/path")]`), reconciles those handlers with the ones actually
//! attached in each module's scope-assembly function (`.service(handler)`), and produces:
//!
//! - a route manifest keyed by handler name (`url`, `method`, `auth`)
//! - a scan report listing every reconciliation outcome, including unresolved handlers
//! - a table of all routes for the console
//!
//! # Architecture
//!
//! 1. [`scope_resolver`] - Reads the root routing file for the global prefix and mounted modules
//! 2. [`source`] - Loads one module source as text and lines
//! 3. [`locator`] - Finds handler declarations (line windows or a `syn` parse tree)
//! 4. [`extractor`] - Binds annotations to handlers and cross-checks registrations
//! 5. [`auditor`] - Runs the passes over every mounted scope in declaration order
//! 6. [`manifest`] - Projects routes into the keyed manifest
//! 7. [`serializer`] - Renders the manifest, scan report and route table
//!
//! # Example Usage
//!
//! ```no_run
//! use route_audit::{
//!     auditor::{AuditConfig, Auditor},
//!     manifest::{CollisionPolicy, RouteManifest},
//!     serializer::{render_manifest, serialize_scan_json},
//! };
//!
//! let report = Auditor::new(AuditConfig::default()).run().unwrap();
//! let manifest = RouteManifest::build(&report.routes, CollisionPolicy::LastWriteWins).unwrap();
//!
//! println!("{}", render_manifest(&manifest).unwrap());
//! println!("{}", serialize_scan_json(&report.scan_entries).unwrap());
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod auditor;
pub mod cli;
pub mod error;
pub mod extractor;
pub mod locator;
pub mod manifest;
pub mod patterns;
pub mod scope_resolver;
pub mod serializer;
pub mod source;
