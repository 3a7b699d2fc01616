//! Route extraction and registration reconciliation for a single source file.
//!
//! Extraction runs in two passes over each file mounted by the root routing file:
//!
//! 1. [`annotated`] walks the file for method annotations such as `#[get("/")]` and binds each
//!    one to the async handler declared below it.
//! 2. [`registration`] reads the scope-assembly function's `.service(handler)` calls and
//!    reconciles every attached handler the first pass did not already capture.
//!
//! Both passes produce [`RouteEntry`] values (complete, actionable routes) and [`ScanEntry`]
//! values (the full audit trail, including handlers that could not be resolved).
//!
//! # Example
//!
//! ```
//! use route_audit::extractor::{audit_file, AuditOptions};
//! use route_audit::locator::line_window::LineWindowLocator;
//! use route_audit::source::SourceFile;
//! use std::path::Path;
//!
//! let file = SourceFile::from_text(
//!     Path::new("users_api.rs"),
//!     "#[get(\"/\")]\nasync fn list_users() {}\n".to_string(),
//! );
//! let locator = LineWindowLocator::new(&file);
//! let audit = audit_file(&file, "/api/users", &locator, AuditOptions::default());
//!
//! assert_eq!(audit.routes[0].url, "/api/users/");
//! ```

pub mod annotated;
pub mod registration;

use crate::locator::{Declaration, DeclarationLocator};
use crate::patterns::{ANNOTATION, AUTH_CONTEXT, LOOKBACK, SIGNATURE_WINDOW, SUPPRESS_MARKER};
use crate::source::SourceFile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP methods recognised in route annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Parses a method name case-insensitively.
    pub fn parse(method: &str) -> Option<Self> {
        match method.to_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "delete" => Some(HttpMethod::Delete),
            "patch" => Some(HttpMethod::Patch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A method annotation such as `#[post("/login")]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub method: HttpMethod,
    /// Declared sub-path, `"/"` when the annotation gives an empty string
    pub sub_path: String,
}

impl Annotation {
    /// Parses the first method annotation on a line.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = ANNOTATION.captures(line)?;
        let method = HttpMethod::parse(&caps[1])?;
        let sub_path = match &caps[2] {
            "" => "/".to_string(),
            path => path.to_string(),
        };
        Some(Self { method, sub_path })
    }
}

/// A route with complete metadata, ready for the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    /// Root prefix + base path + sub-path
    pub url: String,
    pub handler_name: String,
    pub method: HttpMethod,
    /// `file:line` of the handler declaration
    pub location: String,
    /// Whether the handler signature references the authentication context
    pub uses_auth_context: bool,
}

/// One reconciliation outcome in the scan report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanEntry {
    pub handler_name: String,
    /// `false` when the handler's declaration could not be located
    pub found: bool,
    pub method: Option<HttpMethod>,
    pub sub_path: Option<String>,
    pub source_location: String,
}

/// Options shared by both extraction passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditOptions {
    /// Report annotations with no reachable declaration as unresolved scan entries
    /// instead of dropping them.
    pub strict: bool,
}

/// Everything one source file contributes to the audit.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileAudit {
    pub routes: Vec<RouteEntry>,
    pub scan_entries: Vec<ScanEntry>,
}

impl FileAudit {
    /// Records a fully resolved handler as both a route and a found scan entry.
    fn record_route(
        &mut self,
        file: &SourceFile,
        url_prefix: &str,
        annotation: &Annotation,
        declaration: &Declaration,
    ) {
        let location = file.location(declaration.line);

        self.routes.push(RouteEntry {
            url: format!("{}{}", url_prefix, annotation.sub_path),
            handler_name: declaration.name.clone(),
            method: annotation.method,
            location: location.clone(),
            uses_auth_context: uses_auth_context(file, declaration.line),
        });
        self.scan_entries.push(ScanEntry {
            handler_name: declaration.name.clone(),
            found: true,
            method: Some(annotation.method),
            sub_path: Some(annotation.sub_path.clone()),
            source_location: location,
        });
    }

    /// Whether a found scan entry already exists for `handler`.
    fn has_found(&self, handler: &str) -> bool {
        self.scan_entries
            .iter()
            .any(|entry| entry.found && entry.handler_name == handler)
    }
}

/// Runs both extraction passes over one file.
///
/// `url_prefix` is the root prefix joined with the file's base path; every route URL is
/// `url_prefix` followed by the annotation's sub-path.
pub fn audit_file(
    file: &SourceFile,
    url_prefix: &str,
    locator: &dyn DeclarationLocator,
    options: AuditOptions,
) -> FileAudit {
    let mut audit = annotated::extract(file, url_prefix, locator, options);
    registration::cross_check(file, url_prefix, locator, &mut audit);
    audit
}

/// Whether the suppress marker appears in the lines right above `line`.
fn is_suppressed(file: &SourceFile, line: usize) -> bool {
    file.lines_above(line, LOOKBACK).contains(SUPPRESS_MARKER)
}

fn uses_auth_context(file: &SourceFile, line: usize) -> bool {
    file.window(line, SIGNATURE_WINDOW).contains(AUTH_CONTEXT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::line_window::LineWindowLocator;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    #[test]
    fn test_annotation_parse_normalises_empty_path() {
        assert_eq!(
            Annotation::parse(r#"#[post("")]"#),
            Some(Annotation {
                method: HttpMethod::Post,
                sub_path: "/".to_string(),
            })
        );
        assert_eq!(
            Annotation::parse(r#"    #[DELETE("/{id}")]"#),
            Some(Annotation {
                method: HttpMethod::Delete,
                sub_path: "/{id}".to_string(),
            })
        );
        assert_eq!(Annotation::parse("#[derive(Debug)]"), None);
    }

    #[test]
    fn test_scan_entry_serializes_nulls() {
        let entry = ScanEntry {
            handler_name: "delete_user".to_string(),
            found: false,
            method: None,
            sub_path: None,
            source_location: "users_api.rs:??".to_string(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "handlerName": "delete_user",
                "found": false,
                "method": null,
                "subPath": null,
                "sourceLocation": "users_api.rs:??"
            })
        );
    }

    #[test]
    fn test_audit_file_combines_both_passes() {
        let text = r#"#[get("/")]
async fn list_users(auth: AuthContext) {}

fn helper() {}

async fn unannotated() {}

pub fn scope() -> Scope {
    web::scope("")
        .service(list_users)
        .service(unannotated)
        .service(missing)
}
"#;
        let file = SourceFile::from_text(Path::new("users_api.rs"), text.to_string());
        let locator = LineWindowLocator::new(&file);
        let audit = audit_file(&file, "/api/users", &locator, AuditOptions::default());

        assert_eq!(audit.routes.len(), 1);
        assert!(audit.routes[0].uses_auth_context);

        let names: Vec<(&str, bool)> = audit
            .scan_entries
            .iter()
            .map(|e| (e.handler_name.as_str(), e.found))
            .collect();
        assert_eq!(
            names,
            vec![("list_users", true), ("unannotated", true), ("missing", false)]
        );
    }
}
