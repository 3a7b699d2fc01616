use crate::error::{AuditError, Result};
use crate::patterns::{MOUNT, ROOT_SCOPE};
use log::debug;
use std::fs;
use std::path::Path;

/// File extension appended to a mounted module's last path segment.
const SOURCE_EXTENSION: &str = ".rs";

/// One `(base path, source file)` pair mounted by the root routing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeMapping {
    /// Path the module is mounted at, e.g. `/users`
    pub base_path: String,
    /// File name of the module source, e.g. `users_api.rs`
    pub source_file: String,
}

/// Reads the central routing file and works out the route tree it assembles.
///
/// The resolver only ever reads text. It recognises the outermost
/// `web::scope("/prefix")` call and every `scoped("/base", module::scope(..))` mount,
/// in declaration order.
///
/// # Example
///
/// ```
/// use route_audit::scope_resolver::ScopeResolver;
///
/// let resolver = ScopeResolver::new(r#"
///     web::scope("/api")
///         .service(scoped("/users", users_api::scope()))
/// "#.to_string());
///
/// assert_eq!(resolver.resolve_root_prefix(), "/api");
/// assert_eq!(resolver.resolve_sub_scopes()[0].source_file, "users_api.rs");
/// ```
pub struct ScopeResolver {
    text: String,
}

impl ScopeResolver {
    pub fn new(text: String) -> Self {
        Self { text }
    }

    /// Reads the root routing file.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::RootFileUnreadable`] when the file cannot be read. This is the
    /// one failure that aborts a whole audit run.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Reading root routing file: {}", path.display());
        let text = fs::read_to_string(path).map_err(|source| AuditError::RootFileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(text))
    }

    /// Returns the string literal of the outermost scope declaration, or `""` when there is none.
    pub fn resolve_root_prefix(&self) -> String {
        ROOT_SCOPE
            .captures(&self.text)
            .map(|caps| caps[1].to_string())
            .unwrap_or_default()
    }

    /// Returns every mounted sub-scope in the order it is declared.
    pub fn resolve_sub_scopes(&self) -> Vec<ScopeMapping> {
        let scopes: Vec<ScopeMapping> = MOUNT
            .captures_iter(&self.text)
            .map(|caps| ScopeMapping {
                base_path: caps[1].to_string(),
                source_file: module_source_file(&caps[2]),
            })
            .collect();

        debug!("Resolved {} sub-scopes", scopes.len());
        scopes
    }
}

/// `crate::routes::users_api` -> `users_api.rs`
fn module_source_file(module_path: &str) -> String {
    let last = module_path.rsplit("::").next().unwrap_or(module_path);
    format!("{}{}", last, SOURCE_EXTENSION)
}
