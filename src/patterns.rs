//! Text patterns recognised by the auditor.
//!
//! The auditor approximates source structure with line-oriented regular expressions.
//! Every pattern is compiled once and shared by the scope resolver, the line-window
//! locator and both extraction passes.

use once_cell::sync::Lazy;
use regex::Regex;

/// Inline directive that excludes the next handler declaration from the audit.
pub const SUPPRESS_MARKER: &str = "@audit-ignore";

/// Extractor type whose presence in a handler signature marks the route as authenticated.
pub const AUTH_CONTEXT: &str = "AuthContext";

/// Lines inspected after an annotation when looking for its handler declaration.
pub const DECLARATION_LOOKAHEAD: usize = 15;

/// Lines inspected above a declaration for the suppress marker or a method annotation.
pub const LOOKBACK: usize = 3;

/// Lines, starting at the declaration, inspected for an authentication-context reference.
pub const SIGNATURE_WINDOW: usize = 20;

/// `#[get("/path")]`, optionally qualified as `#[actix_web::get("/path")]`.
pub static ANNOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)#\[(?:actix_web::)?(get|post|put|delete|patch)\("([^"]*)"\)\]"#)
        .expect("annotation pattern is valid")
});

/// `async fn name`
pub static ASYNC_FN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"async\s+fn\s+(\w+)").expect("async fn pattern is valid"));

/// `pub async fn`, the visibility the cross-checker warns about.
pub static PUB_ASYNC_FN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"pub\s+async\s+fn").expect("pub async fn pattern is valid"));

/// Outermost `web::scope("/prefix")` in the root routing file.
pub static ROOT_SCOPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"web::scope\("([^"]+)"\)"#).expect("root scope pattern is valid"));

/// `scoped("/base", module::path::scope(..))`, with optional arguments between the
/// base path and the module call. Each of those arguments may hold one parenthesised group,
/// and arguments may wrap onto new lines.
pub static MOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"scoped\(\s*"([^"]+)"\s*,(?:[^(),]*(?:\([^()]*\))?[^(),]*,)*\s*([\w:]+)::scope\("#)
        .expect("mount pattern is valid")
});

/// Body of `pub fn scope() -> Scope { ... }` up to the first closing brace.
pub static SCOPE_FN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"pub\s+fn\s+scope\s*\(\)\s*->\s*Scope\s*\{([\s\S]*?)\}")
        .expect("scope fn pattern is valid")
});

/// `.service(handler)`
pub static SERVICE_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.service\((\w+)\)").expect("service pattern is valid"));

/// Builds the pattern matching the declaration of one specific async handler.
pub fn async_fn_named(name: &str) -> Regex {
    // An escaped identifier always yields a valid pattern.
    Regex::new(&format!(r"async\s+fn\s+{}\b", regex::escape(name)))
        .expect("escaped handler name is a valid pattern")
}
