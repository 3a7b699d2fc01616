use std::path::PathBuf;

/// Result type alias for the auditor
pub type Result<T> = std::result::Result<T, AuditError>;

/// Error types for the auditor
#[derive(Debug)]
pub enum AuditError {
    /// The root routing file could not be read. Nothing can be audited without it.
    RootFileUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Two distinct source locations declare the same handler name.
    HandlerCollision {
        handler: String,
        first: String,
        second: String,
    },
}

impl std::fmt::Display for AuditError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            AuditError::RootFileUnreadable { path, source } => {
                write!(f, "cannot read root routing file {}: {}", path.display(), source)
            }
            AuditError::HandlerCollision {
                handler,
                first,
                second,
            } => write!(
                f,
                "handler name '{}' is declared at both {} and {}",
                handler, first, second
            ),
        }
    }
}

impl std::error::Error for AuditError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuditError::RootFileUnreadable { source, .. } => Some(source),
            AuditError::HandlerCollision { .. } => None,
        }
    }
}
