use anyhow::{Context, Result};
use log::debug;
use std::env;
use std::fs;
use std::path::Path;

/// One route source file held in memory as text and as lines.
///
/// All line indices handed around by the locators and extractors are 0-based
/// indices into [`SourceFile::lines`]; only rendered locations are 1-based.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path as shown in locations (relative to the working directory when possible)
    pub display: String,
    /// Full file content
    pub text: String,
    /// Content split on `\n`
    pub lines: Vec<String>,
}

impl SourceFile {
    /// Reads a source file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read(path: &Path) -> Result<Self> {
        debug!("Reading source file: {}", path.display());
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(Self::from_text(path, text))
    }

    /// Wraps already-loaded text.
    pub fn from_text(path: &Path, text: String) -> Self {
        let lines = text.split('\n').map(str::to_string).collect();
        Self {
            display: display_path(path),
            text,
            lines,
        }
    }

    /// `file:line` for a 0-based line index.
    pub fn location(&self, line: usize) -> String {
        format!("{}:{}", self.display, line + 1)
    }

    /// Location used when a declaration could not be found at all.
    pub fn unresolved_location(&self) -> String {
        format!("{}:??", self.display)
    }

    /// Up to `len` lines starting at `start`, joined with `\n`.
    pub fn window(&self, start: usize, len: usize) -> String {
        let start = start.min(self.lines.len());
        let end = start.saturating_add(len).min(self.lines.len());
        self.lines[start..end].join("\n")
    }

    /// Up to `len` lines immediately above `line` (not including it), joined with `\n`.
    pub fn lines_above(&self, line: usize, len: usize) -> String {
        let end = line.min(self.lines.len());
        let start = end.saturating_sub(len);
        self.lines[start..end].join("\n")
    }
}

fn display_path(path: &Path) -> String {
    env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> SourceFile {
        SourceFile::from_text(
            Path::new("routes/users_api.rs"),
            "l0\nl1\nl2\nl3\nl4".to_string(),
        )
    }

    #[test]
    fn test_locations_are_one_based() {
        let file = sample();
        assert_eq!(file.location(0), "routes/users_api.rs:1");
        assert_eq!(file.unresolved_location(), "routes/users_api.rs:??");
    }

    #[test]
    fn test_window_is_clamped() {
        let file = sample();
        assert_eq!(file.window(3, 20), "l3\nl4");
        assert_eq!(file.window(9, 2), "");
    }

    #[test]
    fn test_lines_above() {
        let file = sample();
        assert_eq!(file.lines_above(4, 3), "l1\nl2\nl3");
        assert_eq!(file.lines_above(1, 3), "l0");
        assert_eq!(file.lines_above(0, 3), "");
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = SourceFile::read(&temp_dir.path().join("nope.rs")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
