use crate::locator::{Declaration, DeclarationLocator};
use crate::patterns::{async_fn_named, ASYNC_FN, PUB_ASYNC_FN, SCOPE_FN, SERVICE_CALL};
use crate::source::SourceFile;

/// Locates declarations with per-line regular expressions.
///
/// Matches anywhere on a line, including inside comments and string literals. This is the
/// behavior the manifest has always been generated with, so it stays the default.
pub struct LineWindowLocator<'a> {
    file: &'a SourceFile,
}

impl<'a> LineWindowLocator<'a> {
    pub fn new(file: &'a SourceFile) -> Self {
        Self { file }
    }

    fn declaration_at(&self, line: usize, name: String) -> Declaration {
        Declaration {
            name,
            line,
            is_public: PUB_ASYNC_FN.is_match(&self.file.lines[line]),
        }
    }
}

impl DeclarationLocator for LineWindowLocator<'_> {
    fn next_declaration(&self, after: usize, window: usize) -> Option<Declaration> {
        let end = after.saturating_add(window).min(self.file.lines.len());
        (after + 1..end).find_map(|line| {
            ASYNC_FN
                .captures(&self.file.lines[line])
                .map(|caps| self.declaration_at(line, caps[1].to_string()))
        })
    }

    fn declaration_named(&self, name: &str) -> Option<Declaration> {
        let pattern = async_fn_named(name);
        self.file
            .lines
            .iter()
            .position(|line| pattern.is_match(line))
            .map(|line| self.declaration_at(line, name.to_string()))
    }

    fn registrations(&self) -> Option<Vec<String>> {
        let body = SCOPE_FN.captures(&self.file.text)?;
        Some(
            SERVICE_CALL
                .captures_iter(&body[1])
                .map(|caps| caps[1].to_string())
                .collect(),
        )
    }
}
