//! Declaration lookup behind a swappable backend.
//!
//! The route extractor and the registration cross-checker never search source text for
//! function declarations themselves. They ask a [`DeclarationLocator`], which answers three
//! questions about one file:
//!
//! - which async handler is declared next after a given line, within a window
//! - where the async handler with a given name is declared
//! - which handlers the scope-assembly function attaches
//!
//! Two backends exist:
//!
//! - [`line_window::LineWindowLocator`]: bounded line-window regular expressions (default)
//! - [`syntax::SyntaxLocator`]: a `syn` parse tree, with source lines recovered from spans

pub mod line_window;
pub mod syntax;

use crate::cli::LocatorKind;
use crate::source::SourceFile;
use log::warn;

/// An async function declaration found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Function name
    pub name: String,
    /// 0-based index of the line holding the declaration
    pub line: usize,
    /// Whether the declaration is marked `pub`
    pub is_public: bool,
}

/// Answers structural questions about one source file.
pub trait DeclarationLocator {
    /// Returns the first async declaration on lines `after + 1 .. after + window`.
    fn next_declaration(&self, after: usize, window: usize) -> Option<Declaration>;

    /// Returns the first async declaration called `name` anywhere in the file.
    fn declaration_named(&self, name: &str) -> Option<Declaration>;

    /// Returns the handlers attached by the scope-assembly function, in order of
    /// appearance, or `None` when the file has no such function.
    fn registrations(&self) -> Option<Vec<String>>;
}

/// Builds the locator selected on the command line for one file.
///
/// A file the syntax backend cannot parse is handled by the line-window backend instead.
pub fn for_file<'a>(kind: LocatorKind, file: &'a SourceFile) -> Box<dyn DeclarationLocator + 'a> {
    match kind {
        LocatorKind::LineWindow => Box::new(line_window::LineWindowLocator::new(file)),
        LocatorKind::Syntax => match syntax::SyntaxLocator::parse(file) {
            Ok(locator) => Box::new(locator),
            Err(e) => {
                warn!(
                    "Failed to parse {}: {}; falling back to line-window scanning",
                    file.display, e
                );
                Box::new(line_window::LineWindowLocator::new(file))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const HANDLERS: &str = r#"use actix_web::{get, web, Scope};

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok()
}

pub fn scope() -> Scope {
    web::scope("").service(index)
}
"#;

    #[test]
    fn test_backends_agree_on_valid_source() {
        let file = SourceFile::from_text(Path::new("a.rs"), HANDLERS.to_string());
        let line_window = for_file(LocatorKind::LineWindow, &file);
        let syntax = for_file(LocatorKind::Syntax, &file);

        assert_eq!(line_window.next_declaration(2, 15), syntax.next_declaration(2, 15));
        assert_eq!(line_window.declaration_named("index"), syntax.declaration_named("index"));
        assert_eq!(line_window.registrations(), syntax.registrations());
    }

    #[test]
    fn test_syntax_falls_back_on_unparsable_source() {
        let text = "#[get(\"/\")]\nasync fn broken( {\n";
        let file = SourceFile::from_text(Path::new("b.rs"), text.to_string());
        let locator = for_file(LocatorKind::Syntax, &file);

        let decl = locator.next_declaration(0, 15).unwrap();
        assert_eq!(decl.name, "broken");
        assert_eq!(decl.line, 1);
    }
}
