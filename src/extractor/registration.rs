use crate::extractor::{is_suppressed, Annotation, FileAudit, ScanEntry};
use crate::locator::{Declaration, DeclarationLocator};
use crate::patterns::LOOKBACK;
use crate::source::SourceFile;
use log::{debug, warn};

/// Reconciles the scope-assembly function's attach calls with what extraction already found.
///
/// Registration is what makes a handler live, so every attached handler that the annotation
/// pass did not capture ends up in the scan report:
///
/// - no declaration anywhere in the file: `found: false`
/// - declaration with a method annotation in the lines above: a full route
/// - declaration without one: `found: true` with no method or sub-path
///
/// Declarations under the suppress marker are skipped. `pub` declarations get an advisory
/// warning since the scope already exposes them.
pub fn cross_check(
    file: &SourceFile,
    url_prefix: &str,
    locator: &dyn DeclarationLocator,
    audit: &mut FileAudit,
) {
    let registered = match locator.registrations() {
        Some(registered) => registered,
        None => {
            debug!("No scope-assembly function in {}", file.display);
            return;
        }
    };

    for handler in registered {
        if audit.has_found(&handler) {
            continue;
        }

        let declaration = match locator.declaration_named(&handler) {
            Some(declaration) => declaration,
            None => {
                warn!(
                    "Registered handler '{}' in {} has no declaration",
                    handler, file.display
                );
                audit.scan_entries.push(ScanEntry {
                    handler_name: handler,
                    found: false,
                    method: None,
                    sub_path: None,
                    source_location: file.unresolved_location(),
                });
                continue;
            }
        };

        if let Some(message) = visibility_warning(file, &handler, &declaration) {
            warn!("{}", message);
        }

        if is_suppressed(file, declaration.line) {
            debug!("Skipping suppressed registration '{}'", handler);
            continue;
        }

        let annotation = (declaration.line.saturating_sub(LOOKBACK)..=declaration.line)
            .filter_map(|line| file.lines.get(line))
            .find_map(|text| Annotation::parse(text));

        match annotation {
            Some(annotation) => {
                audit.record_route(file, url_prefix, &annotation, &declaration);
            }
            None => {
                debug!("Registered handler '{}' has no method annotation", handler);
                audit.scan_entries.push(ScanEntry {
                    handler_name: handler,
                    found: true,
                    method: None,
                    sub_path: None,
                    source_location: file.location(declaration.line),
                });
            }
        }
    }
}

/// Advisory for handlers that are both attached to the scope and declared `pub`.
fn visibility_warning(file: &SourceFile, handler: &str, declaration: &Declaration) -> Option<String> {
    declaration.is_public.then(|| {
        format!(
            "Scoped function '{}' in {} is 'pub'. Consider removing 'pub' for encapsulation.",
            handler,
            file.location(declaration.line)
        )
    })
}
