use crate::extractor::{is_suppressed, Annotation, AuditOptions, FileAudit, ScanEntry};
use crate::locator::DeclarationLocator;
use crate::patterns::DECLARATION_LOOKAHEAD;
use crate::source::SourceFile;
use log::debug;

/// Handler name recorded for an annotation that is not bound to any declaration.
pub const UNBOUND_HANDLER: &str = "<unbound>";

/// Binds every method annotation in the file to the async handler declared below it.
///
/// Each annotation looks ahead at most [`DECLARATION_LOOKAHEAD`] lines and takes the first
/// declaration it meets. Stacked annotations therefore all bind to the same handler. When the
/// suppress marker sits in the lines right above that declaration the annotation is dropped.
///
/// An annotation with no declaration in reach is dropped too, unless `options.strict` is set,
/// in which case it is reported as an unresolved scan entry located at the annotation itself.
pub fn extract(
    file: &SourceFile,
    url_prefix: &str,
    locator: &dyn DeclarationLocator,
    options: AuditOptions,
) -> FileAudit {
    let mut audit = FileAudit::default();

    for (line, text) in file.lines.iter().enumerate() {
        let annotation = match Annotation::parse(text) {
            Some(annotation) => annotation,
            None => continue,
        };

        match locator.next_declaration(line, DECLARATION_LOOKAHEAD) {
            Some(declaration) if is_suppressed(file, declaration.line) => {
                debug!(
                    "Skipping suppressed handler '{}' at {}",
                    declaration.name,
                    file.location(declaration.line)
                );
            }
            Some(declaration) => {
                debug!(
                    "Found {} {} -> {}",
                    annotation.method, annotation.sub_path, declaration.name
                );
                audit.record_route(file, url_prefix, &annotation, &declaration);
            }
            None if options.strict => {
                debug!("Unbound annotation at {}", file.location(line));
                audit.scan_entries.push(ScanEntry {
                    handler_name: UNBOUND_HANDLER.to_string(),
                    found: false,
                    method: Some(annotation.method),
                    sub_path: Some(annotation.sub_path),
                    source_location: file.location(line),
                });
            }
            None => {
                debug!("Dropping unbound annotation at {}", file.location(line));
            }
        }
    }

    audit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::HttpMethod;
    use crate::locator::line_window::LineWindowLocator;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn run(text: &str, options: AuditOptions) -> FileAudit {
        let file = SourceFile::from_text(Path::new("users_api.rs"), text.to_string());
        let locator = LineWindowLocator::new(&file);
        extract(&file, "/api/users", &locator, options)
    }

    #[test]
    fn test_basic_route() {
        let audit = run(
            r#"#[get("/")]
async fn list_users(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok()
}
"#,
            AuditOptions::default(),
        );

        assert_eq!(audit.routes.len(), 1);
        let route = &audit.routes[0];
        assert_eq!(route.url, "/api/users/");
        assert_eq!(route.handler_name, "list_users");
        assert_eq!(route.method, HttpMethod::Get);
        assert_eq!(route.location, "users_api.rs:2");
        assert!(!route.uses_auth_context);

        assert_eq!(
            audit.scan_entries,
            vec![ScanEntry {
                handler_name: "list_users".to_string(),
                found: true,
                method: Some(HttpMethod::Get),
                sub_path: Some("/".to_string()),
                source_location: "users_api.rs:2".to_string(),
            }]
        );
    }

    #[test]
    fn test_auth_context_in_signature() {
        let audit = run(
            r#"#[put("/{id}")]
async fn update_user(
    data: web::Data<AppState>,
    auth_context: AuthContext,
) -> impl Responder {
    HttpResponse::Ok()
}
"#,
            AuditOptions::default(),
        );

        assert_eq!(audit.routes[0].url, "/api/users/{id}");
        assert!(audit.routes[0].uses_auth_context);
    }

    #[test]
    fn test_stacked_annotations_bind_same_handler() {
        let audit = run(
            r#"#[get("/")]
#[post("/")]
async fn root_handler() {}
"#,
            AuditOptions::default(),
        );

        let methods: Vec<(HttpMethod, &str)> = audit
            .routes
            .iter()
            .map(|r| (r.method, r.handler_name.as_str()))
            .collect();
        assert_eq!(
            methods,
            vec![
                (HttpMethod::Get, "root_handler"),
                (HttpMethod::Post, "root_handler")
            ]
        );
        assert_eq!(audit.scan_entries.len(), 2);
        assert_eq!(audit.routes[0].location, audit.routes[1].location);
    }

    #[test]
    fn test_suppressed_handler_is_skipped() {
        let audit = run(
            r#"#[get("/internal")]
// @audit-ignore
async fn internal() {}
"#,
            AuditOptions::default(),
        );

        assert!(audit.routes.is_empty());
        assert!(audit.scan_entries.is_empty());
    }

    #[test]
    fn test_first_declaration_wins() {
        let audit = run(
            r#"#[get("/a")]
async fn first() {}
async fn second() {}
"#,
            AuditOptions::default(),
        );

        assert_eq!(audit.routes.len(), 1);
        assert_eq!(audit.routes[0].handler_name, "first");
    }

    #[test]
    fn test_declaration_beyond_lookahead_is_dropped() {
        let mut text = String::from("#[get(\"/far\")]\n");
        text.push_str(&"// filler\n".repeat(DECLARATION_LOOKAHEAD));
        text.push_str("async fn far_away() {}\n");

        let audit = run(&text, AuditOptions::default());
        assert!(audit.routes.is_empty());
        assert!(audit.scan_entries.is_empty());
    }

    #[test]
    fn test_strict_reports_unbound_annotation() {
        let mut text = String::from("// header\n#[delete(\"/far\")]\n");
        text.push_str(&"// filler\n".repeat(DECLARATION_LOOKAHEAD));
        text.push_str("async fn far_away() {}\n");

        let audit = run(&text, AuditOptions { strict: true });
        assert!(audit.routes.is_empty());
        assert_eq!(
            audit.scan_entries,
            vec![ScanEntry {
                handler_name: UNBOUND_HANDLER.to_string(),
                found: false,
                method: Some(HttpMethod::Delete),
                sub_path: Some("/far".to_string()),
                source_location: "users_api.rs:2".to_string(),
            }]
        );
    }

    #[test]
    fn test_strict_does_not_report_suppressed() {
        let audit = run(
            "#[get(\"/\")]\n// @audit-ignore\nasync fn hidden() {}\n",
            AuditOptions { strict: true },
        );

        assert!(audit.scan_entries.is_empty());
    }
}
