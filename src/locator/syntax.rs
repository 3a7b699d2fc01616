use crate::locator::{Declaration, DeclarationLocator};
use crate::source::SourceFile;
use log::debug;
use syn::visit::{self, Visit};
use syn::{Expr, ExprMethodCall, ImplItemFn, ItemFn, ReturnType, Signature, Type, Visibility};

/// Locates declarations from a `syn` parse tree.
///
/// Only real `async fn` items (free functions and methods) count as declarations, so text in
/// comments and string literals is never mistaken for a handler.
#[derive(Debug)]
pub struct SyntaxLocator {
    /// Async declarations sorted by line
    declarations: Vec<Declaration>,
    registrations: Option<Vec<String>>,
}

impl SyntaxLocator {
    /// Parses the file and collects its async declarations.
    ///
    /// # Errors
    ///
    /// Returns the `syn` error when the file is not valid Rust.
    pub fn parse(file: &SourceFile) -> syn::Result<Self> {
        let syntax_tree = syn::parse_file(&file.text)?;

        let mut visitor = DeclarationVisitor::default();
        visitor.visit_file(&syntax_tree);
        visitor.declarations.sort_by_key(|decl| decl.line);

        debug!(
            "Parsed {}: {} async declarations",
            file.display,
            visitor.declarations.len()
        );

        Ok(Self {
            declarations: visitor.declarations,
            registrations: visitor.registrations,
        })
    }
}

impl DeclarationLocator for SyntaxLocator {
    fn next_declaration(&self, after: usize, window: usize) -> Option<Declaration> {
        let end = after.saturating_add(window);
        self.declarations
            .iter()
            .find(|decl| decl.line > after && decl.line < end)
            .cloned()
    }

    fn declaration_named(&self, name: &str) -> Option<Declaration> {
        self.declarations.iter().find(|decl| decl.name == name).cloned()
    }

    fn registrations(&self) -> Option<Vec<String>> {
        self.registrations.clone()
    }
}

/// Visitor collecting async declarations and the first scope-assembly function's attach calls
#[derive(Default)]
struct DeclarationVisitor {
    declarations: Vec<Declaration>,
    registrations: Option<Vec<String>>,
}

impl DeclarationVisitor {
    fn record(&mut self, vis: &Visibility, sig: &Signature) {
        if sig.asyncness.is_none() {
            return;
        }
        self.declarations.push(Declaration {
            name: sig.ident.to_string(),
            // Span lines are 1-based.
            line: sig.fn_token.span.start().line.saturating_sub(1),
            is_public: matches!(vis, Visibility::Public(_)),
        });
    }
}

impl<'ast> Visit<'ast> for DeclarationVisitor {
    fn visit_item_fn(&mut self, node: &'ast ItemFn) {
        self.record(&node.vis, &node.sig);

        if self.registrations.is_none() && is_scope_assembly(node) {
            let mut calls = ServiceCallVisitor::default();
            calls.visit_block(&node.block);
            self.registrations = Some(calls.handlers);
        }

        visit::visit_item_fn(self, node);
    }

    fn visit_impl_item_fn(&mut self, node: &'ast ImplItemFn) {
        self.record(&node.vis, &node.sig);
        visit::visit_impl_item_fn(self, node);
    }
}

/// `pub fn scope() -> Scope`
fn is_scope_assembly(item_fn: &ItemFn) -> bool {
    if item_fn.sig.ident != "scope"
        || !item_fn.sig.inputs.is_empty()
        || !matches!(item_fn.vis, Visibility::Public(_))
    {
        return false;
    }

    match &item_fn.sig.output {
        ReturnType::Type(_, ty) => match ty.as_ref() {
            Type::Path(type_path) => type_path
                .path
                .segments
                .last()
                .map(|segment| segment.ident == "Scope")
                .unwrap_or(false),
            _ => false,
        },
        ReturnType::Default => false,
    }
}

/// Collects `.service(handler)` arguments that are bare identifiers
#[derive(Default)]
struct ServiceCallVisitor {
    handlers: Vec<String>,
}

impl<'ast> Visit<'ast> for ServiceCallVisitor {
    fn visit_expr_method_call(&mut self, node: &'ast ExprMethodCall) {
        // The receiver holds the earlier calls of the chain, so recurse first to keep
        // source order.
        visit::visit_expr_method_call(self, node);

        if node.method != "service" || node.args.len() != 1 {
            return;
        }
        if let Some(Expr::Path(expr_path)) = node.args.first() {
            if expr_path.qself.is_none() {
                if let Some(ident) = expr_path.path.get_ident() {
                    self.handlers.push(ident.to_string());
                }
            }
        }
    }
}
