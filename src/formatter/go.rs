//! @dose
//! purpose: Renders rewritten declarations as gofmt-style Go source.
//!
//! invariants:
//!     - Stub bodies are indented with a single tab, `{` stays on the signature line
//!     - A function block, or any declaration carrying a doc comment, is set off
//!       by a blank line; plain alias lines are kept together
//!
//! gotchas:
//!     - Comment lines lose trailing whitespace and are otherwise kept verbatim

use crate::types::{AliasLine, RewrittenDecl, StubFunction};

/// Optional prelude of a generated file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileHeader {
    /// Name for the `package` clause
    pub package: Option<String>,
    /// Full import line, e.g. `import "example.org/pkg"`
    pub import: Option<String>,
}

pub fn render_comment(doc: &str) -> String {
    doc.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_alias(alias: &AliasLine) -> String {
    let mut out = String::new();
    if let Some(doc) = &alias.doc {
        out.push_str(&render_comment(doc));
        out.push('\n');
    }

    match &alias.type_params {
        Some(tp) => out.push_str(&format!(
            "type {}{} = {}.{}[{}]",
            alias.name,
            tp.text,
            alias.qualifier,
            alias.name,
            tp.names.join(", ")
        )),
        None => out.push_str(&format!(
            "type {} = {}.{}",
            alias.name, alias.qualifier, alias.name
        )),
    }
    if let Some(comment) = &alias.comment {
        out.push(' ');
        out.push_str(comment.trim_end());
    }
    out
}

pub fn render_stub(stub: &StubFunction) -> String {
    let mut out = String::new();
    if let Some(doc) = &stub.doc {
        out.push_str(&render_comment(doc));
        out.push('\n');
    }
    out.push_str(&format!("{} {{\n\t{}\n}}", stub.signature, stub.call()));
    out
}

fn render_decl(decl: &RewrittenDecl) -> String {
    match decl {
        RewrittenDecl::Alias(a) => render_alias(a),
        RewrittenDecl::Stub(s) => render_stub(s),
    }
}

fn stands_alone(decl: &RewrittenDecl) -> bool {
    matches!(decl, RewrittenDecl::Stub(_)) || decl.doc().is_some()
}

/// Render declarations in order. Empty input renders as an empty string;
/// anything else ends with a newline.
pub fn render_decls(decls: &[RewrittenDecl]) -> String {
    let mut out = String::new();
    let mut previous: Option<&RewrittenDecl> = None;

    for decl in decls {
        if let Some(prev) = previous {
            if stands_alone(prev) || stands_alone(decl) {
                out.push('\n');
            }
        }
        out.push_str(&render_decl(decl));
        out.push('\n');
        previous = Some(decl);
    }

    out
}

/// Header sections followed by the declarations, each section separated by
/// one blank line.
pub fn render_file(header: &FileHeader, decls: &[RewrittenDecl]) -> String {
    let mut sections = Vec::new();
    if let Some(package) = &header.package {
        sections.push(format!("package {}\n", package));
    }
    if let Some(import) = &header.import {
        sections.push(format!("{}\n", import));
    }
    let body = render_decls(decls);
    if !body.is_empty() {
        sections.push(body);
    }
    sections.join("\n")
}
