//! @dose
//! purpose: Declaration filter. Picks out the declarations that become facade code.
//!
//! invariants:
//!     - Exported type specs and exported free functions pass, in source order
//!     - Imports, consts and vars are ignored
//!
//! do-not:
//!     - Never pass a method, even an exported one; the alias of its receiver
//!       type already carries it

use crate::types::{Declaration, FuncDecl, ParsedFile, TypeDecl};

/// A declaration selected for rewriting, borrowed from the parsed file.
#[derive(Debug, Clone, Copy)]
pub enum Exported<'a> {
    Type(&'a TypeDecl),
    Func(&'a FuncDecl),
}

/// Classify every top-level declaration of `file`, keeping source order.
pub fn classify(file: &ParsedFile) -> Vec<Exported<'_>> {
    file.decls.iter().filter_map(classify_decl).collect()
}

fn classify_decl(decl: &Declaration) -> Option<Exported<'_>> {
    match decl {
        Declaration::Type(t) if t.exported => Some(Exported::Type(t)),
        Declaration::Func(f) if f.exported && !f.has_receiver => Some(Exported::Func(f)),
        _ => None,
    }
}
