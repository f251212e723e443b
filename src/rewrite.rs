//! @dose
//! purpose: Declaration rewriter. Exported types become alias lines and exported
//!     free functions become forwarding stubs whose body is a single call into
//!     the source package.
//!
//! when-editing:
//!     - !Arguments are passed by name in declaration order
//!
//! invariants:
//!     - A signature that needs no synthesized names keeps its text byte for byte
//!     - No `return` is added; stub and callee share one signature
//!
//! gotchas:
//!     - Parameters that cannot be named in a call (unnamed, or `_`) get
//!       positional names `p0`, `p1`, ... and the parameter list is rebuilt
//!     - Variadic spread is off unless RewriteOptions::spread_variadic is set

use crate::filter::{classify, Exported};
use crate::qualifier::{Qualifier, QualifierStyle};
use crate::types::{AliasLine, FuncDecl, ParsedFile, RewrittenDecl, StubFunction, TypeDecl};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct RewriteOptions {
    pub style: QualifierStyle,
    /// Carry doc comments over to the generated declarations
    pub comments: bool,
    /// Forward the variadic parameter as `args...`
    pub spread_variadic: bool,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            style: QualifierStyle::Short,
            comments: true,
            spread_variadic: false,
        }
    }
}

/// Rewrite every exported declaration of `file`, in source order.
pub fn rewrite_file(
    file: &ParsedFile,
    qualifier: &Qualifier,
    options: &RewriteOptions,
) -> Vec<RewrittenDecl> {
    let prefix = qualifier.prefix(options.style);

    classify(file)
        .into_iter()
        .map(|exported| match exported {
            Exported::Type(t) => RewrittenDecl::Alias(rewrite_type(t, prefix, options)),
            Exported::Func(f) => RewrittenDecl::Stub(rewrite_func(f, prefix, options)),
        })
        .collect()
}

pub fn rewrite_type(decl: &TypeDecl, qualifier: &str, options: &RewriteOptions) -> AliasLine {
    AliasLine {
        name: decl.name.clone(),
        qualifier: qualifier.to_string(),
        type_params: decl.type_params.clone(),
        doc: doc_if(options.comments, &decl.doc),
        comment: doc_if(options.comments, &decl.comment),
    }
}

pub fn rewrite_func(decl: &FuncDecl, qualifier: &str, options: &RewriteOptions) -> StubFunction {
    let (signature, args) = forwarding(decl);

    StubFunction {
        name: decl.name.clone(),
        signature,
        qualifier: qualifier.to_string(),
        type_args: decl
            .type_params
            .as_ref()
            .map(|tp| tp.names.clone())
            .unwrap_or_default(),
        args,
        spread_last: options.spread_variadic && decl.is_variadic(),
        doc: doc_if(options.comments, &decl.doc),
    }
}

fn doc_if(enabled: bool, doc: &Option<String>) -> Option<String> {
    if enabled {
        doc.clone()
    } else {
        None
    }
}

/// Stub signature and the flattened argument names to forward.
fn forwarding(decl: &FuncDecl) -> (String, Vec<String>) {
    let needs_names = decl
        .params
        .iter()
        .any(|p| p.names.is_empty() || p.names.iter().any(|n| n == "_"));

    if !needs_names {
        let args = decl
            .params
            .iter()
            .flat_map(|p| p.names.iter().cloned())
            .collect();
        return (decl.signature.clone(), args);
    }

    log::debug!("Naming unnamed parameters of {}", decl.name);

    let mut taken: HashSet<String> = decl
        .params
        .iter()
        .flat_map(|p| p.names.iter().cloned())
        .collect();
    let mut position = 0;
    let mut args = Vec::new();
    let mut groups = Vec::new();

    for param in &decl.params {
        let count = param.names.len().max(1);
        let names: Vec<String> = (0..count)
            .map(|i| match param.names.get(i).filter(|n| n.as_str() != "_") {
                Some(name) => name.clone(),
                None => fresh_name(position + i, &mut taken),
            })
            .collect();
        position += count;
        args.extend(names.iter().cloned());

        let ty = if param.variadic {
            format!("...{}", param.ty)
        } else {
            param.ty.clone()
        };
        groups.push(format!("{} {}", names.join(", "), ty));
    }

    let mut signature = format!("func {}", decl.name);
    if let Some(tp) = &decl.type_params {
        signature.push_str(&tp.text);
    }
    signature.push('(');
    signature.push_str(&groups.join(", "));
    signature.push(')');
    if let Some(result) = &decl.result {
        signature.push(' ');
        signature.push_str(result);
    }

    (signature, args)
}

/// `p<position>`, suffixed with `_` until it no longer clashes.
fn fresh_name(position: usize, taken: &mut HashSet<String>) -> String {
    let mut name = format!("p{}", position);
    while taken.contains(&name) {
        name.push('_');
    }
    taken.insert(name.clone());
    name
}
