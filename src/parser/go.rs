//! @dose
//! purpose: Turns one `.go` file into a [`ParsedFile`]: the package name plus every
//!     top-level declaration in source order, parsed with tree-sitter.
//!
//! when-editing:
//!     - !tree-sitter is error tolerant, so syntax errors must be looked for
//!       explicitly with `has_error()`
//!     - Field names (`name`, `type_parameters`, `parameters`, `result`) come
//!       from the tree-sitter-go grammar
//!
//! invariants:
//!     - Function bodies are never copied; only the signature text up to the body
//!     - Declarations keep source order
//!
//! do-not:
//!     - Never treat a comment that shares its line with code as a doc comment
//!
//! gotchas:
//!     - Go has no export keyword; an upper-case first letter makes a name visible
//!     - Grouped `type ( ... )` specs carry their own doc comments; the comment
//!       above `type (` is kept once, on the first exported spec
//!     - A line comment after a type spec trails it and is not the next
//!       spec's doc

use crate::parser::ParseError;
use crate::types::{Declaration, FuncDecl, Param, ParsedFile, TypeDecl, TypeParams};
use std::path::Path;
use tree_sitter::{Node, Parser, TreeCursor};

/// Check if identifier is exported (starts with uppercase)
pub fn is_exported(name: &str) -> bool {
    name.chars()
        .next()
        .map(|c| c.is_uppercase())
        .unwrap_or(false)
}

/// Parser for Go files
#[derive(Clone)]
pub struct GoParser;

impl GoParser {
    pub fn new() -> Self {
        Self
    }

    fn create_parser(&self) -> Result<Parser, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| ParseError::Language(e.to_string()))?;
        Ok(parser)
    }

    fn node_text(&self, node: Node, source: &str) -> String {
        source[node.start_byte()..node.end_byte()].to_string()
    }

    /// Parse a single file's source into its top-level declarations.
    pub fn parse_file(&self, source: &str, path: &Path) -> Result<ParsedFile, ParseError> {
        let mut parser = self.create_parser()?;
        let tree = parser.parse(source, None).ok_or_else(|| ParseError::Syntax {
            path: path.to_path_buf(),
            line: 1,
            column: 1,
        })?;

        let root = tree.root_node();
        if root.has_error() {
            let (line, column) = first_error_position(&mut root.walk()).unwrap_or((1, 1));
            return Err(ParseError::Syntax {
                path: path.to_path_buf(),
                line,
                column,
            });
        }

        let package = self
            .package_name(root, source)
            .ok_or_else(|| ParseError::MissingPackage(path.to_path_buf()))?;

        let mut decls = Vec::new();
        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            match node.kind() {
                "function_declaration" => {
                    decls.extend(self.function(node, source, false).map(Declaration::Func));
                }
                "method_declaration" => {
                    decls.extend(self.function(node, source, true).map(Declaration::Func));
                }
                "type_declaration" => {
                    decls.extend(self.type_specs(node, source).into_iter().map(Declaration::Type));
                }
                "package_clause" | "comment" => {}
                other => decls.push(Declaration::Other {
                    kind: other.to_string(),
                }),
            }
        }

        Ok(ParsedFile {
            path: path.to_path_buf(),
            package,
            decls,
        })
    }

    fn package_name(&self, root: Node, source: &str) -> Option<String> {
        let mut cursor = root.walk();
        let clause = root
            .named_children(&mut cursor)
            .find(|n| n.kind() == "package_clause")?;

        let mut inner = clause.walk();
        let name = clause
            .named_children(&mut inner)
            .find(|n| n.kind() == "package_identifier")
            .map(|n| self.node_text(n, source));
        name
    }

    fn function(&self, node: Node, source: &str, has_receiver: bool) -> Option<FuncDecl> {
        let name = self.node_text(node.child_by_field_name("name")?, source);

        // Everything from `func` up to the body, verbatim
        let sig_end = node
            .child_by_field_name("body")
            .map(|b| b.start_byte())
            .unwrap_or_else(|| node.end_byte());
        let signature = source[node.start_byte()..sig_end].trim_end().to_string();

        let params = node
            .child_by_field_name("parameters")
            .map(|p| self.params(p, source))
            .unwrap_or_default();

        let result = node
            .child_by_field_name("result")
            .map(|r| self.node_text(r, source));

        let type_params = node
            .child_by_field_name("type_parameters")
            .map(|t| self.type_params(t, source));

        Some(FuncDecl {
            exported: is_exported(&name),
            name,
            has_receiver,
            type_params,
            params,
            result,
            signature,
            doc: self.doc_comment(node, source),
        })
    }

    fn params(&self, list: Node, source: &str) -> Vec<Param> {
        let mut params = Vec::new();
        let mut cursor = list.walk();

        for decl in list.named_children(&mut cursor) {
            let variadic = match decl.kind() {
                "parameter_declaration" => false,
                "variadic_parameter_declaration" => true,
                _ => continue,
            };

            let mut inner = decl.walk();
            let names = decl
                .children_by_field_name("name", &mut inner)
                .map(|n| self.node_text(n, source))
                .collect();

            let ty = decl
                .child_by_field_name("type")
                .map(|t| self.node_text(t, source))
                .unwrap_or_default();

            params.push(Param {
                names,
                ty,
                variadic,
            });
        }

        params
    }

    fn type_params(&self, list: Node, source: &str) -> TypeParams {
        let mut names = Vec::new();
        let mut cursor = list.walk();

        for decl in list.named_children(&mut cursor) {
            if decl.kind() == "comment" {
                continue;
            }
            let mut inner = decl.walk();
            names.extend(
                decl.children_by_field_name("name", &mut inner)
                    .map(|n| self.node_text(n, source)),
            );
        }

        TypeParams {
            text: self.node_text(list, source),
            names,
        }
    }

    fn type_specs(&self, node: Node, source: &str) -> Vec<TypeDecl> {
        // `type ( ... )` has an anonymous "(" child
        let mut children = node.walk();
        let grouped = node.children(&mut children).any(|c| c.kind() == "(");
        let mut decl_doc = self.doc_comment(node, source);

        let mut specs = Vec::new();
        let mut cursor = node.walk();

        for spec in node.named_children(&mut cursor) {
            let is_alias = match spec.kind() {
                "type_spec" => false,
                "type_alias" => true,
                _ => continue,
            };

            let Some(name_node) = spec.child_by_field_name("name") else {
                continue;
            };
            let name = self.node_text(name_node, source);
            let exported = is_exported(&name);

            // A group's own doc goes to its first exported spec
            let doc = if grouped {
                let own = self.doc_comment(spec, source);
                match (exported.then(|| decl_doc.take()).flatten(), own) {
                    (Some(group), Some(own)) => Some(format!("{}\n{}", group, own)),
                    (group, own) => group.or(own),
                }
            } else {
                decl_doc.clone()
            };

            let comment = self.trailing_comment(spec, source).or_else(|| {
                if grouped {
                    None
                } else {
                    self.trailing_comment(node, source)
                }
            });

            specs.push(TypeDecl {
                exported,
                name,
                is_alias,
                type_params: spec
                    .child_by_field_name("type_parameters")
                    .map(|t| self.type_params(t, source)),
                doc,
                comment,
            });
        }

        specs
    }

    /// A comment that starts on the line where `node` ends.
    fn trailing_comment(&self, node: Node, source: &str) -> Option<String> {
        let next = node.next_named_sibling()?;
        (next.kind() == "comment" && next.start_position().row == node.end_position().row)
            .then(|| self.node_text(next, source))
    }

    /// Collect the comment lines directly above `node`.
    ///
    /// The comments must be contiguous and end on the line right before the
    /// node. A comment that shares its line with earlier code trails that code
    /// and ends the search.
    fn doc_comment(&self, node: Node, source: &str) -> Option<String> {
        let mut lines = Vec::new();
        let mut next_row = node.start_position().row;
        let mut current = node.prev_named_sibling();

        while let Some(prev) = current {
            if prev.kind() != "comment" || prev.end_position().row + 1 != next_row {
                break;
            }
            let line_start = source[..prev.start_byte()]
                .rfind('\n')
                .map(|i| i + 1)
                .unwrap_or(0);
            if !source[line_start..prev.start_byte()].trim().is_empty() {
                break;
            }
            lines.push(self.node_text(prev, source));
            next_row = prev.start_position().row;
            current = prev.prev_named_sibling();
        }

        if lines.is_empty() {
            return None;
        }
        lines.reverse();
        Some(lines.join("\n"))
    }
}

/// 1-based line/column of the first ERROR or MISSING node.
fn first_error_position(cursor: &mut TreeCursor) -> Option<(usize, usize)> {
    loop {
        let node = cursor.node();

        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            return Some((pos.row + 1, pos.column + 1));
        }

        if node.has_error() && cursor.goto_first_child() {
            let found = first_error_position(cursor);
            cursor.goto_parent();
            if found.is_some() {
                return found;
            }
        }

        if !cursor.goto_next_sibling() {
            return None;
        }
    }
}

impl Default for GoParser {
    fn default() -> Self {
        Self::new()
    }
}
