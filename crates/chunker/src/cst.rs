//! CST boundary extractor.
//!
//! Parses source code with a grammar from the [`ParserRuntime`] and walks the
//! whole tree in pre-order, emitting a boundary segment for every node whose
//! kind appears in the language's boundary-node-type table.
//!
//! The traversal deliberately does not stop at a matched node: a method
//! nested inside a class is emitted as its own boundary in addition to the
//! enclosing class, so nested constructs produce overlapping segments. That
//! gives the retrieval layer both the coarse and the fine-grained unit to
//! embed.

use tree_sitter::Node;

use crate::error::{ChunkerError, Result};
use crate::grammar::ParserRuntime;
use crate::language::Language;
use crate::types::{Boundary, BoundaryKind, Segment};

/// Per-language mapping from semantic category to the grammar node kinds
/// that count as that category.
type BoundaryNodeTypes = &'static [(BoundaryKind, &'static [&'static str])];

const RUST_BOUNDARIES: BoundaryNodeTypes = &[
    (BoundaryKind::Function, &["function_item"]),
    (BoundaryKind::Struct, &["struct_item"]),
    (BoundaryKind::Enum, &["enum_item"]),
    (BoundaryKind::Interface, &["trait_item"]),
    (BoundaryKind::Impl, &["impl_item"]),
    (BoundaryKind::Module, &["mod_item"]),
    (BoundaryKind::Const, &["const_item", "static_item"]),
    (BoundaryKind::Imports, &["use_declaration"]),
];

const PYTHON_BOUNDARIES: BoundaryNodeTypes = &[
    (BoundaryKind::Function, &["function_definition"]),
    (BoundaryKind::Class, &["class_definition"]),
    (
        BoundaryKind::Imports,
        &["import_statement", "import_from_statement"],
    ),
];

const JAVASCRIPT_BOUNDARIES: BoundaryNodeTypes = &[
    (
        BoundaryKind::Function,
        &[
            "function_declaration",
            "generator_function_declaration",
            "arrow_function",
            "function_expression",
        ],
    ),
    (BoundaryKind::Method, &["method_definition"]),
    (BoundaryKind::Class, &["class_declaration"]),
    (BoundaryKind::Imports, &["import_statement"]),
];

const TYPESCRIPT_BOUNDARIES: BoundaryNodeTypes = &[
    (
        BoundaryKind::Function,
        &[
            "function_declaration",
            "generator_function_declaration",
            "arrow_function",
            "function_expression",
        ],
    ),
    (BoundaryKind::Method, &["method_definition"]),
    (BoundaryKind::Class, &["class_declaration"]),
    (BoundaryKind::Interface, &["interface_declaration"]),
    (BoundaryKind::TypeAlias, &["type_alias_declaration"]),
    (BoundaryKind::Enum, &["enum_declaration"]),
    (BoundaryKind::Imports, &["import_statement"]),
];

const GO_BOUNDARIES: BoundaryNodeTypes = &[
    (BoundaryKind::Function, &["function_declaration"]),
    (BoundaryKind::Method, &["method_declaration"]),
    (BoundaryKind::TypeAlias, &["type_declaration"]),
    (BoundaryKind::Imports, &["import_declaration"]),
];

const JAVA_BOUNDARIES: BoundaryNodeTypes = &[
    (
        BoundaryKind::Method,
        &["method_declaration", "constructor_declaration"],
    ),
    (BoundaryKind::Class, &["class_declaration"]),
    (BoundaryKind::Interface, &["interface_declaration"]),
    (BoundaryKind::Enum, &["enum_declaration"]),
    (BoundaryKind::Imports, &["import_declaration"]),
];

/// Boundary table for a language. Languages without a dedicated table fall
/// back to the JavaScript one.
#[must_use]
pub fn boundary_table(language: Language) -> BoundaryNodeTypes {
    match language {
        Language::Rust => RUST_BOUNDARIES,
        Language::Python => PYTHON_BOUNDARIES,
        Language::TypeScript => TYPESCRIPT_BOUNDARIES,
        Language::Go => GO_BOUNDARIES,
        Language::Java => JAVA_BOUNDARIES,
        _ => JAVASCRIPT_BOUNDARIES,
    }
}

/// Parse `code` and emit one segment per boundary node, in pre-order.
///
/// Segments carry the node's verbatim text and character offsets; no size
/// splitting happens here.
///
/// # Errors
///
/// Fails when no parser is available for `language` or the parse produced no
/// tree. Both are soft failures to the orchestrator, which falls through to
/// the pattern-based segmenter.
pub fn extract_boundaries(
    code: &str,
    language: Language,
    runtime: &mut ParserRuntime,
) -> Result<Vec<Segment>> {
    let parser = runtime
        .parser_for(language)
        .ok_or_else(|| ChunkerError::no_parser(language.as_str()))?;

    let tree = parser
        .parse(code, None)
        .ok_or_else(|| ChunkerError::parse("tree-sitter produced no syntax tree"))?;

    let table = boundary_table(language);
    // Node ranges are byte offsets; chunk offsets are character positions.
    let char_starts: Vec<usize> = code.char_indices().map(|(byte, _)| byte).collect();

    let mut segments = Vec::new();
    visit(tree.root_node(), code, language, table, &char_starts, &mut segments);
    Ok(segments)
}

fn visit(
    node: Node,
    code: &str,
    language: Language,
    table: BoundaryNodeTypes,
    char_starts: &[usize],
    out: &mut Vec<Segment>,
) {
    if let Some(kind) = kind_for(table, node.kind()) {
        if let Some(text) = code.get(node.start_byte()..node.end_byte()) {
            let mut boundary = Boundary::of_kind(kind);
            boundary.name = extract_name(node, code, language);
            out.push(Segment {
                content: text.to_string(),
                start: byte_to_char(char_starts, node.start_byte()),
                end: byte_to_char(char_starts, node.end_byte()),
                boundary,
            });
        }
    }

    // Children of a matched boundary are still visited: nested declarations
    // become their own segments.
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(child, code, language, table, char_starts, out);
    }
}

fn kind_for(table: BoundaryNodeTypes, node_kind: &str) -> Option<BoundaryKind> {
    table
        .iter()
        .find(|(_, kinds)| kinds.contains(&node_kind))
        .map(|(kind, _)| *kind)
}

fn byte_to_char(char_starts: &[usize], byte: usize) -> usize {
    char_starts.partition_point(|&start| start < byte)
}

/// Extract a human-readable name for a boundary node.
///
/// Prefers the grammar's `name` field, then language-specific rules (an arrow
/// function takes the variable name from its declarator parent, a method
/// definition its `key` field), then the first identifier-kind child.
fn extract_name(node: Node, code: &str, language: Language) -> Option<String> {
    if let Some(name) = field_text(node, "name", code) {
        return Some(name);
    }

    match language {
        Language::JavaScript | Language::TypeScript => {
            if node.kind() == "arrow_function" || node.kind() == "function_expression" {
                let parent = node.parent()?;
                if parent.kind() == "variable_declarator" || parent.kind() == "pair" {
                    if let Some(name) = field_text(parent, "name", code)
                        .or_else(|| field_text(parent, "key", code))
                    {
                        return Some(name);
                    }
                }
            }
            if node.kind() == "method_definition" {
                if let Some(name) = field_text(node, "key", code) {
                    return Some(name);
                }
            }
        }
        _ => {}
    }

    first_identifier_child(node, code)
}

fn field_text(node: Node, field: &str, code: &str) -> Option<String> {
    let child = node.child_by_field_name(field)?;
    code.get(child.start_byte()..child.end_byte())
        .map(str::to_string)
}

fn first_identifier_child(node: Node, code: &str) -> Option<String> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if matches!(
            child.kind(),
            "identifier" | "type_identifier" | "field_identifier" | "property_identifier"
        ) {
            return code
                .get(child.start_byte()..child.end_byte())
                .map(str::to_string);
        }
    }
    None
}
