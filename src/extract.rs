//! Extraction strategy engine - node names and source previews.
//!
//! Name extraction is a tagged-strategy dispatch: the registry selects a
//! strategy per raw type, and CUSTOM delegates to the adapter's callback.
//! Every strategy is a pure function of the subtree (plus, for the
//! assignment-target walk, the immediate ancestry): identical input subtree
//! yields identical output on every call, in every process.

use once_cell::sync::Lazy;
use regex::Regex;
use tree_sitter::Node;

use crate::adapters::{ExtractionStrategy, LanguageAdapter};
use crate::config::PreviewMode;

/// Leading-identifier pattern for the last-resort text scrape.
static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z_$][A-Za-z0-9_$]*").expect("identifier regex"));

/// Raw types that directly carry a usable name.
const IDENTIFIER_KINDS: &[&str] = &[
    "identifier",
    "type_identifier",
    "field_identifier",
    "property_identifier",
    "constant",
    "variable_name",
    "word",
    "name",
];

/// Qualified-name containers whose tail identifier is the display name.
const QUALIFIED_KINDS: &[&str] = &[
    "qualified_identifier",
    "scoped_identifier",
    "nested_identifier",
    "attribute",
    "member_expression",
    "selector_expression",
    "field_expression",
];

/// Declarator containers that nest the declared identifier (C family).
const DECLARATOR_KINDS: &[&str] = &[
    "function_declarator",
    "method_declarator",
    "init_declarator",
    "pointer_declarator",
    "reference_declarator",
    "array_declarator",
    "parenthesized_declarator",
    "declarator",
];

/// The node's verbatim span text. Defensive on byte ranges; a span outside
/// the source yields the empty string rather than a panic.
pub fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    source
        .get(node.start_byte()..node.end_byte())
        .unwrap_or_default()
}

/// Extract a display name for `node` using `strategy`.
pub fn extract_name(
    node: Node<'_>,
    source: &str,
    strategy: ExtractionStrategy,
    adapter: &dyn LanguageAdapter,
) -> String {
    match strategy {
        ExtractionStrategy::None => String::new(),
        ExtractionStrategy::FullText => node_text(node, source).to_string(),
        ExtractionStrategy::FirstChild => node
            .child(0)
            .map(|child| node_text(child, source).to_string())
            .unwrap_or_default(),
        ExtractionStrategy::FindIdentifier => find_identifier(node, source),
        ExtractionStrategy::FindProperty => {
            find_child_text(node, source, "property_identifier").unwrap_or_default()
        }
        ExtractionStrategy::FindAssignmentTarget => find_assignment_target(node, source),
        ExtractionStrategy::FindQualifiedIdentifier => find_qualified_identifier(node, source),
        ExtractionStrategy::FindInDeclarator => find_in_declarator(node, source),
        ExtractionStrategy::FindCallTarget => find_call_target(node, source),
        ExtractionStrategy::Custom => adapter
            .custom_name(node.kind(), node, source)
            .unwrap_or_default(),
    }
}

/// Text of the first direct child with the given kind.
fn find_child_text(node: Node<'_>, source: &str, kind: &str) -> Option<String> {
    find_child_node(node, kind).map(|child| node_text(child, source).to_string())
}

/// First direct child with the given kind.
fn find_child_node<'tree>(node: Node<'tree>, kind: &str) -> Option<Node<'tree>> {
    let mut cursor = node.walk();
    let result = node.children(&mut cursor).find(|child| child.kind() == kind);
    result
}

/// FIND_IDENTIFIER: the `name` field when it is identifier-like, then the
/// first identifier-like direct child, then the first identifier-like named
/// descendant, then a text scrape as a last resort.
fn find_identifier(node: Node<'_>, source: &str) -> String {
    if let Some(name_node) = node.child_by_field_name("name") {
        if IDENTIFIER_KINDS.contains(&name_node.kind()) {
            return node_text(name_node, source).to_string();
        }
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if IDENTIFIER_KINDS.contains(&child.kind()) {
            return node_text(child, source).to_string();
        }
    }

    if let Some(descendant) = first_named_descendant(node, IDENTIFIER_KINDS) {
        return node_text(descendant, source).to_string();
    }

    IDENTIFIER_RE
        .find(node_text(node, source).trim_start())
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Pre-order search over named descendants for any of the given kinds.
fn first_named_descendant<'tree>(node: Node<'tree>, kinds: &[&str]) -> Option<Node<'tree>> {
    let mut stack: Vec<Node<'tree>> = Vec::new();
    for i in (0..node.named_child_count()).rev() {
        if let Some(child) = node.named_child(i) {
            stack.push(child);
        }
    }
    while let Some(current) = stack.pop() {
        if kinds.contains(&current.kind()) {
            return Some(current);
        }
        for i in (0..current.named_child_count()).rev() {
            if let Some(child) = current.named_child(i) {
                stack.push(child);
            }
        }
    }
    None
}

/// FIND_QUALIFIED_IDENTIFIER: locate a qualified-name container and return
/// its tail identifier (`Class::method` -> `method`, `obj.prop` -> `prop`).
fn find_qualified_identifier(node: Node<'_>, source: &str) -> String {
    if QUALIFIED_KINDS.contains(&node.kind()) {
        return tail_identifier(node, source);
    }
    for kind in QUALIFIED_KINDS {
        if let Some(qualified) = find_child_node(node, kind) {
            return tail_identifier(qualified, source);
        }
    }
    // Not qualified after all: fall back to the plain identifier search.
    find_identifier(node, source)
}

/// Last identifier-like direct child of a qualified-name node, or its full
/// text when the chain has no identifier children.
fn tail_identifier(node: Node<'_>, source: &str) -> String {
    let mut cursor = node.walk();
    let mut last = None;
    for child in node.children(&mut cursor) {
        if IDENTIFIER_KINDS.contains(&child.kind()) {
            last = Some(child);
        }
    }
    match last {
        Some(child) => node_text(child, source).to_string(),
        None => node_text(node, source).to_string(),
    }
}

/// FIND_IN_DECLARATOR: descend through declarator nesting until an
/// identifier surfaces (C/C++ declarations put the name arbitrarily deep).
fn find_in_declarator(node: Node<'_>, source: &str) -> String {
    for kind in DECLARATOR_KINDS {
        if let Some(declarator) = find_child_node(node, kind) {
            let nested = find_in_declarator(declarator, source);
            if !nested.is_empty() {
                return nested;
            }
        }
    }

    for kind in QUALIFIED_KINDS {
        if let Some(qualified) = find_child_node(node, kind) {
            return tail_identifier(qualified, source);
        }
    }

    if let Some(text) = find_child_text(node, source, "identifier") {
        return text;
    }
    if let Some(text) = find_child_text(node, source, "field_identifier") {
        return text;
    }

    // Malformed declaration: scrape the identifier before the parameter
    // list from the raw text.
    let text = node_text(node, source);
    match text.split('(').next() {
        Some(head) => IDENTIFIER_RE
            .find_iter(head)
            .last()
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        None => String::new(),
    }
}

/// FIND_ASSIGNMENT_TARGET: the identifier on the left of the enclosing
/// assignment or declarator (`name = <node>`, `const name = <node>`).
fn find_assignment_target(node: Node<'_>, source: &str) -> String {
    let Some(parent) = node.parent() else {
        return String::new();
    };
    let parent_kind = parent.kind();
    let is_assignment_shape = parent_kind == "assignment"
        || parent_kind == "binary_operator"
        || parent_kind == "assignment_expression"
        || parent_kind == "let_declaration"
        || parent_kind.contains("declarator");
    if !is_assignment_shape {
        return String::new();
    }
    // Grammars disagree on where the target lives: a named field in some
    // (`pattern`, `name`, `left`), the first child in others.
    for field in ["pattern", "name", "left"] {
        if let Some(target) = parent.child_by_field_name(field) {
            if IDENTIFIER_KINDS.contains(&target.kind()) {
                return node_text(target, source).to_string();
            }
        }
    }
    match parent.child(0) {
        Some(first) if IDENTIFIER_KINDS.contains(&first.kind()) => {
            node_text(first, source).to_string()
        }
        _ => String::new(),
    }
}

/// FIND_CALL_TARGET: the callee name, resolved through member access
/// (`obj.method(...)` -> `method`, `pkg::f(...)` -> `f`).
fn find_call_target(node: Node<'_>, source: &str) -> String {
    let callee = node
        .child_by_field_name("function")
        .or_else(|| node.child_by_field_name("method"))
        .or_else(|| node.child_by_field_name("name"))
        .or_else(|| node.child(0));
    let Some(callee) = callee else {
        return String::new();
    };

    if IDENTIFIER_KINDS.contains(&callee.kind()) {
        return node_text(callee, source).to_string();
    }
    if QUALIFIED_KINDS.contains(&callee.kind()) {
        return tail_identifier(callee, source);
    }
    // Nested callee shapes (e.g. parenthesized or generic): take the last
    // identifier-like descendant, which is the invoked name in source order.
    let mut result = String::new();
    let mut stack = vec![callee];
    while let Some(current) = stack.pop() {
        if IDENTIFIER_KINDS.contains(&current.kind()) {
            let text = node_text(current, source);
            if !text.is_empty() {
                result = text.to_string();
            }
        }
        for i in (0..current.named_child_count()).rev() {
            if let Some(child) = current.named_child(i) {
                stack.push(child);
            }
        }
    }
    result
}

/// First identifier-like node in the subtree (the node itself included),
/// used by adapters assembling native context.
pub(crate) fn first_identifier(node: Node<'_>, source: &str) -> Option<String> {
    if IDENTIFIER_KINDS.contains(&node.kind()) {
        return Some(node_text(node, source).to_string());
    }
    first_named_descendant(node, IDENTIFIER_KINDS).map(|n| node_text(n, source).to_string())
}

/// Truncate to a character budget, appending `...` when anything was cut.
/// Operates on characters, never bytes, so multi-byte text stays valid.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

/// Apply the preview axis to a node's span text.
///
/// Smart mode adapts to content: small nodes verbatim, long single lines
/// truncated at display width, multi-line nodes reduced to their first line.
pub fn extract_preview(span: &str, mode: PreviewMode) -> Option<String> {
    match mode {
        PreviewMode::None => None,
        PreviewMode::Full => Some(span.to_string()),
        PreviewMode::Smart => {
            if span.chars().count() <= 50 {
                return Some(span.to_string());
            }
            let first_line = span.lines().next().unwrap_or_default();
            Some(truncate_with_ellipsis(first_line, 80))
        }
        PreviewMode::Chars(0) => None,
        PreviewMode::Chars(limit) => Some(span.chars().take(limit as usize).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{adapter_for, fresh_parser};

    fn parse(language: &str, source: &str) -> tree_sitter::Tree {
        let adapter = adapter_for(language).unwrap();
        fresh_parser(adapter).unwrap().parse(source, None).unwrap()
    }

    #[test]
    fn full_text_returns_span() {
        let source = "x = 1";
        let tree = parse("python", source);
        let adapter = adapter_for("python").unwrap();
        let name = extract_name(
            tree.root_node(),
            source,
            ExtractionStrategy::FullText,
            adapter,
        );
        assert_eq!(name, "x = 1");
    }

    #[test]
    fn find_identifier_on_python_function() {
        let source = "def hello():\n    pass\n";
        let tree = parse("python", source);
        let adapter = adapter_for("python").unwrap();
        let function = tree.root_node().named_child(0).unwrap();
        assert_eq!(function.kind(), "function_definition");
        let name = extract_name(function, source, ExtractionStrategy::FindIdentifier, adapter);
        assert_eq!(name, "hello");
    }

    #[test]
    fn call_target_through_attribute() {
        let source = "obj.method(1)\n";
        let tree = parse("python", source);
        let adapter = adapter_for("python").unwrap();
        // module > expression_statement > call
        let call = tree
            .root_node()
            .named_child(0)
            .unwrap()
            .named_child(0)
            .unwrap();
        assert_eq!(call.kind(), "call");
        let name = extract_name(call, source, ExtractionStrategy::FindCallTarget, adapter);
        assert_eq!(name, "method");
    }

    #[test]
    fn name_extraction_is_deterministic_across_parses() {
        let source = "def stable():\n    return 1\n";
        let adapter = adapter_for("python").unwrap();
        let mut names = Vec::new();
        for _ in 0..3 {
            let tree = parse("python", source);
            let function = tree.root_node().named_child(0).unwrap();
            names.push(extract_name(
                function,
                source,
                ExtractionStrategy::FindIdentifier,
                adapter,
            ));
        }
        assert!(names.iter().all(|n| n == "stable"));
    }

    #[test]
    fn preview_none_suppresses() {
        assert_eq!(extract_preview("anything", PreviewMode::None), None);
    }

    #[test]
    fn preview_full_is_untruncated() {
        let long = "x".repeat(500);
        assert_eq!(extract_preview(&long, PreviewMode::Full).unwrap(), long);
    }

    #[test]
    fn preview_smart_keeps_small_nodes_verbatim() {
        assert_eq!(
            extract_preview("x + y", PreviewMode::Smart).unwrap(),
            "x + y"
        );
    }

    #[test]
    fn preview_smart_truncates_long_single_lines() {
        let long = "a".repeat(120);
        let preview = extract_preview(&long, PreviewMode::Smart).unwrap();
        assert_eq!(preview.chars().count(), 80);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn preview_smart_takes_first_line_of_multiline() {
        let span = format!("{}\nsecond line", "first ".repeat(10));
        let preview = extract_preview(&span, PreviewMode::Smart).unwrap();
        assert!(!preview.contains('\n'));
        assert!(preview.starts_with("first "));
    }

    #[test]
    fn preview_chars_caps_exactly() {
        assert_eq!(
            extract_preview("abcdefgh", PreviewMode::Chars(3)).unwrap(),
            "abc"
        );
        assert_eq!(extract_preview("abcdefgh", PreviewMode::Chars(0)), None);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "héllo wörld, this is a long line of text";
        let truncated = truncate_with_ellipsis(text, 10);
        assert_eq!(truncated.chars().count(), 10);
        assert!(truncated.ends_with("..."));
    }
}
