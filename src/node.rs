//! The flattened node record - one row per tree node.
//!
//! Records are created once during flattening and never mutated afterward,
//! except for the two derived counters (`children_count`,
//! `descendant_count`) which the flattener fills in a second pass. Fields
//! suppressed by the detail-level configuration are `None` and serialize as
//! NULL in tabular output.

use serde::{Deserialize, Serialize};

use crate::semantic;

/// One flattened AST record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstNode {
    /// Unique within the result set; assigned in pre-order, renumbered with
    /// a running offset across a batch.
    pub id: u64,
    /// Grammar-specific node type string from the front end.
    pub raw_type: String,
    /// Cross-language display name of the semantic type.
    pub normalized_type: Option<String>,
    /// Extracted display name (declaration identifiers, call targets, ...).
    pub name: Option<String>,
    /// 8-bit semantic classification code.
    pub semantic_type: Option<u8>,
    /// Universal flag bitmask, see [`crate::adapters::flags`].
    pub flags: Option<u8>,
    /// Originating unit path; `None` below `source = path`.
    pub file_path: Option<String>,
    /// Per-unit provenance, always populated.
    pub language: String,
    /// 1-based line span.
    pub start_line: Option<u32>,
    pub end_line: Option<u32>,
    /// 1-based column span, populated only at `source = full`.
    pub start_column: Option<u32>,
    pub end_column: Option<u32>,
    /// `None` for roots (and whenever structure output is disabled).
    pub parent_id: Option<u64>,
    /// Root depth is 0; `depth(child) = depth(parent) + 1`.
    pub depth: Option<u32>,
    /// Position among siblings in source order.
    pub sibling_index: Option<u32>,
    /// Number of direct children.
    pub children_count: Option<u32>,
    /// Total nodes in the subtree below this one.
    pub descendant_count: Option<u32>,
    /// Source text preview, shaped by the preview axis.
    pub preview: Option<String>,
    /// Language-specific extraction detail, attached at `context = native`.
    pub native_context: Option<serde_json::Value>,
}

impl AstNode {
    /// A bare record carrying only identity and provenance. The flattener
    /// fills in whatever the detail configuration asks for.
    pub(crate) fn bare(id: u64, raw_type: &str, language: &str) -> Self {
        Self {
            id,
            raw_type: raw_type.to_string(),
            normalized_type: None,
            name: None,
            semantic_type: None,
            flags: None,
            file_path: None,
            language: language.to_string(),
            start_line: None,
            end_line: None,
            start_column: None,
            end_column: None,
            parent_id: None,
            depth: None,
            sibling_index: None,
            children_count: None,
            descendant_count: None,
            preview: None,
            native_context: None,
        }
    }

    /// Convert a recovered failure into an ordinary leaf record.
    ///
    /// The record carries the reserved parse-error classification, empty
    /// structural fields, and the diagnostic text in `preview`, so a caller
    /// scanning for `semantic_type == PARSE_ERROR` can always detect
    /// partial results without the call itself raising.
    pub fn error(message: &str, file_path: Option<&str>, language: &str) -> Self {
        let mut node = Self::bare(0, "ERROR", language);
        node.normalized_type = Some(semantic::semantic_type_name(semantic::PARSE_ERROR).to_string());
        node.semantic_type = Some(semantic::PARSE_ERROR);
        node.flags = Some(0);
        node.file_path = file_path.map(str::to_string);
        node.preview = Some(message.to_string());
        node
    }

    /// Whether this record represents a recovered failure.
    pub fn is_error(&self) -> bool {
        self.semantic_type.is_some_and(semantic::is_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_node_is_detectable_by_semantic_type() {
        let node = AstNode::error("syntax error near line 3", Some("a.py"), "python");
        assert!(node.is_error());
        assert_eq!(node.raw_type, "ERROR");
        assert_eq!(node.normalized_type.as_deref(), Some("PARSE_ERROR"));
        assert_eq!(node.preview.as_deref(), Some("syntax error near line 3"));
        assert_eq!(node.file_path.as_deref(), Some("a.py"));
        assert_eq!(node.language, "python");
    }

    #[test]
    fn error_node_has_empty_structural_fields() {
        let node = AstNode::error("unreadable", None, "unknown");
        assert_eq!(node.parent_id, None);
        assert_eq!(node.depth, None);
        assert_eq!(node.children_count, None);
        assert_eq!(node.descendant_count, None);
        assert_eq!(node.start_line, None);
    }

    #[test]
    fn ordinary_node_is_not_an_error() {
        let mut node = AstNode::bare(7, "identifier", "python");
        node.semantic_type = Some(crate::semantic::NAME_IDENTIFIER);
        assert!(!node.is_error());
    }

    #[test]
    fn serializes_suppressed_fields_as_null() {
        let node = AstNode::bare(0, "module", "python");
        let value = serde_json::to_value(&node).unwrap();
        assert!(value["name"].is_null());
        assert!(value["depth"].is_null());
        assert_eq!(value["language"], "python");
    }
}
