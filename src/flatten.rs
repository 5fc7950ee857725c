//! Tree flattener - one pre-order pass for identity, one reverse fold for
//! aggregate counts.
//!
//! The first pass walks the raw parse tree iteratively (explicit stack, no
//! recursion, so pathologically deep trees cannot blow the call stack) and
//! assigns each node the next integer id, its parent id, depth, and sibling
//! index. The second pass runs over the records in reverse pre-order, which
//! visits every child before its parent, and folds `children_count` and
//! `descendant_count` bottom-up from already-computed child values.

use tracing::debug;
use tree_sitter::{Node, Tree};

use crate::adapters::{self, flags, LanguageAdapter};
use crate::config::ExtractionConfig;
use crate::error::{Result, TreetabError};
use crate::extract;
use crate::node::AstNode;
use crate::semantic;

/// Parse one unit of source text and flatten it into records.
///
/// A fresh parser is constructed for every call; parser state is never
/// shared across invocations.
pub fn parse_to_nodes(
    content: &str,
    language: &str,
    file_path: Option<&str>,
    config: &ExtractionConfig,
) -> Result<Vec<AstNode>> {
    let adapter = adapters::adapter_for(language)?;
    let mut parser = adapters::fresh_parser(adapter)?;
    let display_path = file_path.unwrap_or("<inline>");
    let tree = parser.parse(content, None).ok_or_else(|| TreetabError::Parse {
        path: display_path.to_string(),
        message: "grammar produced no tree".to_string(),
    })?;
    flatten_tree(&tree, content, language, display_path, adapter, config)
}

struct StackEntry<'tree> {
    node: Node<'tree>,
    parent: Option<usize>,
    depth: u32,
    sibling_index: u32,
}

/// Flatten an already-parsed tree into the record stream.
pub fn flatten_tree(
    tree: &Tree,
    source: &str,
    language: &str,
    file_path: &str,
    adapter: &dyn LanguageAdapter,
    config: &ExtractionConfig,
) -> Result<Vec<AstNode>> {
    let mut nodes: Vec<AstNode> = Vec::new();
    // Parent index per record, kept separately so the count fold works even
    // when structure output is suppressed.
    let mut parents: Vec<Option<usize>> = Vec::new();

    let mut stack = vec![StackEntry {
        node: tree.root_node(),
        parent: None,
        depth: 0,
        sibling_index: 0,
    }];

    while let Some(entry) = stack.pop() {
        let index = nodes.len();
        nodes.push(make_record(&entry, index, source, language, file_path, adapter, config));
        parents.push(entry.parent);

        // Children pushed in reverse so the stack pops them in source order.
        let child_count = entry.node.child_count();
        for i in (0..child_count).rev() {
            if let Some(child) = entry.node.child(i) {
                stack.push(StackEntry {
                    node: child,
                    parent: Some(index),
                    depth: entry.depth + 1,
                    sibling_index: i as u32,
                });
            }
        }
    }

    if config.include_full_structure() {
        fold_counts(&mut nodes, &parents)?;
    }

    debug!(
        "flattened {} nodes from {} unit: {}",
        nodes.len(),
        language,
        file_path
    );
    Ok(nodes)
}

/// Build one record, populating exactly what the detail config asks for.
fn make_record(
    entry: &StackEntry<'_>,
    index: usize,
    source: &str,
    language: &str,
    file_path: &str,
    adapter: &dyn LanguageAdapter,
    config: &ExtractionConfig,
) -> AstNode {
    let node = entry.node;
    let raw_type = node.kind();
    let mut record = AstNode::bare(index as u64, raw_type, language);

    if config.include_file_path() {
        record.file_path = Some(file_path.to_string());
    }
    if config.include_lines() {
        record.start_line = Some(node.start_position().row as u32 + 1);
        record.end_line = Some(node.end_position().row as u32 + 1);
        if config.include_columns() {
            record.start_column = Some(node.start_position().column as u32 + 1);
            record.end_column = Some(node.end_position().column as u32 + 1);
        }
    }

    if config.include_minimal_structure() {
        record.parent_id = entry.parent.map(|p| p as u64);
        record.depth = Some(entry.depth);
        if config.include_full_structure() {
            record.sibling_index = Some(entry.sibling_index);
            // children_count / descendant_count are written by the second
            // pass once every child has been assigned.
            record.children_count = Some(0);
            record.descendant_count = Some(0);
        }
    }

    let node_config = adapter.node_config(raw_type);

    if config.include_semantics() {
        let (semantic_type, node_flags) = match node_config {
            Some(cfg) => (cfg.semantic_type, resolve_flags(cfg.flags, node)),
            // Unmapped raw types stay opaque but still produce a record.
            None => (semantic::PARSER_CONSTRUCT, 0),
        };
        record.semantic_type = Some(semantic_type);
        record.normalized_type = Some(semantic::semantic_type_name(semantic_type).to_string());

        if config.include_name() {
            let name = match node_config {
                Some(cfg) => extract::extract_name(node, source, cfg.name_strategy, adapter),
                None => fallback_name(node, source, raw_type, adapter),
            };
            let mut node_flags = node_flags;
            if semantic::is_definition(semantic_type)
                && !name.is_empty()
                && adapter.is_public(node, source, &name)
            {
                node_flags |= flags::IS_PUBLIC;
            }
            record.flags = Some(node_flags);
            if !name.is_empty() {
                record.name = Some(name);
            }
        } else {
            record.flags = Some(node_flags);
        }

        if config.include_native() && node_config.is_some() {
            record.native_context = adapter.native_context(node, source);
        }
    }

    let span = extract::node_text(node, source);
    record.preview = extract::extract_preview(span, config.preview);

    record
}

/// Resolve the conditional keyword flag: `IS_KEYWORD_IF_LEAF` becomes
/// `IS_KEYWORD` only when the node has no children.
fn resolve_flags(config_flags: u8, node: Node<'_>) -> u8 {
    let mut resolved = config_flags & !flags::IS_KEYWORD_IF_LEAF;
    if (config_flags & flags::IS_KEYWORD_IF_LEAF) != 0 && node.child_count() == 0 {
        resolved |= flags::IS_KEYWORD;
    }
    resolved
}

/// Name fallback for raw types without a table entry: declaration-shaped
/// nodes still get an identifier search, everything else stays unnamed.
fn fallback_name(
    node: Node<'_>,
    source: &str,
    raw_type: &str,
    adapter: &dyn LanguageAdapter,
) -> String {
    if raw_type.contains("definition") || raw_type.contains("declaration") {
        extract::extract_name(
            node,
            source,
            adapters::ExtractionStrategy::FindIdentifier,
            adapter,
        )
    } else {
        String::new()
    }
}

/// Second pass: reverse pre-order fold. Every child strictly follows its
/// parent in pre-order, so walking the records backwards processes children
/// before parents and each count is a pure sum of finished child values.
fn fold_counts(nodes: &mut [AstNode], parents: &[Option<usize>]) -> Result<()> {
    let n = nodes.len();
    let mut children = vec![0u32; n];
    let mut descendants = vec![0u32; n];

    for i in (1..n).rev() {
        let parent = parents[i].ok_or_else(|| {
            TreetabError::Internal(format!("non-root node {i} has no parent"))
        })?;
        if parent >= i {
            return Err(TreetabError::Internal(format!(
                "parent {parent} does not precede child {i} in pre-order"
            )));
        }
        children[parent] += 1;
        descendants[parent] += 1 + descendants[i];
    }

    if n > 0 && descendants[0] as usize != n - 1 {
        return Err(TreetabError::Internal(format!(
            "descendant count of root is {} for {} nodes",
            descendants[0], n
        )));
    }

    for (i, record) in nodes.iter_mut().enumerate() {
        record.children_count = Some(children[i]);
        record.descendant_count = Some(descendants[i]);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ContextLevel, PreviewMode, SourceLevel, StructureLevel};

    fn full_config() -> ExtractionConfig {
        ExtractionConfig {
            context: ContextLevel::Native,
            source: SourceLevel::Full,
            structure: StructureLevel::Full,
            preview: PreviewMode::Smart,
        }
    }

    #[test]
    fn ids_are_preorder_and_unique() {
        let nodes = parse_to_nodes("def f():\n    return 1\n", "python", None, &full_config())
            .unwrap();
        for (i, node) in nodes.iter().enumerate() {
            assert_eq!(node.id, i as u64);
        }
        // Pre-order: every parent precedes its children.
        for node in &nodes {
            if let Some(parent) = node.parent_id {
                assert!(parent < node.id);
            }
        }
    }

    #[test]
    fn depth_invariant_holds() {
        let nodes = parse_to_nodes(
            "def f(a, b):\n    if a:\n        return b\n",
            "python",
            None,
            &full_config(),
        )
        .unwrap();
        assert_eq!(nodes[0].depth, Some(0));
        for node in &nodes[1..] {
            let parent = &nodes[node.parent_id.unwrap() as usize];
            assert_eq!(node.depth.unwrap(), parent.depth.unwrap() + 1);
        }
    }

    #[test]
    fn descendant_count_of_root_is_total_minus_one() {
        let nodes = parse_to_nodes(
            "def hello():\n    pass\n\nclass A:\n    x = 1\n",
            "python",
            None,
            &full_config(),
        )
        .unwrap();
        assert_eq!(
            nodes[0].descendant_count.unwrap() as usize,
            nodes.len() - 1
        );
    }

    #[test]
    fn children_count_matches_parent_links() {
        let nodes = parse_to_nodes(
            "x = [1, 2, 3]\ny = {'a': 1}\n",
            "python",
            None,
            &full_config(),
        )
        .unwrap();
        for node in &nodes {
            let actual = nodes
                .iter()
                .filter(|m| m.parent_id == Some(node.id))
                .count() as u32;
            assert_eq!(node.children_count.unwrap(), actual);
        }
    }

    #[test]
    fn descendant_counts_sum_over_children() {
        let nodes = parse_to_nodes(
            "for i in range(10):\n    print(i)\n",
            "python",
            None,
            &full_config(),
        )
        .unwrap();
        for node in &nodes {
            let sum: u32 = nodes
                .iter()
                .filter(|m| m.parent_id == Some(node.id))
                .map(|m| 1 + m.descendant_count.unwrap())
                .sum();
            assert_eq!(node.descendant_count.unwrap(), sum);
        }
    }

    #[test]
    fn repeated_parses_are_identical() {
        let source = "def f():\n    return g(h(1))\n";
        let first = parse_to_nodes(source, "python", None, &full_config()).unwrap();
        for _ in 0..9 {
            let again = parse_to_nodes(source, "python", None, &full_config()).unwrap();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn empty_input_yields_single_root_without_error() {
        let nodes = parse_to_nodes("", "python", None, &full_config()).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].depth, Some(0));
        assert_eq!(nodes[0].parent_id, None);
        assert_eq!(nodes[0].children_count, Some(0));
    }

    #[test]
    fn single_token_input_yields_root_plus_leaf() {
        let nodes = parse_to_nodes("x", "python", None, &full_config()).unwrap();
        assert!(nodes.len() >= 2);
        assert_eq!(nodes[0].parent_id, None);
        assert!(nodes.iter().any(|n| n.raw_type == "identifier"));
    }

    #[test]
    fn hello_function_scenario() {
        let nodes = parse_to_nodes("def hello(): pass", "python", None, &full_config()).unwrap();
        let root = &nodes[0];
        assert_eq!(root.raw_type, "module");
        assert_eq!(root.descendant_count.unwrap() as usize, nodes.len() - 1);

        let function = nodes
            .iter()
            .find(|n| n.raw_type == "function_definition")
            .expect("function definition node");
        assert_eq!(function.semantic_type, Some(semantic::DEFINITION_FUNCTION));
        assert_eq!(function.name.as_deref(), Some("hello"));

        assert!(nodes
            .iter()
            .any(|n| n.raw_type == "identifier" && n.preview.as_deref() == Some("hello")));
    }

    #[test]
    fn structure_none_nulls_structure_fields_only() {
        let source = "def f():\n    return 1\n";
        let mut config = full_config();
        config.structure = StructureLevel::None;
        let nodes = parse_to_nodes(source, "python", None, &config).unwrap();
        for node in &nodes {
            assert_eq!(node.parent_id, None);
            assert_eq!(node.depth, None);
            assert_eq!(node.sibling_index, None);
            assert_eq!(node.children_count, None);
            assert_eq!(node.descendant_count, None);
        }
        // Context and source output are unaffected by the structure axis.
        let full = parse_to_nodes(source, "python", None, &full_config()).unwrap();
        for (a, b) in nodes.iter().zip(full.iter()) {
            assert_eq!(a.semantic_type, b.semantic_type);
            assert_eq!(a.name, b.name);
            assert_eq!(a.start_line, b.start_line);
            assert_eq!(a.preview, b.preview);
        }
    }

    #[test]
    fn context_none_nulls_semantic_fields_only() {
        let source = "def f():\n    return 1\n";
        let mut config = full_config();
        config.context = ContextLevel::None;
        let nodes = parse_to_nodes(source, "python", None, &config).unwrap();
        for node in &nodes {
            assert_eq!(node.semantic_type, None);
            assert_eq!(node.flags, None);
            assert_eq!(node.name, None);
            assert_eq!(node.normalized_type, None);
        }
        let full = parse_to_nodes(source, "python", None, &full_config()).unwrap();
        for (a, b) in nodes.iter().zip(full.iter()) {
            assert_eq!(a.parent_id, b.parent_id);
            assert_eq!(a.depth, b.depth);
            assert_eq!(a.descendant_count, b.descendant_count);
            assert_eq!(a.start_line, b.start_line);
        }
    }

    #[test]
    fn source_levels_gate_path_and_span() {
        let source = "x = 1\n";
        let mut config = full_config();

        config.source = SourceLevel::None;
        let none = parse_to_nodes(source, "python", Some("a.py"), &config).unwrap();
        assert!(none.iter().all(|n| n.file_path.is_none() && n.start_line.is_none()));

        config.source = SourceLevel::Path;
        let path = parse_to_nodes(source, "python", Some("a.py"), &config).unwrap();
        assert!(path.iter().all(|n| n.file_path.as_deref() == Some("a.py")));
        assert!(path.iter().all(|n| n.start_line.is_none()));

        config.source = SourceLevel::LinesOnly;
        let lines_only = parse_to_nodes(source, "python", Some("a.py"), &config).unwrap();
        assert!(lines_only.iter().all(|n| n.file_path.is_none()));
        assert!(lines_only.iter().all(|n| n.start_line.is_some()));
        assert!(lines_only.iter().all(|n| n.start_column.is_none()));

        config.source = SourceLevel::Full;
        let full = parse_to_nodes(source, "python", Some("a.py"), &config).unwrap();
        assert!(full.iter().all(|n| n.start_column.is_some()));
        assert_eq!(full[0].start_line, Some(1));
        assert_eq!(full[0].start_column, Some(1));
    }

    #[test]
    fn language_provenance_survives_every_source_level() {
        let mut config = full_config();
        config.source = SourceLevel::None;
        let nodes = parse_to_nodes("x = 1\n", "python", Some("a.py"), &config).unwrap();
        assert!(nodes.iter().all(|n| n.language == "python"));
    }

    #[test]
    fn unmapped_raw_types_fall_back_to_parser_construct() {
        let nodes = parse_to_nodes("def f(): pass", "python", None, &full_config()).unwrap();
        // Every record carries a semantic type at native context, including
        // any raw type missing from the table.
        assert!(nodes.iter().all(|n| n.semantic_type.is_some()));
    }

    #[test]
    fn malformed_source_still_flattens() {
        // Unbalanced input produces ERROR nodes in the raw tree, which are
        // flattened as ordinary records.
        let nodes = parse_to_nodes("def (:\n", "python", None, &full_config()).unwrap();
        assert!(!nodes.is_empty());
        assert_eq!(
            nodes[0].descendant_count.unwrap() as usize,
            nodes.len() - 1
        );
    }
}
