//! YAML adapter - raw node-type classification for the yaml grammar.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tree_sitter::Node;

use super::{node_config_table, LanguageAdapter, NodeConfig};
use crate::extract::node_text;
use crate::semantic::*;

static NODE_CONFIGS: Lazy<HashMap<&'static str, NodeConfig>> = node_config_table! {
    "stream" => (ORGANIZATION_CONTAINER, None, 0),
    "document" => (ORGANIZATION_SECTION, None, 0),
    "block_node" => (ORGANIZATION_BLOCK, None, 0),
    "flow_node" => (ORGANIZATION_BLOCK, None, 0),
    "block_mapping" => (LITERAL_STRUCTURED | 0x02, None, 0),
    "flow_mapping" => (LITERAL_STRUCTURED | 0x02, None, 0),
    "block_mapping_pair" => (COMPUTATION_EXPRESSION, Custom, 0),
    "flow_pair" => (COMPUTATION_EXPRESSION, Custom, 0),
    "block_sequence" => (LITERAL_STRUCTURED | 0x01, None, 0),
    "flow_sequence" => (LITERAL_STRUCTURED | 0x01, None, 0),
    "block_sequence_item" => (ORGANIZATION_LIST, None, 0),
    "plain_scalar" => (LITERAL_STRING, FullText, 0),
    "string_scalar" => (LITERAL_STRING, FullText, 0),
    "single_quote_scalar" => (LITERAL_STRING, None, 0),
    "double_quote_scalar" => (LITERAL_STRING, None, 0),
    "block_scalar" => (LITERAL_STRING | 0x03, None, 0),
    "integer_scalar" => (LITERAL_NUMBER, None, 0),
    "float_scalar" => (LITERAL_NUMBER | 0x01, None, 0),
    "boolean_scalar" => (LITERAL_ATOMIC, None, 0),
    "null_scalar" => (LITERAL_ATOMIC, None, 0),
    "anchor" => (NAME_IDENTIFIER | 0x03, FindIdentifier, 0),
    "anchor_name" => (NAME_IDENTIFIER | 0x03, FullText, 0),
    "alias" => (NAME_SCOPED, FindIdentifier, 0),
    "alias_name" => (NAME_IDENTIFIER | 0x03, FullText, 0),
    "tag" => (METADATA_ANNOTATION, FullText, 0),
    "comment" => (METADATA_COMMENT, None, 0),
    "directive" => (METADATA_DIRECTIVE, FullText, 0),
    "yaml_directive" => (METADATA_DIRECTIVE, None, 0),
    "---" => (PARSER_DELIMITER, None, 0),
    "..." => (PARSER_DELIMITER, None, 0),
    "-" => (PARSER_DELIMITER, None, 0),
    ":" => (PARSER_DELIMITER, None, 0),
    "," => (PARSER_DELIMITER, None, 0),
    "[" => (PARSER_PUNCTUATION, None, 0),
    "]" => (PARSER_PUNCTUATION, None, 0),
    "{" => (PARSER_PUNCTUATION, None, 0),
    "}" => (PARSER_PUNCTUATION, None, 0),
};

pub struct YamlAdapter;

impl LanguageAdapter for YamlAdapter {
    fn language_name(&self) -> &'static str {
        "yaml"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["yml"]
    }

    fn ts_language(&self) -> tree_sitter::Language {
        tree_sitter_yaml::LANGUAGE.into()
    }

    fn node_configs(&self) -> &'static HashMap<&'static str, NodeConfig> {
        &NODE_CONFIGS
    }

    /// Mapping pairs are named by their key scalar.
    fn custom_name(&self, raw_type: &str, node: Node, source: &str) -> Option<String> {
        if raw_type != "block_mapping_pair" && raw_type != "flow_pair" {
            return None;
        }
        let key = node.child_by_field_name("key")?;
        Some(node_text(key, source).trim_matches('"').trim_matches('\'').to_string())
    }
}
