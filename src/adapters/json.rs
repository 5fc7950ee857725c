//! JSON adapter - raw node-type classification for the json grammar.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tree_sitter::Node;

use super::{flags::IS_KEYWORD, node_config_table, LanguageAdapter, NodeConfig};
use crate::extract::node_text;
use crate::semantic::*;

static NODE_CONFIGS: Lazy<HashMap<&'static str, NodeConfig>> = node_config_table! {
    "document" => (ORGANIZATION_CONTAINER, None, 0),
    "object" => (LITERAL_STRUCTURED | 0x02, None, 0),
    "array" => (LITERAL_STRUCTURED | 0x01, None, 0),
    "pair" => (COMPUTATION_EXPRESSION, Custom, 0),
    "string" => (LITERAL_STRING, None, 0),
    "string_content" => (LITERAL_STRING, None, 0),
    "escape_sequence" => (LITERAL_STRING, None, 0),
    "number" => (LITERAL_NUMBER, None, 0),
    "true" => (LITERAL_ATOMIC, None, IS_KEYWORD),
    "false" => (LITERAL_ATOMIC, None, IS_KEYWORD),
    "null" => (LITERAL_ATOMIC, None, IS_KEYWORD),
    "comment" => (METADATA_COMMENT, None, 0),
    "{" => (PARSER_PUNCTUATION, None, 0),
    "}" => (PARSER_PUNCTUATION, None, 0),
    "[" => (PARSER_PUNCTUATION, None, 0),
    "]" => (PARSER_PUNCTUATION, None, 0),
    "," => (PARSER_DELIMITER, None, 0),
    ":" => (PARSER_DELIMITER, None, 0),
    "\"" => (PARSER_DELIMITER, None, 0),
};

pub struct JsonAdapter;

impl LanguageAdapter for JsonAdapter {
    fn language_name(&self) -> &'static str {
        "json"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["jsonc"]
    }

    fn ts_language(&self) -> tree_sitter::Language {
        tree_sitter_json::LANGUAGE.into()
    }

    fn node_configs(&self) -> &'static HashMap<&'static str, NodeConfig> {
        &NODE_CONFIGS
    }

    /// Pairs are named by their key with the quotes stripped.
    fn custom_name(&self, raw_type: &str, node: Node, source: &str) -> Option<String> {
        if raw_type != "pair" {
            return None;
        }
        let key = node.child_by_field_name("key")?;
        Some(node_text(key, source).trim_matches('"').to_string())
    }
}
