//! Ruby adapter - raw node-type classification for the ruby grammar.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tree_sitter::Node;

use super::{
    flags::{IS_KEYWORD, IS_KEYWORD_IF_LEAF},
    node_config_table, LanguageAdapter, NodeConfig,
};
use crate::extract::node_text;
use crate::semantic::*;

static NODE_CONFIGS: Lazy<HashMap<&'static str, NodeConfig>> = node_config_table! {
    // Structure
    "program" => (ORGANIZATION_CONTAINER, None, 0),
    "body_statement" => (ORGANIZATION_BLOCK, None, 0),
    "do_block" => (ORGANIZATION_BLOCK, None, 0),
    "block" => (COMPUTATION_LAMBDA, None, 0),
    "block_parameters" => (ORGANIZATION_LIST, None, 0),
    "method_parameters" => (ORGANIZATION_LIST, None, 0),
    "argument_list" => (ORGANIZATION_LIST, None, 0),

    // Definitions
    "method" => (DEFINITION_FUNCTION, FindIdentifier, 0),
    "singleton_method" => (DEFINITION_FUNCTION, FindIdentifier, 0),
    "class" => (DEFINITION_CLASS, Custom, IS_KEYWORD_IF_LEAF),
    "singleton_class" => (DEFINITION_CLASS, None, 0),
    "module" => (DEFINITION_MODULE, Custom, IS_KEYWORD_IF_LEAF),
    "lambda" => (COMPUTATION_LAMBDA, FindAssignmentTarget, IS_KEYWORD_IF_LEAF),
    "assignment" => (OPERATOR_ASSIGNMENT, FindIdentifier, 0),
    "operator_assignment" => (OPERATOR_ASSIGNMENT | 0x01, FindIdentifier, 0),
    "optional_parameter" => (DEFINITION_VARIABLE | 0x02, FindIdentifier, 0),
    "keyword_parameter" => (DEFINITION_VARIABLE | 0x02, FindIdentifier, 0),
    "splat_parameter" => (DEFINITION_VARIABLE | 0x02, FindIdentifier, 0),

    // Names
    "identifier" => (NAME_IDENTIFIER, FullText, 0),
    "constant" => (NAME_IDENTIFIER | 0x02, FullText, 0),
    "instance_variable" => (NAME_IDENTIFIER, FullText, 0),
    "class_variable" => (NAME_IDENTIFIER, FullText, 0),
    "global_variable" => (NAME_IDENTIFIER, FullText, 0),
    "scope_resolution" => (NAME_SCOPED, FindQualifiedIdentifier, 0),
    "self" => (NAME_SCOPED, None, IS_KEYWORD),
    "element_reference" => (COMPUTATION_ACCESS, None, 0),

    // Calls
    "call" => (COMPUTATION_CALL, FindCallTarget, 0),
    "method_call" => (COMPUTATION_CALL, FindCallTarget, 0),
    "yield" => (FLOW_SYNC, None, IS_KEYWORD_IF_LEAF),

    // Literals
    "integer" => (LITERAL_NUMBER, None, 0),
    "float" => (LITERAL_NUMBER | 0x01, None, 0),
    "string" => (LITERAL_STRING, None, 0),
    "string_content" => (LITERAL_STRING, None, 0),
    "interpolation" => (LITERAL_STRING | 0x01, None, 0),
    "symbol" => (LITERAL_ATOMIC, FullText, 0),
    "simple_symbol" => (LITERAL_ATOMIC, FullText, 0),
    "regex" => (LITERAL_STRING | 0x02, None, 0),
    "heredoc_body" => (LITERAL_STRING | 0x03, None, 0),
    "heredoc_beginning" => (LITERAL_STRING | 0x03, None, 0),
    "true" => (LITERAL_ATOMIC, None, IS_KEYWORD),
    "false" => (LITERAL_ATOMIC, None, IS_KEYWORD),
    "nil" => (LITERAL_ATOMIC, None, IS_KEYWORD),
    "array" => (LITERAL_STRUCTURED | 0x01, None, 0),
    "hash" => (LITERAL_STRUCTURED | 0x02, None, 0),
    "pair" => (COMPUTATION_EXPRESSION, None, 0),

    // Operators and expressions
    "binary" => (OPERATOR_ARITHMETIC, None, 0),
    "unary" => (OPERATOR_ARITHMETIC | 0x01, None, 0),
    "conditional" => (FLOW_CONDITIONAL | 0x03, None, 0),
    "range" => (OPERATOR_ARITHMETIC | 0x03, None, 0),

    // Flow control
    "if" => (FLOW_CONDITIONAL, None, IS_KEYWORD_IF_LEAF),
    "unless" => (FLOW_CONDITIONAL, None, IS_KEYWORD_IF_LEAF),
    "elsif" => (FLOW_CONDITIONAL, None, IS_KEYWORD_IF_LEAF),
    "else" => (FLOW_CONDITIONAL, None, IS_KEYWORD_IF_LEAF),
    "if_modifier" => (FLOW_CONDITIONAL, None, 0),
    "unless_modifier" => (FLOW_CONDITIONAL, None, 0),
    "case" => (FLOW_CONDITIONAL | 0x01, None, IS_KEYWORD_IF_LEAF),
    "when" => (PATTERN_MATCH, None, IS_KEYWORD_IF_LEAF),
    "in_clause" => (PATTERN_MATCH, None, 0),
    "while" => (FLOW_LOOP | 0x02, None, IS_KEYWORD_IF_LEAF),
    "until" => (FLOW_LOOP | 0x02, None, IS_KEYWORD_IF_LEAF),
    "for" => (FLOW_LOOP | 0x01, None, IS_KEYWORD_IF_LEAF),
    "while_modifier" => (FLOW_LOOP | 0x02, None, 0),
    "return" => (FLOW_JUMP, None, IS_KEYWORD_IF_LEAF),
    "break" => (FLOW_JUMP | 0x01, None, IS_KEYWORD_IF_LEAF),
    "next" => (FLOW_JUMP | 0x02, None, IS_KEYWORD_IF_LEAF),
    "redo" => (FLOW_JUMP | 0x03, None, IS_KEYWORD_IF_LEAF),
    "retry" => (FLOW_JUMP | 0x03, None, IS_KEYWORD_IF_LEAF),

    // Error handling
    "begin" => (ERROR_TRY, None, IS_KEYWORD_IF_LEAF),
    "rescue" => (ERROR_CATCH, None, IS_KEYWORD_IF_LEAF),
    "rescue_modifier" => (ERROR_CATCH, None, 0),
    "ensure" => (ERROR_FINALLY, None, IS_KEYWORD_IF_LEAF),
    "exception_classes" => (ORGANIZATION_LIST, None, 0),
    "exception_variable" => (DEFINITION_VARIABLE, FindIdentifier, 0),

    // Metadata
    "comment" => (METADATA_COMMENT, None, 0),

    // Keywords
    "def" => (NAME_KEYWORD, None, IS_KEYWORD),
    "end" => (NAME_KEYWORD, None, IS_KEYWORD),
    "do" => (NAME_KEYWORD, None, IS_KEYWORD),
    "then" => (NAME_KEYWORD, None, IS_KEYWORD),
    "and" => (OPERATOR_LOGICAL, None, IS_KEYWORD),
    "or" => (OPERATOR_LOGICAL, None, IS_KEYWORD),
    "not" => (OPERATOR_LOGICAL, None, IS_KEYWORD),

    // Operator tokens
    "=" => (OPERATOR_ASSIGNMENT, None, 0),
    "==" => (OPERATOR_COMPARISON, None, 0),
    "!=" => (OPERATOR_COMPARISON, None, 0),
    "<=>" => (OPERATOR_COMPARISON, None, 0),
    "<" => (OPERATOR_COMPARISON, None, 0),
    ">" => (OPERATOR_COMPARISON, None, 0),
    "<=" => (OPERATOR_COMPARISON, None, 0),
    ">=" => (OPERATOR_COMPARISON, None, 0),
    "=~" => (OPERATOR_COMPARISON | 0x03, None, 0),
    "+" => (OPERATOR_ARITHMETIC, None, 0),
    "-" => (OPERATOR_ARITHMETIC, None, 0),
    "*" => (OPERATOR_ARITHMETIC, None, 0),
    "/" => (OPERATOR_ARITHMETIC, None, 0),
    "%" => (OPERATOR_ARITHMETIC, None, 0),
    "**" => (OPERATOR_ARITHMETIC, None, 0),
    "&&" => (OPERATOR_LOGICAL, None, 0),
    "||" => (OPERATOR_LOGICAL, None, 0),
    "!" => (OPERATOR_LOGICAL, None, 0),

    // Punctuation
    "(" => (PARSER_PUNCTUATION, None, 0),
    ")" => (PARSER_PUNCTUATION, None, 0),
    "[" => (PARSER_PUNCTUATION, None, 0),
    "]" => (PARSER_PUNCTUATION, None, 0),
    "{" => (PARSER_PUNCTUATION, None, 0),
    "}" => (PARSER_PUNCTUATION, None, 0),
    "," => (PARSER_DELIMITER, None, 0),
    ";" => (PARSER_DELIMITER, None, 0),
    "." => (PARSER_DELIMITER, None, 0),
    "::" => (PARSER_DELIMITER, None, 0),
};

pub struct RubyAdapter;

impl LanguageAdapter for RubyAdapter {
    fn language_name(&self) -> &'static str {
        "ruby"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["rb"]
    }

    fn ts_language(&self) -> tree_sitter::Language {
        tree_sitter_ruby::LANGUAGE.into()
    }

    fn node_configs(&self) -> &'static HashMap<&'static str, NodeConfig> {
        &NODE_CONFIGS
    }

    /// Class and module names are `constant` nodes, which the generic
    /// identifier search does not cover for these container shapes.
    fn custom_name(&self, raw_type: &str, node: Node, source: &str) -> Option<String> {
        if raw_type != "class" && raw_type != "module" {
            return None;
        }
        let name = node.child_by_field_name("name")?;
        Some(node_text(name, source).to_string())
    }

    /// Leading underscore is the private-by-convention marker.
    fn is_public(&self, _node: Node, _source: &str, name: &str) -> bool {
        !name.starts_with('_')
    }
}
