//! Bash adapter - raw node-type classification for the bash grammar.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tree_sitter::Node;

use super::{flags::IS_KEYWORD, node_config_table, LanguageAdapter, NodeConfig};
use crate::semantic::*;

static NODE_CONFIGS: Lazy<HashMap<&'static str, NodeConfig>> = node_config_table! {
    // Structure
    "program" => (ORGANIZATION_CONTAINER, None, 0),
    "compound_statement" => (ORGANIZATION_BLOCK, None, 0),
    "subshell" => (ORGANIZATION_BLOCK, None, 0),
    "redirected_statement" => (EXECUTION_STATEMENT, None, 0),

    // Definitions
    "function_definition" => (DEFINITION_FUNCTION, FindIdentifier, 0),
    "variable_assignment" => (OPERATOR_ASSIGNMENT, FindIdentifier, 0),
    "declaration_command" => (EXECUTION_DECLARATION, FindIdentifier, 0),

    // Commands
    "command" => (EXECUTION_INVOCATION, Custom, 0),
    "command_name" => (NAME_IDENTIFIER, FullText, 0),
    "pipeline" => (TRANSFORM_QUERY, None, 0),
    "list" => (EXECUTION_STATEMENT, None, 0),
    "command_substitution" => (COMPUTATION_CALL, None, 0),
    "process_substitution" => (COMPUTATION_CALL, None, 0),
    "test_command" => (FLOW_CONDITIONAL | 0x02, None, 0),
    "unary_expression" => (OPERATOR_LOGICAL, None, 0),
    "binary_expression" => (OPERATOR_ARITHMETIC, None, 0),
    "ternary_expression" => (FLOW_CONDITIONAL | 0x03, None, 0),
    "arithmetic_expansion" => (COMPUTATION_EXPRESSION, None, 0),

    // Names and expansions
    "variable_name" => (NAME_IDENTIFIER, FullText, 0),
    "simple_expansion" => (COMPUTATION_ACCESS, FindIdentifier, 0),
    "expansion" => (COMPUTATION_ACCESS, FindIdentifier, 0),
    "word" => (NAME_IDENTIFIER, FullText, 0),
    "special_variable_name" => (NAME_SCOPED, FullText, 0),

    // Literals
    "number" => (LITERAL_NUMBER, None, 0),
    "string" => (LITERAL_STRING, None, 0),
    "string_content" => (LITERAL_STRING, None, 0),
    "raw_string" => (LITERAL_STRING | 0x03, None, 0),
    "ansi_c_string" => (LITERAL_STRING, None, 0),
    "heredoc_body" => (LITERAL_STRING | 0x03, None, 0),
    "heredoc_start" => (PARSER_DELIMITER, None, 0),
    "array" => (LITERAL_STRUCTURED | 0x01, None, 0),
    "concatenation" => (COMPUTATION_EXPRESSION, None, 0),

    // Flow control
    "if_statement" => (FLOW_CONDITIONAL, None, 0),
    "elif_clause" => (FLOW_CONDITIONAL, None, 0),
    "else_clause" => (FLOW_CONDITIONAL, None, 0),
    "case_statement" => (FLOW_CONDITIONAL | 0x01, None, 0),
    "case_item" => (PATTERN_MATCH, None, 0),
    "for_statement" => (FLOW_LOOP | 0x01, FindIdentifier, 0),
    "c_style_for_statement" => (FLOW_LOOP, None, 0),
    "while_statement" => (FLOW_LOOP | 0x02, None, 0),
    "until_statement" => (FLOW_LOOP | 0x02, None, 0),

    // Redirection
    "file_redirect" => (EXTERNAL_EMBED, None, 0),
    "heredoc_redirect" => (EXTERNAL_EMBED, None, 0),

    // Metadata
    "comment" => (METADATA_COMMENT, None, 0),

    // Keywords
    "function" => (NAME_KEYWORD, None, IS_KEYWORD),
    "if" => (NAME_KEYWORD, None, IS_KEYWORD),
    "then" => (NAME_KEYWORD, None, IS_KEYWORD),
    "elif" => (NAME_KEYWORD, None, IS_KEYWORD),
    "else" => (NAME_KEYWORD, None, IS_KEYWORD),
    "fi" => (NAME_KEYWORD, None, IS_KEYWORD),
    "case" => (NAME_KEYWORD, None, IS_KEYWORD),
    "esac" => (NAME_KEYWORD, None, IS_KEYWORD),
    "for" => (NAME_KEYWORD, None, IS_KEYWORD),
    "while" => (NAME_KEYWORD, None, IS_KEYWORD),
    "until" => (NAME_KEYWORD, None, IS_KEYWORD),
    "do" => (NAME_KEYWORD, None, IS_KEYWORD),
    "done" => (NAME_KEYWORD, None, IS_KEYWORD),
    "in" => (NAME_KEYWORD, None, IS_KEYWORD),
    "local" => (NAME_KEYWORD, None, IS_KEYWORD),
    "export" => (NAME_KEYWORD, None, IS_KEYWORD),
    "declare" => (NAME_KEYWORD, None, IS_KEYWORD),
    "readonly" => (NAME_KEYWORD, None, IS_KEYWORD),

    // Operator tokens
    "=" => (OPERATOR_ASSIGNMENT, None, 0),
    "==" => (OPERATOR_COMPARISON, None, 0),
    "!=" => (OPERATOR_COMPARISON, None, 0),
    "&&" => (OPERATOR_LOGICAL, None, 0),
    "||" => (OPERATOR_LOGICAL, None, 0),
    "!" => (OPERATOR_LOGICAL, None, 0),
    "|" => (PARSER_SYNTAX, None, 0),
    ">" => (PARSER_SYNTAX, None, 0),
    "<" => (PARSER_SYNTAX, None, 0),
    ">>" => (PARSER_SYNTAX, None, 0),
    "&" => (PARSER_SYNTAX, None, 0),

    // Punctuation
    "(" => (PARSER_PUNCTUATION, None, 0),
    ")" => (PARSER_PUNCTUATION, None, 0),
    "{" => (PARSER_PUNCTUATION, None, 0),
    "}" => (PARSER_PUNCTUATION, None, 0),
    "[" => (PARSER_PUNCTUATION, None, 0),
    "]" => (PARSER_PUNCTUATION, None, 0),
    "[[" => (PARSER_PUNCTUATION, None, 0),
    "]]" => (PARSER_PUNCTUATION, None, 0),
    ";" => (PARSER_DELIMITER, None, 0),
    ";;" => (PARSER_DELIMITER, None, 0),
    "$" => (PARSER_SYNTAX, None, 0),
    "${" => (PARSER_SYNTAX, None, 0),
    "$(" => (PARSER_SYNTAX, None, 0),
};

pub struct BashAdapter;

impl LanguageAdapter for BashAdapter {
    fn language_name(&self) -> &'static str {
        "bash"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["sh", "shell"]
    }

    fn ts_language(&self) -> tree_sitter::Language {
        tree_sitter_bash::LANGUAGE.into()
    }

    fn node_configs(&self) -> &'static HashMap<&'static str, NodeConfig> {
        &NODE_CONFIGS
    }

    /// A command is named by its `command_name` child, not by the first
    /// word-like token (which may be an env-var prefix assignment).
    fn custom_name(&self, raw_type: &str, node: Node, source: &str) -> Option<String> {
        if raw_type != "command" {
            return None;
        }
        let mut cursor = node.walk();
        let name = node
            .children(&mut cursor)
            .find(|child| child.kind() == "command_name")?;
        Some(crate::extract::node_text(name, source).to_string())
    }
}
