//! Go adapter - raw node-type classification for the go grammar.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tree_sitter::Node;

use super::{flags::IS_KEYWORD, node_config_table, LanguageAdapter, NodeConfig};
use crate::extract::node_text;
use crate::semantic::*;

static NODE_CONFIGS: Lazy<HashMap<&'static str, NodeConfig>> = node_config_table! {
    // Structure
    "source_file" => (ORGANIZATION_CONTAINER, None, 0),
    "block" => (ORGANIZATION_BLOCK, None, 0),
    "parameter_list" => (ORGANIZATION_LIST, None, 0),
    "argument_list" => (ORGANIZATION_LIST, None, 0),
    "field_declaration_list" => (ORGANIZATION_BLOCK, None, 0),
    "package_clause" => (DEFINITION_MODULE, FindIdentifier, 0),

    // Definitions
    "function_declaration" => (DEFINITION_FUNCTION, FindIdentifier, 0),
    "method_declaration" => (DEFINITION_FUNCTION, Custom, 0),
    "func_literal" => (COMPUTATION_LAMBDA, FindAssignmentTarget, 0),
    "type_declaration" => (DEFINITION_CLASS, FindIdentifier, 0),
    "type_spec" => (DEFINITION_CLASS, FindIdentifier, 0),
    "struct_type" => (TYPE_COMPOSITE, None, 0),
    "interface_type" => (TYPE_COMPOSITE, None, 0),
    "var_declaration" => (EXECUTION_DECLARATION, FindIdentifier, 0),
    "var_spec" => (DEFINITION_VARIABLE, FindIdentifier, 0),
    "const_declaration" => (EXECUTION_DECLARATION, FindIdentifier, 0),
    "const_spec" => (DEFINITION_VARIABLE | 0x01, FindIdentifier, 0),
    "short_var_declaration" => (DEFINITION_VARIABLE, FindIdentifier, 0),
    "parameter_declaration" => (DEFINITION_VARIABLE | 0x02, FindIdentifier, 0),
    "variadic_parameter_declaration" => (DEFINITION_VARIABLE | 0x02, FindIdentifier, 0),
    "field_declaration" => (DEFINITION_VARIABLE | 0x03, FindIdentifier, 0),

    // Names
    "identifier" => (NAME_IDENTIFIER, FullText, 0),
    "field_identifier" => (NAME_IDENTIFIER, FullText, 0),
    "type_identifier" => (NAME_IDENTIFIER | 0x02, FullText, 0),
    "package_identifier" => (NAME_IDENTIFIER, FullText, 0),
    "blank_identifier" => (NAME_IDENTIFIER, FullText, 0),
    "selector_expression" => (COMPUTATION_ACCESS, FindQualifiedIdentifier, 0),
    "index_expression" => (COMPUTATION_ACCESS, None, 0),
    "qualified_type" => (NAME_QUALIFIED, FindQualifiedIdentifier, 0),

    // Types
    "pointer_type" => (TYPE_REFERENCE, None, 0),
    "slice_type" => (TYPE_COMPOSITE, None, 0),
    "array_type" => (TYPE_COMPOSITE, None, 0),
    "map_type" => (TYPE_COMPOSITE, None, 0),
    "channel_type" => (TYPE_COMPOSITE, None, 0),
    "function_type" => (TYPE_COMPOSITE, None, 0),

    // Calls
    "call_expression" => (COMPUTATION_CALL, FindCallTarget, 0),

    // Literals
    "int_literal" => (LITERAL_NUMBER, None, 0),
    "float_literal" => (LITERAL_NUMBER | 0x01, None, 0),
    "imaginary_literal" => (LITERAL_NUMBER | 0x03, None, 0),
    "rune_literal" => (LITERAL_STRING, None, 0),
    "interpreted_string_literal" => (LITERAL_STRING, None, 0),
    "raw_string_literal" => (LITERAL_STRING | 0x03, None, 0),
    "true" => (LITERAL_ATOMIC, None, IS_KEYWORD),
    "false" => (LITERAL_ATOMIC, None, IS_KEYWORD),
    "nil" => (LITERAL_ATOMIC, None, IS_KEYWORD),
    "composite_literal" => (LITERAL_STRUCTURED, FindIdentifier, 0),
    "literal_value" => (LITERAL_STRUCTURED, None, 0),
    "keyed_element" => (COMPUTATION_EXPRESSION, None, 0),

    // Operators and expressions
    "binary_expression" => (OPERATOR_ARITHMETIC, None, 0),
    "unary_expression" => (OPERATOR_ARITHMETIC | 0x01, None, 0),
    "assignment_statement" => (OPERATOR_ASSIGNMENT, FindIdentifier, 0),
    "inc_statement" => (OPERATOR_ARITHMETIC | 0x01, None, 0),
    "dec_statement" => (OPERATOR_ARITHMETIC | 0x01, None, 0),
    "expression_statement" => (EXECUTION_STATEMENT, None, 0),
    "parenthesized_expression" => (COMPUTATION_EXPRESSION, None, 0),
    "type_assertion_expression" => (COMPUTATION_EXPRESSION, None, 0),
    "type_conversion_expression" => (COMPUTATION_EXPRESSION, None, 0),

    // Flow control
    "if_statement" => (FLOW_CONDITIONAL, None, 0),
    "expression_switch_statement" => (FLOW_CONDITIONAL | 0x01, None, 0),
    "type_switch_statement" => (FLOW_CONDITIONAL | 0x01, None, 0),
    "expression_case" => (PATTERN_MATCH, None, 0),
    "type_case" => (PATTERN_MATCH, None, 0),
    "default_case" => (PATTERN_MATCH, None, 0),
    "for_statement" => (FLOW_LOOP, None, 0),
    "range_clause" => (FLOW_LOOP | 0x01, None, 0),
    "return_statement" => (FLOW_JUMP, None, 0),
    "break_statement" => (FLOW_JUMP | 0x01, None, 0),
    "continue_statement" => (FLOW_JUMP | 0x02, None, 0),
    "goto_statement" => (FLOW_JUMP | 0x03, FindIdentifier, 0),
    "labeled_statement" => (FLOW_JUMP | 0x03, FindIdentifier, 0),
    "go_statement" => (FLOW_SYNC, None, 0),
    "defer_statement" => (FLOW_SYNC, None, 0),
    "select_statement" => (FLOW_CONDITIONAL | 0x01, None, 0),
    "communication_case" => (PATTERN_MATCH, None, 0),
    "send_statement" => (EXECUTION_MUTATION, None, 0),

    // Imports
    "import_declaration" => (EXTERNAL_IMPORT, None, 0),
    "import_spec" => (EXTERNAL_IMPORT, FullText, 0),
    "import_spec_list" => (ORGANIZATION_LIST, None, 0),

    // Metadata
    "comment" => (METADATA_COMMENT, None, 0),

    // Keywords
    "func" => (NAME_KEYWORD, None, IS_KEYWORD),
    "type" => (NAME_KEYWORD, None, IS_KEYWORD),
    "struct" => (NAME_KEYWORD, None, IS_KEYWORD),
    "interface" => (NAME_KEYWORD, None, IS_KEYWORD),
    "package" => (NAME_KEYWORD, None, IS_KEYWORD),
    "import" => (NAME_KEYWORD, None, IS_KEYWORD),
    "var" => (NAME_KEYWORD, None, IS_KEYWORD),
    "const" => (NAME_KEYWORD, None, IS_KEYWORD),
    "if" => (NAME_KEYWORD, None, IS_KEYWORD),
    "else" => (NAME_KEYWORD, None, IS_KEYWORD),
    "switch" => (NAME_KEYWORD, None, IS_KEYWORD),
    "case" => (NAME_KEYWORD, None, IS_KEYWORD),
    "default" => (NAME_KEYWORD, None, IS_KEYWORD),
    "for" => (NAME_KEYWORD, None, IS_KEYWORD),
    "range" => (NAME_KEYWORD, None, IS_KEYWORD),
    "return" => (NAME_KEYWORD, None, IS_KEYWORD),
    "break" => (NAME_KEYWORD, None, IS_KEYWORD),
    "continue" => (NAME_KEYWORD, None, IS_KEYWORD),
    "goto" => (NAME_KEYWORD, None, IS_KEYWORD),
    "go" => (NAME_KEYWORD, None, IS_KEYWORD),
    "defer" => (NAME_KEYWORD, None, IS_KEYWORD),
    "select" => (NAME_KEYWORD, None, IS_KEYWORD),
    "chan" => (NAME_KEYWORD, None, IS_KEYWORD),
    "map" => (NAME_KEYWORD, None, IS_KEYWORD),

    // Operator tokens
    "=" => (OPERATOR_ASSIGNMENT, None, 0),
    ":=" => (OPERATOR_ASSIGNMENT, None, 0),
    "==" => (OPERATOR_COMPARISON, None, 0),
    "!=" => (OPERATOR_COMPARISON, None, 0),
    "<" => (OPERATOR_COMPARISON, None, 0),
    ">" => (OPERATOR_COMPARISON, None, 0),
    "<=" => (OPERATOR_COMPARISON, None, 0),
    ">=" => (OPERATOR_COMPARISON, None, 0),
    "+" => (OPERATOR_ARITHMETIC, None, 0),
    "-" => (OPERATOR_ARITHMETIC, None, 0),
    "*" => (OPERATOR_ARITHMETIC, None, 0),
    "/" => (OPERATOR_ARITHMETIC, None, 0),
    "%" => (OPERATOR_ARITHMETIC, None, 0),
    "&&" => (OPERATOR_LOGICAL, None, 0),
    "||" => (OPERATOR_LOGICAL, None, 0),
    "!" => (OPERATOR_LOGICAL, None, 0),
    "<-" => (PARSER_SYNTAX, None, 0),

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
};

pub struct GoAdapter;

impl LanguageAdapter for GoAdapter {
    fn language_name(&self) -> &'static str {
        "go"
    }

    fn ts_language(&self) -> tree_sitter::Language {
        tree_sitter_go::LANGUAGE.into()
    }

    fn node_configs(&self) -> &'static HashMap<&'static str, NodeConfig> {
        &NODE_CONFIGS
    }

    /// Method names live in a `field_identifier` after the receiver, out of
    /// reach of the plain identifier search.
    fn custom_name(&self, raw_type: &str, node: Node, source: &str) -> Option<String> {
        if raw_type != "method_declaration" {
            return None;
        }
        node.child_by_field_name("name")
            .map(|name| node_text(name, source).to_string())
    }

    /// Go visibility is spelled by capitalization.
    fn is_public(&self, _node: Node, _source: &str, name: &str) -> bool {
        name.chars().next().is_some_and(|c| c.is_uppercase())
    }
}
