//! JavaScript adapter - raw node-type classification for the javascript
//! grammar (also used for jsx sources).

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::json;
use tree_sitter::Node;

use super::{
    flags::{IS_KEYWORD, IS_KEYWORD_IF_LEAF},
    node_config_table, LanguageAdapter, NodeConfig,
};
use crate::extract::{first_identifier, node_text};
use crate::semantic::*;

pub(super) static NODE_CONFIGS: Lazy<HashMap<&'static str, NodeConfig>> = node_config_table! {
    // Structure
    "program" => (ORGANIZATION_CONTAINER, None, 0),
    "statement_block" => (ORGANIZATION_BLOCK, None, 0),
    "class_body" => (ORGANIZATION_BLOCK, None, 0),
    "formal_parameters" => (ORGANIZATION_LIST, None, 0),
    "arguments" => (ORGANIZATION_LIST, None, 0),

    // Definitions
    "function_declaration" => (DEFINITION_FUNCTION, FindIdentifier, 0),
    "generator_function_declaration" => (DEFINITION_FUNCTION | 0x03, FindIdentifier, 0),
    "function_expression" => (COMPUTATION_LAMBDA, FindAssignmentTarget, 0),
    "generator_function" => (COMPUTATION_LAMBDA, FindAssignmentTarget, 0),
    "arrow_function" => (COMPUTATION_LAMBDA, FindAssignmentTarget, 0),
    "method_definition" => (DEFINITION_FUNCTION, FindProperty, 0),
    "class_declaration" => (DEFINITION_CLASS, FindIdentifier, 0),
    // "class" is both the bare keyword token and the class-expression node;
    // the conditional flag marks only the leaf spelling as a keyword.
    "class" => (DEFINITION_CLASS, FindIdentifier, IS_KEYWORD_IF_LEAF),
    "variable_declaration" => (EXECUTION_DECLARATION, FindIdentifier, 0),
    "lexical_declaration" => (EXECUTION_DECLARATION, FindIdentifier, 0),
    "variable_declarator" => (DEFINITION_VARIABLE, FindIdentifier, 0),
    "field_definition" => (DEFINITION_VARIABLE | 0x03, FindProperty, 0),

    // Names
    "identifier" => (NAME_IDENTIFIER, FullText, 0),
    "property_identifier" => (NAME_IDENTIFIER, FullText, 0),
    "shorthand_property_identifier" => (NAME_IDENTIFIER, FullText, 0),
    "shorthand_property_identifier_pattern" => (NAME_IDENTIFIER, FullText, 0),
    "private_property_identifier" => (NAME_IDENTIFIER, FullText, 0),
    "nested_identifier" => (NAME_QUALIFIED, FindQualifiedIdentifier, 0),
    "member_expression" => (COMPUTATION_ACCESS, FindQualifiedIdentifier, 0),
    "subscript_expression" => (COMPUTATION_ACCESS, None, 0),
    "this" => (NAME_SCOPED, None, IS_KEYWORD),
    "super" => (NAME_SCOPED, None, IS_KEYWORD),

    // Calls
    "call_expression" => (COMPUTATION_CALL, FindCallTarget, 0),
    "new_expression" => (COMPUTATION_CALL | 0x02, FindCallTarget, 0),

    // Literals
    "number" => (LITERAL_NUMBER, None, 0),
    "string" => (LITERAL_STRING, None, 0),
    "string_fragment" => (LITERAL_STRING, None, 0),
    "template_string" => (LITERAL_STRING | 0x01, None, 0),
    "template_substitution" => (LITERAL_STRING | 0x01, None, 0),
    "regex" => (LITERAL_STRING | 0x02, None, 0),
    "true" => (LITERAL_ATOMIC, None, IS_KEYWORD),
    "false" => (LITERAL_ATOMIC, None, IS_KEYWORD),
    "null" => (LITERAL_ATOMIC, None, IS_KEYWORD),
    "undefined" => (LITERAL_ATOMIC, None, IS_KEYWORD),
    "array" => (LITERAL_STRUCTURED | 0x01, None, 0),
    "object" => (LITERAL_STRUCTURED | 0x02, None, 0),
    "pair" => (COMPUTATION_EXPRESSION, FindProperty, 0),

    // Patterns
    "array_pattern" => (PATTERN_DESTRUCTURE, None, 0),
    "object_pattern" => (PATTERN_DESTRUCTURE, None, 0),
    "rest_pattern" => (PATTERN_DESTRUCTURE, None, 0),
    "spread_element" => (PATTERN_DESTRUCTURE, None, 0),

    // Operators and expressions
    "binary_expression" => (OPERATOR_ARITHMETIC, None, 0),
    "unary_expression" => (OPERATOR_ARITHMETIC | 0x01, None, 0),
    "update_expression" => (OPERATOR_ARITHMETIC | 0x01, None, 0),
    "ternary_expression" => (FLOW_CONDITIONAL | 0x03, None, 0),
    "assignment_expression" => (OPERATOR_ASSIGNMENT, FindIdentifier, 0),
    "augmented_assignment_expression" => (OPERATOR_ASSIGNMENT | 0x01, FindIdentifier, 0),
    "expression_statement" => (EXECUTION_STATEMENT, None, 0),
    "sequence_expression" => (COMPUTATION_EXPRESSION, None, 0),
    "parenthesized_expression" => (COMPUTATION_EXPRESSION, None, 0),
    "await_expression" => (FLOW_SYNC, None, 0),
    "yield_expression" => (FLOW_SYNC, None, 0),

    // Flow control
    "if_statement" => (FLOW_CONDITIONAL, None, 0),
    "else_clause" => (FLOW_CONDITIONAL, None, 0),
    "switch_statement" => (FLOW_CONDITIONAL | 0x01, None, 0),
    "switch_case" => (PATTERN_MATCH, None, 0),
    "switch_default" => (PATTERN_MATCH, None, 0),
    "for_statement" => (FLOW_LOOP, None, 0),
    "for_in_statement" => (FLOW_LOOP | 0x01, None, 0),
    "while_statement" => (FLOW_LOOP | 0x02, None, 0),
    "do_statement" => (FLOW_LOOP | 0x02, None, 0),
    "return_statement" => (FLOW_JUMP, None, 0),
    "break_statement" => (FLOW_JUMP | 0x01, None, 0),
    "continue_statement" => (FLOW_JUMP | 0x02, None, 0),
    "labeled_statement" => (FLOW_JUMP | 0x03, FindIdentifier, 0),

    // Error handling
    "try_statement" => (ERROR_TRY, None, 0),
    "catch_clause" => (ERROR_CATCH, None, 0),
    "finally_clause" => (ERROR_FINALLY, None, 0),
    "throw_statement" => (ERROR_THROW, None, 0),

    // Imports and exports
    "import_statement" => (EXTERNAL_IMPORT, None, 0),
    "import_clause" => (EXTERNAL_IMPORT | 0x01, FindIdentifier, 0),
    "named_imports" => (EXTERNAL_IMPORT | 0x01, None, 0),
    "namespace_import" => (EXTERNAL_IMPORT | 0x02, FindIdentifier, 0),
    "import_specifier" => (EXTERNAL_IMPORT | 0x01, FindIdentifier, 0),
    "export_statement" => (EXTERNAL_EXPORT, None, 0),
    "export_specifier" => (EXTERNAL_EXPORT, FindIdentifier, 0),

    // Metadata
    "comment" => (METADATA_COMMENT, None, 0),
    "hash_bang_line" => (METADATA_DIRECTIVE, None, 0),

    // Keywords
    "function" => (NAME_KEYWORD, None, IS_KEYWORD),
    "const" => (NAME_KEYWORD, None, IS_KEYWORD),
    "let" => (NAME_KEYWORD, None, IS_KEYWORD),
    "var" => (NAME_KEYWORD, None, IS_KEYWORD),
    "if" => (NAME_KEYWORD, None, IS_KEYWORD),
    "else" => (NAME_KEYWORD, None, IS_KEYWORD),
    "for" => (NAME_KEYWORD, None, IS_KEYWORD),
    "while" => (NAME_KEYWORD, None, IS_KEYWORD),
    "do" => (NAME_KEYWORD, None, IS_KEYWORD),
    "switch" => (NAME_KEYWORD, None, IS_KEYWORD),
    "case" => (NAME_KEYWORD, None, IS_KEYWORD),
    "default" => (NAME_KEYWORD, None, IS_KEYWORD),
    "return" => (NAME_KEYWORD, None, IS_KEYWORD),
    "break" => (NAME_KEYWORD, None, IS_KEYWORD),
    "continue" => (NAME_KEYWORD, None, IS_KEYWORD),
    "new" => (NAME_KEYWORD, None, IS_KEYWORD),
    "typeof" => (NAME_KEYWORD, None, IS_KEYWORD),
    "instanceof" => (NAME_KEYWORD, None, IS_KEYWORD),
    "in" => (NAME_KEYWORD, None, IS_KEYWORD),
    "of" => (NAME_KEYWORD, None, IS_KEYWORD),
    "try" => (NAME_KEYWORD, None, IS_KEYWORD),
    "catch" => (NAME_KEYWORD, None, IS_KEYWORD),
    "finally" => (NAME_KEYWORD, None, IS_KEYWORD),
    "throw" => (NAME_KEYWORD, None, IS_KEYWORD),
    "import" => (NAME_KEYWORD, None, IS_KEYWORD),
    "export" => (NAME_KEYWORD, None, IS_KEYWORD),
    "delete" => (NAME_KEYWORD, None, IS_KEYWORD),
    "void" => (NAME_KEYWORD, None, IS_KEYWORD),
    "await" => (NAME_KEYWORD, None, IS_KEYWORD),
    "yield" => (NAME_KEYWORD, None, IS_KEYWORD),
    // Contextual keywords: only keywords when they stand alone as leaves.
    "async" => (NAME_KEYWORD, None, IS_KEYWORD_IF_LEAF),
    "static" => (NAME_KEYWORD, None, IS_KEYWORD_IF_LEAF),
    "get" => (NAME_KEYWORD, None, IS_KEYWORD_IF_LEAF),
    "set" => (NAME_KEYWORD, None, IS_KEYWORD_IF_LEAF),

    // Operator tokens
    "=" => (OPERATOR_ASSIGNMENT, None, 0),
    "==" => (OPERATOR_COMPARISON, None, 0),
    "===" => (OPERATOR_COMPARISON, None, 0),
    "!=" => (OPERATOR_COMPARISON, None, 0),
    "!==" => (OPERATOR_COMPARISON, None, 0),
    "<" => (OPERATOR_COMPARISON, None, 0),
    ">" => (OPERATOR_COMPARISON, None, 0),
    "<=" => (OPERATOR_COMPARISON, None, 0),
    ">=" => (OPERATOR_COMPARISON, None, 0),
    "+" => (OPERATOR_ARITHMETIC, None, 0),
    "-" => (OPERATOR_ARITHMETIC, None, 0),
    "*" => (OPERATOR_ARITHMETIC, None, 0),
    "/" => (OPERATOR_ARITHMETIC, None, 0),
    "%" => (OPERATOR_ARITHMETIC, None, 0),
    "**" => (OPERATOR_ARITHMETIC, None, 0),
    "&&" => (OPERATOR_LOGICAL, None, 0),
    "||" => (OPERATOR_LOGICAL, None, 0),
    "!" => (OPERATOR_LOGICAL, None, 0),
    "??" => (OPERATOR_LOGICAL, None, 0),
    "=>" => (PARSER_SYNTAX, None, 0),

    // Punctuation
    "(" => (PARSER_PUNCTUATION, None, 0),
    ")" => (PARSER_PUNCTUATION, None, 0),
    "[" => (PARSER_PUNCTUATION, None, 0),
    "]" => (PARSER_PUNCTUATION, None, 0),
    "{" => (PARSER_PUNCTUATION, None, 0),
    "}" => (PARSER_PUNCTUATION, None, 0),
    "," => (PARSER_DELIMITER, None, 0),
    ";" => (PARSER_DELIMITER, None, 0),
    ":" => (PARSER_DELIMITER, None, 0),
    "." => (PARSER_DELIMITER, None, 0),
};

pub struct JavaScriptAdapter;

impl LanguageAdapter for JavaScriptAdapter {
    fn language_name(&self) -> &'static str {
        "javascript"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["js", "jsx"]
    }

    fn ts_language(&self) -> tree_sitter::Language {
        tree_sitter_javascript::LANGUAGE.into()
    }

    fn node_configs(&self) -> &'static HashMap<&'static str, NodeConfig> {
        &NODE_CONFIGS
    }

    /// Private class members use the `#name` spelling; everything else is
    /// reachable from outside.
    fn is_public(&self, _node: Node, _source: &str, name: &str) -> bool {
        !name.starts_with('#')
    }

    fn native_context(&self, node: Node, source: &str) -> Option<serde_json::Value> {
        if !matches!(
            node.kind(),
            "function_declaration" | "method_definition" | "arrow_function"
        ) {
            return None;
        }
        let params = node.child_by_field_name("parameters")?;
        let mut names = Vec::new();
        let mut cursor = params.walk();
        for child in params.named_children(&mut cursor) {
            if let Some(name) = first_identifier(child, source) {
                names.push(name);
            }
        }
        let mut modifiers = Vec::new();
        let text = node_text(node, source);
        if text.starts_with("async") {
            modifiers.push("async");
        }
        Some(json!({
            "parameters": names,
            "modifiers": modifiers,
        }))
    }
}
