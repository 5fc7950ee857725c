//! Python adapter - raw node-type classification for the python grammar.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::json;
use tree_sitter::Node;

use super::{flags::IS_KEYWORD, node_config_table, LanguageAdapter, NodeConfig};
use crate::extract::{first_identifier, node_text};
use crate::semantic::*;

static NODE_CONFIGS: Lazy<HashMap<&'static str, NodeConfig>> = node_config_table! {
    // Structure
    "module" => (ORGANIZATION_CONTAINER, None, 0),
    "block" => (ORGANIZATION_BLOCK, None, 0),
    "parameters" => (ORGANIZATION_LIST, None, 0),
    "argument_list" => (ORGANIZATION_LIST, None, 0),
    "with_clause" => (ORGANIZATION_LIST, None, 0),
    "with_item" => (ORGANIZATION_LIST, None, 0),

    // Definitions
    "function_definition" => (DEFINITION_FUNCTION, FindIdentifier, 0),
    "class_definition" => (DEFINITION_CLASS, FindIdentifier, 0),
    "decorated_definition" => (DEFINITION_FUNCTION, Custom, 0),
    "lambda" => (COMPUTATION_LAMBDA, None, 0),
    "default_parameter" => (DEFINITION_VARIABLE | 0x02, FindIdentifier, 0),
    "typed_parameter" => (DEFINITION_VARIABLE | 0x02, FindIdentifier, 0),
    "typed_default_parameter" => (DEFINITION_VARIABLE | 0x02, FindIdentifier, 0),
    "global_statement" => (EXECUTION_MUTATION, FindIdentifier, 0),
    "nonlocal_statement" => (EXECUTION_MUTATION, FindIdentifier, 0),

    // Names
    "identifier" => (NAME_IDENTIFIER, FullText, 0),
    "dotted_name" => (NAME_QUALIFIED, FullText, 0),
    "attribute" => (COMPUTATION_ACCESS, FindQualifiedIdentifier, 0),
    "subscript" => (COMPUTATION_ACCESS, None, 0),
    "slice" => (COMPUTATION_ACCESS, None, 0),

    // Calls
    "call" => (COMPUTATION_CALL, FindCallTarget, 0),
    "keyword_argument" => (COMPUTATION_EXPRESSION, FindIdentifier, 0),

    // Literals
    "integer" => (LITERAL_NUMBER, None, 0),
    "float" => (LITERAL_NUMBER | 0x01, None, 0),
    "string" => (LITERAL_STRING, None, 0),
    "string_content" => (LITERAL_STRING, None, 0),
    "string_start" => (PARSER_DELIMITER, None, 0),
    "string_end" => (PARSER_DELIMITER, None, 0),
    "interpolation" => (LITERAL_STRING | 0x01, None, 0),
    "escape_sequence" => (LITERAL_STRING, None, 0),
    "true" => (LITERAL_ATOMIC, None, IS_KEYWORD),
    "false" => (LITERAL_ATOMIC, None, IS_KEYWORD),
    "none" => (LITERAL_ATOMIC, None, IS_KEYWORD),
    "ellipsis" => (LITERAL_ATOMIC, None, 0),
    "list" => (LITERAL_STRUCTURED | 0x01, None, 0),
    "tuple" => (LITERAL_STRUCTURED | 0x01, None, 0),
    "set" => (LITERAL_STRUCTURED | 0x03, None, 0),
    "dictionary" => (LITERAL_STRUCTURED | 0x02, None, 0),
    "pair" => (COMPUTATION_EXPRESSION, None, 0),

    // Comprehensions
    "list_comprehension" => (TRANSFORM_ITERATION, None, 0),
    "set_comprehension" => (TRANSFORM_ITERATION, None, 0),
    "dictionary_comprehension" => (TRANSFORM_ITERATION, None, 0),
    "generator_expression" => (TRANSFORM_ITERATION, None, 0),
    "for_in_clause" => (TRANSFORM_ITERATION, None, 0),
    "if_clause" => (PATTERN_GUARD, None, 0),

    // Operators and expressions
    "binary_operator" => (OPERATOR_ARITHMETIC, None, 0),
    "unary_operator" => (OPERATOR_ARITHMETIC | 0x01, None, 0),
    "boolean_operator" => (OPERATOR_LOGICAL, None, 0),
    "not_operator" => (OPERATOR_LOGICAL, None, 0),
    "comparison_operator" => (OPERATOR_COMPARISON, None, 0),
    "conditional_expression" => (FLOW_CONDITIONAL | 0x03, None, 0),
    "assignment" => (OPERATOR_ASSIGNMENT, FindIdentifier, 0),
    "augmented_assignment" => (OPERATOR_ASSIGNMENT | 0x01, FindIdentifier, 0),
    "named_expression" => (OPERATOR_ASSIGNMENT, FindIdentifier, 0),
    "expression_statement" => (EXECUTION_STATEMENT, None, 0),
    "await" => (FLOW_SYNC, None, 0),
    "yield" => (FLOW_SYNC, None, 0),
    "type" => (TYPE_REFERENCE, FullText, 0),

    // Flow control
    "if_statement" => (FLOW_CONDITIONAL, None, 0),
    "elif_clause" => (FLOW_CONDITIONAL, None, 0),
    "else_clause" => (FLOW_CONDITIONAL, None, 0),
    "match_statement" => (FLOW_CONDITIONAL | 0x01, None, 0),
    "case_clause" => (PATTERN_MATCH, None, 0),
    "case_pattern" => (PATTERN_MATCH, None, 0),
    "for_statement" => (FLOW_LOOP | 0x01, None, 0),
    "while_statement" => (FLOW_LOOP | 0x02, None, 0),
    "return_statement" => (FLOW_JUMP, None, 0),
    "break_statement" => (FLOW_JUMP | 0x01, None, 0),
    "continue_statement" => (FLOW_JUMP | 0x02, None, 0),
    "pass_statement" => (EXECUTION_STATEMENT, None, 0),
    "assert_statement" => (FLOW_CONDITIONAL | 0x02, None, 0),
    "with_statement" => (EXECUTION_STATEMENT, None, 0),
    "delete_statement" => (EXECUTION_MUTATION, None, 0),

    // Error handling
    "try_statement" => (ERROR_TRY, None, 0),
    "except_clause" => (ERROR_CATCH, None, 0),
    "finally_clause" => (ERROR_FINALLY, None, 0),
    "raise_statement" => (ERROR_THROW, None, 0),

    // Imports
    "import_statement" => (EXTERNAL_IMPORT, FindIdentifier, 0),
    "import_from_statement" => (EXTERNAL_IMPORT | 0x01, FindIdentifier, 0),
    "aliased_import" => (EXTERNAL_IMPORT, FindIdentifier, 0),
    "wildcard_import" => (EXTERNAL_IMPORT | 0x02, None, 0),
    "relative_import" => (EXTERNAL_IMPORT | 0x03, FullText, 0),

    // Metadata
    "comment" => (METADATA_COMMENT, None, 0),
    "decorator" => (METADATA_ANNOTATION, FullText, 0),

    // Keywords
    // Note: the "lambda" and "await" keyword tokens share their kind string
    // with the named expression nodes above, so they take those entries.
    "def" => (NAME_KEYWORD, None, IS_KEYWORD),
    "class" => (NAME_KEYWORD, None, IS_KEYWORD),
    "if" => (NAME_KEYWORD, None, IS_KEYWORD),
    "elif" => (NAME_KEYWORD, None, IS_KEYWORD),
    "else" => (NAME_KEYWORD, None, IS_KEYWORD),
    "for" => (NAME_KEYWORD, None, IS_KEYWORD),
    "while" => (NAME_KEYWORD, None, IS_KEYWORD),
    "in" => (NAME_KEYWORD, None, IS_KEYWORD),
    "is" => (NAME_KEYWORD, None, IS_KEYWORD),
    "not" => (NAME_KEYWORD, None, IS_KEYWORD),
    "and" => (NAME_KEYWORD, None, IS_KEYWORD),
    "or" => (NAME_KEYWORD, None, IS_KEYWORD),
    "return" => (NAME_KEYWORD, None, IS_KEYWORD),
    "import" => (NAME_KEYWORD, None, IS_KEYWORD),
    "from" => (NAME_KEYWORD, None, IS_KEYWORD),
    "as" => (NAME_KEYWORD, None, IS_KEYWORD),
    "try" => (NAME_KEYWORD, None, IS_KEYWORD),
    "except" => (NAME_KEYWORD, None, IS_KEYWORD),
    "finally" => (NAME_KEYWORD, None, IS_KEYWORD),
    "raise" => (NAME_KEYWORD, None, IS_KEYWORD),
    "with" => (NAME_KEYWORD, None, IS_KEYWORD),
    "pass" => (NAME_KEYWORD, None, IS_KEYWORD),
    "break" => (NAME_KEYWORD, None, IS_KEYWORD),
    "continue" => (NAME_KEYWORD, None, IS_KEYWORD),
    "global" => (NAME_KEYWORD, None, IS_KEYWORD),
    "nonlocal" => (NAME_KEYWORD, None, IS_KEYWORD),
    "assert" => (NAME_KEYWORD, None, IS_KEYWORD),
    "del" => (NAME_KEYWORD, None, IS_KEYWORD),
    "match" => (NAME_KEYWORD, None, IS_KEYWORD),
    "case" => (NAME_KEYWORD, None, IS_KEYWORD),

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
    "**" => (OPERATOR_ARITHMETIC, None, 0),
    "//" => (OPERATOR_ARITHMETIC, None, 0),
    "@" => (OPERATOR_ARITHMETIC | 0x02, None, 0),
    "&" => (OPERATOR_ARITHMETIC | 0x02, None, 0),
    "|" => (OPERATOR_ARITHMETIC | 0x02, None, 0),
    "^" => (OPERATOR_ARITHMETIC | 0x02, None, 0),
    "~" => (OPERATOR_ARITHMETIC | 0x02, None, 0),
    "<<" => (OPERATOR_ARITHMETIC | 0x02, None, 0),
    ">>" => (OPERATOR_ARITHMETIC | 0x02, None, 0),

    // Punctuation
    "(" => (PARSER_PUNCTUATION, None, 0),
    ")" => (PARSER_PUNCTUATION, None, 0),
    "[" => (PARSER_PUNCTUATION, None, 0),
    "]" => (PARSER_PUNCTUATION, None, 0),
    "{" => (PARSER_PUNCTUATION, None, 0),
    "}" => (PARSER_PUNCTUATION, None, 0),
    "," => (PARSER_DELIMITER, None, 0),
    ":" => (PARSER_DELIMITER, None, 0),
    ";" => (PARSER_DELIMITER, None, 0),
    "." => (PARSER_DELIMITER, None, 0),
    "->" => (PARSER_DELIMITER, None, 0),
};

pub struct PythonAdapter;

impl LanguageAdapter for PythonAdapter {
    fn language_name(&self) -> &'static str {
        "python"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn ts_language(&self) -> tree_sitter::Language {
        tree_sitter_python::LANGUAGE.into()
    }

    fn node_configs(&self) -> &'static HashMap<&'static str, NodeConfig> {
        &NODE_CONFIGS
    }

    /// Decorated definitions take the name of the wrapped definition.
    fn custom_name(&self, raw_type: &str, node: Node, source: &str) -> Option<String> {
        if raw_type != "decorated_definition" {
            return None;
        }
        let definition = node.child_by_field_name("definition")?;
        definition
            .child_by_field_name("name")
            .map(|name| node_text(name, source).to_string())
    }

    /// Leading underscore marks a private name by convention.
    fn is_public(&self, _node: Node, _source: &str, name: &str) -> bool {
        !name.starts_with('_')
    }

    fn native_context(&self, node: Node, source: &str) -> Option<serde_json::Value> {
        if node.kind() != "function_definition" {
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
        let return_type = node
            .child_by_field_name("return_type")
            .map(|rt| node_text(rt, source).to_string());
        Some(json!({
            "parameters": names,
            "return_type": return_type,
        }))
    }
}
