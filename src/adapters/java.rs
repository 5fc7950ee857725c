//! Java adapter - raw node-type classification for the java grammar.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tree_sitter::Node;

use super::{
    flags::{IS_DECLARATION_ONLY, IS_KEYWORD},
    node_config_table, LanguageAdapter, NodeConfig,
};
use crate::extract::node_text;
use crate::semantic::*;

static NODE_CONFIGS: Lazy<HashMap<&'static str, NodeConfig>> = node_config_table! {
    // Structure
    "program" => (ORGANIZATION_CONTAINER, None, 0),
    "block" => (ORGANIZATION_BLOCK, None, 0),
    "class_body" => (ORGANIZATION_BLOCK, None, 0),
    "interface_body" => (ORGANIZATION_BLOCK, None, 0),
    "enum_body" => (ORGANIZATION_BLOCK, None, 0),
    "formal_parameters" => (ORGANIZATION_LIST, None, 0),
    "argument_list" => (ORGANIZATION_LIST, None, 0),
    "modifiers" => (ORGANIZATION_LIST, None, 0),
    "package_declaration" => (DEFINITION_MODULE, FindQualifiedIdentifier, 0),

    // Definitions
    "class_declaration" => (DEFINITION_CLASS, FindIdentifier, 0),
    "interface_declaration" => (DEFINITION_CLASS | 0x01, FindIdentifier, IS_DECLARATION_ONLY),
    "enum_declaration" => (DEFINITION_CLASS | 0x03, FindIdentifier, 0),
    "record_declaration" => (DEFINITION_CLASS, FindIdentifier, 0),
    "annotation_type_declaration" => (DEFINITION_CLASS | 0x01, FindIdentifier, 0),
    "method_declaration" => (DEFINITION_FUNCTION, FindIdentifier, 0),
    "constructor_declaration" => (DEFINITION_FUNCTION | 0x02, FindIdentifier, 0),
    "compact_constructor_declaration" => (DEFINITION_FUNCTION | 0x02, FindIdentifier, 0),
    "field_declaration" => (DEFINITION_VARIABLE | 0x03, FindIdentifier, 0),
    "local_variable_declaration" => (DEFINITION_VARIABLE, FindIdentifier, 0),
    "variable_declarator" => (DEFINITION_VARIABLE, FindIdentifier, 0),
    "formal_parameter" => (DEFINITION_VARIABLE | 0x02, FindIdentifier, 0),
    "spread_parameter" => (DEFINITION_VARIABLE | 0x02, FindIdentifier, 0),
    "enum_constant" => (DEFINITION_VARIABLE | 0x01, FindIdentifier, 0),
    "lambda_expression" => (COMPUTATION_LAMBDA, FindAssignmentTarget, 0),

    // Names
    "identifier" => (NAME_IDENTIFIER, FullText, 0),
    "type_identifier" => (NAME_IDENTIFIER | 0x02, FullText, 0),
    "scoped_identifier" => (NAME_QUALIFIED, FindQualifiedIdentifier, 0),
    "field_access" => (COMPUTATION_ACCESS, FindQualifiedIdentifier, 0),
    "array_access" => (COMPUTATION_ACCESS, None, 0),
    "this" => (NAME_SCOPED, None, IS_KEYWORD),
    "super" => (NAME_SCOPED, None, IS_KEYWORD),

    // Types
    "integral_type" => (TYPE_PRIMITIVE, FullText, 0),
    "floating_point_type" => (TYPE_PRIMITIVE, FullText, 0),
    "boolean_type" => (TYPE_PRIMITIVE, FullText, 0),
    "void_type" => (TYPE_PRIMITIVE, FullText, 0),
    "generic_type" => (TYPE_GENERIC, FindIdentifier, 0),
    "array_type" => (TYPE_COMPOSITE, None, 0),
    "type_arguments" => (ORGANIZATION_LIST, None, 0),
    "type_parameters" => (ORGANIZATION_LIST, None, 0),
    "type_parameter" => (TYPE_GENERIC, FindIdentifier, 0),
    "wildcard" => (TYPE_GENERIC, None, 0),

    // Calls
    "method_invocation" => (COMPUTATION_CALL | 0x01, FindCallTarget, 0),
    "object_creation_expression" => (COMPUTATION_CALL | 0x02, FindIdentifier, 0),
    "explicit_constructor_invocation" => (COMPUTATION_CALL | 0x02, None, 0),
    "method_reference" => (COMPUTATION_ACCESS, None, 0),

    // Literals
    "decimal_integer_literal" => (LITERAL_NUMBER, None, 0),
    "hex_integer_literal" => (LITERAL_NUMBER, None, 0),
    "octal_integer_literal" => (LITERAL_NUMBER, None, 0),
    "binary_integer_literal" => (LITERAL_NUMBER, None, 0),
    "decimal_floating_point_literal" => (LITERAL_NUMBER | 0x01, None, 0),
    "string_literal" => (LITERAL_STRING, None, 0),
    "character_literal" => (LITERAL_STRING, None, 0),
    "text_block" => (LITERAL_STRING | 0x03, None, 0),
    "true" => (LITERAL_ATOMIC, None, IS_KEYWORD),
    "false" => (LITERAL_ATOMIC, None, IS_KEYWORD),
    "null_literal" => (LITERAL_ATOMIC, None, 0),
    "array_initializer" => (LITERAL_STRUCTURED | 0x01, None, 0),

    // Operators and expressions
    "binary_expression" => (OPERATOR_ARITHMETIC, None, 0),
    "unary_expression" => (OPERATOR_ARITHMETIC | 0x01, None, 0),
    "update_expression" => (OPERATOR_ARITHMETIC | 0x01, None, 0),
    "ternary_expression" => (FLOW_CONDITIONAL | 0x03, None, 0),
    "assignment_expression" => (OPERATOR_ASSIGNMENT, FindIdentifier, 0),
    "instanceof_expression" => (OPERATOR_COMPARISON | 0x02, None, 0),
    "cast_expression" => (COMPUTATION_EXPRESSION, None, 0),
    "parenthesized_expression" => (COMPUTATION_EXPRESSION, None, 0),
    "expression_statement" => (EXECUTION_STATEMENT, None, 0),

    // Flow control
    "if_statement" => (FLOW_CONDITIONAL, None, 0),
    "switch_expression" => (FLOW_CONDITIONAL | 0x01, None, 0),
    "switch_block" => (ORGANIZATION_BLOCK, None, 0),
    "switch_block_statement_group" => (PATTERN_MATCH, None, 0),
    "switch_rule" => (PATTERN_MATCH, None, 0),
    "switch_label" => (PATTERN_MATCH, None, 0),
    "for_statement" => (FLOW_LOOP, None, 0),
    "enhanced_for_statement" => (FLOW_LOOP | 0x01, None, 0),
    "while_statement" => (FLOW_LOOP | 0x02, None, 0),
    "do_statement" => (FLOW_LOOP | 0x02, None, 0),
    "return_statement" => (FLOW_JUMP, None, 0),
    "break_statement" => (FLOW_JUMP | 0x01, None, 0),
    "continue_statement" => (FLOW_JUMP | 0x02, None, 0),
    "yield_statement" => (FLOW_JUMP, None, 0),
    "synchronized_statement" => (FLOW_SYNC, None, 0),
    "labeled_statement" => (FLOW_JUMP | 0x03, FindIdentifier, 0),

    // Error handling
    "try_statement" => (ERROR_TRY, None, 0),
    "try_with_resources_statement" => (ERROR_TRY, None, 0),
    "catch_clause" => (ERROR_CATCH, None, 0),
    "catch_formal_parameter" => (DEFINITION_VARIABLE | 0x02, FindIdentifier, 0),
    "finally_clause" => (ERROR_FINALLY, None, 0),
    "throw_statement" => (ERROR_THROW, None, 0),
    "throws" => (ERROR_THROW, None, IS_DECLARATION_ONLY),

    // Imports
    "import_declaration" => (EXTERNAL_IMPORT, FindQualifiedIdentifier, 0),
    "asterisk" => (EXTERNAL_IMPORT | 0x02, None, 0),

    // Metadata
    "line_comment" => (METADATA_COMMENT, None, 0),
    "block_comment" => (METADATA_COMMENT, None, 0),
    "annotation" => (METADATA_ANNOTATION, FindIdentifier, 0),
    "marker_annotation" => (METADATA_ANNOTATION, FindIdentifier, 0),

    // Keywords
    "class" => (NAME_KEYWORD, None, IS_KEYWORD),
    "interface" => (NAME_KEYWORD, None, IS_KEYWORD),
    "enum" => (NAME_KEYWORD, None, IS_KEYWORD),
    "record" => (NAME_KEYWORD, None, IS_KEYWORD),
    "extends" => (NAME_KEYWORD, None, IS_KEYWORD),
    "implements" => (NAME_KEYWORD, None, IS_KEYWORD),
    "public" => (NAME_KEYWORD, None, IS_KEYWORD),
    "private" => (NAME_KEYWORD, None, IS_KEYWORD),
    "protected" => (NAME_KEYWORD, None, IS_KEYWORD),
    "static" => (NAME_KEYWORD, None, IS_KEYWORD),
    "final" => (NAME_KEYWORD, None, IS_KEYWORD),
    "abstract" => (NAME_KEYWORD, None, IS_KEYWORD),
    "native" => (NAME_KEYWORD, None, IS_KEYWORD),
    "transient" => (NAME_KEYWORD, None, IS_KEYWORD),
    "volatile" => (NAME_KEYWORD, None, IS_KEYWORD),
    "synchronized" => (NAME_KEYWORD, None, IS_KEYWORD),
    "if" => (NAME_KEYWORD, None, IS_KEYWORD),
    "else" => (NAME_KEYWORD, None, IS_KEYWORD),
    "switch" => (NAME_KEYWORD, None, IS_KEYWORD),
    "case" => (NAME_KEYWORD, None, IS_KEYWORD),
    "default" => (NAME_KEYWORD, None, IS_KEYWORD),
    "for" => (NAME_KEYWORD, None, IS_KEYWORD),
    "while" => (NAME_KEYWORD, None, IS_KEYWORD),
    "do" => (NAME_KEYWORD, None, IS_KEYWORD),
    "return" => (NAME_KEYWORD, None, IS_KEYWORD),
    "break" => (NAME_KEYWORD, None, IS_KEYWORD),
    "continue" => (NAME_KEYWORD, None, IS_KEYWORD),
    "new" => (NAME_KEYWORD, None, IS_KEYWORD),
    "try" => (NAME_KEYWORD, None, IS_KEYWORD),
    "catch" => (NAME_KEYWORD, None, IS_KEYWORD),
    "finally" => (NAME_KEYWORD, None, IS_KEYWORD),
    "throw" => (NAME_KEYWORD, None, IS_KEYWORD),
    "import" => (NAME_KEYWORD, None, IS_KEYWORD),
    "package" => (NAME_KEYWORD, None, IS_KEYWORD),
    "instanceof" => (NAME_KEYWORD, None, IS_KEYWORD),
    "void" => (NAME_KEYWORD, None, IS_KEYWORD),

    // Operator tokens
    "=" => (OPERATOR_ASSIGNMENT, None, 0),
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
    "->" => (PARSER_SYNTAX, None, 0),
    "::" => (PARSER_DELIMITER, None, 0),

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
    "@" => (PARSER_DELIMITER, None, 0),
};

pub struct JavaAdapter;

impl LanguageAdapter for JavaAdapter {
    fn language_name(&self) -> &'static str {
        "java"
    }

    fn ts_language(&self) -> tree_sitter::Language {
        tree_sitter_java::LANGUAGE.into()
    }

    fn node_configs(&self) -> &'static HashMap<&'static str, NodeConfig> {
        &NODE_CONFIGS
    }

    /// Public means an explicit `public` modifier on the declaration.
    fn is_public(&self, node: Node, source: &str, _name: &str) -> bool {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "modifiers" {
                return node_text(child, source).split_whitespace().any(|m| m == "public");
            }
        }
        false
    }
}
