//! Rust adapter - raw node-type classification for the rust grammar.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::json;
use tree_sitter::Node;

use super::{
    flags::{IS_KEYWORD, IS_UNSAFE},
    node_config_table, LanguageAdapter, NodeConfig,
};
use crate::extract::{first_identifier, node_text};
use crate::semantic::*;

static NODE_CONFIGS: Lazy<HashMap<&'static str, NodeConfig>> = node_config_table! {
    // Structure
    "source_file" => (ORGANIZATION_CONTAINER, None, 0),
    "block" => (ORGANIZATION_BLOCK, None, 0),
    "declaration_list" => (ORGANIZATION_BLOCK, None, 0),
    "field_declaration_list" => (ORGANIZATION_BLOCK, None, 0),
    "enum_variant_list" => (ORGANIZATION_BLOCK, None, 0),
    "parameters" => (ORGANIZATION_LIST, None, 0),
    "arguments" => (ORGANIZATION_LIST, None, 0),
    "type_parameters" => (ORGANIZATION_LIST, None, 0),
    "type_arguments" => (ORGANIZATION_LIST, None, 0),
    "where_clause" => (PATTERN_GUARD, None, 0),

    // Definitions
    "function_item" => (DEFINITION_FUNCTION, FindIdentifier, 0),
    "function_signature_item" => (DEFINITION_FUNCTION, FindIdentifier, 0),
    "struct_item" => (DEFINITION_CLASS, FindIdentifier, 0),
    "enum_item" => (DEFINITION_CLASS | 0x03, FindIdentifier, 0),
    "union_item" => (DEFINITION_CLASS, FindIdentifier, 0),
    "trait_item" => (DEFINITION_CLASS | 0x01, FindIdentifier, 0),
    "impl_item" => (DEFINITION_CLASS, Custom, 0),
    "mod_item" => (DEFINITION_MODULE, FindIdentifier, 0),
    "type_item" => (DEFINITION_CLASS | 0x01, FindIdentifier, 0),
    "const_item" => (DEFINITION_VARIABLE | 0x01, FindIdentifier, 0),
    "static_item" => (DEFINITION_VARIABLE | 0x01, FindIdentifier, 0),
    "let_declaration" => (DEFINITION_VARIABLE, FindIdentifier, 0),
    "parameter" => (DEFINITION_VARIABLE | 0x02, FindIdentifier, 0),
    "field_declaration" => (DEFINITION_VARIABLE | 0x03, FindIdentifier, 0),
    "enum_variant" => (DEFINITION_VARIABLE | 0x01, FindIdentifier, 0),
    "macro_definition" => (DEFINITION_FUNCTION, FindIdentifier, 0),
    "closure_expression" => (COMPUTATION_LAMBDA, FindAssignmentTarget, 0),
    "closure_parameters" => (ORGANIZATION_LIST, None, 0),

    // Names
    "identifier" => (NAME_IDENTIFIER, FullText, 0),
    "field_identifier" => (NAME_IDENTIFIER, FullText, 0),
    "type_identifier" => (NAME_IDENTIFIER | 0x02, FullText, 0),
    "scoped_identifier" => (NAME_QUALIFIED, FindQualifiedIdentifier, 0),
    "scoped_type_identifier" => (NAME_QUALIFIED, FindQualifiedIdentifier, 0),
    "self" => (NAME_SCOPED, None, IS_KEYWORD),
    "crate" => (NAME_SCOPED, None, IS_KEYWORD),
    "super" => (NAME_SCOPED, None, IS_KEYWORD),
    "lifetime" => (NAME_IDENTIFIER | 0x03, FullText, 0),
    "loop_label" => (NAME_IDENTIFIER | 0x03, FullText, 0),

    // Types
    "primitive_type" => (TYPE_PRIMITIVE, FullText, 0),
    "reference_type" => (TYPE_REFERENCE, None, 0),
    "pointer_type" => (TYPE_REFERENCE, None, IS_UNSAFE),
    "generic_type" => (TYPE_GENERIC, FindIdentifier, 0),
    "tuple_type" => (TYPE_COMPOSITE, None, 0),
    "array_type" => (TYPE_COMPOSITE, None, 0),
    "unit_type" => (TYPE_PRIMITIVE, None, 0),
    "dynamic_type" => (TYPE_REFERENCE, None, 0),
    "abstract_type" => (TYPE_REFERENCE, None, 0),
    "function_type" => (TYPE_COMPOSITE, None, 0),

    // Calls and access
    "call_expression" => (COMPUTATION_CALL, FindCallTarget, 0),
    "macro_invocation" => (COMPUTATION_CALL | 0x03, FindIdentifier, 0),
    "field_expression" => (COMPUTATION_ACCESS, FindQualifiedIdentifier, 0),
    "index_expression" => (COMPUTATION_ACCESS, None, 0),
    "await_expression" => (FLOW_SYNC, None, 0),

    // Literals
    "integer_literal" => (LITERAL_NUMBER, None, 0),
    "float_literal" => (LITERAL_NUMBER | 0x01, None, 0),
    "string_literal" => (LITERAL_STRING, None, 0),
    "raw_string_literal" => (LITERAL_STRING | 0x03, None, 0),
    "char_literal" => (LITERAL_STRING, None, 0),
    "boolean_literal" => (LITERAL_ATOMIC, None, 0),
    "array_expression" => (LITERAL_STRUCTURED | 0x01, None, 0),
    "tuple_expression" => (LITERAL_STRUCTURED | 0x01, None, 0),
    "struct_expression" => (LITERAL_STRUCTURED | 0x02, FindIdentifier, 0),

    // Patterns
    "match_pattern" => (PATTERN_MATCH, None, 0),
    "tuple_pattern" => (PATTERN_DESTRUCTURE, None, 0),
    "struct_pattern" => (PATTERN_DESTRUCTURE, None, 0),
    "slice_pattern" => (PATTERN_DESTRUCTURE, None, 0),
    "or_pattern" => (PATTERN_MATCH, None, 0),
    "captured_pattern" => (PATTERN_DESTRUCTURE, None, 0),

    // Operators and expressions
    "binary_expression" => (OPERATOR_ARITHMETIC, None, 0),
    "unary_expression" => (OPERATOR_ARITHMETIC | 0x01, None, 0),
    "reference_expression" => (COMPUTATION_EXPRESSION, None, 0),
    "assignment_expression" => (OPERATOR_ASSIGNMENT, FindIdentifier, 0),
    "compound_assignment_expr" => (OPERATOR_ASSIGNMENT | 0x01, FindIdentifier, 0),
    "range_expression" => (OPERATOR_ARITHMETIC | 0x03, None, 0),
    "expression_statement" => (EXECUTION_STATEMENT, None, 0),
    "parenthesized_expression" => (COMPUTATION_EXPRESSION, None, 0),
    "type_cast_expression" => (COMPUTATION_EXPRESSION, None, 0),
    "try_expression" => (ERROR_THROW, None, 0),
    "unsafe_block" => (ORGANIZATION_BLOCK, None, IS_UNSAFE),
    "async_block" => (FLOW_SYNC, None, 0),

    // Flow control
    "if_expression" => (FLOW_CONDITIONAL, None, 0),
    "else_clause" => (FLOW_CONDITIONAL, None, 0),
    "if_let_expression" => (FLOW_CONDITIONAL, None, 0),
    "match_expression" => (FLOW_CONDITIONAL | 0x01, None, 0),
    "match_arm" => (PATTERN_MATCH, None, 0),
    "match_block" => (ORGANIZATION_BLOCK, None, 0),
    "for_expression" => (FLOW_LOOP | 0x01, None, 0),
    "while_expression" => (FLOW_LOOP | 0x02, None, 0),
    "while_let_expression" => (FLOW_LOOP | 0x02, None, 0),
    "loop_expression" => (FLOW_LOOP | 0x03, None, 0),
    "return_expression" => (FLOW_JUMP, None, 0),
    "break_expression" => (FLOW_JUMP | 0x01, None, 0),
    "continue_expression" => (FLOW_JUMP | 0x02, None, 0),

    // Imports and visibility
    "use_declaration" => (EXTERNAL_IMPORT, FindQualifiedIdentifier, 0),
    "use_wildcard" => (EXTERNAL_IMPORT | 0x02, None, 0),
    "use_as_clause" => (EXTERNAL_IMPORT, FindIdentifier, 0),
    "use_list" => (ORGANIZATION_LIST, None, 0),
    "scoped_use_list" => (EXTERNAL_IMPORT | 0x01, None, 0),
    "extern_crate_declaration" => (EXTERNAL_IMPORT, FindIdentifier, 0),
    "foreign_mod_item" => (EXTERNAL_FOREIGN, None, IS_UNSAFE),
    "visibility_modifier" => (NAME_KEYWORD, FullText, IS_KEYWORD),

    // Metadata
    "line_comment" => (METADATA_COMMENT, None, 0),
    "block_comment" => (METADATA_COMMENT, None, 0),
    "attribute_item" => (METADATA_ANNOTATION, None, 0),
    "inner_attribute_item" => (METADATA_ANNOTATION, None, 0),
    "attribute" => (METADATA_ANNOTATION, FindIdentifier, 0),

    // Keywords
    "fn" => (NAME_KEYWORD, None, IS_KEYWORD),
    "struct" => (NAME_KEYWORD, None, IS_KEYWORD),
    "enum" => (NAME_KEYWORD, None, IS_KEYWORD),
    "trait" => (NAME_KEYWORD, None, IS_KEYWORD),
    "impl" => (NAME_KEYWORD, None, IS_KEYWORD),
    "mod" => (NAME_KEYWORD, None, IS_KEYWORD),
    "use" => (NAME_KEYWORD, None, IS_KEYWORD),
    "let" => (NAME_KEYWORD, None, IS_KEYWORD),
    "const" => (NAME_KEYWORD, None, IS_KEYWORD),
    "static" => (NAME_KEYWORD, None, IS_KEYWORD),
    "mut" => (NAME_KEYWORD, None, IS_KEYWORD),
    "if" => (NAME_KEYWORD, None, IS_KEYWORD),
    "else" => (NAME_KEYWORD, None, IS_KEYWORD),
    "match" => (NAME_KEYWORD, None, IS_KEYWORD),
    "for" => (NAME_KEYWORD, None, IS_KEYWORD),
    "while" => (NAME_KEYWORD, None, IS_KEYWORD),
    "loop" => (NAME_KEYWORD, None, IS_KEYWORD),
    "in" => (NAME_KEYWORD, None, IS_KEYWORD),
    "return" => (NAME_KEYWORD, None, IS_KEYWORD),
    "break" => (NAME_KEYWORD, None, IS_KEYWORD),
    "continue" => (NAME_KEYWORD, None, IS_KEYWORD),
    "async" => (NAME_KEYWORD, None, IS_KEYWORD),
    "await" => (NAME_KEYWORD, None, IS_KEYWORD),
    "unsafe" => (NAME_KEYWORD, None, IS_KEYWORD | IS_UNSAFE),
    "pub" => (NAME_KEYWORD, None, IS_KEYWORD),
    "where" => (NAME_KEYWORD, None, IS_KEYWORD),
    "dyn" => (NAME_KEYWORD, None, IS_KEYWORD),
    "ref" => (NAME_KEYWORD, None, IS_KEYWORD),
    "move" => (NAME_KEYWORD, None, IS_KEYWORD),
    "type" => (NAME_KEYWORD, None, IS_KEYWORD),
    "extern" => (NAME_KEYWORD, None, IS_KEYWORD),

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
    "&" => (OPERATOR_ARITHMETIC | 0x02, None, 0),
    "|" => (OPERATOR_ARITHMETIC | 0x02, None, 0),
    "^" => (OPERATOR_ARITHMETIC | 0x02, None, 0),
    "<<" => (OPERATOR_ARITHMETIC | 0x02, None, 0),
    ">>" => (OPERATOR_ARITHMETIC | 0x02, None, 0),
    ".." => (OPERATOR_ARITHMETIC | 0x03, None, 0),
    "..=" => (OPERATOR_ARITHMETIC | 0x03, None, 0),
    "=>" => (PARSER_SYNTAX, None, 0),
    "->" => (PARSER_SYNTAX, None, 0),
    "?" => (PARSER_SYNTAX, None, 0),

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
    "::" => (PARSER_DELIMITER, None, 0),
    "." => (PARSER_DELIMITER, None, 0),
    "#" => (PARSER_DELIMITER, None, 0),
};

pub struct RustAdapter;

impl LanguageAdapter for RustAdapter {
    fn language_name(&self) -> &'static str {
        "rust"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["rs"]
    }

    fn ts_language(&self) -> tree_sitter::Language {
        tree_sitter_rust::LANGUAGE.into()
    }

    fn node_configs(&self) -> &'static HashMap<&'static str, NodeConfig> {
        &NODE_CONFIGS
    }

    /// Impl blocks are named after the implemented type (and trait when
    /// present): `impl Display for Point` yields `Point`.
    fn custom_name(&self, raw_type: &str, node: Node, source: &str) -> Option<String> {
        if raw_type != "impl_item" {
            return None;
        }
        let target = node.child_by_field_name("type")?;
        first_identifier(target, source)
    }

    /// Visibility is explicit: a `pub` modifier child makes the item public.
    fn is_public(&self, node: Node, _source: &str, _name: &str) -> bool {
        let mut cursor = node.walk();
        let result = node.children(&mut cursor)
            .any(|child| child.kind() == "visibility_modifier");
        result
    }

    fn native_context(&self, node: Node, source: &str) -> Option<serde_json::Value> {
        if node.kind() != "function_item" {
            return None;
        }
        let params = node.child_by_field_name("parameters")?;
        let mut names = Vec::new();
        let mut cursor = params.walk();
        for child in params.named_children(&mut cursor) {
            match child.kind() {
                "self_parameter" => names.push("self".to_string()),
                _ => {
                    if let Some(name) = first_identifier(child, source) {
                        names.push(name);
                    }
                }
            }
        }
        let return_type = node
            .child_by_field_name("return_type")
            .map(|rt| node_text(rt, source).to_string());
        let mut modifiers: Vec<&str> = Vec::new();
        let head = node_text(node, source);
        let head = head.lines().next().unwrap_or_default();
        for modifier in ["pub", "async", "unsafe", "const", "extern"] {
            if head.split_whitespace().any(|word| word == modifier) {
                modifiers.push(modifier);
            }
        }
        Some(json!({
            "parameters": names,
            "return_type": return_type,
            "modifiers": modifiers,
        }))
    }
}
