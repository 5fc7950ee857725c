//! C adapter - raw node-type classification for the c grammar.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tree_sitter::Node;

use super::{
    flags::{IS_DECLARATION_ONLY, IS_KEYWORD, IS_UNSAFE},
    node_config_table, LanguageAdapter, NodeConfig,
};
use crate::semantic::*;

pub(super) static NODE_CONFIGS: Lazy<HashMap<&'static str, NodeConfig>> = node_config_table! {
    // Structure
    "translation_unit" => (ORGANIZATION_CONTAINER, None, 0),
    "compound_statement" => (ORGANIZATION_BLOCK, None, 0),
    "parameter_list" => (ORGANIZATION_LIST, None, 0),
    "argument_list" => (ORGANIZATION_LIST, None, 0),
    "field_declaration_list" => (ORGANIZATION_BLOCK, None, 0),
    "enumerator_list" => (ORGANIZATION_BLOCK, None, 0),
    "initializer_list" => (LITERAL_STRUCTURED | 0x01, None, 0),

    // Definitions and declarations
    "function_definition" => (DEFINITION_FUNCTION, FindInDeclarator, 0),
    "declaration" => (EXECUTION_DECLARATION, FindInDeclarator, 0),
    "struct_specifier" => (DEFINITION_CLASS, FindIdentifier, 0),
    "union_specifier" => (DEFINITION_CLASS, FindIdentifier, 0),
    "enum_specifier" => (DEFINITION_CLASS | 0x03, FindIdentifier, 0),
    "enumerator" => (DEFINITION_VARIABLE | 0x01, FindIdentifier, 0),
    "type_definition" => (DEFINITION_CLASS | 0x01, FindIdentifier, 0),
    "field_declaration" => (DEFINITION_VARIABLE | 0x03, FindInDeclarator, 0),
    "parameter_declaration" => (DEFINITION_VARIABLE | 0x02, FindInDeclarator, 0),
    "function_declarator" => (DEFINITION_FUNCTION, FindInDeclarator, IS_DECLARATION_ONLY),
    "init_declarator" => (DEFINITION_VARIABLE, FindInDeclarator, 0),
    "pointer_declarator" => (TYPE_REFERENCE, FindInDeclarator, IS_UNSAFE),
    "array_declarator" => (TYPE_COMPOSITE, FindInDeclarator, 0),

    // Names
    "identifier" => (NAME_IDENTIFIER, FullText, 0),
    "field_identifier" => (NAME_IDENTIFIER, FullText, 0),
    "type_identifier" => (NAME_IDENTIFIER | 0x02, FullText, 0),
    "statement_identifier" => (NAME_IDENTIFIER | 0x03, FullText, 0),
    "field_expression" => (COMPUTATION_ACCESS, FindQualifiedIdentifier, 0),
    "subscript_expression" => (COMPUTATION_ACCESS, None, 0),

    // Types
    "primitive_type" => (TYPE_PRIMITIVE, FullText, 0),
    "sized_type_specifier" => (TYPE_PRIMITIVE, FullText, 0),
    "storage_class_specifier" => (NAME_KEYWORD, FullText, IS_KEYWORD),
    "type_qualifier" => (NAME_KEYWORD, FullText, IS_KEYWORD),

    // Calls
    "call_expression" => (COMPUTATION_CALL, FindCallTarget, 0),

    // Literals
    "number_literal" => (LITERAL_NUMBER, None, 0),
    "string_literal" => (LITERAL_STRING, None, 0),
    "string_content" => (LITERAL_STRING, None, 0),
    "char_literal" => (LITERAL_STRING, None, 0),
    "concatenated_string" => (LITERAL_STRING, None, 0),
    "true" => (LITERAL_ATOMIC, None, IS_KEYWORD),
    "false" => (LITERAL_ATOMIC, None, IS_KEYWORD),
    "null" => (LITERAL_ATOMIC, None, IS_KEYWORD),

    // Operators and expressions
    "binary_expression" => (OPERATOR_ARITHMETIC, None, 0),
    "unary_expression" => (OPERATOR_ARITHMETIC | 0x01, None, 0),
    "update_expression" => (OPERATOR_ARITHMETIC | 0x01, None, 0),
    "conditional_expression" => (FLOW_CONDITIONAL | 0x03, None, 0),
    "assignment_expression" => (OPERATOR_ASSIGNMENT, FindIdentifier, 0),
    "pointer_expression" => (COMPUTATION_EXPRESSION, None, IS_UNSAFE),
    "cast_expression" => (COMPUTATION_EXPRESSION, None, 0),
    "sizeof_expression" => (COMPUTATION_EXPRESSION, None, 0),
    "parenthesized_expression" => (COMPUTATION_EXPRESSION, None, 0),
    "comma_expression" => (COMPUTATION_EXPRESSION, None, 0),
    "expression_statement" => (EXECUTION_STATEMENT, None, 0),

    // Flow control
    "if_statement" => (FLOW_CONDITIONAL, None, 0),
    "else_clause" => (FLOW_CONDITIONAL, None, 0),
    "switch_statement" => (FLOW_CONDITIONAL | 0x01, None, 0),
    "case_statement" => (PATTERN_MATCH, None, 0),
    "for_statement" => (FLOW_LOOP, None, 0),
    "while_statement" => (FLOW_LOOP | 0x02, None, 0),
    "do_statement" => (FLOW_LOOP | 0x02, None, 0),
    "return_statement" => (FLOW_JUMP, None, 0),
    "break_statement" => (FLOW_JUMP | 0x01, None, 0),
    "continue_statement" => (FLOW_JUMP | 0x02, None, 0),
    "goto_statement" => (FLOW_JUMP | 0x03, FindIdentifier, 0),
    "labeled_statement" => (FLOW_JUMP | 0x03, FindIdentifier, 0),

    // Preprocessor
    "preproc_include" => (EXTERNAL_IMPORT, Custom, 0),
    "preproc_def" => (METADATA_DIRECTIVE, FindIdentifier, 0),
    "preproc_function_def" => (METADATA_DIRECTIVE, FindIdentifier, 0),
    "preproc_ifdef" => (METADATA_DIRECTIVE, FindIdentifier, 0),
    "preproc_if" => (METADATA_DIRECTIVE, None, 0),
    "preproc_else" => (METADATA_DIRECTIVE, None, 0),
    "preproc_arg" => (METADATA_DIRECTIVE, None, 0),
    "preproc_call" => (METADATA_DIRECTIVE, FindIdentifier, 0),
    "system_lib_string" => (LITERAL_STRING, FullText, 0),

    // Metadata
    "comment" => (METADATA_COMMENT, None, 0),

    // Keywords
    "struct" => (NAME_KEYWORD, None, IS_KEYWORD),
    "union" => (NAME_KEYWORD, None, IS_KEYWORD),
    "enum" => (NAME_KEYWORD, None, IS_KEYWORD),
    "typedef" => (NAME_KEYWORD, None, IS_KEYWORD),
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
    "goto" => (NAME_KEYWORD, None, IS_KEYWORD),
    "sizeof" => (NAME_KEYWORD, None, IS_KEYWORD),

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
    "++" => (OPERATOR_ARITHMETIC | 0x01, None, 0),
    "--" => (OPERATOR_ARITHMETIC | 0x01, None, 0),
    "&&" => (OPERATOR_LOGICAL, None, 0),
    "||" => (OPERATOR_LOGICAL, None, 0),
    "!" => (OPERATOR_LOGICAL, None, 0),
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
    ";" => (PARSER_DELIMITER, None, 0),
    "." => (PARSER_DELIMITER, None, 0),
    "->" => (PARSER_DELIMITER, None, 0),
    "#include" => (NAME_KEYWORD, None, IS_KEYWORD),
    "#define" => (NAME_KEYWORD, None, IS_KEYWORD),
};

/// Shared CUSTOM hook for `preproc_include`: the include path is the header
/// name, angle brackets or quotes stripped.
pub(super) fn include_path_name(node: Node, source: &str) -> Option<String> {
    let path = node.child_by_field_name("path")?;
    let text = crate::extract::node_text(path, source);
    Some(
        text.trim_matches(|c| c == '"' || c == '<' || c == '>')
            .to_string(),
    )
}

pub struct CAdapter;

impl LanguageAdapter for CAdapter {
    fn language_name(&self) -> &'static str {
        "c"
    }

    fn ts_language(&self) -> tree_sitter::Language {
        tree_sitter_c::LANGUAGE.into()
    }

    fn node_configs(&self) -> &'static HashMap<&'static str, NodeConfig> {
        &NODE_CONFIGS
    }

    fn custom_name(&self, raw_type: &str, node: Node, source: &str) -> Option<String> {
        if raw_type != "preproc_include" {
            return None;
        }
        include_path_name(node, source)
    }

    /// C has no visibility model; `static` narrows linkage to the unit.
    fn is_public(&self, node: Node, source: &str, _name: &str) -> bool {
        !crate::extract::node_text(node, source).starts_with("static ")
    }
}
