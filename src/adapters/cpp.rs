//! C++ adapter.
//!
//! The C++ grammar is built on the C grammar, so the table starts from the C
//! entries and layers classes, templates, namespaces, and exceptions on top.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tree_sitter::Node;

use super::{
    c,
    flags::{IS_DECLARATION_ONLY, IS_KEYWORD, IS_UNSAFE},
    node_config_table, LanguageAdapter, NodeConfig,
};
use crate::extract::node_text;
use crate::semantic::*;

static CPP_ONLY: Lazy<HashMap<&'static str, NodeConfig>> = node_config_table! {
    // Classes and members
    "class_specifier" => (DEFINITION_CLASS, FindIdentifier, 0),
    "access_specifier" => (NAME_KEYWORD, FullText, IS_KEYWORD),
    "base_class_clause" => (ORGANIZATION_LIST, None, 0),
    "friend_declaration" => (EXECUTION_DECLARATION, None, IS_DECLARATION_ONLY),
    "destructor_name" => (NAME_IDENTIFIER | 0x01, FullText, 0),
    "operator_name" => (NAME_IDENTIFIER | 0x01, FullText, 0),
    "field_initializer_list" => (ORGANIZATION_LIST, None, 0),
    "field_initializer" => (EXECUTION_MUTATION, FindIdentifier, 0),

    // Namespaces and templates
    "namespace_definition" => (DEFINITION_MODULE, FindIdentifier, 0),
    "namespace_identifier" => (NAME_IDENTIFIER, FullText, 0),
    "using_declaration" => (EXTERNAL_IMPORT, FindQualifiedIdentifier, 0),
    "qualified_identifier" => (NAME_QUALIFIED, FindQualifiedIdentifier, 0),
    "template_declaration" => (DEFINITION_CLASS | 0x02, FindInDeclarator, 0),
    "template_parameter_list" => (ORGANIZATION_LIST, None, 0),
    "template_type" => (TYPE_GENERIC, FindIdentifier, 0),
    "template_function" => (COMPUTATION_CALL, FindIdentifier, 0),
    "template_argument_list" => (ORGANIZATION_LIST, None, 0),
    "type_parameter_declaration" => (TYPE_GENERIC, FindIdentifier, 0),

    // Expressions
    "lambda_expression" => (COMPUTATION_LAMBDA, FindAssignmentTarget, 0),
    "lambda_capture_specifier" => (ORGANIZATION_LIST, None, 0),
    "new_expression" => (COMPUTATION_CALL | 0x02, FindIdentifier, IS_UNSAFE),
    "delete_expression" => (EXECUTION_MUTATION, None, IS_UNSAFE),
    "reference_declarator" => (TYPE_REFERENCE, FindInDeclarator, 0),
    "co_await_expression" => (FLOW_SYNC, None, 0),
    "co_return_statement" => (FLOW_JUMP, None, 0),
    "co_yield_statement" => (FLOW_SYNC, None, 0),
    "fold_expression" => (COMPUTATION_EXPRESSION, None, 0),
    "for_range_loop" => (FLOW_LOOP | 0x01, None, 0),
    "condition_clause" => (PATTERN_GUARD, None, 0),

    // Exceptions
    "try_statement" => (ERROR_TRY, None, 0),
    "catch_clause" => (ERROR_CATCH, None, 0),
    "throw_statement" => (ERROR_THROW, None, 0),

    // Literals
    "raw_string_literal" => (LITERAL_STRING | 0x03, None, 0),
    "nullptr" => (LITERAL_ATOMIC, None, IS_KEYWORD),
    "user_defined_literal" => (LITERAL_NUMBER, None, 0),

    // Keywords
    "class" => (NAME_KEYWORD, None, IS_KEYWORD),
    "namespace" => (NAME_KEYWORD, None, IS_KEYWORD),
    "template" => (NAME_KEYWORD, None, IS_KEYWORD),
    "typename" => (NAME_KEYWORD, None, IS_KEYWORD),
    "using" => (NAME_KEYWORD, None, IS_KEYWORD),
    "public" => (NAME_KEYWORD, None, IS_KEYWORD),
    "private" => (NAME_KEYWORD, None, IS_KEYWORD),
    "protected" => (NAME_KEYWORD, None, IS_KEYWORD),
    "virtual" => (NAME_KEYWORD, None, IS_KEYWORD),
    "override" => (NAME_KEYWORD, None, IS_KEYWORD),
    "final" => (NAME_KEYWORD, None, IS_KEYWORD),
    "new" => (NAME_KEYWORD, None, IS_KEYWORD),
    "delete" => (NAME_KEYWORD, None, IS_KEYWORD),
    "try" => (NAME_KEYWORD, None, IS_KEYWORD),
    "catch" => (NAME_KEYWORD, None, IS_KEYWORD),
    "throw" => (NAME_KEYWORD, None, IS_KEYWORD),
    "constexpr" => (NAME_KEYWORD, None, IS_KEYWORD),
    "noexcept" => (NAME_KEYWORD, None, IS_KEYWORD),
    "operator" => (NAME_KEYWORD, None, IS_KEYWORD),
    "this" => (NAME_SCOPED, None, IS_KEYWORD),
    "::" => (PARSER_DELIMITER, None, 0),
};

static NODE_CONFIGS: Lazy<HashMap<&'static str, NodeConfig>> = Lazy::new(|| {
    let mut map = c::NODE_CONFIGS.clone();
    map.extend(CPP_ONLY.iter().map(|(k, v)| (*k, *v)));
    map
});

pub struct CppAdapter;

impl LanguageAdapter for CppAdapter {
    fn language_name(&self) -> &'static str {
        "cpp"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["c++", "cxx"]
    }

    fn ts_language(&self) -> tree_sitter::Language {
        tree_sitter_cpp::LANGUAGE.into()
    }

    fn node_configs(&self) -> &'static HashMap<&'static str, NodeConfig> {
        &NODE_CONFIGS
    }

    fn custom_name(&self, raw_type: &str, node: Node, source: &str) -> Option<String> {
        if raw_type != "preproc_include" {
            return None;
        }
        c::include_path_name(node, source)
    }

    /// Member visibility follows the nearest preceding access specifier;
    /// class members default to private, struct members to public.
    fn is_public(&self, node: Node, source: &str, _name: &str) -> bool {
        let mut current = node;
        while let Some(parent) = current.parent() {
            if parent.kind() == "field_declaration_list" {
                let mut access: Option<&str> = None;
                let mut cursor = parent.walk();
                for sibling in parent.children(&mut cursor) {
                    if sibling.id() == current.id() {
                        break;
                    }
                    if sibling.kind() == "access_specifier" {
                        access = Some(match node_text(sibling, source).trim_end_matches(':') {
                            "public" => "public",
                            "protected" => "protected",
                            _ => "private",
                        });
                    }
                }
                return match access {
                    Some(spec) => spec == "public",
                    // No specifier seen: struct bodies default public.
                    None => parent
                        .parent()
                        .is_some_and(|container| container.kind() == "struct_specifier"),
                };
            }
            current = parent;
        }
        // Free functions and namespace-scope declarations are reachable.
        true
    }
}
