//! TypeScript and TSX adapters.
//!
//! TypeScript's grammar is a superset of JavaScript's, so the table starts
//! from the JavaScript entries and layers the type-system vocabulary on top.
//! TSX shares the table and differs only in the grammar it loads.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::json;
use tree_sitter::Node;

use super::{
    flags::{IS_DECLARATION_ONLY, IS_KEYWORD, IS_KEYWORD_IF_LEAF},
    javascript, node_config_table, LanguageAdapter, NodeConfig,
};
use crate::extract::{first_identifier, node_text};
use crate::semantic::*;

static TS_ONLY: Lazy<HashMap<&'static str, NodeConfig>> = node_config_table! {
    // Type-level definitions
    "interface_declaration" => (DEFINITION_CLASS | 0x01, FindIdentifier, IS_DECLARATION_ONLY),
    "type_alias_declaration" => (DEFINITION_CLASS | 0x01, FindIdentifier, IS_DECLARATION_ONLY),
    "enum_declaration" => (DEFINITION_CLASS | 0x03, FindIdentifier, 0),
    "enum_body" => (ORGANIZATION_BLOCK, None, 0),
    "abstract_class_declaration" => (DEFINITION_CLASS | 0x01, FindIdentifier, 0),
    "internal_module" => (DEFINITION_MODULE, FindIdentifier, 0),
    "module" => (DEFINITION_MODULE, FindIdentifier, 0),
    "ambient_declaration" => (EXECUTION_DECLARATION, None, IS_DECLARATION_ONLY),
    "abstract_method_signature" => (DEFINITION_FUNCTION, FindProperty, IS_DECLARATION_ONLY),
    "method_signature" => (DEFINITION_FUNCTION, FindProperty, IS_DECLARATION_ONLY),
    "property_signature" => (DEFINITION_VARIABLE | 0x03, FindProperty, IS_DECLARATION_ONLY),
    "public_field_definition" => (DEFINITION_VARIABLE | 0x03, FindProperty, 0),
    "function_signature" => (DEFINITION_FUNCTION, FindIdentifier, IS_DECLARATION_ONLY),

    // Parameters
    "required_parameter" => (DEFINITION_VARIABLE | 0x02, FindIdentifier, 0),
    "optional_parameter" => (DEFINITION_VARIABLE | 0x02, FindIdentifier, 0),

    // Type expressions
    "type_identifier" => (NAME_IDENTIFIER | 0x02, FullText, 0),
    "predefined_type" => (TYPE_PRIMITIVE, FullText, 0),
    "type_annotation" => (TYPE_REFERENCE, None, 0),
    "generic_type" => (TYPE_GENERIC, FindIdentifier, 0),
    "type_arguments" => (ORGANIZATION_LIST, None, 0),
    "type_parameters" => (ORGANIZATION_LIST, None, 0),
    "type_parameter" => (TYPE_GENERIC, FindIdentifier, 0),
    "union_type" => (TYPE_COMPOSITE, None, 0),
    "intersection_type" => (TYPE_COMPOSITE, None, 0),
    "tuple_type" => (TYPE_COMPOSITE, None, 0),
    "array_type" => (TYPE_COMPOSITE, None, 0),
    "object_type" => (TYPE_COMPOSITE, None, 0),
    "function_type" => (TYPE_COMPOSITE, None, 0),
    "literal_type" => (TYPE_PRIMITIVE, None, 0),
    "lookup_type" => (TYPE_REFERENCE, None, 0),
    "index_signature" => (TYPE_COMPOSITE, None, 0),
    "as_expression" => (COMPUTATION_EXPRESSION, None, 0),
    "satisfies_expression" => (COMPUTATION_EXPRESSION, None, 0),
    "non_null_expression" => (COMPUTATION_EXPRESSION, None, 0),
    "implements_clause" => (ORGANIZATION_LIST, None, 0),
    "extends_clause" => (ORGANIZATION_LIST, None, 0),

    // Metadata
    "decorator" => (METADATA_ANNOTATION, FindIdentifier, 0),
    "accessibility_modifier" => (NAME_KEYWORD, FullText, IS_KEYWORD),
    "override_modifier" => (NAME_KEYWORD, None, IS_KEYWORD),

    // Keywords
    "interface" => (NAME_KEYWORD, None, IS_KEYWORD),
    "type" => (NAME_KEYWORD, None, IS_KEYWORD_IF_LEAF),
    "enum" => (NAME_KEYWORD, None, IS_KEYWORD),
    "namespace" => (NAME_KEYWORD, None, IS_KEYWORD),
    "declare" => (NAME_KEYWORD, None, IS_KEYWORD),
    "abstract" => (NAME_KEYWORD, None, IS_KEYWORD),
    "readonly" => (NAME_KEYWORD, None, IS_KEYWORD),
    "implements" => (NAME_KEYWORD, None, IS_KEYWORD),
    "extends" => (NAME_KEYWORD, None, IS_KEYWORD),
    "keyof" => (NAME_KEYWORD, None, IS_KEYWORD),
    "infer" => (NAME_KEYWORD, None, IS_KEYWORD),
    "as" => (NAME_KEYWORD, None, IS_KEYWORD),
    "satisfies" => (NAME_KEYWORD, None, IS_KEYWORD),
};

static NODE_CONFIGS: Lazy<HashMap<&'static str, NodeConfig>> = Lazy::new(|| {
    let mut map = javascript::NODE_CONFIGS.clone();
    map.extend(TS_ONLY.iter().map(|(k, v)| (*k, *v)));
    map
});

fn typescript_native_context(node: Node, source: &str) -> Option<serde_json::Value> {
    if !matches!(
        node.kind(),
        "function_declaration" | "method_definition" | "arrow_function" | "function_signature"
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
    let return_type = node
        .child_by_field_name("return_type")
        .map(|rt| node_text(rt, source).trim_start_matches(':').trim().to_string());
    Some(json!({
        "parameters": names,
        "return_type": return_type,
    }))
}

pub struct TypeScriptAdapter;

impl LanguageAdapter for TypeScriptAdapter {
    fn language_name(&self) -> &'static str {
        "typescript"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["ts"]
    }

    fn ts_language(&self) -> tree_sitter::Language {
        tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
    }

    fn node_configs(&self) -> &'static HashMap<&'static str, NodeConfig> {
        &NODE_CONFIGS
    }

    fn is_public(&self, node: Node, source: &str, name: &str) -> bool {
        if name.starts_with('#') {
            return false;
        }
        // An explicit `private`/`protected` modifier wins over convention.
        let text = node_text(node, source);
        let head = text.lines().next().unwrap_or_default();
        !(head.contains("private ") || head.contains("protected "))
    }

    fn native_context(&self, node: Node, source: &str) -> Option<serde_json::Value> {
        typescript_native_context(node, source)
    }
}

pub struct TsxAdapter;

impl LanguageAdapter for TsxAdapter {
    fn language_name(&self) -> &'static str {
        "tsx"
    }

    fn ts_language(&self) -> tree_sitter::Language {
        tree_sitter_typescript::LANGUAGE_TSX.into()
    }

    fn node_configs(&self) -> &'static HashMap<&'static str, NodeConfig> {
        &NODE_CONFIGS
    }

    fn is_public(&self, node: Node, source: &str, name: &str) -> bool {
        TypeScriptAdapter.is_public(node, source, name)
    }

    fn native_context(&self, node: Node, source: &str) -> Option<serde_json::Value> {
        typescript_native_context(node, source)
    }
}
