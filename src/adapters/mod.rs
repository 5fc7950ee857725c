//! Per-language adapters - the node configuration registry.
//!
//! Each adapter is a config-data table mapping the grammar's raw node-type
//! strings to a classification plus extraction directives, with at most a
//! small CUSTOM hook for names the generic strategies cannot reach. Tables
//! are immutable after load and safe for concurrent lookups without locking.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tree_sitter::Node;

use crate::error::{Result, TreetabError};

pub mod bash;
pub mod c;
pub mod cpp;
pub mod go;
pub mod java;
pub mod javascript;
pub mod json;
pub mod python;
pub mod ruby;
pub mod rust;
pub mod typescript;
pub mod yaml;

/// Universal flags - orthogonal node properties.
pub mod flags {
    /// Reserved language keyword.
    pub const IS_KEYWORD: u8 = 0x01;
    /// Externally visible (public, exported, capitalized, ...).
    pub const IS_PUBLIC: u8 = 0x02;
    /// Declares without a body (prototypes, extern, abstract members).
    pub const IS_DECLARATION_ONLY: u8 = 0x04;
    /// Unsafe operation (Rust `unsafe`, raw pointer arithmetic).
    pub const IS_UNSAFE: u8 = 0x08;
    /// Becomes `IS_KEYWORD` during flattening iff the node is a leaf.
    /// Used for raw types a grammar emits both as bare keywords and as
    /// named constructs.
    pub const IS_KEYWORD_IF_LEAF: u8 = 0x10;
}

/// How a node's display name is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// No name.
    None,
    /// The node's own verbatim span text.
    FullText,
    /// Text of the first child.
    FirstChild,
    /// First child of an identifier-like raw type.
    FindIdentifier,
    /// First child of type `property_identifier`.
    FindProperty,
    /// Identifier on the left of the enclosing assignment/declarator.
    FindAssignmentTarget,
    /// Tail identifier of a qualified/scoped name.
    FindQualifiedIdentifier,
    /// Identifier nested inside declarator nodes (C-family).
    FindInDeclarator,
    /// Callee name of a call, through member/attribute access.
    FindCallTarget,
    /// Delegate to the adapter's callback keyed by raw type.
    Custom,
}

/// Classification plus extraction directives for one raw node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeConfig {
    pub semantic_type: u8,
    pub name_strategy: ExtractionStrategy,
    pub flags: u8,
}

impl NodeConfig {
    pub const fn new(semantic_type: u8, name_strategy: ExtractionStrategy, flags: u8) -> Self {
        Self {
            semantic_type,
            name_strategy,
            flags,
        }
    }
}

/// Build a static raw-type table. Entries are
/// `"raw_type" => (semantic_type, NameStrategy, flags)`.
macro_rules! node_config_table {
    ($( $raw:literal => ($sem:expr, $strategy:ident, $flags:expr) ),* $(,)?) => {
        once_cell::sync::Lazy::new(|| {
            std::collections::HashMap::from([
                $((
                    $raw,
                    $crate::adapters::NodeConfig::new(
                        $sem,
                        $crate::adapters::ExtractionStrategy::$strategy,
                        $flags,
                    ),
                )),*
            ])
        })
    };
}
pub(crate) use node_config_table;

/// A language adapter: grammar wiring plus the raw-type table.
///
/// Adapters are stateless; parser instances are created fresh per
/// invocation by the callers (see [`fresh_parser`]), never shared.
pub trait LanguageAdapter: Send + Sync {
    fn language_name(&self) -> &'static str;

    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    fn ts_language(&self) -> tree_sitter::Language;

    /// The raw-type table. Built once, read-only for the process lifetime.
    fn node_configs(&self) -> &'static HashMap<&'static str, NodeConfig>;

    /// CUSTOM name extraction, keyed by raw type. Must be a pure function
    /// of the subtree: no external state, no I/O.
    fn custom_name(&self, _raw_type: &str, _node: Node, _source: &str) -> Option<String> {
        None
    }

    /// Whether a named definition is externally visible. `name` is the
    /// already-extracted display name of `node`.
    fn is_public(&self, _node: Node, _source: &str, _name: &str) -> bool {
        false
    }

    /// Language-specific extraction detail attached at `context = native`.
    /// Uninterpreted by the core; carried as JSON.
    fn native_context(&self, _node: Node, _source: &str) -> Option<serde_json::Value> {
        None
    }

    /// Table lookup for one raw type. Unmapped types return `None`; the
    /// flattener then falls back to an opaque classification but still
    /// emits a record.
    fn node_config(&self, raw_type: &str) -> Option<&'static NodeConfig> {
        self.node_configs().get(raw_type)
    }
}

/// All registered adapters. Registered once; the backing tables never
/// mutate after initialization, so concurrent lookups need no locking.
static ADAPTERS: &[&'static (dyn LanguageAdapter)] = &[
    &python::PythonAdapter,
    &javascript::JavaScriptAdapter,
    &typescript::TypeScriptAdapter,
    &typescript::TsxAdapter,
    &rust::RustAdapter,
    &go::GoAdapter,
    &java::JavaAdapter,
    &c::CAdapter,
    &cpp::CppAdapter,
    &ruby::RubyAdapter,
    &bash::BashAdapter,
    &json::JsonAdapter,
    &yaml::YamlAdapter,
];

static BY_NAME: Lazy<HashMap<&'static str, &'static dyn LanguageAdapter>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, &'static dyn LanguageAdapter> = HashMap::new();
    for adapter in ADAPTERS {
        map.insert(adapter.language_name(), *adapter);
        for alias in adapter.aliases() {
            map.insert(alias, *adapter);
        }
    }
    map
});

/// Find the adapter for a language name or alias.
pub fn adapter_for(language: &str) -> Result<&'static dyn LanguageAdapter> {
    BY_NAME
        .get(language)
        .copied()
        .ok_or_else(|| TreetabError::UnsupportedLanguage(language.to_string()))
}

/// Registry lookup: raw grammar type to node configuration.
pub fn lookup(language: &str, raw_type: &str) -> Option<&'static NodeConfig> {
    adapter_for(language).ok()?.node_config(raw_type)
}

/// Construct a fresh parser for an adapter's grammar.
///
/// Always a new instance: parser state must never be shared across
/// invocations (a reused singleton was an observed source of cross-call
/// corruption in systems of this shape).
pub fn fresh_parser(adapter: &dyn LanguageAdapter) -> Result<tree_sitter::Parser> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&adapter.ts_language())
        .map_err(|e| {
            TreetabError::Internal(format!(
                "failed to set {} grammar on parser: {e}",
                adapter.language_name()
            ))
        })?;
    Ok(parser)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_supported_language_resolves_to_an_adapter() {
        for language in crate::language::SUPPORTED_LANGUAGES {
            assert!(adapter_for(language).is_ok(), "no adapter for {language}");
        }
    }

    #[test]
    fn aliases_resolve_to_the_same_adapter() {
        let by_name = adapter_for("python").unwrap();
        let by_alias = adapter_for("py").unwrap();
        assert_eq!(by_name.language_name(), by_alias.language_name());
    }

    #[test]
    fn unknown_language_is_an_error() {
        assert!(adapter_for("fortran").is_err());
    }

    #[test]
    fn unmapped_raw_type_returns_none() {
        assert!(lookup("python", "raw_type_that_does_not_exist").is_none());
    }

    #[test]
    fn mapped_raw_type_returns_config() {
        let config = lookup("python", "function_definition").unwrap();
        assert_eq!(config.semantic_type, crate::semantic::DEFINITION_FUNCTION);
    }

    #[test]
    fn fresh_parser_per_call_yields_distinct_instances() {
        let adapter = adapter_for("python").unwrap();
        // Two parsers from the same adapter parse independently.
        let mut first = fresh_parser(adapter).unwrap();
        let mut second = fresh_parser(adapter).unwrap();
        let a = first.parse("x = 1", None).unwrap();
        let b = second.parse("y = 2", None).unwrap();
        assert_eq!(a.root_node().kind(), b.root_node().kind());
    }
}
