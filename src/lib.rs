//! treetab - tree-sitter ASTs flattened into relational tables.
//!
//! Per-language grammar front ends produce raw parse trees; this crate
//! normalizes them into one language-agnostic, flat record stream that a
//! tabular/relational engine can query. The pipeline:
//!
//! 1. A fresh parser per invocation produces the raw tree.
//! 2. The flattener assigns pre-order ids, parent/depth/sibling positions,
//!    then folds children/descendant counts bottom-up.
//! 3. The per-language registry classifies each raw node type into the
//!    8-bit semantic taxonomy and selects a name-extraction strategy.
//! 4. The detail-level configuration (context/source/structure/preview)
//!    decides which fields each record carries.
//! 5. The batch coordinator repeats this per unit and renumbers ids so they
//!    stay unique across the combined stream, isolating per-unit failures
//!    as error nodes when asked to.

pub mod adapters;
pub mod batch;
pub mod config;
pub mod error;
pub mod extract;
pub mod flatten;
pub mod language;
pub mod node;
pub mod semantic;

pub use adapters::{ExtractionStrategy, LanguageAdapter, NodeConfig};
pub use batch::{parse_paths, parse_units, BatchOptions, SourceUnit};
pub use config::{
    validate_batch_size, ContextLevel, ExtractionConfig, PreviewMode, SourceLevel, StructureLevel,
};
pub use error::{Result, TreetabError};
pub use flatten::parse_to_nodes;
pub use language::{detect_language_from_extension, get_tree_sitter_language};
pub use node::AstNode;
