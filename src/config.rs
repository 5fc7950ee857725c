//! Detail-level configuration - the four orthogonal verbosity axes.
//!
//! Each axis validates against its enumerated set and fails fast on anything
//! else; invalid values are never silently substituted. The axes are
//! independent: disabling `structure` has no effect on `context`, `source`,
//! or `preview` output, and vice versa.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TreetabError};

/// How much semantic interpretation is attached to each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextLevel {
    /// Raw tree only.
    None,
    /// Adds `semantic_type`, `flags`, `normalized_type`.
    NodeTypesOnly,
    /// Adds `name` extraction.
    Normalized,
    /// Adds language-specific (uninterpreted) extraction detail.
    Native,
}

/// How much source location is attached to each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceLevel {
    None,
    /// File path only.
    Path,
    /// Line span only, no path duplication.
    LinesOnly,
    /// File path plus line span.
    Lines,
    /// File path, line span, and columns.
    Full,
}

/// How much tree arithmetic is attached to each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureLevel {
    None,
    /// `parent_id` and `depth`.
    Minimal,
    /// Adds `sibling_index`, `children_count`, `descendant_count`.
    Full,
}

/// Source preview policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewMode {
    None,
    /// Strategy-driven, bounded: small nodes verbatim, long single lines
    /// truncated, multi-line nodes reduced to their first line.
    Smart,
    /// Complete source text for the node, untruncated.
    Full,
    /// Exact character cap.
    Chars(u32),
}

const CONTEXT_VALUES: &str = "none, node_types_only, normalized, native";
const SOURCE_VALUES: &str = "none, path, lines_only, lines, full";
const STRUCTURE_VALUES: &str = "none, minimal, full";
const PREVIEW_VALUES: &str = "none, smart, full, or a non-negative integer";

impl ContextLevel {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "none" => Ok(ContextLevel::None),
            "node_types_only" => Ok(ContextLevel::NodeTypesOnly),
            "normalized" => Ok(ContextLevel::Normalized),
            "native" => Ok(ContextLevel::Native),
            _ => Err(TreetabError::invalid_parameter(
                "context",
                value,
                CONTEXT_VALUES,
            )),
        }
    }
}

impl SourceLevel {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "none" => Ok(SourceLevel::None),
            "path" => Ok(SourceLevel::Path),
            "lines_only" => Ok(SourceLevel::LinesOnly),
            "lines" => Ok(SourceLevel::Lines),
            "full" => Ok(SourceLevel::Full),
            _ => Err(TreetabError::invalid_parameter(
                "source",
                value,
                SOURCE_VALUES,
            )),
        }
    }
}

impl StructureLevel {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "none" => Ok(StructureLevel::None),
            "minimal" => Ok(StructureLevel::Minimal),
            "full" => Ok(StructureLevel::Full),
            _ => Err(TreetabError::invalid_parameter(
                "structure",
                value,
                STRUCTURE_VALUES,
            )),
        }
    }
}

impl PreviewMode {
    /// Parse the preview axis. Besides the enumerated set, a non-negative
    /// integer means "truncate to N characters".
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "none" => Ok(PreviewMode::None),
            "smart" => Ok(PreviewMode::Smart),
            "full" => Ok(PreviewMode::Full),
            other => match other.parse::<i64>() {
                Ok(n) if n >= 0 && n <= u32::MAX as i64 => Ok(PreviewMode::Chars(n as u32)),
                _ => Err(TreetabError::invalid_parameter(
                    "preview",
                    value,
                    PREVIEW_VALUES,
                )),
            },
        }
    }
}

/// The combined detail-level configuration applied to the flattening and
/// extraction pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub context: ContextLevel,
    pub source: SourceLevel,
    pub structure: StructureLevel,
    pub preview: PreviewMode,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            context: ContextLevel::Native,
            source: SourceLevel::Lines,
            structure: StructureLevel::Full,
            preview: PreviewMode::Smart,
        }
    }
}

impl ExtractionConfig {
    /// Parse all four axes from raw parameter strings, failing fast on the
    /// first out-of-set value.
    pub fn from_params(
        context: &str,
        source: &str,
        structure: &str,
        preview: &str,
    ) -> Result<Self> {
        Ok(Self {
            context: ContextLevel::parse(context)?,
            source: SourceLevel::parse(source)?,
            structure: StructureLevel::parse(structure)?,
            preview: PreviewMode::parse(preview)?,
        })
    }

    pub fn include_semantics(&self) -> bool {
        self.context >= ContextLevel::NodeTypesOnly
    }

    pub fn include_name(&self) -> bool {
        self.context >= ContextLevel::Normalized
    }

    pub fn include_native(&self) -> bool {
        self.context == ContextLevel::Native
    }

    pub fn include_file_path(&self) -> bool {
        matches!(
            self.source,
            SourceLevel::Path | SourceLevel::Lines | SourceLevel::Full
        )
    }

    pub fn include_lines(&self) -> bool {
        self.source >= SourceLevel::LinesOnly
    }

    pub fn include_columns(&self) -> bool {
        self.source == SourceLevel::Full
    }

    pub fn include_minimal_structure(&self) -> bool {
        self.structure >= StructureLevel::Minimal
    }

    pub fn include_full_structure(&self) -> bool {
        self.structure == StructureLevel::Full
    }
}

/// Validate the batch size knob. Zero and negative values are rejected with
/// the documented message.
pub fn validate_batch_size(batch_size: i64) -> Result<usize> {
    if batch_size <= 0 {
        return Err(TreetabError::InvalidConfig(
            "batch_size must be positive".to_string(),
        ));
    }
    Ok(batch_size as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_enumerated_value() {
        assert_eq!(ContextLevel::parse("none").unwrap(), ContextLevel::None);
        assert_eq!(
            ContextLevel::parse("node_types_only").unwrap(),
            ContextLevel::NodeTypesOnly
        );
        assert_eq!(
            ContextLevel::parse("NORMALIZED").unwrap(),
            ContextLevel::Normalized
        );
        assert_eq!(ContextLevel::parse("native").unwrap(), ContextLevel::Native);
        assert_eq!(SourceLevel::parse("lines_only").unwrap(), SourceLevel::LinesOnly);
        assert_eq!(StructureLevel::parse("minimal").unwrap(), StructureLevel::Minimal);
        assert_eq!(PreviewMode::parse("smart").unwrap(), PreviewMode::Smart);
    }

    #[test]
    fn preview_accepts_non_negative_integer() {
        assert_eq!(PreviewMode::parse("0").unwrap(), PreviewMode::Chars(0));
        assert_eq!(PreviewMode::parse("120").unwrap(), PreviewMode::Chars(120));
    }

    #[test]
    fn invalid_context_fails_with_exact_message() {
        let err = ContextLevel::parse("verbose").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid context parameter 'verbose'. Valid values are: none, node_types_only, normalized, native"
        );
    }

    #[test]
    fn invalid_source_fails_with_exact_message() {
        let err = SourceLevel::parse("everything").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid source parameter 'everything'. Valid values are: none, path, lines_only, lines, full"
        );
    }

    #[test]
    fn invalid_structure_fails_with_exact_message() {
        let err = StructureLevel::parse("partial").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid structure parameter 'partial'. Valid values are: none, minimal, full"
        );
    }

    #[test]
    fn negative_preview_is_rejected() {
        let err = PreviewMode::parse("-1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid preview parameter '-1'. Valid values are: none, smart, full, or a non-negative integer"
        );
    }

    #[test]
    fn batch_size_must_be_positive() {
        assert_eq!(validate_batch_size(1).unwrap(), 1);
        assert_eq!(
            validate_batch_size(0).unwrap_err().to_string(),
            "batch_size must be positive"
        );
        assert_eq!(
            validate_batch_size(-1).unwrap_err().to_string(),
            "batch_size must be positive"
        );
    }

    #[test]
    fn from_params_fails_fast_on_first_invalid_axis() {
        let err = ExtractionConfig::from_params("native", "lines", "full", "fuzzy").unwrap_err();
        assert!(err.to_string().starts_with("Invalid preview parameter"));
    }

    #[test]
    fn default_matches_richest_common_settings() {
        let config = ExtractionConfig::default();
        assert!(config.include_native());
        assert!(config.include_lines());
        assert!(!config.include_columns());
        assert!(config.include_full_structure());
    }
}
