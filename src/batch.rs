//! Batch coordinator - multi-unit parsing with globally unique ids.
//!
//! Each unit (file or in-memory text) runs the full parse/flatten/extract
//! pipeline with a freshly constructed parser, then its ids are shifted by a
//! running offset before appending to the combined stream, so ids stay
//! unique across the whole batch while every record keeps its originating
//! unit's path and language. Units are parsed in `batch_size`-sized waves in
//! parallel; renumbering and concatenation are sequential and follow input
//! order, so output is deterministic.

use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::{validate_batch_size, ExtractionConfig};
use crate::error::{Result, TreetabError};
use crate::flatten::parse_to_nodes;
use crate::language::detect_language_from_path;
use crate::node::AstNode;

/// One input unit, parsed independently.
#[derive(Debug, Clone)]
pub enum SourceUnit {
    /// A file on disk; read at parse time.
    File(PathBuf),
    /// In-memory text with a display name.
    Text {
        name: String,
        language: Option<String>,
        content: String,
    },
}

impl SourceUnit {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        SourceUnit::File(path.into())
    }

    pub fn text(name: impl Into<String>, content: impl Into<String>) -> Self {
        SourceUnit::Text {
            name: name.into(),
            language: None,
            content: content.into(),
        }
    }

    pub fn text_with_language(
        name: impl Into<String>,
        content: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        SourceUnit::Text {
            name: name.into(),
            language: Some(language.into()),
            content: content.into(),
        }
    }

    fn display_path(&self) -> String {
        match self {
            SourceUnit::File(path) => path.to_string_lossy().to_string(),
            SourceUnit::Text { name, .. } => name.clone(),
        }
    }
}

/// Batch behavior knobs. `language: None` means auto-detect by extension.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub language: Option<String>,
    pub ignore_errors: bool,
    pub batch_size: usize,
    pub config: ExtractionConfig,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            language: None,
            ignore_errors: false,
            batch_size: 32,
            config: ExtractionConfig::default(),
        }
    }
}

struct UnitOutcome {
    path: String,
    language: String,
    result: Result<Vec<AstNode>>,
}

/// Parse a set of units into one combined record stream.
///
/// Failure policy: with `ignore_errors`, a failing unit contributes a single
/// error node instead of aborting the batch; otherwise the first failing
/// unit's error aborts the whole call.
pub fn parse_units(units: &[SourceUnit], options: &BatchOptions) -> Result<Vec<AstNode>> {
    validate_batch_size(options.batch_size as i64)?;

    let mut combined: Vec<AstNode> = Vec::new();
    let mut offset: u64 = 0;

    for wave in units.chunks(options.batch_size) {
        let outcomes: Vec<UnitOutcome> = wave
            .par_iter()
            .map(|unit| process_unit(unit, options))
            .collect();

        for outcome in outcomes {
            match outcome.result {
                Ok(nodes) => {
                    let count = nodes.len() as u64;
                    combined.extend(nodes.into_iter().map(|mut node| {
                        node.id += offset;
                        node.parent_id = node.parent_id.map(|p| p + offset);
                        node
                    }));
                    offset += count;
                }
                Err(error) if options.ignore_errors => {
                    warn!("unit {} failed, continuing: {}", outcome.path, error);
                    let mut node = AstNode::error(
                        &error.to_string(),
                        Some(&outcome.path),
                        &outcome.language,
                    );
                    node.id = offset;
                    offset += 1;
                    combined.push(node);
                }
                Err(error) => return Err(error),
            }
        }
    }

    debug!("batch produced {} records from {} units", combined.len(), units.len());
    Ok(combined)
}

/// Resolve glob patterns (and literal paths) into file units, then parse.
pub fn parse_paths(patterns: &[String], options: &BatchOptions) -> Result<Vec<AstNode>> {
    let units: Vec<SourceUnit> = resolve_patterns(patterns)?
        .into_iter()
        .map(SourceUnit::File)
        .collect();
    parse_units(&units, options)
}

/// Expand glob patterns into concrete paths; plain paths pass through.
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for pattern in patterns {
        if pattern.contains(['*', '?', '[']) {
            let entries = glob::glob(pattern).map_err(|e| {
                TreetabError::InvalidConfig(format!("invalid glob pattern '{pattern}': {e}"))
            })?;
            for entry in entries {
                match entry {
                    Ok(path) => paths.push(path),
                    Err(e) => warn!("skipping unreadable glob match: {e}"),
                }
            }
        } else {
            paths.push(PathBuf::from(pattern));
        }
    }
    Ok(paths)
}

/// Run the single-unit pipeline: resolve language, read content, parse with
/// a fresh front-end instance, flatten.
fn process_unit(unit: &SourceUnit, options: &BatchOptions) -> UnitOutcome {
    let path = unit.display_path();

    let language = match resolve_language(unit, options) {
        Ok(language) => language,
        Err(error) => {
            return UnitOutcome {
                path,
                language: "unknown".to_string(),
                result: Err(error),
            };
        }
    };

    let content = match unit {
        SourceUnit::File(file) => match std::fs::read_to_string(file) {
            Ok(content) => content,
            Err(source) => {
                return UnitOutcome {
                    path: path.clone(),
                    language,
                    result: Err(TreetabError::UnitIo { path, source }),
                };
            }
        },
        SourceUnit::Text { content, .. } => content.clone(),
    };

    let result = parse_to_nodes(&content, &language, Some(&path), &options.config);
    UnitOutcome {
        path,
        language,
        result,
    }
}

fn resolve_language(unit: &SourceUnit, options: &BatchOptions) -> Result<String> {
    if let SourceUnit::Text {
        language: Some(language),
        ..
    } = unit
    {
        return Ok(language.clone());
    }
    if let Some(language) = &options.language {
        return Ok(language.clone());
    }
    let path = unit.display_path();
    detect_language_from_path(&path)
        .map(str::to_string)
        .ok_or_else(|| TreetabError::UnsupportedLanguage(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn two_language_batch_has_unique_ids_and_per_unit_provenance() {
        let dir = tempfile::tempdir().unwrap();
        let py = write_file(&dir, "a.py", "def hello():\n    pass\n");
        let js = write_file(&dir, "b.js", "function hi() { return 1; }\n");

        let nodes = parse_units(
            &[SourceUnit::file(&py), SourceUnit::file(&js)],
            &BatchOptions::default(),
        )
        .unwrap();

        let ids: HashSet<u64> = nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids.len(), nodes.len(), "ids must be globally unique");

        let languages: HashSet<&str> = nodes.iter().map(|n| n.language.as_str()).collect();
        assert_eq!(
            languages,
            HashSet::from(["python", "javascript"]),
            "languages must match the originating units exactly"
        );

        for node in &nodes {
            let expected = if node.language == "python" { &py } else { &js };
            assert_eq!(
                node.file_path.as_deref(),
                Some(expected.to_string_lossy().as_ref())
            );
        }
    }

    #[test]
    fn renumbering_keeps_parent_links_inside_each_unit() {
        let units = [
            SourceUnit::text_with_language("one.py", "x = 1\n", "python"),
            SourceUnit::text_with_language("two.py", "y = 2\n", "python"),
        ];
        let nodes = parse_units(&units, &BatchOptions::default()).unwrap();

        let first_unit_len = nodes
            .iter()
            .filter(|n| n.file_path.as_deref() == Some("one.py"))
            .count() as u64;

        for node in &nodes {
            if let Some(parent) = node.parent_id {
                let parent_node = nodes.iter().find(|n| n.id == parent).unwrap();
                assert_eq!(parent_node.file_path, node.file_path);
            } else if node.file_path.as_deref() == Some("two.py") {
                // Second unit's root sits exactly at the running offset.
                assert_eq!(node.id, first_unit_len);
            }
        }
    }

    #[test]
    fn batch_results_match_single_unit_parses() {
        let source = "def f():\n    return 1\n";
        let single =
            parse_to_nodes(source, "python", Some("u.py"), &ExtractionConfig::default()).unwrap();
        let batched = parse_units(
            &[SourceUnit::text_with_language("u.py", source, "python")],
            &BatchOptions::default(),
        )
        .unwrap();
        assert_eq!(single, batched);
    }

    #[test]
    fn missing_file_aborts_without_ignore_errors() {
        let result = parse_units(
            &[SourceUnit::file("/no/such/file.py")],
            &BatchOptions::default(),
        );
        assert!(matches!(result, Err(TreetabError::UnitIo { .. })));
    }

    #[test]
    fn missing_file_becomes_error_node_with_ignore_errors() {
        let options = BatchOptions {
            ignore_errors: true,
            ..BatchOptions::default()
        };
        let nodes = parse_units(
            &[
                SourceUnit::file("/no/such/file.py"),
                SourceUnit::text_with_language("ok.py", "x = 1\n", "python"),
            ],
            &options,
        )
        .unwrap();

        let error_nodes: Vec<_> = nodes.iter().filter(|n| n.is_error()).collect();
        assert_eq!(error_nodes.len(), 1);
        assert_eq!(error_nodes[0].file_path.as_deref(), Some("/no/such/file.py"));

        // The healthy unit still parsed, with ids continuing after the
        // error record.
        assert!(nodes.iter().any(|n| !n.is_error()));
        let ids: HashSet<u64> = nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids.len(), nodes.len());
    }

    #[test]
    fn undetectable_language_aborts_without_ignore_errors() {
        let result = parse_units(
            &[SourceUnit::text("README.nope", "hello")],
            &BatchOptions::default(),
        );
        assert!(matches!(result, Err(TreetabError::UnsupportedLanguage(_))));
    }

    #[test]
    fn explicit_language_overrides_detection() {
        let options = BatchOptions {
            language: Some("python".to_string()),
            ..BatchOptions::default()
        };
        let nodes = parse_units(&[SourceUnit::text("snippet", "x = 1\n")], &options).unwrap();
        assert!(nodes.iter().all(|n| n.language == "python"));
    }

    #[test]
    fn zero_batch_size_fails_with_exact_message() {
        let options = BatchOptions {
            batch_size: 0,
            ..BatchOptions::default()
        };
        let err = parse_units(&[], &options).unwrap_err();
        assert_eq!(err.to_string(), "batch_size must be positive");
    }

    #[test]
    fn small_batch_size_still_covers_all_units() {
        let units: Vec<SourceUnit> = (0..5)
            .map(|i| {
                SourceUnit::text_with_language(format!("u{i}.py"), format!("x{i} = {i}\n"), "python")
            })
            .collect();
        let options = BatchOptions {
            batch_size: 2,
            ..BatchOptions::default()
        };
        let nodes = parse_units(&units, &options).unwrap();
        let paths: HashSet<&str> = nodes.iter().filter_map(|n| n.file_path.as_deref()).collect();
        assert_eq!(paths.len(), 5);
        let ids: HashSet<u64> = nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids.len(), nodes.len());
    }

    #[test]
    fn glob_patterns_resolve_to_files() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir, "m1.py", "a = 1\n");
        write_file(&dir, "m2.py", "b = 2\n");
        write_file(&dir, "notes.txt", "not code\n");

        let pattern = format!("{}/*.py", dir.path().display());
        let paths = resolve_patterns(&[pattern]).unwrap();
        assert_eq!(paths.len(), 2);

        let nodes = parse_paths(
            &[format!("{}/*.py", dir.path().display())],
            &BatchOptions::default(),
        )
        .unwrap();
        let files: HashSet<&str> = nodes.iter().filter_map(|n| n.file_path.as_deref()).collect();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn repeated_batches_are_identical() {
        let units = [
            SourceUnit::text_with_language("a.py", "def f(): pass\n", "python"),
            SourceUnit::text_with_language("b.js", "const x = 1;\n", "javascript"),
        ];
        let first = parse_units(&units, &BatchOptions::default()).unwrap();
        for _ in 0..4 {
            let again = parse_units(&units, &BatchOptions::default()).unwrap();
            assert_eq!(first, again);
        }
    }
}
