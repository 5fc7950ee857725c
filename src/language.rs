//! Language support - the supported-language roster and extension mapping.
//!
//! The flattener and the batch coordinator resolve languages through here;
//! grammar wiring itself lives on each adapter.

use crate::error::{Result, TreetabError};

/// Languages with a registered adapter, in display order.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "python",
    "javascript",
    "typescript",
    "tsx",
    "rust",
    "go",
    "java",
    "c",
    "cpp",
    "ruby",
    "bash",
    "json",
    "yaml",
];

/// Comma-separated supported language list, used in error messages.
pub fn supported_language_list() -> String {
    SUPPORTED_LANGUAGES.join(", ")
}

/// Get the tree-sitter grammar for a given language name.
pub fn get_tree_sitter_language(language: &str) -> Result<tree_sitter::Language> {
    match language {
        "python" | "py" => Ok(tree_sitter_python::LANGUAGE.into()),
        "javascript" | "js" | "jsx" => Ok(tree_sitter_javascript::LANGUAGE.into()),
        "typescript" | "ts" => Ok(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
        "tsx" => Ok(tree_sitter_typescript::LANGUAGE_TSX.into()),
        "rust" | "rs" => Ok(tree_sitter_rust::LANGUAGE.into()),
        "go" => Ok(tree_sitter_go::LANGUAGE.into()),
        "java" => Ok(tree_sitter_java::LANGUAGE.into()),
        "c" => Ok(tree_sitter_c::LANGUAGE.into()),
        "cpp" | "c++" | "cxx" => Ok(tree_sitter_cpp::LANGUAGE.into()),
        "ruby" | "rb" => Ok(tree_sitter_ruby::LANGUAGE.into()),
        "bash" | "sh" | "shell" => Ok(tree_sitter_bash::LANGUAGE.into()),
        "json" | "jsonc" => Ok(tree_sitter_json::LANGUAGE.into()),
        "yaml" | "yml" => Ok(tree_sitter_yaml::LANGUAGE.into()),
        _ => Err(TreetabError::UnsupportedLanguage(language.to_string())),
    }
}

/// Detect language from a file extension.
///
/// Returns the language name accepted by [`get_tree_sitter_language`].
pub fn detect_language_from_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "py" | "pyi" => Some("python"),
        "js" | "jsx" | "mjs" | "cjs" => Some("javascript"),
        "ts" => Some("typescript"),
        "tsx" => Some("tsx"),
        "rs" => Some("rust"),
        "go" => Some("go"),
        "java" => Some("java"),
        "c" | "h" => Some("c"),
        "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Some("cpp"),
        "rb" => Some("ruby"),
        "sh" | "bash" => Some("bash"),
        "json" | "jsonc" => Some("json"),
        "yml" | "yaml" => Some("yaml"),
        _ => None,
    }
}

/// Detect language from a file path.
pub fn detect_language_from_path(path: &str) -> Option<&'static str> {
    let extension = std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())?;
    detect_language_from_extension(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_supported_language_has_a_grammar() {
        for language in SUPPORTED_LANGUAGES {
            assert!(
                get_tree_sitter_language(language).is_ok(),
                "no grammar for {language}"
            );
        }
    }

    #[test]
    fn unsupported_language_lists_the_supported_set() {
        let err = get_tree_sitter_language("cobol").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Unsupported language: 'cobol'"));
        assert!(message.contains("python"));
        assert!(message.contains("yaml"));
    }

    #[test]
    fn extension_detection() {
        assert_eq!(detect_language_from_extension("py"), Some("python"));
        assert_eq!(detect_language_from_extension("tsx"), Some("tsx"));
        assert_eq!(detect_language_from_extension("hpp"), Some("cpp"));
        assert_eq!(detect_language_from_extension("xyz"), None);
    }

    #[test]
    fn path_detection() {
        assert_eq!(detect_language_from_path("src/main.rs"), Some("rust"));
        assert_eq!(detect_language_from_path("noext"), None);
    }
}
