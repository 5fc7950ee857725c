//! Error taxonomy for the flattening core.
//!
//! Four failure classes with distinct recovery policies: configuration errors
//! always abort the call, parse errors are recovered locally as error nodes,
//! unit I/O errors abort unless `ignore_errors` is set, and internal errors
//! are always fatal because the produced record set cannot be trusted.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreetabError {
    /// Bad parameter value. Never silently defaulted; the message names the
    /// parameter, the offending value, and the accepted set.
    #[error("{0}")]
    InvalidConfig(String),

    /// The grammar front end could not produce a tree for a unit.
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    /// An input unit could not be read.
    #[error("cannot read {path}: {source}")]
    UnitIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Language name (or detected extension) has no registered adapter.
    #[error(
        "Unsupported language: '{0}'. Supported languages: {supported}",
        supported = crate::language::supported_language_list()
    )]
    UnsupportedLanguage(String),

    /// Invariant violation inside the flattener (id collision, bad counts).
    /// Always fatal: the algorithm itself is broken if this fires.
    #[error("internal invariant violated: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, TreetabError>;

impl TreetabError {
    /// Build the documented fail-fast message for an out-of-set parameter.
    pub fn invalid_parameter(param: &str, value: &str, valid: &str) -> Self {
        TreetabError::InvalidConfig(format!(
            "Invalid {param} parameter '{value}'. Valid values are: {valid}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_message_is_exact() {
        let err = TreetabError::invalid_parameter("context", "bogus", "none, normalized");
        assert_eq!(
            err.to_string(),
            "Invalid context parameter 'bogus'. Valid values are: none, normalized"
        );
    }
}
