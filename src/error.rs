//! Error types for editor-blocks.
//!
//! Setting resolution and page list rendering never fail; absence is
//! expressed as `None`. Errors only come from decoding JSON inputs.

use thiserror::Error;

/// Errors that can occur while decoding block inputs.
#[derive(Debug, Error)]
pub enum BlockError {
    /// Input was not valid JSON for the expected shape
    #[error("invalid {what} JSON: {source}")]
    InvalidJson {
        /// What was being decoded (e.g. "settings", "page records")
        what: &'static str,
        /// Underlying decoder error
        #[source]
        source: serde_json::Error,
    },

    /// Input decoded, but the top level was not a JSON object
    #[error("{what} must be a JSON object")]
    NotAnObject {
        /// What was being decoded
        what: &'static str,
    },
}

/// Result type alias for decoding operations.
pub type BlockResult<T> = Result<T, BlockError>;

impl BlockError {
    /// Wrap a decoder error with the name of the input it came from.
    pub fn invalid_json(what: &'static str, source: serde_json::Error) -> Self {
        Self::InvalidJson { what, source }
    }
}
