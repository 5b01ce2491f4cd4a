//! Error types for component decoding, rendering and translation loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a render call.
///
/// Only structural problems surface here. Unknown style names, a missing
/// translation provider and under-supplied placeholders all degrade
/// gracefully and are reported through logging instead.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A node (or an object field) had a shape components cannot take.
    #[error("unsupported component at {path}: {found}")]
    Unsupported {
        /// JSON-pointer-like location of the offending node.
        path: String,
        /// Short description of what was found there.
        found: String,
    },

    /// The tree nests deeper than the renderer allows.
    #[error("component tree exceeds maximum depth of {limit}")]
    DepthExceeded { limit: usize },

    /// The input document is not valid JSON.
    #[error("invalid component json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading a translation catalog.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("failed to read translations from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid translation json: {0}")]
    Json(#[from] serde_json::Error),

    /// Language files are a single flat object.
    #[error("translation document must be an object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("translation rule for '{key}' must be a string, found {found}")]
    NonStringRule { key: String, found: &'static str },
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
