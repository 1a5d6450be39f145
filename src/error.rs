//! Error types for the html2word library.
//!
//! One fatal error type, [`Html2WordError`], covers the whole run. The
//! pipeline is single-flight — read, convert, write, in that order — so
//! there is no page- or chunk-level partial failure to model: the first
//! error terminates the run and surfaces to the caller.
//!
//! Variants are grouped by the stage that produces them, and
//! [`Html2WordError::stage`] names that stage so operators can tell at a
//! glance which of the three steps went wrong.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the html2word library.
#[derive(Debug, Error)]
pub enum Html2WordError {
    // ── Read errors ───────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("reading file '{path}' failed: file not found\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the input file.
    #[error("reading file '{path}' failed: permission denied\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input file is not valid UTF-8 text.
    #[error("reading file '{path}' failed: invalid UTF-8 at byte offset {valid_up_to}\nThe input must be UTF-8 encoded HTML.")]
    InvalidEncoding { path: PathBuf, valid_up_to: usize },

    // ── Convert errors ────────────────────────────────────────────────────
    /// The document writer could not serialise the .docx package.
    #[error("creating Word document failed: {detail}")]
    DocumentBuildFailed { detail: String },

    // ── Write errors ──────────────────────────────────────────────────────
    /// Could not create or write the output document file.
    #[error("writing output file '{path}' failed: {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Html2WordError {
    /// Name the pipeline stage this error belongs to.
    pub fn stage(&self) -> &'static str {
        match self {
            Html2WordError::FileNotFound { .. }
            | Html2WordError::PermissionDenied { .. }
            | Html2WordError::InvalidEncoding { .. } => "read",
            Html2WordError::DocumentBuildFailed { .. } => "convert",
            Html2WordError::OutputWriteFailed { .. } => "write",
            Html2WordError::InvalidConfig(_) => "config",
            Html2WordError::Internal(_) => "internal",
        }
    }
}
