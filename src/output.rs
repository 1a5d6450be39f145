//! Output types: the document payload and per-run statistics.

use serde::{Deserialize, Serialize};

/// The result of a successful conversion.
///
/// Holds the finished `.docx` payload in memory together with the run's
/// statistics. [`crate::convert::convert_to_file`] flushes the payload to
/// disk and returns only the stats.
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// The Word document as raw bytes (a ZIP package; first bytes are `PK`).
    pub payload: Vec<u8>,

    /// Statistics for this run.
    pub stats: ConversionStats,
}

/// Statistics for a conversion run.
///
/// Serialisable so the CLI can emit them as JSON (`--json`) and callers can
/// log or diff two runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Bytes of HTML read from the input.
    pub input_bytes: usize,

    /// Bytes of the produced `.docx` payload.
    pub output_bytes: usize,

    /// Plain paragraph blocks in the document.
    pub paragraphs: usize,

    /// Heading blocks in the document.
    pub headings: usize,

    /// List items (ordered and unordered) in the document.
    pub list_items: usize,

    /// Time spent reading the input file.
    pub read_duration_ms: u64,

    /// Time spent parsing HTML and building the document payload.
    pub convert_duration_ms: u64,

    /// Time spent writing the output file (0 when the payload stayed in memory).
    pub write_duration_ms: u64,

    /// Total wall-clock time for the run.
    pub total_duration_ms: u64,
}

impl ConversionStats {
    /// Total number of blocks in the document.
    pub fn total_blocks(&self) -> usize {
        self.paragraphs + self.headings + self.list_items
    }
}
