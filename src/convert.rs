//! Conversion entry points.
//!
//! The run is a linear chain of three steps — read, convert, write — each
//! step's output handed to the next by value. [`convert`] stops after the
//! convert step and returns the payload in memory; [`convert_to_file`]
//! adds the write step and returns only the statistics. There is no
//! retry, checkpointing, or partial-output recovery: the first error
//! terminates the run.

use crate::config::ConversionConfig;
use crate::error::Html2WordError;
use crate::output::{ConversionOutput, ConversionStats};
use crate::pipeline::{build, input, parse};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Convert an HTML file to a Word document payload.
///
/// This is the primary entry point for the library. The payload stays in
/// memory; use [`convert_to_file`] to run the full pipeline including the
/// write step.
///
/// # Errors
/// - Read stage: file missing, unreadable, or not valid UTF-8
/// - Convert stage: the document package could not be serialised
pub async fn convert(
    input_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Html2WordError> {
    let total_start = Instant::now();
    let input_path = input_path.as_ref();
    info!("Starting conversion: {}", input_path.display());

    if let Some(ref template) = config.template_path {
        debug!(
            "Template path {} is reserved and not used by the conversion step",
            template.display()
        );
    }

    // ── Step 1: Read ─────────────────────────────────────────────────────
    let read_start = Instant::now();
    let html = input::read_html(input_path).await?;
    let read_duration_ms = read_start.elapsed().as_millis() as u64;

    // ── Step 2: Convert ──────────────────────────────────────────────────
    let mut output = convert_html(html, config).await?;

    output.stats.read_duration_ms = read_duration_ms;
    output.stats.total_duration_ms = total_start.elapsed().as_millis() as u64;

    info!(
        "Conversion complete: {} blocks, {} bytes, {}ms total",
        output.stats.total_blocks(),
        output.stats.output_bytes,
        output.stats.total_duration_ms
    );

    Ok(output)
}

/// Convert in-memory HTML text to a Word document payload.
///
/// Skips the read step entirely — the recommended API when the markup
/// comes from a database, network response, or editor buffer rather than
/// a file on disk.
pub async fn convert_html(
    html: impl Into<String>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Html2WordError> {
    let html = html.into();
    let input_bytes = html.len();
    let config = config.clone();

    // Parsing and document packing are CPU-bound; keep them off the
    // async executor's hot path.
    let convert_start = Instant::now();
    let (payload, paragraphs, headings, list_items) = tokio::task::spawn_blocking(move || {
        let blocks = parse::parse_blocks(&html);
        let paragraphs = blocks
            .iter()
            .filter(|b| matches!(b, parse::DocBlock::Paragraph { .. }))
            .count();
        let headings = blocks
            .iter()
            .filter(|b| matches!(b, parse::DocBlock::Heading { .. }))
            .count();
        let list_items = blocks
            .iter()
            .filter(|b| matches!(b, parse::DocBlock::ListItem { .. }))
            .count();
        build::build_document(&blocks, &config)
            .map(|payload| (payload, paragraphs, headings, list_items))
    })
    .await
    .map_err(|e| Html2WordError::Internal(format!("conversion task failed: {e}")))??;
    let convert_duration_ms = convert_start.elapsed().as_millis() as u64;

    debug!(
        "Converted {} bytes of HTML into {} bytes of document",
        input_bytes,
        payload.len()
    );

    let stats = ConversionStats {
        input_bytes,
        output_bytes: payload.len(),
        paragraphs,
        headings,
        list_items,
        read_duration_ms: 0,
        convert_duration_ms,
        write_duration_ms: 0,
        total_duration_ms: convert_duration_ms,
    };

    Ok(ConversionOutput { payload, stats })
}

/// Run the full pipeline: read the HTML file, convert it, and write the
/// document to `output_path`.
///
/// Uses atomic write (temp file + rename) so a failure mid-write never
/// leaves a truncated document behind. Missing parent directories are
/// created.
pub async fn convert_to_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, Html2WordError> {
    let total_start = Instant::now();
    let mut output = convert(&input_path, config).await?;

    // ── Step 3: Write ────────────────────────────────────────────────────
    let write_start = Instant::now();
    let path = output_path.as_ref();
    write_payload(&output.payload, path).await?;
    output.stats.write_duration_ms = write_start.elapsed().as_millis() as u64;
    output.stats.total_duration_ms = total_start.elapsed().as_millis() as u64;

    info!(
        "Wrote {} bytes to {}",
        output.stats.output_bytes,
        path.display()
    );

    Ok(output.stats)
}

/// Synchronous wrapper around [`convert_to_file`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, Html2WordError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Html2WordError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(convert_to_file(input_path, output_path, config))
}

/// Persist the payload atomically: write to a sibling temp file, then
/// rename over the destination.
async fn write_payload(payload: &[u8], path: &Path) -> Result<(), Html2WordError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Html2WordError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        }
    }

    let tmp_path = path.with_extension("docx.tmp");
    tokio::fs::write(&tmp_path, payload)
        .await
        .map_err(|e| Html2WordError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| Html2WordError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn convert_html_counts_blocks() {
        let config = ConversionConfig::default();
        let output = convert_html(
            "<h1>Title</h1><p>one</p><p>two</p><ul><li>a</li><li>b</li><li>c</li></ul>",
            &config,
        )
        .await
        .expect("conversion must succeed");

        assert_eq!(output.stats.headings, 1);
        assert_eq!(output.stats.paragraphs, 2);
        assert_eq!(output.stats.list_items, 3);
        assert_eq!(output.stats.output_bytes, output.payload.len());
        assert_eq!(&output.payload[..2], b"PK");
    }

    #[tokio::test]
    async fn convert_missing_input_fails_in_read_stage() {
        let config = ConversionConfig::default();
        let err = convert("/no/such/input.html", &config).await.unwrap_err();
        assert_eq!(err.stage(), "read");
    }

    #[tokio::test]
    async fn write_failure_maps_to_write_stage() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.html");
        std::fs::write(&input, "<p>x</p>").unwrap();

        // A regular file where a directory is needed makes the write fail.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let output = blocker.join("out.docx");

        let err = convert_to_file(&input, &output, &ConversionConfig::default())
            .await
            .unwrap_err();
        assert_eq!(err.stage(), "write");
    }
}
