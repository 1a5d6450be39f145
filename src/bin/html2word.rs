//! CLI binary for html2word.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use html2word::{convert_to_file, ConversionConfig};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion (writes document.docx next to the input)
  html2word document.html

  # Convert to an explicit output path
  html2word 1.html -o 2.docx

  # Different body font
  html2word --font-family Georgia --font-size 12 report.html -o report.docx

  # Statistics as JSON (stdout), document to file
  html2word page.html -o page.docx --json

ENVIRONMENT VARIABLES:
  HTML2WORD_OUTPUT       Output document path
  HTML2WORD_TEMPLATE     Template document path (reserved)
  HTML2WORD_FONT_FAMILY  Default body font family
  HTML2WORD_FONT_SIZE    Default body font size in points

NOTES:
  The input must be UTF-8 encoded HTML. Paragraphs, headings h1–h6,
  ordered/unordered lists (including nesting), bold, italic, underline,
  strikethrough, and <br> line breaks are mapped; unknown tags pass their
  text through unstyled. The output is written atomically — a failed run
  leaves no partial .docx behind.
"#;

/// Convert HTML files to Word (.docx) documents.
#[derive(Parser, Debug)]
#[command(
    name = "html2word",
    version,
    about = "Convert HTML files to Word (.docx) documents",
    long_about = "Convert an HTML file to a Word-compatible .docx document. \
HTML parsing is delegated to html5ever and document serialisation to docx-rs; \
paragraphs, headings, lists, and basic character formatting survive the trip.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input HTML file path.
    input: PathBuf,

    /// Write the document to this path (default: input path with .docx extension).
    #[arg(short, long, env = "HTML2WORD_OUTPUT")]
    output: Option<PathBuf>,

    /// Template document path. Reserved for template-based rendering;
    /// accepted and recorded but not used by the conversion step.
    #[arg(long, env = "HTML2WORD_TEMPLATE")]
    template: Option<PathBuf>,

    /// Default body font family.
    #[arg(long, env = "HTML2WORD_FONT_FAMILY", default_value = "Calibri")]
    font_family: String,

    /// Default body font size in points (6–72).
    #[arg(long, env = "HTML2WORD_FONT_SIZE", default_value_t = 11,
          value_parser = clap::value_parser!(u16).range(6..=72))]
    font_size: u16,

    /// Print run statistics as JSON on stdout.
    #[arg(long, env = "HTML2WORD_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "HTML2WORD_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "HTML2WORD_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let mut builder = ConversionConfig::builder()
        .font_family(&cli.font_family)
        .font_size_pt(cli.font_size as usize);
    if let Some(ref template) = cli.template {
        builder = builder.template_path(template.clone());
    }
    let config = builder.build().context("Invalid configuration")?;

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("docx"));

    // ── Run conversion ───────────────────────────────────────────────────
    let stats = convert_to_file(&cli.input, &output_path, &config)
        .await
        .context("Conversion failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).context("Failed to serialise stats")?
        );
    }

    if !cli.quiet {
        eprintln!(
            "{} wrote {} bytes  →  {}",
            green("✔"),
            bold(&stats.output_bytes.to_string()),
            bold(&output_path.display().to_string()),
        );
        eprintln!(
            "   {}",
            dim(&format!(
                "{} paragraphs, {} headings, {} list items  —  {}ms total",
                stats.paragraphs, stats.headings, stats.list_items, stats.total_duration_ms
            )),
        );
    }

    Ok(())
}
