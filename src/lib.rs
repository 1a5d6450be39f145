//! # html2word
//!
//! Convert HTML documents to Word (`.docx`) files.
//!
//! ## Why this crate?
//!
//! Pasting HTML into a word processor loses structure, and driving Word
//! itself requires Word. This crate maps HTML markup — paragraphs,
//! headings, lists, and basic character formatting — onto a native
//! `.docx` package that any word-processing software opens with the
//! structure intact. Parsing is delegated to html5ever (via `scraper`)
//! and document serialisation to `docx-rs`; the crate itself is the thin
//! pipeline between them.
//!
//! ## Pipeline Overview
//!
//! ```text
//! HTML file
//!  │
//!  ├─ 1. Read     load the input file, validate UTF-8
//!  ├─ 2. Parse    HTML → block/inline tree (scraper)
//!  ├─ 3. Build    tree → .docx package bytes (docx-rs)
//!  └─ 4. Write    persist the payload atomically
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use html2word::{convert_to_file, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let stats = convert_to_file("./1.html", "./2.docx", &config).await?;
//!     eprintln!("{} blocks, {} bytes written", stats.total_blocks(), stats.output_bytes);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `html2word` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! html2word = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, convert_html, convert_sync, convert_to_file};
pub use error::Html2WordError;
pub use output::{ConversionOutput, ConversionStats};
