//! Pipeline stages for HTML-to-Word conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. a different document backend) without
//! touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ parse ──▶ build
//! (path)   (scraper)  (docx-rs)
//! ```
//!
//! 1. [`input`] — read the input file and validate its UTF-8 encoding
//! 2. [`parse`] — map the HTML markup to a flat block/inline tree
//! 3. [`build`] — emit the tree as a `.docx` package; runs under
//!    `spawn_blocking` together with parse because both are CPU-bound

pub mod build;
pub mod input;
pub mod parse;
