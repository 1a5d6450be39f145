//! Build stage: emit the block tree as a `.docx` package.
//!
//! All document serialisation is delegated to `docx-rs`; this stage only
//! maps [`DocBlock`]s onto its builder API. The package is written to an
//! in-memory cursor rather than a file so the write stage stays a separate
//! step with its own error taxonomy.

use crate::config::ConversionConfig;
use crate::error::Html2WordError;
use crate::pipeline::parse::{DocBlock, DocInline, MAX_LIST_DEPTH};
use docx_rs::{
    AbstractNumbering, BreakType, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat,
    Numbering, NumberingId, Paragraph, Run, RunFonts, SpecialIndentType, Start, Style, StyleType,
};
use std::io::Cursor;
use tracing::debug;

/// Numbering definition ids registered once per document.
const BULLET_NUM_ID: usize = 1;
const DECIMAL_NUM_ID: usize = 2;

/// Left indent per list level and hanging indent for the marker, in
/// twentieths of a point (Word's standard list geometry).
const LIST_INDENT_STEP: i32 = 720;
const LIST_HANGING: i32 = 360;

/// Heading font sizes in half-points, Heading1 through Heading6.
const HEADING_SIZES: [usize; 6] = [36, 32, 28, 26, 24, 22];

/// Serialise the document blocks into `.docx` bytes.
///
/// An empty block list produces a document with a single empty paragraph
/// so the file still opens cleanly in a word processor.
pub fn build_document(
    blocks: &[DocBlock],
    config: &ConversionConfig,
) -> Result<Vec<u8>, Html2WordError> {
    let mut docx = Docx::new()
        .default_fonts(
            RunFonts::new()
                .ascii(&config.font_family)
                .hi_ansi(&config.font_family),
        )
        .default_size(config.font_size_pt * 2);

    for (i, size) in HEADING_SIZES.iter().enumerate() {
        let id = format!("Heading{}", i + 1);
        let name = format!("Heading {}", i + 1);
        docx = docx.add_style(
            Style::new(id, StyleType::Paragraph)
                .name(name)
                .size(*size)
                .bold(),
        );
    }

    docx = docx
        .add_abstract_numbering(bullet_numbering())
        .add_numbering(Numbering::new(BULLET_NUM_ID, BULLET_NUM_ID))
        .add_abstract_numbering(decimal_numbering())
        .add_numbering(Numbering::new(DECIMAL_NUM_ID, DECIMAL_NUM_ID));

    if blocks.is_empty() {
        docx = docx.add_paragraph(Paragraph::new());
    }

    for block in blocks {
        docx = docx.add_paragraph(paragraph_for(block));
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| Html2WordError::DocumentBuildFailed {
            detail: e.to_string(),
        })?;

    let payload = cursor.into_inner();
    debug!(
        "Built document payload: {} blocks, {} bytes",
        blocks.len(),
        payload.len()
    );
    Ok(payload)
}

/// Map one block to a `docx-rs` paragraph.
fn paragraph_for(block: &DocBlock) -> Paragraph {
    match block {
        DocBlock::Paragraph { inlines } => add_runs(Paragraph::new(), inlines),
        DocBlock::Heading { level, inlines } => {
            let style_id = format!("Heading{}", (*level).clamp(1, 6));
            add_runs(Paragraph::new().style(&style_id), inlines)
        }
        DocBlock::ListItem {
            ordered,
            depth,
            inlines,
        } => {
            let num_id = if *ordered { DECIMAL_NUM_ID } else { BULLET_NUM_ID };
            add_runs(
                Paragraph::new().numbering(
                    NumberingId::new(num_id),
                    IndentLevel::new((*depth).min(MAX_LIST_DEPTH)),
                ),
                inlines,
            )
        }
    }
}

fn add_runs(mut paragraph: Paragraph, inlines: &[DocInline]) -> Paragraph {
    for inline in inlines {
        let run = match inline {
            DocInline::Text { text, style } => {
                let mut run = Run::new().add_text(text.as_str());
                if style.bold {
                    run = run.bold();
                }
                if style.italic {
                    run = run.italic();
                }
                if style.underline {
                    run = run.underline("single");
                }
                if style.strike {
                    run = run.strike();
                }
                run
            }
            DocInline::LineBreak => Run::new().add_break(BreakType::TextWrapping),
        };
        paragraph = paragraph.add_run(run);
    }
    paragraph
}

fn bullet_numbering() -> AbstractNumbering {
    let mut abstract_num = AbstractNumbering::new(BULLET_NUM_ID);
    for level in 0..=MAX_LIST_DEPTH {
        abstract_num = abstract_num.add_level(
            Level::new(
                level,
                Start::new(1),
                NumberFormat::new("bullet"),
                LevelText::new("•"),
                LevelJc::new("left"),
            )
            .indent(
                Some(LIST_INDENT_STEP * (level as i32 + 1)),
                Some(SpecialIndentType::Hanging(LIST_HANGING)),
                None,
                None,
            ),
        );
    }
    abstract_num
}

fn decimal_numbering() -> AbstractNumbering {
    let mut abstract_num = AbstractNumbering::new(DECIMAL_NUM_ID);
    for level in 0..=MAX_LIST_DEPTH {
        abstract_num = abstract_num.add_level(
            Level::new(
                level,
                Start::new(1),
                NumberFormat::new("decimal"),
                LevelText::new(format!("%{}.", level + 1)),
                LevelJc::new("left"),
            )
            .indent(
                Some(LIST_INDENT_STEP * (level as i32 + 1)),
                Some(SpecialIndentType::Hanging(LIST_HANGING)),
                None,
                None,
            ),
        );
    }
    abstract_num
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::parse::{parse_blocks, InlineStyle};

    fn build(html: &str) -> Vec<u8> {
        let blocks = parse_blocks(html);
        build_document(&blocks, &ConversionConfig::default()).expect("build must succeed")
    }

    #[test]
    fn payload_is_a_zip_package() {
        let payload = build("<p>Hello</p>");
        assert!(payload.len() > 2);
        assert_eq!(&payload[..2], b"PK");
    }

    #[test]
    fn empty_input_builds_openable_document() {
        let payload = build("");
        assert_eq!(&payload[..2], b"PK");
        let doc = docx_rs::read_docx(&payload).expect("empty document must parse");
        // One placeholder paragraph keeps the body non-degenerate.
        let paragraphs = doc
            .document
            .children
            .iter()
            .filter(|c| matches!(c, docx_rs::DocumentChild::Paragraph(_)))
            .count();
        assert_eq!(paragraphs, 1);
    }

    #[test]
    fn bold_run_round_trips() {
        let payload = build("<p>Hello</p><p><b>World</b></p>");
        let doc = docx_rs::read_docx(&payload).expect("document must parse");

        let mut bold_texts = Vec::new();
        for child in &doc.document.children {
            if let docx_rs::DocumentChild::Paragraph(p) = child {
                for pc in &p.children {
                    if let docx_rs::ParagraphChild::Run(r) = pc {
                        let bold = r.run_property.bold.is_some();
                        for rc in &r.children {
                            if let docx_rs::RunChild::Text(t) = rc {
                                if bold {
                                    bold_texts.push(t.text.clone());
                                }
                            }
                        }
                    }
                }
            }
        }
        assert_eq!(bold_texts, vec!["World".to_string()]);
    }

    #[test]
    fn list_items_carry_numbering() {
        let payload = build("<ul><li>one</li></ul><ol><li>first</li></ol>");
        let doc = docx_rs::read_docx(&payload).expect("document must parse");

        let numbered = doc
            .document
            .children
            .iter()
            .filter(|c| match c {
                docx_rs::DocumentChild::Paragraph(p) => {
                    p.has_numbering || p.property.numbering_property.is_some()
                }
                _ => false,
            })
            .count();
        assert_eq!(numbered, 2);
    }

    #[test]
    fn list_depth_is_clamped_to_known_levels() {
        // Only MAX_LIST_DEPTH numbering levels are registered; a deeper item
        // must still serialise into a parseable document.
        let blocks = vec![DocBlock::ListItem {
            ordered: true,
            depth: 50,
            inlines: vec![DocInline::Text {
                text: "deep".into(),
                style: InlineStyle::default(),
            }],
        }];
        let payload = build_document(&blocks, &ConversionConfig::default()).unwrap();
        docx_rs::read_docx(&payload).expect("clamped document must parse");
    }
}
