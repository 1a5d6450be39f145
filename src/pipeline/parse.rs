//! Parse stage: map HTML markup to a flat block/inline tree.
//!
//! ## Why an intermediate tree?
//!
//! The HTML node soup and the Word document model disagree about nesting:
//! HTML formats text by wrapping it in arbitrarily deep inline elements,
//! while a `.docx` body is a flat list of paragraphs whose runs each carry
//! their own complete set of character properties. Flattening into
//! [`DocBlock`]s with styled [`DocInline`] runs up front keeps the build
//! stage a straight mapping with no tree-walking of its own.
//!
//! html5ever (via `scraper`) is error-tolerant: malformed markup is
//! repaired into a tree rather than rejected, so this stage cannot fail —
//! garbage degrades to best-effort structure, matching what word
//! processors themselves do with broken HTML.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

/// Deepest list nesting the document model distinguishes; deeper lists
/// clamp to this level.
pub const MAX_LIST_DEPTH: usize = 8;

/// A block-level element of the document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocBlock {
    /// A plain paragraph (`<p>`, `<blockquote>`, or stray body text).
    Paragraph { inlines: Vec<DocInline> },
    /// A heading, `<h1>`–`<h6>`.
    Heading { level: u8, inlines: Vec<DocInline> },
    /// One `<li>`; `depth` counts enclosing lists above the outermost.
    ListItem {
        ordered: bool,
        depth: usize,
        inlines: Vec<DocInline>,
    },
}

impl DocBlock {
    pub fn inlines(&self) -> &[DocInline] {
        match self {
            DocBlock::Paragraph { inlines }
            | DocBlock::Heading { inlines, .. }
            | DocBlock::ListItem { inlines, .. } => inlines,
        }
    }
}

/// Inline content of a block: a styled text run or an explicit line break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocInline {
    Text { text: String, style: InlineStyle },
    LineBreak,
}

/// Character formatting accumulated from enclosing inline elements.
///
/// Styles combine: `<b><i>x</i></b>` yields a run that is both bold and
/// italic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
}

impl InlineStyle {
    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
    fn underline(mut self) -> Self {
        self.underline = true;
        self
    }
    fn strike(mut self) -> Self {
        self.strike = true;
        self
    }
}

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\r\n\x0C]+").unwrap());

static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());

/// Parse HTML text into document blocks.
///
/// An empty or whitespace-only input yields an empty block list; the build
/// stage turns that into a valid empty-bodied document.
pub fn parse_blocks(html: &str) -> Vec<DocBlock> {
    let doc = Html::parse_document(html);
    let mut blocks = Vec::new();
    if let Some(body) = doc.select(&BODY_SELECTOR).next() {
        walk_container(body, &mut blocks);
    }
    blocks
}

/// Walk the children of a block container, emitting blocks.
///
/// Stray text and inline elements directly under the container accumulate
/// into an implicit paragraph that is flushed when the next block element
/// starts.
fn walk_container(el: ElementRef<'_>, blocks: &mut Vec<DocBlock>) {
    let mut pending: Vec<DocInline> = Vec::new();

    for child in el.children() {
        match child.value() {
            Node::Text(t) => push_text(&mut pending, &t.text, InlineStyle::default()),
            Node::Element(_) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                match child_el.value().name() {
                    "p" | "blockquote" => {
                        flush_pending(&mut pending, blocks);
                        let mut inlines = Vec::new();
                        collect_inlines(child_el, InlineStyle::default(), &mut inlines);
                        // An explicit empty <p> stays: it renders as a blank line.
                        blocks.push(DocBlock::Paragraph {
                            inlines: tidy_inlines(inlines),
                        });
                    }
                    "div" | "section" | "article" | "main" => {
                        flush_pending(&mut pending, blocks);
                        walk_container(child_el, blocks);
                    }
                    "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                        flush_pending(&mut pending, blocks);
                        let level = heading_level(child_el.value().name());
                        let mut inlines = Vec::new();
                        collect_inlines(child_el, InlineStyle::default(), &mut inlines);
                        let inlines = tidy_inlines(inlines);
                        if !inlines.is_empty() {
                            blocks.push(DocBlock::Heading { level, inlines });
                        }
                    }
                    "ul" => {
                        flush_pending(&mut pending, blocks);
                        walk_list(child_el, 0, false, blocks);
                    }
                    "ol" => {
                        flush_pending(&mut pending, blocks);
                        walk_list(child_el, 0, true, blocks);
                    }
                    "head" | "title" | "meta" | "link" => {}
                    _ => collect_inline_element(child_el, InlineStyle::default(), &mut pending),
                }
            }
            _ => {}
        }
    }

    flush_pending(&mut pending, blocks);
}

/// Flush accumulated stray inline content as an implicit paragraph.
fn flush_pending(pending: &mut Vec<DocInline>, blocks: &mut Vec<DocBlock>) {
    if pending.is_empty() {
        return;
    }
    let inlines = tidy_inlines(std::mem::take(pending));
    if !inlines.is_empty() {
        blocks.push(DocBlock::Paragraph { inlines });
    }
}

/// Walk a `<ul>`/`<ol>`, emitting one [`DocBlock::ListItem`] per `<li>`.
/// Nested lists inside an item recurse with `depth + 1`.
fn walk_list(el: ElementRef<'_>, depth: usize, ordered: bool, blocks: &mut Vec<DocBlock>) {
    let depth = depth.min(MAX_LIST_DEPTH);

    for child in el.children() {
        let Some(li) = ElementRef::wrap(child) else {
            continue;
        };
        if li.value().name() != "li" {
            continue;
        }

        let mut inlines: Vec<DocInline> = Vec::new();
        let mut nested: Vec<(ElementRef<'_>, bool)> = Vec::new();

        for part in li.children() {
            match part.value() {
                Node::Text(t) => push_text(&mut inlines, &t.text, InlineStyle::default()),
                Node::Element(_) => {
                    let Some(part_el) = ElementRef::wrap(part) else {
                        continue;
                    };
                    match part_el.value().name() {
                        "ul" => nested.push((part_el, false)),
                        "ol" => nested.push((part_el, true)),
                        _ => {
                            collect_inline_element(part_el, InlineStyle::default(), &mut inlines)
                        }
                    }
                }
                _ => {}
            }
        }

        let inlines = tidy_inlines(inlines);
        if !inlines.is_empty() {
            blocks.push(DocBlock::ListItem {
                ordered,
                depth,
                inlines,
            });
        }

        for (sub, sub_ordered) in nested {
            walk_list(sub, depth + 1, sub_ordered, blocks);
        }
    }
}

/// Gather the inline content of an element, combining styles from nested
/// formatting tags. Unknown inline tags are transparent: their children
/// keep the current style.
fn collect_inlines(el: ElementRef<'_>, style: InlineStyle, out: &mut Vec<DocInline>) {
    for child in el.children() {
        match child.value() {
            Node::Text(t) => push_text(out, &t.text, style),
            Node::Element(_) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                collect_inline_element(child_el, style, out);
            }
            _ => {}
        }
    }
}

/// Dispatch on a single inline element's tag: formatting tags adjust the
/// style for their subtree, `<br>` emits a break, everything else is
/// transparent.
fn collect_inline_element(el: ElementRef<'_>, style: InlineStyle, out: &mut Vec<DocInline>) {
    match el.value().name() {
        "b" | "strong" => collect_inlines(el, style.bold(), out),
        "i" | "em" => collect_inlines(el, style.italic(), out),
        "u" | "ins" => collect_inlines(el, style.underline(), out),
        "s" | "strike" | "del" => collect_inlines(el, style.strike(), out),
        "br" => out.push(DocInline::LineBreak),
        "script" | "style" => {}
        _ => collect_inlines(el, style, out),
    }
}

/// Append a text node, collapsing whitespace runs to single spaces per
/// HTML text semantics. Edge trimming happens later in [`tidy_inlines`]
/// because a boundary space is only redundant once its neighbours are
/// known.
fn push_text(out: &mut Vec<DocInline>, raw: &str, style: InlineStyle) {
    let text = RE_WHITESPACE.replace_all(raw, " ");
    if text.is_empty() {
        return;
    }
    out.push(DocInline::Text {
        text: text.into_owned(),
        style,
    });
}

/// Normalise a block's inline run: merge adjacent same-style text, drop
/// duplicate spaces across run boundaries, trim spaces at the block edges
/// and around explicit line breaks.
fn tidy_inlines(items: Vec<DocInline>) -> Vec<DocInline> {
    // Pass 1: merge adjacent text runs that share a style.
    let mut merged: Vec<DocInline> = Vec::with_capacity(items.len());
    for item in items {
        match item {
            DocInline::Text { text, style } => {
                if let Some(DocInline::Text {
                    text: prev,
                    style: prev_style,
                }) = merged.last_mut()
                {
                    if *prev_style == style {
                        prev.push_str(&text);
                        continue;
                    }
                }
                merged.push(DocInline::Text { text, style });
            }
            other => merged.push(other),
        }
    }

    // Pass 2: spaces doubled across source-node boundaries, and spaces at
    // the block start or after a line break, are not rendered by HTML.
    let mut tidy: Vec<DocInline> = Vec::with_capacity(merged.len());
    for item in merged {
        match item {
            DocInline::Text { text, style } => {
                let mut text = text;
                while text.contains("  ") {
                    text = text.replace("  ", " ");
                }
                let after_space = match tidy.last() {
                    None | Some(DocInline::LineBreak) => true,
                    Some(DocInline::Text { text: prev, .. }) => prev.ends_with(' '),
                };
                if after_space {
                    text = text.trim_start_matches(' ').to_string();
                }
                if text.is_empty() {
                    continue;
                }
                tidy.push(DocInline::Text { text, style });
            }
            DocInline::LineBreak => {
                trim_trailing_space(&mut tidy);
                tidy.push(DocInline::LineBreak);
            }
        }
    }

    trim_trailing_space(&mut tidy);
    tidy
}

fn trim_trailing_space(items: &mut Vec<DocInline>) {
    if let Some(DocInline::Text { text, .. }) = items.last_mut() {
        while text.ends_with(' ') {
            text.pop();
        }
    }
    if matches!(items.last(), Some(DocInline::Text { text, .. }) if text.is_empty()) {
        items.pop();
    }
}

fn heading_level(tag: &str) -> u8 {
    tag.as_bytes()
        .get(1)
        .map(|b| b.saturating_sub(b'0'))
        .unwrap_or(1)
        .clamp(1, 6)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(block: &DocBlock) -> String {
        block
            .inlines()
            .iter()
            .map(|i| match i {
                DocInline::Text { text, .. } => text.as_str(),
                DocInline::LineBreak => "\n",
            })
            .collect()
    }

    #[test]
    fn two_paragraphs_second_bold() {
        let blocks = parse_blocks("<p>Hello</p><p><b>World</b></p>");
        assert_eq!(blocks.len(), 2);
        assert_eq!(text_of(&blocks[0]), "Hello");
        match &blocks[1] {
            DocBlock::Paragraph { inlines } => {
                assert_eq!(inlines.len(), 1);
                match &inlines[0] {
                    DocInline::Text { text, style } => {
                        assert_eq!(text, "World");
                        assert!(style.bold);
                        assert!(!style.italic);
                    }
                    other => panic!("expected text run, got {other:?}"),
                }
            }
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_yields_no_blocks() {
        assert!(parse_blocks("").is_empty());
        assert!(parse_blocks("   \n\t  ").is_empty());
    }

    #[test]
    fn full_document_wrapper_is_transparent() {
        let blocks =
            parse_blocks("<html><head><title>T</title></head><body><p>body text</p></body></html>");
        assert_eq!(blocks.len(), 1);
        assert_eq!(text_of(&blocks[0]), "body text");
    }

    #[test]
    fn nested_styles_combine() {
        let blocks = parse_blocks("<p><b>bold <i>both</i></b> plain</p>");
        let inlines = blocks[0].inlines();
        assert_eq!(inlines.len(), 3);
        let styles: Vec<InlineStyle> = inlines
            .iter()
            .map(|i| match i {
                DocInline::Text { style, .. } => *style,
                DocInline::LineBreak => panic!("unexpected break"),
            })
            .collect();
        assert!(styles[0].bold && !styles[0].italic);
        assert!(styles[1].bold && styles[1].italic);
        assert!(!styles[2].bold && !styles[2].italic);
        assert_eq!(text_of(&blocks[0]), "bold both plain");
    }

    #[test]
    fn whitespace_collapses() {
        let blocks = parse_blocks("<p>  a \n\n  b\t c  </p>");
        assert_eq!(text_of(&blocks[0]), "a b c");
    }

    #[test]
    fn space_between_inline_elements_survives() {
        let blocks = parse_blocks("<p><b>a</b> <i>b</i></p>");
        assert_eq!(text_of(&blocks[0]), "a b");
    }

    #[test]
    fn headings_carry_level() {
        let blocks = parse_blocks("<h1>One</h1><h3>Three</h3><h6>Six</h6>");
        let levels: Vec<u8> = blocks
            .iter()
            .map(|b| match b {
                DocBlock::Heading { level, .. } => *level,
                other => panic!("expected heading, got {other:?}"),
            })
            .collect();
        assert_eq!(levels, vec![1, 3, 6]);
    }

    #[test]
    fn unordered_list_items() {
        let blocks = parse_blocks("<ul><li>one</li><li>two</li></ul>");
        assert_eq!(blocks.len(), 2);
        for block in &blocks {
            match block {
                DocBlock::ListItem { ordered, depth, .. } => {
                    assert!(!ordered);
                    assert_eq!(*depth, 0);
                }
                other => panic!("expected list item, got {other:?}"),
            }
        }
    }

    #[test]
    fn nested_list_increases_depth() {
        let blocks =
            parse_blocks("<ol><li>outer<ul><li>inner</li></ul></li><li>second</li></ol>");
        assert_eq!(blocks.len(), 3);
        assert!(matches!(
            &blocks[0],
            DocBlock::ListItem { ordered: true, depth: 0, .. }
        ));
        assert!(matches!(
            &blocks[1],
            DocBlock::ListItem { ordered: false, depth: 1, .. }
        ));
        assert_eq!(text_of(&blocks[1]), "inner");
        assert!(matches!(
            &blocks[2],
            DocBlock::ListItem { ordered: true, depth: 0, .. }
        ));
    }

    #[test]
    fn br_becomes_line_break() {
        let blocks = parse_blocks("<p>first<br>second</p>");
        let inlines = blocks[0].inlines();
        assert_eq!(inlines.len(), 3);
        assert!(matches!(inlines[1], DocInline::LineBreak));
    }

    #[test]
    fn script_and_style_are_skipped() {
        let blocks = parse_blocks(
            "<p>visible</p><script>alert('x')</script><style>p { color: red }</style>",
        );
        assert_eq!(blocks.len(), 1);
        assert_eq!(text_of(&blocks[0]), "visible");
    }

    #[test]
    fn stray_body_text_becomes_paragraph() {
        let blocks = parse_blocks("just some text");
        assert_eq!(blocks.len(), 1);
        assert!(matches!(&blocks[0], DocBlock::Paragraph { .. }));
        assert_eq!(text_of(&blocks[0]), "just some text");
    }

    #[test]
    fn explicit_empty_paragraph_is_kept() {
        let blocks = parse_blocks("<p>a</p><p></p><p>b</p>");
        assert_eq!(blocks.len(), 3);
        assert!(blocks[1].inlines().is_empty());
    }

    #[test]
    fn div_is_a_container() {
        let blocks = parse_blocks("<div><p>inner</p>tail</div>");
        assert_eq!(blocks.len(), 2);
        assert_eq!(text_of(&blocks[0]), "inner");
        assert_eq!(text_of(&blocks[1]), "tail");
    }

    #[test]
    fn unknown_inline_tag_is_transparent() {
        let blocks = parse_blocks("<p><span>a <code>b</code></span></p>");
        assert_eq!(text_of(&blocks[0]), "a b");
    }

    #[test]
    fn styled_element_directly_under_body_keeps_style() {
        let blocks = parse_blocks("plain <b>bold</b> tail");
        assert_eq!(blocks.len(), 1);
        let inlines = blocks[0].inlines();
        assert_eq!(inlines.len(), 3);
        assert!(matches!(
            &inlines[1],
            DocInline::Text { style, .. } if style.bold
        ));
    }

    #[test]
    fn styled_list_item_keeps_style() {
        let blocks = parse_blocks("<ul><li><b>bold item</b></li></ul>");
        assert_eq!(blocks.len(), 1);
        assert!(matches!(
            &blocks[0].inlines()[0],
            DocInline::Text { style, .. } if style.bold
        ));
    }

    #[test]
    fn malformed_markup_degrades_gracefully() {
        // Unclosed tags: html5ever repairs, no panic, best-effort blocks.
        let blocks = parse_blocks("<p>open <b>bold<p>next");
        assert!(!blocks.is_empty());
    }
}
