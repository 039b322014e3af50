//! Markdown structure extraction.
//!
//! Uses pulldown-cmark for proper CommonMark parsing rather than regex-based
//! stripping. The event stream is walked once and folded into a flat, ordered
//! list of [`Node`]s, each tagged with its 1-based source line.
//!
//! Non-prose blocks (frontmatter, code, HTML, tables, thematic breaks) are
//! classified as [`Node::NonProse`] and their contents never reach any
//! text-bearing computation. Link reference definitions produce no parser
//! events at all, so they are excluded for free.
//!
//! Only top-level blocks become nodes: paragraphs, headings, and the text of
//! items in a top-level list. Block quotes and nested lists yield no nodes,
//! but their text still lands in [`ParsedMarkdown::prose_spans`] so it is
//! spell-checked.
//!
//! A prose span is recorded only where the source bytes are the text itself.
//! Entities and escapes such as `&nbsp;` decode to something else, so they are
//! left out of the mask rather than exposing their markup.

use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::position::PositionIndex;

/// Stand-in for inline code spans in [`Heading::masked_text`].
///
/// Chosen so it can never look like a capitalised word.
pub const CODE_PLACEHOLDER: &str = "\u{27e8}code\u{27e9}";

/// Kinds of block content that are never scored or spell-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonProseKind {
    /// YAML frontmatter delimited by `---`.
    Frontmatter,
    /// Fenced or indented code block.
    Code,
    /// Raw HTML block.
    Html,
    /// GFM table.
    Table,
    /// Thematic break (`---`, `***`).
    ThematicBreak,
}

/// A run of prose text with the line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Plain text, markup removed, trimmed.
    pub text: String,
    /// 1-based source line.
    pub line: usize,
}

/// A heading of any depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Heading depth, 1 through 6.
    pub depth: u8,
    /// Plain heading text. Inline code contributes its literal content.
    pub text: String,
    /// Heading text with every inline code span replaced by [`CODE_PLACEHOLDER`].
    pub masked_text: String,
    /// 1-based source line.
    pub line: usize,
}

/// A normalized block extracted from the parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A heading.
    Heading(Heading),
    /// A top-level paragraph.
    Paragraph(Fragment),
    /// The text of an item in a top-level list, loose or tight.
    ListItemParagraph(Fragment),
    /// Content excluded from prose analysis.
    NonProse {
        /// What kind of block it was.
        kind: NonProseKind,
        /// 1-based source line where the block starts.
        line: usize,
    },
}

/// The result of a single walk over a document.
#[derive(Debug, Clone, Default)]
pub struct ParsedMarkdown {
    /// Blocks in document order.
    pub nodes: Vec<Node>,
    /// Byte ranges of the source that hold prose text.
    pub prose_spans: Vec<Range<usize>>,
}

impl ParsedMarkdown {
    /// All headings, every depth, in document order.
    pub fn headings(&self) -> Vec<&Heading> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                Node::Heading(h) => Some(h),
                _ => None,
            })
            .collect()
    }

    /// Blank every byte of `source` that is not prose text.
    ///
    /// Newlines survive and the result has the same byte length as `source`,
    /// so offsets into the mask are offsets into the source. `source` must be
    /// the text this value was parsed from.
    pub fn prose_mask(&self, source: &str) -> String {
        let mut mask: Vec<u8> = source
            .bytes()
            .map(|b| if b == b'\n' { b'\n' } else { b' ' })
            .collect();
        for span in &self.prose_spans {
            if let Some(bytes) = source.as_bytes().get(span.clone()) {
                mask[span.clone()].copy_from_slice(bytes);
            }
        }
        // Spans sit on char boundaries and everything else is ASCII.
        String::from_utf8_lossy(&mask).into_owned()
    }
}

/// Parse `text` and return its normalized block structure.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn parse(text: &str) -> ParsedMarkdown {
    let index = PositionIndex::new(text);
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS;

    let mut walker = TreeWalker::new(text, &index);
    for (event, range) in Parser::new_ext(text, options).into_offset_iter() {
        walker.visit(event, range);
    }
    walker.finish()
}

/// Parse `text` and return only its nodes.
pub fn parse_nodes(text: &str) -> Vec<Node> {
    parse(text).nodes
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Heading(u8),
    Paragraph,
    ListItem,
}

/// A text-bearing block that is still receiving inline events.
#[derive(Debug)]
struct OpenBlock {
    kind: BlockKind,
    line: usize,
    text: String,
    masked: String,
}

struct TreeWalker<'i, 'a> {
    source: &'a str,
    index: &'i PositionIndex<'a>,
    out: ParsedMarkdown,
    open: Option<OpenBlock>,
    skipping: Option<NonProseKind>,
    list_depth: usize,
    quote_depth: usize,
    image_depth: usize,
    in_heading: bool,
}

impl<'i, 'a> TreeWalker<'i, 'a> {
    fn new(source: &'a str, index: &'i PositionIndex<'a>) -> Self {
        Self {
            source,
            index,
            out: ParsedMarkdown::default(),
            open: None,
            skipping: None,
            list_depth: 0,
            quote_depth: 0,
            image_depth: 0,
            in_heading: false,
        }
    }

    /// Headings count only at the document root.
    const fn at_root(&self) -> bool {
        self.quote_depth == 0 && self.list_depth == 0
    }

    /// Paragraphs count at the root or directly inside a top-level list.
    const fn in_fragment_scope(&self) -> bool {
        self.quote_depth == 0 && self.list_depth <= 1
    }

    fn visit(&mut self, event: Event<'_>, range: Range<usize>) {
        if self.skipping.is_some() {
            if matches!(
                event,
                Event::End(
                    TagEnd::MetadataBlock(_) | TagEnd::CodeBlock | TagEnd::HtmlBlock | TagEnd::Table
                )
            ) {
                self.skipping = None;
            }
            return;
        }

        match event {
            Event::Start(Tag::MetadataBlock(_)) => self.skip(NonProseKind::Frontmatter, &range),
            Event::Start(Tag::CodeBlock(_)) => self.skip(NonProseKind::Code, &range),
            Event::Start(Tag::HtmlBlock) => self.skip(NonProseKind::Html, &range),
            Event::Start(Tag::Table(_)) => self.skip(NonProseKind::Table, &range),
            Event::Rule => {
                self.flush();
                let line = self.index.line_of(range.start);
                self.out.nodes.push(Node::NonProse {
                    kind: NonProseKind::ThematicBreak,
                    line,
                });
            }

            Event::Start(Tag::Heading { level, .. }) => {
                self.in_heading = true;
                if self.at_root() {
                    self.open_block(BlockKind::Heading(level as u8), range.start);
                } else {
                    self.flush();
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                self.in_heading = false;
                self.flush();
            }
            Event::Start(Tag::Paragraph) if self.in_fragment_scope() => {
                let kind = if self.list_depth > 0 {
                    BlockKind::ListItem
                } else {
                    BlockKind::Paragraph
                };
                self.open_block(kind, range.start);
            }
            Event::Start(Tag::Paragraph) => self.flush(),
            Event::End(TagEnd::Paragraph | TagEnd::Item) => self.flush(),

            Event::Start(Tag::List(_)) => {
                self.flush();
                self.list_depth += 1;
            }
            Event::End(TagEnd::List(_)) => {
                self.flush();
                self.list_depth = self.list_depth.saturating_sub(1);
            }
            Event::Start(Tag::BlockQuote(_)) => {
                self.flush();
                self.quote_depth += 1;
            }
            Event::End(TagEnd::BlockQuote(_)) => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            Event::Start(Tag::Item) => self.flush(),

            Event::Start(Tag::Image { .. }) => self.image_depth += 1,
            Event::End(TagEnd::Image) => self.image_depth = self.image_depth.saturating_sub(1),

            Event::Text(t) if self.image_depth == 0 => {
                if self.source.get(range.clone()) == Some(&*t) {
                    self.out.prose_spans.push(range.clone());
                }
                if let Some(block) = self.block_for_inline(range.start) {
                    block.text.push_str(&t);
                    block.masked.push_str(&t);
                }
            }
            Event::Code(t) if self.image_depth == 0 => {
                if let Some(block) = self.block_for_inline(range.start) {
                    block.text.push_str(&t);
                    block.masked.push_str(CODE_PLACEHOLDER);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(block) = self.open.as_mut() {
                    block.text.push('\n');
                    block.masked.push('\n');
                }
            }

            // Inline HTML, footnote references, task markers and the rest
            // carry no prose.
            _ => {}
        }
    }

    fn skip(&mut self, kind: NonProseKind, range: &Range<usize>) {
        self.flush();
        let line = self.index.line_of(range.start);
        self.out.nodes.push(Node::NonProse { kind, line });
        self.skipping = Some(kind);
    }

    fn open_block(&mut self, kind: BlockKind, start: usize) {
        self.flush();
        self.open = Some(OpenBlock {
            kind,
            line: self.index.line_of(start),
            text: String::new(),
            masked: String::new(),
        });
    }

    /// The block that inline content at `start` belongs to.
    ///
    /// Tight list items carry no paragraph events, so inline content
    /// directly inside a top-level item opens an implicit list-item block.
    fn block_for_inline(&mut self, start: usize) -> Option<&mut OpenBlock> {
        if self.open.is_none() && !self.in_heading && self.list_depth == 1 && self.quote_depth == 0
        {
            self.open_block(BlockKind::ListItem, start);
        }
        self.open.as_mut()
    }

    fn flush(&mut self) {
        let Some(block) = self.open.take() else {
            return;
        };
        let text = block.text.trim().to_string();
        let node = match block.kind {
            BlockKind::Heading(depth) => Node::Heading(Heading {
                depth,
                text,
                masked_text: block.masked.trim().to_string(),
                line: block.line,
            }),
            _ if text.is_empty() => return,
            BlockKind::Paragraph => Node::Paragraph(Fragment {
                text,
                line: block.line,
            }),
            BlockKind::ListItem => Node::ListItemParagraph(Fragment {
                text,
                line: block.line,
            }),
        };
        self.out.nodes.push(node);
    }

    fn finish(mut self) -> ParsedMarkdown {
        self.flush();
        self.out
    }
}
