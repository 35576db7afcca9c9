//! Flow-block layout engine.
//!
//! A `FlowDocument` is an ordered list of blocks. Rendering wraps every
//! block into lines, stacks lines top-down on fixed-size pages (breaking
//! whenever the next line would cross the bottom margin) and serializes the
//! result with lopdf using the standard Helvetica fonts.

use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::encoding;
use crate::error::{ReportError, Result};

// ── Page geometry ─────────────────────────────────────────────────────────────

/// Page size and margins in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

/// US Letter with one-inch margins.
pub const LETTER: PageSetup = PageSetup { width: 612.0, height: 792.0, margin: 72.0 };

impl PageSetup {
    fn text_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }
}

// ── Blocks ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Normal,
    Italic,
    Small,
}

/// One unit of flow content.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Large, centered.
    Title(String),
    /// Centered, regular weight, directly under the title.
    Subtitle(String),
    /// Bold section heading.
    Heading(String),
    /// Bold `key:` followed by a regular value.
    KeyValue { key: String, value: String },
    Paragraph { text: String, style: TextStyle },
    /// Vertical gap in points.
    Spacer(f32),
}

impl Block {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into(), style: TextStyle::Normal }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into(), style: TextStyle::Italic }
    }

    pub fn small(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into(), style: TextStyle::Small }
    }

    pub fn key_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Block::KeyValue { key: key.into(), value: value.into() }
    }
}

// ── Fonts ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
    Oblique,
}

impl Font {
    const ALL: [Font; 3] = [Font::Regular, Font::Bold, Font::Oblique];

    fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold    => "F2",
            Font::Oblique => "F3",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold    => "Helvetica-Bold",
            Font::Oblique => "Helvetica-Oblique",
        }
    }

    /// Bold glyphs run a little wider than the regular metrics table.
    fn width_scale(self) -> f32 {
        match self {
            Font::Bold => 1.08,
            _          => 1.0,
        }
    }
}

fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(encoding::glyph_width(c))).sum();
    units as f32 * size / 1000.0 * font.width_scale()
}

// ── Line layout ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Run {
    font: Font,
    text: String,
}

#[derive(Debug, Clone)]
struct Line {
    runs: Vec<Run>,
    size: f32,
    leading: f32,
    centered: bool,
}

impl Line {
    fn width(&self) -> f32 {
        self.runs.iter().map(|r| text_width(&r.text, r.font, self.size)).sum()
    }

    fn is_blank(&self) -> bool {
        self.runs.iter().all(|r| r.text.is_empty())
    }
}

#[derive(Debug, Clone)]
enum Placed {
    Line(Line),
    Gap(f32),
}

/// Greedy word wrap. The first line has `first_offset` less room (used for
/// the bold key of a key/value line). Explicit newlines are hard breaks.
fn wrap_text(text: &str, font: Font, size: f32, max_width: f32, first_offset: f32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let room = |done: usize| if done == 0 { max_width - first_offset } else { max_width };

    for hard in text.lines() {
        let mut current = String::new();
        for word in hard.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if text_width(&candidate, font, size) <= room(lines.len()) {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if text_width(word, font, size) <= room(lines.len()) {
                current = word.to_string();
                continue;
            }
            // A single word wider than the line: break it between characters.
            for ch in word.chars() {
                let mut next = current.clone();
                next.push(ch);
                if !current.is_empty() && text_width(&next, font, size) > room(lines.len()) {
                    lines.push(std::mem::take(&mut current));
                    current.push(ch);
                } else {
                    current = next;
                }
            }
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn layout_block(block: &Block, setup: &PageSetup, out: &mut Vec<Placed>) {
    let max_width = setup.text_width();
    let simple = |text: &str, font: Font, size: f32, leading: f32, centered: bool, out: &mut Vec<Placed>| {
        for line in wrap_text(text, font, size, max_width, 0.0) {
            out.push(Placed::Line(Line {
                runs: vec![Run { font, text: line }],
                size,
                leading,
                centered,
            }));
        }
    };

    match block {
        Block::Title(text) => {
            simple(text, Font::Bold, 20.0, 26.0, true, out);
            out.push(Placed::Gap(4.0));
        }
        Block::Subtitle(text) => {
            simple(text, Font::Regular, 12.0, 16.0, true, out);
            out.push(Placed::Gap(12.0));
        }
        Block::Heading(text) => {
            out.push(Placed::Gap(10.0));
            simple(text, Font::Bold, 14.0, 18.0, false, out);
            out.push(Placed::Gap(4.0));
        }
        Block::KeyValue { key, value } => {
            let size = 11.0;
            let key_text = format!("{}: ", key);
            let offset = text_width(&key_text, Font::Bold, size);
            let mut key_run = Some(Run { font: Font::Bold, text: key_text });
            for line in wrap_text(value, Font::Regular, size, max_width, offset) {
                let mut runs = Vec::with_capacity(2);
                if let Some(k) = key_run.take() {
                    runs.push(k);
                }
                runs.push(Run { font: Font::Regular, text: line });
                out.push(Placed::Line(Line { runs, size, leading: 15.0, centered: false }));
            }
        }
        Block::Paragraph { text, style } => {
            let (font, size, leading) = match style {
                TextStyle::Normal => (Font::Regular, 11.0, 15.0),
                TextStyle::Italic => (Font::Oblique, 11.0, 15.0),
                TextStyle::Small  => (Font::Regular, 9.0, 12.0),
            };
            simple(text, font, size, leading, false, out);
            out.push(Placed::Gap(4.0));
        }
        Block::Spacer(height) => out.push(Placed::Gap(*height)),
    }
}

/// Stack placed items onto pages. Gaps never start a page.
fn paginate(placed: Vec<Placed>, setup: &PageSetup) -> Vec<Vec<(f32, Line)>> {
    let top = setup.height - setup.margin;
    let mut pages: Vec<Vec<(f32, Line)>> = vec![Vec::new()];
    let mut y = top;

    for item in placed {
        match item {
            Placed::Gap(h) => {
                if y < top {
                    y -= h;
                }
            }
            Placed::Line(line) => {
                if y - line.leading < setup.margin && y < top {
                    pages.push(Vec::new());
                    y = top;
                }
                y -= line.leading;
                if let Some(page) = pages.last_mut() {
                    page.push((y, line));
                }
            }
        }
    }
    pages
}

// ── Document ──────────────────────────────────────────────────────────────────

/// Ordered flow blocks plus document metadata.
#[derive(Debug, Clone)]
pub struct FlowDocument {
    pub title: String,
    pub setup: PageSetup,
    blocks: Vec<Block>,
}

impl FlowDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), setup: LETTER, blocks: Vec::new() }
    }

    pub fn push(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Lay out and serialize to PDF bytes.
    pub fn render(&self) -> Result<Vec<u8>> {
        let mut placed = Vec::new();
        for block in &self.blocks {
            layout_block(block, &self.setup, &mut placed);
        }
        let pages = paginate(placed, &self.setup);
        self.write_pdf(&pages)
    }

    fn write_pdf(&self, pages: &[Vec<(f32, Line)>]) -> Result<Vec<u8>> {
        let setup = self.setup;
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut font_dict = lopdf::Dictionary::new();
        for font in Font::ALL {
            let id = doc.add_object(dictionary! {
                "Type"     => "Font",
                "Subtype"  => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            font_dict.set(font.resource_name(), id);
        }
        let resources_id = doc.add_object(dictionary! { "Font" => font_dict });

        let total = pages.len();
        let mut kids: Vec<Object> = Vec::with_capacity(total);
        for (index, lines) in pages.iter().enumerate() {
            let mut ops = Vec::new();
            for (y, line) in lines {
                push_line_ops(&mut ops, line, *y, &setup);
            }
            if total > 1 {
                let footer = Line {
                    runs: vec![Run { font: Font::Regular, text: format!("Page {} of {}", index + 1, total) }],
                    size: 8.0,
                    leading: 10.0,
                    centered: true,
                };
                push_line_ops(&mut ops, &footer, setup.margin / 2.0, &setup);
            }
            let content = Content { operations: ops };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type"     => "Page",
                "Parent"   => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let pages_dict = dictionary! {
            "Type"      => "Pages",
            "Kids"      => kids,
            "Count"     => total as i64,
            "Resources" => resources_id,
            "MediaBox"  => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(setup.width as i64),
                Object::Integer(setup.height as i64),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id: ObjectId = doc.add_object(dictionary! {
            "Type"  => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title"        => Object::String(encoding::encode(&self.title), StringFormat::Literal),
            "Producer"     => Object::string_literal("MolecuViz"),
            "CreationDate" => Object::string_literal(Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();

        let mut buf = Vec::new();
        doc.save_to(&mut buf).map_err(ReportError::from)?;
        tracing::debug!(pages = total, bytes = buf.len(), "rendered PDF");
        Ok(buf)
    }
}

fn push_line_ops(ops: &mut Vec<Operation>, line: &Line, y: f32, setup: &PageSetup) {
    if line.is_blank() {
        return;
    }
    let x = if line.centered {
        ((setup.width - line.width()) / 2.0).max(setup.margin)
    } else {
        setup.margin
    };
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    for run in &line.runs {
        if run.text.is_empty() {
            continue;
        }
        ops.push(Operation::new("Tf", vec![run.font.resource_name().into(), line.size.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(encoding::encode(&run.text), StringFormat::Literal)],
        ));
    }
    ops.push(Operation::new("ET", vec![]));
}

// ── Text extraction ───────────────────────────────────────────────────────────

/// Text shown on each page, one line per text object. Only understands the
/// `Tj` strings this module writes; it is not a general PDF text extractor.
pub fn extract_pages(pdf: &[u8]) -> Result<Vec<String>> {
    let doc = Document::load_mem(pdf)?;
    let mut pages = Vec::new();
    for (_, page_id) in doc.get_pages() {
        let data = doc.get_page_content(page_id)?;
        let content = Content::decode(&data)?;
        let mut text = String::new();
        for op in &content.operations {
            match op.operator.as_str() {
                "Tj" => {
                    for operand in &op.operands {
                        if let Object::String(bytes, _) = operand {
                            text.push_str(&encoding::decode(bytes));
                        }
                    }
                }
                "ET" => text.push('\n'),
                _ => {}
            }
        }
        pages.push(text);
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_width() {
        let text = "Water is a polar molecule with a bent geometry and a bond angle of 104.5 degrees.";
        let lines = wrap_text(text, Font::Regular, 11.0, 120.0, 0.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, Font::Regular, 11.0) <= 120.0, "{line} too wide");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_keeps_hard_breaks() {
        let lines = wrap_text("1. Geometry\n2. Polarity", Font::Regular, 11.0, 468.0, 0.0);
        assert_eq!(lines, vec!["1. Geometry", "2. Polarity"]);
    }

    #[test]
    fn test_wrap_splits_overlong_word() {
        let word = "C".repeat(200);
        let lines = wrap_text(&word, Font::Regular, 11.0, 100.0, 0.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_wrap_empty_text_yields_one_blank_line() {
        assert_eq!(wrap_text("", Font::Regular, 11.0, 100.0, 0.0), vec![String::new()]);
    }

    #[test]
    fn test_render_single_page_roundtrip_text() {
        let mut doc = FlowDocument::new("Test");
        doc.push(Block::Title("Hello Report".into()))
            .push(Block::key_value("Polarity", "Polar"))
            .push(Block::italic("What is water?"));
        let bytes = doc.render().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let pages = extract_pages(&bytes).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains("Hello Report"));
        assert!(pages[0].contains("Polarity: Polar"));
        assert!(pages[0].contains("What is water?"));
    }

    #[test]
    fn test_long_content_breaks_pages() {
        let mut doc = FlowDocument::new("Long");
        for i in 0..120 {
            doc.push(Block::paragraph(format!("Paragraph number {}", i)));
        }
        let pages = extract_pages(&doc.render().unwrap()).unwrap();
        assert!(pages.len() > 1);
        assert!(pages[0].contains("Paragraph number 0"));
        assert!(pages.last().unwrap().contains("Paragraph number 119"));
        assert!(pages[0].contains("Page 1 of"));
    }

    #[test]
    fn test_gap_never_starts_a_page() {
        let setup = LETTER;
        let placed = vec![
            Placed::Gap(500.0),
            Placed::Line(Line {
                runs: vec![Run { font: Font::Regular, text: "x".into() }],
                size: 11.0,
                leading: 15.0,
                centered: false,
            }),
        ];
        let pages = paginate(placed, &setup);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0][0].0, setup.height - setup.margin - 15.0);
    }
}
