//! Document sink — the capability surface renderers write through.
//!
//! `DocumentSink` keeps the section renderers free of OOXML types: they
//! emit headings, paragraphs (as runs), and bullets, and the sink decides
//! how those land in the container. `DocxSink` is the production
//! implementation over docx-rs; tests use the recording `MemorySink`.

use std::path::{Path, PathBuf};

use docx_rs::{
    AbstractNumbering, AlignmentType, Docx, Hyperlink, HyperlinkType, IndentLevel, Level,
    LevelJc, LevelText, LineSpacing, NumberFormat, Numbering, NumberingId, PageMargin,
    Paragraph, Run, RunFonts, SpecialIndentType, Start,
};

use crate::errors::CvError;
use crate::style::StyleConfig;

/// One run inside a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Bold(String),
    Link {
        text: String,
        url: String,
        bold: bool,
    },
}

impl Inline {
    pub fn text(s: impl Into<String>) -> Self {
        Inline::Text(s.into())
    }

    pub fn bold(s: impl Into<String>) -> Self {
        Inline::Bold(s.into())
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Inline::Link {
            text: text.into(),
            url: url.into(),
            bold: false,
        }
    }

    pub fn bold_link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Inline::Link {
            text: text.into(),
            url: url.into(),
            bold: true,
        }
    }
}

/// Per-paragraph layout options. `space_after` overrides the configured
/// after-spacing (points) for block-final paragraphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParaOpts {
    pub centered: bool,
    pub space_after: Option<f64>,
}

impl ParaOpts {
    pub fn centered() -> Self {
        ParaOpts {
            centered: true,
            ..ParaOpts::default()
        }
    }

    pub fn block_end() -> Self {
        ParaOpts {
            space_after: Some(3.0),
            ..ParaOpts::default()
        }
    }
}

/// The capability surface consumed by every section renderer.
pub trait DocumentSink {
    /// The document's name header (centered, name font size).
    fn name_header(&mut self, text: &str);
    /// A section heading (bold, heading font size).
    fn section_heading(&mut self, text: &str);
    /// A body paragraph assembled from runs.
    fn paragraph(&mut self, runs: &[Inline], opts: ParaOpts);
    /// A single bulleted line.
    fn bullet(&mut self, text: &str);
}

// ────────────────────────────────────────────────────────────────────────────
// DOCX sink
// ────────────────────────────────────────────────────────────────────────────

const BULLET_NUMBERING_ID: usize = 1;

const MM_PER_INCH: f64 = 25.4;
const TWIPS_PER_INCH: f64 = 1440.0;

fn mm_to_twips(mm: f64) -> i32 {
    (mm * TWIPS_PER_INCH / MM_PER_INCH).round() as i32
}

fn cm_to_twips(cm: f64) -> i32 {
    mm_to_twips(cm * 10.0)
}

fn pt_to_half_points(pt: f64) -> usize {
    (pt * 2.0).round() as usize
}

fn pt_to_twentieths(pt: f64) -> u32 {
    (pt * 20.0).round() as u32
}

/// Builds the output document via docx-rs, applying the resolved style.
///
/// Document-wide settings (margins, default font and size, the bullet
/// numbering definition) are applied once at construction; per-paragraph
/// formatting comes from the same immutable `StyleConfig`.
pub struct DocxSink {
    docx: Docx,
    style: StyleConfig,
}

impl DocxSink {
    pub fn new(style: &StyleConfig) -> Self {
        let margins = &style.margins;
        let docx = Docx::new()
            .page_margin(
                PageMargin::new()
                    .top(mm_to_twips(margins.top))
                    .bottom(mm_to_twips(margins.bottom))
                    .left(mm_to_twips(margins.left))
                    .right(mm_to_twips(margins.right)),
            )
            .default_fonts(RunFonts::new().ascii(&style.font_name))
            .default_size(pt_to_half_points(style.font_size))
            .add_abstract_numbering(
                AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(Level::new(
                    0,
                    Start::new(1),
                    NumberFormat::new("bullet"),
                    LevelText::new("•"),
                    LevelJc::new("left"),
                )),
            )
            .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID));

        DocxSink {
            docx,
            style: style.clone(),
        }
    }

    /// Packs the document into a temp file next to `path` and atomically
    /// persists it, so a failed pack never leaves a partial output file.
    pub fn save(mut self, path: &Path) -> Result<(), CvError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        let packed = std::mem::take(&mut self.docx).build();
        packed
            .pack(tmp.as_file_mut())
            .map_err(|e| CvError::Docx(e.to_string()))?;
        tmp.persist(path).map_err(|e| CvError::Io(e.error))?;
        Ok(())
    }

    fn run(&self, text: &str, bold: bool, size_pt: f64) -> Run {
        let mut run = Run::new()
            .add_text(text)
            .size(pt_to_half_points(size_pt))
            .fonts(RunFonts::new().ascii(&self.style.font_name));
        if bold {
            run = run.bold();
        }
        run
    }

    fn spacing(&self, before_pt: f64, after_pt: f64, line: f64) -> LineSpacing {
        LineSpacing::new()
            .before(pt_to_twentieths(before_pt))
            .after(pt_to_twentieths(after_pt))
            .line((line * 240.0).round() as i32)
    }

    fn push(&mut self, paragraph: Paragraph) {
        self.docx = std::mem::take(&mut self.docx).add_paragraph(paragraph);
    }
}

impl DocumentSink for DocxSink {
    fn name_header(&mut self, text: &str) {
        let run = self.run(text, true, self.style.name_font_size);
        let paragraph = Paragraph::new()
            .add_run(run)
            .align(AlignmentType::Center)
            .line_spacing(self.spacing(
                self.style.paragraph_spacing.before,
                3.0,
                self.style.paragraph_spacing.line_spacing,
            ));
        self.push(paragraph);
    }

    fn section_heading(&mut self, text: &str) {
        let run = self.run(text, true, self.style.heading_font_size);
        let paragraph = Paragraph::new()
            .add_run(run)
            .line_spacing(self.spacing(3.0, 2.0, self.style.paragraph_spacing.line_spacing));
        self.push(paragraph);
    }

    fn paragraph(&mut self, runs: &[Inline], opts: ParaOpts) {
        let size = self.style.font_size;
        let mut paragraph = Paragraph::new();
        for inline in runs {
            paragraph = match inline {
                Inline::Text(text) => paragraph.add_run(self.run(text, false, size)),
                Inline::Bold(text) => paragraph.add_run(self.run(text, true, size)),
                Inline::Link { text, url, bold } => paragraph.add_hyperlink(
                    Hyperlink::new(url, HyperlinkType::External)
                        .add_run(self.run(text, *bold, size).underline("single")),
                ),
            };
        }
        if opts.centered {
            paragraph = paragraph.align(AlignmentType::Center);
        }
        let after = opts.space_after.unwrap_or(self.style.paragraph_spacing.after);
        let paragraph = paragraph.line_spacing(self.spacing(
            self.style.paragraph_spacing.before,
            after,
            self.style.paragraph_spacing.line_spacing,
        ));
        self.push(paragraph);
    }

    fn bullet(&mut self, text: &str) {
        let bullets = &self.style.bullet_style;
        let left = cm_to_twips(bullets.left_indent);
        let special = if bullets.first_line_indent < 0.0 {
            SpecialIndentType::Hanging(cm_to_twips(-bullets.first_line_indent))
        } else {
            SpecialIndentType::FirstLine(cm_to_twips(bullets.first_line_indent))
        };
        let run = self.run(text, false, self.style.font_size);
        let paragraph = Paragraph::new()
            .add_run(run)
            .numbering(
                NumberingId::new(BULLET_NUMBERING_ID),
                IndentLevel::new(0),
            )
            .indent(Some(left), Some(special), None, None)
            .line_spacing(self.spacing(
                bullets.space_before,
                bullets.space_after,
                bullets.line_spacing,
            ));
        self.push(paragraph);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Recording sink for tests
// ────────────────────────────────────────────────────────────────────────────

/// Records every sink call as plain text so tests can assert on content
/// without unzipping a DOCX container.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySink {
    pub headings: Vec<String>,
    pub lines: Vec<String>,
}

#[cfg(test)]
impl MemorySink {
    pub fn new() -> Self {
        MemorySink::default()
    }

    /// All emitted text, one block per line.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
impl DocumentSink for MemorySink {
    fn name_header(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn section_heading(&mut self, text: &str) {
        self.headings.push(text.to_string());
        self.lines.push(text.to_string());
    }

    fn paragraph(&mut self, runs: &[Inline], _opts: ParaOpts) {
        let flat: String = runs
            .iter()
            .map(|inline| match inline {
                Inline::Text(t) | Inline::Bold(t) => t.as_str(),
                Inline::Link { text, .. } => text.as_str(),
            })
            .collect();
        self.lines.push(flat);
    }

    fn bullet(&mut self, text: &str) {
        self.lines.push(format!("• {text}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversions() {
        assert_eq!(mm_to_twips(25.4), 1440);
        assert_eq!(cm_to_twips(2.54), 1440);
        assert_eq!(pt_to_half_points(11.0), 22);
        assert_eq!(pt_to_twentieths(3.0), 60);
    }

    #[test]
    fn test_memory_sink_flattens_runs() {
        let mut sink = MemorySink::new();
        sink.paragraph(
            &[
                Inline::bold("Rustacean"),
                Inline::text(" | "),
                Inline::link("example.com", "https://example.com"),
            ],
            ParaOpts::default(),
        );
        assert_eq!(sink.text(), "Rustacean | example.com");
    }
}
