//! PDF export via `printpdf`
//!
//! A4 portrait, Helvetica builtin fonts. Layout positions are measured in mm
//! from the TOP of the page and converted to printpdf's bottom-left origin
//! when drawn.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex,
    PdfLayerReference, PdfPageIndex, Rgb,
};

use crate::error::{Result, SoilError};
use crate::report::sections::{schedule_title, summary_lines};
use crate::report::SoilReport;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const INDENT: f32 = MARGIN + 5.0;
const TOP: f32 = 20.0;
const LINE_HEIGHT: f32 = 6.0;
const SECTION_GAP: f32 = 8.0;
const PHASE_GAP: f32 = 3.0;

// Start a new page before drawing below these positions
const BODY_LIMIT: f32 = 270.0;
const CROPS_HEADER_LIMIT: f32 = 250.0;
const SCHEDULE_HEADER_LIMIT: f32 = 240.0;

const WRAP_CHARS: usize = 85;

const REPORT_TITLE: &str = "Comprehensive Soil Analysis Report";

#[derive(Clone, Copy)]
struct Style {
    size: f32,
    rgb: (u8, u8, u8),
    bold: bool,
}

const TITLE: Style = Style { size: 22.0, rgb: (40, 40, 40), bold: true };
const SUBTITLE: Style = Style { size: 12.0, rgb: (100, 100, 100), bold: false };
const HEADING: Style = Style { size: 16.0, rgb: (0, 102, 204), bold: true };
const BODY: Style = Style { size: 11.0, rgb: (60, 60, 60), bold: false };
const BODY_BOLD: Style = Style { bold: true, ..BODY };
const FOOTER: Style = Style { size: 9.0, rgb: (150, 150, 150), bold: false };

/// Rendered PDF plus its download name.
#[derive(Debug, Clone)]
pub struct PdfExport {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub pages: usize,
}

impl PdfExport {
    /// Write into `dir` (created if missing) and return the full path.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// `soil-report-<name>.pdf`, every character outside [A-Za-z0-9] becoming '-'.
pub fn report_filename(location_name: &str) -> String {
    let safe: String = location_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("soil-report-{}.pdf", safe)
}

pub fn export_pdf(report: &SoilReport) -> Result<PdfExport> {
    let mut w = PageWriter::new(REPORT_TITLE)?;

    // Header
    w.centered(REPORT_TITLE, TITLE, w.y);
    w.centered(&format!("Location: {}", report.location.display_name), SUBTITLE, w.y + 12.0);
    w.centered(
        &format!("Generated: {}", report.generated_on.format("%Y-%m-%d")),
        SUBTITLE,
        w.y + 18.0,
    );
    w.y += 32.0;

    // 1. Summary
    w.heading("1. SOIL SUMMARY");
    for line in summary_lines(report) {
        w.line(&line, BODY, MARGIN);
    }
    if report.is_estimated() {
        w.line(&format!("Data source: {}", report.source.label()), BODY, MARGIN);
    }
    w.y += SECTION_GAP;

    // 2. Amendments
    w.heading("2. RECOMMENDED SOIL AMENDMENTS");
    for (i, amendment) in report.amendments.iter().enumerate() {
        for line in wrap_text(&format!("{}. {}", i + 1, amendment.action), WRAP_CHARS) {
            w.line(&line, BODY, MARGIN);
        }
    }
    w.y += SECTION_GAP;

    // 3. Crops
    w.break_below(CROPS_HEADER_LIMIT);
    w.heading("3. RECOMMENDED CROPS");
    w.line("Based on your soil conditions, we recommend:", BODY, MARGIN);
    for (i, c) in report.recommended_crops.iter().enumerate() {
        w.line(&format!("{}. {}", i + 1, c.crop), BODY, INDENT);
    }
    w.y += SECTION_GAP;

    // 4. Schedule
    w.break_below(SCHEDULE_HEADER_LIMIT);
    w.heading(&schedule_title(report));
    for (title, text) in report.schedule.phases() {
        w.line(&format!("{}:", title), BODY_BOLD, MARGIN);
        for line in wrap_text(text, WRAP_CHARS - 3) {
            w.line(&line, BODY, INDENT);
        }
        w.y += PHASE_GAP;
    }

    let pages = w.page_count();
    let bytes = w.finish()?;

    tracing::info!(
        location = %report.location.display_name,
        pages,
        bytes = bytes.len(),
        "Rendered PDF report"
    );

    Ok(PdfExport {
        filename: report_filename(&report.location.display_name),
        bytes,
        pages,
    })
}

// ============================================================================
// Layout engine
// ============================================================================

struct PageWriter {
    doc: PdfDocumentReference,
    pages: Vec<(PdfPageIndex, PdfLayerIndex)>,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Next baseline, mm from the top of the page
    y: f32,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| SoilError::Pdf(format!("font error: {e}")))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| SoilError::Pdf(format!("font error: {e}")))?;
        let layer_ref = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            pages: vec![(page, layer)],
            layer: layer_ref,
            regular,
            bold,
            y: TOP,
        })
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.pages.push((page, layer));
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = TOP;
    }

    fn break_below(&mut self, limit: f32) {
        if self.y > limit {
            self.new_page();
        }
    }

    fn draw(
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        text: &str,
        style: Style,
        x: f32,
        y: f32,
    ) {
        let (r, g, b) = style.rgb;
        layer.set_fill_color(Color::Rgb(Rgb::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            None,
        )));
        layer.use_text(text, style.size, Mm(x), Mm(PAGE_HEIGHT - y), font);
    }

    fn font(&self, style: Style) -> &IndirectFontRef {
        if style.bold {
            &self.bold
        } else {
            &self.regular
        }
    }

    fn text_at(&self, text: &str, style: Style, x: f32, y: f32) {
        Self::draw(&self.layer, self.font(style), text, style, x, y);
    }

    fn centered(&self, text: &str, style: Style, y: f32) {
        let x = ((PAGE_WIDTH - approx_width(text, style.size)) / 2.0).max(MARGIN / 2.0);
        self.text_at(text, style, x, y);
    }

    fn heading(&mut self, text: &str) {
        self.text_at(text, HEADING, MARGIN, self.y);
        self.y += SECTION_GAP;
    }

    /// One line at the cursor, breaking to a new page first when past the body limit.
    fn line(&mut self, text: &str, style: Style, x: f32) {
        self.break_below(BODY_LIMIT);
        self.text_at(text, style, x, self.y);
        self.y += LINE_HEIGHT;
    }

    /// Footer on every page, then serialize.
    fn finish(self) -> Result<Vec<u8>> {
        let total = self.pages.len();
        for (i, (page, layer)) in self.pages.iter().enumerate() {
            let layer_ref = self.doc.get_page(*page).get_layer(*layer);
            let text = format!("Report generated by SoilIntel | Page {} of {}", i + 1, total);
            let x = (PAGE_WIDTH - approx_width(&text, FOOTER.size)) / 2.0;
            Self::draw(&layer_ref, &self.regular, &text, FOOTER, x, PAGE_HEIGHT - 10.0);
        }

        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| SoilError::Pdf(format!("save error: {e}")))?;
        buf.into_inner()
            .map_err(|e| SoilError::Pdf(format!("buffer error: {e}")))
    }
}

/// Rough Helvetica width in mm: half an em per character.
fn approx_width(text: &str, size: f32) -> f32 {
    const PT_TO_MM: f32 = 0.3528;
    text.chars().count() as f32 * size * 0.5 * PT_TO_MM
}

/// Simple word-wrap helper for PDF text rendering.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
