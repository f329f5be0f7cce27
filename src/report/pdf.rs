//! PDF layout for the risk report.
//!
//! Layout is computed first as a list of draw operations per page, then
//! replayed onto a `printpdf` document. Keeping the two apart lets the
//! pagination be tested without parsing PDF output.
//!
//! Coordinates in `DrawOp` are millimetres from the top-left corner of an A4
//! page; `printpdf` measures from the bottom-left, so `render_pdf` flips y.

use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};

use super::{ReportDocument, ReportError};

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

const MARGIN_MM: f32 = 10.0;
/// Content may not extend below this distance from the top.
const CONTENT_BOTTOM_MM: f32 = PAGE_HEIGHT_MM - 20.0;
const LINE_HEIGHT_MM: f32 = 10.0;
const COLUMN_WIDTH_MM: f32 = 40.0;
const CELL_PADDING_MM: f32 = 2.0;
/// Baseline offset from the top of a 10 mm line.
const BASELINE_MM: f32 = 7.0;

const TITLE_SIZE_PT: f32 = 16.0;
const BODY_SIZE_PT: f32 = 12.0;
const TABLE_SIZE_PT: f32 = 10.0;

const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph advance as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.5;

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        x_mm: f32,
        y_mm: f32,
        size_pt: f32,
        bold: bool,
    },
    /// Unfilled rectangle outline; `y_mm` is the top edge.
    Rect {
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
    },
}

impl DrawOp {
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            DrawOp::Rect { .. } => None,
        }
    }
}

struct Layout {
    finished: Vec<Vec<DrawOp>>,
    current: Vec<DrawOp>,
    cursor_mm: f32,
}

impl Layout {
    fn new() -> Self {
        Self {
            finished: Vec::new(),
            current: Vec::new(),
            cursor_mm: MARGIN_MM,
        }
    }

    fn ops(&mut self) -> &mut Vec<DrawOp> {
        &mut self.current
    }

    fn new_page(&mut self) {
        self.finished.push(std::mem::take(&mut self.current));
        self.cursor_mm = MARGIN_MM;
    }

    /// Closes the current page and returns every page in order.
    fn into_pages(mut self) -> Vec<Vec<DrawOp>> {
        self.finished.push(self.current);
        self.finished
    }

    fn fits(&self, height_mm: f32) -> bool {
        self.cursor_mm + height_mm <= CONTENT_BOTTOM_MM
    }

    fn text_line(&mut self, text: &str, x_mm: f32, size_pt: f32, bold: bool) {
        if !self.fits(LINE_HEIGHT_MM) {
            self.new_page();
        }
        let y_mm = self.cursor_mm + BASELINE_MM;
        self.ops().push(DrawOp::Text {
            text: text.to_string(),
            x_mm,
            y_mm,
            size_pt,
            bold,
        });
        self.cursor_mm += LINE_HEIGHT_MM;
    }

    fn table_row(&mut self, cells: &[String; 3]) {
        let top = self.cursor_mm;
        for (i, cell) in cells.iter().enumerate() {
            let x = MARGIN_MM + COLUMN_WIDTH_MM * i as f32;
            self.ops().push(DrawOp::Rect {
                x_mm: x,
                y_mm: top,
                width_mm: COLUMN_WIDTH_MM,
                height_mm: LINE_HEIGHT_MM,
            });
            self.ops().push(DrawOp::Text {
                text: cell.clone(),
                x_mm: x + CELL_PADDING_MM,
                y_mm: top + BASELINE_MM,
                size_pt: TABLE_SIZE_PT,
                bold: false,
            });
        }
        self.cursor_mm += LINE_HEIGHT_MM;
    }

    fn skip(&mut self, height_mm: f32) {
        self.cursor_mm += height_mm;
    }
}

fn approx_text_width_mm(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * AVG_GLYPH_EM * PT_TO_MM
}

/// Lays out `doc` into per-page draw operations.
///
/// The exposure table repeats its header row at the top of every page it
/// spills onto.
pub fn layout(doc: &ReportDocument) -> Vec<Vec<DrawOp>> {
    let mut l = Layout::new();

    let title_x = ((PAGE_WIDTH_MM - approx_text_width_mm(&doc.title, TITLE_SIZE_PT)) / 2.0)
        .max(MARGIN_MM);
    l.text_line(&doc.title, title_x, TITLE_SIZE_PT, true);
    l.skip(LINE_HEIGHT_MM);

    for field in &doc.fields {
        l.text_line(&field.to_string(), MARGIN_MM, BODY_SIZE_PT, false);
    }
    l.skip(LINE_HEIGHT_MM);

    // Keep the heading with the header row and at least one data row.
    if !l.fits(LINE_HEIGHT_MM * 3.0) {
        l.new_page();
    }
    l.text_line(&doc.table_heading, MARGIN_MM, BODY_SIZE_PT, false);

    let header = doc.columns.map(String::from);
    l.table_row(&header);
    for row in &doc.rows {
        if !l.fits(LINE_HEIGHT_MM) {
            l.new_page();
            l.table_row(&header);
        }
        l.table_row(row);
    }

    l.into_pages()
}

// ---------------------------------------------------------------------------
// printpdf backend
// ---------------------------------------------------------------------------

/// Renders `doc` to PDF bytes.
pub fn render_pdf(doc: &ReportDocument) -> Result<Vec<u8>, ReportError> {
    let pages = layout(doc);

    let (pdf, first_page, first_layer) = PdfDocument::new(
        doc.title.as_str(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let regular = pdf
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Pdf(format!("{:?}", e)))?;
    let bold = pdf
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Pdf(format!("{:?}", e)))?;

    let mut layers = vec![pdf.get_page(first_page).get_layer(first_layer)];
    for _ in 1..pages.len() {
        let (page, layer) = pdf.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        layers.push(pdf.get_page(page).get_layer(layer));
    }

    for (layer, ops) in layers.iter().zip(&pages) {
        draw_page(layer, ops, &regular, &bold);
    }

    pdf.save_to_bytes()
        .map_err(|e| ReportError::Pdf(format!("{:?}", e)))
}

fn draw_page(
    layer: &PdfLayerReference,
    ops: &[DrawOp],
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    for op in ops {
        match op {
            DrawOp::Text { text, x_mm, y_mm, size_pt, bold: is_bold } => {
                let font = if *is_bold { bold } else { regular };
                layer.use_text(text.as_str(), *size_pt, Mm(*x_mm), Mm(PAGE_HEIGHT_MM - *y_mm), font);
            }
            DrawOp::Rect { x_mm, y_mm, width_mm, height_mm } => {
                let top = PAGE_HEIGHT_MM - *y_mm;
                let bottom = top - *height_mm;
                let left = *x_mm;
                let right = *x_mm + *width_mm;
                layer.add_line(Line {
                    points: vec![
                        (Point::new(Mm(left), Mm(bottom)), false),
                        (Point::new(Mm(right), Mm(bottom)), false),
                        (Point::new(Mm(right), Mm(top)), false),
                        (Point::new(Mm(left), Mm(top)), false),
                    ],
                    is_closed: true,
                });
            }
        }
    }
}
