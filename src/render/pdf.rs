use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

/// US Letter, in points.
pub const PAGE_W: f32 = 612.0;
pub const PAGE_H: f32 = 792.0;

const FONT_REGULAR: Name<'static> = Name(b"F1");
const FONT_BOLD: Name<'static> = Name(b"F2");

/// Average Helvetica glyph advance, as a fraction of the font size.
/// Good enough to right-align short numeric strings.
const AVG_GLYPH_W: f32 = 0.55;

/// Single-page canvas with absolute positioning (origin bottom-left).
pub struct PdfCanvas {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_id: Ref,
    content_id: Ref,
    content: Content,
}

impl Default for PdfCanvas {
    fn default() -> Self {
        Self::new()
    }
}

/// Helvetica is a WinAnsi font: keep Latin-1, replace everything else.
fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (c as u32) < 256 { c as u8 } else { b'?' })
        .collect()
}

impl PdfCanvas {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        // ID gestiti a mano
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let regular_id = Ref::new(3);
        let bold_id = Ref::new(4);
        let page_id = Ref::new(5);
        let content_id = Ref::new(6);

        pdf.type1_font(regular_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        {
            let mut page = pdf.page(page_id);
            page.parent(pages_id)
                .media_box(Rect::new(0.0, 0.0, PAGE_W, PAGE_H))
                .contents(content_id);

            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(FONT_REGULAR, regular_id);
            fonts.pair(FONT_BOLD, bold_id);
        }

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_id,
            content_id,
            content: Content::new(),
        }
    }

    pub fn set_gray(&mut self, level: f32) {
        self.content.set_fill_gray(level);
    }

    pub fn text(&mut self, x: f32, y: f32, size: f32, bold: bool, text: &str) {
        let font = if bold { FONT_BOLD } else { FONT_REGULAR };
        let bytes = encode(text);

        self.content.begin_text();
        self.content.set_font(font, size);
        self.content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        self.content.show(Str(&bytes));
        self.content.end_text();
    }

    /// Text whose right edge sits at `x_right`.
    pub fn text_right(&mut self, x_right: f32, y: f32, size: f32, bold: bool, text: &str) {
        let width = text.chars().count() as f32 * size * AVG_GLYPH_W;
        self.text(x_right - width, y, size, bold, text);
    }

    /// Horizontal rule from `x1` to `x2`.
    pub fn hline(&mut self, x1: f32, x2: f32, y: f32) {
        self.content.set_line_width(1.0);
        self.content.move_to(x1, y);
        self.content.line_to(x2, y);
        self.content.stroke();
    }

    pub fn finish(self) -> Vec<u8> {
        let PdfCanvas {
            mut pdf,
            catalog_id,
            pages_id,
            page_id,
            content_id,
            content,
        } = self;

        pdf.stream(content_id, &content.finish());
        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id).kids([page_id]).count(1);
        pdf.finish()
    }
}
