use crate::error::LayoutError;
use crate::font::FontFace;
use crate::wrap::wrap_text;

/// Fixed page dimensions and content margins, in points.
///
/// `top_y` is where the cursor starts on a fresh page; `bottom_y` is the
/// lowest baseline content may occupy. Placement never writes outside
/// `bottom_y..=top_y` vertically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Page width.
    pub width: f32,
    /// Page height.
    pub height: f32,
    /// Left and right content margin.
    pub margin_x: f32,
    /// Cursor position on a fresh page.
    pub top_y: f32,
    /// Lowest allowed cursor position.
    pub bottom_y: f32,
}

impl Default for PageGeometry {
    /// A4 portrait with the report's standard margins.
    fn default() -> Self {
        Self {
            width: 595.0,
            height: 842.0,
            margin_x: 40.0,
            top_y: 820.0,
            bottom_y: 60.0,
        }
    }
}

impl PageGeometry {
    /// Horizontal space available to content.
    #[must_use]
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin_x
    }

    fn validate(&self) -> Result<(), LayoutError> {
        let all = [
            self.width,
            self.height,
            self.margin_x,
            self.top_y,
            self.bottom_y,
        ];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(LayoutError::geometry("non-finite dimension"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(LayoutError::geometry("non-positive page size"));
        }
        if self.margin_x < 0.0 || self.content_width() <= 0.0 {
            return Err(LayoutError::geometry("margins leave no content width"));
        }
        if self.bottom_y < 0.0 || self.top_y <= self.bottom_y || self.top_y > self.height {
            return Err(LayoutError::geometry("vertical bounds out of order"));
        }
        Ok(())
    }
}

/// One primitive drawing operation on a page.
///
/// Coordinates follow the PDF convention: origin at the bottom-left corner,
/// y growing upward. Text y is the baseline; rectangle y is the bottom edge.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// A single text run.
    Text {
        /// Left edge of the run.
        x: f32,
        /// Baseline.
        y: f32,
        /// Face to render with.
        face: FontFace,
        /// Font size in points.
        size: f32,
        /// The text itself.
        text: String,
    },
    /// A filled axis-aligned rectangle.
    Rect {
        /// Left edge.
        x: f32,
        /// Bottom edge.
        y: f32,
        /// Width.
        w: f32,
        /// Height.
        h: f32,
        /// Fill level in the device gray colorspace, 0 black to 1 white.
        gray: f32,
    },
}

/// An ordered list of draw commands making up one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    cmds: Vec<DrawCmd>,
}

impl Page {
    /// The commands on this page, in placement order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }
}

/// Builder that places content onto fixed-size pages.
///
/// The builder owns the page cursor for the whole build; callers only ask
/// for content to be placed and never see or manage page transitions. When
/// the remaining vertical space cannot host the next line or table row, the
/// builder opens a fresh page and continues. Call [`Document::seal`] to
/// finalize; sealing consumes the builder, so nothing can be placed
/// afterward.
#[derive(Debug)]
pub struct Document {
    geometry: PageGeometry,
    pages: Vec<Page>,
    y: f32,
}

impl Document {
    /// Start a build with one fresh page and the cursor at the top margin.
    pub fn new(geometry: PageGeometry) -> Result<Self, LayoutError> {
        geometry.validate()?;
        Ok(Self {
            geometry,
            pages: vec![Page::default()],
            y: geometry.top_y,
        })
    }

    /// The geometry this build places against.
    #[must_use]
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Number of pages opened so far.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn fits(&self, height: f32) -> bool {
        self.y - self.geometry.bottom_y >= height
    }

    fn ensure_room(&mut self, height: f32) {
        if !self.fits(height) {
            self.break_page();
        }
    }

    fn push(&mut self, cmd: DrawCmd) {
        // `new` seeds one page and `break_page` appends, so last() exists.
        if let Some(page) = self.pages.last_mut() {
            page.cmds.push(cmd);
        }
    }

    /// Open a fresh page and reset the cursor to the top margin.
    pub fn break_page(&mut self) {
        self.pages.push(Page::default());
        self.y = self.geometry.top_y;
    }

    /// Move the cursor down by `dy` points without drawing.
    ///
    /// Gaps never trigger a page break themselves; if the cursor ends up in
    /// the bottom margin, the next placement breaks instead.
    pub fn vspace(&mut self, dy: f32) {
        self.y -= dy;
    }

    /// Place a single line of text at the left margin and advance the cursor
    /// by `advance` points.
    ///
    /// Used for the title and section headings, where the advance includes
    /// the gap below the line. Breaks to a fresh page first when the
    /// remaining space is less than `advance`.
    pub fn text_line(
        &mut self,
        text: &str,
        face: FontFace,
        size: f32,
        advance: f32,
    ) -> Result<(), LayoutError> {
        if size <= 0.0 || !size.is_finite() {
            return Err(LayoutError::text("non-positive font size"));
        }
        if advance <= 0.0 || !advance.is_finite() {
            return Err(LayoutError::text("non-positive line advance"));
        }
        self.ensure_room(advance);
        let cmd = DrawCmd::Text {
            x: self.geometry.margin_x,
            y: self.y,
            face,
            size,
            text: text.to_owned(),
        };
        self.push(cmd);
        self.y -= advance;
        Ok(())
    }

    /// Wrap `text` against `max_width` and place the resulting lines.
    ///
    /// Wrapping happens exactly once, up front. Before each line, if the
    /// remaining vertical space is less than `line_height`, a fresh page is
    /// opened and placement continues with the already-wrapped lines; the
    /// break never changes line content. A single word wider than
    /// `max_width` still goes down on its own line.
    pub fn paragraph(
        &mut self,
        text: &str,
        face: FontFace,
        size: f32,
        line_height: f32,
        max_width: f32,
    ) -> Result<(), LayoutError> {
        if size <= 0.0 || !size.is_finite() {
            return Err(LayoutError::text("non-positive font size"));
        }
        if line_height <= 0.0 || !line_height.is_finite() {
            return Err(LayoutError::text("non-positive line height"));
        }
        if max_width <= 0.0 || !max_width.is_finite() {
            return Err(LayoutError::text("non-positive wrap width"));
        }
        let lines = wrap_text(text, face, size, max_width);
        for line in lines {
            self.ensure_room(line_height);
            if !line.is_empty() {
                let cmd = DrawCmd::Text {
                    x: self.geometry.margin_x,
                    y: self.y,
                    face,
                    size,
                    text: line,
                };
                self.push(cmd);
            }
            self.y -= line_height;
        }
        Ok(())
    }

    /// Place a table with a shaded header row and zebra-shaded data rows.
    ///
    /// Headers get a darker band per column; every odd data row gets a
    /// light full-width band. Cells draw unwrapped at a fixed inset inside
    /// their column; a missing cell renders as `N/A`, and a cell wider than
    /// its column is drawn anyway. If a row does not fit in the remaining
    /// vertical space, the table continues on a fresh page without
    /// repeating the header. Row shading parity follows the data row index,
    /// not the on-page position.
    pub fn table(
        &mut self,
        headers: &[&str],
        rows: &[Vec<String>],
        col_widths: &[f32],
        row_height: f32,
        face: FontFace,
        font_size: f32,
    ) -> Result<(), LayoutError> {
        if headers.is_empty() {
            return Err(LayoutError::table("no columns"));
        }
        if col_widths.len() != headers.len() {
            return Err(LayoutError::table("column width count mismatch"));
        }
        if col_widths.iter().any(|w| *w <= 0.0 || !w.is_finite()) {
            return Err(LayoutError::table("non-positive column width"));
        }
        if row_height <= 0.0 || !row_height.is_finite() {
            return Err(LayoutError::table("non-positive row height"));
        }
        if font_size <= 0.0 || !font_size.is_finite() {
            return Err(LayoutError::table("non-positive font size"));
        }

        let total_width: f32 = col_widths.iter().sum();

        self.ensure_room(row_height);
        let mut x = self.geometry.margin_x;
        for (header, width) in headers.iter().zip(col_widths) {
            self.push(DrawCmd::Rect {
                x,
                y: self.y - row_height,
                w: *width,
                h: row_height,
                gray: 0.85,
            });
            self.push(DrawCmd::Text {
                x: x + 5.0,
                y: self.y - row_height + 5.0,
                face,
                size: font_size,
                text: (*header).to_owned(),
            });
            x += width;
        }
        self.y -= row_height;

        for (idx, row) in rows.iter().enumerate() {
            self.ensure_room(row_height);
            if idx % 2 == 1 {
                self.push(DrawCmd::Rect {
                    x: self.geometry.margin_x,
                    y: self.y - row_height,
                    w: total_width,
                    h: row_height,
                    gray: 0.95,
                });
            }
            let mut x = self.geometry.margin_x;
            for (col, width) in col_widths.iter().enumerate() {
                let cell = row.get(col).map_or("N/A", String::as_str);
                self.push(DrawCmd::Text {
                    x: x + 5.0,
                    y: self.y - row_height + 5.0,
                    face,
                    size: font_size,
                    text: cell.to_owned(),
                });
                x += width;
            }
            self.y -= row_height;
        }
        Ok(())
    }

    /// Finalize the build into an immutable page sequence.
    #[must_use]
    pub fn seal(self) -> SealedDocument {
        SealedDocument {
            geometry: self.geometry,
            pages: self.pages,
        }
    }
}

/// An immutable, finalized page sequence ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct SealedDocument {
    pub(crate) geometry: PageGeometry,
    pub(crate) pages: Vec<Page>,
}

impl SealedDocument {
    /// One blank page with the default geometry.
    ///
    /// Infallible, for callers that must hand back a document no matter what.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            geometry: PageGeometry::default(),
            pages: vec![Page::default()],
        }
    }

    /// The pages in placement order. Always at least one, even for a build
    /// that placed nothing.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// The geometry the document was built against.
    #[must_use]
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
