//! Serialization of sealed documents to PDF bytes.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use crate::doc::{DrawCmd, SealedDocument};
use crate::font::encode_win_ansi;

impl SealedDocument {
    /// Serialize the document to PDF bytes.
    ///
    /// Pages share the two built-in Helvetica faces via a predefined WinAnsi
    /// encoding, so no font programs are embedded. Object ids are assigned
    /// deterministically from page order; the same sealed document always
    /// yields the same bytes.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let catalog_id = Ref::new(1);
        let tree_id = Ref::new(2);
        let regular_id = Ref::new(3);
        let bold_id = Ref::new(4);
        let page_id = |idx: usize| Ref::new(5 + 2 * idx as i32);
        let content_id = |idx: usize| Ref::new(6 + 2 * idx as i32);

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(tree_id);
        pdf.pages(tree_id)
            .kids((0..self.pages.len()).map(page_id))
            .count(self.pages.len() as i32);

        pdf.type1_font(regular_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        for (idx, page) in self.pages.iter().enumerate() {
            {
                let mut writer = pdf.page(page_id(idx));
                writer.media_box(Rect::new(
                    0.0,
                    0.0,
                    self.geometry.width,
                    self.geometry.height,
                ));
                writer.parent(tree_id);
                writer.contents(content_id(idx));
                writer
                    .resources()
                    .fonts()
                    .pair(Name(b"F1"), regular_id)
                    .pair(Name(b"F2"), bold_id);
            }

            let mut content = Content::new();
            for cmd in page.commands() {
                match cmd {
                    DrawCmd::Rect { x, y, w, h, gray } => {
                        content.set_fill_gray(*gray);
                        content.rect(*x, *y, *w, *h);
                        content.fill_nonzero();
                    }
                    DrawCmd::Text {
                        x,
                        y,
                        face,
                        size,
                        text,
                    } => {
                        content.set_fill_gray(0.0);
                        content.begin_text();
                        content.set_font(Name(face.resource_name().as_bytes()), *size);
                        content.next_line(*x, *y);
                        content.show(Str(&encode_win_ansi(text)));
                        content.end_text();
                    }
                }
            }
            pdf.stream(content_id(idx), &content.finish());
        }

        pdf.finish()
    }
}
