//! Width metrics and text encoding for the two built-in Helvetica faces.
//!
//! Widths are the standard Adobe AFM advance widths in 1/1000 em units for
//! the WinAnsi code points the report repertoire needs: printable ASCII, the
//! Norwegian letters, and the en dash. Code points outside the repertoire
//! measure and encode as a question mark, so output stays well-formed even
//! for unexpected input.

/// One of the two document faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    /// Regular body face.
    Helvetica,
    /// Bold face used for the title and section headings.
    HelveticaBold,
}

/// Advance widths for ASCII 0x20..=0x7E, Helvetica regular.
const WIDTHS_REGULAR: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 278, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70
];

/// Advance widths for ASCII 0x20..=0x7E, Helvetica bold.
const WIDTHS_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 0x70
];

impl FontFace {
    /// Resource name bound in each page's font dictionary.
    #[must_use]
    pub const fn resource_name(self) -> &'static str {
        match self {
            Self::Helvetica => "F1",
            Self::HelveticaBold => "F2",
        }
    }

    /// PostScript base font name of the standard face.
    #[must_use]
    pub const fn base_font(self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Advance width of one glyph in 1/1000 em units.
    #[must_use]
    pub const fn glyph_width(self, ch: char) -> u16 {
        let code = ch as u32;
        if code >= 0x20 && code <= 0x7E {
            let idx = (code - 0x20) as usize;
            return match self {
                Self::Helvetica => WIDTHS_REGULAR[idx],
                Self::HelveticaBold => WIDTHS_BOLD[idx],
            };
        }
        match ch {
            'Å' => match self {
                Self::Helvetica => 667,
                Self::HelveticaBold => 722,
            },
            'Æ' => 1000,
            'Ø' => 778,
            'å' => 556,
            'æ' => 889,
            'ø' => 611,
            '\u{2013}' => 556,
            // Repertoire miss renders as '?', so measure it as '?'.
            _ => match self {
                Self::Helvetica => 556,
                Self::HelveticaBold => 611,
            },
        }
    }

    /// Measured width of a text run at the given size, in points.
    #[must_use]
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|ch| u32::from(self.glyph_width(ch))).sum();
        units as f32 * size / 1000.0
    }
}

/// Encode a text run as WinAnsi bytes for a PDF string.
///
/// Covers printable ASCII, the Norwegian letters, and the en dash; anything
/// else becomes a question mark.
#[must_use]
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\u{20}'..='\u{7E}' => ch as u8,
            'Å' => 0xC5,
            'Æ' => 0xC6,
            'Ø' => 0xD8,
            'å' => 0xE5,
            'æ' => 0xE6,
            'ø' => 0xF8,
            '\u{2013}' => 0x96,
            _ => b'?',
        })
        .collect()
}
