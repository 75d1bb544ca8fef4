//! Greedy word wrapping against measured text widths.

use crate::font::FontFace;

/// Wrap `text` into lines no wider than `max_width` points.
///
/// Explicit newlines split the text into paragraphs first; a blank paragraph
/// becomes a blank output line. Within a paragraph, words are packed greedily
/// onto the current line while the measured width of the joined run stays
/// within `max_width`. A single word wider than `max_width` is placed alone
/// on its own line, never split or dropped.
///
/// Examples
///
/// ```
/// use rapport_pdf::{wrap_text, FontFace};
///
/// let lines = wrap_text("et to tre", FontFace::Helvetica, 12.0, 28.0);
/// assert_eq!(lines, ["et to", "tre"]);
/// ```
#[must_use]
pub fn wrap_text(text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for segment in text.split('\n') {
        if segment.is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut line = String::new();
        for word in segment.split(' ') {
            let candidate = if line.is_empty() {
                word.to_owned()
            } else {
                format!("{line} {word}")
            };
            if face.text_width(&candidate, size) > max_width {
                if !line.is_empty() {
                    lines.push(line);
                    line = String::new();
                }
                if face.text_width(word, size) > max_width {
                    lines.push(word.to_owned());
                } else {
                    line = word.to_owned();
                }
            } else {
                line = candidate;
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}
