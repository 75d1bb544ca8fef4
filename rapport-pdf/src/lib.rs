//! rapport-pdf
//!
//! Deterministic layout engine for fixed-page documents.
//!
//! - `font`: width metrics and WinAnsi encoding for the built-in Helvetica
//!   faces.
//! - `wrap`: greedy word wrapping against a measured maximum width.
//! - `doc`: the `Document` builder owning the page cursor, and the immutable
//!   `SealedDocument` it finalizes into.
//! - `write`: serialization of a sealed document to PDF bytes.
//!
//! The build flow is `Document::new -> place content -> seal`. Sealing
//! consumes the builder, so no placement can happen after finalization, and
//! the cursor never escapes the builder. Placement is pure bookkeeping; the
//! only fallible operations are contract checks on caller-supplied shapes
//! (column widths, font sizes), reported as [`LayoutError`].
#![warn(missing_docs)]

mod error;
/// Font metrics and text encoding for the built-in faces.
pub mod font;
/// Greedy word wrapping.
pub mod wrap;

mod doc;
mod write;

pub use doc::{Document, DrawCmd, Page, PageGeometry, SealedDocument};
pub use error::LayoutError;
pub use font::FontFace;
pub use wrap::wrap_text;
