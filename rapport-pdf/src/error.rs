use thiserror::Error;

/// Contract violations raised by the layout engine.
///
/// These signal programming errors in the caller (a zero-width column, a
/// non-positive font size), never runtime data conditions. Missing or odd
/// content is always placed somehow; only impossible shapes are rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LayoutError {
    /// Page geometry that cannot host any content.
    #[error("invalid page geometry: {what}")]
    InvalidGeometry {
        /// Description of the violated constraint.
        what: String,
    },

    /// Table shape violating the placement contract.
    #[error("invalid table: {what}")]
    InvalidTable {
        /// Description of the violated constraint.
        what: String,
    },

    /// Text placement argument violating the placement contract.
    #[error("invalid text placement: {what}")]
    InvalidText {
        /// Description of the violated constraint.
        what: String,
    },
}

impl LayoutError {
    /// Construct an `InvalidGeometry` error.
    #[must_use]
    pub fn geometry(what: impl Into<String>) -> Self {
        Self::InvalidGeometry { what: what.into() }
    }

    /// Construct an `InvalidTable` error.
    #[must_use]
    pub fn table(what: impl Into<String>) -> Self {
        Self::InvalidTable { what: what.into() }
    }

    /// Construct an `InvalidText` error.
    #[must_use]
    pub fn text(what: impl Into<String>) -> Self {
        Self::InvalidText { what: what.into() }
    }
}
