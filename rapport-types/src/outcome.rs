//! The value-or-absent channel used by every fetched dataset leaf.

use serde::{Deserialize, Serialize};

/// Explicit result of one data acquisition: a concrete value, or the fact
/// that no value could be obtained in time.
///
/// Absence is a first-class state here, never a sentinel number or a null
/// smuggled through the value type. The renderer turns `Unavailable` into the
/// literal `N/A` marker; nothing downstream ever needs to guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome<T> {
    /// The feed produced a usable value.
    Value(T),
    /// The feed was slow, missing, or malformed; no value exists.
    Unavailable,
}

impl<T> Outcome<T> {
    /// Converts into an `Option`, discarding the absence marker.
    pub fn value(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unavailable => None,
        }
    }

    /// Borrowing view of the contained value.
    pub const fn as_ref(&self) -> Outcome<&T> {
        match self {
            Self::Value(v) => Outcome::Value(v),
            Self::Unavailable => Outcome::Unavailable,
        }
    }

    /// True when no value was obtained.
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }

    /// True when a value is present.
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Maps the contained value, preserving `Unavailable`.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Value(v) => Outcome::Value(f(v)),
            Self::Unavailable => Outcome::Unavailable,
        }
    }
}

impl<T> From<Option<T>> for Outcome<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => Self::Value(v),
            None => Self::Unavailable,
        }
    }
}
