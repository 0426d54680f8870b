//! Display-only stand-ins for values that have not been computed yet.

use std::borrow::Cow;
use std::fmt;

/// A printable token substituted for a pending value when a map is
/// displayed or frozen.
///
/// Equality, ordering and hashing are over the text only. Both `Debug` and
/// `Display` write the raw text, unquoted, so a placeholder reads as an
/// opaque leaf inside structured output.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Placeholder(Cow<'static, str>);

impl Placeholder {
    /// The canonical placeholder used by `Debug` output.
    pub const UNREALIZED: Self = Self(Cow::Borrowed("<unrealized>"));

    /// Creates a placeholder with custom display text.
    pub fn new(text: impl Into<Cow<'static, str>>) -> Self {
        Self(text.into())
    }

    /// Returns the display text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.0
    }
}

impl Default for Placeholder {
    fn default() -> Self {
        Self::UNREALIZED
    }
}

impl fmt::Debug for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A value as seen by a freeze: either available, or a placeholder for a
/// computation that has not run.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Frozen<T> {
    /// The value was eager or already realized.
    Realized(T),
    /// The value was still pending.
    Unrealized(Placeholder),
}

impl<T> Frozen<T> {
    /// Returns the realized value, or `None` for a placeholder.
    #[must_use]
    pub fn realized(self) -> Option<T> {
        match self {
            Self::Realized(value) => Some(value),
            Self::Unrealized(_) => None,
        }
    }

    /// Returns `true` for a placeholder.
    #[must_use]
    pub const fn is_unrealized(&self) -> bool {
        matches!(self, Self::Unrealized(_))
    }
}

impl<T: Clone> Frozen<&T> {
    /// Maps a borrowed frozen value to an owned one.
    #[must_use]
    pub fn cloned(self) -> Frozen<T> {
        match self {
            Self::Realized(value) => Frozen::Realized(value.clone()),
            Self::Unrealized(placeholder) => Frozen::Unrealized(placeholder),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Frozen<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Realized(value) => fmt::Debug::fmt(value, f),
            Self::Unrealized(placeholder) => fmt::Debug::fmt(placeholder, f),
        }
    }
}
