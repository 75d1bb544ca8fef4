/// Stable identifier for a connector implementation.
///
/// Wraps a `&'static str` so connector identity can be carried in errors and
/// log fields without allocation. Two connectors with the same key are
/// considered the same implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectorKey(pub &'static str);

impl ConnectorKey {
    /// Creates a key from a static string.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the underlying string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl From<ConnectorKey> for &'static str {
    fn from(key: ConnectorKey) -> Self {
        key.0
    }
}

impl core::fmt::Display for ConnectorKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.0)
    }
}
