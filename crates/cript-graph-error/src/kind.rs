//! Error kinds for cript-graph operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Callers match on `ErrorKind` to tell bad caller input apart from a
/// broken static configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The input object or graph is absent or cannot be identified
    InvalidInput,

    /// Static configuration (color table, schema) is malformed
    InvalidConfiguration,

    /// Caller-provided configuration text could not be deserialized
    DeserializationFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Whether the error stems from configuration rather than input data.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidConfiguration | ErrorKind::DeserializationFailed
        )
    }
}
