use crate::layout::kind::LayoutKind;

/// Convenience result type used across printbooth.
pub type BoothResult<T> = Result<T, BoothError>;

/// Fatal failures of a render request.
///
/// Degraded-but-recoverable conditions (an unusable crop rectangle, an unreadable logo) are
/// not represented here: they are logged and the pipeline falls back to a best-effort path.
#[derive(thiserror::Error, Debug)]
pub enum BoothError {
    /// The number of supplied photos does not match what the layout needs.
    #[error("photo count mismatch: layout '{layout}' needs {expected} photo(s), got {actual}")]
    PhotoCountMismatch {
        /// Requested layout.
        layout: LayoutKind,
        /// Photos the layout places.
        expected: usize,
        /// Photos supplied by the caller.
        actual: usize,
    },

    /// A source photo could not be decoded as a raster image.
    #[error("decode error: {0}")]
    Decode(String),

    /// The final canvas could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// Invalid user-provided request or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoothError {
    /// Build a [`BoothError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`BoothError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`BoothError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
