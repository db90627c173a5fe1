//! Error types for cover identification.
//!
//! Expected negative outcomes (no target, coincident agent and target, no
//! eligible face) are not errors; they produce an empty [`CoverResult`].
//! Errors are reserved for configuration problems caught at construction.
//!
//! [`CoverResult`]: crate::CoverResult

/// Result type for cover operations.
pub type Result<T> = std::result::Result<T, CoverError>;

/// Errors that can occur when configuring the cover identifier.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoverError {
    /// The minimum spacing between cover spots must be finite and positive.
    #[error("minimum cover width must be finite and positive, got {0}")]
    InvalidMinWidth(f64),

    /// The cover zone depth must be finite and non-negative.
    #[error("cover depth must be finite and non-negative, got {0}")]
    InvalidDepth(f64),

    /// The corridor half extents must be finite and positive.
    #[error("invalid corridor half extents: width {half_width}, height {half_height}")]
    InvalidCorridor {
        /// Lateral half extent of the corridor.
        half_width: f64,
        /// Vertical half extent of the corridor.
        half_height: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoverError::InvalidMinWidth(0.0);
        assert!(err.to_string().contains("minimum cover width"));

        let err = CoverError::InvalidDepth(-1.0);
        assert!(err.to_string().contains("-1"));

        let err = CoverError::InvalidCorridor {
            half_width: 0.0,
            half_height: 100.0,
        };
        assert!(err.to_string().contains("width 0"));
    }
}
