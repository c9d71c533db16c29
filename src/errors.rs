use thiserror::Error;

/// Failures raised while converting between surface coordinates and CST coefficients.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Input sequences which must be paired point for point have different lengths
    #[error("shape mismatch for {what}: expected {expected} values, found {found}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The least squares problem behind a fit could not be solved
    #[error("fit failed: {0}")]
    FitFailed(String),
}

impl ConversionError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ConversionError::InvalidArgument(message.into())
    }

    /// Returns a `ShapeMismatch` if `found` differs from `expected`
    pub fn check_len(what: &'static str, expected: usize, found: usize) -> Result<(), Self> {
        if expected == found {
            Ok(())
        } else {
            Err(ConversionError::ShapeMismatch {
                what,
                expected,
                found,
            })
        }
    }
}
