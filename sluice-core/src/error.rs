use thiserror::Error;

/// Failures while turning a response into the requested type.
///
/// Returned wrapped in [`crate::Error`], recover it with `downcast_ref::<DecodeError>()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// An insert with `RETURNING` got no row back.
    #[error("Failed to decode with returning: the statement did not return any row")]
    FailedToDecodeWithReturning,
    /// The row lacks a column the target type requires.
    #[error("Column `{column}` does not exist in the row provided, cannot decode {target}")]
    MissingColumn {
        column: String,
        target: &'static str,
    },
}
