use thiserror::Error;

/// Reasons a persisted string could not be decoded into a [`Bitmap`].
///
/// [`Bitmap`]: crate::Bitmap
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Every byte takes two hex digits, so the input length must be even.
    #[error("persisted bitmap has odd length {len}")]
    OddLength {
        /// Length of the rejected input.
        len: usize,
    },

    /// A character outside `0-9`, `a-f` and `A-F` was found.
    #[error("invalid hex digit {found:?} at offset {index}")]
    InvalidDigit {
        /// Byte offset of the character in the input.
        index: usize,
        /// The offending character.
        found: char,
    },
}
