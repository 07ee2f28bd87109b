//! Error types

/// Error returned by [`Converter::convert`](crate::Converter::convert).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// The input is longer than the converter's configured ceiling.
    #[error("input is {len} bytes, limit is {limit}")]
    InputTooLarge { len: usize, limit: usize },
}
