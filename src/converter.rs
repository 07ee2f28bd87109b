//! Conversion entry points
//!
//! [`convert`] is the whole public contract: normalize, then run the block
//! grammar. [`Converter`] wraps the same pipeline with a [`ConvertConfig`]
//! for callers that take untrusted input and want an upper bound on work.

use crate::error::ConvertError;
use crate::grammar::parse_blocks;
use crate::normalize::normalize;

/// Convert marked-up text to an HTML fragment.
///
/// Never fails: anything no rule recognizes is emitted as encoded text.
pub fn convert(input: &str) -> String {
    let output = parse_blocks(&normalize(input));
    tracing::debug!(
        input_len = input.len(),
        output_len = output.len(),
        "converted document"
    );
    output
}

/// Settings for a [`Converter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConvertConfig {
    /// Largest accepted raw input, in bytes. `None` accepts anything.
    pub max_input_len: Option<usize>,
}

/// A reusable converter carrying a [`ConvertConfig`].
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    /// A converter with no input ceiling.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ConvertConfig) -> Self {
        Self { config }
    }

    /// Reject inputs longer than `limit` bytes.
    pub fn with_max_input_len(mut self, limit: usize) -> Self {
        self.config.max_input_len = Some(limit);
        self
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Convert `input`, enforcing the configured ceiling.
    pub fn convert(&self, input: &str) -> Result<String, ConvertError> {
        if let Some(limit) = self.config.max_input_len {
            if input.len() > limit {
                tracing::warn!(len = input.len(), limit, "input rejected by size ceiling");
                return Err(ConvertError::InputTooLarge {
                    len: input.len(),
                    limit,
                });
            }
        }

        Ok(convert(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_normalizes_before_parsing() {
        assert_eq!(convert("a\r\n\r\nb"), "<p>a</p>\n<p>b</p>\n");
        assert_eq!(convert("\tcode"), "<pre>\ncode\n</pre>\n");
    }

    #[test]
    fn test_default_converter_accepts_anything() {
        let converter = Converter::new();
        assert_eq!(converter.config().max_input_len, None);
        assert_eq!(converter.convert("# x").unwrap(), "<h1>x</h1>\n");
    }

    #[test]
    fn test_ceiling_is_inclusive() {
        let converter = Converter::new().with_max_input_len(3);
        assert_eq!(converter.convert("abc").unwrap(), "<p>abc</p>\n");
        assert_eq!(
            converter.convert("abcd"),
            Err(ConvertError::InputTooLarge { len: 4, limit: 3 })
        );
    }

    #[test]
    fn test_error_message() {
        let err = ConvertError::InputTooLarge { len: 10, limit: 5 };
        assert_eq!(err.to_string(), "input is 10 bytes, limit is 5");
    }

    #[test]
    fn test_with_config() {
        let config = ConvertConfig {
            max_input_len: Some(0),
        };
        let converter = Converter::with_config(config);
        assert_eq!(converter.convert("").unwrap(), "");
        assert!(converter.convert("x").is_err());
    }
}
