//! Error types for the decode orchestrators.
//!
//! Only two errors originate in the orchestrators themselves: a missing
//! luminance factory and an absent image. Everything else is raised by a
//! collaborator (luminance factory, binarizer, decode engine) and passes
//! through unchanged.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BarcodeError>;

/// Errors surfaced by the decode orchestrators and the bundled strategies.
#[derive(Error, Debug)]
pub enum BarcodeError {
    /// The orchestrator is missing a required strategy.
    #[error("configuration: {message}")]
    Configuration {
        /// What is missing.
        message: String,
    },

    /// A call argument was absent or unusable.
    #[error("invalid argument: {message}")]
    Argument {
        /// Which argument and why.
        message: String,
    },

    /// The luminance source cannot perform the requested operation.
    #[error("{operation} is not supported by this luminance source")]
    Unsupported {
        /// Name of the operation, e.g. `rotate_counter_clockwise`.
        operation: &'static str,
    },

    /// A pixel buffer does not match its declared dimensions.
    #[error("buffer of {actual} bytes does not match {width}x{height} (expected {expected})")]
    InvalidDimensions {
        /// Declared width in pixels.
        width: usize,
        /// Declared height in pixels.
        height: usize,
        /// Expected buffer length.
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },

    /// Failure raised by a decode engine or another caller-supplied collaborator.
    #[error(transparent)]
    Engine(Box<dyn std::error::Error + Send + Sync>),

    /// Failure while reading or converting an `image` crate buffer.
    #[error("image")]
    Image(#[from] image::ImageError),
}

impl BarcodeError {
    /// Builds a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Builds an argument error.
    pub fn argument(message: impl Into<String>) -> Self {
        Self::Argument {
            message: message.into(),
        }
    }

    /// Wraps a collaborator failure so it can travel through the orchestrator.
    pub fn engine<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Engine(error.into())
    }

    /// Checks that `len` matches `width * height * channels`.
    pub(crate) fn check_buffer(
        len: usize,
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<()> {
        let expected = width * height * channels;
        if len != expected {
            return Err(Self::InvalidDimensions {
                width,
                height,
                expected,
                actual: len,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_is_transparent() {
        let err = BarcodeError::engine("checksum mismatch");
        assert_eq!(err.to_string(), "checksum mismatch");
    }

    #[test]
    fn test_check_buffer() {
        assert!(BarcodeError::check_buffer(12, 2, 2, 3).is_ok());
        match BarcodeError::check_buffer(10, 2, 2, 3) {
            Err(BarcodeError::InvalidDimensions {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 12);
                assert_eq!(actual, 10);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
