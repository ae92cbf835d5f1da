//! Error handling for arithmetic primitives

use core::fmt;

use dlcrypt_api::Error as CoreError;

/// The error type for arithmetic primitives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Parameter validation error
    Parameter {
        /// Name of the invalid parameter
        name: &'static str,
        /// Reason why the parameter is invalid
        reason: &'static str,
    },

    /// Length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Byte-encoding error
    Encoding {
        /// Context where the encoding error occurred
        context: &'static str,
        /// Additional details about the failure
        details: &'static str,
    },

    /// A size computation overflowed
    Overflow {
        /// Context where the overflow occurred
        context: &'static str,
    },
}

/// Result type for arithmetic primitive operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            Error::Encoding { context, details } => {
                write!(f, "Encoding error in {}: {}", context, details)
            }
            Error::Overflow { context } => {
                write!(f, "Size computation overflow in {}", context)
            }
        }
    }
}

// Implement std::error::Error when std is available
#[cfg(feature = "std")]
impl std::error::Error for Error {}

// Implement conversion to CoreError
impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Parameter { name, reason } => CoreError::InvalidParameter {
                context: name,
                reason,
            },
            Error::Length {
                context,
                expected,
                actual,
            } => CoreError::InvalidLength {
                context,
                expected,
                actual,
            },
            Error::Encoding { context, details } => CoreError::SerializationError {
                context,
                reason: details,
            },
            Error::Overflow { context } => CoreError::Other { context },
        }
    }
}
