//! Error type definitions for dlcrypt operations

use core::fmt;

/// Primary error type for dlcrypt operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An argument failed validation
    InvalidParameter {
        /// Operation that rejected the argument
        context: &'static str,
        /// Why the argument was rejected
        reason: &'static str,
    },

    /// Key material was rejected during import or use
    InvalidKey {
        /// Operation that rejected the key
        context: &'static str,
        /// Why the key was rejected
        reason: &'static str,
    },

    /// A buffer had the wrong length
    InvalidLength {
        /// Operation that checked the length
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Working memory could not be allocated
    AllocationFailed {
        /// Operation that requested the allocation
        context: &'static str,
        /// Requested size in bytes
        bytes: usize,
    },

    /// A computed value failed the defensive output check
    InvalidDerivedValue {
        /// Operation that produced the value
        context: &'static str,
    },

    /// Conversion of a value to its byte encoding failed
    SerializationError {
        /// Operation that attempted the conversion
        context: &'static str,
        /// Why the conversion failed
        reason: &'static str,
    },

    /// Other error
    Other {
        /// Operation that failed
        context: &'static str,
    },
}

/// Result type for dlcrypt operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { context, reason } => {
                write!(f, "{}: invalid parameter: {}", context, reason)
            }
            Self::InvalidKey { context, reason } => {
                write!(f, "{}: invalid key: {}", context, reason)
            }
            Self::InvalidLength {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{}: invalid length (expected {}, got {})",
                    context, expected, actual
                )
            }
            Self::AllocationFailed { context, bytes } => {
                write!(f, "{}: failed to allocate {} bytes", context, bytes)
            }
            Self::InvalidDerivedValue { context } => {
                write!(f, "{}: derived value failed validation", context)
            }
            Self::SerializationError { context, reason } => {
                write!(f, "{}: serialization error: {}", context, reason)
            }
            Self::Other { context } => write!(f, "{}: error", context),
        }
    }
}
