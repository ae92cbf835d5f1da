//! Error handling for key-agreement operations

use core::fmt;

use dlcrypt_algorithms::error::Error as PrimitiveError;
use dlcrypt_api::Error as CoreError;

/// Error type for key-agreement operations
///
/// Each failure mode of the agreement operation has its own variant, so
/// callers can discriminate them directly; `From<Error> for
/// dlcrypt_api::Error` folds them into the library-wide taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Arithmetic engine error
    Primitive(PrimitiveError),

    /// Reserved flag bits were set
    UnsupportedFlags {
        /// The raw flag bits the caller passed
        flags: u32,
    },

    /// The caller's key does not carry a private exponent
    MissingPrivateKey,

    /// The two keys belong to different groups
    GroupMismatch,

    /// Group parameters were rejected at construction
    InvalidGroup {
        /// Why the parameters were rejected
        reason: &'static str,
    },

    /// Key material was rejected at import
    InvalidKey {
        /// Which key ("private" or "public")
        key_type: &'static str,
        /// Why the key was rejected
        reason: &'static str,
    },

    /// The output buffer length does not equal the group's serialized
    /// element size
    WrongOutputSize {
        /// Required length in bytes
        expected: usize,
        /// Provided length in bytes
        actual: usize,
    },

    /// Scratch memory could not be allocated
    ScratchAllocation {
        /// Requested size in bytes
        bytes: usize,
    },

    /// The computed shared secret was exactly zero
    DegenerateSecret,
}

/// Result type for key-agreement operations
pub type Result<T> = core::result::Result<T, Error>;

impl From<PrimitiveError> for Error {
    fn from(err: PrimitiveError) -> Self {
        Error::Primitive(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Primitive(e) => write!(f, "arithmetic error: {}", e),
            Error::UnsupportedFlags { flags } => {
                write!(f, "unsupported flags 0x{:08x}", flags)
            }
            Error::MissingPrivateKey => write!(f, "key has no private exponent"),
            Error::GroupMismatch => write!(f, "keys belong to different groups"),
            Error::InvalidGroup { reason } => write!(f, "invalid group parameters: {}", reason),
            Error::InvalidKey { key_type, reason } => {
                write!(f, "invalid {} key: {}", key_type, reason)
            }
            Error::WrongOutputSize { expected, actual } => {
                write!(
                    f,
                    "wrong output size: expected {} bytes, got {}",
                    expected, actual
                )
            }
            Error::ScratchAllocation { bytes } => {
                write!(f, "failed to allocate {} bytes of scratch", bytes)
            }
            Error::DegenerateSecret => write!(f, "derived secret is zero"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Primitive(e) => e.into(),
            Error::UnsupportedFlags { .. } => CoreError::InvalidParameter {
                context: "secret_agreement",
                reason: "reserved flags set",
            },
            Error::MissingPrivateKey => CoreError::InvalidParameter {
                context: "secret_agreement",
                reason: "key has no private exponent",
            },
            Error::GroupMismatch => CoreError::InvalidParameter {
                context: "secret_agreement",
                reason: "keys belong to different groups",
            },
            Error::InvalidGroup { reason } => CoreError::InvalidParameter {
                context: "DhGroup::from_params",
                reason,
            },
            Error::InvalidKey { key_type, reason } => CoreError::InvalidKey {
                context: key_type,
                reason,
            },
            Error::WrongOutputSize { expected, actual } => CoreError::InvalidLength {
                context: "secret_agreement",
                expected,
                actual,
            },
            Error::ScratchAllocation { bytes } => CoreError::AllocationFailed {
                context: "secret_agreement",
                bytes,
            },
            Error::DegenerateSecret => CoreError::InvalidDerivedValue {
                context: "secret_agreement",
            },
        }
    }
}
