//! Error handling for the dlcrypt ecosystem

pub mod types;

// Re-export the primary error type and result
pub use types::{Error, Result};

// Implement standard Error trait when std is available
#[cfg(feature = "std")]
impl std::error::Error for Error {}
