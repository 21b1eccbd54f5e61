//! # Error Handling
//!
//! Error types for Bridge Core.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Encoding Errors                                                   │
//! │  │   └── InvalidEncoding       - Malformed hex / binary / JSON input   │
//! │  │                                                                      │
//! │  ├── Key Errors                                                        │
//! │  │   ├── InvalidKey            - Key fails length or range checks      │
//! │  │   ├── InvalidPoint          - Point is not on secp256k1             │
//! │  │   └── RngFailed             - Entropy source unavailable            │
//! │  │                                                                      │
//! │  ├── Crypto Errors                                                     │
//! │  │   ├── AuthenticationFailed  - ECIES MAC mismatch (fail closed)      │
//! │  │   ├── MissingSignature      - Document has no signature field       │
//! │  │   └── SigningFailed         - ECDSA signing failed                  │
//! │  │                                                                      │
//! │  └── Document Errors                                                   │
//! │      └── SerializationError    - Document could not be serialized      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A signature that simply does not match is *not* an error: `verify`
//! returns `Ok(false)`. Errors are reserved for malformed input.

use thiserror::Error;

/// Result type alias for Bridge Core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Bridge Core
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Encoding Errors (100-199)
    // ========================================================================

    /// Malformed hex, binary or textual input
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    // ========================================================================
    // Key Errors (200-299)
    // ========================================================================

    /// Key fails length or domain checks
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Encoded point does not lie on the curve
    #[error("Invalid point: {0}")]
    InvalidPoint(String),

    /// Random number generation failed
    #[error("Random number generation failed")]
    RngFailed,

    // ========================================================================
    // Crypto Errors (300-399)
    // ========================================================================

    /// The ECIES authentication tag did not match
    #[error("Authentication failed: MAC mismatch")]
    AuthenticationFailed,

    /// `verify` was called on a document without a signature field
    #[error("Message must contain a signature")]
    MissingSignature,

    /// Signing failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    // ========================================================================
    // Document Errors (400-499)
    // ========================================================================

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl Error {
    /// Get a stable numeric error code
    ///
    /// - 100-199: Encoding
    /// - 200-299: Keys and points
    /// - 300-399: Crypto
    /// - 400-499: Documents
    pub fn code(&self) -> i32 {
        match self {
            // Encoding (100-199)
            Error::InvalidEncoding(_) => 100,

            // Keys (200-299)
            Error::InvalidKey(_) => 200,
            Error::InvalidPoint(_) => 201,
            Error::RngFailed => 202,

            // Crypto (300-399)
            Error::AuthenticationFailed => 300,
            Error::MissingSignature => 301,
            Error::SigningFailed(_) => 302,

            // Documents (400-499)
            Error::SerializationError(_) => 400,
        }
    }

    /// Check if this error is recoverable by retrying
    ///
    /// Every operation in this crate is a pure function of its inputs, so
    /// only an entropy failure can succeed on a second attempt. Retry policy
    /// itself belongs to the transport layer.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::RngFailed)
    }
}

// ============================================================================
// ERROR CONVERSIONS
// ============================================================================

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}

impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Error::InvalidEncoding(format!("cannot decode hex string: {}", err))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::InvalidEncoding("test".into()).code(), 100);
        assert_eq!(Error::InvalidKey("test".into()).code(), 200);
        assert_eq!(Error::InvalidPoint("test".into()).code(), 201);
        assert_eq!(Error::AuthenticationFailed.code(), 300);
        assert_eq!(Error::MissingSignature.code(), 301);
        assert_eq!(Error::SerializationError("test".into()).code(), 400);
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(Error::RngFailed.is_recoverable());
        assert!(!Error::AuthenticationFailed.is_recoverable());
        assert!(!Error::MissingSignature.is_recoverable());
    }

    #[test]
    fn test_hex_error_conversion() {
        let err: Error = hex::decode("zz").unwrap_err().into();
        assert!(matches!(err, Error::InvalidEncoding(_)));
        assert!(err.to_string().contains("hex"));
    }
}
