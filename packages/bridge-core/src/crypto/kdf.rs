//! # Key Derivation
//!
//! Splits an ECDH shared secret into the ECIES encryption and MAC keys.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 SHARED SECRET → MESSAGE KEYS                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  S = d · Q                     (ECDH on secp256k1)                     │
//! │  │                                                                      │
//! │  ▼                                                                      │
//! │  S.x as a minimal big-endian integer (leading zero bytes dropped)      │
//! │  │                                                                      │
//! │  ▼                                                                      │
//! │  SHA-512 ──► 64 bytes                                                  │
//! │              ├── [0..32)  encryption key  (AES-256-CBC)                │
//! │              └── [32..64) MAC key         (HMAC-SHA1)                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Counterpart implementations hash the integer form of S.x, so when the
//! coordinate starts with a zero byte the hash input is shorter than 32
//! bytes. Padding it would break interoperability for roughly one shared
//! secret in 256.

use sha2::{Digest, Sha512};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of each derived key in bytes
pub const DERIVED_KEY_SIZE: usize = 32;

/// Symmetric keys derived from one ECDH exchange
///
/// Both keys are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKeys {
    encryption_key: [u8; DERIVED_KEY_SIZE],
    mac_key: [u8; DERIVED_KEY_SIZE],
}

impl DerivedKeys {
    /// AES-256 key
    pub fn encryption_key(&self) -> &[u8; DERIVED_KEY_SIZE] {
        &self.encryption_key
    }

    /// HMAC key
    pub fn mac_key(&self) -> &[u8; DERIVED_KEY_SIZE] {
        &self.mac_key
    }
}

/// Derive the key pair from the x coordinate of a shared point
pub fn derive_keys(shared_x: &[u8]) -> DerivedKeys {
    let mut digest = Sha512::digest(strip_leading_zeros(shared_x));

    let mut keys = DerivedKeys {
        encryption_key: [0u8; DERIVED_KEY_SIZE],
        mac_key: [0u8; DERIVED_KEY_SIZE],
    };
    keys.encryption_key
        .copy_from_slice(&digest[..DERIVED_KEY_SIZE]);
    keys.mac_key.copy_from_slice(&digest[DERIVED_KEY_SIZE..]);

    digest.as_mut_slice().zeroize();
    keys
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(bytes.len());
    &bytes[start..]
}

// ============================================================================
// TESTS
// ============================================================================
