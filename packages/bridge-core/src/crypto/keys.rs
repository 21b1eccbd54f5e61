//! # Key Management
//!
//! secp256k1 private and public keys.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          KEY TYPES                                      │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  PrivateKey                                                     │   │
//! │  │  ──────────                                                      │   │
//! │  │                                                                  │   │
//! │  │  • Scalar d with 1 ≤ d < n, 32 bytes big-endian (64 hex chars)  │   │
//! │  │  • Used to sign documents and to decrypt ECIES payloads         │   │
//! │  │  • Zeroized on drop, redacted in Debug output                   │   │
//! │  │                                                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  PublicKey                                                      │   │
//! │  │  ─────────                                                       │   │
//! │  │                                                                  │   │
//! │  │  • Point Q = d·G, never the identity                            │   │
//! │  │  • Parsed from 33-byte compressed or 65-byte uncompressed SEC1  │   │
//! │  │  • Used to verify signatures and as an ECIES recipient          │   │
//! │  │                                                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use k256::ecdsa::{SigningKey, VerifyingKey};
use k256::{AffinePoint, SecretKey};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use super::kdf::{derive_keys, DerivedKeys};
use super::point;
use crate::error::{Error, Result};

/// Size of a private key scalar in bytes
pub const PRIVATE_KEY_SIZE: usize = 32;

/// A secp256k1 private key
///
/// ## Security
///
/// - The scalar is zeroized when this struct is dropped
/// - `Debug` never prints the scalar
#[derive(Clone)]
pub struct PrivateKey {
    // k256::SecretKey zeroizes its own scalar on drop
    secret: SecretKey,
    public: PublicKey,
}

impl PrivateKey {
    /// Generate a new random private key
    ///
    /// Draws 32 bytes from the operating system's secure random number
    /// generator and redraws until the scalar lies in [1, n).
    pub fn generate() -> Result<Self> {
        let mut bytes = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        loop {
            OsRng
                .try_fill_bytes(&mut bytes[..])
                .map_err(|_| Error::RngFailed)?;
            if let Ok(secret) = SecretKey::from_slice(&bytes[..]) {
                return Ok(Self::from_secret(secret));
            }
        }
    }

    /// Create a private key from its 32-byte big-endian scalar
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PRIVATE_KEY_SIZE {
            return Err(Error::InvalidKey(format!(
                "private key must be {} bytes, got {}",
                PRIVATE_KEY_SIZE,
                bytes.len()
            )));
        }

        SecretKey::from_slice(bytes)
            .map(Self::from_secret)
            .map_err(|_| Error::InvalidKey("private key scalar out of range".into()))
    }

    /// Parse a private key from 64 hex characters
    ///
    /// ## Errors
    ///
    /// - `InvalidEncoding`: the string is not hex
    /// - `InvalidKey`: wrong length, zero, or not below the group order
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = Zeroizing::new(hex::decode(hex_str)?);
        Self::from_bytes(&bytes)
    }

    fn from_secret(secret: SecretKey) -> Self {
        let public = PublicKey {
            inner: secret.public_key(),
        };
        Self { secret, public }
    }

    /// Get the matching public key
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Export the raw scalar
    ///
    /// ## Security Warning
    ///
    /// The returned buffer is zeroized on drop. Do not copy it elsewhere.
    pub fn to_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_SIZE]> {
        let mut out = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        out.copy_from_slice(&self.secret.to_bytes());
        out
    }

    /// Derive the ECIES encryption and MAC keys shared with `peer`
    ///
    /// The shared secret is the x coordinate of `d · peer`. Because `peer`
    /// is a validated [`PublicKey`], the product is never the identity.
    pub fn encapsulate(&self, peer: &PublicKey) -> DerivedKeys {
        let shared = k256::ecdh::diffie_hellman(self.secret.to_nonzero_scalar(), peer.as_affine());
        derive_keys(shared.raw_secret_bytes())
    }

    pub(crate) fn signing_key(&self) -> SigningKey {
        SigningKey::from(&self.secret)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

/// A secp256k1 public key
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    inner: k256::PublicKey,
}

impl PublicKey {
    /// Parse a SEC1-encoded public key (compressed or uncompressed)
    ///
    /// ## Errors
    ///
    /// - `InvalidEncoding`: wrong length, tag, or coordinate range
    /// - `InvalidPoint`: the point is not on secp256k1
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let affine = point::decode(bytes)?;
        k256::PublicKey::from_affine(affine)
            .map(|inner| Self { inner })
            .map_err(|_| Error::InvalidPoint("public key is the point at infinity".into()))
    }

    /// Parse a hex-encoded SEC1 public key
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        Self::from_bytes(&hex::decode(hex_str)?)
    }

    /// SEC1 encoding, 33 bytes if `compressed` else 65 bytes
    pub fn to_bytes(&self, compressed: bool) -> Vec<u8> {
        point::encode(self.as_affine(), compressed)
    }

    /// Hex form of [`to_bytes`](Self::to_bytes)
    pub fn to_hex(&self, compressed: bool) -> String {
        hex::encode(self.to_bytes(compressed))
    }

    pub(crate) fn as_affine(&self) -> &AffinePoint {
        self.inner.as_affine()
    }

    pub(crate) fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey::from(&self.inner)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex(true))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE_KEY: &str = "ba4523e5091939113423a709b5924708af30fc5a958ac71f48eb030b84494702";
    const PUBLIC_KEY: &str = "04c1a0d4269ce2b0e1dab89e8defbfc9c0c780e6b769f1dba7cbc3531c8167ae7f0b49b1a36d574fd0cbb353f5d31152110daa541213cf0919c1be708a112163e3";

    // n, the group order
    const ORDER: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

    #[test]
    fn test_public_key_derivation() {
        let key = PrivateKey::from_hex(PRIVATE_KEY).unwrap();
        assert_eq!(key.public_key().to_hex(false), PUBLIC_KEY);
    }

    #[test]
    fn test_generate_is_random() {
        let a = PrivateKey::generate().unwrap();
        let b = PrivateKey::generate().unwrap();
        assert_ne!(a.to_bytes()[..], b.to_bytes()[..]);
        assert_ne!(a.public_key(), b.public_key());
    }

    #[test]
    fn test_private_key_bytes_roundtrip() {
        let key = PrivateKey::from_hex(PRIVATE_KEY).unwrap();
        assert_eq!(hex::encode(&key.to_bytes()[..]), PRIVATE_KEY);
    }

    #[test]
    fn test_private_key_rejections() {
        assert!(matches!(
            PrivateKey::from_hex("not hex"),
            Err(Error::InvalidEncoding(_))
        ));
        assert!(matches!(
            PrivateKey::from_hex("ba4523"),
            Err(Error::InvalidKey(_))
        ));
        assert!(matches!(
            PrivateKey::from_hex(&"00".repeat(32)),
            Err(Error::InvalidKey(_))
        ));
        assert!(matches!(
            PrivateKey::from_hex(ORDER),
            Err(Error::InvalidKey(_))
        ));
    }

    #[test]
    fn test_debug_redacts_scalar() {
        let key = PrivateKey::from_hex(PRIVATE_KEY).unwrap();
        let printed = format!("{:?}", key);
        assert!(!printed.contains(PRIVATE_KEY));
    }

    #[test]
    fn test_public_key_accepts_both_forms() {
        let full = PublicKey::from_hex(PUBLIC_KEY).unwrap();
        let short = PublicKey::from_hex(&full.to_hex(true)).unwrap();
        assert_eq!(full, short);
        assert_eq!(short.to_bytes(true).len(), 33);
        assert_eq!(short.to_bytes(false).len(), 65);
    }

    #[test]
    fn test_codec_roundtrip_generated_keys() {
        for _ in 0..64 {
            let key = PrivateKey::generate().unwrap();
            let public = key.public_key();

            let compressed = point::decode(&public.to_bytes(true)).unwrap();
            let uncompressed = point::decode(&public.to_bytes(false)).unwrap();
            assert_eq!(compressed, uncompressed);
            assert_eq!(&compressed, public.as_affine());

            assert_eq!(PublicKey::from_bytes(&public.to_bytes(true)).unwrap(), *public);
            assert_eq!(PublicKey::from_bytes(&public.to_bytes(false)).unwrap(), *public);
        }
    }

    #[test]
    fn test_public_key_rejections() {
        assert!(matches!(
            PublicKey::from_hex("zz"),
            Err(Error::InvalidEncoding(_))
        ));
        assert!(matches!(
            PublicKey::from_hex(&PUBLIC_KEY[..64]),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_encapsulate_agrees_both_ways() {
        let alice = PrivateKey::generate().unwrap();
        let bob = PrivateKey::generate().unwrap();

        let ab = alice.encapsulate(bob.public_key());
        let ba = bob.encapsulate(alice.public_key());

        assert_eq!(ab.encryption_key(), ba.encryption_key());
        assert_eq!(ab.mac_key(), ba.mac_key());
    }
}
