//! # Cryptography Module
//!
//! secp256k1 primitives used to protect bridge messages.
//!
//! ## Security Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CRYPTOGRAPHIC ARCHITECTURE                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 ENCRYPTION SCHEME (ECIES)                       │   │
//! │  ├─────────────────────────────────────────────────────────────────┤   │
//! │  │                                                                 │   │
//! │  │  1. Key Exchange: ECDH on secp256k1                            │   │
//! │  │     Ephemeral Private × Recipient Public = Shared Point S      │   │
//! │  │                                                                 │   │
//! │  │  2. Key Derivation: SHA-512(S.x)                               │   │
//! │  │     → (Encryption Key, MAC Key), 32 bytes each                 │   │
//! │  │                                                                 │   │
//! │  │  3. Encryption: AES-256-CBC, PKCS7, zero IV                    │   │
//! │  │                                                                 │   │
//! │  │  4. Authentication: HMAC-SHA1 over IV ‖ R ‖ ciphertext         │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 SIGNATURE SCHEME                                │   │
//! │  ├─────────────────────────────────────────────────────────────────┤   │
//! │  │                                                                 │   │
//! │  │  ECDSA on secp256k1 over SHA-256 of the canonical document     │   │
//! │  │                                                                 │   │
//! │  │  • Nonce: RFC 6979 (deterministic)                             │   │
//! │  │  • s normalized to the lower half of the group order           │   │
//! │  │  • Encoding: r ‖ s, 64 bytes, lowercase hex                    │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm Choices
//!
//! The algorithms are fixed by the counterpart implementations this crate
//! interoperates with and cannot be negotiated.
//!
//! | Algorithm | Purpose | Crate |
//! |-----------|---------|-------|
//! | secp256k1 ECDH / ECDSA | Key exchange, signatures | `k256` |
//! | AES-256-CBC + PKCS7 | Payload encryption | `aes`, `cbc` |
//! | HMAC-SHA1 | Envelope authentication | `hmac`, `sha1` |
//! | SHA-256 / SHA-512 | Signing digest, key derivation | `sha2` |
//!
//! ## Security Considerations
//!
//! 1. **Key Zeroization**: private scalars and derived keys are zeroized when dropped
//! 2. **Constant-Time Comparison**: MAC tags are compared with `Mac::verify_slice`
//! 3. **Secure Random**: ephemeral keys come from `rand::rngs::OsRng`
//! 4. **Fail Closed**: no plaintext is produced before the MAC matches

pub mod cipher;
pub mod ecies;
mod kdf;
mod keys;
pub mod mac;
pub mod point;
mod signing;

pub use ecies::{decrypt, encrypt, encrypt_document, encrypt_str, open, seal, Decrypted};
pub use kdf::{derive_keys, DerivedKeys};
pub use keys::{PrivateKey, PublicKey, PRIVATE_KEY_SIZE};
pub use signing::{
    sign, sign_with_key, verify, verify_with_environment, verify_with_key, Signature,
    SIGNATURE_FIELD, SIGNATURE_SIZE,
};
