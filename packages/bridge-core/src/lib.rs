//! # Bridge Core
//!
//! Cryptographic core for compliance messages exchanged between virtual
//! asset service providers over the bridge REST protocol.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         BRIDGE CORE MODULES                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────┐  ┌──────────────────────────────┐  ┌──────────────┐   │
//! │  │  Document   │  │           Crypto             │  │    Config    │   │
//! │  │             │  │                              │  │              │   │
//! │  │ - Ordered   │──► - Point codec    - ECIES     │◄─┤ - Bridge keys│   │
//! │  │   keys      │  │ - Keys / ECDH    - Signing   │  │ - Statuses   │   │
//! │  │ - Canonical │  │ - AES-CBC        - HMAC      │  │ - Reject     │   │
//! │  │   JSON      │  │                              │  │   codes      │   │
//! │  └─────────────┘  └──────────────────────────────┘  └──────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error types for the entire library
//! - [`document`] - Insertion-ordered JSON documents
//! - [`crypto`] - Point codec, keys, ECIES envelope, document signatures
//! - [`config`] - Published bridge environments and protocol constants
//!
//! ## Message Protection
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          SECURITY LAYERS                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Layer 1: Transport (HTTPS, outside this crate)                        │
//! │                                                                         │
//! │  Layer 2: Private info encryption (ECIES on secp256k1)                 │
//! │  ─────────────────────────────────────────────────────                  │
//! │  Originator and beneficiary details are encrypted for the peer         │
//! │  VASP's public key. Only that VASP can read them.                      │
//! │                                                                         │
//! │  Layer 3: Message signatures (ECDSA on secp256k1)                      │
//! │  ───────────────────────────────────────────────                        │
//! │  Every message carries a signature over its canonical JSON form.       │
//! │  Key order is part of what is signed.                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use bridge_core::{Document, PrivateKey};
//!
//! let key = PrivateKey::generate().unwrap();
//! let private_hex = hex::encode(&key.to_bytes()[..]);
//! let public_hex = key.public_key().to_hex(false);
//!
//! let mut message = Document::new();
//! message.set("transfer_id", "b97903fd");
//! message.set("permission_status", "ACCEPTED");
//!
//! bridge_core::sign(&mut message, &private_hex).unwrap();
//! assert!(bridge_core::verify(&message, &public_hex).unwrap());
//!
//! let ciphertext = bridge_core::encrypt_document(&message, &public_hex).unwrap();
//! let decrypted = bridge_core::decrypt(&ciphertext, &private_hex).unwrap();
//! assert_eq!(decrypted.as_document(), Some(&message));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod config;
pub mod crypto;
pub mod document;
pub mod error;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use config::{CryptoConfig, Environment, PermissionStatus, RejectCode};
pub use crypto::{
    decrypt, encrypt, encrypt_document, encrypt_str, sign, verify, verify_with_environment,
    Decrypted, PrivateKey, PublicKey, Signature,
};
pub use document::{documents_to_json, Document, Value};
pub use error::{Error, Result};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Returns the version of Bridge Core
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// ============================================================================
// TESTS
// ============================================================================
