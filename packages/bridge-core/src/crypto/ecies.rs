//! # ECIES Envelope
//!
//! Public-key encryption of bridge payloads on secp256k1.
//!
//! ## Wire Format
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ECIES CIPHERTEXT                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌────────────────────┬──────────────────┬──────────────────────────┐  │
//! │  │ Ephemeral pubkey   │ HMAC-SHA1 tag    │ AES-256-CBC ciphertext   │  │
//! │  │ 65 B, uncompressed │ 20 B             │ 16·k B, k ≥ 1, PKCS7     │  │
//! │  └────────────────────┴──────────────────┴──────────────────────────┘  │
//! │                                                                         │
//! │  Transmitted as lowercase hex.                                         │
//! │                                                                         │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  SEAL                                 OPEN                              │
//! │  ────                                 ────                              │
//! │  e ← random scalar                    split R ‖ tag ‖ c                 │
//! │  R = e·G                              S = d·R                           │
//! │  S = e·Q                              (kE, kM) = SHA-512(S.x)           │
//! │  (kE, kM) = SHA-512(S.x)              check tag = HMAC(kM, iv‖R‖c)     │
//! │  c = AES-CBC(kE, iv = 0, m)           m = AES-CBC⁻¹(kE, iv = 0, c)      │
//! │  tag = HMAC(kM, iv ‖ R ‖ c)                                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The tag is checked before any decryption happens, so a tampered
//! ciphertext never reaches the padding check.

use super::cipher::{self, ZERO_IV};
use super::keys::{PrivateKey, PublicKey};
use super::mac;
use super::point::UNCOMPRESSED_SIZE;
use crate::document::Document;
use crate::error::{Error, Result};

/// Size of the ephemeral public key prefix
pub const EPHEMERAL_KEY_SIZE: usize = UNCOMPRESSED_SIZE;

/// Shortest input split into key and tag; the cipher blocks are checked later
pub const MIN_CIPHERTEXT_SIZE: usize = EPHEMERAL_KEY_SIZE + mac::TAG_SIZE;

/// Plaintext recovered by [`decrypt`]
///
/// Payloads that parse as a non-empty JSON object come back as a
/// [`Document`] with key order preserved. Anything else is handed back as
/// text, or as raw bytes when it is not valid UTF-8.
#[derive(Debug, Clone, PartialEq)]
pub enum Decrypted {
    /// A JSON object with at least one key
    Document(Document),
    /// UTF-8 text that is not a non-empty JSON object
    Text(String),
    /// Bytes that are not valid UTF-8
    Binary(Vec<u8>),
}

impl Decrypted {
    /// Classify raw plaintext
    pub fn from_plaintext(plaintext: Vec<u8>) -> Self {
        match Document::from_json_slice(&plaintext) {
            Ok(doc) if !doc.is_empty() => Decrypted::Document(doc),
            _ => match String::from_utf8(plaintext) {
                Ok(text) => Decrypted::Text(text),
                Err(err) => Decrypted::Binary(err.into_bytes()),
            },
        }
    }

    /// Borrow the document, if the payload was one
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Decrypted::Document(doc) => Some(doc),
            _ => None,
        }
    }

    /// Take the document, if the payload was one
    pub fn into_document(self) -> Option<Document> {
        match self {
            Decrypted::Document(doc) => Some(doc),
            _ => None,
        }
    }

    /// Borrow the text, if the payload was text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Decrypted::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Bytes as they would be re-encrypted
    ///
    /// Documents are re-serialized, which reproduces the original bytes
    /// whenever the sender used the same compact encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Decrypted::Document(doc) => doc.to_json_vec(),
            Decrypted::Text(text) => Ok(text.as_bytes().to_vec()),
            Decrypted::Binary(bytes) => Ok(bytes.clone()),
        }
    }
}

fn invalid_key(role: &'static str) -> impl FnOnce(Error) -> Error {
    move |err| Error::InvalidKey(format!("{}: {}", role, err))
}

// ============================================================================
// BINARY API
// ============================================================================

/// Encrypt `plaintext` for `recipient`, returning the binary envelope
pub fn seal(plaintext: &[u8], recipient: &PublicKey) -> Result<Vec<u8>> {
    let ephemeral = PrivateKey::generate()?;
    let keys = ephemeral.encapsulate(recipient);
    let ephemeral_public = ephemeral.public_key().to_bytes(false);

    let ciphertext = cipher::encrypt(plaintext, keys.encryption_key(), &ZERO_IV);
    let tag = mac::tag(keys.mac_key(), &[&ZERO_IV[..], &ephemeral_public[..], &ciphertext[..]])?;

    let mut envelope = Vec::with_capacity(EPHEMERAL_KEY_SIZE + mac::TAG_SIZE + ciphertext.len());
    envelope.extend_from_slice(&ephemeral_public);
    envelope.extend_from_slice(&tag);
    envelope.extend_from_slice(&ciphertext);

    tracing::debug!(
        "Sealed {} plaintext bytes into {} byte envelope",
        plaintext.len(),
        envelope.len()
    );
    Ok(envelope)
}

/// Authenticate and decrypt a binary envelope
///
/// ## Errors
///
/// - `InvalidEncoding`: too short, bad block alignment, or bad padding
/// - `InvalidKey`: the ephemeral key is not a curve point
/// - `AuthenticationFailed`: the tag does not match
pub fn open(envelope: &[u8], private_key: &PrivateKey) -> Result<Vec<u8>> {
    if envelope.len() < MIN_CIPHERTEXT_SIZE {
        return Err(Error::InvalidEncoding(format!(
            "ciphertext is {} bytes, need at least {}",
            envelope.len(),
            MIN_CIPHERTEXT_SIZE
        )));
    }

    let (ephemeral_bytes, rest) = envelope.split_at(EPHEMERAL_KEY_SIZE);
    let (tag, ciphertext) = rest.split_at(mac::TAG_SIZE);

    let ephemeral = PublicKey::from_bytes(ephemeral_bytes).map_err(invalid_key("ephemeral public key"))?;
    let keys = private_key.encapsulate(&ephemeral);

    if let Err(err) = mac::verify(keys.mac_key(), &[&ZERO_IV[..], ephemeral_bytes, ciphertext], tag) {
        tracing::warn!("Rejected ECIES payload: MAC mismatch");
        return Err(err);
    }

    let plaintext = cipher::decrypt(ciphertext, keys.encryption_key(), &ZERO_IV)?;
    tracing::debug!("Opened {} byte envelope", envelope.len());
    Ok(plaintext)
}

// ============================================================================
// HEX API
// ============================================================================

/// Encrypt bytes for the hex-encoded recipient public key
///
/// Each call draws a fresh ephemeral key, so encrypting the same
/// plaintext twice gives different ciphertexts.
///
/// ## Errors
///
/// - `InvalidKey`: the recipient key does not parse or is off-curve
/// - `RngFailed`: no entropy for the ephemeral key
pub fn encrypt(plaintext: &[u8], recipient_public_key: &str) -> Result<String> {
    let recipient = PublicKey::from_hex(recipient_public_key).map_err(invalid_key("recipient public key"))?;
    seal(plaintext, &recipient).map(hex::encode)
}

/// Encrypt a UTF-8 string
pub fn encrypt_str(plaintext: &str, recipient_public_key: &str) -> Result<String> {
    encrypt(plaintext.as_bytes(), recipient_public_key)
}

/// Encrypt the compact JSON serialization of a document
pub fn encrypt_document(document: &Document, recipient_public_key: &str) -> Result<String> {
    encrypt(&document.to_json_vec()?, recipient_public_key)
}

/// Decrypt a hex ciphertext with a hex private key
///
/// ## Errors
///
/// - `InvalidEncoding`: bad hex in either argument, short input, or
///   malformed padding
/// - `InvalidKey`: the private key scalar or the ephemeral key is invalid
/// - `AuthenticationFailed`: the MAC does not match
pub fn decrypt(ciphertext: &str, private_key: &str) -> Result<Decrypted> {
    let envelope = hex::decode(ciphertext)?;
    let key = PrivateKey::from_hex(private_key)?;
    open(&envelope, &key).map(Decrypted::from_plaintext)
}

// ============================================================================
// TESTS
// ============================================================================
