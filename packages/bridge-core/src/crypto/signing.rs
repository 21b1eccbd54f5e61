//! # Document Signatures
//!
//! ECDSA over secp256k1 on the canonical serialization of a [`Document`].
//!
//! ## Signature Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         SIGNING FLOW                                    │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  SIGNER                                                                │
//! │  ──────                                                                 │
//! │  1. document["signature"] = ""     (appended if absent, else in place) │
//! │  2. bytes  = compact JSON, keys in insertion order                     │
//! │  3. digest = SHA-256(bytes)                                            │
//! │  4. (r, s) = ECDSA(d, digest), RFC 6979 nonce, low-S                   │
//! │  5. document["signature"] = hex(r ‖ s)     (128 hex chars)             │
//! │                                                                         │
//! │  VERIFIER                                                              │
//! │  ────────                                                               │
//! │  1. copy the document, read and decode "signature"                     │
//! │  2. copy["signature"] = ""                                             │
//! │  3. digest = SHA-256(compact JSON of copy)                             │
//! │  4. check (r, s) against Q                                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The signature field keeps its position, so a verifier sees exactly the
//! bytes the signer hashed. Moving the field changes those bytes and the
//! signature no longer verifies.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::keys::{PrivateKey, PublicKey};
use crate::config::Environment;
use crate::document::{Document, Value};
use crate::error::{Error, Result};

/// Name of the field that carries the signature
pub const SIGNATURE_FIELD: &str = "signature";

/// Size of a compact `r ‖ s` signature in bytes
pub const SIGNATURE_SIZE: usize = 64;

/// A compact secp256k1 ECDSA signature
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(#[serde(with = "signature_hex")] pub [u8; SIGNATURE_SIZE]);

impl Signature {
    /// Create from a slice (must be exactly 64 bytes)
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() != SIGNATURE_SIZE {
            return Err(Error::InvalidEncoding(format!(
                "signature must be {} bytes, got {}",
                SIGNATURE_SIZE,
                slice.len()
            )));
        }
        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    /// Encode as hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Decode from hex string
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        Self::from_slice(&hex::decode(hex_str)?)
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Hash a document the way both signer and verifier see it
fn signing_digest(document: &Document) -> Result<[u8; 32]> {
    let bytes = document.to_json_vec()?;
    Ok(Sha256::digest(bytes).into())
}

// ============================================================================
// SIGN
// ============================================================================

/// Sign `document` in place with a hex-encoded private key
///
/// On success the document's `signature` field holds 128 lowercase hex
/// characters. Signing is deterministic: the same key and document always
/// produce the same signature.
///
/// ## Errors
///
/// - `InvalidEncoding` / `InvalidKey`: the private key does not parse
/// - `SerializationError`: the document cannot be serialized
/// - `SigningFailed`: the signer rejected the digest
pub fn sign(document: &mut Document, private_key: &str) -> Result<()> {
    let key = PrivateKey::from_hex(private_key)?;
    sign_with_key(document, &key).map(|_| ())
}

/// Sign `document` in place and return the signature
pub fn sign_with_key(document: &mut Document, key: &PrivateKey) -> Result<Signature> {
    document.set(SIGNATURE_FIELD, "");
    let digest = signing_digest(document)?;

    let signature: k256::ecdsa::Signature = key
        .signing_key()
        .sign_prehash(&digest)
        .map_err(|e| Error::SigningFailed(e.to_string()))?;
    let signature = Signature::from_slice(&signature.to_bytes())?;

    document.set(SIGNATURE_FIELD, signature.to_hex());
    tracing::debug!("Signed document with {} fields", document.len());
    Ok(signature)
}

// ============================================================================
// VERIFY
// ============================================================================

/// Verify the signature carried by `document` against a hex public key
///
/// Returns `Ok(false)` when the signature simply does not match. The
/// caller's document is never modified.
///
/// ## Errors
///
/// - `MissingSignature`: the document has no `signature` field
/// - `InvalidEncoding`: the signature is not a hex string
/// - `InvalidEncoding` / `InvalidPoint`: the public key does not parse
pub fn verify(document: &Document, public_key: &str) -> Result<bool> {
    let key = PublicKey::from_hex(public_key)?;
    verify_with_key(document, &key)
}

/// Verify against the central bridge key of `environment`
pub fn verify_with_environment(document: &Document, environment: Environment) -> Result<bool> {
    verify(document, environment.bridge_public_key())
}

/// Verify the signature carried by `document` against `key`
pub fn verify_with_key(document: &Document, key: &PublicKey) -> Result<bool> {
    let mut unsigned = document.clone();
    let signature_hex = match unsigned.get(SIGNATURE_FIELD) {
        None => {
            tracing::warn!("Cannot verify document without a signature field");
            return Err(Error::MissingSignature);
        }
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            return Err(Error::InvalidEncoding(
                "signature field must be a hex string".into(),
            ))
        }
    };
    let signature_bytes = hex::decode(&signature_hex)?;

    unsigned.set(SIGNATURE_FIELD, "");
    let digest = signing_digest(&unsigned)?;

    // A well-formed hex string of the wrong size, or with r or s out of
    // range, cannot match any key.
    let signature = match k256::ecdsa::Signature::from_slice(&signature_bytes) {
        Ok(signature) => signature,
        Err(_) => {
            tracing::debug!(
                "Signature of {} bytes is not a valid scalar pair",
                signature_bytes.len()
            );
            return Ok(false);
        }
    };

    let valid = key
        .verifying_key()
        .verify_prehash(&digest, &signature)
        .is_ok();
    if !valid {
        tracing::debug!("Document signature did not verify");
    }
    Ok(valid)
}

/// Serde helper for signature bytes
mod signature_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8; 64], serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<[u8; 64], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("Invalid signature length"))
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

    fn transfer() -> Document {
        Document::from_json_str(
            r#"{"transfer_id":"b97903fd68fcff05cfe035482bc3cf7fd934505b4e0644e612087dca4bae37e4","txid":"6f721fba0d405df21fb27dd76cfe2b548907f3881c5625b9cfe624c15c3178ae"}"#,
        )
        .unwrap()
    }

    fn parties() -> Document {
        let mut originator = Document::new();
        originator.set("name", "Antoine Griezmann");
        originator.set("date_of_birth", "1991-03-21");

        let mut beneficiary = Document::new();
        beneficiary.set("name", "利昂內爾 梅西");

        let mut doc = Document::new();
        doc.set("originator", originator);
        doc.set("beneficiary", beneficiary);
        doc
    }

    fn credentials() -> Document {
        let mut doc = Document::new();
        doc.set("username", "kunming");
        doc.set("password", 1234);
        doc.set("signature", "abcdef");
        doc.set("abc", 1.234);
        doc
    }

    fn signature_of(doc: &Document) -> &str {
        doc.get(SIGNATURE_FIELD).and_then(Value::as_str).unwrap()
    }

    #[test]
    fn test_known_signatures() {
        let cases = [
            (transfer(), "a599a99d018f544701e3ae1217f783581a23228d23a5fe18ff96e9fb6471d75127943bd791e3d69495a787cc0a689b4777c875f5302bf116ee88ac27f5562b2a"),
            (parties(), "70be6318f31204c9fe28e0b30dabff02b2909105bd0a97d094d6ed5d497461077afa65b440afe37e238172a88b05f3240d0eabb09d008fa25ac0224a507c56b5"),
            (credentials(), "3bec3a43f9b5679647b0da870fb6c955488a47e7eb44f285491ebcf084ec69ca4170c8eb59f1f22002d5128c09affbadc8a56092c234dbfcedf916bf9dad17dc"),
        ];

        for (mut doc, expected) in cases {
            sign(&mut doc, PRIVATE_KEY).unwrap();
            assert_eq!(signature_of(&doc), expected);
            assert!(verify(&doc, PUBLIC_KEY).unwrap());
        }
    }

    #[test]
    fn test_signature_appended_last() {
        let mut doc = transfer();
        sign(&mut doc, PRIVATE_KEY).unwrap();
        let keys: Vec<_> = doc.keys().collect();
        assert_eq!(keys, ["transfer_id", "txid", "signature"]);
    }

    #[test]
    fn test_existing_signature_keeps_position() {
        let mut doc = credentials();
        sign(&mut doc, PRIVATE_KEY).unwrap();
        let keys: Vec<_> = doc.keys().collect();
        assert_eq!(keys, ["username", "password", "signature", "abc"]);
    }

    #[test]
    fn test_moved_signature_fails() {
        let mut signed = credentials();
        sign(&mut signed, PRIVATE_KEY).unwrap();

        let mut moved = Document::new();
        moved.set("username", "kunming");
        moved.set("password", 1234);
        moved.set("abc", 1.234);
        moved.set("signature", signature_of(&signed).to_owned());

        assert!(!verify(&moved, PUBLIC_KEY).unwrap());
    }

    #[test]
    fn test_reordered_fields_sign_differently() {
        let key = PrivateKey::from_hex(PRIVATE_KEY).unwrap();
        let mut xy: Document = vec![("x", 1), ("y", 2)].into_iter().collect();
        let mut yx: Document = vec![("y", 2), ("x", 1)].into_iter().collect();

        let sig_xy = sign_with_key(&mut xy, &key).unwrap();
        let sig_yx = sign_with_key(&mut yx, &key).unwrap();
        assert_ne!(sig_xy, sig_yx);
        assert!(verify_with_key(&xy, key.public_key()).unwrap());
        assert!(verify_with_key(&yx, key.public_key()).unwrap());

        // Each signature placed on the other field order.
        let mut swapped = yx.clone();
        swapped.set(SIGNATURE_FIELD, sig_xy.to_hex());
        assert!(!verify_with_key(&swapped, key.public_key()).unwrap());

        let mut swapped = xy.clone();
        swapped.set(SIGNATURE_FIELD, sig_yx.to_hex());
        assert!(!verify_with_key(&swapped, key.public_key()).unwrap());
    }

    #[test]
    fn test_known_signature_over_escaped_html() {
        // Signed bytes: {"callback_url":"https://x.io/cb?a=1\u0026b=\u003c2\u003e","signature":""}
        let mut doc = Document::new();
        doc.set("callback_url", "https://x.io/cb?a=1&b=<2>");
        sign(&mut doc, PRIVATE_KEY).unwrap();
        assert_eq!(
            signature_of(&doc),
            "17258a35597b62d02f9369b56ce323191465b55b04ab3cc08d07ada525bdb1f2086646454400fea0d07a1916b26ca36af8830880d21cd63edfb933034ab21c82"
        );

        let received = Document::from_json_str(&doc.to_json_string().unwrap()).unwrap();
        assert!(verify(&received, PUBLIC_KEY).unwrap());
    }

    #[test]
    fn test_known_signature_over_float_text() {
        // Signed bytes: {"amount":0.000001,"fee":100000000000000000000,"tiny":1e-7,"huge":1e+21,"signature":""}
        let mut doc = Document::new();
        doc.set("amount", 0.000001);
        doc.set("fee", 1e20);
        doc.set("tiny", 1e-7);
        doc.set("huge", 1e21);
        sign(&mut doc, PRIVATE_KEY).unwrap();
        assert_eq!(
            signature_of(&doc),
            "624c95648bcf7596e3119fce57ebab0cc8bcc66349d9ea96f0a5feb3173fdad96026f5b4b425b3de29545ef98c7947de81e37b63e0e459339d81b101349d3593"
        );
    }

    #[test]
    fn test_signing_is_deterministic() {
        let mut a = parties();
        let mut b = parties();
        let key = PrivateKey::from_hex(PRIVATE_KEY).unwrap();
        assert_eq!(
            sign_with_key(&mut a, &key).unwrap(),
            sign_with_key(&mut b, &key).unwrap()
        );
    }

    #[test]
    fn test_tampered_value_fails() {
        let mut doc = transfer();
        sign(&mut doc, PRIVATE_KEY).unwrap();
        doc.set("txid", "00");
        assert!(!verify(&doc, PUBLIC_KEY).unwrap());
    }

    #[test]
    fn test_tampered_signature_fails() {
        let mut doc = transfer();
        sign(&mut doc, PRIVATE_KEY).unwrap();
        let mut sig = signature_of(&doc).to_owned();
        sig.replace_range(0..2, if &sig[0..2] == "00" { "01" } else { "00" });
        doc.set(SIGNATURE_FIELD, sig);
        assert!(!verify(&doc, PUBLIC_KEY).unwrap());
    }

    #[test]
    fn test_wrong_key_fails() {
        let mut doc = transfer();
        sign(&mut doc, PRIVATE_KEY).unwrap();
        let other = PrivateKey::generate().unwrap();
        assert!(!verify_with_key(&doc, other.public_key()).unwrap());
    }

    #[test]
    fn test_verify_leaves_document_untouched() {
        let mut doc = transfer();
        sign(&mut doc, PRIVATE_KEY).unwrap();
        let before = doc.clone();
        verify(&doc, PUBLIC_KEY).unwrap();
        assert_eq!(doc, before);
    }

    #[test]
    fn test_verify_with_compressed_key() {
        let mut doc = parties();
        sign(&mut doc, PRIVATE_KEY).unwrap();
        let compressed = PublicKey::from_hex(PUBLIC_KEY).unwrap().to_hex(true);
        assert!(verify(&doc, &compressed).unwrap());
    }

    #[test]
    fn test_missing_signature() {
        assert!(matches!(
            verify(&transfer(), PUBLIC_KEY),
            Err(Error::MissingSignature)
        ));
    }

    #[test]
    fn test_malformed_signature() {
        let mut doc = transfer();
        doc.set(SIGNATURE_FIELD, "not hex");
        assert!(matches!(
            verify(&doc, PUBLIC_KEY),
            Err(Error::InvalidEncoding(_))
        ));

        doc.set(SIGNATURE_FIELD, 42);
        assert!(matches!(
            verify(&doc, PUBLIC_KEY),
            Err(Error::InvalidEncoding(_))
        ));

        doc.set(SIGNATURE_FIELD, "abcdef");
        assert!(!verify(&doc, PUBLIC_KEY).unwrap());

        doc.set(SIGNATURE_FIELD, "");
        assert!(!verify(&doc, PUBLIC_KEY).unwrap());
    }

    #[test]
    fn test_bad_keys() {
        let mut doc = transfer();
        assert!(sign(&mut doc, "zz").is_err());
        assert!(!doc.contains_key(SIGNATURE_FIELD));

        sign(&mut doc, PRIVATE_KEY).unwrap();
        assert!(verify(&doc, "04abcd").is_err());
    }

    #[test]
    fn test_signature_serde() {
        let sig = Signature([7u8; SIGNATURE_SIZE]);
        let json = serde_json::to_string(&sig).unwrap();
        assert_eq!(json, format!("\"{}\"", "07".repeat(64)));
        let restored: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(sig, restored);
        assert!(Signature::from_hex("0707").is_err());
    }
}
