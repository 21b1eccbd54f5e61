//! AES-256-CBC with PKCS#7 padding.
//!
//! The ECIES envelope always uses an all-zero IV. That is safe only
//! because every message is encrypted under a fresh ephemeral key, so the
//! same (key, IV) pair never covers two plaintexts.

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::error::{Error, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES block size in bytes
pub const BLOCK_SIZE: usize = 16;

/// AES-256 key size in bytes
pub const KEY_SIZE: usize = 32;

/// IV used by the ECIES envelope
pub const ZERO_IV: [u8; BLOCK_SIZE] = [0u8; BLOCK_SIZE];

/// Pad `plaintext` to a block multiple and encrypt it
///
/// The output is always 1..=16 bytes longer than the input.
pub fn encrypt(plaintext: &[u8], key: &[u8; KEY_SIZE], iv: &[u8; BLOCK_SIZE]) -> Vec<u8> {
    Aes256CbcEnc::new(&(*key).into(), &(*iv).into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Decrypt and strip the padding
///
/// Every padding byte is checked, not just the last one.
///
/// ## Errors
///
/// `InvalidEncoding` if the input is empty, not a block multiple, or ends
/// in malformed padding.
pub fn decrypt(ciphertext: &[u8], key: &[u8; KEY_SIZE], iv: &[u8; BLOCK_SIZE]) -> Result<Vec<u8>> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(Error::InvalidEncoding(format!(
            "ciphertext length {} is not a positive multiple of {}",
            ciphertext.len(),
            BLOCK_SIZE
        )));
    }

    Aes256CbcDec::new(&(*key).into(), &(*iv).into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| Error::InvalidEncoding("malformed PKCS7 padding".into()))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; KEY_SIZE] = [0x42; KEY_SIZE];

    #[test]
    fn test_padding_lengths() {
        // "golang" pads with ten 0x0a bytes to one block.
        assert_eq!(encrypt(b"golang", &KEY, &ZERO_IV).len(), 16);
        assert_eq!(encrypt(b"", &KEY, &ZERO_IV).len(), 16);
        assert_eq!(encrypt(&[0u8; 16], &KEY, &ZERO_IV).len(), 32);
        assert_eq!(encrypt(&[0u8; 17], &KEY, &ZERO_IV).len(), 32);
    }

    #[test]
    fn test_roundtrip() {
        for len in [0, 1, 6, 15, 16, 17, 100] {
            let plaintext = vec![0x5a; len];
            let ciphertext = encrypt(&plaintext, &KEY, &ZERO_IV);
            assert_eq!(decrypt(&ciphertext, &KEY, &ZERO_IV).unwrap(), plaintext);
        }
    }

    #[test]
    fn test_padding_bytes() {
        // Decrypting without unpadding exposes the PKCS7 tail.
        use cbc::cipher::block_padding::NoPadding;

        let ciphertext = encrypt(b"golang", &KEY, &ZERO_IV);
        let raw = Aes256CbcDec::new(&KEY.into(), &ZERO_IV.into())
            .decrypt_padded_vec_mut::<NoPadding>(&ciphertext)
            .unwrap();
        assert_eq!(&raw[..6], b"golang");
        assert_eq!(&raw[6..], &[0x0a; 10]);
    }

    #[test]
    fn test_bad_lengths() {
        assert!(matches!(
            decrypt(&[], &KEY, &ZERO_IV),
            Err(Error::InvalidEncoding(_))
        ));
        assert!(matches!(
            decrypt(&[0u8; 15], &KEY, &ZERO_IV),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_bad_padding() {
        // A zero final byte is never valid PKCS7.
        let raw = [0u8; 16];
        let ciphertext = Aes256CbcEnc::new(&KEY.into(), &ZERO_IV.into())
            .encrypt_padded_vec_mut::<cbc::cipher::block_padding::NoPadding>(&raw);
        assert!(matches!(
            decrypt(&ciphertext, &KEY, &ZERO_IV),
            Err(Error::InvalidEncoding(_))
        ));
    }
}
