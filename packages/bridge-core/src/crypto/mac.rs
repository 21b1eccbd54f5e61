//! HMAC-SHA1 authentication tags for the ECIES envelope.

use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::{Error, Result};

type HmacSha1 = Hmac<Sha1>;

/// Tag size in bytes
pub const TAG_SIZE: usize = 20;

fn keyed(key: &[u8], parts: &[&[u8]]) -> Result<HmacSha1> {
    let mut mac = <HmacSha1 as Mac>::new_from_slice(key)
        .map_err(|_| Error::InvalidKey("HMAC key rejected".into()))?;
    for part in parts {
        mac.update(part);
    }
    Ok(mac)
}

/// Compute the tag over the concatenation of `parts`
pub fn tag(key: &[u8], parts: &[&[u8]]) -> Result<[u8; TAG_SIZE]> {
    let digest = keyed(key, parts)?.finalize().into_bytes();
    let mut out = [0u8; TAG_SIZE];
    out.copy_from_slice(&digest);
    Ok(out)
}

/// Check `expected` against the tag over `parts` in constant time
pub fn verify(key: &[u8], parts: &[&[u8]], expected: &[u8]) -> Result<()> {
    keyed(key, parts)?
        .verify_slice(expected)
        .map_err(|_| Error::AuthenticationFailed)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const GOLANG_TAG: &str = "31fa5264168f0a276619c952712854a726456de2";

    #[test]
    fn test_known_tag() {
        let t = tag(b"12345", &[b"golang".as_slice()]).unwrap();
        assert_eq!(hex::encode(t), GOLANG_TAG);
    }

    #[test]
    fn test_parts_concatenate() {
        assert_eq!(
            tag(b"12345", &[b"go".as_slice(), b"".as_slice(), b"lang".as_slice()]).unwrap(),
            tag(b"12345", &[b"golang".as_slice()]).unwrap()
        );
    }

    #[test]
    fn test_verify() {
        let expected = hex::decode(GOLANG_TAG).unwrap();
        assert!(verify(b"12345", &[b"golang".as_slice()], &expected).is_ok());
        assert!(matches!(
            verify(b"12346", &[b"golang".as_slice()], &expected),
            Err(Error::AuthenticationFailed)
        ));
        assert!(matches!(
            verify(b"12345", &[b"golang".as_slice()], &expected[..19]),
            Err(Error::AuthenticationFailed)
        ));
    }
}
