//! # Curve Point Codec
//!
//! SEC1 encoding of secp256k1 points.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        POINT ENCODINGS                                  │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Uncompressed (65 bytes)                                               │
//! │  ┌──────┬──────────────────────────┬──────────────────────────┐        │
//! │  │ 0x04 │  x (32 B, big-endian)    │  y (32 B, big-endian)    │        │
//! │  └──────┴──────────────────────────┴──────────────────────────┘        │
//! │                                                                         │
//! │  Compressed (33 bytes)                                                 │
//! │  ┌──────┬──────────────────────────┐                                   │
//! │  │ 0x02 │  x (32 B, big-endian)    │   y even                          │
//! │  │ 0x03 │                          │   y odd                           │
//! │  └──────┴──────────────────────────┘                                   │
//! │                                                                         │
//! │  Decompression: y = sqrt(x³ + 7) mod p, root chosen by parity          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both decode paths check that coordinates are below the field modulus
//! and that the resulting point satisfies the curve equation.

use k256::elliptic_curve::point::DecompressPoint;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::elliptic_curve::subtle::Choice;
use k256::{AffinePoint, EncodedPoint, FieldBytes};

use crate::error::{Error, Result};

/// Size of a compressed point in bytes
pub const COMPRESSED_SIZE: usize = 33;

/// Size of an uncompressed point in bytes
pub const UNCOMPRESSED_SIZE: usize = 65;

const TAG_EVEN: u8 = 0x02;
const TAG_ODD: u8 = 0x03;
const TAG_UNCOMPRESSED: u8 = 0x04;

/// secp256k1 field modulus p = 2²⁵⁶ − 2³² − 977, big-endian
const FIELD_MODULUS: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe, 0xff, 0xff, 0xfc, 0x2f,
];

/// Equal-length big-endian byte strings compare like the integers they encode.
fn below_modulus(coordinate: &[u8]) -> bool {
    coordinate < &FIELD_MODULUS[..]
}

/// Decode a 33-byte compressed or 65-byte uncompressed point
///
/// ## Errors
///
/// - `InvalidEncoding`: wrong length, unknown tag byte, or a coordinate ≥ p
/// - `InvalidPoint`: no curve point exists for the coordinates
pub fn decode(bytes: &[u8]) -> Result<AffinePoint> {
    match (bytes.first().copied(), bytes.len()) {
        (Some(tag @ (TAG_EVEN | TAG_ODD)), COMPRESSED_SIZE) => decode_compressed(tag, &bytes[1..]),
        (Some(TAG_UNCOMPRESSED), UNCOMPRESSED_SIZE) => {
            decode_uncompressed(&bytes[1..33], &bytes[33..])
        }
        (tag, len) => Err(Error::InvalidEncoding(format!(
            "cannot parse public key: {} bytes with tag {:#04x}",
            len,
            tag.unwrap_or_default()
        ))),
    }
}

fn decode_compressed(tag: u8, x: &[u8]) -> Result<AffinePoint> {
    if !below_modulus(x) {
        return Err(Error::InvalidEncoding(
            "cannot parse public key: x coordinate exceeds field modulus".into(),
        ));
    }

    let y_is_odd = Choice::from(u8::from(tag == TAG_ODD));
    Option::from(AffinePoint::decompress(FieldBytes::from_slice(x), y_is_odd))
        .ok_or_else(|| Error::InvalidPoint("x³ + 7 has no square root mod p".into()))
}

fn decode_uncompressed(x: &[u8], y: &[u8]) -> Result<AffinePoint> {
    if !below_modulus(x) || !below_modulus(y) {
        return Err(Error::InvalidEncoding(
            "cannot parse public key: coordinate exceeds field modulus".into(),
        ));
    }

    let encoded =
        EncodedPoint::from_affine_coordinates(FieldBytes::from_slice(x), FieldBytes::from_slice(y), false);
    Option::from(AffinePoint::from_encoded_point(&encoded))
        .ok_or_else(|| Error::InvalidPoint("point is not on secp256k1".into()))
}

/// Encode a point, zero-padding each coordinate to 32 bytes
pub fn encode(point: &AffinePoint, compressed: bool) -> Vec<u8> {
    point.to_encoded_point(compressed).as_bytes().to_vec()
}

// ============================================================================
// TESTS
// ============================================================================
