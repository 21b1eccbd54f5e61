//! # Bridge Configuration
//!
//! Published constants of the bridge protocol.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ENVIRONMENTS                                     │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Environment   API domain                   Bridge public key          │
//! │  ───────────   ──────────────────────────   ─────────────────          │
//! │  Production    https://api.sygna.io/        047b04ca…4e59f12            │
//! │  Test          https://test-api.sygna.io/   04a6936f…1a7ea9ac8          │
//! │  Dev           (none published)             04b70d1d…8e60c05e389        │
//! │  Sandbox       (none published)             04d1b4c7…152aaed2d0e        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages signed by the bridge itself verify against the key of the
//! environment they came from.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::crypto::{self, cipher, ecies, mac};
use crate::document::Value;

const PRODUCTION_PUBLIC_KEY: &str = "047b04ca933c0fccb7094af06bafb77e0fdd9264b45243cba0b72cd8f1bc8fc4e7454902d4bb6bad8ed4bc4dfae102858b6a7649e4febca0c5b266566aa4e59f12";
const TEST_PUBLIC_KEY: &str = "04a6936f2bc43773cb4874980518b3f681c004464d167aebdc9e305e10d6fb6cdacb27a22812453e6c51ceabff5b1e2d2196d81a8d3e8e71e907948b01a7ea9ac8";
const DEV_PUBLIC_KEY: &str = "04b70d1d5ac7a7fd6992c0c17a05af4487befe0eb6eb556ef8af61f96891f012518aa8f3318800845708f388fc81fb75ab11ef7ba785aef66a9c59d8e60c05e389";
const SANDBOX_PUBLIC_KEY: &str = "04d1b4c711792c747f597255b02d47a96bfaf0b030aa9b34106e8de7331cd00c23a91cd4aeaa85ba497b66bef0192bd7896e1517a31a9e976460836152aaed2d0e";

const PRODUCTION_API_DOMAIN: &str = "https://api.sygna.io/";
const TEST_API_DOMAIN: &str = "https://test-api.sygna.io/";

/// Bridge deployment a message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Live network
    #[default]
    Production,
    /// Public test network
    Test,
    /// Internal development network
    Dev,
    /// Integration sandbox
    Sandbox,
}

impl Environment {
    /// Every environment, in declaration order
    pub const ALL: [Environment; 4] = [
        Environment::Production,
        Environment::Test,
        Environment::Dev,
        Environment::Sandbox,
    ];

    /// Uncompressed hex public key the bridge signs with
    pub fn bridge_public_key(&self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_PUBLIC_KEY,
            Environment::Test => TEST_PUBLIC_KEY,
            Environment::Dev => DEV_PUBLIC_KEY,
            Environment::Sandbox => SANDBOX_PUBLIC_KEY,
        }
    }

    /// Base URL of the REST API, where one is published
    pub fn api_domain(&self) -> Option<&'static str> {
        match self {
            Environment::Production => Some(PRODUCTION_API_DOMAIN),
            Environment::Test => Some(TEST_API_DOMAIN),
            Environment::Dev | Environment::Sandbox => None,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Production => "production",
            Environment::Test => "test",
            Environment::Dev => "dev",
            Environment::Sandbox => "sandbox",
        };
        f.write_str(name)
    }
}

/// Beneficiary's answer to a transfer permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PermissionStatus {
    /// The transfer may proceed
    Accepted,
    /// The transfer is refused, see [`RejectCode`]
    Rejected,
}

impl PermissionStatus {
    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionStatus::Accepted => "ACCEPTED",
            PermissionStatus::Rejected => "REJECTED",
        }
    }
}

impl From<PermissionStatus> for Value {
    fn from(status: PermissionStatus) -> Self {
        Value::from(status.as_str())
    }
}

/// Reason attached to a rejected permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RejectCode {
    /// Unsupported currency
    Bvrc001,
    /// Service downtime or unable to reply
    Bvrc002,
    /// Customer cannot receive more inflows
    Bvrc003,
    /// Customer fails compliance checks
    Bvrc004,
    /// `private_info` cannot be decoded
    Bvrc005,
    /// `private_info` decodes but is malformed
    Bvrc006,
    /// Beneficiary name does not match
    Bvrc007,
    /// Other reason, explained in `reject_message`
    Bvrc999,
}

impl RejectCode {
    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectCode::Bvrc001 => "BVRC001",
            RejectCode::Bvrc002 => "BVRC002",
            RejectCode::Bvrc003 => "BVRC003",
            RejectCode::Bvrc004 => "BVRC004",
            RejectCode::Bvrc005 => "BVRC005",
            RejectCode::Bvrc006 => "BVRC006",
            RejectCode::Bvrc007 => "BVRC007",
            RejectCode::Bvrc999 => "BVRC999",
        }
    }

    /// When a beneficiary should send this code
    pub fn description(&self) -> &'static str {
        match self {
            RejectCode::Bvrc001 => "The originator is sending a currency you do not support",
            RejectCode::Bvrc002 => "Your service is down or unable to reply to the request",
            RejectCode::Bvrc003 => "Your customer cannot receive more transaction inflows",
            RejectCode::Bvrc004 => {
                "Your customer fails your internal compliance check or is blacklisted"
            }
            RejectCode::Bvrc005 => "private_info cannot be decoded",
            RejectCode::Bvrc006 => "private_info decodes but its format is wrong",
            RejectCode::Bvrc007 => {
                "Beneficiary name does not match the name in the beneficiary VASP database"
            }
            RejectCode::Bvrc999 => "Other reason, put your message in reject_message",
        }
    }
}

impl From<RejectCode> for Value {
    fn from(code: RejectCode) -> Self {
        Value::from(code.as_str())
    }
}

/// Fixed parameters of the envelope and signature formats
///
/// These are protocol constants, exposed for callers that size buffers or
/// log what they received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CryptoConfig;

impl CryptoConfig {
    /// CBC initialisation vector size (always zero-filled)
    pub const IV_SIZE: usize = cipher::BLOCK_SIZE;
    /// HMAC-SHA1 tag size
    pub const MAC_SIZE: usize = mac::TAG_SIZE;
    /// Uncompressed ephemeral public key size
    pub const EPHEMERAL_KEY_SIZE: usize = ecies::EPHEMERAL_KEY_SIZE;
    /// Shortest envelope accepted before the MAC check
    pub const MIN_CIPHERTEXT_SIZE: usize = ecies::MIN_CIPHERTEXT_SIZE;
    /// Field that carries a document signature
    pub const SIGNATURE_FIELD: &'static str = crypto::SIGNATURE_FIELD;
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::PublicKey;
    use crate::document::Document;

    #[test]
    fn test_bridge_keys_are_valid_points() {
        for env in Environment::ALL {
            let key = PublicKey::from_hex(env.bridge_public_key()).unwrap();
            assert_eq!(key.to_hex(false), env.bridge_public_key());
        }
    }

    #[test]
    fn test_default_environment() {
        assert_eq!(Environment::default(), Environment::Production);
        assert_eq!(
            Environment::default().api_domain(),
            Some("https://api.sygna.io/")
        );
        assert_eq!(Environment::Sandbox.api_domain(), None);
    }

    #[test]
    fn test_environment_serde() {
        assert_eq!(
            serde_json::to_string(&Environment::Sandbox).unwrap(),
            "\"sandbox\""
        );
        let env: Environment = serde_json::from_str("\"test\"").unwrap();
        assert_eq!(env, Environment::Test);
        assert_eq!(env.to_string(), "test");
    }

    #[test]
    fn test_wire_values_match_serde() {
        for status in [PermissionStatus::Accepted, PermissionStatus::Rejected] {
            assert_eq!(
                serde_json::to_string(&status).unwrap(),
                format!("\"{}\"", status.as_str())
            );
        }
        assert_eq!(
            serde_json::to_string(&RejectCode::Bvrc999).unwrap(),
            "\"BVRC999\""
        );
        let code: RejectCode = serde_json::from_str("\"BVRC005\"").unwrap();
        assert_eq!(code, RejectCode::Bvrc005);
        assert!(!code.description().is_empty());
    }

    #[test]
    fn test_constants_in_documents() {
        let mut doc = Document::new();
        doc.set("permission_status", PermissionStatus::Rejected);
        doc.set("reject_code", RejectCode::Bvrc001);
        assert_eq!(
            doc.to_json_string().unwrap(),
            r#"{"permission_status":"REJECTED","reject_code":"BVRC001"}"#
        );
    }

    #[test]
    fn test_crypto_config() {
        assert_eq!(CryptoConfig::IV_SIZE, 16);
        assert_eq!(CryptoConfig::MAC_SIZE, 20);
        assert_eq!(CryptoConfig::EPHEMERAL_KEY_SIZE, 65);
        assert_eq!(CryptoConfig::MIN_CIPHERTEXT_SIZE, 85);
        assert_eq!(CryptoConfig::SIGNATURE_FIELD, "signature");
    }
}
