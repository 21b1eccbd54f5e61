//! # Encryption Demo
//!
//! Demonstrates encrypting a VASP's private info for its counterparty.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example encryption_demo
//! ```

use bridge_core::crypto::{ecies, PrivateKey};
use bridge_core::{decrypt, encrypt_document, encrypt_str, Decrypted, Document, Error};

fn main() {
    println!("=== Bridge Core: ECIES Encryption Demo ===\n");

    // Step 1: The beneficiary VASP publishes a key
    println!("Step 1: Beneficiary VASP generates a secp256k1 keypair...");

    let beneficiary = PrivateKey::generate().expect("Failed to generate keypair");
    let private_hex = hex::encode(&beneficiary.to_bytes()[..]);
    let public_hex = beneficiary.public_key().to_hex(false);

    println!("  Public key (uncompressed): {}...", &public_hex[..24]);
    println!(
        "  Public key (compressed):   {}...",
        &beneficiary.public_key().to_hex(true)[..24]
    );
    println!();

    // Step 2: The originator encrypts private info
    println!("Step 2: Originator VASP encrypts private info...");
    println!();
    println!("  ┌─────────────────────────────────────────────────────────────┐");
    println!("  │                      ENVELOPE LAYOUT                        │");
    println!("  ├─────────────────────────────────────────────────────────────┤");
    println!("  │                                                             │");
    println!("  │   ephemeral pubkey (65) │ HMAC-SHA1 (20) │ AES-CBC (16·k)   │");
    println!("  │                                                             │");
    println!("  └─────────────────────────────────────────────────────────────┘");
    println!();

    let mut originator = Document::new();
    originator.set("name", "Antoine Griezmann");
    originator.set("date_of_birth", "1991-03-21");

    let mut beneficiary_info = Document::new();
    beneficiary_info.set("name", "利昂內爾 梅西");

    let mut private_info = Document::new();
    private_info.set("originator", originator);
    private_info.set("beneficiary", beneficiary_info);

    let plaintext = private_info.to_json_string().expect("Serialization failed");
    let ciphertext = encrypt_document(&private_info, &public_hex).expect("Encryption failed");

    println!("  Plaintext:  {}", plaintext);
    println!("  Ciphertext: {}...", &ciphertext[..64]);
    println!(
        "  Ciphertext length: {} bytes (plaintext: {} bytes)",
        ciphertext.len() / 2,
        plaintext.len()
    );
    println!();

    // Step 3: The beneficiary decrypts
    println!("Step 3: Beneficiary VASP decrypts...");

    match decrypt(&ciphertext, &private_hex).expect("Decryption failed") {
        Decrypted::Document(doc) => {
            println!("  Document: {}", doc.to_json_string().expect("Serialization failed"));
            if doc == private_info {
                println!("  [OK] Field order preserved");
            } else {
                println!("  [FAILED] Decrypted document differs");
                return;
            }
        }
        other => {
            println!("  [FAILED] Unexpected payload: {:?}", other);
            return;
        }
    }
    println!();

    // Step 4: Plain text payloads
    println!("Step 4: Non-JSON payloads come back as text...");

    let ciphertext = encrypt_str("zxcvvbjgiyi5/喬丹", &public_hex).expect("Encryption failed");
    let decrypted = decrypt(&ciphertext, &private_hex).expect("Decryption failed");
    println!("  Decrypted: {:?}", decrypted);
    println!();

    // Step 5: Tampering is detected before decryption
    println!("Step 5: Flipping one ciphertext byte...");

    let mut envelope = hex::decode(&ciphertext).expect("Invalid hex");
    let last = envelope.len() - 1;
    envelope[last] ^= 0x01;

    match ecies::open(&envelope, &beneficiary) {
        Err(Error::AuthenticationFailed) => println!("  [OK] Rejected: MAC mismatch"),
        Err(e) => println!("  [FAILED] Unexpected error: {}", e),
        Ok(_) => println!("  [FAILED] Tampered payload accepted"),
    }
    println!();

    // Step 6: Each encryption uses a fresh ephemeral key
    println!("Step 6: Encrypting the same text twice...");

    let a = encrypt_str("same", &public_hex).expect("Encryption failed");
    let b = encrypt_str("same", &public_hex).expect("Encryption failed");
    println!("  First:  {}...", &a[..32]);
    println!("  Second: {}...", &b[..32]);
    if a != b {
        println!("  [OK] Ciphertexts differ");
    }

    println!("\n=== Demo Complete ===");
}
