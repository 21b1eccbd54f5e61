//! # Document Signature Demo
//!
//! Demonstrates canonical-order ECDSA signatures on bridge messages.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example signing_demo
//! ```

use bridge_core::{sign, verify, Document, Environment, PermissionStatus, PrivateKey, Value};

fn main() {
    println!("=== Bridge Core: Document Signature Demo ===\n");

    // Step 1: Create a keypair
    println!("Step 1: Creating secp256k1 signing keypair...");

    let key = PrivateKey::generate().expect("Failed to create keypair");
    let private_hex = hex::encode(&key.to_bytes()[..]);
    let public_hex = key.public_key().to_hex(false);

    println!("  Public key (hex): {}", public_hex);
    println!();

    // Step 2: Explain the signing process
    println!("Step 2: Understanding canonical document signatures");
    println!();
    println!("  ┌─────────────────────────────────────────────────────────────┐");
    println!("  │                   SIGNATURE FLOW                            │");
    println!("  ├─────────────────────────────────────────────────────────────┤");
    println!("  │                                                             │");
    println!("  │  SIGNING:                                                   │");
    println!("  │                                                             │");
    println!("  │    Document + \"signature\": \"\" ──► compact JSON             │");
    println!("  │                                     │                       │");
    println!("  │                                     ▼                       │");
    println!("  │    Private ──────────────► ECDSA(SHA-256) ─► r ‖ s (hex)    │");
    println!("  │    Key                                                      │");
    println!("  │                                                             │");
    println!("  │  VERIFICATION:                                              │");
    println!("  │                                                             │");
    println!("  │    Copy with \"signature\": \"\" ──► compact JSON             │");
    println!("  │                                     │                       │");
    println!("  │                                     ▼                       │");
    println!("  │    Public ───────────────► ECDSA verify ─► true / false     │");
    println!("  │    Key                                                      │");
    println!("  │                                                             │");
    println!("  │  Field order is part of the signed bytes.                   │");
    println!("  │                                                             │");
    println!("  └─────────────────────────────────────────────────────────────┘");
    println!();

    // Step 3: Sign a permission message
    println!("Step 3: Signing a permission message...");

    let mut message = Document::new();
    message.set(
        "transfer_id",
        "b97903fd68fcff05cfe035482bc3cf7fd934505b4e0644e612087dca4bae37e4",
    );
    message.set("permission_status", PermissionStatus::Accepted);

    sign(&mut message, &private_hex).expect("Signing failed");

    println!(
        "  Signed message: {}",
        message.to_json_string().expect("Serialization failed")
    );
    println!();

    // Step 4: Verify the signature
    println!("Step 4: Verifying the signature...");

    match verify(&message, &public_hex) {
        Ok(true) => println!("  [OK] Signature is valid!"),
        Ok(false) => println!("  [FAILED] Signature did not match!"),
        Err(e) => println!("  [FAILED] {}", e),
    }
    println!();

    // Step 5: Tampering and reordering
    println!("Step 5: Forgery detection...");

    let mut tampered = message.clone();
    tampered.set("permission_status", PermissionStatus::Rejected);
    match verify(&tampered, &public_hex) {
        Ok(false) => println!("  [OK] Changed status was rejected"),
        _ => println!("  [FAILED] Changed status was accepted!"),
    }

    let mut fields: Vec<(String, Value)> = message
        .iter()
        .map(|(k, v)| (k.to_owned(), v.clone()))
        .collect();
    fields.reverse();
    let reordered: Document = fields.into_iter().collect();
    match verify(&reordered, &public_hex) {
        Ok(false) => println!("  [OK] Reordered fields were rejected"),
        _ => println!("  [FAILED] Reordered fields were accepted!"),
    }
    println!();

    // Step 6: Messages from the bridge itself
    println!("Step 6: Bridge keys per environment...");

    for env in Environment::ALL {
        println!(
            "  {:<10} {}...  api: {}",
            env.to_string(),
            &env.bridge_public_key()[..20],
            env.api_domain().unwrap_or("-")
        );
    }

    let signature = message.get("signature").and_then(Value::as_str).unwrap_or_default();
    println!();
    println!("  Signature length: {} hex chars", signature.len());

    println!("\n=== Demo Complete ===");
}
