//! Citadel Courier: interactive demo
//!
//! Run with: `RUST_LOG=citadel_courier=debug cargo run --example demo`
//!
//! Walks through keygen → agree → derive → seal → encode, the recipient's
//! reverse path, context binding and tamper detection.

use citadel_courier::{
    aead, agreement, kdf, keys, wire,
    wire::{DEFAULT_SALT, NONCE_BYTES, OVERHEAD_BYTES, PUBLIC_KEY_BYTES, TAG_BYTES},
    Courier, CourierError, SharedInfo,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), CourierError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                Citadel Courier v1 — End-to-End Demo              ║");
    println!("║            X25519 + HKDF-SHA256 + ChaCha20-Poly1305              ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");

    demo_parameters();
    demo_pipeline()?;
    demo_context_binding()?;
    demo_tamper_detection()?;

    println!("\n✓ All demos passed.");
    Ok(())
}

// ---------------------------------------------------------------------------

fn section(title: &str) {
    println!("\n┌─────────────────────────────────────────────────────────────────┐");
    println!("│ {:<63} │", title);
    println!("└─────────────────────────────────────────────────────────────────┘");
}

// ---------------------------------------------------------------------------

fn demo_parameters() {
    section("1. Protocol Parameters");

    println!("  Public key size:      {} bytes", PUBLIC_KEY_BYTES);
    println!("  Nonce:                {} bytes", NONCE_BYTES);
    println!("  AEAD tag:             {} bytes", TAG_BYTES);
    println!("  Overhead per message: {} bytes", OVERHEAD_BYTES);
    println!(
        "  Salt:                 {:?} ({} bytes)",
        String::from_utf8_lossy(DEFAULT_SALT),
        DEFAULT_SALT.len()
    );
}

// ---------------------------------------------------------------------------

fn demo_pipeline() -> Result<(), CourierError> {
    section("2. Step-by-step pipeline");

    let (sender_sk, sender_pk) = keys::generate()?;
    let (recipient_sk, recipient_pk) = keys::generate()?;
    println!("  Sender public key:    {}", sender_pk);
    println!("  Recipient public key: {}", recipient_pk);

    let info = SharedInfo::empty();
    let plaintext = b"The result of your test is positive";

    let sender_key = kdf::derive_key(
        &agreement::agree(&sender_sk, &recipient_pk)?,
        DEFAULT_SALT,
        &info,
    )?;
    let blob = wire::encode(&aead::seal(plaintext, &sender_key, b"")?);
    println!("  Blob:                 {}", wire::inspect(&blob)?);

    let recipient_key = kdf::derive_key(
        &agreement::agree(&recipient_sk, &sender_pk)?,
        DEFAULT_SALT,
        &info,
    )?;
    let opened = aead::open(&wire::decode(&blob)?, &recipient_key, b"")?;

    assert_eq!(sender_key, recipient_key);
    assert_eq!(opened, plaintext);
    println!("  Keys match:           yes");
    println!("  Decrypted:            {:?}", String::from_utf8_lossy(&opened));
    Ok(())
}

// ---------------------------------------------------------------------------

fn demo_context_binding() -> Result<(), CourierError> {
    section("3. Context binding");

    let courier = Courier::default();
    let alice = courier.generate_keypair()?;
    let bob = courier.generate_keypair()?;

    let blob = courier.seal(
        alice.private_key(),
        bob.public_key(),
        b"for conversation A only",
        b"",
        &SharedInfo::for_conversation("A"),
    )?;

    let wrong = courier.open(
        bob.private_key(),
        alice.public_key(),
        &blob,
        b"",
        &SharedInfo::for_conversation("B"),
    );
    println!("  Open under conversation B: {:?}", wrong.err());

    let right = courier.open(
        bob.private_key(),
        alice.public_key(),
        &blob,
        b"",
        &SharedInfo::for_conversation("A"),
    )?;
    println!("  Open under conversation A: {:?}", String::from_utf8_lossy(&right));
    Ok(())
}

// ---------------------------------------------------------------------------

fn demo_tamper_detection() -> Result<(), CourierError> {
    section("4. Tamper detection");

    let courier = Courier::default();
    let alice = courier.generate_keypair()?;
    let bob = courier.generate_keypair()?;
    let info = SharedInfo::empty();

    let blob = courier.seal(alice.private_key(), bob.public_key(), b"untouched", b"", &info)?;

    for (label, offset) in [
        ("nonce", 0),
        ("ciphertext", NONCE_BYTES),
        ("tag", blob.len() - 1),
    ] {
        let mut tampered = blob.clone();
        tampered[offset] ^= 0x01;
        let result = courier.open(bob.private_key(), alice.public_key(), &tampered, b"", &info);
        println!("  Flip bit in {:<10} → {:?}", label, result.err());
    }

    let short = courier.open(bob.private_key(), alice.public_key(), &blob[..20], b"", &info);
    println!("  Truncate to 20 bytes   → {:?}", short.err());
    Ok(())
}
