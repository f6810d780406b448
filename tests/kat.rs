//! Known Answer / wire-layout tests (v1)

use citadel_courier::kdf::derive_bytes;
use citadel_courier::wire::{
    self, DEFAULT_SALT, KEY_BYTES, MAX_DERIVED_BYTES, MAX_PLAINTEXT_BYTES, MIN_BLOB_BYTES,
    NONCE_BYTES, OVERHEAD_BYTES, PUBLIC_KEY_BYTES, TAG_BYTES,
};
use citadel_courier::{aead, CourierError, SealedMessage, SymmetricKey};

#[test]
fn test_wire_constants() {
    assert_eq!(NONCE_BYTES, 12);
    assert_eq!(TAG_BYTES, 16);
    assert_eq!(KEY_BYTES, 32);
    assert_eq!(PUBLIC_KEY_BYTES, 32);
    assert_eq!(OVERHEAD_BYTES, 28);
    assert_eq!(MIN_BLOB_BYTES, 28);
    assert_eq!(MAX_DERIVED_BYTES, 8160);
    assert_eq!(MAX_PLAINTEXT_BYTES, 274_877_906_880);
    assert_eq!(DEFAULT_SALT, b"citadel|courier|v1");
}

#[test]
fn test_wire_format_structure() {
    let key = SymmetricKey::from_bytes([0x11; 32]);
    let sealed = aead::seal(b"test", &key, b"").unwrap();
    let blob = wire::encode(&sealed);

    let parts = wire::split(&blob).unwrap();
    assert_eq!(parts.nonce, sealed.nonce());
    assert_eq!(parts.ciphertext, sealed.ciphertext());
    assert_eq!(parts.tag, sealed.tag());
    assert_eq!(parts.ciphertext.len(), 4);
    assert_eq!(blob.len(), 4 + 28);
}

#[test]
fn test_decode_splits_from_both_ends() {
    let mut blob = Vec::new();
    blob.extend_from_slice(&[0xAA; NONCE_BYTES]);
    blob.extend_from_slice(b"body");
    blob.extend_from_slice(&[0xBB; TAG_BYTES]);

    let sealed = wire::decode(&blob).unwrap();
    assert_eq!(sealed.nonce(), &[0xAA; NONCE_BYTES]);
    assert_eq!(sealed.ciphertext(), b"body");
    assert_eq!(sealed.tag(), &[0xBB; TAG_BYTES]);
    assert_eq!(SealedMessage::from_bytes(&blob).unwrap().to_bytes(), blob);
}

#[test]
fn test_rejects_short_blobs() {
    for len in 0..MIN_BLOB_BYTES {
        let blob = vec![0u8; len];
        assert_eq!(
            wire::decode(&blob),
            Err(CourierError::TruncatedMessage {
                actual: len,
                min: MIN_BLOB_BYTES
            })
        );
        assert!(wire::inspect(&blob).is_err());
    }
}

#[test]
fn test_hkdf_rfc5869_case_3() {
    // Zero-length salt and info
    let ikm = [0x0bu8; 22];
    let okm = derive_bytes(&ikm, b"", b"", 42).unwrap();
    assert_eq!(
        hex::encode(&*okm),
        "8da4e775a563c18f715f802a063c5a31b8a11f5c5ee1879ec3454e5f3c738d2d9d201395faa4b61a96c8"
    );
}
