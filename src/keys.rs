//! X25519 key pairs
//!
//! Key serialization:
//!   PublicKey  = x25519_pk[32]   (little-endian u-coordinate)
//!   PrivateKey = never serialized
//!
//! Every 32-byte string is a valid X25519 u-coordinate, so decoding only
//! checks length. Degenerate (low-order) peers are rejected at agreement
//! time, see [`crate::agreement::agree`].

use core::fmt;

use rand_core::{OsRng, RngCore};
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::Zeroizing;

use crate::error::{CourierError, Result};
use crate::wire::PUBLIC_KEY_BYTES;

// ---------------------------------------------------------------------------
// Public key
// ---------------------------------------------------------------------------

/// X25519 public key. Freely shareable.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_BYTES]);

impl PublicKey {
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_BYTES] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_BYTES] {
        &self.0
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; PUBLIC_KEY_BYTES] =
            bytes
                .try_into()
                .map_err(|_| CourierError::InvalidKeyEncoding {
                    expected: PUBLIC_KEY_BYTES,
                    actual: bytes.len(),
                })?;
        Ok(Self(arr))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse hex text. Well-formed hex of the wrong length reports the
    /// decoded byte count; anything else is `InvalidKeyHex`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|_| CourierError::InvalidKeyHex)?;
        Self::from_bytes(&bytes)
    }

    pub(crate) fn x25519(&self) -> X25519PublicKey {
        X25519PublicKey::from(self.0)
    }
}

impl From<[u8; PUBLIC_KEY_BYTES]> for PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_BYTES]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}...)", &self.to_hex()[..16])
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl serde::Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Private key
// ---------------------------------------------------------------------------

/// X25519 private scalar. Zeroized on drop, never serialized, not `Clone`.
pub struct PrivateKey(StaticSecret);

impl PrivateKey {
    /// Draw a fresh scalar from the OS random source.
    pub fn generate() -> Result<Self> {
        let mut seed = Zeroizing::new([0u8; 32]);
        OsRng
            .try_fill_bytes(&mut seed[..])
            .map_err(|_| CourierError::EntropySourceUnavailable)?;
        Ok(Self(StaticSecret::from(*seed)))
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(X25519PublicKey::from(&self.0).to_bytes())
    }

    /// Fixed scalar for Known Answer Tests.
    #[cfg(any(test, feature = "kat"))]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(StaticSecret::from(bytes))
    }

    pub(crate) fn x25519(&self) -> &StaticSecret {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Derive the public half of a private key.
pub fn public_key(private: &PrivateKey) -> PublicKey {
    private.public_key()
}

// ---------------------------------------------------------------------------
// Key pair
// ---------------------------------------------------------------------------

/// A long-lived key-agreement pair.
#[derive(Debug)]
pub struct KeyPair {
    private: PrivateKey,
    public: PublicKey,
}

impl KeyPair {
    pub fn generate() -> Result<Self> {
        let private = PrivateKey::generate()?;
        let public = private.public_key();
        tracing::trace!(public = ?public, "generated key pair");
        Ok(Self { private, public })
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    pub fn into_parts(self) -> (PrivateKey, PublicKey) {
        (self.private, self.public)
    }
}

impl From<PrivateKey> for KeyPair {
    fn from(private: PrivateKey) -> Self {
        let public = private.public_key();
        Self { private, public }
    }
}

/// Generate a fresh `(PrivateKey, PublicKey)` pair.
pub fn generate() -> Result<(PrivateKey, PublicKey)> {
    KeyPair::generate().map(KeyPair::into_parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unhex32(s: &str) -> [u8; 32] {
        let mut out = [0u8; 32];
        hex::decode_to_slice(s, &mut out).unwrap();
        out
    }

    #[test]
    fn generated_keys_differ() {
        let (_, a) = generate().unwrap();
        let (_, b) = generate().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn public_key_is_deterministic() {
        let (sk, pk) = generate().unwrap();
        assert_eq!(public_key(&sk), pk);
        assert_eq!(sk.public_key(), sk.public_key());
    }

    #[test]
    fn rfc7748_public_keys() {
        let alice = PrivateKey::from_bytes(unhex32(
            "77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a",
        ));
        let bob = PrivateKey::from_bytes(unhex32(
            "5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb",
        ));
        assert_eq!(
            alice.public_key().to_hex(),
            "8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a"
        );
        assert_eq!(
            bob.public_key().to_hex(),
            "de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f"
        );
    }

    #[test]
    fn wrong_length_is_rejected() {
        for len in [0, 31, 33, 64] {
            let bytes = vec![1u8; len];
            assert_eq!(
                PublicKey::from_bytes(&bytes),
                Err(CourierError::InvalidKeyEncoding {
                    expected: PUBLIC_KEY_BYTES,
                    actual: len
                })
            );
        }
    }

    #[test]
    fn hex_roundtrip_and_rejection() {
        let (_, pk) = generate().unwrap();
        assert_eq!(PublicKey::from_hex(&pk.to_hex()).unwrap(), pk);
        assert_eq!(
            PublicKey::from_hex(&"ab".repeat(31)),
            Err(CourierError::InvalidKeyEncoding {
                expected: PUBLIC_KEY_BYTES,
                actual: 31
            })
        );
    }

    #[test]
    fn malformed_hex_is_not_reported_as_a_length() {
        assert_eq!(PublicKey::from_hex("zz"), Err(CourierError::InvalidKeyHex));
        assert_eq!(PublicKey::from_hex("abc"), Err(CourierError::InvalidKeyHex));
        let mut odd = "ab".repeat(32);
        odd.push('c');
        assert_eq!(PublicKey::from_hex(&odd), Err(CourierError::InvalidKeyHex));
        assert!(serde_json::from_str::<PublicKey>("\"zz\"").is_err());
    }

    #[test]
    fn serde_uses_hex() {
        let (_, pk) = generate().unwrap();
        let json = serde_json::to_string(&pk).unwrap();
        assert_eq!(json, format!("\"{}\"", pk.to_hex()));
        let back: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pk);
    }

    #[test]
    fn private_key_debug_is_redacted() {
        let (sk, _) = generate().unwrap();
        assert_eq!(format!("{:?}", sk), "PrivateKey(<redacted>)");
    }
}
