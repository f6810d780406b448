//! KDF (v1)
//!
//! key = HKDF-SHA256(ikm = shared_secret, salt = salt, info = shared_info, len = 32)
//!
//! Both parties must use identical salt and info; either one changing
//! changes every derived key.

use core::fmt;

use hkdf::Hkdf;
use sha2::Sha256;
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::agreement::SharedSecret;
use crate::context::SharedInfo;
use crate::error::{CourierError, Result};
use crate::wire::{KEY_BYTES, MAX_DERIVED_BYTES};

/// 32-byte ChaCha20-Poly1305 key. Zeroized on drop; equality is constant-time.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_BYTES]);

impl SymmetricKey {
    pub fn from_bytes(bytes: [u8; KEY_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_BYTES] {
        &self.0
    }
}

impl ConstantTimeEq for SymmetricKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for SymmetricKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SymmetricKey {}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey(<redacted>)")
    }
}

/// HKDF-SHA256 extract-then-expand over raw input keying material.
pub fn derive_bytes(
    ikm: &[u8],
    salt: &[u8],
    info: &[u8],
    output_len: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    if output_len > MAX_DERIVED_BYTES {
        return Err(CourierError::DerivationLengthExceeded {
            requested: output_len,
            max: MAX_DERIVED_BYTES,
        });
    }

    let hk = Hkdf::<Sha256>::new(Some(salt), ikm);
    let mut okm = Zeroizing::new(vec![0u8; output_len]);
    hk.expand(info, &mut okm[..])
        .map_err(|_| CourierError::DerivationLengthExceeded {
            requested: output_len,
            max: MAX_DERIVED_BYTES,
        })?;
    Ok(okm)
}

/// Derive `output_len` bytes of key material from a shared secret.
pub fn derive(
    secret: &SharedSecret,
    salt: &[u8],
    info: &SharedInfo,
    output_len: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    derive_bytes(secret.as_bytes(), salt, info.as_bytes(), output_len)
}

/// Derive the 32-byte message key.
pub fn derive_key(secret: &SharedSecret, salt: &[u8], info: &SharedInfo) -> Result<SymmetricKey> {
    let hk = Hkdf::<Sha256>::new(Some(salt), secret.as_bytes());
    let mut key = SymmetricKey([0u8; KEY_BYTES]);
    hk.expand(info.as_bytes(), &mut key.0)
        .map_err(|_| CourierError::DerivationLengthExceeded {
            requested: KEY_BYTES,
            max: MAX_DERIVED_BYTES,
        })?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agreement::agree;
    use crate::keys::generate;
    use crate::wire::DEFAULT_SALT;

    #[test]
    fn rfc5869_case_1() {
        let ikm = [0x0bu8; 22];
        let salt = hex::decode("000102030405060708090a0b0c").unwrap();
        let info = hex::decode("f0f1f2f3f4f5f6f7f8f9").unwrap();

        let okm = derive_bytes(&ikm, &salt, &info, 42).unwrap();
        assert_eq!(
            hex::encode(&*okm),
            "3cb25f25faacd57a90434f64d0362f2a2d2d0a90cf1a5a4c5db02d56ecc4c5bf34007208d5b887185865"
        );
    }

    #[test]
    fn keys_agree_across_roles() {
        let (a_sk, a_pk) = generate().unwrap();
        let (b_sk, b_pk) = generate().unwrap();
        let info = SharedInfo::for_conversation("conv-1");

        let ka = derive_key(&agree(&a_sk, &b_pk).unwrap(), DEFAULT_SALT, &info).unwrap();
        let kb = derive_key(&agree(&b_sk, &a_pk).unwrap(), DEFAULT_SALT, &info).unwrap();
        assert_eq!(ka, kb);
    }

    #[test]
    fn derive_key_matches_derive() {
        let (a_sk, _) = generate().unwrap();
        let (_, b_pk) = generate().unwrap();
        let secret = agree(&a_sk, &b_pk).unwrap();
        let info = SharedInfo::empty();

        let key = derive_key(&secret, DEFAULT_SALT, &info).unwrap();
        let bytes = derive(&secret, DEFAULT_SALT, &info, KEY_BYTES).unwrap();
        assert_eq!(key.as_bytes().as_slice(), bytes.as_slice());
    }

    #[test]
    fn salt_and_info_separate_keys() {
        let (a_sk, _) = generate().unwrap();
        let (_, b_pk) = generate().unwrap();
        let secret = agree(&a_sk, &b_pk).unwrap();

        let base = derive_key(&secret, DEFAULT_SALT, &SharedInfo::empty()).unwrap();
        let other_salt = derive_key(&secret, b"another-salt", &SharedInfo::empty()).unwrap();
        let other_info =
            derive_key(&secret, DEFAULT_SALT, &SharedInfo::for_conversation("x")).unwrap();

        assert_ne!(base, other_salt);
        assert_ne!(base, other_info);
        assert_ne!(base.as_bytes(), secret.as_bytes());
    }

    #[test]
    fn length_bound() {
        let ikm = [1u8; 32];
        assert_eq!(
            derive_bytes(&ikm, b"salt", b"", MAX_DERIVED_BYTES).unwrap().len(),
            MAX_DERIVED_BYTES
        );
        assert_eq!(
            derive_bytes(&ikm, b"salt", b"", MAX_DERIVED_BYTES + 1).unwrap_err(),
            CourierError::DerivationLengthExceeded {
                requested: MAX_DERIVED_BYTES + 1,
                max: MAX_DERIVED_BYTES
            }
        );
    }

    #[test]
    fn deterministic() {
        let a = derive_bytes(b"ikm", b"salt", b"info", 64).unwrap();
        let b = derive_bytes(b"ikm", b"salt", b"info", 64).unwrap();
        assert_eq!(*a, *b);
    }
}
