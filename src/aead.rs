//! AEAD: ChaCha20-Poly1305 (RFC 8439)
//!
//! Sealing always draws a fresh random 96-bit nonce. The only way to pick a
//! nonce is `seal_with_nonce`, which exists under `cfg(test)` or the `kat`
//! feature.

use chacha20poly1305::{
    aead::{AeadInPlace, KeyInit},
    ChaCha20Poly1305, Nonce, Tag,
};
use getrandom::getrandom;

use crate::error::{CourierError, Result};
use crate::kdf::SymmetricKey;
use crate::wire::{self, MAX_PLAINTEXT_BYTES, NONCE_BYTES, OVERHEAD_BYTES, TAG_BYTES};

/// Output of one seal call: nonce, ciphertext and detached tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SealedMessage {
    nonce: [u8; NONCE_BYTES],
    ciphertext: Vec<u8>,
    tag: [u8; TAG_BYTES],
}

impl SealedMessage {
    pub(crate) fn new(nonce: [u8; NONCE_BYTES], ciphertext: Vec<u8>, tag: [u8; TAG_BYTES]) -> Self {
        Self {
            nonce,
            ciphertext,
            tag,
        }
    }

    /// Assemble from untrusted parts, checking the fixed sizes.
    pub fn from_parts(nonce: &[u8], ciphertext: Vec<u8>, tag: &[u8]) -> Result<Self> {
        let nonce: [u8; NONCE_BYTES] =
            nonce
                .try_into()
                .map_err(|_| CourierError::MalformedSealedMessage {
                    field: "nonce",
                    expected: NONCE_BYTES,
                    actual: nonce.len(),
                })?;
        let tag: [u8; TAG_BYTES] =
            tag.try_into()
                .map_err(|_| CourierError::MalformedSealedMessage {
                    field: "tag",
                    expected: TAG_BYTES,
                    actual: tag.len(),
                })?;
        Ok(Self::new(nonce, ciphertext, tag))
    }

    pub fn nonce(&self) -> &[u8; NONCE_BYTES] {
        &self.nonce
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub fn tag(&self) -> &[u8; TAG_BYTES] {
        &self.tag
    }

    /// Length of the wire encoding: ciphertext + 28.
    pub fn encoded_len(&self) -> usize {
        self.ciphertext.len() + OVERHEAD_BYTES
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        wire::encode(self)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        wire::decode(data)
    }
}

/// Generate a random 12-byte nonce. Used during encryption only.
pub fn nonce() -> Result<[u8; NONCE_BYTES]> {
    let mut n = [0u8; NONCE_BYTES];
    getrandom(&mut n).map_err(|_| CourierError::EntropySourceUnavailable)?;
    Ok(n)
}

/// Encrypt `plaintext` under `key`, authenticating `aad` without encrypting it.
pub fn seal(plaintext: &[u8], key: &SymmetricKey, aad: &[u8]) -> Result<SealedMessage> {
    check_plaintext_len(plaintext.len())?;
    let nonce = nonce()?;
    seal_detached(plaintext, key, aad, nonce)
}

/// Seal with a caller-chosen nonce. Reusing a nonce under one key is catastrophic.
#[cfg(any(test, feature = "kat"))]
pub fn seal_with_nonce(
    plaintext: &[u8],
    key: &SymmetricKey,
    aad: &[u8],
    nonce: [u8; NONCE_BYTES],
) -> Result<SealedMessage> {
    check_plaintext_len(plaintext.len())?;
    seal_detached(plaintext, key, aad, nonce)
}

/// Verify the tag and decrypt. Any mismatch is `AuthenticationFailed`.
pub fn open(sealed: &SealedMessage, key: &SymmetricKey, aad: &[u8]) -> Result<Vec<u8>> {
    let cipher = ChaCha20Poly1305::new_from_slice(key.as_bytes())
        .map_err(|_| CourierError::AuthenticationFailed)?;
    let mut buffer = sealed.ciphertext.clone();
    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(&sealed.nonce),
            aad,
            &mut buffer,
            Tag::from_slice(&sealed.tag),
        )
        .map_err(|_| CourierError::AuthenticationFailed)?;
    Ok(buffer)
}

fn check_plaintext_len(len: usize) -> Result<()> {
    let len = len as u64;
    if len > MAX_PLAINTEXT_BYTES {
        return Err(CourierError::PlaintextTooLarge {
            len,
            max: MAX_PLAINTEXT_BYTES,
        });
    }
    Ok(())
}

fn seal_detached(
    plaintext: &[u8],
    key: &SymmetricKey,
    aad: &[u8],
    nonce: [u8; NONCE_BYTES],
) -> Result<SealedMessage> {
    let too_large = CourierError::PlaintextTooLarge {
        len: plaintext.len() as u64,
        max: MAX_PLAINTEXT_BYTES,
    };
    let cipher = ChaCha20Poly1305::new_from_slice(key.as_bytes()).map_err(|_| too_large)?;
    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(&nonce), aad, &mut buffer)
        .map_err(|_| too_large)?;

    let mut tag_bytes = [0u8; TAG_BYTES];
    tag_bytes.copy_from_slice(&tag);
    Ok(SealedMessage::new(nonce, buffer, tag_bytes))
}
