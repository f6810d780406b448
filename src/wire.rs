//! Wire format (v1)
//!
//! Format:
//!   nonce[12] || ciphertext[N] || tag[16]
//!
//! Total length is always N + 28. There is no header: the suite and the
//! protocol parameters (salt, context convention, key length) are agreed
//! out-of-band.

use crate::aead::SealedMessage;
use crate::error::{CourierError, Result};

// ---------------------------------------------------------------------------
// Component sizes
// ---------------------------------------------------------------------------

/// X25519 public key size
pub const PUBLIC_KEY_BYTES: usize = 32;

/// Raw X25519 shared secret size
pub const SHARED_SECRET_BYTES: usize = 32;

/// Derived ChaCha20-Poly1305 key size
pub const KEY_BYTES: usize = 32;

pub const NONCE_BYTES: usize = 12;
pub const TAG_BYTES: usize = 16;

/// Bytes added to every plaintext: nonce + tag
pub const OVERHEAD_BYTES: usize = NONCE_BYTES + TAG_BYTES; // 28

/// Smallest valid blob: empty ciphertext
pub const MIN_BLOB_BYTES: usize = OVERHEAD_BYTES;

/// HKDF-SHA256 expansion bound: 255 * HashLen
pub const MAX_DERIVED_BYTES: usize = 255 * 32; // 8160

/// ChaCha20-Poly1305 single-message bound (RFC 8439): 2^38 - 64
pub const MAX_PLAINTEXT_BYTES: u64 = (1 << 38) - 64;

/// Protocol salt for HKDF (18 bytes). Changing it changes every derived key.
pub const DEFAULT_SALT: &[u8] = b"citadel|courier|v1";

/// Borrowed view of a parsed blob.
#[derive(Debug, Clone, Copy)]
pub struct WireComponents<'a> {
    pub nonce: &'a [u8; NONCE_BYTES],
    pub ciphertext: &'a [u8],
    pub tag: &'a [u8; TAG_BYTES],
}

/// Split a blob by fixed offsets from each end, without copying.
pub fn split(data: &[u8]) -> Result<WireComponents<'_>> {
    if data.len() < MIN_BLOB_BYTES {
        return Err(CourierError::TruncatedMessage {
            actual: data.len(),
            min: MIN_BLOB_BYTES,
        });
    }

    let tag_start = data.len() - TAG_BYTES;

    let nonce: &[u8; NONCE_BYTES] = data[..NONCE_BYTES]
        .try_into()
        .map_err(|_| truncated(data))?;
    let tag: &[u8; TAG_BYTES] = data[tag_start..]
        .try_into()
        .map_err(|_| truncated(data))?;

    Ok(WireComponents {
        nonce,
        ciphertext: &data[NONCE_BYTES..tag_start],
        tag,
    })
}

pub fn decode(data: &[u8]) -> Result<SealedMessage> {
    let parts = split(data)?;
    Ok(SealedMessage::new(
        *parts.nonce,
        parts.ciphertext.to_vec(),
        *parts.tag,
    ))
}

pub fn encode(sealed: &SealedMessage) -> Vec<u8> {
    let mut out = Vec::with_capacity(sealed.encoded_len());
    out.extend_from_slice(sealed.nonce());
    out.extend_from_slice(sealed.ciphertext());
    out.extend_from_slice(sealed.tag());
    out
}

fn truncated(data: &[u8]) -> CourierError {
    CourierError::TruncatedMessage {
        actual: data.len(),
        min: MIN_BLOB_BYTES,
    }
}

// ---------------------------------------------------------------------------
// Inspection (for ops/debugging)
// ---------------------------------------------------------------------------

/// Blob metadata, extracted without any key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobInfo {
    pub total_bytes: usize,
    /// Equals the plaintext length.
    pub ciphertext_bytes: usize,
}

impl core::fmt::Display for BlobInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Courier v1 | X25519 + HKDF-SHA256 + ChaCha20-Poly1305 | {} bytes ({} plaintext)",
            self.total_bytes, self.ciphertext_bytes
        )
    }
}

pub fn inspect(data: &[u8]) -> Result<BlobInfo> {
    let parts = split(data)?;
    Ok(BlobInfo {
        total_bytes: data.len(),
        ciphertext_bytes: parts.ciphertext.len(),
    })
}
