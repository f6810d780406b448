//! X25519 key agreement
//!
//! `agree(a.private, b.public) == agree(b.private, a.public)` for any two
//! well-formed key pairs. The raw secret is only ever fed to the KDF.

use core::fmt;

use crate::error::{CourierError, Result};
use crate::keys::{PrivateKey, PublicKey};
use crate::wire::SHARED_SECRET_BYTES;

/// Raw Diffie-Hellman output. Zeroized on drop, not `Clone`.
pub struct SharedSecret(x25519_dalek::SharedSecret);

impl SharedSecret {
    /// Raw bytes. Never use these directly as a cipher key.
    pub fn as_bytes(&self) -> &[u8; SHARED_SECRET_BYTES] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}

/// Compute the X25519 shared secret between our private key and a peer key.
///
/// Fails with `InvalidPeerKey` when the peer key is a low-order point, which
/// would force an all-zero secret regardless of our scalar.
pub fn agree(private: &PrivateKey, peer: &PublicKey) -> Result<SharedSecret> {
    let shared = private.x25519().diffie_hellman(&peer.x25519());
    if !shared.was_contributory() {
        return Err(CourierError::InvalidPeerKey);
    }
    Ok(SharedSecret(shared))
}
