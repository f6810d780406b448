//! End-to-end facade: agree -> derive -> seal -> encode, and back.
//!
//! `Courier` holds only deployment parameters. Derived keys live for the
//! duration of a single call and are zeroized when it returns.

use crate::aead::{self, SealedMessage};
use crate::agreement::agree;
use crate::config::ProtocolConfig;
use crate::context::SharedInfo;
use crate::error::{ConfigError, CourierError, Result};
use crate::kdf::{self, SymmetricKey};
use crate::keys::{KeyPair, PrivateKey, PublicKey};
use crate::wire;

/// Citadel Courier engine.
///
/// # Example
///
/// ```
/// use citadel_courier::{Courier, SharedInfo};
///
/// let courier = Courier::default();
/// let alice = courier.generate_keypair()?;
/// let bob = courier.generate_keypair()?;
/// let info = SharedInfo::for_conversation("alice-bob");
///
/// let blob = courier.seal(alice.private_key(), bob.public_key(), b"hi bob", b"", &info)?;
/// let plaintext = courier.open(bob.private_key(), alice.public_key(), &blob, b"", &info)?;
///
/// assert_eq!(plaintext, b"hi bob");
/// # Ok::<(), citadel_courier::CourierError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Courier {
    config: ProtocolConfig,
}

impl Courier {
    /// Build an engine over `config`, rejecting values that
    /// [`ProtocolConfig::validate`] refuses.
    pub fn new(config: ProtocolConfig) -> core::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    pub fn generate_keypair(&self) -> Result<KeyPair> {
        KeyPair::generate()
    }

    /// Derive the conversation key from our private key and the peer's public key.
    ///
    /// Both parties get the same key for the same `info`.
    pub fn derive_key(
        &self,
        ours: &PrivateKey,
        theirs: &PublicKey,
        info: &SharedInfo,
    ) -> Result<SymmetricKey> {
        let secret = agree(ours, theirs)?;
        kdf::derive_key(&secret, &self.config.salt, info)
    }

    /// Seal `plaintext` from `sender` to `recipient` and encode it as a blob.
    ///
    /// `aad` is authenticated but not encrypted; `info` is bound into the key.
    pub fn seal(
        &self,
        sender: &PrivateKey,
        recipient: &PublicKey,
        plaintext: &[u8],
        aad: &[u8],
        info: &SharedInfo,
    ) -> Result<Vec<u8>> {
        let len = plaintext.len() as u64;
        if len > self.config.max_plaintext_bytes {
            return Err(CourierError::PlaintextTooLarge {
                len,
                max: self.config.max_plaintext_bytes,
            });
        }

        let key = self.derive_key(sender, recipient, info)?;
        let sealed = aead::seal(plaintext, &key, aad)?;
        let blob = wire::encode(&sealed);
        tracing::debug!(
            recipient = ?recipient,
            plaintext_len = plaintext.len(),
            blob_len = blob.len(),
            "sealed message"
        );
        Ok(blob)
    }

    /// Decode and open a blob sealed by `sender` for `recipient`.
    ///
    /// Returns `AuthenticationFailed` for every verification failure,
    /// without saying which input was wrong.
    pub fn open(
        &self,
        recipient: &PrivateKey,
        sender: &PublicKey,
        blob: &[u8],
        aad: &[u8],
        info: &SharedInfo,
    ) -> Result<Vec<u8>> {
        let sealed = wire::decode(blob)?;
        let key = self.derive_key(recipient, sender, info)?;
        self.open_sealed(&sealed, &key, aad)
    }

    fn open_sealed(&self, sealed: &SealedMessage, key: &SymmetricKey, aad: &[u8]) -> Result<Vec<u8>> {
        match aead::open(sealed, key, aad) {
            Ok(plaintext) => {
                tracing::debug!(plaintext_len = plaintext.len(), "opened message");
                Ok(plaintext)
            }
            Err(e) => {
                tracing::debug!(blob_len = sealed.encoded_len(), "rejected message");
                Err(e)
            }
        }
    }
}
