//! SharedInfo conventions for key derivation.
//!
//! Context (bytes):
//!   b"courier|conv|v1|" + conversation_id
//!   b"courier|conv|v1|" + conversation_id + b"|epoch" + epoch(u32 BE)
//!
//! The context is bound into HKDF `info`, so a blob sealed under one context
//! cannot be opened under another.

pub const CONVERSATION_PREFIX: &[u8] = b"courier|conv|v1|";
pub const EPOCH_SEPARATOR: &[u8] = b"|epoch";

/// Additional context bound into key derivation. Empty is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SharedInfo {
    inner: Vec<u8>,
}

impl SharedInfo {
    pub fn empty() -> Self {
        Self { inner: Vec::new() }
    }

    /// Raw context from arbitrary bytes.
    ///
    /// Prefer the typed constructors when possible.
    pub fn raw(bytes: &[u8]) -> Self {
        Self {
            inner: bytes.to_vec(),
        }
    }

    pub fn for_conversation(conversation_id: &str) -> Self {
        let id = conversation_id.as_bytes();
        let mut inner = Vec::with_capacity(CONVERSATION_PREFIX.len() + id.len());
        inner.extend_from_slice(CONVERSATION_PREFIX);
        inner.extend_from_slice(id);
        Self { inner }
    }

    /// Conversation context with a rotation epoch. Bumping the epoch yields a
    /// fresh key from the same key pairs.
    pub fn for_conversation_epoch(conversation_id: &str, epoch: u32) -> Self {
        let mut info = Self::for_conversation(conversation_id);
        info.inner.extend_from_slice(EPOCH_SEPARATOR);
        info.inner.extend_from_slice(&epoch.to_be_bytes());
        info
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
