//! Error types for Citadel Courier.
//!
//! Every failure is local and synchronous. `AuthenticationFailed` carries no
//! detail: a wrong key, a flipped bit or a mismatched AAD must look identical
//! to the caller.

use thiserror::Error;

/// Failures of the key agreement, derivation, sealing and codec layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CourierError {
    /// A public key had the wrong length.
    #[error("invalid key encoding: expected {expected} bytes, got {actual}")]
    InvalidKeyEncoding { expected: usize, actual: usize },

    /// A hex-encoded public key was not well-formed hex.
    #[error("invalid key encoding: not valid hex")]
    InvalidKeyHex,

    /// The peer key is a low-order point; the shared secret would be degenerate.
    #[error("invalid peer key: key agreement is non-contributory")]
    InvalidPeerKey,

    /// Requested more output than HKDF can expand.
    #[error("derivation length {requested} exceeds maximum of {max} bytes")]
    DerivationLengthExceeded { requested: usize, max: usize },

    #[error("plaintext of {len} bytes exceeds limit of {max} bytes")]
    PlaintextTooLarge { len: u64, max: u64 },

    #[error("authentication failed")]
    AuthenticationFailed,

    /// Nonce or tag of a sealed message had the wrong size.
    #[error("malformed sealed message: {field} must be {expected} bytes, got {actual}")]
    MalformedSealedMessage {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("truncated message: got {actual} bytes, need at least {min}")]
    TruncatedMessage { actual: usize, min: usize },

    /// The OS random source failed. Not recoverable.
    #[error("secure random source unavailable")]
    EntropySourceUnavailable,
}

/// Coarse classification so callers can pick a policy per failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Malformed or out-of-range input; the caller may fix and retry.
    Input,
    /// Forged, tampered or hostile input; discard the message.
    Security,
    /// The process cannot continue to produce keys or nonces.
    Fatal,
}

impl CourierError {
    /// Which [`ErrorClass`] this failure belongs to.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::AuthenticationFailed | Self::InvalidPeerKey => ErrorClass::Security,
            Self::EntropySourceUnavailable => ErrorClass::Fatal,
            Self::InvalidKeyEncoding { .. }
            | Self::InvalidKeyHex
            | Self::DerivationLengthExceeded { .. }
            | Self::PlaintextTooLarge { .. }
            | Self::MalformedSealedMessage { .. }
            | Self::TruncatedMessage { .. } => ErrorClass::Input,
        }
    }

    /// True only for [`ErrorClass::Fatal`] failures.
    pub fn is_fatal(&self) -> bool {
        self.class() == ErrorClass::Fatal
    }
}

/// Result type for courier operations.
pub type Result<T> = core::result::Result<T, CourierError>;

/// Failures while loading or validating a [`ProtocolConfig`](crate::ProtocolConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("salt must not be empty")]
    EmptySalt,

    #[error("plaintext limit {configured} exceeds cipher maximum {max}")]
    LimitTooLarge { configured: u64, max: u64 },
}
