//! # Citadel Courier
//!
//! Single-shot end-to-end message sealing between two X25519 key pairs.
//!
//! ## Quick Start
//!
//! ```rust
//! use citadel_courier::{Courier, SharedInfo};
//!
//! let courier = Courier::default();
//! let sender = courier.generate_keypair().unwrap();
//! let recipient = courier.generate_keypair().unwrap();
//! let info = SharedInfo::for_conversation("lab-results");
//!
//! let blob = courier
//!     .seal(sender.private_key(), recipient.public_key(), b"secret", b"", &info)
//!     .unwrap();
//! let plaintext = courier
//!     .open(recipient.private_key(), sender.public_key(), &blob, b"", &info)
//!     .unwrap();
//!
//! assert_eq!(plaintext, b"secret");
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! X25519(our_sk, their_pk) -> HKDF-SHA256(salt, info) -> ChaCha20-Poly1305
//!     -> nonce[12] || ciphertext[N] || tag[16]
//! ```
//!
//! ## Security Properties
//!
//! - **Symmetric derivation**: both parties compute bit-identical keys
//! - **Fresh nonces**: every seal draws a random 96-bit nonce
//! - **Opaque authentication failure**: wrong key, tampering and wrong AAD
//!   all surface as `AuthenticationFailed`
//! - **Secret hygiene**: private keys, shared secrets and derived keys are
//!   zeroized on drop and redacted in `Debug`
//!
//! ## What's NOT Provided
//!
//! - Signatures or identity authentication
//! - Replay protection
//! - Ratchets / forward secrecy across messages
//! - Key storage or directory lookup

#![deny(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/citadel-courier/0.1.0")]

pub mod aead;
pub mod agreement;
pub mod config;
pub mod context;
mod courier;
mod error;
pub mod kdf;
pub mod keys;
pub mod wire;

pub use aead::{open, seal, SealedMessage};
pub use agreement::{agree, SharedSecret};
pub use config::ProtocolConfig;
pub use context::SharedInfo;
pub use courier::Courier;
pub use error::{ConfigError, CourierError, ErrorClass, Result};
pub use kdf::{derive, derive_key, SymmetricKey};
pub use keys::{generate, public_key, KeyPair, PrivateKey, PublicKey};
pub use wire::{decode, encode, inspect, BlobInfo};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
