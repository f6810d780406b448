//! Deployment parameters agreed out-of-band.
//!
//! JSON layout:
//!
//! ```json
//! { "salt": "6369746164656c7c636f75726965727c7631", "max_plaintext_bytes": 1048576 }
//! ```
//!
//! Both ends of a conversation must load identical values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::wire::{DEFAULT_SALT, MAX_PLAINTEXT_BYTES};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// HKDF salt, hex-encoded on disk.
    #[serde(with = "hex_bytes")]
    pub salt: Vec<u8>,

    /// Deployment cap on plaintext size; never above the cipher maximum.
    #[serde(default = "default_max_plaintext_bytes")]
    pub max_plaintext_bytes: u64,
}

fn default_max_plaintext_bytes() -> u64 {
    MAX_PLAINTEXT_BYTES
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            salt: DEFAULT_SALT.to_vec(),
            max_plaintext_bytes: MAX_PLAINTEXT_BYTES,
        }
    }
}

impl ProtocolConfig {
    pub fn with_salt(salt: &[u8]) -> Self {
        Self {
            salt: salt.to_vec(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.salt.is_empty() {
            return Err(ConfigError::EmptySalt);
        }
        if self.max_plaintext_bytes > MAX_PLAINTEXT_BYTES {
            return Err(ConfigError::LimitTooLarge {
                configured: self.max_plaintext_bytes,
                max: MAX_PLAINTEXT_BYTES,
            });
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&raw)?;
        tracing::info!(
            path = %path.display(),
            salt_len = config.salt.len(),
            max_plaintext_bytes = config.max_plaintext_bytes,
            "loaded protocol config"
        );
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_uses_protocol_salt() {
        let config = ProtocolConfig::default();
        assert_eq!(config.salt, DEFAULT_SALT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn json_roundtrip() {
        let config = ProtocolConfig {
            salt: b"deployment-salt".to_vec(),
            max_plaintext_bytes: 4096,
        };
        let json = config.to_json_string().unwrap();
        assert!(json.contains(&hex::encode(b"deployment-salt")));
        assert_eq!(ProtocolConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn limit_defaults_to_cipher_max() {
        let config = ProtocolConfig::from_json_str(r#"{ "salt": "0102" }"#).unwrap();
        assert_eq!(config.salt, vec![1, 2]);
        assert_eq!(config.max_plaintext_bytes, MAX_PLAINTEXT_BYTES);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            ProtocolConfig::from_json_str(r#"{ "salt": "" }"#),
            Err(ConfigError::EmptySalt)
        ));
        assert!(matches!(
            ProtocolConfig::from_json_str(r#"{ "salt": "zz" }"#),
            Err(ConfigError::Json(_))
        ));
        let too_big = format!(
            r#"{{ "salt": "01", "max_plaintext_bytes": {} }}"#,
            MAX_PLAINTEXT_BYTES + 1
        );
        assert!(matches!(
            ProtocolConfig::from_json_str(&too_big),
            Err(ConfigError::LimitTooLarge { .. })
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "salt": "{}" }}"#, hex::encode(DEFAULT_SALT)).unwrap();

        let config = ProtocolConfig::from_file(file.path()).unwrap();
        assert_eq!(config, ProtocolConfig::default());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ProtocolConfig::from_file(dir.path().join("absent.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
