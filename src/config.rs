//! Cipher configuration loaded from TOML.
//!
//! ```toml
//! suit_fallback = "reject"      # or "spade" (default)
//! mirror_policy = "queens"      # or "never" (default)
//! uppercase_plaintext = true    # default false
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DeckCipherError;
use crate::face::MirrorPolicy;
use crate::key::SuitFallback;

/// Behavior switches for [`DeckCipher`](crate::DeckCipher).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CipherConfig {
    /// What the key parser does with an unrecognized suit character.
    pub suit_fallback: SuitFallback,
    /// Whether Queens run their operation on the mirrored deck.
    pub mirror_policy: MirrorPolicy,
    /// Upper-case plaintext before encrypting.
    pub uppercase_plaintext: bool,
}

impl CipherConfig {
    /// Parses a configuration from TOML text. Missing keys take defaults.
    ///
    /// # Errors
    /// Returns [`DeckCipherError::ConfigParse`] for malformed TOML, unknown
    /// keys or unknown policy names.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatedeck::config::CipherConfig;
    /// use fatedeck::face::MirrorPolicy;
    ///
    /// let config = CipherConfig::from_toml_str("mirror_policy = \"queens\"").unwrap();
    /// assert_eq!(config.mirror_policy, MirrorPolicy::Queens);
    /// assert!(!config.uppercase_plaintext);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, DeckCipherError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    /// Returns [`DeckCipherError::ConfigRead`] if the file cannot be read and
    /// [`DeckCipherError::ConfigParse`] if its content is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DeckCipherError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DeckCipherError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_default() {
        assert_eq!(CipherConfig::from_toml_str("").unwrap(), CipherConfig::default());
    }

    #[test]
    fn test_all_fields() {
        let config = CipherConfig::from_toml_str(
            "suit_fallback = \"reject\"\nmirror_policy = \"queens\"\nuppercase_plaintext = true\n",
        )
        .unwrap();
        assert_eq!(config.suit_fallback, SuitFallback::Reject);
        assert_eq!(config.mirror_policy, MirrorPolicy::Queens);
        assert!(config.uppercase_plaintext);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = CipherConfig::from_toml_str("shuffle_harder = true");
        assert!(matches!(result, Err(DeckCipherError::ConfigParse(_))));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result = CipherConfig::from_toml_str("mirror_policy = \"kings\"");
        assert!(matches!(result, Err(DeckCipherError::ConfigParse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = CipherConfig::load("/definitely/not/here/fatedeck.toml");
        assert!(matches!(result, Err(DeckCipherError::ConfigRead { .. })));
    }

    #[test]
    fn test_serialize_roundtrip_through_toml() {
        let config = CipherConfig {
            suit_fallback: SuitFallback::Reject,
            mirror_policy: MirrorPolicy::Queens,
            uppercase_plaintext: true,
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(CipherConfig::from_toml_str(&text).unwrap(), config);
    }
}
