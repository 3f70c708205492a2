//! DeckCipher: the configured end-to-end entry point.
//!
//! Wires a [`KeyParser`] and a [`TraceBuilder`] together from a
//! [`CipherConfig`] and turns text plus key text into a [`Trace`].

use crate::config::CipherConfig;
use crate::deck::Deck;
use crate::error::DeckCipherError;
use crate::key::{KeyParser, KeyToken};
use crate::step::{Direction, StepEngine};
use crate::trace::{Trace, TraceBuilder};

/// Text-in, trace-out cipher built from a [`CipherConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DeckCipher {
    config: CipherConfig,
    parser: KeyParser,
    builder: TraceBuilder,
}

impl DeckCipher {
    /// Creates a cipher with the default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatedeck::DeckCipher;
    ///
    /// let cipher = DeckCipher::new();
    /// let encrypted = cipher.encrypt("ABCD", "S2").unwrap();
    /// assert_eq!(encrypted.output_text(), "CDAB");
    ///
    /// let decrypted = cipher.decrypt(&encrypted.output_text(), "S2").unwrap();
    /// assert_eq!(decrypted.output_text(), "ABCD");
    /// ```
    pub fn new() -> Self {
        Self::with_config(CipherConfig::default())
    }

    /// Creates a cipher from an explicit configuration.
    pub fn with_config(config: CipherConfig) -> Self {
        DeckCipher {
            config,
            parser: KeyParser::new(config.suit_fallback),
            builder: TraceBuilder::new(StepEngine::new(config.mirror_policy)),
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &CipherConfig {
        &self.config
    }

    /// Parses `key` under the configured suit fallback.
    ///
    /// # Errors
    /// Returns [`DeckCipherError::UnknownSuit`] only when the configuration
    /// rejects unrecognized suits.
    pub fn parse_key(&self, key: &str) -> Result<Vec<KeyToken>, DeckCipherError> {
        self.parser.parse(key)
    }

    /// Encrypts `plaintext` under `key`, returning the full trace.
    ///
    /// # Errors
    /// Same as [`parse_key`](Self::parse_key).
    pub fn encrypt(&self, plaintext: &str, key: &str) -> Result<Trace, DeckCipherError> {
        Ok(self.encrypt_tokens(plaintext, &self.parse_key(key)?))
    }

    /// Decrypts `ciphertext` under `key`, returning the full trace.
    ///
    /// # Errors
    /// Same as [`parse_key`](Self::parse_key).
    pub fn decrypt(&self, ciphertext: &str, key: &str) -> Result<Trace, DeckCipherError> {
        Ok(self.decrypt_tokens(ciphertext, &self.parse_key(key)?))
    }

    /// Encrypts with an already-parsed key.
    pub fn encrypt_tokens(&self, plaintext: &str, tokens: &[KeyToken]) -> Trace {
        let deck = if self.config.uppercase_plaintext {
            Deck::from_text(&plaintext.to_uppercase())
        } else {
            Deck::from_text(plaintext)
        };
        self.builder.build(&deck, tokens, Direction::Encrypt)
    }

    /// Decrypts with an already-parsed key.
    pub fn decrypt_tokens(&self, ciphertext: &str, tokens: &[KeyToken]) -> Trace {
        self.builder.build(&Deck::from_text(ciphertext), tokens, Direction::Decrypt)
    }

    /// Encrypts and returns only the ciphertext, rendered strictly.
    ///
    /// # Errors
    /// [`DeckCipherError::UnknownSuit`] as for [`parse_key`](Self::parse_key),
    /// or [`DeckCipherError::UnrenderableSymbol`] when the ciphertext holds a
    /// code that text cannot carry.
    ///
    /// ```
    /// use fatedeck::DeckCipher;
    ///
    /// let cipher = DeckCipher::new();
    /// let ciphertext = cipher.encrypt_text("BORDERLAND", "S3 H4 C2").unwrap();
    /// assert_eq!(ciphertext, "LRNEDDBAOR");
    /// assert_eq!(cipher.decrypt_text(&ciphertext, "S3 H4 C2").unwrap(), "BORDERLAND");
    /// ```
    pub fn encrypt_text(&self, plaintext: &str, key: &str) -> Result<String, DeckCipherError> {
        self.encrypt(plaintext, key)?.try_output_text()
    }

    /// Decrypts and returns only the plaintext, rendered strictly.
    ///
    /// # Errors
    /// Same as [`encrypt_text`](Self::encrypt_text).
    pub fn decrypt_text(&self, ciphertext: &str, key: &str) -> Result<String, DeckCipherError> {
        self.decrypt(ciphertext, key)?.try_output_text()
    }

    /// Runs an already-built deck through `key` in `direction`.
    ///
    /// # Errors
    /// Same as [`parse_key`](Self::parse_key).
    pub fn trace(&self, deck: &Deck, key: &str, direction: Direction) -> Result<Trace, DeckCipherError> {
        let tokens = self.parse_key(key)?;
        Ok(self.builder.build(deck, &tokens, direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::MirrorPolicy;
    use crate::key::SuitFallback;

    #[test]
    fn test_encrypt_decrypt_text() {
        let cipher = DeckCipher::new();
        let key = "C7 JOKER H13 D4 S11 JOKER";
        let enc = cipher.encrypt("BORDERLAND", key).unwrap();
        assert_ne!(enc.output_text(), "BORDERLAND");
        let dec = cipher.decrypt(&enc.output_text(), key).unwrap();
        assert_eq!(dec.output_text(), "BORDERLAND");
    }

    #[test]
    fn test_uppercase_plaintext() {
        let cipher = DeckCipher::with_config(CipherConfig {
            uppercase_plaintext: true,
            ..CipherConfig::default()
        });
        let trace = cipher.encrypt("borderland", "").unwrap();
        assert_eq!(trace.output_text(), "BORDERLAND");
    }

    #[test]
    fn test_decrypt_does_not_uppercase() {
        let cipher = DeckCipher::with_config(CipherConfig {
            uppercase_plaintext: true,
            ..CipherConfig::default()
        });
        assert_eq!(cipher.decrypt("mixed Case", "").unwrap().output_text(), "mixed Case");
    }

    #[test]
    fn test_strict_fallback_rejects_key() {
        let cipher = DeckCipher::with_config(CipherConfig {
            suit_fallback: SuitFallback::Reject,
            ..CipherConfig::default()
        });
        assert!(matches!(
            cipher.encrypt("ABC", "S1 Z2"),
            Err(DeckCipherError::UnknownSuit { position: 2, .. })
        ));
    }

    #[test]
    fn test_lenient_fallback_treats_unknown_as_spade() {
        let cipher = DeckCipher::new();
        let a = cipher.encrypt("ABCD", "Z2").unwrap();
        let b = cipher.encrypt("ABCD", "S2").unwrap();
        assert_eq!(a.output_text(), b.output_text());
    }

    #[test]
    fn test_token_entry_points_match_text_key() {
        let cipher = DeckCipher::new();
        let key = "S3 JOKER D5 C2";
        let tokens = cipher.parse_key(key).unwrap();
        assert_eq!(tokens.len(), 4);
        assert_eq!(
            cipher.encrypt_tokens("BORDERLAND", &tokens),
            cipher.encrypt("BORDERLAND", key).unwrap()
        );
        assert_eq!(
            cipher.decrypt_tokens("BORDERLAND", &tokens),
            cipher.decrypt("BORDERLAND", key).unwrap()
        );
    }

    #[test]
    fn test_unrenderable_ciphertext_is_an_error() {
        // 2048 symbols: D13 rotates by the whole deck and XORs with 0x800,
        // sending U+D7FF into the surrogate range
        let plain = format!("\u{D7FF}{}", "A".repeat(2047));
        let cipher = DeckCipher::new();

        let trace = cipher.encrypt(&plain, "D13").unwrap();
        assert_eq!(trace.output().symbols()[0].code(), 0xDFFF);
        assert!(trace.output_text().starts_with(char::REPLACEMENT_CHARACTER));
        assert!(matches!(
            cipher.encrypt_text(&plain, "D13"),
            Err(DeckCipherError::UnrenderableSymbol { position: 0, code: 0xDFFF })
        ));

        // the deck itself still inverts exactly
        let back = cipher.trace(trace.output(), "D13", Direction::Decrypt).unwrap();
        assert_eq!(back.try_output_text().unwrap(), plain);
    }

    #[test]
    fn test_mirror_policy_changes_output() {
        let plain = "ABCDEFGHIJKLMNOP";
        let never = DeckCipher::new().encrypt(plain, "H12").unwrap();
        let queens = DeckCipher::with_config(CipherConfig {
            mirror_policy: MirrorPolicy::Queens,
            ..CipherConfig::default()
        })
        .encrypt(plain, "H12")
        .unwrap();
        assert_ne!(never.output_text(), queens.output_text());
    }
}
