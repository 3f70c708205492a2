//! Error types for the fatedeck library.
//!
//! The transform core never fails: malformed keys degrade to documented
//! defaults and empty decks short-circuit to no-ops. Errors only arise in
//! the outer layers (strict key parsing, configuration loading and strict
//! rendering of a deck back to text).

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the fatedeck library.
#[derive(Debug, Error)]
pub enum DeckCipherError {
    /// A key token starts with a character that selects no suit and the
    /// parser runs with [`SuitFallback::Reject`](crate::key::SuitFallback::Reject).
    #[error("Unrecognized suit {found:?} in key token {token:?} at position {position}")]
    UnknownSuit {
        /// The full token text.
        token: String,
        /// The leading character that failed to match a suit.
        found: char,
        /// 1-based position of the token within the key.
        position: usize,
    },
    /// A deck holds a code with no Unicode character (XOR output in the
    /// surrogate range or above U+10FFFF), so it cannot become text.
    #[error("Symbol at position {position} has code {code:#X}, which is not a Unicode scalar value")]
    UnrenderableSymbol {
        /// 0-based index in the deck.
        position: usize,
        code: u32,
    },
    /// The configuration file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configuration text is not valid TOML for [`CipherConfig`](crate::config::CipherConfig).
    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
