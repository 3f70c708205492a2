//! fatedeck: the Fate Deck keyed transposition/substitution cipher.
//!
//! A message is laid out as a deck of symbols and a key is a hand of cards.
//! Each card applies one reversible transform to the deck; decrypting plays
//! the hand backwards with every transform inverted. Every intermediate deck
//! is kept as an auditable trace.
//!
//! This is a teaching cipher, not a secure one.
//!
//! # Architecture
//!
//! ```text
//! transforms   (primitives: cut, reverse_top, faro/unfaro, rotate, xor, mirror)
//!     ↑ one primitive per operation
//! StepEngine   (one key token forward or inverse, JOKER meta operation)
//!     ↑ one step per token
//! TraceBuilder (whole key forward or backward, record per step)
//!     ↑
//! DeckCipher   (config + KeyParser + TraceBuilder, text in / trace out)
//! ```
//!
//! # Examples
//!
//! Encrypt and decrypt a message:
//!
//! ```
//! use fatedeck::DeckCipher;
//!
//! let cipher = DeckCipher::new();
//! let key = "♠7 ♥K ♣3 JOKER ♦5";
//!
//! let encrypted = cipher.encrypt("BORDERLAND", key).unwrap();
//! assert_ne!(encrypted.output_text(), "BORDERLAND");
//!
//! let decrypted = cipher.decrypt(&encrypted.output_text(), key).unwrap();
//! assert_eq!(decrypted.output_text(), "BORDERLAND");
//! ```
//!
//! Walk the trace step by step:
//!
//! ```
//! use fatedeck::key::parse_key;
//! use fatedeck::{Deck, Direction, TraceBuilder};
//!
//! let trace = TraceBuilder::default().build(
//!     &Deck::from_text("ABCD"),
//!     &parse_key("S2 H2"),
//!     Direction::Encrypt,
//! );
//! let decks: Vec<String> = trace.records().iter().map(|r| r.deck.render()).collect();
//! assert_eq!(decks, ["ABCD", "CDAB", "DCAB"]);
//! ```

#![deny(clippy::all)]

pub mod config;
pub mod error;
pub mod face;
pub mod key;
pub mod transforms;

mod cipher;
mod deck;
mod step;
mod trace;

pub use cipher::DeckCipher;
pub use deck::{Deck, Symbol};
pub use error::DeckCipherError;
pub use step::{Direction, StepEngine, StepRecord};
pub use trace::{Trace, TraceBuilder};
