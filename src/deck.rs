//! Deck and Symbol value types.
//!
//! A [`Deck`] is an ordered, fixed-length sequence of [`Symbol`]s. It is a
//! plain value: transforms consume one deck and return a new one, so every
//! snapshot kept in a trace stays independently inspectable.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::DeckCipherError;

/// A single symbol of a deck, stored as its raw numeric code.
///
/// Symbols are created from `char`s, but XOR can produce codes outside the
/// Unicode scalar range. The raw code is kept so that XOR stays exactly
/// self-inverse; only [`to_char`](Self::to_char) substitutes U+FFFD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl Symbol {
    /// Creates a symbol from a raw code.
    pub const fn from_code(code: u32) -> Self {
        Symbol(code)
    }

    /// Returns the raw numeric code.
    pub const fn code(self) -> u32 {
        self.0
    }

    /// Returns the displayable character for this symbol.
    ///
    /// Codes that are not Unicode scalar values render as
    /// [`char::REPLACEMENT_CHARACTER`].
    pub fn to_char(self) -> char {
        char::from_u32(self.0).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Returns a new symbol whose code is `code ^ mask`.
    pub const fn xor(self, mask: u32) -> Self {
        Symbol(self.0 ^ mask)
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol(c as u32)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.to_char())
    }
}

/// An ordered, fixed-length sequence of symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Deck(Vec<Symbol>);

impl Deck {
    /// Builds a deck from text, one symbol per `char`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatedeck::Deck;
    ///
    /// let deck = Deck::from_text("ABCD");
    /// assert_eq!(deck.len(), 4);
    /// assert_eq!(deck.render(), "ABCD");
    /// ```
    pub fn from_text(text: &str) -> Self {
        Deck(text.chars().map(Symbol::from).collect())
    }

    /// Number of symbols in the deck.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the deck holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the symbols in order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    /// Consumes the deck and returns its symbols.
    pub fn into_symbols(self) -> Vec<Symbol> {
        self.0
    }

    /// First symbol, if any.
    pub fn first(&self) -> Option<Symbol> {
        self.0.first().copied()
    }

    /// Last symbol, if any.
    pub fn last(&self) -> Option<Symbol> {
        self.0.last().copied()
    }

    /// Concatenates the symbols back into text.
    ///
    /// Lossy: codes that are not Unicode scalar values become U+FFFD, and
    /// such text does not decrypt back. Use [`try_render`](Self::try_render)
    /// where the text must round-trip.
    pub fn render(&self) -> String {
        self.0.iter().map(|s| s.to_char()).collect()
    }

    /// Concatenates the symbols back into text, refusing to substitute.
    ///
    /// # Errors
    /// Returns [`DeckCipherError::UnrenderableSymbol`] for the first symbol
    /// whose code has no `char`.
    ///
    /// ```
    /// use fatedeck::{Deck, DeckCipherError, Symbol};
    ///
    /// assert_eq!(Deck::from_text("AB").try_render().unwrap(), "AB");
    ///
    /// let deck: Deck = [Symbol::from('A'), Symbol::from_code(0xD800)].into_iter().collect();
    /// assert!(matches!(
    ///     deck.try_render(),
    ///     Err(DeckCipherError::UnrenderableSymbol { position: 1, code: 0xD800 })
    /// ));
    /// ```
    pub fn try_render(&self) -> Result<String, DeckCipherError> {
        self.0
            .iter()
            .enumerate()
            .map(|(position, s)| {
                char::from_u32(s.code()).ok_or(DeckCipherError::UnrenderableSymbol {
                    position,
                    code: s.code(),
                })
            })
            .collect()
    }
}

impl From<Vec<Symbol>> for Deck {
    fn from(symbols: Vec<Symbol>) -> Self {
        Deck(symbols)
    }
}

impl From<&str> for Deck {
    fn from(text: &str) -> Self {
        Deck::from_text(text)
    }
}

impl FromIterator<Symbol> for Deck {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Deck(iter.into_iter().collect())
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl Serialize for Deck {
    /// Serializes as an array of one-character strings.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_one_symbol_per_char() {
        let deck = Deck::from_text("Añ♠");
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.symbols()[0].code(), 65);
        assert_eq!(deck.symbols()[1].code(), 0xF1);
        assert_eq!(deck.symbols()[2].code(), 0x2660);
    }

    #[test]
    fn test_render_roundtrip() {
        let text = "BORDERLAND";
        assert_eq!(Deck::from_text(text).render(), text);
        assert_eq!(Deck::from_text(text).to_string(), text);
    }

    #[test]
    fn test_empty_deck() {
        let deck = Deck::from_text("");
        assert!(deck.is_empty());
        assert_eq!(deck.first(), None);
        assert_eq!(deck.last(), None);
        assert_eq!(deck.render(), "");
    }

    #[test]
    fn test_symbol_xor_self_inverse() {
        let s = Symbol::from('A');
        assert_eq!(s.xor(1).to_char(), '@');
        assert_eq!(s.xor(1).xor(1), s);
    }

    #[test]
    fn test_non_scalar_code_renders_replacement() {
        let s = Symbol::from_code(0xD800);
        assert_eq!(s.to_char(), char::REPLACEMENT_CHARACTER);
        assert_eq!(s.code(), 0xD800);
    }

    #[test]
    fn test_try_render_reports_first_unrenderable() {
        let deck: Deck = [0x41, 0x110000, 0xD800]
            .into_iter()
            .map(Symbol::from_code)
            .collect();
        assert_eq!(deck.render(), "A\u{FFFD}\u{FFFD}");
        assert!(matches!(
            deck.try_render(),
            Err(DeckCipherError::UnrenderableSymbol { position: 1, code: 0x110000 })
        ));
        assert_eq!(Deck::from_text("A\n♠").try_render().unwrap(), "A\n♠");
    }

    #[test]
    fn test_serialize_as_char_array() {
        let json = serde_json::to_string(&Deck::from_text("AB")).unwrap();
        assert_eq!(json, r#"["A","B"]"#);
    }
}
