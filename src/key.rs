//! Key parsing: raw key text into an ordered sequence of [`KeyToken`]s.
//!
//! # Grammar
//!
//! ```text
//! key    := token (whitespace token)*
//! token  := "JOKER..." | "🃏" | suit digits?
//! suit   := "♠" | "S" | "♥" | "H" | "♣" | "C" | "♦" | "D"   (letters case-insensitive)
//! ```
//!
//! A JOKER takes its 1-based position in the key as its value, so repeated
//! jokers stay distinct. Values are not range-checked here; they are
//! normalized against the deck length when the step runs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DeckCipherError;
use crate::face::face_label;

/// Glyph accepted as a JOKER token.
pub const JOKER_GLYPH: &str = "🃏";

/// Word prefix (case-insensitive) that marks a JOKER token.
const JOKER_WORD: &str = "JOKER";

/// Operation family selected by a key token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Suit {
    Spade,
    Heart,
    Club,
    Diamond,
    Joker,
}

impl Suit {
    /// Suits a JOKER cycles through, indexed by `(position - 1) % 4`.
    pub const DRIVER_CYCLE: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Club, Suit::Diamond];

    /// Selects a suit from the leading character of a token.
    pub fn from_lead(c: char) -> Option<Suit> {
        match c.to_ascii_uppercase() {
            '♠' | 'S' => Some(Suit::Spade),
            '♥' | 'H' => Some(Suit::Heart),
            '♣' | 'C' => Some(Suit::Club),
            '♦' | 'D' => Some(Suit::Diamond),
            _ => None,
        }
    }

    /// Driver suit used by a JOKER at 1-based key `position`.
    pub fn driver_for(position: usize) -> Suit {
        Self::DRIVER_CYCLE[position.saturating_sub(1) % Self::DRIVER_CYCLE.len()]
    }

    /// Card glyph for the suit.
    pub fn glyph(self) -> &'static str {
        match self {
            Suit::Spade => "♠",
            Suit::Heart => "♥",
            Suit::Club => "♣",
            Suit::Diamond => "♦",
            Suit::Joker => JOKER_GLYPH,
        }
    }

    /// Upper-case suit name.
    pub fn name(self) -> &'static str {
        match self {
            Suit::Spade => "SPADE",
            Suit::Heart => "HEART",
            Suit::Club => "CLUB",
            Suit::Diamond => "DIAMOND",
            Suit::Joker => "JOKER",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One parsed key operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyToken {
    pub suit: Suit,
    pub value: u32,
    /// Token text as it appeared in the key.
    pub raw: String,
}

impl KeyToken {
    /// Creates a token with a synthesized raw text (its card name).
    pub fn new(suit: Suit, value: u32) -> Self {
        let mut token = KeyToken {
            suit,
            value,
            raw: String::new(),
        };
        token.raw = token.card();
        token
    }

    /// Card name of the token: `♠A`, `♥10`, `♣Q`, or `JOKER`.
    pub fn card(&self) -> String {
        match self.suit {
            Suit::Joker => JOKER_WORD.to_string(),
            suit => format!("{}{}", suit.glyph(), face_label(self.value)),
        }
    }

    /// Canonical key text that parses back to this token's suit and value.
    fn canonical(&self) -> String {
        match self.suit {
            Suit::Joker => JOKER_WORD.to_string(),
            suit => format!("{}{}", suit.glyph(), self.value),
        }
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.card())
    }
}

/// What the parser does with a token whose leading character selects no suit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuitFallback {
    /// Treat it as a SPADE.
    #[default]
    Spade,
    /// Fail with [`DeckCipherError::UnknownSuit`].
    Reject,
}

/// Turns raw key text into tokens under a [`SuitFallback`] policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyParser {
    fallback: SuitFallback,
}

impl KeyParser {
    /// Creates a parser with the given fallback policy.
    pub fn new(fallback: SuitFallback) -> Self {
        KeyParser { fallback }
    }

    /// Returns the parser's fallback policy.
    pub fn fallback(&self) -> SuitFallback {
        self.fallback
    }

    /// Parses a whole key.
    ///
    /// # Errors
    /// Returns [`DeckCipherError::UnknownSuit`] for the first token with an
    /// unrecognized suit when the policy is [`SuitFallback::Reject`]. The
    /// default policy never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatedeck::key::{KeyParser, Suit, SuitFallback};
    ///
    /// let tokens = KeyParser::default().parse("S2 ♥13 joker").unwrap();
    /// assert_eq!(tokens[0].suit, Suit::Spade);
    /// assert_eq!(tokens[1].value, 13);
    /// assert_eq!(tokens[2].value, 3);
    ///
    /// assert!(KeyParser::new(SuitFallback::Reject).parse("X5").is_err());
    /// ```
    pub fn parse(&self, raw: &str) -> Result<Vec<KeyToken>, DeckCipherError> {
        raw.split_whitespace()
            .enumerate()
            .map(|(i, text)| self.parse_token(text, i + 1))
            .collect()
    }

    fn parse_token(&self, text: &str, position: usize) -> Result<KeyToken, DeckCipherError> {
        if is_joker(text) {
            return Ok(KeyToken {
                suit: Suit::Joker,
                value: position as u32,
                raw: text.to_string(),
            });
        }

        let mut chars = text.chars();
        // split_whitespace never yields empty tokens
        let lead = chars.next().unwrap_or(' ');
        let suit = match (Suit::from_lead(lead), self.fallback) {
            (Some(suit), _) => suit,
            (None, SuitFallback::Spade) => {
                tracing::debug!(token = text, position, "unrecognized suit, using SPADE");
                Suit::Spade
            }
            (None, SuitFallback::Reject) => {
                return Err(DeckCipherError::UnknownSuit {
                    token: text.to_string(),
                    found: lead,
                    position,
                });
            }
        };

        Ok(KeyToken {
            suit,
            value: leading_value(chars.as_str()),
            raw: text.to_string(),
        })
    }
}

/// Parses a key with the default (SPADE fallback) policy, which cannot fail.
pub fn parse_key(raw: &str) -> Vec<KeyToken> {
    // the SPADE fallback never rejects a token
    KeyParser::default().parse(raw).unwrap_or_default()
}

/// Joins tokens back into key text that parses to the same suits and values.
///
/// ```
/// use fatedeck::key::{format_key, parse_key};
///
/// let tokens = parse_key("s5 h12 JOKER");
/// assert_eq!(format_key(&tokens), "♠5 ♥12 JOKER");
/// ```
pub fn format_key(tokens: &[KeyToken]) -> String {
    tokens
        .iter()
        .map(KeyToken::canonical)
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_joker(text: &str) -> bool {
    text == JOKER_GLYPH
        || text
            .get(..JOKER_WORD.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(JOKER_WORD))
}

/// Value from the leading ASCII digits of `rest`; none parses as 0 and
/// overflow saturates.
fn leading_value(rest: &str) -> u32 {
    let digits = rest
        .find(|c: char| !c.is_ascii_digit())
        .map_or(rest, |end| &rest[..end]);
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u32::MAX)
}
