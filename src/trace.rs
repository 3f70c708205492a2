//! TraceBuilder: drives a whole key over a deck and records every state.
//!
//! Encryption reads the key front to back and calls
//! [`StepEngine::apply_step`]; decryption reads it back to front and calls
//! [`StepEngine::invert_step`]. In both directions a token keeps its
//! original 1-based position, which JOKER uses to pick its driver suit.

use serde::Serialize;

use crate::deck::Deck;
use crate::error::DeckCipherError;
use crate::key::KeyToken;
use crate::step::{Direction, StepEngine, StepRecord};

/// Ordered step snapshots; record 0 is always the untransformed deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Trace {
    records: Vec<StepRecord>,
}

impl Trace {
    /// All records in order.
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Number of records (key length + 1 for a non-empty deck and key).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`: a trace holds at least its initial record.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Deck of the last record: the ciphertext or recovered plaintext.
    pub fn output(&self) -> &Deck {
        // built traces always start with the initial record
        &self.records[self.records.len() - 1].deck
    }

    /// The final deck rendered back to text, lossily (see [`Deck::render`]).
    pub fn output_text(&self) -> String {
        self.output().render()
    }

    /// The final deck as text that decrypts back exactly.
    ///
    /// # Errors
    /// Returns [`DeckCipherError::UnrenderableSymbol`] when XOR left a code
    /// with no `char` in the final deck.
    pub fn try_output_text(&self) -> Result<String, DeckCipherError> {
        self.output().try_render()
    }

    /// Consumes the trace and returns its records.
    pub fn into_records(self) -> Vec<StepRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a StepRecord;
    type IntoIter = std::slice::Iter<'a, StepRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Builds traces with a configured [`StepEngine`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceBuilder {
    engine: StepEngine,
}

impl TraceBuilder {
    /// Creates a builder around `engine`.
    pub fn new(engine: StepEngine) -> Self {
        TraceBuilder { engine }
    }

    /// Returns the step engine used for every token.
    pub fn engine(&self) -> &StepEngine {
        &self.engine
    }

    /// Runs `tokens` over `initial` in the given direction.
    ///
    /// An empty deck or an empty key yields a trace holding only the
    /// initial record.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatedeck::key::parse_key;
    /// use fatedeck::{Deck, Direction, TraceBuilder};
    ///
    /// let builder = TraceBuilder::default();
    /// let key = parse_key("S2 H3 JOKER D5");
    /// let encrypted = builder.build(&Deck::from_text("BORDERLAND"), &key, Direction::Encrypt);
    /// assert_eq!(encrypted.len(), 5);
    ///
    /// let decrypted = builder.build(encrypted.output(), &key, Direction::Decrypt);
    /// assert_eq!(decrypted.output_text(), "BORDERLAND");
    /// ```
    pub fn build(&self, initial: &Deck, tokens: &[KeyToken], direction: Direction) -> Trace {
        tracing::debug!(
            deck_len = initial.len(),
            key_len = tokens.len(),
            ?direction,
            "building trace"
        );

        let mut records = Vec::with_capacity(tokens.len() + 1);
        records.push(StepRecord::initial(initial.clone()));

        if initial.is_empty() || tokens.is_empty() {
            return Trace { records };
        }

        let mut current = initial.clone();
        match direction {
            Direction::Encrypt => {
                for (i, token) in tokens.iter().enumerate() {
                    let record = self.engine.apply_step(&current, token, i + 1);
                    current = record.deck.clone();
                    records.push(record);
                }
            }
            Direction::Decrypt => {
                for (i, token) in tokens.iter().enumerate().rev() {
                    let input = StepRecord::initial(current);
                    let record = self.engine.invert_step(&input, token, i + 1);
                    current = record.deck.clone();
                    records.push(record);
                }
            }
        }

        tracing::debug!(steps = records.len() - 1, "trace built");
        Trace { records }
    }
}
