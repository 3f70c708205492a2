//! StepEngine: applies one key token to a deck, or undoes it.
//!
//! # Dispatch
//!
//! ```text
//! suit     forward                    inverse
//! SPADE    cut(v)                     rotate_right(v)
//! HEART    reverse_top(v)             reverse_top(v)
//! CLUB     faro(v)                    unfaro(v)
//! DIAMOND  rotate_left(v), xor(v)     xor(v), rotate_right(v)
//! JOKER    mirror, driver(N), xor(s)  xor(s), undo driver(N), mirror
//! ```
//!
//! `v` is the token value normalized against the deck length. A JOKER
//! synthesizes a driver operation and runs it through the same dispatch as
//! an ordinary token, so forward and inverse stay symmetric by construction.

use serde::{Deserialize, Serialize};

use crate::deck::Deck;
use crate::face::{normalize, MirrorPolicy};
use crate::key::{KeyToken, Suit};
use crate::transforms;

/// Modulus of the JOKER XOR seed.
const JOKER_SEED_MODULUS: u32 = 7;

/// Which way a step runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Snapshot of a deck after one step, with its audit data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub deck: Deck,
    /// Human-readable label naming suit, value and any mirror/seed applied.
    pub desc: String,
    /// Positions touched by the step, for highlighting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_indexes: Option<Vec<usize>>,
    /// Per-symbol XOR audit log.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xor_info: Option<String>,
}

impl StepRecord {
    /// The record that opens every trace: the untransformed deck.
    pub fn initial(deck: Deck) -> Self {
        StepRecord {
            deck,
            desc: "Initial".to_string(),
            affected_indexes: None,
            xor_info: None,
        }
    }

    fn unchanged(deck: Deck, desc: &str) -> Self {
        StepRecord {
            deck,
            desc: desc.to_string(),
            affected_indexes: None,
            xor_info: None,
        }
    }
}

/// A primitive ready to run: suit, final magnitude and mirror wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Operation {
    suit: Suit,
    magnitude: usize,
    mirrored: bool,
}

impl Operation {
    fn from_token(token: &KeyToken, deck_len: usize, policy: MirrorPolicy) -> Self {
        Operation {
            suit: token.suit,
            magnitude: normalize(token.value, deck_len),
            mirrored: policy.wraps(token.value),
        }
    }

    /// Operation built by a JOKER; its magnitude is already below the deck
    /// length and is not normalized again.
    fn synthesized(suit: Suit, magnitude: usize) -> Self {
        Operation {
            suit,
            magnitude,
            mirrored: false,
        }
    }

    fn action(&self) -> String {
        let n = self.magnitude;
        match self.suit {
            Suit::Spade => format!("CUT {}", n),
            Suit::Heart => format!("REVERSE top {}", n),
            Suit::Club => format!("FARO split at {}", n),
            Suit::Diamond => format!("ROTATE {} + XOR {}", n, n),
            Suit::Joker => "NOOP".to_string(),
        }
    }

    fn affected(&self, deck_len: usize) -> Vec<usize> {
        match self.suit {
            Suit::Heart if self.mirrored => (deck_len - self.magnitude..deck_len).collect(),
            Suit::Heart => (0..self.magnitude).collect(),
            _ => (0..deck_len).collect(),
        }
    }
}

/// Deck produced by one operation plus the XOR audit, if it XORed.
struct Outcome {
    deck: Deck,
    xor_audit: Option<String>,
}

impl Outcome {
    fn plain(deck: Deck) -> Self {
        Outcome {
            deck,
            xor_audit: None,
        }
    }
}

/// Applies and inverts single key tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepEngine {
    mirror: MirrorPolicy,
}

impl StepEngine {
    /// Creates an engine with the given Queen mirror policy.
    pub fn new(mirror: MirrorPolicy) -> Self {
        StepEngine { mirror }
    }

    /// Returns the engine's mirror policy.
    pub fn mirror_policy(&self) -> MirrorPolicy {
        self.mirror
    }

    /// Applies `token` (1-based `position` in the key) to `deck`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatedeck::key::{KeyToken, Suit};
    /// use fatedeck::{Deck, StepEngine};
    ///
    /// let engine = StepEngine::default();
    /// let token = KeyToken::new(Suit::Spade, 2);
    /// let record = engine.apply_step(&Deck::from_text("ABCD"), &token, 1);
    /// assert_eq!(record.deck.render(), "CDAB");
    ///
    /// let undone = engine.invert_step(&record, &token, 1);
    /// assert_eq!(undone.deck.render(), "ABCD");
    /// ```
    pub fn apply_step(&self, deck: &Deck, token: &KeyToken, position: usize) -> StepRecord {
        let record = match token.suit {
            Suit::Joker => self.joker_forward(deck, position),
            _ => {
                let op = Operation::from_token(token, deck.len(), self.mirror);
                let outcome = run(deck.clone(), op, Direction::Encrypt);
                StepRecord {
                    deck: outcome.deck,
                    desc: format!("{}{} {}{}", token.suit.glyph(), token.value, op.action(), mirror_note(op)),
                    affected_indexes: Some(op.affected(deck.len())),
                    xor_info: outcome.xor_audit,
                }
            }
        };
        tracing::debug!(position, suit = %token.suit, value = token.value, desc = %record.desc, "applied step");
        record
    }

    /// Undoes `token` on the deck of `record`, reproducing the deck the
    /// forward step started from.
    pub fn invert_step(&self, record: &StepRecord, token: &KeyToken, position: usize) -> StepRecord {
        let deck = &record.deck;
        let inverted = match token.suit {
            Suit::Joker => self.joker_inverse(deck, position),
            _ => {
                let op = Operation::from_token(token, deck.len(), self.mirror);
                let outcome = run(deck.clone(), op, Direction::Decrypt);
                StepRecord {
                    deck: outcome.deck,
                    desc: format!("undo {}{} {}{}", token.suit.glyph(), token.value, op.action(), mirror_note(op)),
                    affected_indexes: Some(op.affected(deck.len())),
                    xor_info: outcome.xor_audit,
                }
            }
        };
        tracing::debug!(position, suit = %token.suit, value = token.value, desc = %inverted.desc, "inverted step");
        inverted
    }

    fn joker_forward(&self, deck: &Deck, position: usize) -> StepRecord {
        let len = deck.len();
        if len == 0 {
            return StepRecord::unchanged(deck.clone(), "JOKER on empty deck: no-op");
        }

        let mirrored = transforms::mirror(deck.clone());
        let n = joker_magnitude(&mirrored);
        let driver = Suit::driver_for(position);
        let inner = run(mirrored.clone(), Operation::synthesized(driver, n), Direction::Encrypt);
        let seed = joker_seed(&mirrored);
        let xored = transforms::xor_with_n(inner.deck, seed);
        tracing::trace!(position, %driver, n, seed, "joker derivation");

        StepRecord {
            deck: xored.deck,
            desc: format!(
                "JOKER: mirrored -> applied {} with N={} then XOR seed {}",
                driver, n, seed
            ),
            affected_indexes: Some((0..len).collect()),
            xor_info: Some(format!("{}\nJoker XOR seed applied: {}", xored.audit, seed)),
        }
    }

    fn joker_inverse(&self, deck: &Deck, position: usize) -> StepRecord {
        let len = deck.len();
        if len == 0 {
            return StepRecord::unchanged(deck.clone(), "undo JOKER on empty deck: no-op");
        }

        // The pair-XOR checksum survives permutation and a constant XOR, so N
        // reads the same on the output as on the mirrored input.
        let n = joker_magnitude(deck);
        let driver = Suit::driver_for(position);
        let op = Operation::synthesized(driver, n);

        // Every driver inverse commutes with a constant XOR: undoing the
        // driver first leaves mirrored ^ seed, whose first/last XOR is intact.
        let probe = run(deck.clone(), op, Direction::Decrypt).deck;
        let seed = joker_seed(&probe);

        let unxored = transforms::xor_with_n(deck.clone(), seed);
        let inner = run(unxored.deck, op, Direction::Decrypt);
        let restored = transforms::mirror(inner.deck);
        tracing::trace!(position, %driver, n, seed, "joker inverse derivation");

        StepRecord {
            deck: restored,
            desc: format!(
                "undo JOKER: removed XOR seed {}, undid {} with N={}, un-mirrored",
                seed, driver, n
            ),
            affected_indexes: Some((0..len).collect()),
            xor_info: Some(format!("{}\nJoker XOR seed removed: {}", unxored.audit, seed)),
        }
    }
}

fn mirror_note(op: Operation) -> &'static str {
    if op.mirrored {
        " (mirrored)"
    } else {
        ""
    }
}

/// Runs `op`, wrapping it in mirror/unmirror when the operation asks for it.
fn run(deck: Deck, op: Operation, direction: Direction) -> Outcome {
    if op.mirrored {
        return with_mirror(deck, |d| run_primitive(d, op, direction));
    }
    run_primitive(deck, op, direction)
}

/// Mirror modifier: reverse, apply, reverse back.
fn with_mirror(deck: Deck, action: impl FnOnce(Deck) -> Outcome) -> Outcome {
    let inner = action(transforms::mirror(deck));
    Outcome {
        deck: transforms::mirror(inner.deck),
        xor_audit: inner.xor_audit,
    }
}

fn run_primitive(deck: Deck, op: Operation, direction: Direction) -> Outcome {
    let n = op.magnitude;
    match (op.suit, direction) {
        (Suit::Spade, Direction::Encrypt) => Outcome::plain(transforms::cut(deck, n)),
        (Suit::Spade, Direction::Decrypt) => Outcome::plain(transforms::rotate_right(deck, n)),
        (Suit::Heart, _) => Outcome::plain(transforms::reverse_top(deck, n)),
        (Suit::Club, Direction::Encrypt) => Outcome::plain(transforms::faro(deck, n)),
        (Suit::Club, Direction::Decrypt) => Outcome::plain(transforms::unfaro(deck, n)),
        (Suit::Diamond, Direction::Encrypt) => {
            let xored = transforms::xor_with_n(transforms::rotate_left(deck, n), n as u32);
            Outcome {
                deck: xored.deck,
                xor_audit: Some(xored.audit),
            }
        }
        (Suit::Diamond, Direction::Decrypt) => {
            let xored = transforms::xor_with_n(deck, n as u32);
            Outcome {
                deck: transforms::rotate_right(xored.deck, n),
                xor_audit: Some(xored.audit),
            }
        }
        // no primitive behind a bare JOKER
        (Suit::Joker, _) => Outcome::plain(deck),
    }
}

/// Sum of `a ^ b` over all unordered symbol pairs, counted per bit.
///
/// For each bit, `ones * zeros` pairs differ there. The value does not change
/// when the deck is permuted or every code is XORed with the same constant.
fn pair_xor_checksum(deck: &Deck) -> u128 {
    let len = deck.len() as u128;
    (0..u32::BITS)
        .map(|bit| {
            let ones = deck
                .symbols()
                .iter()
                .filter(|s| (s.code() >> bit) & 1 == 1)
                .count() as u128;
            (ones * (len - ones)) << bit
        })
        .sum()
}

/// JOKER driver magnitude `N = checksum mod len`. Zero for an empty deck.
fn joker_magnitude(deck: &Deck) -> usize {
    match deck.len() {
        0 => 0,
        len => (pair_xor_checksum(deck) % len as u128) as usize,
    }
}

/// JOKER XOR seed from the first and last symbols.
fn joker_seed(deck: &Deck) -> u32 {
    match (deck.first(), deck.last()) {
        (Some(first), Some(last)) => (first.code() ^ last.code()) % JOKER_SEED_MODULUS,
        _ => 0,
    }
}
