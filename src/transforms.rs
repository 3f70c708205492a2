//! Primitive deck transforms.
//!
//! Every function consumes a deck and returns a new one of exactly the same
//! length. Each forward primitive has an exact inverse:
//!
//! ```text
//! cut(n)          <-> rotate_right(n)
//! reverse_top(n)  <-> reverse_top(n)
//! faro(n)         <-> unfaro(n)
//! rotate_left(n)  <-> rotate_right(n)
//! xor_with_n(n)   <-> xor_with_n(n)
//! mirror          <-> mirror
//! ```

use crate::deck::{Deck, Symbol};

/// Result of [`xor_with_n`]: the new deck plus its per-symbol audit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorOutcome {
    pub deck: Deck,
    /// One line per position, newline-joined.
    pub audit: String,
}

/// Moves the first `n` symbols to the end. `n >= len` leaves the deck as is.
pub fn cut(deck: Deck, n: usize) -> Deck {
    let mut symbols = deck.into_symbols();
    let n = n.min(symbols.len());
    symbols.rotate_left(n);
    Deck::from(symbols)
}

/// Reverses the first `n` symbols, leaving the rest untouched.
pub fn reverse_top(deck: Deck, n: usize) -> Deck {
    let mut symbols = deck.into_symbols();
    let n = n.min(symbols.len());
    symbols[..n].reverse();
    Deck::from(symbols)
}

/// Reverses the whole deck.
pub fn mirror(deck: Deck) -> Deck {
    let mut symbols = deck.into_symbols();
    symbols.reverse();
    Deck::from(symbols)
}

/// Cyclic shift towards the front by `n mod len`.
pub fn rotate_left(deck: Deck, n: usize) -> Deck {
    let mut symbols = deck.into_symbols();
    if symbols.is_empty() {
        return Deck::from(symbols);
    }
    let n = n % symbols.len();
    symbols.rotate_left(n);
    Deck::from(symbols)
}

/// Cyclic shift towards the back by `n mod len`.
pub fn rotate_right(deck: Deck, n: usize) -> Deck {
    let mut symbols = deck.into_symbols();
    if symbols.is_empty() {
        return Deck::from(symbols);
    }
    let n = n % symbols.len();
    symbols.rotate_right(n);
    Deck::from(symbols)
}

/// Source index of every output position of `faro(n)` on a deck of `len`.
///
/// The deck splits into `left = [0, half)` and `right = [half, len)` with
/// `half = len / 2`. The first `min(n, half)` left symbols go out as they
/// are; the rest alternate right, left until both halves are drained.
fn faro_order(len: usize, n: usize) -> Vec<usize> {
    let half = len / 2;
    let lead = n.min(half);

    let mut order = Vec::with_capacity(len);
    order.extend(0..lead);

    let mut left = lead;
    let mut right = half;
    while left < half || right < len {
        if right < len {
            order.push(right);
            right += 1;
        }
        if left < half {
            order.push(left);
            left += 1;
        }
    }
    order
}

/// Offset split-and-interleave shuffle.
///
/// ```
/// use fatedeck::transforms::faro;
/// use fatedeck::Deck;
///
/// assert_eq!(faro(Deck::from_text("ABCDEF"), 0).render(), "DAEBFC");
/// assert_eq!(faro(Deck::from_text("ABCDEF"), 1).render(), "ADBECF");
/// ```
pub fn faro(deck: Deck, n: usize) -> Deck {
    let symbols = deck.into_symbols();
    faro_order(symbols.len(), n)
        .into_iter()
        .map(|src| symbols[src])
        .collect()
}

/// Exact inverse of [`faro`] with the same `n`.
pub fn unfaro(deck: Deck, n: usize) -> Deck {
    let shuffled = deck.into_symbols();
    let mut symbols = shuffled.clone();
    for (dst, src) in faro_order(shuffled.len(), n).into_iter().enumerate() {
        symbols[src] = shuffled[dst];
    }
    Deck::from(symbols)
}

/// XORs every symbol code with `n`, logging each substitution as
/// `<symbol> (<code>) XOR <n> = <result> -> '<resultSymbol>'`.
///
/// Both symbol columns are written with [`char::escape_debug`], so control
/// characters such as `\n` never split a position across lines.
///
/// ```
/// use fatedeck::transforms::xor_with_n;
/// use fatedeck::Deck;
///
/// let out = xor_with_n(Deck::from_text("A"), 1);
/// assert_eq!(out.deck.render(), "@");
/// assert_eq!(out.audit, "A (65) XOR 1 = 64 -> '@'");
/// ```
pub fn xor_with_n(deck: Deck, n: u32) -> XorOutcome {
    let symbols = deck.into_symbols();
    let mut out: Vec<Symbol> = Vec::with_capacity(symbols.len());
    let mut lines: Vec<String> = Vec::with_capacity(symbols.len());

    for symbol in symbols {
        let result = symbol.xor(n);
        lines.push(format!(
            "{} ({}) XOR {} = {} -> '{}'",
            symbol.to_char().escape_debug(),
            symbol.code(),
            n,
            result.code(),
            result.to_char().escape_debug()
        ));
        out.push(result);
    }

    XorOutcome {
        deck: Deck::from(out),
        audit: lines.join("\n"),
    }
}
