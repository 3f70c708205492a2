//! Property tests: bijectivity of every primitive, step symmetry, length
//! invariance, full-key round trips and trace determinism.

use fatedeck::face::MirrorPolicy;
use fatedeck::key::{KeyToken, Suit};
use fatedeck::transforms;
use fatedeck::{Deck, Direction, StepEngine, Symbol, TraceBuilder};
use proptest::prelude::*;

/// Printable ASCII decks, empty included.
fn arb_deck() -> impl Strategy<Value = Deck> {
    prop::collection::vec(0x20u32..0x7f, 0..40)
        .prop_map(|codes| codes.into_iter().map(Symbol::from_code).collect())
}

/// Decks of arbitrary chars, to exercise large codes under XOR.
fn arb_wide_deck() -> impl Strategy<Value = Deck> {
    prop::collection::vec(any::<char>(), 1..24)
        .prop_map(|chars| chars.into_iter().map(Symbol::from).collect())
}

fn arb_suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Spade),
        Just(Suit::Heart),
        Just(Suit::Club),
        Just(Suit::Diamond),
        Just(Suit::Joker),
    ]
}

/// Keys of up to 12 tokens; JOKER values follow the parser's position rule.
fn arb_key() -> impl Strategy<Value = Vec<KeyToken>> {
    prop::collection::vec((arb_suit(), 0u32..=20), 0..12).prop_map(|cards| {
        cards
            .into_iter()
            .enumerate()
            .map(|(i, (suit, value))| match suit {
                Suit::Joker => KeyToken::new(Suit::Joker, (i + 1) as u32),
                suit => KeyToken::new(suit, value),
            })
            .collect()
    })
}

fn arb_policy() -> impl Strategy<Value = MirrorPolicy> {
    prop_oneof![Just(MirrorPolicy::Never), Just(MirrorPolicy::Queens)]
}

proptest! {
    /// rotate_right undoes rotate_left for any n.
    #[test]
    fn rotate_bijective(d in arb_deck(), n in 0usize..100) {
        let rotated = transforms::rotate_left(d.clone(), n);
        prop_assert_eq!(rotated.len(), d.len());
        prop_assert_eq!(transforms::rotate_right(rotated, n), d);
    }

    /// rotate_right undoes cut for any n.
    #[test]
    fn cut_bijective(d in arb_deck(), n in 0usize..100) {
        let cut = transforms::cut(d.clone(), n);
        prop_assert_eq!(cut.len(), d.len());
        prop_assert_eq!(transforms::rotate_right(cut, n.min(d.len())), d);
    }

    /// reverse_top is its own inverse.
    #[test]
    fn reverse_top_involution(d in arb_deck(), n in 0usize..60) {
        let once = transforms::reverse_top(d.clone(), n);
        prop_assert_eq!(once.len(), d.len());
        prop_assert_eq!(transforms::reverse_top(once, n), d);
    }

    /// unfaro undoes faro for every offset, including offsets past half.
    #[test]
    fn faro_bijective(d in arb_deck(), n in 0usize..60) {
        let shuffled = transforms::faro(d.clone(), n);
        prop_assert_eq!(shuffled.len(), d.len());
        prop_assert_eq!(transforms::unfaro(shuffled, n), d);
    }

    /// faro only permutes: the sorted symbols are unchanged.
    #[test]
    fn faro_is_permutation(d in arb_deck(), n in 0usize..60) {
        let mut before = d.clone().into_symbols();
        let mut after = transforms::faro(d, n).into_symbols();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    /// xor_with_n is its own inverse and logs one line per symbol.
    #[test]
    fn xor_involution(d in arb_wide_deck(), n in any::<u32>()) {
        let once = transforms::xor_with_n(d.clone(), n);
        prop_assert_eq!(once.audit.lines().count(), d.len());
        prop_assert_eq!(transforms::xor_with_n(once.deck, n).deck, d);
    }

    /// invert_step undoes apply_step for every suit, JOKER included.
    #[test]
    fn step_symmetry(
        d in arb_deck(),
        suit in arb_suit(),
        value in 0u32..=20,
        position in 1usize..16,
        policy in arb_policy(),
    ) {
        let engine = StepEngine::new(policy);
        let token = KeyToken::new(suit, value);
        let forward = engine.apply_step(&d, &token, position);
        prop_assert_eq!(forward.deck.len(), d.len());
        let back = engine.invert_step(&forward, &token, position);
        prop_assert_eq!(back.deck, d);
    }

    /// JOKER symmetry on decks with arbitrary code points.
    #[test]
    fn joker_symmetry_wide(d in arb_wide_deck(), position in 1usize..16) {
        let engine = StepEngine::default();
        let token = KeyToken::new(Suit::Joker, position as u32);
        let forward = engine.apply_step(&d, &token, position);
        let back = engine.invert_step(&forward, &token, position);
        prop_assert_eq!(back.deck, d);
    }

    /// decrypt(encrypt(D, K), K) == D.
    #[test]
    fn full_roundtrip(d in arb_deck(), key in arb_key(), policy in arb_policy()) {
        let builder = TraceBuilder::new(StepEngine::new(policy));
        let enc = builder.build(&d, &key, Direction::Encrypt);
        let dec = builder.build(enc.output(), &key, Direction::Decrypt);
        prop_assert_eq!(dec.output(), &d);
    }

    /// Traces have one record per token plus the initial one, all same length.
    #[test]
    fn trace_shape(d in arb_deck(), key in arb_key()) {
        let trace = TraceBuilder::default().build(&d, &key, Direction::Encrypt);
        let expected = if d.is_empty() { 1 } else { key.len() + 1 };
        prop_assert_eq!(trace.len(), expected);
        prop_assert_eq!(&trace.records()[0].deck, &d);
        for record in trace.records() {
            prop_assert_eq!(record.deck.len(), d.len());
        }
    }

    /// Building twice yields deeply equal traces.
    #[test]
    fn trace_deterministic(d in arb_deck(), key in arb_key()) {
        let builder = TraceBuilder::default();
        for direction in [Direction::Encrypt, Direction::Decrypt] {
            let a = builder.build(&d, &key, direction);
            let b = builder.build(&d, &key, direction);
            prop_assert_eq!(a, b);
        }
    }
}
