//! Face-value handling: normalization against deck length, card labels and
//! the optional mirror wrapping for Queens.

use serde::{Deserialize, Serialize};

/// Face value of an Ace.
pub const ACE: u32 = 1;
/// Face value of a Jack.
pub const JACK: u32 = 11;
/// Face value of a Queen.
pub const QUEEN: u32 = 12;
/// Face value of a King.
pub const KING: u32 = 13;

/// Maps a token value to the magnitude actually applied to a deck of
/// `deck_len` symbols.
///
/// Kings act on the whole deck; every other value is capped at the deck
/// length, so no primitive ever slices out of range.
///
/// # Examples
///
/// ```
/// use fatedeck::face::normalize;
///
/// assert_eq!(normalize(13, 52), 52);
/// assert_eq!(normalize(11, 4), 4);
/// assert_eq!(normalize(7, 10), 7);
/// ```
pub fn normalize(value: u32, deck_len: usize) -> usize {
    if deck_len == 0 {
        return 0;
    }
    match value {
        ACE => 1,
        KING => deck_len,
        _ => (value as usize).min(deck_len),
    }
}

/// Card label for a value: `A`, `J`, `Q`, `K` or the number itself.
pub fn face_label(value: u32) -> String {
    match value {
        ACE => "A".to_string(),
        JACK => "J".to_string(),
        QUEEN => "Q".to_string(),
        KING => "K".to_string(),
        other => other.to_string(),
    }
}

/// Whether a token's operation runs on the mirrored deck.
///
/// With [`MirrorPolicy::Queens`], a token of face value 12 runs as
/// mirror, operation, mirror (in both directions).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MirrorPolicy {
    /// Never mirror.
    #[default]
    Never,
    /// Mirror around every Queen.
    Queens,
}

impl MirrorPolicy {
    /// Returns `true` if an operation with this raw value is wrapped.
    pub fn wraps(self, value: u32) -> bool {
        match self {
            MirrorPolicy::Never => false,
            MirrorPolicy::Queens => value == QUEEN,
        }
    }
}
