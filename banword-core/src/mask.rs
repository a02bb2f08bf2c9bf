//! mask.rs - Builds the replacement text for a detected match.
//!
//! A single-character marker is repeated to the match length. A longer marker is
//! cycled to the match length and then shuffled, which gives the familiar
//! `#@$%!` style of censoring without revealing the original length twice.
//!
//! License: MIT OR APACHE 2.0

use rand::seq::SliceRandom;

/// The marker used when none is configured.
pub const DEFAULT_MARKER: &str = "*";

/// Source of the pseudo-random ordering used for multi-character markers.
pub trait MaskShuffler: Send + Sync + std::fmt::Debug {
    fn shuffle(&self, chars: &mut [char]);
}

/// Shuffles with the thread-local generator from `rand`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomShuffler;

impl MaskShuffler for RandomShuffler {
    fn shuffle(&self, chars: &mut [char]) {
        chars.shuffle(&mut rand::rng());
    }
}

/// Leaves the cycled marker in order. Useful where output must be reproducible.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoShuffle;

impl MaskShuffler for NoShuffle {
    fn shuffle(&self, _chars: &mut [char]) {}
}

/// Returns a mask of exactly `len` characters drawn from `marker`.
pub fn build_mask(marker: &str, len: usize, shuffler: &dyn MaskShuffler) -> String {
    let marker_chars: Vec<char> = marker.chars().collect();
    match marker_chars.as_slice() {
        [] => DEFAULT_MARKER.repeat(len),
        [single] => std::iter::repeat(*single).take(len).collect(),
        many => {
            let mut mask: Vec<char> = many.iter().copied().cycle().take(len).collect();
            shuffler.shuffle(&mut mask);
            mask.into_iter().collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_char_marker_repeats() {
        assert_eq!(build_mask("*", 7, &RandomShuffler), "*******");
        assert_eq!(build_mask("█", 3, &RandomShuffler), "███");
    }

    #[test]
    fn test_multi_char_marker_cycles_to_length() {
        assert_eq!(build_mask("#@$", 7, &NoShuffle), "#@$#@$#");
        assert_eq!(build_mask("#@$", 2, &NoShuffle), "#@");
    }

    #[test]
    fn test_random_mask_keeps_length_and_alphabet() {
        let mask = build_mask("!@#$%", 12, &RandomShuffler);
        assert_eq!(mask.chars().count(), 12);
        assert!(mask.chars().all(|c| "!@#$%".contains(c)));
    }

    #[test]
    fn test_zero_length() {
        assert_eq!(build_mask("#@$", 0, &RandomShuffler), "");
    }
}
