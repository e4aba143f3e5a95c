//! Partitioning of record identifiers into a sample and the rest.
//!
//! Random selection shuffles the full identifier list with a forward
//! Fisher-Yates pass driven by a `Xoshiro256PlusPlus` generator seeded from
//! the user seed (`seed_from_u64`). One draw is made per position, in forward
//! order, so a given seed always yields the same permutation.

use log::{info, warn};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// How the sample is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    /// Seeded random permutation
    Random { seed: u64 },
    /// File order
    Ordered,
}

/// Result of partitioning the identifier list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub sample: Vec<String>,
    pub rest: Vec<String>,
    /// Sample size was reduced to the number of records available
    pub clamped: bool,
}

/// Shuffle `items` in place
///
/// Position `i` is swapped with a position drawn uniformly from `i..len`.
pub fn shuffle<T, G: Rng>(items: &mut [T], rng: &mut G) {
    let len = items.len();
    for i in 0..len {
        let j = rng.gen_range(i..len);
        items.swap(i, j);
    }
}

/// Split `names` into a sample of `n` identifiers and the remainder
///
/// `n` is clamped to `names.len()` with a warning.
pub fn select(mut names: Vec<String>, n: usize, mode: SelectMode) -> Selection {
    let clamped = n > names.len();
    let n = if clamped {
        warn!(
            "Requested {} records but only {} are available; sampling {}",
            n,
            names.len(),
            names.len()
        );
        names.len()
    } else {
        n
    };

    if let SelectMode::Random { seed } = mode {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        shuffle(&mut names, &mut rng);
    }

    let rest = names.split_off(n);
    info!("Selected {} records, {} remaining", names.len(), rest.len());

    Selection {
        sample: names,
        rest,
        clamped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("seq{}", i)).collect()
    }

    #[test]
    fn test_ordered_selection() {
        let selection = select(names(5), 2, SelectMode::Ordered);
        assert_eq!(selection.sample, ["seq0", "seq1"]);
        assert_eq!(selection.rest, ["seq2", "seq3", "seq4"]);
        assert!(!selection.clamped);
    }

    #[test]
    fn test_clamping() {
        let selection = select(names(3), 10, SelectMode::Random { seed: 1 });
        assert!(selection.clamped);
        assert_eq!(selection.sample.len(), 3);
        assert!(selection.rest.is_empty());
    }

    #[test]
    fn test_seed_determinism() {
        let a = select(names(50), 10, SelectMode::Random { seed: 7 });
        let b = select(names(50), 10, SelectMode::Random { seed: 7 });
        assert_eq!(a, b);

        let c = select(names(50), 10, SelectMode::Random { seed: 8 });
        assert_ne!(a.sample, c.sample);
    }

    #[test]
    fn test_random_partition_covers_everything() {
        let selection = select(names(20), 8, SelectMode::Random { seed: 3 });
        let mut all: Vec<_> = selection
            .sample
            .iter()
            .chain(selection.rest.iter())
            .cloned()
            .collect();
        all.sort();

        let mut expected = names(20);
        expected.sort();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_shuffle_draws_one_per_position() {
        let mut items: Vec<usize> = (0..10).collect();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);
        shuffle(&mut items, &mut rng);

        let mut replay = Xoshiro256PlusPlus::seed_from_u64(11);
        let mut expected: Vec<usize> = (0..10).collect();
        for i in 0..expected.len() {
            let j = replay.gen_range(i..expected.len());
            expected.swap(i, j);
        }
        assert_eq!(items, expected);
    }

    #[test]
    fn test_empty_input() {
        let selection = select(Vec::new(), 0, SelectMode::Random { seed: 1 });
        assert!(selection.sample.is_empty());
        assert!(!selection.clamped);
    }
}
