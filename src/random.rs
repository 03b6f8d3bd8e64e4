//! Injected randomness.
//!
//! The state machine never touches a global RNG. Everything random (theme
//! draws, impostor selection, reveal order) goes through [`RandomSource`],
//! which yields floats in `[0, 1)`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform floats in `[0, 1)`
pub trait RandomSource: Send {
    fn next_f64(&mut self) -> f64;
}

/// `rand`-backed source used by the real app
pub struct RngSource {
    rng: StdRng,
}

impl RngSource {
    /// Seed from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence, used for tests and `IMPOSTOR_SEED`
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for RngSource {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Map a float in `[0, 1)` onto `0..len`.
///
/// Out-of-range floats from a misbehaving source are clamped rather than
/// indexing past the end.
pub fn index(random: &mut dyn RandomSource, len: usize) -> usize {
    debug_assert!(len > 0);
    let r = random.next_f64();
    if r.is_nan() || r <= 0.0 {
        return 0;
    }
    ((r * len as f64) as usize).min(len - 1)
}

/// Uniform pick from a slice, None when empty
pub fn pick<'a, T>(random: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(index(random, items.len()))
}

/// In-place Fisher-Yates shuffle
pub fn shuffle<T>(random: &mut dyn RandomSource, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = index(random, i + 1);
        items.swap(i, j);
    }
}

/// A uniformly random permutation of `0..len`
pub fn permutation(random: &mut dyn RandomSource, len: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    shuffle(random, &mut indices);
    indices
}

/// Replays a fixed list of floats, cycling when exhausted
#[cfg(test)]
pub(crate) struct SequenceSource {
    values: Vec<f64>,
    pos: usize,
}

#[cfg(test)]
impl SequenceSource {
    pub(crate) fn new(values: Vec<f64>) -> Self {
        Self { values, pos: 0 }
    }
}

#[cfg(test)]
impl RandomSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_clamps_out_of_range_values() {
        let mut source = SequenceSource::new(vec![1.0, 7.5, -0.3, f64::NAN]);
        assert_eq!(index(&mut source, 4), 3);
        assert_eq!(index(&mut source, 4), 3);
        assert_eq!(index(&mut source, 4), 0);
        assert_eq!(index(&mut source, 4), 0);
    }

    #[test]
    fn test_pick_empty_slice() {
        let mut source = SequenceSource::new(vec![0.5]);
        let empty: [u8; 0] = [];
        assert!(pick(&mut source, &empty).is_none());
    }

    #[test]
    fn test_pick_uses_source() {
        let mut source = SequenceSource::new(vec![0.0, 0.99, 0.5]);
        let items = ["a", "b", "c"];
        assert_eq!(pick(&mut source, &items), Some(&"a"));
        assert_eq!(pick(&mut source, &items), Some(&"c"));
        assert_eq!(pick(&mut source, &items), Some(&"b"));
    }

    #[test]
    fn test_permutation_is_complete() {
        let mut source = RngSource::seeded(7);
        for len in 0..12 {
            let mut perm = permutation(&mut source, len);
            perm.sort_unstable();
            assert_eq!(perm, (0..len).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_shuffle_with_zero_source_rotates() {
        // j is always 0: every element is swapped towards the front once
        let mut source = SequenceSource::new(vec![0.0]);
        let mut items = vec![1, 2, 3, 4];
        shuffle(&mut source, &mut items);
        assert_eq!(items, vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_seeded_sources_agree() {
        let mut a = RngSource::seeded(42);
        let mut b = RngSource::seeded(42);
        for _ in 0..16 {
            let x = a.next_f64();
            assert_eq!(x, b.next_f64());
            assert!((0.0..1.0).contains(&x));
        }
    }
}
