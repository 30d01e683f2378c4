use oorandom::Rand32;

use crate::config_constants::{DEFAULT_LEVEL_SEED, DEFAULT_MAX_LEVEL};


/// Supplies the number of levels a newly inserted [`SkipList`] node participates in.
///
/// The returned count should be at least `1`; the skip list treats `0` as `1`.
///
/// Implemented for closures, so a deterministic sequence can be injected in tests:
///
/// ```
/// use tethered::SkipList;
///
/// let mut levels = [2, 1, 4, 2].into_iter();
/// let mut list = SkipList::new(move || levels.next().unwrap_or(1));
/// list.insert(5);
/// list.insert(7);
/// assert_eq!(list.height(), 2);
/// ```
///
/// [`SkipList`]: crate::SkipList
pub trait LevelSource {
    #[must_use]
    fn next_level_count(&mut self) -> usize;
}

impl<F: FnMut() -> usize> LevelSource for F {
    #[inline]
    fn next_level_count(&mut self) -> usize {
        self()
    }
}

/// A simple PRNG trait, used for generating random level counts.
pub trait Prng32 {
    /// Produces a random `u32` in the range `[0, u32::MAX]`.
    ///
    /// (See [`oorandom::Rand32::rand_u32`]; this function is the same interface.)
    #[must_use]
    fn rand_u32(&mut self) -> u32;
}

impl Prng32 for Rand32 {
    #[inline]
    fn rand_u32(&mut self) -> u32 {
        // Inherent impls take priority over traits, so this is the inherent method
        // of `Rand32` a.k.a. `Self`
        Self::rand_u32(self)
    }
}

/// Return a random value in `1..=max_level`, in a geometric distribution: each additional
/// level is granted with probability `1/2`.
///
/// Technically, `max_level` is twice as likely as it would be in an exact and unbounded
/// geometric distribution, since what would be higher values are capped to `max_level`.
pub(crate) fn random_level_count<P: Prng32>(prng: &mut P, max_level: usize) -> usize {
    let mut levels = 1;
    // The top bit is used as the coin, since it is the best-distributed bit of a PCG output.
    while levels < max_level && prng.rand_u32() >> 31 == 1 {
        levels += 1;
    }
    levels
}

/// A [`LevelSource`] producing geometrically distributed level counts from a seeded PRNG.
///
/// Level counts start at `1` and grow by one with probability `1/2`, up to `max_level`
/// (by default, [`DEFAULT_MAX_LEVEL`]).
#[derive(Debug, Clone)]
pub struct GeometricLevels<P = Rand32> {
    prng:      P,
    max_level: usize,
}

impl GeometricLevels {
    #[inline]
    #[must_use]
    pub fn new_seeded(seed: u64) -> Self {
        Self::from_prng(Rand32::new(seed))
    }

    /// The internal state of the PRNG, which can be used to resume the same sequence of level
    /// counts later with [`GeometricLevels::from_state`].
    #[inline]
    #[must_use]
    pub fn current_prng_state(&self) -> (u64, u64) {
        self.prng.state()
    }

    #[inline]
    #[must_use]
    pub fn from_state(prng_state: (u64, u64)) -> Self {
        Self::from_prng(Rand32::from_state(prng_state))
    }
}

impl<P: Prng32> GeometricLevels<P> {
    #[inline]
    #[must_use]
    pub const fn from_prng(prng: P) -> Self {
        Self {
            prng,
            max_level: DEFAULT_MAX_LEVEL,
        }
    }

    /// Cap the produced level counts at `max_level`. A cap of `0` is treated as `1`.
    #[inline]
    #[must_use]
    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level.max(1);
        self
    }

    #[inline]
    #[must_use]
    pub const fn max_level(&self) -> usize {
        self.max_level
    }
}

impl Default for GeometricLevels {
    #[inline]
    fn default() -> Self {
        Self::new_seeded(DEFAULT_LEVEL_SEED)
    }
}

impl<P: Prng32> LevelSource for GeometricLevels<P> {
    #[inline]
    fn next_level_count(&mut self) -> usize {
        random_level_count(&mut self.prng, self.max_level)
    }
}

/// A deterministic [`LevelSource`] which repeats a fixed list of level counts.
///
/// An empty list always produces `1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSequence {
    levels: Vec<usize>,
    next:   usize,
}

impl LevelSequence {
    #[must_use]
    pub fn new<I: IntoIterator<Item = usize>>(levels: I) -> Self {
        Self {
            levels: levels.into_iter().collect(),
            next:   0,
        }
    }

    /// The number of level counts handed out so far.
    #[inline]
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.next
    }
}

impl LevelSource for LevelSequence {
    fn next_level_count(&mut self) -> usize {
        let level = match self.levels.len() {
            0   => 1,
            len => self.levels.get(self.next % len).copied().unwrap_or(1),
        };
        self.next += 1;
        level
    }
}


#[cfg(test)]
mod tests {
    use super::*;


    struct Constant(u32);

    impl Prng32 for Constant {
        fn rand_u32(&mut self) -> u32 {
            self.0
        }
    }

    #[test]
    fn always_heads_hits_the_cap() {
        let mut levels = GeometricLevels::from_prng(Constant(u32::MAX)).with_max_level(7);
        assert_eq!(levels.next_level_count(), 7);
    }

    #[test]
    fn always_tails_gives_one() {
        let mut levels = GeometricLevels::from_prng(Constant(0));
        assert_eq!(levels.next_level_count(), 1);
    }

    #[test]
    fn zero_cap_is_clamped() {
        let mut levels = GeometricLevels::from_prng(Constant(u32::MAX)).with_max_level(0);
        assert_eq!(levels.max_level(), 1);
        assert_eq!(levels.next_level_count(), 1);
    }

    #[test]
    fn geometric_counts_stay_in_range_and_look_geometric() {
        let mut levels = GeometricLevels::new_seeded(0x_1234_5678);
        let mut ones = 0_u32;

        for _ in 0..10_000 {
            let count = levels.next_level_count();
            assert!((1..=DEFAULT_MAX_LEVEL).contains(&count));
            if count == 1 {
                ones += 1;
            }
        }

        // Expected 5000; this is a very loose bound.
        assert!((4_000..6_000).contains(&ones), "{ones} single-level nodes");
    }

    #[test]
    fn resuming_from_state_repeats_the_sequence() {
        let mut levels = GeometricLevels::new_seeded(99);
        let _ = levels.next_level_count();

        let mut resumed = GeometricLevels::from_state(levels.current_prng_state());
        let expected: Vec<_> = (0..32).map(|_| levels.next_level_count()).collect();
        let actual: Vec<_> = (0..32).map(|_| resumed.next_level_count()).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn sequence_cycles() {
        let mut levels = LevelSequence::new([2, 1, 4]);
        let drawn: Vec<_> = (0..5).map(|_| levels.next_level_count()).collect();

        assert_eq!(drawn, [2, 1, 4, 2, 1]);
        assert_eq!(levels.consumed(), 5);
        assert_eq!(LevelSequence::new([]).next_level_count(), 1);
    }

    #[test]
    fn closures_are_sources() {
        let mut counter = 0_usize;
        let mut closure = || {
            counter += 1;
            counter
        };
        assert_eq!(closure.next_level_count(), 1);
        assert_eq!(closure.next_level_count(), 2);

        // A caller can lend out a source it keeps ownership of.
        let mut owned = LevelSequence::new([3]);
        let mut lent = || owned.next_level_count();
        assert_eq!(lent.next_level_count(), 3);
        assert_eq!(owned.consumed(), 1);
    }
}
