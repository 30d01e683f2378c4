/// The default cap on the number of levels that [`GeometricLevels`] hands out.
///
/// With a promotion probability of `1/2`, one node per roughly half a million insertions
/// reaches this cap (on average).
///
/// [`GeometricLevels`]: crate::GeometricLevels
pub const DEFAULT_MAX_LEVEL: usize = 20;

/// The seed used by [`GeometricLevels::default`] and [`SkipList::default`].
///
/// [`GeometricLevels::default`]: crate::GeometricLevels
/// [`SkipList::default`]: crate::SkipList
pub const DEFAULT_LEVEL_SEED: u64 = 0x_5EED_1E7E_15;
