//! Random source port used by the identifier generator.

/// Supplies uniformly distributed integers.
///
/// Abstracting the entropy source allows deterministic replay by substituting
/// a seeded or recorded sequence during tests and cassette playback.
pub trait RandomSource: Send + Sync {
    /// Returns a value drawn uniformly from `0..bound`.
    ///
    /// Callers never pass a `bound` of zero.
    fn below(&self, bound: u64) -> u64;
}
