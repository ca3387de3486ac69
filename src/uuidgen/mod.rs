//! Short random identifiers over a configurable alphabet.
//!
//! [`PolytopeUuid`] produces fixed-length strings whose characters are drawn
//! uniformly from an [`Alphabet`]. Bulk requests return mutually distinct
//! identifiers using one of two strategies:
//!
//! - **dense**: the identifier space is small enough to index with a `u64`
//!   ([`DENSE_SPACE_LIMIT`]). Indices are drawn without replacement and
//!   decoded, so any count up to the full space succeeds in `O(count)`.
//! - **sparse**: the space is larger. Candidates are generated and
//!   collisions discarded, which stays cheap while occupancy is low. Requests
//!   above `1 / SPARSE_OCCUPANCY_DIVISOR` of the space are refused up front.

mod alphabet;
mod sampling;

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::adapters::live::ThreadRngSource;
use crate::error::{Result, UuidError};
use crate::ports::RandomSource;

pub use alphabet::Alphabet;

/// Lowercase letters and digits without the look-alikes `l`, `1`, `o`, `0`.
///
/// With [`DEFAULT_LENGTH`] the space holds 2^40 identifiers; 150,000 random
/// ones collide with probability around 1%.
pub const DEFAULT_ALPHABET: &str = "abcdefghijkmnpqrstuvwxyz23456789";

/// Default identifier length.
pub const DEFAULT_LENGTH: usize = 8;

/// Shortest accepted alphabet.
pub const MIN_ALPHABET_LEN: usize = 2;

/// Shortest accepted identifier length.
pub const MIN_LENGTH: usize = 1;

/// Largest identifier space sampled by index.
///
/// Up to this size the dense strategy can enumerate indices in a `u64` and
/// handles any occupancy exactly. Beyond it rejection sampling is used.
pub const DENSE_SPACE_LIMIT: u64 = 1 << 32;

/// A sparse bulk request may claim at most `space / SPARSE_OCCUPANCY_DIVISOR`
/// identifiers.
///
/// Rejection sampling needs about `space / (space - taken)` draws per
/// accepted identifier. Capping occupancy at one half keeps that below two.
/// This is a runtime guard, not a mathematical limit.
pub const SPARSE_OCCUPANCY_DIVISOR: u128 = 2;

/// Strategy used for a bulk request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// Rejection sampling with a set of already produced identifiers.
    Sparse,
    /// Index sampling without replacement followed by decoding.
    Dense,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sparse => f.write_str("sparse"),
            Self::Dense => f.write_str("dense"),
        }
    }
}

/// Identifier generator.
///
/// Holds only its configuration and a random source; nothing is remembered
/// between calls.
#[derive(Clone)]
pub struct PolytopeUuid {
    alphabet: Alphabet,
    length: usize,
    rng: Arc<dyn RandomSource>,
}

impl fmt::Debug for PolytopeUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolytopeUuid")
            .field("alphabet", &self.alphabet.as_str())
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

fn validate_length(length: usize) -> Result<usize> {
    if length < MIN_LENGTH {
        return Err(UuidError::InvalidConfiguration(format!(
            "length must be at least {MIN_LENGTH}, got {length}"
        )));
    }
    Ok(length)
}

impl PolytopeUuid {
    /// Creates a generator drawing from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidConfiguration`] if the alphabet or length
    /// is rejected.
    pub fn new(alphabet: &str, length: usize, rng: Arc<dyn RandomSource>) -> Result<Self> {
        Ok(Self { alphabet: Alphabet::new(alphabet)?, length: validate_length(length)?, rng })
    }

    /// Creates a generator with [`DEFAULT_ALPHABET`] and [`DEFAULT_LENGTH`].
    #[must_use]
    pub fn with_defaults(rng: Arc<dyn RandomSource>) -> Self {
        Self { alphabet: Alphabet::default(), length: DEFAULT_LENGTH, rng }
    }

    /// The alphabet identifiers are drawn from.
    #[must_use]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Number of characters per identifier.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Replaces the alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidConfiguration`] and keeps the current
    /// alphabet if `alphabet` is rejected.
    pub fn set_alphabet(&mut self, alphabet: &str) -> Result<()> {
        self.alphabet = Alphabet::new(alphabet)?;
        Ok(())
    }

    /// Replaces the length.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidConfiguration`] and keeps the current
    /// length if `length` is zero.
    pub fn set_length(&mut self, length: usize) -> Result<()> {
        self.length = validate_length(length)?;
        Ok(())
    }

    /// Size of the identifier space, `|alphabet| ^ length`.
    ///
    /// `None` when the size does not fit in a `u128`.
    #[must_use]
    pub fn total_space(&self) -> Option<u128> {
        let exponent = u32::try_from(self.length).ok()?;
        (self.alphabet.len() as u128).checked_pow(exponent)
    }

    /// Strategy that [`generate_distinct`](Self::generate_distinct) uses for
    /// the current configuration.
    #[must_use]
    pub fn regime(&self) -> Regime {
        match self.dense_space() {
            Some(_) => Regime::Dense,
            None => Regime::Sparse,
        }
    }

    fn dense_space(&self) -> Option<u64> {
        self.total_space()
            .and_then(|total| u64::try_from(total).ok())
            .filter(|total| *total <= DENSE_SPACE_LIMIT)
    }

    /// Generates one identifier.
    ///
    /// Each character is drawn independently, so two calls may return the
    /// same identifier.
    #[must_use]
    pub fn generate_one(&self) -> String {
        let radix = self.alphabet.len() as u64;
        (0..self.length)
            .map(|_| {
                #[allow(clippy::cast_possible_truncation)]
                let digit = self.rng.below(radix) as usize;
                self.alphabet.char_at(digit)
            })
            .collect()
    }

    /// Generates `count` pairwise-distinct identifiers in unspecified order.
    ///
    /// A `count` of zero yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::SpaceExhausted`] if `count` exceeds the identifier
    /// space (dense regime) or its share allowed by
    /// [`SPARSE_OCCUPANCY_DIVISOR`] (sparse regime). Nothing is generated in that case.
    pub fn generate_distinct(&self, count: usize) -> Result<Vec<String>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        if count == 1 {
            return Ok(vec![self.generate_one()]);
        }

        let requested = count as u128;
        if let Some(limit) = self.bulk_limit() {
            if requested > limit {
                debug!(requested, limit, regime = %self.regime(), "bulk request refused");
                let reason = match self.regime() {
                    Regime::Dense => format!("identifier space holds only {limit}"),
                    Regime::Sparse => format!(
                        "sparse requests are capped at {limit}, \
                         1/{SPARSE_OCCUPANCY_DIVISOR} of the identifier space"
                    ),
                };
                return Err(UuidError::SpaceExhausted { requested, reason });
            }
        }

        if let Some(total) = self.dense_space() {
            debug!(count, total, regime = %Regime::Dense, "bulk generation");
            Ok(sampling::by_index(self, total, count))
        } else {
            debug!(count, regime = %Regime::Sparse, "bulk generation");
            Ok(sampling::by_rejection(self, count))
        }
    }

    /// Largest count [`generate_distinct`](Self::generate_distinct) accepts.
    ///
    /// The whole space in the dense regime, `total / SPARSE_OCCUPANCY_DIVISOR`
    /// in the sparse regime, and `None` when the space overflows a `u128`.
    #[must_use]
    pub fn bulk_limit(&self) -> Option<u128> {
        let total = self.total_space()?;
        if self.dense_space().is_some() {
            return Some(total);
        }
        Some(total / SPARSE_OCCUPANCY_DIVISOR)
    }

    /// Signed entry point for [`generate_distinct`](Self::generate_distinct).
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidArgument`] for a negative `count`, plus
    /// every error of [`generate_distinct`](Self::generate_distinct).
    pub fn generate_distinct_signed(&self, count: i64) -> Result<Vec<String>> {
        let count = usize::try_from(count).map_err(|_| {
            UuidError::InvalidArgument(format!("count must be non-negative, got {count}"))
        })?;
        self.generate_distinct(count)
    }

    /// Maps `index` to its identifier.
    ///
    /// Characters are the base-`|alphabet|` digits of `index`, least
    /// significant first. Over `0..total_space()` this is a bijection onto
    /// all identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidArgument`] if `index` is outside the space.
    pub fn decode_index(&self, index: u128) -> Result<String> {
        if self.total_space().is_some_and(|total| index >= total) {
            return Err(UuidError::InvalidArgument(format!(
                "index {index} is outside the identifier space"
            )));
        }
        Ok(self.decode_unchecked(index))
    }

    fn decode_unchecked(&self, mut index: u128) -> String {
        let radix = self.alphabet.len() as u128;
        (0..self.length)
            .map(|_| {
                #[allow(clippy::cast_possible_truncation)]
                let digit = (index % radix) as usize;
                index /= radix;
                self.alphabet.char_at(digit)
            })
            .collect()
    }
}

/// Generates one identifier with a throwaway generator on the thread RNG.
///
/// # Errors
///
/// Returns [`UuidError::InvalidConfiguration`] if the settings are rejected.
pub fn uuid(alphabet: &str, length: usize) -> Result<String> {
    Ok(PolytopeUuid::new(alphabet, length, Arc::new(ThreadRngSource))?.generate_one())
}

/// Generates `count` distinct identifiers with a throwaway generator on the
/// thread RNG.
///
/// # Errors
///
/// Returns every error of [`PolytopeUuid::new`] and
/// [`PolytopeUuid::generate_distinct`].
pub fn uuid_bulk(count: usize, alphabet: &str, length: usize) -> Result<Vec<String>> {
    PolytopeUuid::new(alphabet, length, Arc::new(ThreadRngSource))?.generate_distinct(count)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::adapters::live::SeededSource;

    fn seeded(alphabet: &str, length: usize) -> PolytopeUuid {
        PolytopeUuid::new(alphabet, length, Arc::new(SeededSource::new(2024))).unwrap()
    }

    fn assert_shape(gen: &PolytopeUuid, id: &str) {
        assert_eq!(id.chars().count(), gen.length());
        assert!(id.chars().all(|c| gen.alphabet().contains(c)), "{id} has foreign characters");
    }

    #[test]
    fn defaults() {
        let gen = PolytopeUuid::with_defaults(Arc::new(ThreadRngSource));
        assert_eq!(gen.alphabet().len(), 32);
        assert_eq!(gen.length(), 8);
        assert_eq!(gen.total_space(), Some(1 << 40));
        assert_eq!(gen.regime(), Regime::Sparse);
    }

    #[test]
    fn digits_of_length_twelve() {
        let gen = seeded("0123456789", 12);
        for _ in 0..300 {
            let id = gen.generate_one();
            assert_eq!(id.len(), 12);
            assert!(id.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn long_identifiers_keep_shape() {
        let gen = seeded(DEFAULT_ALPHABET, 300);
        assert_eq!(gen.total_space(), None);
        for _ in 0..300 {
            assert_shape(&gen, &gen.generate_one());
        }
    }

    #[test]
    fn construction_errors() {
        let rng: Arc<dyn RandomSource> = Arc::new(ThreadRngSource);
        for alphabet in ["", "aaabbbcccdddeee", "x"] {
            assert!(matches!(
                PolytopeUuid::new(alphabet, 5, Arc::clone(&rng)),
                Err(UuidError::InvalidConfiguration(_))
            ));
        }
        assert!(matches!(
            PolytopeUuid::new("abcd", 0, rng),
            Err(UuidError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn failed_setters_leave_generator_unchanged() {
        let mut gen = seeded("abcde", 15);
        assert!(gen.set_alphabet("abca").is_err());
        assert!(gen.set_length(0).is_err());
        assert_eq!(gen.alphabet().as_str(), "abcde");
        assert_eq!(gen.length(), 15);

        gen.set_length(5).unwrap();
        gen.set_alphabet("xyz").unwrap();
        let id = gen.generate_one();
        assert_eq!(id.len(), 5);
        assert_shape(&gen, &id);
    }

    #[test]
    fn full_small_space() {
        let gen = seeded("abc", 2);
        assert_eq!(gen.total_space(), Some(9));
        assert_eq!(gen.regime(), Regime::Dense);

        let ids: HashSet<String> = gen.generate_distinct(9).unwrap().into_iter().collect();
        let expected: HashSet<String> = ["aa", "ab", "ac", "ba", "bb", "bc", "ca", "cb", "cc"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(ids, expected);

        assert!(matches!(
            gen.generate_distinct(10),
            Err(UuidError::SpaceExhausted { requested: 10, .. })
        ));
    }

    #[test]
    fn zero_and_one() {
        let gen = seeded("abc", 2);
        assert!(gen.generate_distinct(0).unwrap().is_empty());
        let one = gen.generate_distinct(1).unwrap();
        assert_eq!(one.len(), 1);
        assert_shape(&gen, &one[0]);
    }

    #[test]
    fn negative_count_is_invalid_argument() {
        let gen = seeded("abc", 2);
        assert!(matches!(gen.generate_distinct_signed(-1), Err(UuidError::InvalidArgument(_))));
        assert_eq!(gen.generate_distinct_signed(4).unwrap().len(), 4);
    }

    #[test]
    fn dense_handles_full_occupancy_of_larger_space() {
        let gen = seeded("0123456789", 5);
        let ids = gen.generate_distinct(100_000).unwrap();
        let unique: HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), 100_000);
    }

    #[test]
    fn sparse_bulk_is_distinct_and_shaped() {
        let gen = seeded(DEFAULT_ALPHABET, 300);
        assert_eq!(gen.regime(), Regime::Sparse);
        let ids = gen.generate_distinct(3000).unwrap();
        assert_eq!(ids.len(), 3000);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 3000);
        for id in &ids {
            assert_shape(&gen, id);
        }
    }

    #[test]
    fn sparse_guard_rejects_over_half_the_space() {
        // 2^33 > DENSE_SPACE_LIMIT, so this space is sparse.
        let gen = seeded("01", 33);
        assert_eq!(gen.regime(), Regime::Sparse);
        let half = 1_usize << 32;
        assert_eq!(gen.bulk_limit(), Some(half as u128));
        assert!(matches!(
            gen.generate_distinct(half + 1),
            Err(UuidError::SpaceExhausted { .. })
        ));
    }

    #[test]
    fn sparse_limit_is_exact_beyond_f64_precision() {
        // 3^35 is above 2^53, where a float halving would round.
        let gen = seeded("abc", 35);
        assert_eq!(gen.regime(), Regime::Sparse);
        assert_eq!(gen.total_space(), Some(50_031_545_098_999_707));
        assert_eq!(gen.bulk_limit(), Some(25_015_772_549_499_853));
    }

    #[test]
    fn shared_generator_across_threads() {
        let sources: [Arc<dyn RandomSource>; 2] =
            [Arc::new(ThreadRngSource), Arc::new(SeededSource::new(7))];
        for rng in sources {
            let gen = Arc::new(PolytopeUuid::new("0123456789", 6, rng).unwrap());
            let workers: Vec<_> = (0..8)
                .map(|_| {
                    let gen = Arc::clone(&gen);
                    std::thread::spawn(move || gen.generate_distinct(1000).unwrap())
                })
                .collect();
            for worker in workers {
                let ids = worker.join().unwrap();
                assert_eq!(ids.len(), 1000);
                assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 1000);
                for id in &ids {
                    assert_shape(&gen, id);
                }
            }
        }
    }

    #[test]
    fn regime_boundary() {
        assert_eq!(seeded("01", 32).regime(), Regime::Dense);
        assert_eq!(seeded("01", 33).regime(), Regime::Sparse);
    }

    #[test]
    fn repeated_calls_differ() {
        let gen = seeded(DEFAULT_ALPHABET, DEFAULT_LENGTH);
        let first = gen.generate_distinct(50).unwrap();
        let second = gen.generate_distinct(50).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn decode_is_least_significant_first() {
        let gen = seeded("abc", 2);
        assert_eq!(gen.decode_index(0).unwrap(), "aa");
        assert_eq!(gen.decode_index(1).unwrap(), "ba");
        assert_eq!(gen.decode_index(3).unwrap(), "ab");
        assert_eq!(gen.decode_index(8).unwrap(), "cc");
        assert!(matches!(gen.decode_index(9), Err(UuidError::InvalidArgument(_))));

        let all: HashSet<String> = (0..9).map(|i| gen.decode_index(i).unwrap()).collect();
        assert_eq!(all.len(), 9);
    }

    #[test]
    fn seeded_generators_agree() {
        let a = seeded("abcdef", 4);
        let b = seeded("abcdef", 4);
        assert_eq!(a.generate_distinct(200).unwrap(), b.generate_distinct(200).unwrap());
    }

    #[test]
    fn free_helpers() {
        assert_eq!(uuid("abcde", 3).unwrap().len(), 3);
        assert!(uuid("abcd", 0).is_err());

        let ids = uuid_bulk(9, "abc", 2).unwrap();
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 9);
        assert!(matches!(uuid_bulk(10, "abc", 2), Err(UuidError::SpaceExhausted { .. })));

        let ids = uuid_bulk(3000, "0123456789", 300).unwrap();
        assert_eq!(ids.len(), 3000);
    }

    #[test]
    fn thread_rng_rarely_collides() {
        let ids: HashSet<String> =
            (0..10_000).map(|_| uuid(DEFAULT_ALPHABET, 8).unwrap()).collect();
        // Birthday bound for 10k draws from 2^40 is about 5e-5.
        assert_eq!(ids.len(), 10_000);
    }
}
