//! Port traits defining external boundaries.
//!
//! The generator reaches outside itself only to draw entropy. Implementations
//! live in `src/adapters/`.

pub mod random;

pub use random::RandomSource;
