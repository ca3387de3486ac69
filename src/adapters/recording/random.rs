//! Recording adapter for the `RandomSource` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_interaction;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::RandomSource;

/// Port name used for random draws in cassettes.
pub const PORT: &str = "rng";
/// Method name used for random draws in cassettes.
pub const METHOD: &str = "below";

#[derive(Serialize)]
struct BelowInput {
    bound: u64,
}

/// Records every draw while delegating to an inner source.
pub struct RecordingRandomSource {
    inner: Arc<dyn RandomSource>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingRandomSource {
    /// Creates a recording source wrapping the given implementation.
    pub fn new(inner: Arc<dyn RandomSource>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl RandomSource for RecordingRandomSource {
    fn below(&self, bound: u64) -> u64 {
        let value = self.inner.below(bound);
        record_interaction(&self.recorder, PORT, METHOD, &BelowInput { bound }, &value);
        value
    }
}
