//! Replaying adapter for the `RandomSource` port.

use std::sync::Mutex;

use crate::adapters::recording::random::{METHOD, PORT};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::RandomSource;

/// Serves recorded draws back from a cassette.
pub struct ReplayingRandomSource {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingRandomSource {
    /// Creates a new replaying source from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl RandomSource for ReplayingRandomSource {
    /// # Panics
    ///
    /// Panics when the cassette is exhausted, when the recorded bound differs
    /// from the requested one, or when the recorded value is out of range.
    fn below(&self, bound: u64) -> u64 {
        let (seq, recorded_bound, output) = {
            let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
            let interaction = replayer.next_interaction(PORT, METHOD);
            (interaction.seq, interaction.input["bound"].as_u64(), interaction.output.clone())
        };

        assert!(
            recorded_bound == Some(bound),
            "rng::below replay diverged at seq={seq}: recorded bound {recorded_bound:?}, \
             requested {bound}"
        );

        let value = output.as_u64().expect("rng::below: expected unsigned integer output");
        assert!(value < bound, "rng::below: recorded value {value} is not below {bound}");
        value
    }
}
