//! Service context bundling the random source behind the generator.

use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::adapters::live::{SeededSource, ThreadRngSource};
use crate::adapters::recording::RecordingRandomSource;
use crate::adapters::replaying::ReplayingRandomSource;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::GeneratorSettings;
use crate::ports::RandomSource;
use crate::uuidgen::PolytopeUuid;

/// Owns the random source and, while recording, the cassette recorder.
///
/// Constructors wire up different adapter implementations (live, seeded,
/// recording, replaying).
pub struct ServiceContext {
    /// Random source handed to every generator built from this context.
    pub rng: Arc<dyn RandomSource>,
    /// Cassette recorder; written to disk on `finish` or drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a live context drawing from the thread RNG.
    #[must_use]
    pub fn live() -> Self {
        Self { rng: Arc::new(ThreadRngSource), recorder: None }
    }

    /// Creates a deterministic context from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self { rng: Arc::new(SeededSource::new(seed)), recorder: None }
    }

    /// Live or seeded context, depending on `seed`.
    #[must_use]
    pub fn from_seed(seed: Option<u64>) -> Self {
        Self { rng: source_for(seed), recorder: None }
    }

    /// Creates a context that records every draw to a cassette at `path`.
    ///
    /// Draws come from the seeded source when `seed` is set, otherwise from
    /// the thread RNG. The cassette is written by [`finish`](Self::finish) or
    /// when the context is dropped.
    #[must_use]
    pub fn recording(path: &Path, settings: &GeneratorSettings) -> Self {
        let inner = source_for(settings.seed);
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            "polytope-session",
            settings.label(),
        )));
        Self {
            rng: Arc::new(RecordingRandomSource::new(inner, Arc::clone(&recorder))),
            recorder: Some(recorder),
        }
    }

    /// Creates a context serving draws from a recorded cassette.
    ///
    /// The cassette must have been recorded with the same alphabet and length
    /// as `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed, or if
    /// it was recorded with different settings.
    pub fn replaying(path: &Path, settings: &GeneratorSettings) -> Result<Self, String> {
        let cassette = crate::cassette::load(path)?;
        let expected = settings.label();
        if cassette.settings != expected {
            return Err(format!(
                "Cassette {} was recorded for {}, not {expected}",
                path.display(),
                cassette.settings
            ));
        }
        info!(path = %path.display(), settings = %cassette.settings, "replaying cassette");
        Ok(Self {
            rng: Arc::new(ReplayingRandomSource::new(CassetteReplayer::new(&cassette))),
            recorder: None,
        })
    }

    /// Builds a generator from `settings` on this context's random source.
    ///
    /// # Errors
    ///
    /// Returns an error if the alphabet or length is rejected.
    pub fn generator(&self, settings: &GeneratorSettings) -> Result<PolytopeUuid, String> {
        PolytopeUuid::new(&settings.alphabet, settings.length, Arc::clone(&self.rng))
            .map_err(|e| e.to_string())
    }

    /// Writes the cassette if this context is recording.
    ///
    /// Returns the cassette path, or `None` for non-recording contexts.
    ///
    /// # Errors
    ///
    /// Returns an error if a generator built from this context is still alive
    /// or the cassette cannot be written.
    pub fn finish(mut self) -> Result<Option<std::path::PathBuf>, String> {
        let Some(recorder) = self.recorder.take() else {
            return Ok(None);
        };
        // Release the recording adapter's handle on the recorder.
        self.rng = Arc::new(ThreadRngSource);
        let recorder = Arc::try_unwrap(recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        let path = recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))?;
        Ok(Some(path))
    }
}

fn source_for(seed: Option<u64>) -> Arc<dyn RandomSource> {
    match seed {
        Some(seed) => Arc::new(SeededSource::new(seed)),
        None => Arc::new(ThreadRngSource),
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        let Some(recorder) = self.recorder.take() else {
            return;
        };
        self.rng = Arc::new(ThreadRngSource);
        match Arc::try_unwrap(recorder) {
            Ok(recorder) => {
                let recorder =
                    recorder.into_inner().unwrap_or_else(std::sync::PoisonError::into_inner);
                if let Err(e) = recorder.finish() {
                    warn!("failed to write cassette: {e}");
                }
            }
            Err(_) => warn!("cassette not written: recording adapter still has references"),
        }
    }
}
