//! Generator settings from the environment, a YAML file, and CLI flags.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::uuidgen::{DEFAULT_ALPHABET, DEFAULT_LENGTH};

/// Environment variable holding the alphabet.
pub const ALPHABET_VAR: &str = "POLYTOPE_ALPHABET";
/// Environment variable holding the identifier length.
pub const LENGTH_VAR: &str = "POLYTOPE_LENGTH";
/// Environment variable holding a fixed seed for reproducible output.
pub const SEED_VAR: &str = "POLYTOPE_SEED";

/// Settings used to build a generator.
///
/// Values are not validated here; the generator rejects bad ones when it is
/// built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Characters identifiers are drawn from.
    pub alphabet: String,
    /// Characters per identifier.
    pub length: usize,
    /// Seed for a deterministic random source; `None` uses the thread RNG.
    pub seed: Option<u64>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self { alphabet: DEFAULT_ALPHABET.to_string(), length: DEFAULT_LENGTH, seed: None }
    }
}

impl GeneratorSettings {
    /// Defaults overlaid with `POLYTOPE_*` variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    ///
    /// # Errors
    ///
    /// Returns an error naming the variable when a length or seed does not
    /// parse.
    pub fn from_env() -> Result<Self, String> {
        // A missing .env file is fine.
        let _ = dotenvy::dotenv();
        Self::default().overlay_env(|key| env::var(key).ok())
    }

    /// Settings read from a YAML file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_yaml_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file {}: {e}", path.display()))
    }

    /// Applies values from `lookup` on top of `self`.
    ///
    /// # Errors
    ///
    /// Returns an error naming the variable when a length or seed does not
    /// parse.
    pub fn overlay_env<F>(mut self, lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(alphabet) = lookup(ALPHABET_VAR) {
            self.alphabet = alphabet;
        }
        if let Some(length) = lookup(LENGTH_VAR) {
            self.length = length
                .trim()
                .parse()
                .map_err(|e| format!("{LENGTH_VAR}={length:?} is not a valid length: {e}"))?;
        }
        if let Some(seed) = lookup(SEED_VAR) {
            self.seed = Some(
                seed.trim()
                    .parse()
                    .map_err(|e| format!("{SEED_VAR}={seed:?} is not a valid seed: {e}"))?,
            );
        }
        Ok(self)
    }

    /// Applies command-line flags, which take precedence over everything else.
    #[must_use]
    pub fn with_overrides(
        mut self,
        alphabet: Option<&str>,
        length: Option<usize>,
        seed: Option<u64>,
    ) -> Self {
        if let Some(alphabet) = alphabet {
            self.alphabet = alphabet.to_string();
        }
        if let Some(length) = length {
            self.length = length;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Short `alphabet/length` label stored in cassettes.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}/{}", self.alphabet, self.length)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn env_overlays_defaults() {
        let settings = GeneratorSettings::default()
            .overlay_env(lookup(&[(LENGTH_VAR, " 12 "), (SEED_VAR, "99")]))
            .unwrap();
        assert_eq!(settings.alphabet, DEFAULT_ALPHABET);
        assert_eq!(settings.length, 12);
        assert_eq!(settings.seed, Some(99));
    }

    #[test]
    fn unparsable_length_names_variable() {
        let err = GeneratorSettings::default()
            .overlay_env(lookup(&[(LENGTH_VAR, "eight")]))
            .unwrap_err();
        assert!(err.contains(LENGTH_VAR));
    }

    #[test]
    fn flags_win_over_env() {
        let settings = GeneratorSettings::default()
            .overlay_env(lookup(&[(ALPHABET_VAR, "abc"), (LENGTH_VAR, "2")]))
            .unwrap()
            .with_overrides(Some("xyz"), None, Some(1));
        assert_eq!(settings.alphabet, "xyz");
        assert_eq!(settings.length, 2);
        assert_eq!(settings.seed, Some(1));
        assert_eq!(settings.label(), "xyz/2");
    }

    #[test]
    fn yaml_file_fills_missing_keys_with_defaults() {
        let dir = std::env::temp_dir().join("polytope_config_yaml_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("polytope.yaml");
        std::fs::write(&path, "length: 5\nseed: 7\n").unwrap();

        let settings = GeneratorSettings::from_yaml_file(&path).unwrap();
        assert_eq!(settings.alphabet, DEFAULT_ALPHABET);
        assert_eq!(settings.length, 5);
        assert_eq!(settings.seed, Some(7));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_yaml_file_is_an_error() {
        let path = std::env::temp_dir().join("polytope_config_missing.yaml");
        assert!(GeneratorSettings::from_yaml_file(&path).is_err());
    }
}
