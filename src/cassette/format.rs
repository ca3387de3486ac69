//! Cassette data structures for recording and replaying interactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded interaction with an external port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name (e.g. "rng").
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Input data sent to the port.
    pub input: serde_json::Value,
    /// Output data returned from the port.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Generator settings at recording time, as `alphabet/length`.
    pub settings: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn yaml_keeps_large_draws_exact() {
        let cassette = Cassette {
            name: "bulk".into(),
            recorded_at: Utc::now(),
            settings: "abcdefghijkmnpqrstuvwxyz23456789/8".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "rng".into(),
                method: "below".into(),
                input: json!({ "bound": 1_099_511_627_776_u64 }),
                output: json!(u64::MAX - 1),
            }],
        };
        let yaml = serde_yaml::to_string(&cassette).expect("serialize");
        let deserialized: Cassette = serde_yaml::from_str(&yaml).expect("deserialize");
        assert_eq!(deserialized.interactions[0].output.as_u64(), Some(u64::MAX - 1));
        assert_eq!(cassette, deserialized);
    }
}
