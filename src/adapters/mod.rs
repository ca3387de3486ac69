//! Adapters implementing the port traits.
//!
//! - `live`: real entropy from `rand`.
//! - `recording`: wraps another adapter and captures every draw to a cassette.
//! - `replaying`: serves draws back from a recorded cassette.

pub mod live;
pub mod recording;
pub mod replaying;
