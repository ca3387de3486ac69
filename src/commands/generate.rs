//! `polytope generate` command.

use std::io::Write;

use crate::uuidgen::PolytopeUuid;

/// Print `count` independently generated identifiers.
///
/// # Errors
///
/// Returns an error string if output cannot be written.
pub fn run(generator: &PolytopeUuid, count: usize, out: &mut dyn Write) -> Result<(), String> {
    super::write_lines(out, (0..count).map(|_| generator.generate_one()))
}
