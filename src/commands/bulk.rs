//! `polytope bulk` command.

use std::io::Write;

use crate::uuidgen::PolytopeUuid;

/// Print `count` pairwise-distinct identifiers.
///
/// # Errors
///
/// Returns an error string for a negative or infeasible `count`, or if output
/// cannot be written. Nothing is printed on error.
pub fn run(generator: &PolytopeUuid, count: i64, out: &mut dyn Write) -> Result<(), String> {
    let ids = generator.generate_distinct_signed(count).map_err(|e| e.to_string())?;
    super::write_lines(out, ids)
}
