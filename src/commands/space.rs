//! `polytope space` command.

use std::io::Write;

use crate::uuidgen::PolytopeUuid;

/// Describe the identifier space of `generator`.
///
/// # Errors
///
/// Returns an error string if output cannot be written.
pub fn run(generator: &PolytopeUuid, out: &mut dyn Write) -> Result<(), String> {
    let space = generator.total_space().map_or_else(|| "overflow".to_string(), |t| t.to_string());
    let limit = generator.bulk_limit().map_or_else(|| "unbounded".to_string(), |l| l.to_string());
    let regime = generator.regime();

    writeln!(
        out,
        "alphabet: {}\nradix: {}\nlength: {}\nspace: {space}\nregime: {regime}\nbulk limit: {limit}",
        generator.alphabet(),
        generator.alphabet().len(),
        generator.length(),
    )
    .map_err(|e| format!("Failed to write output: {e}"))
}
