//! Command dispatch and handlers.

pub mod bulk;
pub mod generate;
pub mod space;

use std::io::{self, Write};

use tracing::info;

use crate::cli::{Cli, Command, GeneratorArgs};
use crate::config::GeneratorSettings;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler, writing identifiers to stdout.
///
/// With `--record <FILE>` every random draw is captured to a cassette; with
/// `--replay <FILE>` draws are served from one.
///
/// # Errors
///
/// Returns an error string if settings cannot be resolved or the selected
/// command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    dispatch_to(cli, &mut out)
}

/// Dispatch a command, writing its output to `out`.
///
/// # Errors
///
/// Returns an error string if settings cannot be resolved or the selected
/// command handler fails.
pub fn dispatch_to(cli: &Cli, out: &mut dyn Write) -> Result<(), String> {
    let settings = resolve_settings(&cli.options)?;
    let ctx = build_context(&cli.options, &settings)?;

    let result = dispatch_with_context(&cli.command, &ctx, &settings, out);

    // Write the cassette even when the command failed.
    if let Some(path) = ctx.finish()? {
        info!(path = %path.display(), "recording saved");
    }

    result
}

/// Config file (or environment) first, then command-line flags.
fn resolve_settings(options: &GeneratorArgs) -> Result<GeneratorSettings, String> {
    let base = match &options.config {
        Some(path) => GeneratorSettings::from_yaml_file(path)?,
        None => GeneratorSettings::from_env()?,
    };
    Ok(base.with_overrides(options.alphabet.as_deref(), options.length, options.seed))
}

fn build_context(
    options: &GeneratorArgs,
    settings: &GeneratorSettings,
) -> Result<ServiceContext, String> {
    if let Some(path) = &options.replay {
        return ServiceContext::replaying(path, settings);
    }
    if let Some(path) = &options.record {
        return Ok(ServiceContext::recording(path, settings));
    }
    Ok(ServiceContext::from_seed(settings.seed))
}

fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    settings: &GeneratorSettings,
    out: &mut dyn Write,
) -> Result<(), String> {
    let generator = ctx.generator(settings)?;
    match command {
        Command::Generate { count } => generate::run(&generator, *count, out),
        Command::Bulk { count } => bulk::run(&generator, *count, out),
        Command::Space => space::run(&generator, out),
    }
}

/// Write one identifier per line.
fn write_lines<I>(out: &mut dyn Write, ids: I) -> Result<(), String>
where
    I: IntoIterator<Item = String>,
{
    for id in ids {
        writeln!(out, "{id}").map_err(|e| format!("Failed to write output: {e}"))?;
    }
    Ok(())
}
