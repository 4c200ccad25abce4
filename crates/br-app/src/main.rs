use std::io::Write;

use anyhow::{Context, Result};
use br_core::config::RenderConfig;
use br_core::traits::DebugSink;
use br_source::debug::PngDebugSink;
use clap::Parser;

pub mod cli;
pub mod pipeline;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();
    let debug = cli.debug_enabled();

    // 2. Initialiser le logging
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        cli.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    };
    env_logger::Builder::new().filter_level(level).init();
    if debug {
        log::debug!("DEBUG MODE, images dumped to {}", cli.debug_dir.display());
    }

    // 3. Charger la config
    let config = resolve_config(&cli)?;

    // 4. Lire l'entrée
    let bytes = br_source::image::read_input(&cli.input)?;

    // 5. Rendu
    let mut sink = debug.then(|| PngDebugSink::new(&cli.debug_dir));
    let text = pipeline::run(
        &bytes,
        cli.from_text,
        &config,
        sink.as_mut().map(|s| s as &mut dyn DebugSink),
    )?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .context("Failed to write output")?;
    Ok(())
}

/// Resolve config: defaults, then `--config`, then command-line flags.
fn resolve_config(cli: &cli::Cli) -> Result<RenderConfig> {
    let mut config = match cli.config.as_deref() {
        Some(path) => br_core::config::load_config(path)?,
        None => RenderConfig::default(),
    };
    cli.apply_overrides(&mut config);
    config.clamp_all();
    Ok(config)
}
