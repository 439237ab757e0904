//! Write a default configuration.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use bridgework_core::{catalog, Manifest};

/// Run the init command.
pub fn run(config: &Path, yes: bool) -> Result<()> {
    if config.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config.display()
        );
        return Ok(());
    }

    fs::write(config, Manifest::render_default(catalog::builtin()))
        .with_context(|| format!("Failed to write {}", config.display()))?;
    tracing::info!("Created {}", config.display());

    Ok(())
}
