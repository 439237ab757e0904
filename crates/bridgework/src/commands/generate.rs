//! Wrapper module generation command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bridgework_core::{generate_wrappers, Manifest};

/// Run the generate command.
pub fn run(config: &Path, output: Option<PathBuf>) -> Result<()> {
    let manifest = Manifest::load(config)?;
    let module = generate_wrappers(&manifest.elements, &manifest.generate)?;

    match output.or(manifest.generate.output) {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(&path, module)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(
                "Wrote {} wrappers to {}",
                manifest.elements.len(),
                path.display()
            );
        }
        None => print!("{module}"),
    }

    Ok(())
}
