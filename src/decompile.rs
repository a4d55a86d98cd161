// src/decompile.rs
use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use walkdir::WalkDir;

use crate::config::Config;

/// Locate the headless decompiler launcher under the configured Ghidra
/// installation (`<ghidra>/<version>/support/analyzeHeadless`).
pub fn find_analyze_headless(ghidra_dir: &Path) -> Option<PathBuf> {
    WalkDir::new(ghidra_dir)
        .max_depth(3)
        .into_iter()
        .filter_map(|e| e.ok())
        .find(|e| e.file_type().is_file() && e.file_name() == "analyzeHeadless")
        .map(|e| e.into_path())
}

/// Run the headless decompiler against `input`, applying the configured
/// post-processing script. The decompiler's own output is inherited so
/// progress stays visible to the operator.
pub async fn run_decompile(config: &Config, input: &Path) -> Result<()> {
    let script = &config.decompile_script;
    if !script.exists() {
        return Err(anyhow!("decompile script not found: {}", script.display()));
    }

    let analyze_headless = find_analyze_headless(&config.ghidra_dir).ok_or_else(|| {
        anyhow!(
            "cannot find analyzeHeadless under {}",
            config.ghidra_dir.display()
        )
    })?;

    tracing::info!("running decompiler on {}", input.display());
    let status = Command::new(&analyze_headless)
        .arg("./projects")
        .arg("decompile")
        .arg("-import")
        .arg(input)
        .arg("-deleteProject")
        .arg("-overwrite")
        .arg("-postScript")
        .arg(script)
        .status()
        .await?;

    if !status.success() {
        return Err(anyhow!("decompiler exited with {}", status));
    }
    Ok(())
}
