// src/elf/strings.rs
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use super::AnalyzeError;

/// Deterministic location for a binary's extracted strings:
/// `<logs_root>/<stem>/strings/<stem>.strings`, where `stem` is the file
/// name with its extension removed. Keyed by basename, so concurrent
/// analyses of different binaries never collide; same-name analyses are
/// last-writer-wins.
pub fn strings_output_path(logs_root: &Path, binary: &Path) -> PathBuf {
    let stem = binary
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string());
    logs_root
        .join(&stem)
        .join("strings")
        .join(format!("{stem}.strings"))
}

/// Run the string-extraction tool with stdout streamed straight into the
/// per-binary strings file, waiting for the process to exit.
///
/// Unlike the inspection commands this step must not degrade silently: a
/// tool that cannot start or a directory that cannot be created aborts the
/// extraction with a typed error.
pub async fn extract_strings(
    strings_bin: &str,
    binary: &Path,
    logs_root: &Path,
) -> Result<PathBuf, AnalyzeError> {
    let output_path = strings_output_path(logs_root, binary);
    if let Some(dir) = output_path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }

    let out_file = std::fs::File::create(&output_path)?;
    let mut child = Command::new(strings_bin)
        .arg(binary)
        .stdin(Stdio::null())
        .stdout(Stdio::from(out_file))
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AnalyzeError::ToolMissing(strings_bin.to_string()),
            _ => AnalyzeError::Io(e),
        })?;

    let status = child.wait().await?;
    if !status.success() {
        tracing::warn!(
            "'{}' exited with {} while extracting strings from {}",
            strings_bin,
            status,
            binary.display()
        );
    }
    tracing::debug!("strings written to {}", output_path.display());
    Ok(output_path)
}
