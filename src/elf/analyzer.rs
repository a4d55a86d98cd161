// src/elf/analyzer.rs
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

use crate::config::Config;

use super::checksec::{parse_checksec, summary_lines};
use super::command::CommandRunner;
use super::file_info::{FileInfo, is_elf_description, parse_file_info};
use super::strings::extract_strings;
use super::symbols::{SymbolProbeResult, has_symtab, probe_names, probe_unavailable};
use super::{AnalysisResult, AnalyzeError};

/// Drives the external inspection tools against a single ELF file and
/// assembles their parsed output into one [`AnalysisResult`].
///
/// Both orchestrations are supported: [`analyze`](Self::analyze) leaves
/// string extraction to a later [`save_strings`](Self::save_strings) call,
/// while [`analyze_with_strings`](Self::analyze_with_strings) inlines it.
pub struct ElfAnalyzer {
    config: Config,
    runner: CommandRunner,
    path: PathBuf,
}

impl ElfAnalyzer {
    pub fn new(config: &Config, path: impl Into<PathBuf>) -> Self {
        let runner = CommandRunner::new(Duration::from_secs(config.tool_timeout_secs));
        Self {
            config: config.clone(),
            runner,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }

    fn require_tool(&self, name: &str) -> Result<(), AnalyzeError> {
        which::which(name)
            .map(|_| ())
            .map_err(|_| AnalyzeError::ToolMissing(name.to_string()))
    }

    /// File classification plus mitigation classification, without string
    /// extraction (`strings_file` left unset).
    ///
    /// Non-ELF input is fatal before any further parsing; tool failures
    /// after the ELF gate degrade into the parsers' unknown/not-found
    /// classifications instead.
    pub async fn analyze(&self) -> Result<AnalysisResult, AnalyzeError> {
        self.require_tool(&self.config.file_bin)?;

        let path_arg = self.path.to_string_lossy().into_owned();
        let file_info_raw = self
            .runner
            .run(&self.config.file_bin, &[path_arg.as_str()])
            .await;
        if !is_elf_description(&file_info_raw) {
            return Err(AnalyzeError::NotElf {
                path: path_arg,
                description: file_info_raw,
            });
        }

        let file_info = parse_file_info(&file_info_raw);
        tracing::info!(
            "classified '{}': {} {} {}",
            self.file_name(),
            file_info.bit_format,
            file_info.endian,
            file_info.cpu_arch
        );

        let checksec_arg = format!("--file={}", path_arg);
        let checksec_raw = self
            .runner
            .run(&self.config.checksec_bin, &[checksec_arg.as_str()])
            .await;
        let checksec = parse_checksec(&checksec_raw);
        let checksec_analysis = summary_lines(&checksec);

        Ok(AnalysisResult {
            id: Uuid::new_v4(),
            file_name: self.file_name(),
            file_info_raw,
            file_info,
            checksec,
            checksec_analysis,
            strings_file: None,
            created_at: Utc::now(),
        })
    }

    /// One-shot variant with string extraction inlined before the result
    /// is returned.
    pub async fn analyze_with_strings(&self) -> Result<AnalysisResult, AnalyzeError> {
        let mut result = self.analyze().await?;
        result.strings_file = Some(self.save_strings().await?);
        Ok(result)
    }

    /// Run string extraction on its own; usable before or after
    /// [`analyze`](Self::analyze). Returns the persisted artifact path.
    pub async fn save_strings(&self) -> Result<PathBuf, AnalyzeError> {
        extract_strings(&self.config.strings_bin, &self.path, &self.config.logs_dir).await
    }

    /// Probe the symbol table for each name.
    ///
    /// Stripped binaries and binaries without a section-header symbol table
    /// yield a single sentinel entry without invoking the dump tool.
    pub async fn probe_symbols(
        &self,
        file_info: &FileInfo,
        names: &[String],
    ) -> Vec<SymbolProbeResult> {
        if file_info.is_stripped {
            return probe_unavailable("binary is stripped");
        }

        let path_arg = self.path.to_string_lossy().into_owned();
        let sections = self
            .runner
            .run(&self.config.readelf_bin, &["-S", path_arg.as_str()])
            .await;
        if !has_symtab(&sections) {
            return probe_unavailable("no section-header symbol table present");
        }

        let dump = self
            .runner
            .run(&self.config.nm_bin, &[path_arg.as_str()])
            .await;
        probe_names(&dump, names)
    }
}
