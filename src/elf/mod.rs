// src/elf/mod.rs
pub mod analyzer;
pub mod checksec;
pub mod command;
pub mod file_info;
pub mod strings;
pub mod symbols;

pub use self::analyzer::ElfAnalyzer;
pub use self::checksec::{ChecksecInfo, RelroStatus, parse_checksec, summary_lines};
pub use self::command::CommandRunner;
pub use self::file_info::{FileInfo, is_elf_description, parse_file_info};
pub use self::strings::{extract_strings, strings_output_path};
pub use self::symbols::{SymbolProbeResult, has_symtab, probe_names, probe_unavailable};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Completed analysis of a single ELF file.
///
/// Assembled once by [`ElfAnalyzer`] and handed to the presentation layers
/// (CLI printer, HTTP JSON responder) by reference; never mutated after
/// construction. `strings_file` is `None` when extraction was deferred.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: Uuid,
    pub file_name: String,
    pub file_info_raw: String,
    pub file_info: FileInfo,
    pub checksec: ChecksecInfo,
    pub checksec_analysis: Vec<String>,
    pub strings_file: Option<PathBuf>,
    pub created_at: DateTime<Utc>,
}

/// Structural failures of an analysis request.
///
/// Classification ambiguity never lands here: parsers absorb it into their
/// typed unknown/not-found values. Only bad input files, missing tools, and
/// I/O failures terminate an analysis.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("'{path}' is not an ELF binary: {description}")]
    NotElf { path: String, description: String },

    #[error("required inspection tool '{0}' was not found in PATH")]
    ToolMissing(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
