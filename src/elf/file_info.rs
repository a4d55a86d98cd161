// src/elf/file_info.rs
use serde::{Deserialize, Serialize};

/// Structured view of the one-line description printed by file(1).
///
/// The description is positional: comma-separated tokens, with the trailing
/// ones optional. A field whose token is absent defaults to an empty string
/// (positional fields) or `None` (optional trailing fields) — absence of
/// information is data here, not a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub bit_format: String,
    pub endian: String,
    pub is_pie: bool,
    pub cpu_arch: String,
    pub version: String,
    pub linking: String,
    pub interpreter: Option<String>,
    pub build_id: Option<String>,
    pub target_os: Option<String>,
    pub is_stripped: bool,
}

/// True when the description names an ELF object at all. Callers that
/// require ELF input must check this before parsing further.
pub fn is_elf_description(raw: &str) -> bool {
    raw.contains("ELF")
}

/// Parse a file(1) description line of the shape
/// `<path>: ELF <bits>-bit <endian> <type>, <arch>, version <v> (<abi>),
/// <link-mode>[, interpreter <path>][, BuildID[sha1]=<hex>][, for <os>][,
/// <stripped-state>]`.
///
/// Short or malformed descriptions never fail: every field falls back to
/// its documented default independently.
pub fn parse_file_info(raw: &str) -> FileInfo {
    // file(1) echoes the queried path first; the description is everything
    // after the first colon. No colon means the whole line is description.
    let info = match raw.split_once(':') {
        Some((_, rest)) => rest,
        None => raw,
    };
    let tokens: Vec<&str> = info.split(',').map(str::trim).collect();

    // Token 0 reads like "ELF 64-bit LSB pie executable".
    let first = tokens.first().copied().unwrap_or("");
    let parts: Vec<&str> = first.split_whitespace().collect();
    let bit_format = parts.get(1).copied().unwrap_or("").to_string();
    let endian = parts.get(2).copied().unwrap_or("").to_string();
    let is_pie = first.to_lowercase().contains("pie");

    let cpu_arch = tokens.get(1).copied().unwrap_or("").to_string();
    let version = tokens.get(2).copied().unwrap_or("").to_string();
    let linking = tokens.get(3).copied().unwrap_or("").to_string();

    let interpreter = tokens
        .get(4)
        .copied()
        .filter(|t| t.starts_with("interpreter"))
        .map(|t| t["interpreter".len()..].trim().to_string());

    let build_id = tokens
        .get(5)
        .copied()
        .filter(|t| t.starts_with("BuildID"))
        .and_then(|t| t.split_once('='))
        .map(|(_, id)| id.trim().to_string());

    let target_os = tokens
        .get(6)
        .copied()
        .filter(|t| t.to_lowercase().starts_with("for"))
        .map(|t| t["for".len()..].trim().to_string());

    // A missing or unrecognized trailing token keeps the stripped default.
    let mut is_stripped = true;
    if let Some(token7) = tokens.get(7) {
        let token7 = token7.to_lowercase();
        if token7.contains("not stripped") {
            is_stripped = false;
        } else if token7.contains("stripped") {
            is_stripped = true;
        }
    }

    FileInfo {
        bit_format,
        endian,
        is_pie,
        cpu_arch,
        version,
        linking,
        interpreter,
        build_id,
        target_os,
        is_stripped,
    }
}
