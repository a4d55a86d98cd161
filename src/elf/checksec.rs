// src/elf/checksec.rs
use serde::{Deserialize, Serialize};

/// RELRO hardening tier reported by the mitigation checker.
///
/// `Unknown` means the RELRO section was present in the output but carried
/// no recognizable tier; `NotFound` means the tool emitted no RELRO section
/// at all. Consumers rely on that distinction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelroStatus {
    None,
    Partial,
    Full,
    Unknown,
    NotFound,
}

impl std::fmt::Display for RelroStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RelroStatus::None => "None",
            RelroStatus::Partial => "Partial",
            RelroStatus::Full => "Full",
            RelroStatus::Unknown => "Unknown",
            RelroStatus::NotFound => "Not found",
        };
        f.write_str(s)
    }
}

/// Mitigation classifications extracted from the checker's free-text
/// output.
///
/// The boolean fields are tri-state: `Some(false)` records evidence that
/// the mitigation is absent, while `None` records that the tool emitted no
/// section for it at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksecInfo {
    pub relro: RelroStatus,
    pub stack_canary: Option<bool>,
    pub nx: Option<bool>,
    pub pie: Option<bool>,
}

/// Classify the four mitigations from the checker's output.
///
/// Each classification is gated on its section keyword being present in the
/// text at all. A recognized keyword with no matching positive phrase reads
/// as the negative classification; a completely absent keyword reads as
/// `None`/`NotFound`. The match is by substring, never by column position —
/// the tool's layout is not under our control.
pub fn parse_checksec(output: &str) -> ChecksecInfo {
    let relro = if output.contains("RELRO") {
        if output.contains("Partial RELRO") {
            RelroStatus::Partial
        } else if output.contains("Full RELRO") {
            RelroStatus::Full
        } else if output.contains("No RELRO") {
            RelroStatus::None
        } else {
            RelroStatus::Unknown
        }
    } else {
        RelroStatus::NotFound
    };

    let stack_canary = if output.contains("Stack") {
        Some(!output.contains("No canary found"))
    } else {
        None
    };

    let nx = if output.contains("NX") {
        Some(output.contains("NX enabled"))
    } else {
        None
    };

    let pie = if output.contains("PIE") {
        Some(output.contains("PIE enabled"))
    } else {
        None
    };

    ChecksecInfo {
        relro,
        stack_canary,
        nx,
        pie,
    }
}

/// The four human-readable classification lines, one per mitigation.
pub fn summary_lines(info: &ChecksecInfo) -> Vec<String> {
    vec![
        format!("RELRO: {}", info.relro),
        format!("Stack Canary: {}", tri_state(info.stack_canary)),
        format!("NX: {}", tri_state(info.nx)),
        format!("PIE: {}", tri_state(info.pie)),
    ]
}

fn tri_state(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "enabled",
        Some(false) => "disabled",
        None => "not reported",
    }
}
