// src/elf/symbols.rs
use serde::{Deserialize, Serialize};

/// Outcome of probing one function name against the symbol-table dump, or
/// a single sentinel entry (empty name) when probing was impossible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolProbeResult {
    pub name: String,
    pub found: bool,
    pub message: String,
}

/// The sentinel result list used when the binary cannot be probed at all
/// (stripped, or no section-header symbol table).
pub fn probe_unavailable(reason: &str) -> Vec<SymbolProbeResult> {
    vec![SymbolProbeResult {
        name: String::new(),
        found: false,
        message: format!("Symbol probing unavailable: {reason}"),
    }]
}

/// True when the section listing reports a section-header symbol table.
pub fn has_symtab(readelf_sections: &str) -> bool {
    readelf_sections.contains(".symtab")
}

/// Test each name for presence in the symbol-table dump.
///
/// The test is a raw substring search of the dump text, one result per
/// probed name.
pub fn probe_names(dump: &str, names: &[String]) -> Vec<SymbolProbeResult> {
    names
        .iter()
        .map(|name| {
            let found = dump.contains(name.as_str());
            let message = if found {
                format!("Function '{name}' found in symbol table")
            } else {
                format!("Function '{name}' not found in symbol table")
            };
            SymbolProbeResult {
                name: name.clone(),
                found,
                message,
            }
        })
        .collect()
}
