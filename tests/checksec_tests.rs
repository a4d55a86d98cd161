// tests/checksec_tests.rs

use elfscout::elf::{RelroStatus, parse_checksec, summary_lines};

#[test]
fn test_typical_hardened_output() {
    let out = "RELRO: Partial RELRO\nStack: No canary found\nNX: NX enabled\nPIE: No PIE";
    let info = parse_checksec(out);

    assert_eq!(info.relro, RelroStatus::Partial);
    assert_eq!(info.stack_canary, Some(false));
    assert_eq!(info.nx, Some(true));
    assert_eq!(info.pie, Some(false));
}

#[test]
fn test_absent_sections_are_null_not_false() {
    // No "Stack", "NX", or "PIE" substrings at all: no evidence was
    // emitted, which is distinct from evidence of absence.
    let out = "RELRO: Full RELRO";
    let info = parse_checksec(out);

    assert_eq!(info.relro, RelroStatus::Full);
    assert_eq!(info.stack_canary, None);
    assert_eq!(info.nx, None);
    assert_eq!(info.pie, None);
}

#[test]
fn test_no_relro_keyword_is_not_found() {
    let info = parse_checksec("some unrelated tool banner");
    assert_eq!(info.relro, RelroStatus::NotFound);
}

#[test]
fn test_relro_keyword_without_tier_is_unknown() {
    let info = parse_checksec("RELRO: enabled");
    assert_eq!(info.relro, RelroStatus::Unknown);
}

#[test]
fn test_no_relro_phrase_maps_to_none() {
    let info = parse_checksec("RELRO: No RELRO");
    assert_eq!(info.relro, RelroStatus::None);
}

#[test]
fn test_canary_present() {
    let info = parse_checksec("Stack: Canary found");
    assert_eq!(info.stack_canary, Some(true));
}

#[test]
fn test_nx_keyword_without_enabled_phrase_is_false() {
    let info = parse_checksec("NX: NX disabled");
    assert_eq!(info.nx, Some(false));
}

#[test]
fn test_pie_mirrors_nx() {
    let info = parse_checksec("PIE: PIE enabled");
    assert_eq!(info.pie, Some(true));
    let info = parse_checksec("PIE: No PIE (0x400000)");
    assert_eq!(info.pie, Some(false));
}

#[test]
fn test_error_annotated_runner_text_degrades_cleanly() {
    // The Command Runner hands failures to the parser as text; every
    // classification must land on its insufficient-evidence value.
    let info = parse_checksec("Error executing command: checksec exited with exit status: 1");
    assert_eq!(info.relro, RelroStatus::NotFound);
    assert_eq!(info.stack_canary, None);
    assert_eq!(info.nx, None);
    assert_eq!(info.pie, None);
}

#[test]
fn test_parsing_is_idempotent() {
    let out = "RELRO: Partial RELRO\nStack: Canary found\nNX: NX enabled\nPIE: PIE enabled";
    assert_eq!(parse_checksec(out), parse_checksec(out));
}

#[test]
fn test_summary_lines() {
    let out = "RELRO: Partial RELRO\nStack: No canary found\nNX: NX enabled\nPIE: No PIE";
    let lines = summary_lines(&parse_checksec(out));
    assert_eq!(
        lines,
        vec![
            "RELRO: Partial".to_string(),
            "Stack Canary: disabled".to_string(),
            "NX: enabled".to_string(),
            "PIE: disabled".to_string(),
        ]
    );
}

#[test]
fn test_summary_lines_not_reported() {
    let lines = summary_lines(&parse_checksec("nothing relevant"));
    assert_eq!(
        lines,
        vec![
            "RELRO: Not found".to_string(),
            "Stack Canary: not reported".to_string(),
            "NX: not reported".to_string(),
            "PIE: not reported".to_string(),
        ]
    );
}
