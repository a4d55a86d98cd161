// src/cli/printer.rs
use ansi_term::Color::{Blue, Green, Red};

use crate::elf::{AnalysisResult, SymbolProbeResult};

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

pub fn print_analysis_result(result: &AnalysisResult) {
    println!("{}", Red.paint("[File Information Raw]"));
    println!("{}", result.file_info_raw);
    println!();

    println!("{}", Blue.paint("[Parsed File Information]"));
    println!("Bit Format: {}", result.file_info.bit_format);
    println!("Endian: {}", result.file_info.endian);
    println!("PIE: {}", result.file_info.is_pie);
    println!("CPU Architecture: {}", result.file_info.cpu_arch);
    println!("Version: {}", result.file_info.version);
    println!("Linking: {}", result.file_info.linking);
    println!("Interpreter: {}", opt(&result.file_info.interpreter));
    println!("Build ID: {}", opt(&result.file_info.build_id));
    println!("Target OS: {}", opt(&result.file_info.target_os));
    println!("Is Stripped: {}", result.file_info.is_stripped);
    println!();

    println!("{}", Green.paint("[checksec Analysis]"));
    for line in &result.checksec_analysis {
        println!("{line}");
    }
    println!();

    if let Some(path) = &result.strings_file {
        println!("Strings saved to: {}", path.display());
        println!();
    }
}

pub fn print_symbol_results(results: &[SymbolProbeResult]) {
    println!("Vulnerable Function Analysis:");
    for res in results {
        if !res.name.is_empty() && res.found {
            println!("{}", Green.paint(res.message.as_str()));
        } else {
            println!("{}", Red.paint(res.message.as_str()));
        }
    }
}
