// src/cli/analyze.rs
use anyhow::{Result, anyhow};
use std::io::{self, Write};
use std::path::Path;

use crate::cli::ElfScoutCli;
use crate::cli::printer::{print_analysis_result, print_symbol_results};
use crate::elf::ElfAnalyzer;

impl ElfScoutCli {
    pub(super) async fn handle_analyze(
        &mut self,
        file_path: &str,
        functions: Option<Vec<String>>,
        no_strings: bool,
    ) -> Result<()> {
        let path = Path::new(file_path);
        if !path.exists() {
            return Err(anyhow!("File not found: {}", file_path));
        }

        let analyzer = ElfAnalyzer::new(&self.config, path);
        let result = if no_strings {
            analyzer.analyze().await?
        } else {
            analyzer.analyze_with_strings().await?
        };
        print_analysis_result(&result);

        match functions {
            Some(names) => {
                let results = analyzer.probe_symbols(&result.file_info, &names).await;
                print_symbol_results(&results);
            }
            None => {
                // Interactive mode: one name at a time until the quit
                // sentinel (or EOF).
                while let Some(name) = prompt_function_name()? {
                    let results = analyzer
                        .probe_symbols(&result.file_info, std::slice::from_ref(&name))
                        .await;
                    print_symbol_results(&results);
                    // The sentinel means probing can never succeed for
                    // this binary; no point asking for more names.
                    if results.len() == 1 && results[0].name.is_empty() {
                        break;
                    }
                }
            }
        }

        Ok(())
    }
}

fn prompt_function_name() -> Result<Option<String>> {
    print!("function name ('quit' to stop): ");
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    let name = line.trim();
    if name.is_empty() || name.eq_ignore_ascii_case("quit") || name.eq_ignore_ascii_case("q") {
        return Ok(None);
    }
    Ok(Some(name.to_string()))
}
