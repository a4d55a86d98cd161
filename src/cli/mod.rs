// src/cli/mod.rs
use anyhow::Result;
use clap::Subcommand;

mod analyze;
mod config;
mod printer;

pub use config::ConfigCommands;
pub use printer::{print_analysis_result, print_symbol_results};

use crate::config::{Config, ConfigStore};

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze an ELF binary and extract its strings
    Analyze {
        /// Path to the ELF binary
        file: String,

        /// Function names to probe in the symbol table; omit the flag to
        /// enter names interactively
        #[arg(long, num_args = 1..)]
        functions: Option<Vec<String>>,

        /// Skip string extraction (run it later on its own)
        #[arg(long)]
        no_strings: bool,
    },
    /// Run the headless decompiler against a binary
    Decompile { file: String },
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

pub struct ElfScoutCli {
    config: Config,
    store: ConfigStore,
}

impl ElfScoutCli {
    pub fn new() -> Result<Self> {
        let store = ConfigStore::new()?;
        let config = Config::load(&store)?;
        Ok(Self { config, store })
    }

    pub async fn handle_command(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Analyze {
                file,
                functions,
                no_strings,
            } => self.handle_analyze(&file, functions, no_strings).await,
            Commands::Decompile { file } => {
                crate::decompile::run_decompile(&self.config, std::path::Path::new(&file)).await
            }
            Commands::Config { command } => self.handle_config_command(command),
        }
    }
}
