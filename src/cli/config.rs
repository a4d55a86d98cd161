// src/cli/config.rs
use anyhow::Result;

use crate::cli::ElfScoutCli;

#[derive(clap::Subcommand)]
pub enum ConfigCommands {
    Get { key: String },
    Set { key: String, value: String },
    List,
}

impl ElfScoutCli {
    pub(super) fn handle_config_command(&mut self, command: ConfigCommands) -> Result<()> {
        match command {
            ConfigCommands::Get { key } => {
                if let Some(value) = self.store.get(&key)? {
                    println!("{}: {}", key, value);
                } else {
                    println!("Configuration key '{}' not found", key);
                }
            }
            ConfigCommands::Set { key, value } => {
                self.store.set(&key, &value)?;
                println!("Set {} to: {}", key, value);
            }
            ConfigCommands::List => {
                let data = self.store.load()?;
                println!("Configuration ({}):", self.store.path().display());
                for (key, value) in &data.settings {
                    println!("  {}: {}", key, value);
                }
            }
        }
        Ok(())
    }
}
