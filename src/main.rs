// src/main.rs
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use elfscout::cli::{Commands, ElfScoutCli};
use elfscout::server::run_server;

#[derive(Parser)]
#[command(name = "elfscout")]
#[command(about = "ELF inspection & exploit-mitigation triage")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Run in server mode
    #[arg(long)]
    server: bool,

    /// Port for server mode (overrides the configured port)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "elfscout=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if cli.server {
        let store = elfscout::ConfigStore::new()?;
        let mut config = elfscout::Config::load(&store)?;
        if let Some(port) = cli.port {
            config.port = port;
        }
        return run_server(config).await;
    }

    match cli.command {
        Some(command) => {
            let mut app = ElfScoutCli::new()?;
            app.handle_command(command).await
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
