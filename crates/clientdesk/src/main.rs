//! clientdesk - multi-tenant client administration server.

use clap::Parser;
use color_eyre::eyre::Result;
use clientdesk::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(cmd) => cmd.run().await,
        Command::Users(cmd) => cmd.run().await,
        Command::Clients(cmd) => cmd.run().await,
    }
}
