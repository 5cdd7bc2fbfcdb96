//! cli subcommands for clientdesk.
//!
//! - `clientdesk serve` - run the web server
//! - `clientdesk users create` - create a user (bootstrap the first admin)
//! - `clientdesk users list` - list users
//! - `clientdesk clients create` - create a client
//! - etc.

mod clients;
mod serve;
mod users;

pub use clients::ClientsCommand;
pub use serve::ServeCommand;
pub use users::UsersCommand;

use clap::{Parser, Subcommand};

/// clientdesk - multi-tenant client administration server
#[derive(Parser, Debug)]
#[command(name = "clientdesk")]
#[command(about = "Multi-tenant client administration server", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// top-level commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// run the web server
    Serve(ServeCommand),

    /// manage users
    #[command(subcommand)]
    Users(UsersCommand),

    /// manage clients
    #[command(subcommand)]
    Clients(ClientsCommand),
}
