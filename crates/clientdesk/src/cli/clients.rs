//! the `clients` subcommand - manage clients from the shell.

use clap::{Args, Subcommand};
use color_eyre::eyre::{Context, Result, bail};

use clientdesk_db::Database;
use clientdesk_types::{AccessLevel, Client, ClientId, UserId};

use super::serve::DbArgs;

/// manage clients
#[derive(Subcommand, Debug)]
pub enum ClientsCommand {
    /// create a new client
    Create(CreateClientArgs),

    /// list all clients
    List(ListClientsArgs),

    /// grant a user access to a client
    Grant(GrantArgs),
}

/// create a new client
#[derive(Args, Debug)]
pub struct CreateClientArgs {
    #[command(flatten)]
    db: DbArgs,

    /// client name
    name: String,

    /// industry
    #[arg(long)]
    industry: String,

    /// id of the user recorded as creator
    #[arg(long, default_value_t = 1)]
    created_by: u64,
}

/// list clients
#[derive(Args, Debug)]
pub struct ListClientsArgs {
    #[command(flatten)]
    db: DbArgs,

    /// output format (table, json)
    #[arg(short, long, default_value = "table")]
    output: String,
}

/// grant a user access to a client
#[derive(Args, Debug)]
pub struct GrantArgs {
    #[command(flatten)]
    db: DbArgs,

    /// user id receiving the grant
    user_id: u64,

    /// client id the grant applies to
    client_id: u64,

    /// access level: read, write or admin
    #[arg(long, default_value = "read")]
    level: String,
}

impl ClientsCommand {
    /// run the clients command
    pub async fn run(self) -> Result<()> {
        match self {
            ClientsCommand::Create(args) => create_client(args).await,
            ClientsCommand::List(args) => list_clients(args).await,
            ClientsCommand::Grant(args) => grant(args).await,
        }
    }
}

async fn create_client(args: CreateClientArgs) -> Result<()> {
    let db = args.db.connect().await?;

    let client = Client::new(
        ClientId(0),
        args.name,
        args.industry,
        UserId(args.created_by),
    );
    let client = db
        .create_client(&client)
        .await
        .context("failed to create client")?;

    println!("Created client {} ({})", client.id, client.name);
    Ok(())
}

async fn list_clients(args: ListClientsArgs) -> Result<()> {
    let db = args.db.connect().await?;
    let clients = db.list_clients().await.context("failed to list clients")?;

    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&clients)?),
        _ => {
            println!("{:<6} {:<28} {:<20} {:<8}", "ID", "NAME", "INDUSTRY", "ACTIVE");
            for client in clients {
                println!(
                    "{:<6} {:<28} {:<20} {:<8}",
                    client.id, client.name, client.industry, client.active
                );
            }
        }
    }

    Ok(())
}

async fn grant(args: GrantArgs) -> Result<()> {
    let db = args.db.connect().await?;

    let level: AccessLevel = args
        .level
        .parse()
        .with_context(|| format!("invalid access level: {}", args.level))?;

    let Some(user) = db
        .get_user(UserId(args.user_id))
        .await
        .context("failed to look up user")?
    else {
        bail!("no user with id {}", args.user_id);
    };
    let Some(client) = db
        .get_client(ClientId(args.client_id))
        .await
        .context("failed to look up client")?
    else {
        bail!("no client with id {}", args.client_id);
    };

    db.grant_access(user.id, client.id, level)
        .await
        .context("failed to grant access")?;

    println!(
        "Granted {} access on {} to {}",
        level, client.name, user.name
    );
    Ok(())
}
