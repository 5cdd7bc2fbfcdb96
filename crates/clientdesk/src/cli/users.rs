//! the `users` subcommand - manage users from the shell.
//!
//! `users create` is also the bootstrap path: a fresh install has no users,
//! so the first admin is created here.

use clap::{Args, Subcommand};
use color_eyre::eyre::{Context, Result, bail};

use clientdesk_db::Database;
use clientdesk_types::{Role, User, UserId};

use super::serve::DbArgs;
use crate::auth;

/// manage users
#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// create a new user
    Create(CreateUserArgs),

    /// list all users
    List(ListUsersArgs),

    /// delete a user
    Delete(DeleteUserArgs),
}

/// create a new user
#[derive(Args, Debug)]
pub struct CreateUserArgs {
    #[command(flatten)]
    db: DbArgs,

    /// display name
    name: String,

    /// login email
    #[arg(long)]
    email: String,

    /// plaintext password (hashed before storage)
    #[arg(long)]
    password: String,

    /// role: admin, manager or user
    #[arg(long, default_value = "user")]
    role: String,
}

/// list users
#[derive(Args, Debug)]
pub struct ListUsersArgs {
    #[command(flatten)]
    db: DbArgs,

    /// output format (table, json)
    #[arg(short, long, default_value = "table")]
    output: String,
}

/// delete a user
#[derive(Args, Debug)]
pub struct DeleteUserArgs {
    #[command(flatten)]
    db: DbArgs,

    /// user id to delete
    user_id: u64,
}

impl UsersCommand {
    /// run the users command
    pub async fn run(self) -> Result<()> {
        match self {
            UsersCommand::Create(args) => create_user(args).await,
            UsersCommand::List(args) => list_users(args).await,
            UsersCommand::Delete(args) => delete_user(args).await,
        }
    }
}

async fn create_user(args: CreateUserArgs) -> Result<()> {
    let db = args.db.connect().await?;

    let role: Role = args
        .role
        .parse()
        .with_context(|| format!("invalid role: {}", args.role))?;

    let email = args.email.trim().to_lowercase();
    if db
        .get_user_by_email(&email)
        .await
        .context("failed to check for existing user")?
        .is_some()
    {
        bail!("user with email '{}' already exists", email);
    }

    let mut user = User::new(UserId(0), args.name, email, role);
    user.password_hash =
        auth::hash_password(&args.password).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let user = db
        .create_user(&user)
        .await
        .context("failed to create user")?;

    println!("Created user {} ({}) with role {}", user.id, user.name, user.role);
    Ok(())
}

async fn list_users(args: ListUsersArgs) -> Result<()> {
    let db = args.db.connect().await?;
    let users = db.list_users().await.context("failed to list users")?;

    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&users)?),
        _ => {
            println!("{:<6} {:<24} {:<32} {:<8}", "ID", "NAME", "EMAIL", "ROLE");
            for user in users {
                println!(
                    "{:<6} {:<24} {:<32} {:<8}",
                    user.id, user.name, user.email, user.role
                );
            }
        }
    }

    Ok(())
}

async fn delete_user(args: DeleteUserArgs) -> Result<()> {
    let db = args.db.connect().await?;

    let Some(user) = db
        .get_user(UserId(args.user_id))
        .await
        .context("failed to look up user")?
    else {
        bail!("no user with id {}", args.user_id);
    };

    db.delete_user(user.id)
        .await
        .context("failed to delete user")?;

    println!("Deleted user {} ({})", user.id, user.name);
    Ok(())
}
