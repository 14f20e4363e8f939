pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "contact-keeper")]
#[command(about = "Contact Keeper API - per-user address book backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve,

    #[command(about = "Create the contacts table and indexes if missing")]
    Migrate,

    #[command(about = "Issue a bearer token for a user id")]
    Token(commands::auth::TokenArgs),
}

pub async fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::server::serve(config).await,
        Commands::Migrate => commands::server::migrate(config).await,
        Commands::Token(args) => commands::auth::token(args, config),
    }
}
