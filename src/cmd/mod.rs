use crate::{pkg::server::listen, prelude::Result};
use clap::{Parser, Subcommand};

mod migrate;
mod token;

#[derive(Parser)]
#[command(about = "jobs and companies REST service")]
struct Cmd {
    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    Listen,
    Migrate,
    /// Prints a signed token for local testing
    Token {
        #[arg(long)]
        username: String,
        #[arg(long, default_value_t = false)]
        admin: bool,
    },
}

pub async fn run() -> Result<()> {
    let args = Cmd::parse();
    match args.command {
        Some(SubCommandType::Listen) => {
            listen().await?;
        }
        Some(SubCommandType::Migrate) => {
            migrate::apply().await?;
        }
        Some(SubCommandType::Token { username, admin }) => {
            token::issue(&username, admin)?;
        }
        None => {
            tracing::error!("no subcommand passed");
        }
    }
    Ok(())
}
