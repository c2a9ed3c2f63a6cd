use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::domain::ids::UserId;
use crate::infrastructure::auth::issue_access_token;

#[derive(Debug, Subcommand)]
pub enum TokenCommands {
    /// Sign an access token for a user
    Issue(IssueTokenCommand),
}

pub fn run(cmd: TokenCommands) -> Result<()> {
    match cmd {
        TokenCommands::Issue(c) => issue_token(c),
    }
}

#[derive(Debug, Args)]
pub struct IssueTokenCommand {
    /// User the token acts as; a new id is generated when omitted
    #[arg(long)]
    pub user_id: Option<UserId>,

    #[arg(long, env = "TUBELY_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    #[arg(long, default_value_t = 24)]
    pub ttl_hours: i64,
}

pub fn issue_token(command: IssueTokenCommand) -> Result<()> {
    let user_id = command.user_id.unwrap_or_else(UserId::generate);
    let token = issue_access_token(
        user_id,
        &command.jwt_secret,
        chrono::Duration::hours(command.ttl_hours),
    )
    .context("failed to sign access token")?;

    eprintln!("Token for user {user_id}:");
    println!("{token}");
    Ok(())
}
