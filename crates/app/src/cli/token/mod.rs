use clap::{Args, Subcommand};
use sqlx::PgPool;
use storefront_app::auth::PgAuthService;

mod create;
mod list;
mod revoke;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    /// Issue a token for a user; the secret is printed once
    Create(create::CreateTokenArgs),

    /// Show a user's tokens without their secrets
    List(list::ListTokensArgs),

    /// Stop a token from authenticating
    Revoke(revoke::RevokeTokenArgs),
}

pub(crate) async fn run(command: TokenCommand, pool: PgPool) -> Result<(), String> {
    let auth = PgAuthService::new(pool);

    match command.command {
        TokenSubcommand::Create(args) => create::run(&auth, args).await,
        TokenSubcommand::List(args) => list::run(&auth, args).await,
        TokenSubcommand::Revoke(args) => revoke::run(&auth, args).await,
    }
}
