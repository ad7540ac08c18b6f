use clap::{Args, Subcommand};
use sqlx::PgPool;

mod migrate;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending schema migrations
    Migrate,
}

pub(crate) async fn run(command: DbCommand, pool: PgPool) -> Result<(), String> {
    match command.command {
        DbSubcommand::Migrate => migrate::run(&pool).await,
    }
}
