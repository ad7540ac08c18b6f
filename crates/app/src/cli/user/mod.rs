use clap::{Args, Subcommand};
use sqlx::PgPool;
use storefront_app::{database::Db, domain::users::PgUsersService};

mod create;
mod list;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Register a customer or admin
    Create(create::CreateUserArgs),

    /// Show every user, oldest first
    List,
}

pub(crate) async fn run(command: UserCommand, pool: PgPool) -> Result<(), String> {
    let users = PgUsersService::new(Db::new(pool));

    match command.command {
        UserSubcommand::Create(args) => create::run(&users, args).await,
        UserSubcommand::List => list::run(&users).await,
    }
}
