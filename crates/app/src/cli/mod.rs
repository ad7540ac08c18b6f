use clap::{Args, Parser, Subcommand};
use sqlx::PgPool;
use storefront_app::database;

mod db;
mod token;
mod user;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront administration CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    database: DatabaseArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Connection settings shared by every subcommand.
#[derive(Debug, Args)]
struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, global = true, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, global = true, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 2)]
    database_max_connections: u32,
}

impl DatabaseArgs {
    async fn connect(&self) -> Result<PgPool, String> {
        let url = self
            .database_url
            .as_deref()
            .ok_or("DATABASE_URL or --database-url is required")?;

        database::connect(url, self.database_max_connections)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Schema management
    Db(db::DbCommand),

    /// Customer and admin accounts
    User(user::UserCommand),

    /// API bearer tokens
    Token(token::TokenCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let pool = self.database.connect().await?;

        match self.command {
            Commands::Db(command) => db::run(command, pool).await,
            Commands::User(command) => user::run(command, pool).await,
            Commands::Token(command) => token::run(command, pool).await,
        }
    }
}

/// Print `label: value` pairs with the values aligned.
fn print_fields(fields: &[(&str, String)]) {
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    for (label, value) in fields {
        println!("{label:>width$}: {value}");
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn database_args_are_accepted_after_the_subcommand() -> TestResult {
        let cli = Cli::try_parse_from([
            "storefront-app",
            "user",
            "list",
            "--database-url",
            "postgresql://localhost/storefront",
        ])?;

        assert_eq!(
            cli.database.database_url.as_deref(),
            Some("postgresql://localhost/storefront")
        );
        assert!(
            matches!(cli.command, Commands::User(_)),
            "expected user subcommand"
        );

        Ok(())
    }
}
