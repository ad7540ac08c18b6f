use sqlx::PgPool;
use storefront_app::database;

pub(crate) async fn run(pool: &PgPool) -> Result<(), String> {
    database::migrate(pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    println!("schema is up to date");

    Ok(())
}
