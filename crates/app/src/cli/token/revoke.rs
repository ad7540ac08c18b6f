use clap::Args;
use storefront_app::auth::PgAuthService;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct RevokeTokenArgs {
    /// Token to revoke, as shown by `token list`
    #[arg(long)]
    token_uuid: Uuid,
}

pub(crate) async fn run(auth: &PgAuthService, args: RevokeTokenArgs) -> Result<(), String> {
    let was_active = auth
        .revoke_api_token(args.token_uuid)
        .await
        .map_err(|error| format!("failed to revoke token {}: {error}", args.token_uuid))?;

    let outcome = if was_active {
        "revoked"
    } else {
        "already inactive"
    };

    println!("{}: {outcome}", args.token_uuid);

    Ok(())
}
