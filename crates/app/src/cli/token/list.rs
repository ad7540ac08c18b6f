use clap::Args;
use jiff::Timestamp;
use storefront_app::{
    auth::{ApiTokenMetadata, PgAuthService},
    domain::users::records::UserUuid,
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    /// Owner whose tokens are listed
    #[arg(long)]
    user_uuid: Uuid,
}

pub(crate) async fn run(auth: &PgAuthService, args: ListTokensArgs) -> Result<(), String> {
    let tokens = auth
        .list_api_tokens(UserUuid::from_uuid(args.user_uuid))
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("user {} has no tokens", args.user_uuid);
        return Ok(());
    }

    let now = Timestamp::now();

    for token in &tokens {
        println!(
            "{}  {:<8}  created {}  last used {}",
            token.uuid,
            status(token, now),
            token.created_at,
            token
                .last_used_at
                .map_or_else(|| "never".to_string(), |at| at.to_string()),
        );
    }

    Ok(())
}

fn status(token: &ApiTokenMetadata, now: Timestamp) -> &'static str {
    if token.revoked_at.is_some() {
        "revoked"
    } else if token.expires_at.is_some_and(|at| at <= now) {
        "expired"
    } else {
        "active"
    }
}
