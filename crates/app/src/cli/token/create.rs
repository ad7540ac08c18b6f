use clap::Args;
use jiff::{SignedDuration, Timestamp};
use storefront_app::{auth::PgAuthService, domain::users::records::UserUuid};
use uuid::Uuid;

use crate::cli::print_fields;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// Owner of the token
    #[arg(long)]
    user_uuid: Uuid,

    /// Days until the token expires; omit for a token that never expires
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    expires_in_days: Option<u16>,
}

pub(crate) async fn run(auth: &PgAuthService, args: CreateTokenArgs) -> Result<(), String> {
    let expires_at = args
        .expires_in_days
        .map(|days| Timestamp::now() + SignedDuration::from_hours(i64::from(days) * 24));

    let issued = auth
        .issue_api_token(UserUuid::from_uuid(args.user_uuid), expires_at)
        .await
        .map_err(|error| format!("failed to create token for {}: {error}", args.user_uuid))?;

    let metadata = issued.metadata;

    print_fields(&[
        ("token", metadata.uuid.to_string()),
        ("user", metadata.user_uuid.to_string()),
        ("created", metadata.created_at.to_string()),
        (
            "expires",
            metadata
                .expires_at
                .map_or_else(|| "never".to_string(), |at| at.to_string()),
        ),
        ("bearer", issued.token),
    ]);

    println!("\nthe bearer value is not stored and cannot be shown again");

    Ok(())
}
