use clap::Args;
use storefront_app::domain::users::{
    PgUsersService, UsersService,
    data::NewUser,
    records::{Role, UserUuid},
};

use crate::cli::print_fields;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Login email, stored lowercased
    #[arg(long)]
    email: String,

    /// `customer`, `staff`, `manager` or `admin`
    #[arg(long, default_value = "customer")]
    role: Role,
}

pub(crate) async fn run(users: &PgUsersService, args: CreateUserArgs) -> Result<(), String> {
    let user = users
        .create_user(NewUser {
            uuid: UserUuid::new(),
            name: args.name,
            email: args.email,
            role: args.role,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    print_fields(&[
        ("user", user.uuid.to_string()),
        ("email", user.email),
        ("role", user.role.to_string()),
    ]);

    Ok(())
}
