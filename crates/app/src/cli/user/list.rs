use storefront_app::domain::users::{PgUsersService, UsersService};

pub(crate) async fn run(users: &PgUsersService) -> Result<(), String> {
    let users = users
        .list_users()
        .await
        .map_err(|error| format!("failed to list users: {error}"))?;

    if users.is_empty() {
        println!("no users found");
        return Ok(());
    }

    for user in users {
        println!("{}  {:<8}  {}  {}", user.uuid, user.role, user.email, user.name);
    }

    Ok(())
}
