//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::users::{
        data::NewUser,
        errors::UsersServiceError,
        records::{UserRecord, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    #[tracing::instrument(
        name = "users.service.create_user",
        skip(self, user),
        fields(user_uuid = %user.uuid, role = %user.role),
        err
    )]
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        let user = normalise(user)?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_user(&mut tx, &user).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let users = self.repository.list_users(&mut tx).await?;

        tx.commit().await?;

        Ok(users)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Register a user.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve all users, oldest first.
    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError>;
}

fn normalise(mut user: NewUser) -> Result<NewUser, UsersServiceError> {
    user.name = user.name.trim().to_string();
    user.email = user.email.trim().to_lowercase();

    if user.name.is_empty() {
        return Err(UsersServiceError::InvalidInput(
            "Name is required".to_string(),
        ));
    }

    let valid_email = user
        .email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));

    if !valid_email {
        return Err(UsersServiceError::InvalidInput(
            "Please provide a valid email".to_string(),
        ));
    }

    Ok(user)
}
