use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service backed by the given store.
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.password_hasher.hash(command.password.expose())?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            role: command.role,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::debug!(user_id = %created_user.id, role = %created_user.role, "User persisted");

        Ok(created_user)
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Password;
    use crate::domain::user::models::Role;
    use crate::domain::user::models::UserName;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
        }
    }

    fn command(role: Role) -> CreateUserCommand {
        CreateUserCommand::new(
            UserName::new("Jo".to_string()).unwrap(),
            EmailAddress::new("JO@EXAMPLE.com").unwrap(),
            Password::new("secret1".to_string()).unwrap(),
            role,
        )
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.name.as_str() == "Jo"
                    && user.email.as_str() == "jo@example.com"
                    && user.role == Role::Admin
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let user = service.create_user(command(Role::Admin)).await.unwrap();
        assert_eq!(user.email.as_str(), "jo@example.com");
        assert_eq!(user.role, Role::Admin);
        // Password is hashed with real Argon2
        assert!(user.password_hash.starts_with("$argon2"));
        assert!(!user.password_hash.contains("secret1"));
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ))
        });

        let service = UserService::new(Arc::new(repository));

        let result = service.create_user(command(Role::User)).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyExists(email) if email == "jo@example.com"
        ));
    }

    #[tokio::test]
    async fn test_create_user_store_failure() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .times(1)
            .returning(|_| Err(UserError::DatabaseError("connection reset".to_string())));

        let service = UserService::new(Arc::new(repository));

        let result = service.create_user(command(Role::User)).await;
        assert!(matches!(result.unwrap_err(), UserError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn test_create_user_assigns_fresh_ids() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_create().times(2).returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let first = service.create_user(command(Role::User)).await.unwrap();
        let second = service.create_user(command(Role::User)).await.unwrap();
        assert_ne!(first.id, second.id);
    }
}
