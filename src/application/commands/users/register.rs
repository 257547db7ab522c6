// src/application/commands/users/register.rs
use super::{UserCommandService, password::validate_password};
use crate::{
    application::{
        dto::UserDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{Email, NewUser, PasswordHash, User, Username},
};

pub struct RegisterUserCommand {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl UserCommandService {
    #[tracing::instrument(name = "users.register", skip_all, fields(username = %command.username))]
    pub async fn register(&self, command: RegisterUserCommand) -> ApplicationResult<UserDto> {
        let username = Username::new(command.username)?;
        let email = Email::new(command.email)?;
        if command.name.trim().is_empty() {
            return Err(ApplicationError::validation("name cannot be empty"));
        }
        validate_password(&command.password)?;

        self.ensure_username_available(&username).await?;

        let user = self
            .create_and_insert_user(username, command.name, email, &command.password)
            .await?;

        tracing::info!(user_id = %user.id, "user created successfully");
        Ok(user.into())
    }

    async fn ensure_username_available(&self, username: &Username) -> ApplicationResult<()> {
        if self.user_repo.find_by_username(username).await?.is_some() {
            return Err(ApplicationError::conflict("username already exists"));
        }

        Ok(())
    }

    async fn create_and_insert_user(
        &self,
        username: Username,
        name: String,
        email: Email,
        password: &str,
    ) -> ApplicationResult<User> {
        let hashed = self.password_hasher.hash(password).await?;
        let password_hash = PasswordHash::new(hashed)?;

        let new_user = NewUser::new(username, name, email, password_hash, self.clock.now());
        let user = self.user_repo.insert(new_user).await?;

        Ok(user)
    }
}
