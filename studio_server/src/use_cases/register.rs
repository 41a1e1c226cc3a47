use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::domain::entities::{NewUser, User};
use crate::domain::errors::StudioError;
use crate::domain::password::hash_password;
use crate::domain::ports::{Clock, UserRepository};

const EMAIL_MAX_LEN: usize = 50;
const NAME_LEN: RangeInclusive<usize> = 3..=20;
const PASSWORD_LEN: RangeInclusive<usize> = 6..=40;

// Sign-up data submitted to the register use case.
pub struct RegisterCommand {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

// Register use case with injected dependencies.
pub struct RegisterUseCase<C> {
    pub clock: C,
    pub users: Arc<dyn UserRepository>,
}

impl<C> RegisterUseCase<C>
where
    C: Clock,
{
    pub async fn execute(&self, command: RegisterCommand) -> Result<User, StudioError> {
        validate_email(&command.email)?;
        validate_length("firstName", &command.first_name, &NAME_LEN)?;
        validate_length("lastName", &command.last_name, &NAME_LEN)?;
        validate_length("password", &command.password, &PASSWORD_LEN)?;

        let existing = self
            .users
            .find_by_email(&command.email)
            .await
            .map_err(|_| StudioError::StorageFailure)?;
        if existing.is_some() {
            return Err(StudioError::EmailTaken);
        }

        // Self-service accounts are never admins.
        let new_user = NewUser {
            email: command.email,
            first_name: command.first_name,
            last_name: command.last_name,
            password_hash: hash_password(&command.password),
            admin: false,
        };

        self.users
            .insert(new_user, self.clock.now_utc())
            .await
            .map_err(|_| StudioError::StorageFailure)
    }
}

fn validate_email(value: &str) -> Result<(), StudioError> {
    if value.trim().is_empty() {
        return Err(StudioError::validation("email is required"));
    }
    if value.chars().count() > EMAIL_MAX_LEN {
        return Err(StudioError::validation(format!(
            "email must be at most {EMAIL_MAX_LEN} characters"
        )));
    }

    let valid_shape = value
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        });
    if !valid_shape {
        return Err(StudioError::validation("email must be a well-formed address"));
    }

    Ok(())
}

fn validate_length(
    field: &str,
    value: &str,
    allowed: &RangeInclusive<usize>,
) -> Result<(), StudioError> {
    if value.trim().is_empty() {
        return Err(StudioError::validation(format!("{field} is required")));
    }

    let len = value.chars().count();
    if !allowed.contains(&len) {
        return Err(StudioError::validation(format!(
            "{field} must be between {} and {} characters",
            allowed.start(),
            allowed.end()
        )));
    }

    Ok(())
}
