use std::sync::Arc;

use log::debug;
use uuid::Uuid;

use crate::sweep::Clock;

use super::users_errors::{Result, UserError};
use super::users_model::{NewUser, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};

pub struct UserService<T: UserRepositoryTrait> {
    user_repo: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<T: UserRepositoryTrait> UserService<T> {
    pub fn new(user_repo: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        UserService { user_repo, clock }
    }
}

impl<T: UserRepositoryTrait> UserServiceTrait for UserService<T> {
    fn create_user(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;

        if self.user_repo.find_by_username(&new_user.username)?.is_some() {
            return Err(UserError::Conflict(format!(
                "Username '{}' is already taken",
                new_user.username
            )));
        }
        if self.user_repo.find_by_email(&new_user.email)?.is_some() {
            return Err(UserError::Conflict(format!(
                "Email '{}' is already registered",
                new_user.email
            )));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: new_user.username,
            email: new_user.email,
            pw_hash: new_user.pw_hash,
            pw_salt: new_user.pw_salt,
            is_verified: false,
            created_at: self.clock.now(),
        };

        debug!("Creating user '{}'", user.username);
        self.user_repo.insert_new_user(user)
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.user_repo.get_by_id(user_id)
    }

    fn get_user_by_username(&self, username: &str) -> Result<User> {
        self.user_repo
            .find_by_username(username)?
            .ok_or_else(|| UserError::NotFound(format!("User '{}' not found", username)))
    }

    fn get_user_by_email(&self, email: &str) -> Result<User> {
        self.user_repo
            .find_by_email(email)?
            .ok_or_else(|| UserError::NotFound(format!("No user with email '{}'", email)))
    }

    fn mark_verified(&self, user_id: &str) -> Result<User> {
        self.user_repo.mark_verified(user_id)
    }
}
