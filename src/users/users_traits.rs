use chrono::NaiveDateTime;

use super::users_errors::Result;
use super::users_model::{NewUser, User};

/// Trait for user repository operations
pub trait UserRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str) -> Result<User>;
    fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    fn insert_new_user(&self, user: User) -> Result<User>;
    fn mark_verified(&self, user_id: &str) -> Result<User>;
    /// Deletes unverified accounts created on or before `cutoff`, cascading
    /// through their goals, templates and responses. Returns the number of
    /// accounts removed.
    fn delete_stale_unverified(&self, cutoff: NaiveDateTime) -> Result<usize>;
}

/// Trait for user service operations
pub trait UserServiceTrait: Send + Sync {
    fn create_user(&self, new_user: NewUser) -> Result<User>;
    fn get_user(&self, user_id: &str) -> Result<User>;
    fn get_user_by_username(&self, username: &str) -> Result<User>;
    fn get_user_by_email(&self, email: &str) -> Result<User>;
    fn mark_verified(&self, user_id: &str) -> Result<User>;
}
