use std::sync::Arc;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use log::debug;

use crate::db::{DbConnection, DbPool};
use crate::schema::users;
use crate::schema::users::dsl::*;

use super::users_errors::{Result, UserError};
use super::users_model::User;
use super::users_traits::UserRepositoryTrait;

pub struct UserRepository {
    pool: Arc<DbPool>,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        UserRepository { pool }
    }

    fn conn(&self) -> Result<DbConnection> {
        self.pool
            .get()
            .map_err(|e| UserError::DatabaseError(e.to_string()))
    }
}

impl UserRepositoryTrait for UserRepository {
    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = self.conn()?;
        Ok(users.find(user_id).first(&mut conn)?)
    }

    fn find_by_username(&self, name: &str) -> Result<Option<User>> {
        let mut conn = self.conn()?;
        Ok(users
            .filter(username.eq(name))
            .first(&mut conn)
            .optional()?)
    }

    fn find_by_email(&self, address: &str) -> Result<Option<User>> {
        let mut conn = self.conn()?;
        Ok(users
            .filter(email.eq(address))
            .first(&mut conn)
            .optional()?)
    }

    fn insert_new_user(&self, user: User) -> Result<User> {
        let mut conn = self.conn()?;
        Ok(diesel::insert_into(users::table)
            .values(&user)
            .returning(users::all_columns)
            .get_result(&mut conn)?)
    }

    fn mark_verified(&self, user_id: &str) -> Result<User> {
        let mut conn = self.conn()?;
        diesel::update(users.find(user_id))
            .set(is_verified.eq(true))
            .execute(&mut conn)?;

        Ok(users.find(user_id).first(&mut conn)?)
    }

    fn delete_stale_unverified(&self, cutoff: NaiveDateTime) -> Result<usize> {
        let mut conn = self.conn()?;

        // A single DELETE re-checks liveness on every run, so an overlapping
        // sweep cannot double-delete.
        let deleted = diesel::delete(
            users
                .filter(is_verified.eq(false))
                .filter(created_at.le(cutoff)),
        )
        .execute(&mut conn)?;

        debug!("Reaped {} stale unverified accounts", deleted);
        Ok(deleted)
    }
}
