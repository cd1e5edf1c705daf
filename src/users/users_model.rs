use chrono::NaiveDateTime;
use diesel::prelude::*;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::users_errors::{Result, UserError};

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
            .expect("email regex is valid");
}

/// A registered account. Unverified accounts are reaped by the daily sweep
/// once they are older than the signup retention window.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub pw_hash: String,
    pub pw_salt: String,
    pub is_verified: bool,
    pub created_at: NaiveDateTime,
}

/// Input model for signing up a new user. Password hashing happens at the
/// boundary; the core only stores the hash and salt it is handed.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub pw_hash: String,
    pub pw_salt: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(UserError::InvalidData(
                "Username cannot be empty".to_string(),
            ));
        }
        if !EMAIL_REGEX.is_match(self.email.trim()) {
            return Err(UserError::InvalidData(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            pw_hash: "hash".to_string(),
            pw_salt: "salt".to_string(),
        }
    }

    #[test]
    fn accepts_well_formed_emails() {
        assert!(new_user("ayla", "ayla@example.com").validate().is_ok());
        assert!(new_user("ayla", "a.b+c@sub.example.org").validate().is_ok());
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(new_user("ayla", "not-an-email").validate().is_err());
        assert!(new_user("ayla", "missing@tld").validate().is_err());
        assert!(new_user("ayla", "@example.com").validate().is_err());
    }

    #[test]
    fn rejects_blank_username() {
        assert!(new_user("  ", "ayla@example.com").validate().is_err());
    }
}
