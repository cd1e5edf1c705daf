pub mod db;

pub mod checkins;
pub mod goals;
pub mod sweep;
pub mod templates;
pub mod users;

pub mod errors;
pub mod schema;

pub use errors::{Error, Result};
