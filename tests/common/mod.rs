use std::sync::Arc;

use stride_core::db::{self, DbPool};
use tempfile::TempDir;

/// A throwaway SQLite database, removed with the temp dir on drop.
pub struct TestDb {
    pub pool: Arc<DbPool>,
    _dir: TempDir,
}

pub fn setup_test_db() -> TestDb {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let data_dir = dir.path().to_string_lossy().to_string();

    let db_path = db::init(&data_dir).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");

    TestDb { pool, _dir: dir }
}
