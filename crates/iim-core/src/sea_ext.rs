use sea_orm::{DbErr, SqlErr};

/// Returns `true` when the datastore rejected a write because of a unique
/// constraint (Postgres `23505`, SQLite `2067`).
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
