//! SQLite schema migrations for the placelore record store.

use sqlx::SqlitePool;

use crate::error::StorageError;

/// Run all migrations. Idempotent; called once at pool construction.
pub(crate) async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS location_history (
            id TEXT PRIMARY KEY,
            place_name TEXT NOT NULL,
            history TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| StorageError::Migration(e.to_string()))?;

    // Case-insensitive lookup path for find_by_name.
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_location_name
         ON location_history (place_name COLLATE NOCASE)",
    )
    .execute(pool)
    .await
    .map_err(|e| StorageError::Migration(e.to_string()))?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS historical_places (
            id TEXT PRIMARY KEY,
            location_id TEXT NOT NULL REFERENCES location_history(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            description TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| StorageError::Migration(e.to_string()))?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_places_location ON historical_places (location_id)",
    )
    .execute(pool)
    .await
    .map_err(|e| StorageError::Migration(e.to_string()))?;

    Ok(())
}
