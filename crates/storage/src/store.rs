//! The record store: cached place histories and their extracted sites.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use placelore_core::{LocationRecord, PlaceMention};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::error::StorageError;
use crate::migrations::run_migrations;

/// SQLite-backed store for [`LocationRecord`]s and their [`PlaceMention`]s.
///
/// Lookups are case-insensitive on `place_name`. Duplicate rows for the same
/// name can exist (two concurrent first requests both miss and both persist);
/// `find_by_name` returns the earliest row, so every response stays valid.
#[derive(Clone, Debug)]
pub struct RecordStore {
    pool: SqlitePool,
}

impl RecordStore {
    /// Open (creating if missing) the database at `database_url` and run
    /// migrations.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let max_connections =
            placelore_core::env_parse_with_default("PLACELORE_DB_MAX_CONNECTIONS", 5u32);
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(StorageError::Database)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        run_migrations(&pool).await?;
        tracing::info!(database_url, "RecordStore initialized");
        Ok(Self { pool })
    }

    /// In-memory store for tests and ephemeral runs.
    ///
    /// Pinned to a single connection: each SQLite `:memory:` connection is
    /// its own database.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(StorageError::Database)?
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Close the pool, waiting for connections to shut down cleanly.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Case-insensitive exact match on `place_name`.
    ///
    /// Returns the earliest matching record with its mentions loaded, or
    /// `None` if the place has never been seen.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<LocationRecord>, StorageError> {
        let row = sqlx::query(
            r#"SELECT id, place_name, history, created_at
               FROM location_history
               WHERE place_name = ?1 COLLATE NOCASE
               ORDER BY rowid
               LIMIT 1"#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut record = row_to_record(&row)?;
        record.mentions = self.mentions_for(&record.id).await?;
        Ok(Some(record))
    }

    /// Insert a record with no history and no mentions.
    pub async fn create_bare(&self, name: &str) -> Result<LocationRecord, StorageError> {
        let record = LocationRecord {
            id: Uuid::new_v4().to_string(),
            place_name: name.to_owned(),
            history: None,
            created_at: Utc::now(),
            mentions: vec![],
        };
        sqlx::query(
            "INSERT INTO location_history (id, place_name, history, created_at)
             VALUES (?1, ?2, NULL, ?3)",
        )
        .bind(&record.id)
        .bind(&record.place_name)
        .bind(record.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        tracing::debug!(id = %record.id, place_name = %record.place_name, "created bare record");
        Ok(record)
    }

    /// Persist the synthesized history paragraph into an existing record.
    pub async fn set_history(&self, id: &str, history: &str) -> Result<(), StorageError> {
        let result = sqlx::query("UPDATE location_history SET history = ?1 WHERE id = ?2")
            .bind(history)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound { entity: "location_history", id: id.to_owned() });
        }
        Ok(())
    }

    /// Insert one mention per `(name, description)` pair, linked to `location_id`.
    ///
    /// Atomic as a batch: runs in a single transaction, so a failure partway
    /// (including a mention with an empty name) persists nothing.
    pub async fn add_mentions(
        &self,
        location_id: &str,
        mentions: &[(String, String)],
    ) -> Result<Vec<PlaceMention>, StorageError> {
        let mut tx = self.pool.begin().await?;

        let parent = sqlx::query("SELECT 1 FROM location_history WHERE id = ?1")
            .bind(location_id)
            .fetch_optional(&mut *tx)
            .await?;
        if parent.is_none() {
            return Err(StorageError::NotFound {
                entity: "location_history",
                id: location_id.to_owned(),
            });
        }

        let mut inserted = Vec::with_capacity(mentions.len());
        for (name, description) in mentions {
            if name.trim().is_empty() {
                // Dropping the transaction rolls back anything inserted so far.
                return Err(StorageError::InvalidMention("mention name is empty".to_owned()));
            }
            let mention = PlaceMention {
                id: Uuid::new_v4().to_string(),
                location_id: location_id.to_owned(),
                name: name.clone(),
                description: description.clone(),
            };
            sqlx::query(
                "INSERT INTO historical_places (id, location_id, name, description)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(&mention.id)
            .bind(&mention.location_id)
            .bind(&mention.name)
            .bind(&mention.description)
            .execute(&mut *tx)
            .await?;
            inserted.push(mention);
        }

        tx.commit().await?;
        tracing::debug!(location_id, count = inserted.len(), "persisted mention batch");
        Ok(inserted)
    }

    /// All mentions owned by a record, in insertion order.
    pub async fn mentions_for(&self, location_id: &str) -> Result<Vec<PlaceMention>, StorageError> {
        let rows = sqlx::query(
            "SELECT id, location_id, name, description
             FROM historical_places
             WHERE location_id = ?1
             ORDER BY rowid",
        )
        .bind(location_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_mention).collect()
    }

    /// Total mention count for a record. Used by tests and diagnostics.
    pub async fn mention_count(&self, location_id: &str) -> Result<u64, StorageError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM historical_places WHERE location_id = ?1")
            .bind(location_id)
            .fetch_one(&self.pool)
            .await?;
        let n: i64 = row.try_get("n")?;
        Ok(u64::try_from(n).unwrap_or(0))
    }
}

fn row_to_record(row: &SqliteRow) -> Result<LocationRecord, StorageError> {
    let created_at_str: String = row.try_get("created_at")?;
    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| StorageError::DataCorruption {
            context: format!("created_at '{created_at_str}' is not RFC 3339"),
            source: Box::new(e),
        })?
        .with_timezone(&Utc);
    Ok(LocationRecord {
        id: row.try_get("id")?,
        place_name: row.try_get("place_name")?,
        history: row.try_get("history")?,
        created_at,
        mentions: vec![],
    })
}

fn row_to_mention(row: &SqliteRow) -> Result<PlaceMention, StorageError> {
    Ok(PlaceMention {
        id: row.try_get("id")?,
        location_id: row.try_get("location_id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
    })
}
