//! Versioned data migrations for demo request statuses.
//!
//! Runs at startup after SQLx schema migrations. Each migration renames
//! stored status values and is applied at most once: applied versions are
//! recorded in `data_migration`, and the affected rows are copied to
//! `demo_request_status_backup` before being rewritten so a migration can be
//! rolled back.

use shared::error::AppError;
use shared::models::DemoRequestStatus;
use shared::util::now_millis;
use sqlx::{Sqlite, SqlitePool, Transaction};

/// One status remapping step
#[derive(Debug, Clone, Copy)]
pub struct DataMigration {
    pub version: i64,
    pub name: &'static str,
    /// `(from, to)` pairs; `to` must be a canonical [`DemoRequestStatus`]
    pub remap: &'static [(&'static str, &'static str)],
}

/// Migrations shipped with the server, in version order
pub const BUILTIN: &[DataMigration] = &[
    DataMigration {
        version: 1,
        name: "demo_request_status_uppercase",
        remap: &[
            ("pending", "PENDING"),
            ("contacted", "CONTACTED"),
            ("scheduled", "SCHEDULED"),
            ("completed", "COMPLETED"),
            ("cancelled", "CANCELLED"),
        ],
    },
    DataMigration {
        version: 2,
        name: "demo_request_status_legacy_names",
        remap: &[
            ("DEMO_SCHEDULED", "SCHEDULED"),
            ("DONE", "COMPLETED"),
            ("REJECTED", "CANCELLED"),
        ],
    },
];

fn db_err(context: &str) -> impl FnOnce(sqlx::Error) -> AppError + '_ {
    move |e| AppError::database(format!("{context}: {e}"))
}

/// Whether `version` is recorded as applied
pub async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, AppError> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM data_migration WHERE version = ?)")
        .bind(version)
        .fetch_one(pool)
        .await
        .map_err(db_err("Data migration check failed"))
}

/// Apply every migration not yet recorded, lowest version first.
///
/// Returns the versions applied by this call; empty when up to date.
pub async fn run_pending(
    pool: &SqlitePool,
    migrations: &[DataMigration],
) -> Result<Vec<i64>, AppError> {
    let mut ordered: Vec<&DataMigration> = migrations.iter().collect();
    ordered.sort_by_key(|m| m.version);

    let mut applied = Vec::new();
    for migration in ordered {
        if is_applied(pool, migration.version).await? {
            continue;
        }
        apply(pool, migration).await?;
        applied.push(migration.version);
    }

    warn_unknown_statuses(pool).await?;
    Ok(applied)
}

async fn apply(pool: &SqlitePool, migration: &DataMigration) -> Result<(), AppError> {
    tracing::info!(
        version = migration.version,
        name = migration.name,
        "Applying data migration"
    );

    let mut tx = pool
        .begin()
        .await
        .map_err(db_err("Failed to begin data migration"))?;

    let backed_up = backup(&mut tx, migration).await?;
    remap(&mut tx, migration).await?;

    if let Err(reason) = verify(&mut tx, migration).await? {
        restore(&mut tx, migration.version).await?;
        tx.commit()
            .await
            .map_err(db_err("Failed to commit data migration restore"))?;
        tracing::error!(
            version = migration.version,
            name = migration.name,
            %reason,
            "Data migration verification failed, statuses restored"
        );
        return Err(AppError::migration_failed(format!(
            "Data migration {} ({}) failed: {reason}",
            migration.version, migration.name
        ))
        .with_detail("version", migration.version));
    }

    sqlx::query("INSERT INTO data_migration (version, name, applied_at) VALUES (?, ?, ?)")
        .bind(migration.version)
        .bind(migration.name)
        .bind(now_millis())
        .execute(&mut *tx)
        .await
        .map_err(db_err("Failed to record data migration"))?;

    tx.commit()
        .await
        .map_err(db_err("Failed to commit data migration"))?;

    tracing::info!(
        version = migration.version,
        rows = backed_up,
        "Data migration applied"
    );
    Ok(())
}

/// Copy rows about to be rewritten; returns how many were copied
async fn backup(
    tx: &mut Transaction<'_, Sqlite>,
    migration: &DataMigration,
) -> Result<u64, AppError> {
    // A previous failed attempt may have left rows behind
    sqlx::query("DELETE FROM demo_request_status_backup WHERE migration_version = ?")
        .bind(migration.version)
        .execute(&mut **tx)
        .await
        .map_err(db_err("Failed to clear status backup"))?;

    let mut total = 0;
    for (from, _) in migration.remap {
        let result = sqlx::query(
            "INSERT INTO demo_request_status_backup (migration_version, demo_request_id, status) \
             SELECT ?, id, status FROM demo_request WHERE status = ?",
        )
        .bind(migration.version)
        .bind(*from)
        .execute(&mut **tx)
        .await
        .map_err(db_err("Failed to back up statuses"))?;
        total += result.rows_affected();
    }
    Ok(total)
}

/// Rewrite backed-up rows only, so chained pairs never cascade
async fn remap(
    tx: &mut Transaction<'_, Sqlite>,
    migration: &DataMigration,
) -> Result<(), AppError> {
    let now = now_millis();
    for (from, to) in migration.remap {
        sqlx::query(
            "UPDATE demo_request SET status = ?, updated_at = ? WHERE id IN ( \
                SELECT demo_request_id FROM demo_request_status_backup \
                WHERE migration_version = ? AND status = ? \
             )",
        )
        .bind(*to)
        .bind(now)
        .bind(migration.version)
        .bind(*from)
        .execute(&mut **tx)
        .await
        .map_err(db_err("Failed to remap statuses"))?;
    }
    Ok(())
}

/// Outer error: database failure. Inner error: the migration left bad data.
async fn verify(
    tx: &mut Transaction<'_, Sqlite>,
    migration: &DataMigration,
) -> Result<Result<(), String>, AppError> {
    let rows: Vec<(i64, String)> = sqlx::query_as(
        "SELECT d.id, d.status FROM demo_request d \
         JOIN demo_request_status_backup b ON b.demo_request_id = d.id \
         WHERE b.migration_version = ? ORDER BY d.id",
    )
    .bind(migration.version)
    .fetch_all(&mut **tx)
    .await
    .map_err(db_err("Failed to verify statuses"))?;

    if let Some((id, status)) = rows
        .iter()
        .find(|(_, status)| status.parse::<DemoRequestStatus>().is_err())
    {
        return Ok(Err(format!(
            "demo request {id} has invalid status '{status}'"
        )));
    }

    for (from, _) in migration.remap {
        // A value that is also a target may legitimately remain
        if migration.remap.iter().any(|(_, to)| to == from) {
            continue;
        }
        let remaining: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM demo_request WHERE status = ?")
                .bind(*from)
                .fetch_one(&mut **tx)
                .await
                .map_err(db_err("Failed to verify statuses"))?;
        if remaining > 0 {
            return Ok(Err(format!("{remaining} rows still have status '{from}'")));
        }
    }

    Ok(Ok(()))
}

async fn restore(tx: &mut Transaction<'_, Sqlite>, version: i64) -> Result<u64, AppError> {
    let result = sqlx::query(
        "UPDATE demo_request SET status = ( \
            SELECT b.status FROM demo_request_status_backup b \
            WHERE b.migration_version = ?1 AND b.demo_request_id = demo_request.id \
         ) WHERE id IN ( \
            SELECT demo_request_id FROM demo_request_status_backup WHERE migration_version = ?1 \
         )",
    )
    .bind(version)
    .execute(&mut **tx)
    .await
    .map_err(db_err("Failed to restore statuses"))?;

    sqlx::query("DELETE FROM demo_request_status_backup WHERE migration_version = ?")
        .bind(version)
        .execute(&mut **tx)
        .await
        .map_err(db_err("Failed to clear status backup"))?;

    Ok(result.rows_affected())
}

/// Undo an applied migration from its backup and forget its version.
///
/// The migration will be applied again by the next [`run_pending`].
pub async fn rollback(pool: &SqlitePool, version: i64) -> Result<u64, AppError> {
    if !is_applied(pool, version).await? {
        return Err(AppError::migration_failed(format!(
            "Data migration {version} is not applied"
        ))
        .with_detail("version", version));
    }

    let mut tx = pool
        .begin()
        .await
        .map_err(db_err("Failed to begin rollback"))?;
    let restored = restore(&mut tx, version).await?;
    sqlx::query("DELETE FROM data_migration WHERE version = ?")
        .bind(version)
        .execute(&mut *tx)
        .await
        .map_err(db_err("Failed to remove data migration record"))?;
    tx.commit()
        .await
        .map_err(db_err("Failed to commit rollback"))?;

    tracing::warn!(version, rows = restored, "Data migration rolled back");
    Ok(restored)
}

/// Statuses no migration knows about are reported, not rewritten
async fn warn_unknown_statuses(pool: &SqlitePool) -> Result<(), AppError> {
    let statuses: Vec<String> = sqlx::query_scalar("SELECT DISTINCT status FROM demo_request")
        .fetch_all(pool)
        .await
        .map_err(db_err("Failed to scan statuses"))?;

    for status in statuses {
        if status.parse::<DemoRequestStatus>().is_err() {
            tracing::warn!(%status, "Demo request status has no canonical mapping");
        }
    }
    Ok(())
}
