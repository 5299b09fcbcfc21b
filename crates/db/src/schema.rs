//! Schema bootstrap and version-marker repair.
//!
//! These are operator procedures run through the `taskmaster-schema` binary
//! when the regular migration chain cannot be used. The server never calls
//! them.
//!
//! The marker table keeps the name and layout the existing deployments
//! already have (`alembic_version(version_num)`), so stamping here is
//! compatible with the tool that normally owns it.

use sqlx::PgPool;

/// Name of the single-row table holding the current schema revision.
pub const VERSION_TABLE: &str = "alembic_version";

/// Revisions the schema chain knows about, oldest first.
pub const KNOWN_REVISIONS: &[&str] = &["001", "002"];

/// Revision describing the schema created by [`ensure_task_schema`].
pub const LATEST_REVISION: &str = "002";

const CREATE_TASKS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS tasks (
        id            BIGSERIAL PRIMARY KEY,
        user_id       VARCHAR(255) NOT NULL,
        title         VARCHAR(200) NOT NULL,
        description   VARCHAR(1000),
        completed     BOOLEAN NOT NULL DEFAULT false,
        due_date      TIMESTAMPTZ,
        due_date_end  TIMESTAMPTZ,
        priority      VARCHAR(10)
                      CHECK (priority IS NULL OR priority IN ('low', 'medium', 'high')),
        category      VARCHAR(100),
        created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )";

const CREATE_USER_ID_INDEX: &str = "CREATE INDEX IF NOT EXISTS ix_tasks_user_id ON tasks (user_id)";

const CREATE_COMPLETED_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS ix_tasks_completed ON tasks (completed)";

const CREATE_VERSION_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS alembic_version (
        version_num VARCHAR(32) NOT NULL PRIMARY KEY
    )";

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Unknown revision '{0}'. Known revisions: {known}", known = KNOWN_REVISIONS.join(", "))]
    UnknownRevision(String),
}

/// Outcome of [`ensure_task_schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    /// `false` if the `tasks` table was already present.
    pub table_created: bool,
    /// Marker written after creating the table, if any.
    pub stamped: Option<StampPlan>,
}

/// What [`stamp_revision`] decided to do with the version marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StampPlan {
    /// The marker already names a known revision and is left alone.
    Keep(String),
    /// The marker is rewritten.
    Set { from: Option<String>, to: String },
}

/// Whether `revision` is part of the known chain.
pub fn is_known_revision(revision: &str) -> bool {
    KNOWN_REVISIONS.contains(&revision)
}

/// Decide how to move the marker from `current` to `target`.
///
/// Without `force`, a marker that already names a known revision is kept; a
/// missing marker or one naming a revision that does not exist is replaced.
/// With `force`, the marker is set to `target` unless it already matches.
pub fn plan_stamp(
    current: Option<&str>,
    target: &str,
    force: bool,
) -> Result<StampPlan, SchemaError> {
    if !is_known_revision(target) {
        return Err(SchemaError::UnknownRevision(target.to_string()));
    }

    match current {
        Some(cur) if cur == target => Ok(StampPlan::Keep(cur.to_string())),
        Some(cur) if !force && is_known_revision(cur) => Ok(StampPlan::Keep(cur.to_string())),
        _ => Ok(StampPlan::Set {
            from: current.map(str::to_string),
            to: target.to_string(),
        }),
    }
}

/// Check `information_schema` for a table in the current search path.
pub async fn table_exists(pool: &PgPool, table: &str) -> Result<bool, sqlx::Error> {
    let (exists,): (bool,) = sqlx::query_as(
        "SELECT EXISTS (
             SELECT 1 FROM information_schema.tables
             WHERE table_schema = current_schema() AND table_name = $1
         )",
    )
    .bind(table)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

/// Read the current marker. `None` if the table or its row is missing.
pub async fn current_revision(pool: &PgPool) -> Result<Option<String>, sqlx::Error> {
    if !table_exists(pool, VERSION_TABLE).await? {
        return Ok(None);
    }
    let row: Option<(String,)> = sqlx::query_as("SELECT version_num FROM alembic_version LIMIT 1")
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(v,)| v))
}

/// Create the `tasks` table and its indexes if they are missing.
///
/// Indexes are (re)asserted even when the table already exists. When the
/// table is created here, the marker is stamped to [`LATEST_REVISION`] so the
/// migration tool does not try to create it again.
pub async fn ensure_task_schema(pool: &PgPool) -> Result<BootstrapReport, SchemaError> {
    let existed = table_exists(pool, "tasks").await?;

    let mut tx = pool.begin().await?;
    sqlx::query(CREATE_TASKS_TABLE).execute(&mut *tx).await?;
    sqlx::query(CREATE_USER_ID_INDEX).execute(&mut *tx).await?;
    sqlx::query(CREATE_COMPLETED_INDEX).execute(&mut *tx).await?;
    tx.commit().await?;

    if existed {
        tracing::info!("tasks table already exists, indexes verified");
        return Ok(BootstrapReport {
            table_created: false,
            stamped: None,
        });
    }

    tracing::info!("tasks table created");
    let plan = stamp_revision(pool, LATEST_REVISION, true).await?;
    Ok(BootstrapReport {
        table_created: true,
        stamped: Some(plan),
    })
}

/// Point the version marker at `target` according to [`plan_stamp`].
pub async fn stamp_revision(
    pool: &PgPool,
    target: &str,
    force: bool,
) -> Result<StampPlan, SchemaError> {
    let mut tx = pool.begin().await?;
    sqlx::query(CREATE_VERSION_TABLE).execute(&mut *tx).await?;

    let current: Option<(String,)> =
        sqlx::query_as("SELECT version_num FROM alembic_version LIMIT 1 FOR UPDATE")
            .fetch_optional(&mut *tx)
            .await?;
    let current = current.map(|(v,)| v);

    let plan = plan_stamp(current.as_deref(), target, force)?;
    if let StampPlan::Set { from, to } = &plan {
        sqlx::query("DELETE FROM alembic_version")
            .execute(&mut *tx)
            .await?;
        sqlx::query("INSERT INTO alembic_version (version_num) VALUES ($1)")
            .bind(to)
            .execute(&mut *tx)
            .await?;
        tracing::info!(from = ?from, to = %to, "Version marker stamped");
    }

    tx.commit().await?;
    Ok(plan)
}
