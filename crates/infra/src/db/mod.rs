//! SQLite database handle: connection pool, schema, seed data and reset.
//!
//! ## Connection model
//!
//! Every operation clones the current `SqlitePool` and runs against it; no
//! application lock is held while a statement executes. Write serialization
//! and reader isolation come from SQLite itself (WAL journal, busy timeout).
//!
//! The only lock is around the pool handle: `reset()` swaps the pool under a
//! write lock so requests issued during a reset wait for the new database.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tokio::sync::RwLock;

use crate::error::RepositoryResult;

pub mod schema;
pub mod seed;

/// Pool tuning for the database file.
#[derive(Debug, Clone)]
pub struct DatabaseOptions {
    pub max_connections: u32,
    pub busy_timeout: Duration,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            max_connections: 5,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

/// Shared handle to the single database file. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

#[derive(Debug)]
struct DatabaseInner {
    path: PathBuf,
    options: DatabaseOptions,
    pool: RwLock<SqlitePool>,
}

impl Database {
    /// Open (or create) the database file and ensure the schema exists.
    ///
    /// A file that did not exist before is seeded with the reference dataset.
    pub async fn open(path: impl Into<PathBuf>, options: DatabaseOptions) -> RepositoryResult<Self> {
        let path = path.into();
        let fresh = !tokio::fs::try_exists(&path).await?;

        let pool = connect(&path, &options).await?;
        schema::apply(&pool).await?;
        if fresh {
            seed::apply(&pool).await?;
        }

        tracing::info!(path = %path.display(), fresh, "database opened");

        Ok(Self {
            inner: Arc::new(DatabaseInner {
                path,
                options,
                pool: RwLock::new(pool),
            }),
        })
    }

    /// Current pool handle. Clone per operation; do not cache across a reset.
    pub async fn pool(&self) -> SqlitePool {
        self.inner.pool.read().await.clone()
    }

    /// Drop all data: close the pool, delete the file, recreate schema and seed.
    ///
    /// Repeated calls yield the same dataset, including autoincrement ids.
    pub async fn reset(&self) -> RepositoryResult<()> {
        let mut pool = self.inner.pool.write().await;
        pool.close().await;

        let rebuilt = rebuild(&self.inner.path, &self.inner.options, &mut *pool).await;
        match &rebuilt {
            Ok(()) => tracing::info!(path = %self.inner.path.display(), "database reset"),
            Err(err) => tracing::error!(
                path = %self.inner.path.display(),
                error = %err,
                "database reset failed; storage unusable until a reset succeeds"
            ),
        }
        rebuilt
    }
}

/// Recreate the store in place. The new pool is installed as soon as it
/// connects, so a failed seed leaves a reachable (if incomplete) database.
async fn rebuild(path: &Path, options: &DatabaseOptions, pool: &mut SqlitePool) -> RepositoryResult<()> {
    remove_store_files(path).await?;

    let fresh = connect(path, options).await?;
    *pool = fresh.clone();

    schema::apply(&fresh).await?;
    seed::apply(&fresh).await?;
    Ok(())
}

async fn connect(path: &Path, options: &DatabaseOptions) -> RepositoryResult<SqlitePool> {
    let connect_options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(options.busy_timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(options.max_connections)
        .connect_with(connect_options)
        .await?;
    Ok(pool)
}

/// Remove the database file and its WAL side files; missing files are fine.
async fn remove_store_files(path: &Path) -> std::io::Result<()> {
    let mut targets = vec![path.to_path_buf()];
    for suffix in ["-wal", "-shm"] {
        let mut side = path.as_os_str().to_owned();
        side.push(suffix);
        targets.push(PathBuf::from(side));
    }

    for target in targets {
        match tokio::fs::remove_file(&target).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
