use crate::config::DatabaseConfig;
use crate::error::Result;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

/// Handle on the MySQL connection pool.
///
/// Constructed once at start-up and passed explicitly to whoever needs it;
/// there is no process-wide singleton. The pool itself is internally
/// synchronized, so a `Database` can be shared across in-flight requests.
///
/// # Example
///
/// ```no_run
/// use tablegate::config::DatabaseConfig;
/// use tablegate::db::Database;
///
/// # async fn example(config: DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
/// let db = Database::connect(&config).await?;
/// let schema = db.table_schema("payments").await?;
/// # Ok(())
/// # }
/// ```
pub struct Database {
    pool: MySqlPool,
}

impl Database {
    /// Open a connection pool against the configured MySQL server.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        tracing::info!(
            "Connecting to mysql://{}@{}:{}/{}",
            config.username,
            config.host,
            config.port,
            config.database
        );

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url())
            .await?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool (used by tests that bring their own server).
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}
