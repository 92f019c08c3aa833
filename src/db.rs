//! Database connection bootstrapping.
//!
//! The pool is created once at process start with a bounded number of
//! connection attempts (fixed delay between them) and is then shared for the
//! process lifetime. Embedded migrations are applied right after the first
//! successful connection.

use log::{error, info, warn};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

const MAX_CONNECTIONS: u32 = 10;
const CONNECT_ATTEMPTS: u32 = 5;
const RETRY_DELAY: Duration = Duration::from_secs(5);
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Migrations embedded from the `migrations/` directory at compile time.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Connects to Postgres, retrying up to [`CONNECT_ATTEMPTS`] times before
/// giving up with the last error.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let mut attempts_left = CONNECT_ATTEMPTS;
    loop {
        match PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(database_url)
            .await
        {
            Ok(pool) => {
                info!("database connection established");
                return Ok(pool);
            }
            Err(e) => {
                attempts_left -= 1;
                if attempts_left == 0 {
                    error!("failed to connect to database: {}", e);
                    return Err(e);
                }
                warn!(
                    "database connection failed: {}. retrying in {}s ({} attempts remaining)",
                    e,
                    RETRY_DELAY.as_secs(),
                    attempts_left
                );
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("database migrations applied");
    Ok(())
}
