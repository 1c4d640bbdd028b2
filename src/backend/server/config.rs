/**
 * Server Configuration
 *
 * Loading and validation of server configuration, focusing on the optional
 * PostgreSQL connection.
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent server startup. When
 * the database is unavailable the caller falls back to the in-memory
 * member store, so a development server comes up with no setup at all.
 */

use sqlx::PgPool;

/// Database configuration result.
pub type DatabaseConfig = Option<PgPool>;

/// Load and initialize the database connection pool.
///
/// Reads `DATABASE_URL`, connects, and runs migrations.
///
/// # Returns
///
/// - `Some(PgPool)` if the database is successfully configured
/// - `None` if `DATABASE_URL` is not set or the connection fails
pub async fn load_database() -> DatabaseConfig {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set. Falling back to the in-memory member store.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Falling back to the in-memory member store.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("Failed to run database migrations: {:?}", e);
            // Migrations may have been applied out of band.
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
