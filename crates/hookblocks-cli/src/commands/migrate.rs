//! Database migration command.

use hookblocks_core::config::AppConfig;
use hookblocks_core::error::AppError;
use hookblocks_database::connection::{self, mask_password};
use hookblocks_database::migration;

use crate::output;

/// Run all pending migrations against the configured database
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    println!(
        "Running migrations on {}...",
        mask_password(&config.store.database.url)
    );

    let pool = connection::connect(&config.store.database).await?;
    migration::run_migrations(&pool).await?;

    output::print_success("All migrations applied.");
    Ok(())
}
