//! PostgreSQL pool for the record store.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use hookblocks_core::config::store::DatabaseConfig;
use hookblocks_core::error::{AppError, ErrorKind};
use hookblocks_core::result::AppResult;

/// Opens the pool backing the `content_records` table.
///
/// A bad URL is a configuration problem; anything else means the record
/// store is unreachable right now.
pub async fn connect(config: &DatabaseConfig) -> AppResult<PgPool> {
    let url = mask_password(&config.url);
    info!(
        url = %url,
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Opening record store pool"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
        .connect(&config.url)
        .await
        .map_err(|e| {
            AppError::with_source(
                connect_error_kind(&e),
                format!("Record store database at {url} is unavailable: {e}"),
                e,
            )
        })?;

    info!(url = %url, "Record store pool ready");
    Ok(pool)
}

fn connect_error_kind(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::Configuration(_) => ErrorKind::Configuration,
        _ => ErrorKind::ServiceUnavailable,
    }
}

/// Masks the password in a database URL so it can be logged or shown.
pub fn mask_password(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(colon_pos) = url[..at_pos].rfind(':') {
            let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
            if colon_pos > scheme_end {
                return format!("{}:****@{}", &url[..colon_pos], &url[at_pos + 1..]);
            }
        }
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_password() {
        assert_eq!(
            mask_password("postgres://hookblocks:secret@db:5432/hookblocks"),
            "postgres://hookblocks:****@db:5432/hookblocks"
        );
        assert_eq!(
            mask_password("postgres://db:5432/hookblocks"),
            "postgres://db:5432/hookblocks"
        );
    }

    #[test]
    fn test_connect_error_kinds() {
        assert_eq!(
            connect_error_kind(&sqlx::Error::PoolTimedOut),
            ErrorKind::ServiceUnavailable
        );
        assert_eq!(
            connect_error_kind(&sqlx::Error::Configuration("bad url".into())),
            ErrorKind::Configuration
        );
    }

    #[tokio::test]
    async fn test_unparsable_url_is_configuration_error() {
        let config = DatabaseConfig {
            url: "not a url".to_string(),
            ..DatabaseConfig::default()
        };
        let err = connect(&config).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
