//! Active-record snapshot commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use hookblocks_core::error::AppError;
use hookblocks_core::traits::cache::CacheProvider;
use hookblocks_service::AppContext;

use crate::output::{self, OutputFormat};

/// Arguments for cache commands
#[derive(Debug, Args)]
pub struct CacheArgs {
    /// Cache subcommand
    #[command(subcommand)]
    pub command: CacheCommand,
}

/// Cache subcommands
#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// Drop the active-record snapshot
    Invalidate {
        /// Also drop every other HookBlocks entry, queued notices included
        #[arg(long)]
        all: bool,
    },
    /// Show the cache backend and snapshot state
    Status,
}

#[derive(Debug, Serialize)]
struct CacheStatus {
    provider: String,
    healthy: bool,
    snapshot_cached: bool,
    snapshot_ttl_seconds: u64,
}

/// Execute cache commands
pub async fn execute(
    args: &CacheArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        CacheCommand::Invalidate { all: false } => {
            ctx.registry.invalidate().await?;
            output::print_success("Active record snapshot invalidated");
        }
        CacheCommand::Invalidate { all: true } => {
            ctx.flush_cache().await?;
            output::print_success("All HookBlocks cache entries flushed");
        }
        CacheCommand::Status => {
            let status = CacheStatus {
                provider: ctx.config.cache.provider.clone(),
                healthy: ctx.cache.health_check().await.unwrap_or(false),
                snapshot_cached: ctx.registry.is_cached().await?,
                snapshot_ttl_seconds: ctx.registry.ttl().as_secs(),
            };

            match format {
                OutputFormat::Json => output::print_json(&status),
                OutputFormat::Table => {
                    output::print_kv("provider", &status.provider);
                    output::print_kv("healthy", &status.healthy.to_string());
                    output::print_kv("snapshot cached", &status.snapshot_cached.to_string());
                    output::print_kv("snapshot ttl", &format!("{}s", status.snapshot_ttl_seconds));
                }
            }
        }
    }

    Ok(())
}
